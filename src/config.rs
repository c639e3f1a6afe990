use salesdesk_shared::{DEFAULT_API_URL, DEFAULT_TOKEN_KEY};

// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

pub const ENV_API_URL: &str = "SALESDESK_API_URL";
pub const ENV_TOKEN_KEY: &str = "SALESDESK_TOKEN_KEY";

/// 客户端配置
///
/// 从变量查找函数读取，缺省时使用默认值。原生环境读进程环境变量，
/// 浏览器端由前端在编译期注入。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API 根地址，不带结尾的 `/`
    pub api_url: String,
    /// 持久化存储中保存 Bearer Token 的键名
    pub token_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_base_url(&api_url.into()),
            ..Default::default()
        }
    }

    /// 通过变量查找函数构建配置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(ENV_API_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token_key = lookup(ENV_TOKEN_KEY)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_KEY.to_string());

        Self {
            api_url: normalize_base_url(&api_url),
            token_key,
        }
    }

    /// 从进程环境变量读取
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 拼接完整 URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_url, path)
        } else {
            format!("{}/{}", self.api_url, path)
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_lookup_is_empty() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, "http://localhost:8080/api/v1");
        assert_eq!(config.token_key, "token");
    }

    #[test]
    fn lookup_overrides_and_trims() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_URL, "https://api.example.com/v1/ "),
            (ENV_TOKEN_KEY, "sd_token"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_url, "https://api.example.com/v1");
        assert_eq!(config.token_key, "sd_token");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = ClientConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn url_joins_with_and_without_slash() {
        let config = ClientConfig::new("http://h/api/");
        assert_eq!(config.url("/sales"), "http://h/api/sales");
        assert_eq!(config.url("sales"), "http://h/api/sales");
    }
}
