//! 响应规范化与类型化解码
//!
//! 后端对同一类数据有多种包装方式（顶层字段 / `data` 包装 / Laravel 分页器 /
//! `meta` 分页信息）。所有形状的识别集中在这里，服务层只拿到类型化结果。

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use salesdesk_shared::{Id, Page, Pagination, SessionUser};

// =========================================================
// 认证响应
// =========================================================

/// 认证响应的识别结果
#[derive(Debug, Clone, PartialEq)]
pub enum AuthShape {
    Recognized {
        token: String,
        user: Option<SessionUser>,
    },
    Unrecognized(Value),
}

/// 识别登录 / 注册 / 刷新响应
///
/// 已知形状：
/// - `{ access_token, token_type?, expires_in?, user? }`
/// - `{ token, user? }`
/// - `{ status?, message?, data: { token | access_token, user? } }`
pub fn normalize_auth(raw: Value) -> AuthShape {
    let data = raw.get("data").filter(|d| d.is_object());

    let token = non_empty_str(&raw, "access_token")
        .or_else(|| non_empty_str(&raw, "token"))
        .or_else(|| data.and_then(|d| non_empty_str(d, "token")))
        .or_else(|| data.and_then(|d| non_empty_str(d, "access_token")));

    let Some(token) = token else {
        return AuthShape::Unrecognized(raw);
    };

    let user = raw
        .get("user")
        .and_then(extract_user)
        .or_else(|| data.and_then(|d| d.get("user")).and_then(extract_user));

    AuthShape::Recognized { token, user }
}

/// 识别 `/auth/user` 响应
///
/// 依次尝试：响应本身就是用户对象 -> `data` 字段中的用户对象 -> 尽力从响应中提取。
pub fn normalize_user(raw: &Value) -> Option<SessionUser> {
    let is_user_object =
        |v: &Value| v.get("id").is_some() && v.get("name").is_some() && v.get("email").is_some();

    if is_user_object(raw) {
        return extract_user(raw);
    }
    if let Some(data) = raw.get("data").filter(|d| d.is_object()) {
        return extract_user(data);
    }
    log::warn!("[Normalize] unexpected current-user response: {}", raw);
    extract_user(raw)
}

fn extract_user(v: &Value) -> Option<SessionUser> {
    if !v.is_object() {
        return None;
    }
    let id = lenient_id(v.get("id")?)?;
    Some(SessionUser {
        id,
        name: v.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
        email: v.get("email").and_then(Value::as_str).unwrap_or_default().to_string(),
    })
}

fn lenient_id(v: &Value) -> Option<Id> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_empty_str(v: &Value, key: &str) -> Option<String> {
    v.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// =========================================================
// 列表与单项
// =========================================================

/// 解码分页列表
///
/// 集合字段缺失或不是数组时返回空列表（记录警告）；集合存在但元素与模型
/// 不匹配时返回 `ClientError::Decode`。
pub fn decode_page<T: DeserializeOwned>(raw: &Value) -> ClientResult<Page<T>> {
    let container = match raw.get("data") {
        Some(d) if d.is_object() => d,
        _ => raw,
    };

    let items = match container.get("data") {
        Some(Value::Array(arr)) => arr
            .iter()
            .map(|item| serde_json::from_value::<T>(item.clone()))
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| ClientError::Decode(format!("list item: {}", e)))?,
        other => {
            log::warn!(
                "[Normalize] list payload has no collection ({}), using empty list",
                other.map(value_kind).unwrap_or("missing")
            );
            Vec::new()
        }
    };

    let sources = [container.get("meta"), Some(container), raw.get("meta"), Some(raw)];
    let lookup = |key: &str| {
        sources
            .iter()
            .flatten()
            .find_map(|src| src.get(key).and_then(lenient_u64).filter(|n| *n > 0))
    };
    // 页码超出 u32 时视为缺失
    let page_lookup = |key: &str| {
        sources
            .iter()
            .flatten()
            .find_map(|src| {
                src.get(key)
                    .and_then(lenient_u64)
                    .filter(|n| *n > 0)
                    .and_then(|n| u32::try_from(n).ok())
            })
    };

    let defaults = Pagination::default();
    let pagination = Pagination {
        current_page: page_lookup("current_page").unwrap_or(defaults.current_page),
        total_pages: page_lookup("last_page").unwrap_or(defaults.total_pages),
        total_items: lookup("total").unwrap_or(defaults.total_items),
    };

    Ok(Page { items, pagination })
}

/// 解码单个资源：`{ data: {...} }` 或对象本身
pub fn decode_item<T: DeserializeOwned>(raw: &Value) -> ClientResult<T> {
    let target = match raw.get("data") {
        Some(d) if d.is_object() => d,
        _ => raw,
    };
    serde_json::from_value(target.clone()).map_err(|e| ClientError::Decode(e.to_string()))
}

fn lenient_u64(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests;
