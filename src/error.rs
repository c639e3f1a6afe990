use serde::Deserialize;
use serde_json::Value;

// =========================================================
// 表单校验错误
// =========================================================

/// 在任何网络请求之前检出的客户端校验错误
///
/// Display 即是展示给用户的文案。
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Por favor, preencha todos os campos")]
    MissingFields,
    #[error("As senhas não coincidem")]
    PasswordMismatch,
    #[error("Selecione um vendedor")]
    MissingSeller,
    #[error("Informe um valor maior que zero")]
    InvalidAmount,
    #[error("Informe uma data válida (AAAA-MM-DD)")]
    InvalidDate,
}

// =========================================================
// 客户端错误
// =========================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// 没有拿到响应（连接失败、CORS、fetch 异常）
    #[error("network error: {0}")]
    Network(String),

    /// 非 2xx 响应；message 取自响应体的 `message` 字段
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },

    /// 响应体与类型化模型不匹配
    #[error("decode error: {0}")]
    Decode(String),

    /// 认证响应不属于任何已知结构
    #[error("unrecognized auth response: {0}")]
    UnrecognizedAuth(Value),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// 机器可读的错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::Http { status: 401, .. } => "UNAUTHORIZED",
            ClientError::Http { status: 404, .. } => "RESOURCE_NOT_FOUND",
            ClientError::Http { status: 422, .. } => "UNPROCESSABLE_ENTITY",
            ClientError::Http { .. } => "HTTP_ERROR",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::UnrecognizedAuth(_) => "UNRECOGNIZED_AUTH_RESPONSE",
            ClientError::Validation(_) => "INVALID_INPUT",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 后端返回的 message
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ClientError::Http {
                message: Some(m), ..
            } if !m.trim().is_empty() => Some(m.as_str()),
            _ => None,
        }
    }

    /// 给界面展示的文案：后端 message 优先，其次校验文案，最后使用动作的默认文案
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(v) => v.to_string(),
            _ => self
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// 从非 2xx 响应构建
    pub fn from_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message);
        ClientError::Http { status, message }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_wins_over_fallback() {
        let err = ClientError::from_response(422, r#"{"message":"E-mail já cadastrado"}"#);
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.code(), "UNPROCESSABLE_ENTITY");
        assert_eq!(err.display_message("Erro ao criar vendedor"), "E-mail já cadastrado");
    }

    #[test]
    fn fallback_when_body_has_no_message() {
        let err = ClientError::from_response(500, "<html>oops</html>");
        assert_eq!(err.backend_message(), None);
        assert_eq!(err.display_message("Erro ao buscar vendas"), "Erro ao buscar vendas");

        let err = ClientError::from_response(500, r#"{"message":"  "}"#);
        assert_eq!(err.display_message("fallback"), "fallback");

        let err = ClientError::Network("connection refused".into());
        assert_eq!(err.display_message("Erro ao fazer login"), "Erro ao fazer login");
    }

    #[test]
    fn validation_uses_its_own_text() {
        let err = ClientError::from(ValidationError::PasswordMismatch);
        assert_eq!(err.code(), "INVALID_INPUT");
        assert_eq!(err.display_message("ignored"), "As senhas não coincidem");
    }

    #[test]
    fn display_includes_status() {
        let err = ClientError::Http {
            status: 401,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 401: request failed");
        assert_eq!(err.code(), "UNAUTHORIZED");
    }
}
