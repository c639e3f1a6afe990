use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::normalize::{AuthShape, normalize_auth, normalize_user};
use salesdesk_shared::protocol::Endpoint;
use salesdesk_shared::{LoginRequest, RegisterRequest, SessionUser};

/// 认证相关接口
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<AuthShape> {
        let raw = self.api.post(Endpoint::Login, credentials).await?;
        Ok(normalize_auth(raw))
    }

    pub async fn register(&self, data: &RegisterRequest) -> ClientResult<AuthShape> {
        let raw = self.api.post(Endpoint::Register, data).await?;
        Ok(normalize_auth(raw))
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.api.post(Endpoint::Logout, &serde_json::json!({})).await?;
        Ok(())
    }

    pub async fn refresh(&self) -> ClientResult<AuthShape> {
        let raw = self.api.post(Endpoint::Refresh, &serde_json::json!({})).await?;
        Ok(normalize_auth(raw))
    }

    pub async fn current_user(&self) -> ClientResult<Option<SessionUser>> {
        let raw = self.api.get(Endpoint::CurrentUser, &[]).await?;
        Ok(normalize_user(&raw))
    }
}
