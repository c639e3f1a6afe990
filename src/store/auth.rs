use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::normalize::AuthShape;
use crate::services::AuthService;
use crate::session::SessionContext;
use crate::store::{ActionState, StateCell};
use salesdesk_shared::{LoginRequest, RegisterRequest, SessionUser};

const LOGIN_FAILED: &str = "Erro ao fazer login";
const REGISTER_FAILED: &str = "Erro ao registrar usuário";
const REFRESH_FAILED: &str = "Erro ao renovar sessão";
const CURRENT_USER_FAILED: &str = "Erro ao carregar usuário";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl ActionState for AuthState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// 会话 Store
///
/// Token 的唯一来源是 `SessionContext` 背后的持久化存储，状态中的 `token`
/// 只是它的镜像，每次会话变化时同步。
pub struct AuthStore {
    service: AuthService,
    session: SessionContext,
    state: StateCell<AuthState>,
}

impl AuthStore {
    pub fn new(api: ApiClient) -> Self {
        let session = api.session().clone();
        let token = session.token();
        let state = AuthState {
            is_authenticated: token.is_some(),
            token,
            ..Default::default()
        };
        Self {
            service: AuthService::new(api),
            session,
            state: StateCell::new(state),
        }
    }

    // --- 读取 ---

    pub fn state(&self) -> AuthState {
        self.state.snapshot()
    }

    pub fn subscribe(&self, listener: impl Fn(&AuthState) + 'static) {
        self.state.subscribe(listener);
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.is_authenticated)
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.state.with(|s| s.user.clone())
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn clear_error(&self) {
        self.state.update(|s| s.error = None);
    }

    /// 记录一个没有经过网络的错误（例如表单校验失败）
    pub fn set_error(&self, error: &ClientError, fallback: &str) {
        let message = error.display_message(fallback);
        self.state.update(|s| s.error = Some(message));
    }

    // --- 动作 ---

    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<Option<SessionUser>> {
        self.state.begin();
        let result = match self.service.login(credentials).await {
            Ok(shape) => self.apply_auth(shape),
            Err(err) => Err(err),
        };
        if result.is_err() {
            self.clear_session();
        } else {
            log::info!("[Auth] logged in as {}", credentials.email);
        }
        self.state.finish(result, LOGIN_FAILED)
    }

    pub async fn register(&self, data: &RegisterRequest) -> ClientResult<Option<SessionUser>> {
        self.state.begin();
        let result = match self.service.register(data).await {
            Ok(shape) => self.apply_auth(shape),
            Err(err) => Err(err),
        };
        if result.is_err() {
            self.clear_session();
        }
        self.state.finish(result, REGISTER_FAILED)
    }

    /// 退出登录；无论网络调用是否成功都清空本地会话
    pub async fn logout(&self) {
        self.state.begin();
        if self.session.has_token() {
            if let Err(e) = self.service.logout().await {
                log::warn!("[Auth] logout request failed, clearing session anyway: {}", e);
            }
        }
        self.clear_session();
        log::info!("[Auth] logged out");
        self.state.end();
    }

    /// 换取新 Token；没有 Token 时什么也不做，失败时会话作废
    pub async fn refresh_token(&self) -> ClientResult<()> {
        if !self.session.has_token() {
            return Ok(());
        }
        self.state.begin();
        let result = match self.service.refresh().await {
            Ok(shape) => self.apply_auth(shape).map(|_| ()),
            Err(err) => Err(err),
        };
        if result.is_err() {
            self.clear_session();
        }
        self.state.finish(result, REFRESH_FAILED)
    }

    /// 拉取当前用户；没有 Token 时什么也不做，失败时会话作废
    pub async fn fetch_current_user(&self) -> ClientResult<Option<SessionUser>> {
        if !self.session.has_token() {
            return Ok(None);
        }
        self.state.begin();
        let result = self.service.current_user().await;
        match &result {
            Ok(Some(user)) => {
                let user = user.clone();
                self.state.update(|s| s.user = Some(user));
            }
            Ok(None) => log::warn!("[Auth] current user response carried no user"),
            Err(_) => self.clear_session(),
        }
        self.state.finish(result, CURRENT_USER_FAILED)
    }

    /// 从持久化存储重新同步 Token（存储可能在 Store 之外被修改）
    pub fn sync_session(&self) {
        let token = self.session.token();
        self.state.update(|s| {
            if token.is_none() {
                s.user = None;
            }
            s.is_authenticated = token.is_some();
            s.token = token;
        });
    }

    // --- 内部 ---

    fn apply_auth(&self, shape: AuthShape) -> ClientResult<Option<SessionUser>> {
        match shape {
            AuthShape::Recognized { token, user } => {
                self.session.set_token(&token);
                self.state.update(|s| {
                    s.token = Some(token);
                    s.is_authenticated = true;
                    // 刷新响应不一定带用户，保留已有的
                    if user.is_some() {
                        s.user = user.clone();
                    }
                });
                Ok(self.state.with(|s| s.user.clone()))
            }
            AuthShape::Unrecognized(raw) => {
                log::error!("[Auth] unrecognized auth response: {}", raw);
                Err(ClientError::UnrecognizedAuth(raw))
            }
        }
    }

    fn clear_session(&self) {
        self.session.clear();
        self.state.update(|s| {
            s.token = None;
            s.user = None;
            s.is_authenticated = false;
        });
    }
}
