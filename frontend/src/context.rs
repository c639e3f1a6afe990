//! 应用上下文
//!
//! 核心库的 Store 是单线程的（`Rc` + `RefCell`），这里用 `StoredValue::new_local`
//! 持有它们，并为每个 Store 建立一个快照信号：Store 每次变更都通过 `subscribe`
//! 把最新状态写入信号，视图只读信号。

use std::rc::Rc;

use leptos::prelude::*;
use salesdesk::store::{
    AuthState, AuthStore, ReportsState, ReportsStore, ResourceState, SalesStore, SellersStore,
    UsersStore,
};
use salesdesk::{ApiClient, ClientConfig, SessionContext};
use salesdesk_shared::{Sale, Seller, User};

use crate::web::{BrowserStorage, FetchHttpClient};

type Local<T> = StoredValue<Rc<T>, LocalStorage>;

/// 一个 Store 及其快照信号
pub struct StoreHandle<T: 'static, S: Send + Sync + 'static> {
    store: Local<T>,
    pub state: RwSignal<S>,
}

impl<T: 'static, S: Send + Sync + 'static> Clone for StoreHandle<T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static, S: Send + Sync + 'static> Copy for StoreHandle<T, S> {}

impl<T: 'static, S: Send + Sync + 'static> StoreHandle<T, S> {
    /// 取出 Store（克隆 `Rc`），用于在异步任务中调用动作
    pub fn store(&self) -> Rc<T> {
        self.store.get_value()
    }
}

pub type AuthHandle = StoreHandle<AuthStore, AuthState>;
pub type SellersHandle = StoreHandle<SellersStore, ResourceState<Seller>>;
pub type SalesHandle = StoreHandle<SalesStore, ResourceState<Sale>>;
pub type UsersHandle = StoreHandle<UsersStore, ResourceState<User>>;
pub type ReportsHandle = StoreHandle<ReportsStore, ReportsState>;

macro_rules! handle {
    ($store:expr) => {{
        let store = Rc::new($store);
        let state = RwSignal::new(store.state());
        store.subscribe(move |s| state.set(s.clone()));
        StoreHandle {
            store: StoredValue::new_local(store),
            state,
        }
    }};
}

/// 通过 Context 共享的全部 Store
#[derive(Clone, Copy)]
pub struct AppContext {
    pub session: StoredValue<SessionContext, LocalStorage>,
    pub auth: AuthHandle,
    pub sellers: SellersHandle,
    pub sales: SalesHandle,
    pub users: UsersHandle,
    pub reports: ReportsHandle,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Self {
        let session = SessionContext::init(Rc::new(BrowserStorage), config.token_key.clone());
        let api = ApiClient::new(Rc::new(FetchHttpClient), config, session.clone());

        Self {
            session: StoredValue::new_local(session),
            auth: handle!(AuthStore::new(api.clone())),
            sellers: handle!(SellersStore::new(api.clone())),
            sales: handle!(SalesStore::new(api.clone())),
            users: handle!(UsersStore::new(api.clone())),
            reports: handle!(ReportsStore::new(api)),
        }
    }

    /// 认证状态信号（注入路由服务）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.auth.state;
        Signal::derive(move || state.get().is_authenticated)
    }
}

/// 编译期注入的配置
pub fn build_config() -> ClientConfig {
    ClientConfig::from_lookup(|name| match name {
        salesdesk::config::ENV_API_URL => option_env!("SALESDESK_API_URL").map(str::to_string),
        salesdesk::config::ENV_TOKEN_KEY => option_env!("SALESDESK_TOKEN_KEY").map(str::to_string),
        _ => None,
    })
}

/// 从 Context 获取应用上下文
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
