//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use leptos::prelude::*;
use salesdesk::{AppRoute, GuardDecision, SessionContext, guard_session};
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 守卫每次都从会话存储读取 Token；认证信号只用于感知登录/登出。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话（守卫的唯一依据）
    session: StoredValue<SessionContext, LocalStorage>,
    /// 认证状态变化（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(session: StoredValue<SessionContext, LocalStorage>, is_authenticated: Signal<bool>) -> Self {
        let (current_route, set_route) = signal(AppRoute::NotFound);

        let router = Self {
            current_route,
            set_route,
            session,
            is_authenticated,
        };
        // 初始路由同样经过守卫
        router.navigate_to_route(AppRoute::from_path(&current_path()), false);
        router
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn go(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 替换当前历史记录（重定向）
    pub fn replace(&self, route: AppRoute) {
        self.navigate_to_route(route, false);
    }

    fn resolve(&self, target: AppRoute) -> AppRoute {
        let decision = self.session.with_value(|session| guard_session(&target, session));
        if let GuardDecision::Redirect(to) = &decision {
            log::info!("[Router] {} denied, redirecting to {}", target, to);
        }
        decision.resolve(target)
    }

    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let route = self.resolve(target_route);
        let path = route.to_path();

        if route != AppRoute::NotFound {
            if use_push {
                push_history_state(&path);
            } else {
                replace_history_state(&path);
            }
        }
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let route = router.resolve(target_route.clone());
            if route != target_route {
                replace_history_state(&route.to_path());
            }
            router.set_route.set(route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 登录 / 登出后对当前路由重新执行守卫
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();
            let resolved = router.resolve(route.clone());

            if resolved != route {
                log::info!(
                    "[Router] Auth state changed (authenticated: {}), redirecting to {}",
                    is_auth,
                    resolved
                );
                push_history_state(&resolved.to_path());
                router.set_route.set(resolved);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(
    session: StoredValue<SessionContext, LocalStorage>,
    is_authenticated: Signal<bool>,
) -> RouterService {
    let router = RouterService::new(session, is_authenticated);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话
    session: StoredValue<SessionContext, LocalStorage>,
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(session, is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接：拦截点击，交给路由服务导航
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    /// 额外的 class
    #[prop(optional, into)]
    class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = to.to_path();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.go(to.clone());
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
