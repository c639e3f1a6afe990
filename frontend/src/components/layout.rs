use crate::context::use_app;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use salesdesk::AppRoute;
use salesdesk_shared::Pagination;

/// 浏览器确认框；无法弹出时视为取消
pub fn confirm_action(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// 已登录页面的外框：导航栏 + 内容
#[component]
pub fn Shell(
    /// 页面标题
    #[prop(into)]
    title: String,
    children: Children,
) -> impl IntoView {
    let app = use_app();
    let auth = app.auth;
    let router = use_router();

    // 刷新页面后 Token 仍在但用户信息丢失，重新拉取
    Effect::new(move |_| {
        let state = auth.state.get_untracked();
        if state.is_authenticated && state.user.is_none() && !state.loading {
            let store = auth.store();
            spawn_local(async move {
                let _ = store.fetch_current_user().await;
            });
        }
    });

    let user_name = move || auth.state.get().user.map(|u| u.name).unwrap_or_default();

    let on_logout = move |_| {
        let store = auth.store();
        spawn_local(async move {
            store.logout().await;
            // 路由服务监听认证状态，这里只兜底
            router.replace(AppRoute::Login);
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <div class="navbar bg-base-100 shadow-xl px-4">
                <div class="flex-1 gap-2">
                    <Link to=AppRoute::Dashboard class="btn btn-ghost text-xl">"SalesDesk"</Link>
                    <ul class="menu menu-horizontal px-1 hidden md:flex">
                        <li><Link to=AppRoute::SellersList>"Vendedores"</Link></li>
                        <li><Link to=AppRoute::SalesList>"Vendas"</Link></li>
                        <li><Link to=AppRoute::UsersList>"Usuários"</Link></li>
                        <li><Link to=AppRoute::AdminReports>"Relatórios"</Link></li>
                    </ul>
                </div>
                <div class="flex-none gap-2">
                    <span class="text-sm text-base-content/70 hidden md:inline">{user_name}</span>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm">
                        "Sair"
                    </button>
                </div>
            </div>
            <main class="max-w-7xl mx-auto p-4 md:p-8 space-y-6">
                <h1 class="text-2xl font-bold">{title}</h1>
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn ErrorAlert(message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div role="alert" class="alert alert-error text-sm py-2">
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn SuccessAlert(message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div role="status" class="alert alert-success text-sm py-2">
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn Spinner(loading: Signal<bool>) -> impl IntoView {
    view! {
        <Show when=move || loading.get()>
            <div class="flex justify-center py-4">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        </Show>
    }
}

/// 分页条
#[component]
pub fn PaginationBar(pagination: Signal<Pagination>, on_page: Callback<u32>) -> impl IntoView {
    let prev = move |_| {
        let p = pagination.get_untracked();
        if p.has_previous() {
            on_page.run(p.current_page - 1);
        }
    };
    let next = move |_| {
        let p = pagination.get_untracked();
        if p.has_next() {
            on_page.run(p.current_page + 1);
        }
    };

    view! {
        <div class="flex items-center justify-between p-4">
            <span class="text-sm text-base-content/70">
                {move || {
                    let p = pagination.get();
                    format!("Página {} de {} ({} registros)", p.current_page, p.total_pages, p.total_items)
                }}
            </span>
            <div class="join">
                <button
                    class="join-item btn btn-sm"
                    disabled=move || !pagination.get().has_previous()
                    on:click=prev
                >
                    "Anterior"
                </button>
                <button
                    class="join-item btn btn-sm"
                    disabled=move || !pagination.get().has_next()
                    on:click=next
                >
                    "Próxima"
                </button>
            </div>
        </div>
    }
}
