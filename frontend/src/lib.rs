//! SalesDesk 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `salesdesk`（核心库）：Store、服务、路由守卫、表单校验
//! - `context`: 把核心 Store 包装为可放入 Context 的句柄与快照信号
//! - `web`: 浏览器 API（fetch、LocalStorage、History）
//! - `components`: UI 组件层

mod components {
    pub mod dashboard;
    pub mod layout;
    pub mod login;
    pub mod register;
    pub mod reports;
    pub mod sales;
    pub mod sellers;
    pub mod users;
}
mod context;
mod web;

use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::reports::AdminReportsPage;
use crate::components::sales::{SaleFormPage, SalesListPage};
use crate::components::sellers::{SellerFormPage, SellerSalesPage, SellersListPage};
use crate::components::users::UsersPage;
use crate::context::{AppContext, build_config};

use leptos::prelude::*;
use salesdesk::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::SellersList => view! { <SellersListPage /> }.into_any(),
        AppRoute::SellerCreate => view! { <SellerFormPage /> }.into_any(),
        AppRoute::SellerEdit(id) => view! { <SellerFormPage id=id /> }.into_any(),
        AppRoute::SalesBySeller(id) => view! { <SellerSalesPage id=id /> }.into_any(),
        AppRoute::SalesList => view! { <SalesListPage /> }.into_any(),
        AppRoute::SalesCreate => view! { <SaleFormPage /> }.into_any(),
        AppRoute::SalesEdit(id) => view! { <SaleFormPage id=id /> }.into_any(),
        AppRoute::UsersList => view! { <UsersPage /> }.into_any(),
        AppRoute::AdminReports => view! { <AdminReportsPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página não encontrada"</p>
                    <Link to=AppRoute::Dashboard class="btn btn-primary mt-6">"Voltar ao painel"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建全部 Store 并放入 Context
    let app = AppContext::new(build_config());
    provide_context(app);

    // 2. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = app.is_authenticated_signal();

    view! {
        // 3. 路由器组件：守卫读取会话存储
        <Router session=app.session is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
