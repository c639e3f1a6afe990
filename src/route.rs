//! 路由定义与守卫
//!
//! 纯粹的导航规则，不依赖于 DOM 或 web_sys。
//! 前端的路由服务在每次导航（push / replace / 后退前进）时调用 `guard`。

use std::fmt::Display;

use crate::session::SessionContext;
use salesdesk_shared::Id;

/// 路由元信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMeta {
    /// 需要登录
    RequiresAuth,
    /// 仅限未登录用户（登录、注册）
    Guest,
    /// 无限制
    Public,
}

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Dashboard,
    Login,
    Register,
    SellersList,
    SellerCreate,
    SellerEdit(Id),
    SalesBySeller(Id),
    SalesList,
    SalesCreate,
    SalesEdit(Id),
    UsersList,
    AdminReports,
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由；查询串、片段和末尾斜杠被忽略
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Dashboard,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["sellers"] => Self::SellersList,
            ["sellers", "create"] => Self::SellerCreate,
            ["sellers", id, "edit"] => parse_id(id).map_or(Self::NotFound, Self::SellerEdit),
            ["sellers", id, "sales"] => parse_id(id).map_or(Self::NotFound, Self::SalesBySeller),
            ["sales"] => Self::SalesList,
            ["sales", "create"] => Self::SalesCreate,
            ["sales", id, "edit"] => parse_id(id).map_or(Self::NotFound, Self::SalesEdit),
            ["users"] => Self::UsersList,
            ["admin", "reports"] => Self::AdminReports,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Dashboard => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::SellersList => "/sellers".to_string(),
            Self::SellerCreate => "/sellers/create".to_string(),
            Self::SellerEdit(id) => format!("/sellers/{}/edit", id),
            Self::SalesBySeller(id) => format!("/sellers/{}/sales", id),
            Self::SalesList => "/sales".to_string(),
            Self::SalesCreate => "/sales/create".to_string(),
            Self::SalesEdit(id) => format!("/sales/{}/edit", id),
            Self::UsersList => "/users".to_string(),
            Self::AdminReports => "/admin/reports".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// 路由名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::SellersList => "SellersList",
            Self::SellerCreate => "SellerCreate",
            Self::SellerEdit(_) => "SellerEdit",
            Self::SalesBySeller(_) => "SalesBySeller",
            Self::SalesList => "SalesList",
            Self::SalesCreate => "SalesCreate",
            Self::SalesEdit(_) => "SalesEdit",
            Self::UsersList => "UsersList",
            Self::AdminReports => "AdminReports",
            Self::NotFound => "NotFound",
        }
    }

    pub fn meta(&self) -> RouteMeta {
        match self {
            Self::Login | Self::Register => RouteMeta::Guest,
            Self::NotFound => RouteMeta::Public,
            _ => RouteMeta::RequiresAuth,
        }
    }

    pub fn requires_auth(&self) -> bool {
        self.meta() == RouteMeta::RequiresAuth
    }

    pub fn is_guest_only(&self) -> bool {
        self.meta() == RouteMeta::Guest
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 已登录用户访问访客页面时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

fn parse_id(segment: &str) -> Option<Id> {
    segment.parse::<Id>().ok().filter(|id| *id > 0)
}

/// 守卫结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(AppRoute),
}

impl GuardDecision {
    /// 最终落地的路由
    pub fn resolve(self, target: AppRoute) -> AppRoute {
        match self {
            GuardDecision::Proceed => target,
            GuardDecision::Redirect(route) => route,
        }
    }
}

/// 导航守卫：只看 Token 是否存在
pub fn guard(target: &AppRoute, has_token: bool) -> GuardDecision {
    let decision = if target.requires_auth() && !has_token {
        GuardDecision::Redirect(AppRoute::auth_failure_redirect())
    } else if target.is_guest_only() && has_token {
        GuardDecision::Redirect(AppRoute::auth_success_redirect())
    } else {
        GuardDecision::Proceed
    };

    if let GuardDecision::Redirect(to) = &decision {
        log::debug!("[Router] {} -> redirect {}", target, to);
    }
    decision
}

/// 以当前会话评估守卫
pub fn guard_session(target: &AppRoute, session: &SessionContext) -> GuardDecision {
    guard(target, session.has_token())
}
