//! SalesDesk 客户端核心
//!
//! 与平台无关的部分：HTTP 抽象、会话、响应规范化、资源服务、状态 Store、
//! 表单校验与路由守卫。浏览器相关的实现（fetch、LocalStorage、History）在
//! `salesdesk-frontend` 中，通过 `HttpClient` / `TokenStore` 两个 trait 注入。

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod normalize;
pub mod request;
pub mod resource;
pub mod route;
pub mod services;
pub mod session;
pub mod store;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ValidationError};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use route::{AppRoute, GuardDecision, guard, guard_session};
pub use session::{MemoryTokenStore, SessionContext, TokenStore};
pub use store::{AuthStore, ReportsStore, SalesStore, SellersStore, UsersStore};

pub use salesdesk_shared as shared;
