//! HTTP 服务层
//!
//! 每个资源一个服务，负责请求构建与边界处的类型化解码。

mod auth;
mod reports;
mod resource;

pub use auth::AuthService;
pub use reports::ReportsService;
pub use resource::ResourceService;

use crate::resource::{Sales, Sellers, Users};

pub type SellersService = ResourceService<Sellers>;
pub type SalesService = ResourceService<Sales>;
pub type UsersService = ResourceService<Users>;
