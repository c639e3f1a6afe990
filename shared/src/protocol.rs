use crate::Id;
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// CRUD resources exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Sellers,
    Sales,
    Users,
}

impl ResourceKind {
    pub fn segment(&self) -> &'static str {
        match self {
            ResourceKind::Sellers => "sellers",
            ResourceKind::Sales => "sales",
            ResourceKind::Users => "users",
        }
    }
}

/// Every backend endpoint the client talks to.
///
/// Paths are relative to the configured API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    Logout,
    Refresh,
    CurrentUser,
    Collection(ResourceKind),
    Item(ResourceKind, Id),
    SellerSales(Id),
    SellerReport(Id),
    DailyReports,
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "/login".to_string(),
            Endpoint::Register => "/auth/register".to_string(),
            Endpoint::Logout => "/auth/logout".to_string(),
            Endpoint::Refresh => "/auth/refresh".to_string(),
            Endpoint::CurrentUser => "/auth/user".to_string(),
            Endpoint::Collection(kind) => format!("/{}", kind.segment()),
            Endpoint::Item(kind, id) => format!("/{}/{}", kind.segment(), id),
            Endpoint::SellerSales(id) => format!("/sellers/{}/sales", id),
            Endpoint::SellerReport(id) => format!("/sellers/{}/report", id),
            Endpoint::DailyReports => "/reports/daily".to_string(),
        }
    }

    /// Endpoints that are called without a bearer token.
    pub fn is_public(&self) -> bool {
        matches!(self, Endpoint::Login | Endpoint::Register)
    }
}
