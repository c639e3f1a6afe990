use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;
pub mod serde_helper;

use serde_helper::{lenient_amount, lenient_count};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 后端资源 id（Laravel 自增主键）
pub type Id = i64;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: Id,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_sales: u64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_commission: f64,
}

/// 销售记录中内嵌的销售员摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerSummary {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: Id,
    pub seller_id: Id,
    #[serde(default)]
    pub seller: Option<SellerSummary>,
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub commission: f64,
    pub sale_date: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Sale {
    /// 用部分更新的字段覆盖本地副本（佣金等由后端重新计算，不在此处推算）
    pub fn apply_update(&mut self, update: &SaleUpdate) {
        if let Some(seller_id) = update.seller_id {
            if seller_id != self.seller_id {
                self.seller = None;
            }
            self.seller_id = seller_id;
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(sale_date) = &update.sale_date {
            self.sale_date = sale_date.clone();
        }
    }

    pub fn seller_name(&self) -> Option<&str> {
        self.seller.as_ref().map(|s| s.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// 会话中的最小用户身份
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

// =========================================================
// 报表 (Reports)
// =========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportData {
    /// 仅全局日报包含
    #[serde(default)]
    pub total_sellers: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_sales: u64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_commission: f64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub seller_id: Option<Id>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub seller_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: ReportData,
}

impl ReportResponse {
    pub fn is_seller_report(&self) -> bool {
        self.data.seller_id.is_some()
    }
}

// =========================================================
// 分页 (Pagination)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
        }
    }
}

impl Pagination {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// =========================================================
// 请求体 (Request Payloads)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRequest {
    pub seller_id: Id,
    pub amount: f64,
    pub sale_date: String,
}

/// 部分更新：只序列化提供的字段
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SaleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<String>,
}

impl From<SaleRequest> for SaleUpdate {
    fn from(req: SaleRequest) -> Self {
        Self {
            seller_id: Some(req.seller_id),
            amount: Some(req.amount),
            sale_date: Some(req.sale_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seller_accepts_decimal_strings() {
        let seller: Seller = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Ana",
            "email": "ana@example.com",
            "total_sales": "4",
            "total_amount": "1500.50",
            "total_commission": 127.54
        }))
        .unwrap();

        assert_eq!(seller.total_sales, 4);
        assert_eq!(seller.total_amount, 1500.50);
        assert_eq!(seller.total_commission, 127.54);
        assert!(seller.created_at.is_none());
    }

    #[test]
    fn sale_update_only_serializes_present_fields() {
        let update = SaleUpdate {
            amount: Some(99.9),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "amount": 99.9 }));
    }

    #[test]
    fn apply_update_drops_stale_seller_summary() {
        let mut sale = Sale {
            id: 1,
            seller_id: 2,
            seller: Some(SellerSummary {
                id: 2,
                name: "Bia".into(),
                email: "bia@example.com".into(),
            }),
            amount: 10.0,
            commission: 0.85,
            sale_date: "2024-05-01".into(),
            created_at: None,
            updated_at: None,
        };

        sale.apply_update(&SaleUpdate {
            seller_id: Some(7),
            amount: Some(20.0),
            sale_date: None,
        });

        assert_eq!(sale.seller_id, 7);
        assert_eq!(sale.amount, 20.0);
        assert_eq!(sale.sale_date, "2024-05-01");
        assert!(sale.seller.is_none());
    }

    #[test]
    fn pagination_navigation_flags() {
        let p = Pagination {
            current_page: 2,
            total_pages: 3,
            total_items: 40,
        };
        assert!(p.has_previous());
        assert!(p.has_next());
        assert!(!Pagination::default().has_next());
    }
}
