use serde_json::Value;
use std::marker::PhantomData;

use crate::api::{ApiClient, page_query};
use crate::error::ClientResult;
use crate::normalize::{decode_item, decode_page};
use crate::resource::{Resource, Sellers};
use salesdesk_shared::protocol::Endpoint;
use salesdesk_shared::{Id, Page, ReportRequest, ReportResponse, Sale};

/// 通用 CRUD 服务
pub struct ResourceService<R: Resource> {
    api: ApiClient,
    _resource: PhantomData<R>,
}

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self::new(self.api.clone())
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self, page: u32, filters: &[(String, String)]) -> ClientResult<Page<R::Item>> {
        let query = page_query(page, filters);
        let raw = self.api.get(Endpoint::Collection(R::KIND), &query).await?;
        decode_page(&raw)
    }

    pub async fn get(&self, id: Id) -> ClientResult<R::Item> {
        let raw = self.api.get(Endpoint::Item(R::KIND, id), &[]).await?;
        decode_item(&raw)
    }

    pub async fn create(&self, data: &R::Create) -> ClientResult<Option<R::Item>> {
        let raw = self.api.post(Endpoint::Collection(R::KIND), data).await?;
        Ok(decode_written::<R>(&raw))
    }

    pub async fn update(&self, id: Id, data: &R::Update) -> ClientResult<Option<R::Item>> {
        let raw = self.api.put(Endpoint::Item(R::KIND, id), data).await?;
        Ok(decode_written::<R>(&raw))
    }

    pub async fn delete(&self, id: Id) -> ClientResult<()> {
        self.api.delete(Endpoint::Item(R::KIND, id)).await?;
        Ok(())
    }
}

impl ResourceService<Sellers> {
    /// 某个销售员的销售记录
    pub async fn sales(&self, seller_id: Id, page: u32) -> ClientResult<Page<Sale>> {
        let query = page_query(page, &[]);
        let raw = self.api.get(Endpoint::SellerSales(seller_id), &query).await?;
        decode_page(&raw)
    }

    /// 为销售员（重新）发送某天的佣金报表
    pub async fn send_report(&self, seller_id: Id, date: &str) -> ClientResult<ReportResponse> {
        let body = ReportRequest {
            date: date.to_string(),
        };
        let raw = self.api.post(Endpoint::SellerReport(seller_id), &body).await?;
        decode_item(&wrap_report(raw))
    }
}

/// 写操作的响应：记录能解码时返回它，只有状态信息、空体或形状不符时返回 None
///
/// 走到这里时写入已经成功，响应体解码失败不能再变成错误。
fn decode_written<R: Resource>(raw: &Value) -> Option<R::Item> {
    let carries_record = raw.get("data").is_some_and(Value::is_object) || raw.get("id").is_some();
    if !carries_record {
        return None;
    }
    match decode_item(raw) {
        Ok(item) => Some(item),
        Err(e) => {
            log::warn!("[Service] {} write succeeded but body was not a record: {}", R::KIND.segment(), e);
            None
        }
    }
}

/// 报表响应本身就带 `data` 字段，避免被 decode_item 拆包
pub(crate) fn wrap_report(raw: Value) -> Value {
    serde_json::json!({ "data": raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::request::{HttpMethod, MockHttpClient};
    use crate::resource::Sales;
    use crate::session::{MemoryTokenStore, SessionContext};
    use salesdesk_shared::{SaleUpdate, SellerRequest};
    use serde_json::json;
    use std::rc::Rc;

    const BASE: &str = "http://api.test";

    fn api(mock: &Rc<MockHttpClient>) -> ApiClient {
        let session = SessionContext::init(Rc::new(MemoryTokenStore::with_entry("token", "t")), "token");
        ApiClient::new(mock.clone(), ClientConfig::new(BASE), session)
    }

    #[tokio::test]
    async fn create_returns_record_when_present() {
        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(
            HttpMethod::Post,
            "http://api.test/sellers",
            201,
            json!({ "status": "success", "data": { "id": 5, "name": "Rui", "email": "rui@example.com" } }),
        );
        let service = ResourceService::<Sellers>::new(api(&mock));

        let created = service
            .create(&SellerRequest {
                name: "Rui".into(),
                email: "rui@example.com".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.map(|s| s.id), Some(5));
    }

    #[tokio::test]
    async fn update_without_record_is_none() {
        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(
            HttpMethod::Put,
            "http://api.test/sales/2",
            200,
            json!({ "status": "success", "message": "Venda atualizada" }),
        );
        let service = ResourceService::<Sales>::new(api(&mock));

        let updated = service
            .update(
                2,
                &SaleUpdate {
                    amount: Some(10.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_none());
        assert_eq!(
            mock.last_request().unwrap().body.as_deref(),
            Some(r#"{"amount":10.0}"#)
        );
    }

    #[tokio::test]
    async fn create_with_mismatched_record_is_none() {
        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(
            HttpMethod::Post,
            "http://api.test/sellers",
            201,
            json!({ "data": { "seller": { "id": 5, "name": "Rui" } } }),
        );
        let service = ResourceService::<Sellers>::new(api(&mock));

        let created = service
            .create(&SellerRequest {
                name: "Rui".into(),
                email: "rui@example.com".into(),
            })
            .await
            .unwrap();
        assert!(created.is_none());
    }

    #[tokio::test]
    async fn send_report_decodes_full_envelope() {
        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(
            HttpMethod::Post,
            "http://api.test/sellers/3/report",
            200,
            json!({
                "status": "success",
                "message": "Relatório enviado",
                "data": {
                    "total_sales": 2, "total_amount": "200.00", "total_commission": "17.00",
                    "date": "2024-05-01", "seller_id": 3, "seller_name": "Ana", "seller_email": "ana@example.com"
                }
            }),
        );
        let service = ResourceService::<Sellers>::new(api(&mock));

        let report = service.send_report(3, "2024-05-01").await.unwrap();
        assert_eq!(report.message, "Relatório enviado");
        assert_eq!(report.data.seller_name.as_deref(), Some("Ana"));
        assert!(report.is_seller_report());
        assert_eq!(
            mock.last_request().unwrap().body.as_deref(),
            Some(r#"{"date":"2024-05-01"}"#)
        );
    }

    #[tokio::test]
    async fn seller_sales_uses_nested_path_and_page() {
        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(
            HttpMethod::Get,
            "http://api.test/sellers/3/sales?page=2",
            200,
            json!({ "data": { "data": [], "current_page": 2, "last_page": 2, "total": 16 } }),
        );
        let service = ResourceService::<Sellers>::new(api(&mock));

        let page = service.sales(3, 2).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.pagination.total_items, 16);
    }
}
