use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::services::ReportsService;
use crate::store::{ActionState, StateCell};
use salesdesk_shared::{Id, ReportResponse};

const DAILY_FAILED: &str = "Erro ao enviar relatórios diários";
const RESEND_FAILED: &str = "Erro ao reenviar relatório";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportsState {
    pub last_report: Option<ReportResponse>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ActionState for ReportsState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// 报表 Store：触发发送，并保留最近一次的响应
pub struct ReportsStore {
    service: ReportsService,
    state: StateCell<ReportsState>,
}

impl ReportsStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            service: ReportsService::new(api),
            state: StateCell::new(ReportsState::default()),
        }
    }

    pub fn state(&self) -> ReportsState {
        self.state.snapshot()
    }

    pub fn subscribe(&self, listener: impl Fn(&ReportsState) + 'static) {
        self.state.subscribe(listener);
    }

    pub fn last_report(&self) -> Option<ReportResponse> {
        self.state.with(|s| s.last_report.clone())
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub async fn send_daily_reports(&self, date: &str) -> ClientResult<ReportResponse> {
        self.state.begin();
        let result = self.service.send_daily_reports(date).await;
        self.store_report(&result);
        self.state.finish(result, DAILY_FAILED)
    }

    pub async fn resend_report(&self, seller_id: Id, date: &str) -> ClientResult<ReportResponse> {
        self.state.begin();
        let result = self.service.resend_report(seller_id, date).await;
        self.store_report(&result);
        self.state.finish(result, RESEND_FAILED)
    }

    fn store_report(&self, result: &ClientResult<ReportResponse>) {
        if let Ok(report) = result {
            log::info!("[Reports] {}", report.message);
            let report = report.clone();
            self.state.update(|s| s.last_report = Some(report));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::request::{HttpMethod, MockHttpClient};
    use crate::session::{MemoryTokenStore, SessionContext};
    use serde_json::json;
    use std::rc::Rc;

    fn setup() -> (Rc<MockHttpClient>, ReportsStore) {
        let mock = Rc::new(MockHttpClient::new());
        let session = SessionContext::init(Rc::new(MemoryTokenStore::with_entry("token", "jwt")), "token");
        let api = ApiClient::new(mock.clone(), ClientConfig::new("http://api.test"), session);
        (mock, ReportsStore::new(api))
    }

    #[tokio::test]
    async fn daily_reports_are_cached_as_last_report() {
        let (mock, store) = setup();
        mock.mock_response(
            HttpMethod::Post,
            "http://api.test/reports/daily",
            200,
            json!({
                "status": "success",
                "message": "Relatórios enviados",
                "data": { "total_sellers": 3, "total_sales": 12, "total_amount": "1500.50", "total_commission": 127.54, "date": "2024-05-01" }
            }),
        );

        let report = store.send_daily_reports("2024-05-01").await.unwrap();

        assert_eq!(report.data.total_sellers, Some(3));
        assert_eq!(report.data.total_sales, 12);
        assert!(!report.is_seller_report());
        assert_eq!(store.last_report(), Some(report));

        let sent = mock.last_request().unwrap();
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "date": "2024-05-01" }));
    }

    #[tokio::test]
    async fn failed_resend_keeps_previous_report() {
        let (mock, store) = setup();
        mock.mock_response(
            HttpMethod::Post,
            "http://api.test/sellers/2/report",
            200,
            json!({ "status": "success", "message": "ok", "data": { "seller_id": 2, "date": "2024-05-01" } }),
        );
        mock.mock_network_failure(HttpMethod::Post, "http://api.test/sellers/2/report");

        let first = store.resend_report(2, "2024-05-01").await.unwrap();
        assert!(first.is_seller_report());

        assert!(store.resend_report(2, "2024-05-02").await.is_err());
        assert_eq!(store.error().as_deref(), Some("Erro ao reenviar relatório"));
        assert_eq!(store.last_report(), Some(first));
    }

    #[tokio::test]
    async fn daily_failure_prefers_backend_message() {
        let (mock, store) = setup();
        mock.mock_response(HttpMethod::Post, "http://api.test/reports/daily", 422, json!({ "message": "Data inválida" }));

        assert!(store.send_daily_reports("ontem").await.is_err());
        assert_eq!(store.error().as_deref(), Some("Data inválida"));
        assert!(store.state().last_report.is_none());
    }
}
