//! 针对真实后端的冒烟测试
//!
//! 运行方式：
//! SALESDESK_API_URL=http://localhost:8080/api/v1 \
//! SALESDESK_LIVE_EMAIL=admin@example.com SALESDESK_LIVE_PASSWORD=secret \
//! cargo test --test live_backend -- --ignored

use std::rc::Rc;

use salesdesk::shared::LoginRequest;
use salesdesk::shared::date::today_wire;
use salesdesk::{
    ApiClient, AppRoute, ClientConfig, ClientError, ClientResult, GuardDecision, HttpClient,
    HttpMethod, HttpRequest, HttpResponse, MemoryTokenStore, SessionContext, guard_session,
};
use salesdesk::store::{AuthStore, ReportsStore, SalesStore, SellersStore};

struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &req.url);
        for (k, v) in req.headers {
            builder = builder.header(k, v);
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| ClientError::Network(format!("Reqwest Error: {}", e)))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::Network(format!("Reqwest Body Error: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

fn live_api() -> ApiClient {
    let config = ClientConfig::from_env();
    let session = SessionContext::init(Rc::new(MemoryTokenStore::new()), config.token_key.clone());
    ApiClient::new(Rc::new(ReqwestHttpClient::new()), config, session)
}

fn live_credentials() -> LoginRequest {
    LoginRequest {
        email: std::env::var("SALESDESK_LIVE_EMAIL").unwrap_or_else(|_| "admin@example.com".into()),
        password: std::env::var("SALESDESK_LIVE_PASSWORD").unwrap_or_else(|_| "password".into()),
    }
}

#[tokio::test]
#[ignore]
async fn login_and_browse_live_backend() {
    let api = live_api();
    let auth = AuthStore::new(api.clone());

    let user = auth.login(&live_credentials()).await.expect("login failed");
    println!("Logged in as {:?}", user);
    assert!(auth.is_authenticated());
    assert_eq!(guard_session(&AppRoute::Dashboard, api.session()), GuardDecision::Proceed);

    let sellers = SellersStore::new(api.clone());
    let page = sellers.fetch_list(1, &[]).await.expect("sellers list failed");
    println!("Sellers page: {:?}", page.pagination);

    let sales = SalesStore::new(api.clone());
    let page = sales.fetch_list(1, &[]).await.expect("sales list failed");
    println!("Sales page: {:?}", page.pagination);

    if let Some(seller) = sellers.items().first() {
        let sales = sellers
            .fetch_seller_sales(seller.id, 1)
            .await
            .expect("seller sales failed");
        println!("Seller {} has {} sales on page 1", seller.id, sales.items.len());
    }

    auth.refresh_token().await.expect("refresh failed");
    assert!(auth.is_authenticated());

    auth.logout().await;
    assert!(!auth.is_authenticated());
    assert!(api.session().token().is_none());
}

#[tokio::test]
#[ignore]
async fn send_daily_reports_live_backend() {
    let api = live_api();
    let auth = AuthStore::new(api.clone());
    auth.login(&live_credentials()).await.expect("login failed");

    let reports = ReportsStore::new(api);
    match reports.send_daily_reports(&today_wire()).await {
        Ok(report) => println!("Report: {} ({:?})", report.message, report.data),
        Err(e) => println!("Report failed: {} [{}]", e, e.code()),
    }

    auth.logout().await;
}
