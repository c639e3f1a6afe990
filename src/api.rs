use serde::Serialize;
use serde_json::Value;
use std::rc::Rc;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::session::SessionContext;
use salesdesk_shared::HEADER_AUTHORIZATION;
use salesdesk_shared::protocol::Endpoint;

/// 查询参数（保持插入顺序）
pub type Query = Vec<(String, String)>;

/// 后端 REST API 的薄封装
///
/// 负责：拼接 URL、附加 Bearer Token、把非 2xx 响应转换为 `ClientError`。
/// 响应体以 `serde_json::Value` 返回，由各服务在边界处做类型化解码。
#[derive(Clone)]
pub struct ApiClient {
    http: Rc<dyn HttpClient>,
    config: Rc<ClientConfig>,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(http: Rc<dyn HttpClient>, config: ClientConfig, session: SessionContext) -> Self {
        Self {
            http,
            config: Rc::new(config),
            session,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: HttpMethod, endpoint: Endpoint, query: &[(String, String)]) -> HttpRequest {
        let mut url = self.config.url(&endpoint.path());
        if !query.is_empty() {
            url.push('?');
            url.push_str(&encode_query(query));
        }

        let req = HttpRequest::new(&url, method).with_header("Accept", "application/json");

        if endpoint.is_public() {
            return req;
        }
        match self.session.token() {
            Some(token) => req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn execute(&self, req: HttpRequest) -> ClientResult<Value> {
        log::debug!("[Api] {} {}", req.method.as_str(), req.url);
        let res = self.http.send(req).await?;
        parse_response(res)
    }

    pub async fn get(&self, endpoint: Endpoint, query: &[(String, String)]) -> ClientResult<Value> {
        let req = self.request(HttpMethod::Get, endpoint, query);
        self.execute(req).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, endpoint: Endpoint, body: &B) -> ClientResult<Value> {
        let req = self.request(HttpMethod::Post, endpoint, &[]).with_json(body)?;
        self.execute(req).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, endpoint: Endpoint, body: &B) -> ClientResult<Value> {
        let req = self.request(HttpMethod::Put, endpoint, &[]).with_json(body)?;
        self.execute(req).await
    }

    pub async fn delete(&self, endpoint: Endpoint) -> ClientResult<Value> {
        let req = self.request(HttpMethod::Delete, endpoint, &[]);
        self.execute(req).await
    }
}

fn parse_response(res: HttpResponse) -> ClientResult<Value> {
    if !res.is_success() {
        let err = ClientError::from_response(res.status, &res.body);
        log::warn!("[Api] request failed: {}", err);
        return Err(err);
    }
    // 204 / 空响应体
    if res.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    res.json::<Value>()
}

/// 分页查询参数：`page` 在前，其余过滤条件按给定顺序追加，空值被忽略
pub fn page_query(page: u32, filters: &[(String, String)]) -> Query {
    let mut query = vec![("page".to_string(), page.max(1).to_string())];
    query.extend(
        filters
            .iter()
            .filter(|(k, v)| !k.is_empty() && !v.is_empty() && k != "page")
            .cloned(),
    );
    query
}

fn encode_query(query: &[(String, String)]) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// application/x-www-form-urlencoded 风格的组件编码，仅保留 RFC 3986 非保留字符
fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
