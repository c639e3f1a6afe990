use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::error::{ClientError, ClientResult};
pub use salesdesk_shared::protocol::HttpMethod;

#[cfg(test)]
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> ClientResult<Self> {
        self.body = Some(serde_json::to_string(body)?);
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_str(&self.body).map_err(ClientError::from)
    }
}

/// HTTP 客户端特性 (Trait)
///
/// 浏览器中的 fetch Future 不是 Send 的，因此使用 `?Send`。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
enum MockReply {
    Respond(u16, String),
    NetworkFailure,
}

#[cfg(test)]
pub struct MockHttpClient {
    // "METHOD url" -> 依次返回的响应，最后一个会被重复使用
    responses: RefCell<HashMap<String, VecDeque<MockReply>>>,
    // 被挂起的请求，直到 Notify 被触发才返回（一次性）
    gates: RefCell<HashMap<String, Rc<tokio::sync::Notify>>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            gates: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .entry(Self::key(method, url))
            .or_default()
            .push_back(MockReply::Respond(status, body.to_string()));
    }

    pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .entry(Self::key(method, url))
            .or_default()
            .push_back(MockReply::Respond(status, body.to_string()));
    }

    pub fn mock_network_failure(&self, method: HttpMethod, url: &str) {
        self.responses
            .borrow_mut()
            .entry(Self::key(method, url))
            .or_default()
            .push_back(MockReply::NetworkFailure);
    }

    /// 挂起下一次匹配的请求，返回用于放行的 Notify
    pub fn hold(&self, method: HttpMethod, url: &str) -> Rc<tokio::sync::Notify> {
        let notify = Rc::new(tokio::sync::Notify::new());
        self.gates
            .borrow_mut()
            .insert(Self::key(method, url), notify.clone());
        notify
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests_to(&self, method: HttpMethod, url: &str) -> Vec<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .cloned()
            .collect()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let key = Self::key(req.method, &req.url);
        self.requests.borrow_mut().push(req);

        let gate = self.gates.borrow_mut().remove(&key);
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut responses = self.responses.borrow_mut();
        let Some(queue) = responses.get_mut(&key) else {
            return Ok(HttpResponse {
                status: 404,
                body: r#"{"message":"Not Found"}"#.to_string(),
            });
        };

        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().map(|r| match r {
                MockReply::Respond(status, body) => MockReply::Respond(*status, body.clone()),
                MockReply::NetworkFailure => MockReply::NetworkFailure,
            })
        };

        match reply {
            Some(MockReply::Respond(status, body)) => Ok(HttpResponse { status, body }),
            Some(MockReply::NetworkFailure) => {
                Err(ClientError::Network("connection refused".to_string()))
            }
            None => Ok(HttpResponse {
                status: 404,
                body: r#"{"message":"Not Found"}"#.to_string(),
            }),
        }
    }
}
