//! 会话上下文
//!
//! Bearer Token 只存放在持久化存储的一个键下。`SessionContext` 被显式传入
//! API 客户端与路由守卫，二者每次使用时都从存储中读取，存储是唯一事实来源。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 持久化键值存储（浏览器 LocalStorage、内存实现等）
pub trait TokenStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// 内存存储，用于测试与非浏览器环境
#[derive(Default)]
pub struct MemoryTokenStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.save(key, value);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

struct SessionInner {
    storage: Rc<dyn TokenStore>,
    key: String,
}

/// 进程级共享的会话句柄，克隆开销很小
#[derive(Clone)]
pub struct SessionContext {
    inner: Rc<SessionInner>,
}

impl SessionContext {
    /// 建立会话上下文；存储中已有 Token 时记录一条日志
    pub fn init(storage: Rc<dyn TokenStore>, key: impl Into<String>) -> Self {
        let ctx = Self {
            inner: Rc::new(SessionInner {
                storage,
                key: key.into(),
            }),
        };
        if ctx.has_token() {
            log::info!("[Session] restored persisted token");
        } else {
            log::debug!("[Session] no persisted token");
        }
        ctx
    }

    /// 当前 Token；空字符串视为不存在
    pub fn token(&self) -> Option<String> {
        self.inner
            .storage
            .load(&self.inner.key)
            .filter(|t| !t.trim().is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: &str) {
        if !self.inner.storage.save(&self.inner.key, token) {
            log::warn!("[Session] failed to persist token");
        }
    }

    pub fn clear(&self) {
        if !self.inner.storage.remove(&self.inner.key) {
            log::warn!("[Session] failed to remove persisted token");
        }
    }

    /// 结束会话：移除持久化的 Token
    pub fn teardown(&self) {
        self.clear();
        log::info!("[Session] torn down");
    }

    pub fn storage_key(&self) -> &str {
        &self.inner.key
    }
}
