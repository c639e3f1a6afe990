//! 客户端状态容器
//!
//! 每个 Store 持有一份可克隆的状态快照（列表、当前项、分页、loading、error），
//! 状态保存在 `StateCell` 中，任何 await 点都不持有借用。
//! 视图通过 `subscribe` 获得每次变更后的快照。

mod auth;
mod reports;
mod resource;

pub use auth::{AuthState, AuthStore};
pub use reports::{ReportsState, ReportsStore};
pub use resource::{CrudStore, ResourceState, SELLER_MESSAGES};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::ClientResult;
use crate::resource::{Sales, Sellers, Users};

pub type SellersStore = CrudStore<Sellers>;
pub type SalesStore = CrudStore<Sales>;
pub type UsersStore = CrudStore<Users>;

/// 所有 Store 状态共有的 loading / error 字段
pub trait ActionState {
    fn set_loading(&mut self, loading: bool);
    fn set_error(&mut self, error: Option<String>);
}

type Listener<S> = Rc<dyn Fn(&S)>;

/// 可订阅的状态单元
pub struct StateCell<S> {
    state: RefCell<S>,
    listeners: RefCell<Vec<Listener<S>>>,
    in_flight: Cell<u32>,
}

impl<S: Clone> StateCell<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: RefCell::new(initial),
            listeners: RefCell::new(Vec::new()),
            in_flight: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> S {
        self.state.borrow().clone()
    }

    pub fn with<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.state.borrow())
    }

    /// 修改状态并通知订阅者
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        {
            let mut state = self.state.borrow_mut();
            f(&mut state);
        }
        self.notify();
    }

    pub fn subscribe(&self, listener: impl Fn(&S) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        // 克隆列表，允许回调中再次订阅
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl<S: Clone + ActionState> StateCell<S> {
    /// 动作开始：loading = true，清空上一次错误
    pub fn begin(&self) {
        self.in_flight.set(self.in_flight.get() + 1);
        self.update(|s| {
            s.set_loading(true);
            s.set_error(None);
        });
    }

    /// 不会失败的动作结束
    ///
    /// 只有最后一个进行中的动作结束时 loading 才回到 false。
    pub fn end(&self) {
        let loading = self.release();
        self.update(|s| s.set_loading(loading));
    }

    /// 动作结束：失败时写入展示文案并原样返回错误
    pub fn finish<T>(&self, result: ClientResult<T>, fallback: &str) -> ClientResult<T> {
        match result {
            Ok(value) => {
                self.end();
                Ok(value)
            }
            Err(err) => {
                let loading = self.release();
                let message = err.display_message(fallback);
                log::error!("[Store] {} ({})", message, err);
                self.update(|s| {
                    s.set_error(Some(message));
                    s.set_loading(loading);
                });
                Err(err)
            }
        }
    }

    /// 进行中计数减一，返回是否仍有动作在进行
    fn release(&self) -> bool {
        let remaining = self.in_flight.get().saturating_sub(1);
        self.in_flight.set(remaining);
        remaining > 0
    }
}

/// 请求代数：只有最新一次请求的响应会被写入状态
#[derive(Default)]
pub struct Generation(Cell<u64>);

impl Generation {
    pub fn next(&self) -> u64 {
        let n = self.0.get() + 1;
        self.0.set(n);
        n
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.get() == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[derive(Clone, Default)]
    struct Sample {
        loading: bool,
        error: Option<String>,
        value: u32,
    }

    impl ActionState for Sample {
        fn set_loading(&mut self, loading: bool) {
            self.loading = loading;
        }
        fn set_error(&mut self, error: Option<String>) {
            self.error = error;
        }
    }

    #[test]
    fn subscribers_see_every_update() {
        let cell = StateCell::new(Sample::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        cell.subscribe(move |s: &Sample| sink.borrow_mut().push(s.value));

        cell.update(|s| s.value = 1);
        cell.update(|s| s.value = 2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn loading_stays_on_until_last_action_finishes() {
        let cell = StateCell::new(Sample::default());
        cell.begin();
        cell.begin();
        assert!(cell.snapshot().loading);

        cell.end();
        assert!(cell.snapshot().loading);

        cell.end();
        assert!(!cell.snapshot().loading);
    }

    #[test]
    fn finish_records_fallback_and_returns_error() {
        let cell = StateCell::new(Sample::default());
        cell.begin();
        let result: ClientResult<()> = cell.finish(Err(ClientError::Network("down".into())), "Erro ao buscar vendas");
        assert!(result.is_err());
        let state = cell.snapshot();
        assert_eq!(state.error.as_deref(), Some("Erro ao buscar vendas"));
        assert!(!state.loading);

        cell.begin();
        assert_eq!(cell.snapshot().error, None);
    }

    #[test]
    fn generation_tracks_latest_ticket() {
        let generation = Generation::default();
        let first = generation.next();
        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
