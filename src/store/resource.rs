use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::resource::{Resource, Sellers};
use crate::services::ResourceService;
use crate::store::{ActionState, Generation, StateCell};
use salesdesk_shared::{Id, Page, Pagination, ReportResponse, Sale};

/// 销售员 Store 额外动作的默认提示
pub struct SellerExtraMessages {
    pub send_report: &'static str,
    pub seller_sales: &'static str,
}

pub const SELLER_MESSAGES: SellerExtraMessages = SellerExtraMessages {
    send_report: "Erro ao enviar relatório",
    seller_sales: "Erro ao buscar vendas do vendedor",
};

/// 资源 Store 的状态快照
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub current: Option<T>,
    pub pagination: Pagination,
    /// 最近一次列表请求使用的过滤条件，刷新时沿用
    pub filters: Vec<(String, String)>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            pagination: Pagination::default(),
            filters: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T> ActionState for ResourceState<T> {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// 通用 CRUD Store
///
/// 写操作完成后总是重新拉取写之前所在的页（以及过滤条件），不做乐观更新。
pub struct CrudStore<R: Resource> {
    service: ResourceService<R>,
    state: StateCell<ResourceState<R::Item>>,
    list_generation: Generation,
}

impl<R: Resource> CrudStore<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            service: ResourceService::new(api),
            state: StateCell::new(ResourceState::default()),
            list_generation: Generation::default(),
        }
    }

    // --- 读取 ---

    pub fn state(&self) -> ResourceState<R::Item> {
        self.state.snapshot()
    }

    pub fn subscribe(&self, listener: impl Fn(&ResourceState<R::Item>) + 'static) {
        self.state.subscribe(listener);
    }

    pub fn items(&self) -> Vec<R::Item> {
        self.state.with(|s| s.items.clone())
    }

    pub fn current(&self) -> Option<R::Item> {
        self.state.with(|s| s.current.clone())
    }

    pub fn pagination(&self) -> Pagination {
        self.state.with(|s| s.pagination)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub fn clear_error(&self) {
        self.state.update(|s| s.error = None);
    }

    pub fn clear_current(&self) {
        self.state.update(|s| s.current = None);
    }

    // --- 动作 ---

    /// 拉取列表并替换缓存
    ///
    /// 并发调用时只有最后发起的请求会写入状态，较早的响应被丢弃。
    pub async fn fetch_list(&self, page: u32, filters: &[(String, String)]) -> ClientResult<Page<R::Item>> {
        let ticket = self.list_generation.next();
        self.state.begin();

        let result = self.service.list(page, filters).await;
        let is_latest = self.list_generation.is_current(ticket);

        match result {
            Ok(data) => {
                if is_latest {
                    self.state.update(|s| {
                        s.items = data.items.clone();
                        s.pagination = data.pagination;
                        s.filters = filters.to_vec();
                    });
                } else {
                    log::warn!(
                        "[Store] discarding stale {} list response (page {})",
                        R::KIND.segment(),
                        page
                    );
                }
                self.state.finish(Ok(data), R::MESSAGES.list)
            }
            Err(err) if !is_latest => {
                log::warn!("[Store] stale {} list request failed: {}", R::KIND.segment(), err);
                self.state.end();
                Err(err)
            }
            Err(err) => self.state.finish(Err(err), R::MESSAGES.list),
        }
    }

    pub async fn fetch_by_id(&self, id: Id) -> ClientResult<R::Item> {
        self.state.begin();
        let result = self.service.get(id).await;
        if let Ok(item) = &result {
            let item = item.clone();
            self.state.update(|s| s.current = Some(item));
        }
        self.state.finish(result, R::MESSAGES.by_id)
    }

    pub async fn create(&self, data: &R::Create) -> ClientResult<Option<R::Item>> {
        self.state.begin();
        let result: ClientResult<_> = async {
            let created = self.service.create(data).await?;
            self.refresh().await?;
            Ok(created)
        }
        .await;
        self.state.finish(result, R::MESSAGES.create)
    }

    pub async fn update(&self, id: Id, data: &R::Update) -> ClientResult<Option<R::Item>> {
        self.state.begin();
        let result: ClientResult<_> = async {
            let returned = self.service.update(id, data).await?;
            self.state.update(|s| {
                if let Some(current) = s.current.as_mut().filter(|c| R::id(c) == id) {
                    R::apply_update(current, data, returned.clone());
                }
            });
            self.refresh().await?;
            Ok(returned)
        }
        .await;
        self.state.finish(result, R::MESSAGES.update)
    }

    pub async fn delete(&self, id: Id) -> ClientResult<()> {
        self.state.begin();
        let result: ClientResult<_> = async {
            self.service.delete(id).await?;
            self.state.update(|s| {
                if s.current.as_ref().is_some_and(|c| R::id(c) == id) {
                    s.current = None;
                }
            });
            self.refresh().await
        }
        .await;
        self.state.finish(result, R::MESSAGES.delete)
    }

    /// 重新拉取当前页
    async fn refresh(&self) -> ClientResult<()> {
        let (page, filters) = self
            .state
            .with(|s| (s.pagination.current_page, s.filters.clone()));
        self.fetch_list(page, &filters).await.map(|_| ())
    }
}

impl CrudStore<Sellers> {
    pub async fn send_report(&self, seller_id: Id, date: &str) -> ClientResult<ReportResponse> {
        self.state.begin();
        let result = self.service.send_report(seller_id, date).await;
        self.state.finish(result, SELLER_MESSAGES.send_report)
    }

    /// 销售员的销售记录；结果直接返回给调用方，不写入缓存
    pub async fn fetch_seller_sales(&self, seller_id: Id, page: u32) -> ClientResult<Page<Sale>> {
        self.state.begin();
        let result = self.service.sales(seller_id, page).await;
        self.state.finish(result, SELLER_MESSAGES.seller_sales)
    }
}
