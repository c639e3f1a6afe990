use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::normalize::decode_item;
use crate::services::resource::wrap_report;
use salesdesk_shared::protocol::Endpoint;
use salesdesk_shared::{Id, ReportRequest, ReportResponse};

/// 佣金日报接口
#[derive(Clone)]
pub struct ReportsService {
    api: ApiClient,
}

impl ReportsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// 触发全部销售员的日报
    pub async fn send_daily_reports(&self, date: &str) -> ClientResult<ReportResponse> {
        let body = ReportRequest {
            date: date.to_string(),
        };
        let raw = self.api.post(Endpoint::DailyReports, &body).await?;
        decode_item(&wrap_report(raw))
    }

    /// 重新发送单个销售员的日报
    pub async fn resend_report(&self, seller_id: Id, date: &str) -> ClientResult<ReportResponse> {
        let body = ReportRequest {
            date: date.to_string(),
        };
        let raw = self.api.post(Endpoint::SellerReport(seller_id), &body).await?;
        decode_item(&wrap_report(raw))
    }
}
