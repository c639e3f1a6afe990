//! 表单视图模型
//!
//! 每个表单在发起任何网络请求之前完成校验，校验失败直接返回
//! `ValidationError`，文案即界面展示内容。

use crate::error::{ClientError, ClientResult, ValidationError};
use crate::store::AuthStore;
use salesdesk_shared::date::{WIRE_DATE_FORMAT, parse_wire_date, today_wire};
use salesdesk_shared::serde_helper::parse_decimal;
use salesdesk_shared::{
    Id, LoginRequest, RegisterRequest, Sale, SaleRequest, SaleUpdate, Seller, SellerRequest,
    SessionUser, User, UserRequest, UserUpdate,
};

/// 注册页在网络失败且后端没有给出 message 时展示的文案
pub const REGISTER_VIEW_FALLBACK: &str = "Erro ao registrar. Verifique os dados informados.";

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn require<S: AsRef<str>>(fields: &[S]) -> Result<(), ValidationError> {
    if fields.iter().any(|f| blank(f.as_ref())) {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

fn normalize_date(s: &str) -> Result<String, ValidationError> {
    parse_wire_date(s)
        .map(|d| d.format(WIRE_DATE_FORMAT).to_string())
        .ok_or(ValidationError::InvalidDate)
}

// =========================================================
// 认证
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        require(&[&self.email, &self.password])?;
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub async fn submit(&self, auth: &AuthStore) -> ClientResult<Option<SessionUser>> {
        match self.validate() {
            Ok(req) => auth.login(&req).await,
            Err(e) => {
                let err = ClientError::from(e);
                auth.set_error(&err, "");
                Err(err)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterForm {
    /// 先检查必填，再检查两次密码一致
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        require(&[&self.name, &self.email, &self.password])?;
        if self.password != self.password_confirmation {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub async fn submit(&self, auth: &AuthStore) -> ClientResult<Option<SessionUser>> {
        match self.validate() {
            Ok(req) => auth.register(&req).await,
            Err(e) => {
                let err = ClientError::from(e);
                auth.set_error(&err, "");
                Err(err)
            }
        }
    }

    /// 注册页展示的错误文案
    pub fn error_message(err: &ClientError) -> String {
        err.display_message(REGISTER_VIEW_FALLBACK)
    }
}

// =========================================================
// 销售员
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SellerForm {
    pub name: String,
    pub email: String,
}

impl SellerForm {
    pub fn from_seller(seller: &Seller) -> Self {
        Self {
            name: seller.name.clone(),
            email: seller.email.clone(),
        }
    }

    pub fn validate(&self) -> Result<SellerRequest, ValidationError> {
        require(&[&self.name, &self.email])?;
        Ok(SellerRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        })
    }
}

// =========================================================
// 销售
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SaleForm {
    pub seller_id: Option<Id>,
    /// 原始输入，允许逗号小数点
    pub amount: String,
    pub sale_date: String,
}

impl Default for SaleForm {
    fn default() -> Self {
        Self {
            seller_id: None,
            amount: String::new(),
            sale_date: today_wire(),
        }
    }
}

impl SaleForm {
    pub fn from_sale(sale: &Sale) -> Self {
        Self {
            seller_id: Some(sale.seller_id),
            amount: format!("{:.2}", sale.amount),
            sale_date: parse_wire_date(&sale.sale_date)
                .map(|d| d.format(WIRE_DATE_FORMAT).to_string())
                .unwrap_or_else(|| sale.sale_date.clone()),
        }
    }

    pub fn validate(&self) -> Result<SaleRequest, ValidationError> {
        let seller_id = self
            .seller_id
            .filter(|id| *id > 0)
            .ok_or(ValidationError::MissingSeller)?;
        let amount = parse_decimal(&self.amount)
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or(ValidationError::InvalidAmount)?;
        let sale_date = normalize_date(&self.sale_date)?;
        Ok(SaleRequest {
            seller_id,
            amount,
            sale_date,
        })
    }

    /// 编辑时提交全部字段
    pub fn to_update(&self) -> Result<SaleUpdate, ValidationError> {
        self.validate().map(SaleUpdate::from)
    }
}

/// 销售列表的过滤条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleFilters {
    pub seller_id: Option<Id>,
    pub start_date: String,
    pub end_date: String,
}

impl SaleFilters {
    /// 转为查询参数；未填写的条件不出现
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.seller_id {
            pairs.push(("seller_id".to_string(), id.to_string()));
        }
        if !blank(&self.start_date) {
            pairs.push(("start_date".to_string(), self.start_date.trim().to_string()));
        }
        if !blank(&self.end_date) {
            pairs.push(("end_date".to_string(), self.end_date.trim().to_string()));
        }
        pairs
    }
}

// =========================================================
// 用户
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
        }
    }

    pub fn validate_create(&self) -> Result<UserRequest, ValidationError> {
        require(&[&self.name, &self.email, &self.password])?;
        Ok(UserRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    /// 编辑时密码可留空，留空则不修改
    pub fn validate_update(&self) -> Result<UserUpdate, ValidationError> {
        require(&[&self.name, &self.email])?;
        Ok(UserUpdate {
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            password: (!blank(&self.password)).then(|| self.password.clone()),
        })
    }
}

// =========================================================
// 报表
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ReportForm {
    pub date: String,
    pub seller_id: Option<Id>,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            date: today_wire(),
            seller_id: None,
        }
    }
}

impl ReportForm {
    pub fn validate(&self) -> Result<String, ValidationError> {
        normalize_date(&self.date)
    }

    /// 重发单个销售员的报表：日期之外还必须选中销售员
    pub fn validate_resend(&self) -> Result<(Id, String), ValidationError> {
        let date = self.validate()?;
        let seller_id = self
            .seller_id
            .filter(|id| *id > 0)
            .ok_or(ValidationError::MissingSeller)?;
        Ok((seller_id, date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::config::ClientConfig;
    use crate::request::MockHttpClient;
    use crate::session::{MemoryTokenStore, SessionContext};
    use std::rc::Rc;

    fn auth_store() -> (Rc<MockHttpClient>, AuthStore) {
        let mock = Rc::new(MockHttpClient::new());
        let session = SessionContext::init(Rc::new(MemoryTokenStore::new()), "token");
        let api = ApiClient::new(mock.clone(), ClientConfig::new("http://api.test"), session);
        (mock, AuthStore::new(api))
    }

    fn register_form(confirmation: &str) -> RegisterForm {
        RegisterForm {
            name: "Rui".into(),
            email: "rui@example.com".into(),
            password: "secret".into(),
            password_confirmation: confirmation.into(),
        }
    }

    #[tokio::test]
    async fn register_mismatch_never_reaches_network() {
        let (mock, auth) = auth_store();

        let err = register_form("other").submit(&auth).await.unwrap_err();

        assert_eq!(err, ClientError::Validation(ValidationError::PasswordMismatch));
        assert_eq!(auth.error().as_deref(), Some("As senhas não coincidem"));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn login_with_blank_field_never_reaches_network() {
        let (mock, auth) = auth_store();
        let form = LoginForm {
            email: "ana@example.com".into(),
            password: "   ".into(),
        };

        assert!(form.submit(&auth).await.is_err());
        assert_eq!(auth.error().as_deref(), Some("Por favor, preencha todos os campos"));
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn register_checks_required_before_mismatch() {
        let form = RegisterForm {
            name: String::new(),
            ..register_form("other")
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
        assert!(register_form("secret").validate().is_ok());
    }

    #[test]
    fn register_view_message_prefers_backend() {
        let backend = ClientError::Http {
            status: 422,
            message: Some("O e-mail já está em uso".into()),
        };
        assert_eq!(RegisterForm::error_message(&backend), "O e-mail já está em uso");
        assert_eq!(
            RegisterForm::error_message(&ClientError::Network("down".into())),
            REGISTER_VIEW_FALLBACK
        );
    }

    #[test]
    fn sale_form_validation() {
        let mut form = SaleForm {
            seller_id: None,
            amount: "150,50".into(),
            sale_date: "2024-05-01".into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingSeller));

        form.seller_id = Some(3);
        let req = form.validate().unwrap();
        assert_eq!(req.seller_id, 3);
        assert_eq!(req.amount, 150.5);
        assert_eq!(req.sale_date, "2024-05-01");

        form.amount = "0".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidAmount));
        form.amount = "abc".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidAmount));

        form.amount = "10".into();
        form.sale_date = "01/05/2024".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn sale_form_defaults_to_today() {
        assert_eq!(SaleForm::default().sale_date, today_wire());
        assert_eq!(ReportForm::default().validate(), Ok(today_wire()));
    }

    #[test]
    fn sale_form_from_existing_sale_trims_timestamp() {
        let sale = Sale {
            id: 1,
            seller_id: 2,
            seller: None,
            amount: 99.9,
            commission: 8.49,
            sale_date: "2024-05-01T00:00:00.000000Z".into(),
            created_at: None,
            updated_at: None,
        };
        let form = SaleForm::from_sale(&sale);
        assert_eq!(form.amount, "99.90");
        assert_eq!(form.sale_date, "2024-05-01");
        assert_eq!(form.to_update().unwrap().seller_id, Some(2));
    }

    #[test]
    fn user_password_optional_only_on_edit() {
        let form = UserForm {
            name: "Op".into(),
            email: "op@example.com".into(),
            password: String::new(),
        };
        assert_eq!(form.validate_create(), Err(ValidationError::MissingFields));

        let update = form.validate_update().unwrap();
        assert_eq!(update.password, None);
        assert_eq!(update.name.as_deref(), Some("Op"));
    }

    #[test]
    fn seller_form_requires_name_and_email() {
        let form = SellerForm {
            name: "Ana".into(),
            email: " ".into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn sale_filters_skip_empty_values() {
        let filters = SaleFilters {
            seller_id: Some(4),
            start_date: String::new(),
            end_date: "2024-05-31".into(),
        };
        assert_eq!(
            filters.to_pairs(),
            vec![
                ("seller_id".to_string(), "4".to_string()),
                ("end_date".to_string(), "2024-05-31".to_string()),
            ]
        );
        assert!(SaleFilters::default().to_pairs().is_empty());
    }

    #[test]
    fn report_resend_requires_seller() {
        let mut form = ReportForm {
            date: "2024-05-01".into(),
            seller_id: None,
        };
        assert_eq!(form.validate_resend(), Err(ValidationError::MissingSeller));

        form.seller_id = Some(3);
        assert_eq!(form.validate_resend(), Ok((3, "2024-05-01".to_string())));

        form.date = "ontem".into();
        assert_eq!(form.validate_resend(), Err(ValidationError::InvalidDate));
    }
}
