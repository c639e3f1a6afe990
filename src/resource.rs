//! CRUD 资源描述
//!
//! 销售员、销售、用户三类资源共享同一套服务与 Store 实现，
//! 差异（路径、载荷类型、提示文案、更新后的本地处理）集中在 `Resource` 实现里。

use serde::Serialize;
use serde::de::DeserializeOwned;

use salesdesk_shared::protocol::ResourceKind;
use salesdesk_shared::{
    Id, Sale, SaleRequest, SaleUpdate, Seller, SellerRequest, User, UserRequest, UserUpdate,
};

/// 每个动作失败时的默认提示
#[derive(Debug, Clone, Copy)]
pub struct ActionMessages {
    pub list: &'static str,
    pub by_id: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

pub trait Resource: 'static {
    const KIND: ResourceKind;
    const MESSAGES: ActionMessages;

    type Item: DeserializeOwned + Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static;
    type Create: Serialize;
    type Update: Serialize;

    fn id(item: &Self::Item) -> Id;

    /// 更新成功后如何处理缓存的当前项（id 已匹配）
    ///
    /// 默认使用后端返回的记录替换；后端没有返回记录时保持不变。
    fn apply_update(current: &mut Self::Item, _update: &Self::Update, returned: Option<Self::Item>) {
        if let Some(item) = returned {
            *current = item;
        }
    }
}

pub struct Sellers;

impl Resource for Sellers {
    const KIND: ResourceKind = ResourceKind::Sellers;
    const MESSAGES: ActionMessages = ActionMessages {
        list: "Erro ao buscar vendedores",
        by_id: "Erro ao buscar vendedor",
        create: "Erro ao criar vendedor",
        update: "Erro ao atualizar vendedor",
        delete: "Erro ao excluir vendedor",
    };

    type Item = Seller;
    type Create = SellerRequest;
    type Update = SellerRequest;

    fn id(item: &Seller) -> Id {
        item.id
    }
}

pub struct Sales;

impl Resource for Sales {
    const KIND: ResourceKind = ResourceKind::Sales;
    const MESSAGES: ActionMessages = ActionMessages {
        list: "Erro ao buscar vendas",
        by_id: "Erro ao buscar venda",
        create: "Erro ao criar venda",
        update: "Erro ao atualizar venda",
        delete: "Erro ao excluir venda",
    };

    type Item = Sale;
    type Create = SaleRequest;
    type Update = SaleUpdate;

    fn id(item: &Sale) -> Id {
        item.id
    }

    // 销售：用提交的字段修补本地副本，权威数据来自随后的列表刷新
    fn apply_update(current: &mut Sale, update: &SaleUpdate, _returned: Option<Sale>) {
        current.apply_update(update);
    }
}

pub struct Users;

impl Resource for Users {
    const KIND: ResourceKind = ResourceKind::Users;
    const MESSAGES: ActionMessages = ActionMessages {
        list: "Erro ao buscar usuários",
        by_id: "Erro ao buscar usuário",
        create: "Erro ao criar usuário",
        update: "Erro ao atualizar usuário",
        delete: "Erro ao excluir usuário",
    };

    type Item = User;
    type Create = UserRequest;
    type Update = UserUpdate;

    fn id(item: &User) -> Id {
        item.id
    }
}
