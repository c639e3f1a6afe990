use crate::components::layout::{ErrorAlert, PaginationBar, Shell, Spinner, confirm_action};
use crate::context::{SellersHandle, use_app};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use salesdesk::AppRoute;
use salesdesk::forms::{SaleFilters, SaleForm};
use salesdesk_shared::date::{display_date, format_brl};
use salesdesk_shared::{Id, Sale, SaleUpdate, Seller};

/// 销售员下拉框的选项（只取第一页）
fn load_seller_options(sellers: SellersHandle) {
    if sellers.state.get_untracked().items.is_empty() {
        let store = sellers.store();
        spawn_local(async move {
            let _ = store.fetch_list(1, &[]).await;
        });
    }
}

fn parse_id(value: &str) -> Option<Id> {
    value.parse::<Id>().ok().filter(|id| *id > 0)
}

#[component]
fn SellerSelect(
    sellers: SellersHandle,
    value: ReadSignal<Option<Id>>,
    set_value: WriteSignal<Option<Id>>,
    /// 空选项的文字
    placeholder: &'static str,
) -> impl IntoView {
    view! {
        <select
            class="select select-bordered"
            on:change=move |ev| set_value.set(parse_id(&event_target_value(&ev)))
            prop:value=move || value.get().map(|id| id.to_string()).unwrap_or_default()
        >
            <option value="">{placeholder}</option>
            <For
                each=move || sellers.state.get().items
                key=|seller| seller.id
                children=move |seller: Seller| {
                    view! { <option value=seller.id.to_string()>{seller.name}</option> }
                }
            />
        </select>
    }
}

// =========================================================
// 列表
// =========================================================

#[component]
pub fn SalesListPage() -> impl IntoView {
    let app = use_app();
    let (sales, sellers) = (app.sales, app.sellers);

    let (seller_id, set_seller_id) = signal(Option::<Id>::None);
    let (start_date, set_start_date) = signal(String::new());
    let (end_date, set_end_date) = signal(String::new());

    let filters = move || {
        SaleFilters {
            seller_id: seller_id.get_untracked(),
            start_date: start_date.get_untracked(),
            end_date: end_date.get_untracked(),
        }
        .to_pairs()
    };

    // 翻页沿用上一次查询的过滤条件
    let load = move |page: u32| {
        let store = sales.store();
        let current = sales.state.get_untracked().filters;
        spawn_local(async move {
            let _ = store.fetch_list(page, &current).await;
        });
    };

    Effect::new(move |_| {
        load_seller_options(sellers);
        let store = sales.store();
        spawn_local(async move {
            let _ = store.fetch_list(1, &[]).await;
        });
    });

    let on_filter = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let pairs = filters();
        let store = sales.store();
        spawn_local(async move {
            let _ = store.fetch_list(1, &pairs).await;
        });
    };

    let on_delete = move |id: Id| {
        if !confirm_action("Deseja excluir esta venda?") {
            return;
        }
        let store = sales.store();
        spawn_local(async move {
            let _ = store.delete(id).await;
        });
    };

    let pagination = Signal::derive(move || sales.state.get().pagination);
    let loading = Signal::derive(move || sales.state.get().loading);
    let error = Signal::derive(move || sales.state.get().error);

    view! {
        <Shell title="Vendas">
            <div class="flex justify-end">
                <Link to=AppRoute::SalesCreate class="btn btn-primary">"Nova venda"</Link>
            </div>

            <form class="flex flex-wrap gap-2 items-end" on:submit=on_filter>
                <SellerSelect sellers=sellers value=seller_id set_value=set_seller_id placeholder="Todos os vendedores" />
                <input
                    type="date"
                    class="input input-bordered"
                    on:input=move |ev| set_start_date.set(event_target_value(&ev))
                    prop:value=start_date
                />
                <input
                    type="date"
                    class="input input-bordered"
                    on:input=move |ev| set_end_date.set(event_target_value(&ev))
                    prop:value=end_date
                />
                <button class="btn btn-outline">"Filtrar"</button>
            </form>

            <ErrorAlert message=error />

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Vendedor"</th>
                                    <th>"Valor"</th>
                                    <th>"Comissão"</th>
                                    <th>"Data"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || sales.state.with(|s| s.items.is_empty() && !s.loading)>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            "Nenhuma venda encontrada."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || sales.state.get().items
                                    key=|sale| sale.id
                                    children=move |sale: Sale| {
                                        let id = sale.id;
                                        view! {
                                            <tr>
                                                <td>{sale.seller_name().unwrap_or("-").to_string()}</td>
                                                <td>{format_brl(sale.amount)}</td>
                                                <td>{format_brl(sale.commission)}</td>
                                                <td>{display_date(&sale.sale_date)}</td>
                                                <td class="flex gap-1 justify-end">
                                                    <Link to=AppRoute::SalesEdit(id) class="btn btn-ghost btn-xs">"Editar"</Link>
                                                    <button class="btn btn-ghost btn-xs text-error" on:click=move |_| on_delete(id)>
                                                        "Excluir"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                    <Spinner loading=loading />
                    <PaginationBar pagination=pagination on_page=Callback::new(load) />
                </div>
            </div>
        </Shell>
    }
}

// =========================================================
// 新建 / 编辑
// =========================================================

#[component]
pub fn SaleFormPage(
    /// 编辑时的 id
    #[prop(optional)]
    id: Option<Id>,
) -> impl IntoView {
    let app = use_app();
    let (sales, sellers) = (app.sales, app.sellers);
    let router = use_router();

    let initial = SaleForm::default();
    let (seller_id, set_seller_id) = signal(initial.seller_id);
    let (amount, set_amount) = signal(initial.amount);
    let (sale_date, set_sale_date) = signal(initial.sale_date);
    let (form_error, set_form_error) = signal(Option::<String>::None);

    load_seller_options(sellers);

    if let Some(id) = id {
        let store = sales.store();
        spawn_local(async move {
            if let Ok(sale) = store.fetch_by_id(id).await {
                let form = SaleForm::from_sale(&sale);
                set_seller_id.set(form.seller_id);
                set_amount.set(form.amount);
                set_sale_date.set(form.sale_date);
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = SaleForm {
            seller_id: seller_id.get_untracked(),
            amount: amount.get_untracked(),
            sale_date: sale_date.get_untracked(),
        };
        let request = match form.validate() {
            Ok(r) => r,
            Err(e) => {
                set_form_error.set(Some(e.to_string()));
                return;
            }
        };
        set_form_error.set(None);

        let store = sales.store();
        spawn_local(async move {
            let result = match id {
                Some(id) => store.update(id, &SaleUpdate::from(request)).await.map(|_| ()),
                None => store.create(&request).await.map(|_| ()),
            };
            if result.is_ok() {
                router.go(AppRoute::SalesList);
            }
        });
    };

    let error = Signal::derive(move || form_error.get().or(sales.state.get().error));
    let saving = move || sales.state.get().loading;
    let title = if id.is_some() { "Editar venda" } else { "Nova venda" };

    view! {
        <Shell title=title>
            <div class="card bg-base-100 shadow-xl max-w-xl">
                <form class="card-body" on:submit=on_submit>
                    <ErrorAlert message=error />
                    <div class="form-control">
                        <label class="label"><span class="label-text">"Vendedor"</span></label>
                        <SellerSelect sellers=sellers value=seller_id set_value=set_seller_id placeholder="Selecione" />
                    </div>
                    <div class="form-control">
                        <label class="label" for="amount"><span class="label-text">"Valor (R$)"</span></label>
                        <input
                            id="amount"
                            type="text"
                            inputmode="decimal"
                            placeholder="0,00"
                            class="input input-bordered"
                            on:input=move |ev| set_amount.set(event_target_value(&ev))
                            prop:value=amount
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="sale_date"><span class="label-text">"Data"</span></label>
                        <input
                            id="sale_date"
                            type="date"
                            class="input input-bordered"
                            on:input=move |ev| set_sale_date.set(event_target_value(&ev))
                            prop:value=sale_date
                        />
                    </div>
                    <div class="card-actions justify-end mt-4">
                        <Link to=AppRoute::SalesList class="btn btn-ghost">"Cancelar"</Link>
                        <button class="btn btn-primary" disabled=saving>"Salvar"</button>
                    </div>
                </form>
            </div>
        </Shell>
    }
}
