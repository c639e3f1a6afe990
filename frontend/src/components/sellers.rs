use crate::components::layout::{ErrorAlert, PaginationBar, Shell, Spinner, SuccessAlert, confirm_action};
use crate::context::use_app;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use salesdesk::AppRoute;
use salesdesk::forms::SellerForm;
use salesdesk_shared::date::{display_date, format_brl, today_wire};
use salesdesk_shared::{Id, Page, Sale, Seller};

// =========================================================
// 列表
// =========================================================

#[component]
pub fn SellersListPage() -> impl IntoView {
    let sellers = use_app().sellers;
    let (notice, set_notice) = signal(Option::<String>::None);

    let load = move |page: u32| {
        let store = sellers.store();
        spawn_local(async move {
            let _ = store.fetch_list(page, &[]).await;
        });
    };

    Effect::new(move |_| load(1));

    let on_delete = move |id: Id| {
        if !confirm_action("Deseja excluir este vendedor?") {
            return;
        }
        let store = sellers.store();
        spawn_local(async move {
            if store.delete(id).await.is_ok() {
                set_notice.set(Some("Vendedor excluído".to_string()));
            }
        });
    };

    let on_report = move |id: Id| {
        let store = sellers.store();
        spawn_local(async move {
            if let Ok(report) = store.send_report(id, &today_wire()).await {
                set_notice.set(Some(report.message));
            }
        });
    };

    let pagination = Signal::derive(move || sellers.state.get().pagination);
    let loading = Signal::derive(move || sellers.state.get().loading);
    let error = Signal::derive(move || sellers.state.get().error);

    view! {
        <Shell title="Vendedores">
            <div class="flex justify-end">
                <Link to=AppRoute::SellerCreate class="btn btn-primary">"Novo vendedor"</Link>
            </div>
            <ErrorAlert message=error />
            <SuccessAlert message=notice.into() />

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Nome"</th>
                                    <th>"E-mail"</th>
                                    <th class="hidden md:table-cell">"Vendas"</th>
                                    <th class="hidden md:table-cell">"Total"</th>
                                    <th class="hidden md:table-cell">"Comissão"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || sellers.state.with(|s| s.items.is_empty() && !s.loading)>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            "Nenhum vendedor cadastrado."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || sellers.state.get().items
                                    key=|seller| seller.id
                                    children=move |seller: Seller| {
                                        let id = seller.id;
                                        view! {
                                            <tr>
                                                <td class="font-bold">{seller.name}</td>
                                                <td>{seller.email}</td>
                                                <td class="hidden md:table-cell">{seller.total_sales}</td>
                                                <td class="hidden md:table-cell">{format_brl(seller.total_amount)}</td>
                                                <td class="hidden md:table-cell">{format_brl(seller.total_commission)}</td>
                                                <td class="flex gap-1 justify-end">
                                                    <Link to=AppRoute::SalesBySeller(id) class="btn btn-ghost btn-xs">"Vendas"</Link>
                                                    <Link to=AppRoute::SellerEdit(id) class="btn btn-ghost btn-xs">"Editar"</Link>
                                                    <button class="btn btn-ghost btn-xs" on:click=move |_| on_report(id)>
                                                        "Relatório"
                                                    </button>
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
pub fn SellerFormPage(
    /// 编辑时的 id
    #[prop(optional)]
    id: Option<Id>,
) -> impl IntoView {
    let sellers = use_app().sellers;
    let router = use_router();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (form_error, set_form_error) = signal(Option::<String>::None);

    if let Some(id) = id {
        let store = sellers.store();
        spawn_local(async move {
            if let Ok(seller) = store.fetch_by_id(id).await {
                let form = SellerForm::from_seller(&seller);
                set_name.set(form.name);
                set_email.set(form.email);
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = SellerForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
        };
        let request = match form.validate() {
            Ok(r) => r,
            Err(e) => {
                set_form_error.set(Some(e.to_string()));
                return;
            }
        };
        set_form_error.set(None);

        let store = sellers.store();
        spawn_local(async move {
            let result = match id {
                Some(id) => store.update(id, &request).await,
                None => store.create(&request).await,
            };
            if result.is_ok() {
                router.go(AppRoute::SellersList);
            }
        });
    };

    let error = Signal::derive(move || form_error.get().or(sellers.state.get().error));
    let saving = move || sellers.state.get().loading;
    let title = if id.is_some() { "Editar vendedor" } else { "Novo vendedor" };

    view! {
        <Shell title=title>
            <div class="card bg-base-100 shadow-xl max-w-xl">
                <form class="card-body" on:submit=on_submit>
                    <ErrorAlert message=error />
                    <div class="form-control">
                        <label class="label" for="name"><span class="label-text">"Nome"</span></label>
                        <input
                            id="name"
                            type="text"
                            class="input input-bordered"
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                            prop:value=name
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="email"><span class="label-text">"E-mail"</span></label>
                        <input
                            id="email"
                            type="email"
                            class="input input-bordered"
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            prop:value=email
                        />
                    </div>
                    <div class="card-actions justify-end mt-4">
                        <Link to=AppRoute::SellersList class="btn btn-ghost">"Cancelar"</Link>
                        <button class="btn btn-primary" disabled=saving>"Salvar"</button>
                    </div>
                </form>
            </div>
        </Shell>
    }
}

// =========================================================
// 销售员的销售记录
// =========================================================

#[component]
pub fn SellerSalesPage(id: Id) -> impl IntoView {
    let sellers = use_app().sellers;
    let page = RwSignal::new(Page::<Sale>::empty());

    let load = move |p: u32| {
        let store = sellers.store();
        spawn_local(async move {
            if let Ok(data) = store.fetch_seller_sales(id, p).await {
                page.set(data);
            }
        });
    };

    Effect::new(move |_| {
        let store = sellers.store();
        spawn_local(async move {
            let _ = store.fetch_by_id(id).await;
        });
        load(1);
    });

    let seller_name = move || {
        sellers
            .state
            .get()
            .current
            .filter(|s| s.id == id)
            .map(|s| s.name)
            .unwrap_or_default()
    };
    let pagination = Signal::derive(move || page.get().pagination);
    let error = Signal::derive(move || sellers.state.get().error);

    view! {
        <Shell title="Vendas do vendedor">
            <p class="text-lg">{seller_name}</p>
            <ErrorAlert message=error />
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Valor"</th>
                                <th>"Comissão"</th>
                                <th>"Data"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || page.get().items
                                key=|sale| sale.id
                                children=move |sale: Sale| {
                                    view! {
                                        <tr>
                                            <td>{format_brl(sale.amount)}</td>
                                            <td>{format_brl(sale.commission)}</td>
                                            <td>{display_date(&sale.sale_date)}</td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <PaginationBar pagination=pagination on_page=Callback::new(load) />
                </div>
            </div>
            <Link to=AppRoute::SellersList class="btn btn-ghost">"Voltar"</Link>
        </Shell>
    }
}
