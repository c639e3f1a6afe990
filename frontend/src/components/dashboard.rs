use crate::components::layout::{ErrorAlert, Shell};
use crate::context::use_app;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use salesdesk::AppRoute;
use salesdesk_shared::Sale;
use salesdesk_shared::date::{display_date, format_brl};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = use_app();
    let (auth, sellers, sales) = (app.auth, app.sellers, app.sales);

    // 初始加载
    Effect::new(move |_| {
        let sellers = sellers.store();
        let sales = sales.store();
        spawn_local(async move {
            let _ = sellers.fetch_list(1, &[]).await;
            let _ = sales.fetch_list(1, &[]).await;
        });
    });

    let greeting = move || {
        auth.state
            .get()
            .user
            .map(|u| format!("Olá, {}", u.name))
            .unwrap_or_else(|| "Olá".to_string())
    };
    let total_sellers = move || sellers.state.get().pagination.total_items;
    let total_sales = move || sales.state.get().pagination.total_items;
    let page_amount = move || sales.state.with(|s| s.items.iter().map(|x| x.amount).sum::<f64>());
    let page_commission =
        move || sales.state.with(|s| s.items.iter().map(|x| x.commission).sum::<f64>());
    let recent = move || sales.state.with(|s| s.items.iter().take(5).cloned().collect::<Vec<Sale>>());
    let error = Signal::derive(move || sellers.state.get().error.or(sales.state.get().error));

    view! {
        <Shell title="Painel">
            <p class="text-base-content/70">{greeting}</p>
            <ErrorAlert message=error />

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-title">"Vendedores"</div>
                    <div class="stat-value text-primary">{total_sellers}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Vendas"</div>
                    <div class="stat-value text-secondary">{total_sales}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Valor (página atual)"</div>
                    <div class="stat-value text-2xl">{move || format_brl(page_amount())}</div>
                    <div class="stat-desc">{move || format!("Comissão: {}", format_brl(page_commission()))}</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h3 class="card-title">"Vendas recentes"</h3>
                        <Link to=AppRoute::SalesCreate class="btn btn-primary btn-sm">"Nova venda"</Link>
                    </div>
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Vendedor"</th>
                                    <th>"Valor"</th>
                                    <th>"Comissão"</th>
                                    <th>"Data"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=recent
                                    key=|sale| sale.id
                                    children=move |sale: Sale| {
                                        view! {
                                            <tr>
                                                <td>{sale.seller_name().unwrap_or("-").to_string()}</td>
                                                <td>{format_brl(sale.amount)}</td>
                                                <td>{format_brl(sale.commission)}</td>
                                                <td>{display_date(&sale.sale_date)}</td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </Shell>
    }
}
