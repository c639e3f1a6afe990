use crate::components::layout::{ErrorAlert, Shell, Spinner};
use crate::context::use_app;
use leptos::prelude::*;
use leptos::task::spawn_local;
use salesdesk::forms::ReportForm;
use salesdesk_shared::date::{display_date, format_brl};
use salesdesk_shared::{Id, Seller};

#[component]
pub fn AdminReportsPage() -> impl IntoView {
    let app = use_app();
    let (reports, sellers) = (app.reports, app.sellers);

    let initial = ReportForm::default();
    let (date, set_date) = signal(initial.date);
    let (seller_id, set_seller_id) = signal(initial.seller_id);
    let (form_error, set_form_error) = signal(Option::<String>::None);

    Effect::new(move |_| {
        let store = sellers.store();
        spawn_local(async move {
            let _ = store.fetch_list(1, &[]).await;
        });
    });

    let form = move || ReportForm {
        date: date.get_untracked(),
        seller_id: seller_id.get_untracked(),
    };

    let on_daily = move |_| {
        let date = match form().validate() {
            Ok(date) => date,
            Err(e) => {
                set_form_error.set(Some(e.to_string()));
                return;
            }
        };
        set_form_error.set(None);
        let store = reports.store();
        spawn_local(async move {
            let _ = store.send_daily_reports(&date).await;
        });
    };

    let on_resend = move |_| {
        let (seller, date) = match form().validate_resend() {
            Ok(valid) => valid,
            Err(e) => {
                set_form_error.set(Some(e.to_string()));
                return;
            }
        };
        set_form_error.set(None);
        let store = reports.store();
        spawn_local(async move {
            let _ = store.resend_report(seller, &date).await;
        });
    };

    let loading = Signal::derive(move || reports.state.get().loading);
    let error = Signal::derive(move || form_error.get().or(reports.state.get().error));
    let last = move || reports.state.get().last_report;

    view! {
        <Shell title="Relatórios">
            <ErrorAlert message=error />
            <div class="card bg-base-100 shadow-xl max-w-xl">
                <div class="card-body space-y-2">
                    <label class="label" for="report_date"><span class="label-text">"Data"</span></label>
                    <input
                        id="report_date"
                        type="date"
                        class="input input-bordered"
                        on:input=move |ev| set_date.set(event_target_value(&ev))
                        prop:value=date
                    />
                    <button class="btn btn-primary" disabled=move || loading.get() on:click=on_daily>
                        "Enviar relatórios diários"
                    </button>

                    <div class="divider">"ou"</div>

                    <select
                        class="select select-bordered"
                        on:change=move |ev| {
                            set_seller_id.set(event_target_value(&ev).parse::<Id>().ok())
                        }
                    >
                        <option value="">"Selecione um vendedor"</option>
                        <For
                            each=move || sellers.state.get().items
                            key=|seller| seller.id
                            children=move |seller: Seller| {
                                view! { <option value=seller.id.to_string()>{seller.name}</option> }
                            }
                        />
                    </select>
                    <button class="btn btn-outline" disabled=move || loading.get() on:click=on_resend>
                        "Reenviar relatório"
                    </button>
                </div>
            </div>

            <Spinner loading=loading />

            <Show when=move || last().is_some()>
                {move || {
                    last()
                        .map(|report| {
                            let data = report.data;
                            let subject = match (&data.seller_name, data.total_sellers) {
                                (Some(name), _) => name.clone(),
                                (None, Some(n)) => format!("{} vendedores", n),
                                (None, None) => String::new(),
                            };
                            view! {
                                <div class="card bg-base-100 shadow-xl max-w-xl">
                                    <div class="card-body">
                                        <h3 class="card-title">{report.message}</h3>
                                        <p>{subject}</p>
                                        <p>{format!("Data: {}", display_date(&data.date))}</p>
                                        <p>{format!("Vendas: {}", data.total_sales)}</p>
                                        <p>{format!("Total: {}", format_brl(data.total_amount))}</p>
                                        <p>{format!("Comissão: {}", format_brl(data.total_commission))}</p>
                                    </div>
                                </div>
                            }
                        })
                }}
            </Show>
        </Shell>
    }
}
