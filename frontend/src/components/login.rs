use crate::components::layout::ErrorAlert;
use crate::context::use_app;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use salesdesk::AppRoute;
use salesdesk::forms::LoginForm;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_app().auth;
    auth.store().clear_error();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let is_submitting = Signal::derive(move || auth.state.get().loading);
    let error = Signal::derive(move || auth.state.get().error);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let store = auth.store();
        // 成功后路由服务感知到认证状态变化，自动离开登录页
        spawn_local(async move {
            let _ = form.submit(&store).await;
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"SalesDesk"</h1>
                    <p class="text-base-content/70">"Entre com suas credenciais"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorAlert message=error />

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"E-mail"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="voce@empresa.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Senha"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Entrando..." }.into_any()
                                } else {
                                    "Entrar".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Não tem conta? "
                            <Link to=AppRoute::Register class="link link-primary">"Registre-se"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
