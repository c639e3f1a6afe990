use crate::components::layout::ErrorAlert;
use crate::context::use_app;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use salesdesk::AppRoute;
use salesdesk::forms::RegisterForm;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_app().auth;

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = RegisterForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            password_confirmation: confirm.get_untracked(),
        };

        // 校验失败时不发起请求
        if let Err(e) = form.validate() {
            set_error_msg.set(Some(e.to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let store = auth.store();
        spawn_local(async move {
            if let Err(e) = form.submit(&store).await {
                set_error_msg.set(Some(RegisterForm::error_message(&e)));
            }
            set_is_submitting.set(false);
        });
    };

    let field = move |id: &'static str,
                      label: &'static str,
                      kind: &'static str,
                      value: ReadSignal<String>,
                      set: WriteSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type=kind
                    on:input=move |ev| set.set(event_target_value(&ev))
                    prop:value=value
                    class="input input-bordered"
                />
            </div>
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Criar conta"</h1>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorAlert message=error_msg.into() />
                        {field("name", "Nome", "text", name, set_name)}
                        {field("email", "E-mail", "email", email, set_email)}
                        {field("password", "Senha", "password", password, set_password)}
                        {field("confirm", "Confirmar senha", "password", confirm, set_confirm)}
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() { "Registrando..." } else { "Registrar" }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Já tem conta? "
                            <Link to=AppRoute::Login class="link link-primary">"Entrar"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
