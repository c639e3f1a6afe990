use crate::components::layout::{ErrorAlert, PaginationBar, Shell, Spinner, confirm_action};
use crate::context::use_app;
use leptos::prelude::*;
use leptos::task::spawn_local;
use salesdesk::forms::UserForm;
use salesdesk_shared::date::display_date;
use salesdesk_shared::{Id, User};

#[component]
pub fn UsersPage() -> impl IntoView {
    let users = use_app().users;

    // None = 新建；Some(id) = 编辑
    let (editing, set_editing) = signal(Option::<Id>::None);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (form_error, set_form_error) = signal(Option::<String>::None);

    let load = move |page: u32| {
        let store = users.store();
        spawn_local(async move {
            let _ = store.fetch_list(page, &[]).await;
        });
    };

    Effect::new(move |_| load(1));

    let reset = move || {
        set_editing.set(None);
        set_name.set(String::new());
        set_email.set(String::new());
        set_password.set(String::new());
        set_form_error.set(None);
    };

    let on_edit = move |user: User| {
        let form = UserForm::from_user(&user);
        set_editing.set(Some(user.id));
        set_name.set(form.name);
        set_email.set(form.email);
        set_password.set(form.password);
        set_form_error.set(None);
    };

    let on_delete = move |id: Id| {
        if !confirm_action("Deseja excluir este usuário?") {
            return;
        }
        let store = users.store();
        spawn_local(async move {
            let _ = store.delete(id).await;
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = UserForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let store = users.store();

        match editing.get_untracked() {
            Some(id) => match form.validate_update() {
                Ok(update) => spawn_local(async move {
                    if store.update(id, &update).await.is_ok() {
                        reset();
                    }
                }),
                Err(e) => set_form_error.set(Some(e.to_string())),
            },
            None => match form.validate_create() {
                Ok(request) => spawn_local(async move {
                    if store.create(&request).await.is_ok() {
                        reset();
                    }
                }),
                Err(e) => set_form_error.set(Some(e.to_string())),
            },
        }
    };

    let pagination = Signal::derive(move || users.state.get().pagination);
    let loading = Signal::derive(move || users.state.get().loading);
    let error = Signal::derive(move || form_error.get().or(users.state.get().error));

    view! {
        <Shell title="Usuários">
            <ErrorAlert message=error />
            <div class="grid md:grid-cols-3 gap-6">
                <div class="card bg-base-100 shadow-xl md:col-span-2">
                    <div class="card-body p-0">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Nome"</th>
                                    <th>"E-mail"</th>
                                    <th class="hidden md:table-cell">"Criado em"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || users.state.get().items
                                    key=|user| user.id
                                    children=move |user: User| {
                                        let id = user.id;
                                        let created = user.created_at.as_deref().map(display_date).unwrap_or_default();
                                        let target = user.clone();
                                        view! {
                                            <tr>
                                                <td class="font-bold">{user.name}</td>
                                                <td>{user.email}</td>
                                                <td class="hidden md:table-cell">{created}</td>
                                                <td class="flex gap-1 justify-end">
                                                    <button class="btn btn-ghost btn-xs" on:click=move |_| on_edit(target.clone())>
                                                        "Editar"
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
                        <Spinner loading=loading />
                        <PaginationBar pagination=pagination on_page=Callback::new(load) />
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_submit>
                        <h3 class="card-title">
                            {move || if editing.get().is_some() { "Editar usuário" } else { "Novo usuário" }}
                        </h3>
                        <input
                            type="text"
                            placeholder="Nome"
                            class="input input-bordered"
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                            prop:value=name
                        />
                        <input
                            type="email"
                            placeholder="E-mail"
                            class="input input-bordered"
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            prop:value=email
                        />
                        <input
                            type="password"
                            placeholder=move || if editing.get().is_some() { "Nova senha (opcional)" } else { "Senha" }
                            class="input input-bordered"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                        />
                        <div class="card-actions justify-end mt-2">
                            <Show when=move || editing.get().is_some()>
                                <button type="button" class="btn btn-ghost" on:click=move |_| reset()>
                                    "Cancelar"
                                </button>
                            </Show>
                            <button class="btn btn-primary" disabled=move || loading.get()>"Salvar"</button>
                        </div>
                    </form>
                </div>
            </div>
        </Shell>
    }
}
