//! User management (admin): list, search, block toggle and delete.

use biblioteca_shared::User;
use biblioteca_shared::protocol::{BlockUserRequest, DeleteUserRequest, ListUsersRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

use crate::dialog::use_prompter;
use crate::session::use_session;
use crate::web::latest::RequestSeq;

#[component]
pub fn UsersPage() -> impl IntoView {
    let session_ctx = use_session();
    let prompter = use_prompter();

    let (users, set_users) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let (search_term, set_search_term) = signal(String::new());

    let seq = Arc::new(RequestSeq::new());

    let load_users = {
        let seq = seq.clone();
        move || {
            let api = session_ctx.api();
            let tag = seq.issue();
            let seq = seq.clone();
            set_loading.set(true);
            spawn_local(async move {
                let result = api.send(&ListUsersRequest).await;
                if !seq.is_current(tag) {
                    return;
                }
                match result {
                    Ok(data) => set_users.set(data),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Error al cargar usuarios: {}", e).into(),
                        );
                    }
                }
                set_loading.set(false);
            });
        }
    };

    Effect::new({
        let load_users = load_users.clone();
        move |_| load_users()
    });

    let handle_toggle_block = {
        let prompter = prompter.clone();
        let load_users = load_users.clone();
        move |user: User| {
            let question = if user.blocked {
                format!("¿Desbloquear a {}?", user.full_name)
            } else {
                format!(
                    "¿Bloquear a {}? No podrá iniciar sesión hasta que lo desbloquees.",
                    user.full_name
                )
            };
            if !prompter.confirm(&question) {
                return;
            }
            let api = session_ctx.api();
            let prompter = prompter.clone();
            let load_users = load_users.clone();
            spawn_local(async move {
                let request = BlockUserRequest {
                    id: user.id,
                    blocked: !user.blocked,
                };
                match api.send(&request).await {
                    Ok(_) => load_users(),
                    Err(e) => {
                        prompter.alert(&format!("No se pudo actualizar el usuario: {}", e))
                    }
                }
            });
        }
    };

    let handle_delete = {
        let prompter = prompter.clone();
        let load_users = load_users.clone();
        move |user: User| {
            if !prompter.confirm(&format!(
                "¿Eliminar a {}? Esta acción no se puede deshacer.",
                user.full_name
            )) {
                return;
            }
            let api = session_ctx.api();
            let prompter = prompter.clone();
            let load_users = load_users.clone();
            spawn_local(async move {
                match api.send(&DeleteUserRequest { id: user.id }).await {
                    Ok(_) => {
                        prompter.alert("Usuario eliminado exitosamente");
                        load_users();
                    }
                    Err(e) => prompter.alert(&format!("No se pudo eliminar el usuario: {}", e)),
                }
            });
        }
    };

    let filtered_users = move || {
        let term = search_term.get().to_lowercase();
        users
            .get()
            .into_iter()
            .filter(|user| {
                term.is_empty()
                    || user.full_name.to_lowercase().contains(&term)
                    || user.email.to_lowercase().contains(&term)
                    || user.national_id.contains(&term)
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="bg-white rounded-lg shadow-lg p-6">
            <h2 class="text-2xl font-semibold text-gray-800 mb-6">"Gestión de Usuarios"</h2>

            <div class="mb-6">
                <input
                    type="text"
                    placeholder="Buscar por nombre, correo o cédula..."
                    class="w-full p-3 border border-amber-200 rounded-lg"
                    prop:value=search_term
                    on:input=move |ev| set_search_term.set(event_target_value(&ev))
                />
            </div>

            <Show when=move || loading.get()>
                <p>"Cargando..."</p>
            </Show>

            <Show when=move || !loading.get()>
                <div class="overflow-x-auto">
                    <table class="min-w-full divide-y divide-gray-200">
                        <thead class="bg-gray-50">
                            <tr>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Nombre"</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Correo"</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Cédula"</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Teléfono"</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Estado"</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Acciones"</th>
                            </tr>
                        </thead>
                        <tbody class="bg-white divide-y divide-gray-200">
                            <For
                                each=filtered_users
                                key=|user| user.id.clone()
                                children={
                                    let handle_toggle_block = handle_toggle_block.clone();
                                    let handle_delete = handle_delete.clone();
                                    move |user: User| {
                                        let block_user = user.clone();
                                        let delete_user = user.clone();
                                        let handle_toggle_block = handle_toggle_block.clone();
                                        let handle_delete = handle_delete.clone();
                                        view! {
                                            <tr>
                                                <td class="px-6 py-4 text-sm font-medium text-gray-900">{user.full_name.clone()}</td>
                                                <td class="px-6 py-4 text-sm text-gray-500">{user.email.clone()}</td>
                                                <td class="px-6 py-4 text-sm text-gray-500">{user.national_id.clone()}</td>
                                                <td class="px-6 py-4 text-sm text-gray-500">{user.phone.clone()}</td>
                                                <td class="px-6 py-4 text-sm">
                                                    {if user.blocked {
                                                        view! { <span class="px-2 py-1 rounded-full text-xs bg-red-100 text-red-800">"Bloqueado"</span> }
                                                    } else {
                                                        view! { <span class="px-2 py-1 rounded-full text-xs bg-green-100 text-green-800">"Activo"</span> }
                                                    }}
                                                </td>
                                                <td class="px-6 py-4 text-sm font-medium space-x-2">
                                                    <button
                                                        on:click={
                                                            let handle_toggle_block = handle_toggle_block.clone();
                                                            let block_user = block_user.clone();
                                                            move |_| handle_toggle_block(block_user.clone())
                                                        }
                                                        class="bg-amber-600 text-white px-3 py-1 rounded hover:bg-amber-700"
                                                    >
                                                        {if user.blocked { "Desbloquear" } else { "Bloquear" }}
                                                    </button>
                                                    <button
                                                        on:click={
                                                            let handle_delete = handle_delete.clone();
                                                            let delete_user = delete_user.clone();
                                                            move |_| handle_delete(delete_user.clone())
                                                        }
                                                        class="bg-red-600 text-white px-3 py-1 rounded hover:bg-red-700"
                                                    >
                                                        "Eliminar"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
        </div>
    }
}
