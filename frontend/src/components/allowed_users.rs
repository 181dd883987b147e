//! Allow-list administration: the identifiers permitted to self-register,
//! kept as two buckets (emails and national ids). Append-only surface.

use biblioteca_shared::{AllowedUsers, IdentifierType};
use biblioteca_shared::protocol::{AddAllowedUserRequest, ListAllowedUsersRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

use crate::dialog::use_prompter;
use crate::session::use_session;
use crate::web::latest::RequestSeq;

#[component]
pub fn AllowedUsersPage() -> impl IntoView {
    let session_ctx = use_session();
    let prompter = use_prompter();

    let (allowed, set_allowed) = signal(AllowedUsers::default());
    let (loading, set_loading) = signal(true);
    let (identifier, set_identifier) = signal(String::new());
    let (id_type, set_id_type) = signal(IdentifierType::Email);

    let seq = Arc::new(RequestSeq::new());

    let load_allowed = {
        let seq = seq.clone();
        move || {
            let api = session_ctx.api();
            let tag = seq.issue();
            let seq = seq.clone();
            set_loading.set(true);
            spawn_local(async move {
                let result = api.send(&ListAllowedUsersRequest).await;
                if !seq.is_current(tag) {
                    return;
                }
                match result {
                    Ok(data) => set_allowed.set(data),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Error al cargar la lista de permitidos: {}", e).into(),
                        );
                    }
                }
                set_loading.set(false);
            });
        }
    };

    Effect::new({
        let load_allowed = load_allowed.clone();
        move |_| load_allowed()
    });

    let handle_add = {
        let prompter = prompter.clone();
        let load_allowed = load_allowed.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let value = identifier.get_untracked();
            if value.trim().is_empty() {
                prompter.alert("Ingresa el correo o la cédula a permitir");
                return;
            }
            let api = session_ctx.api();
            let request = AddAllowedUserRequest {
                identifier: value.trim().to_string(),
                identifier_type: id_type.get_untracked(),
            };
            let prompter = prompter.clone();
            let load_allowed = load_allowed.clone();
            spawn_local(async move {
                match api.send(&request).await {
                    Ok(_) => {
                        prompter.alert("Identificador agregado a la lista de permitidos");
                        set_identifier.set(String::new());
                        load_allowed();
                    }
                    Err(e) => {
                        prompter.alert(&format!("No se pudo agregar el identificador: {}", e))
                    }
                }
            });
        }
    };

    let bucket = |title: &'static str, entries: Signal<Vec<String>>| {
        view! {
            <div class="bg-white rounded-lg shadow-lg p-6">
                <h3 class="text-lg font-semibold text-gray-800 mb-4">{title}</h3>
                <Show
                    when=move || !entries.get().is_empty()
                    fallback=|| view! { <p class="text-sm text-gray-500">"Sin entradas"</p> }
                >
                    <ul class="divide-y divide-gray-200">
                        <For
                            each=move || entries.get()
                            key=|entry| entry.clone()
                            children=move |entry: String| {
                                view! { <li class="py-2 text-sm text-gray-700">{entry}</li> }
                            }
                        />
                    </ul>
                </Show>
            </div>
        }
    };

    let emails = Signal::derive(move || allowed.get().emails);
    let identifications = Signal::derive(move || allowed.get().identifications);

    view! {
        <div class="space-y-6">
            <div class="bg-white rounded-lg shadow-lg p-6">
                <h2 class="text-2xl font-semibold text-gray-800 mb-6">"Usuarios Permitidos"</h2>
                <form class="flex flex-col sm:flex-row gap-3" on:submit=handle_add>
                    <input
                        type="text"
                        placeholder="Correo o cédula"
                        class="flex-1 p-3 border border-amber-200 rounded-lg"
                        prop:value=identifier
                        on:input=move |ev| set_identifier.set(event_target_value(&ev))
                    />
                    <select
                        class="p-3 border border-amber-200 rounded-lg"
                        on:change=move |ev| {
                            set_id_type.set(match event_target_value(&ev).as_str() {
                                "identification" => IdentifierType::NationalId,
                                _ => IdentifierType::Email,
                            })
                        }
                    >
                        <option value="email">"Correo electrónico"</option>
                        <option value="identification">"Cédula"</option>
                    </select>
                    <button
                        type="submit"
                        class="bg-gradient-to-r from-amber-600 to-orange-700 hover:from-amber-700 hover:to-orange-800 text-white px-6 py-3 rounded-lg"
                    >
                        "Agregar"
                    </button>
                </form>
            </div>

            <Show when=move || loading.get()>
                <p>"Cargando..."</p>
            </Show>

            <Show when=move || !loading.get()>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                    {bucket("Correos permitidos", emails)}
                    {bucket("Cédulas permitidas", identifications)}
                </div>
            </Show>
        </div>
    }
}
