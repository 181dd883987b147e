//! Patron profile: the identity fields captured at login, read-only.

use leptos::prelude::*;

use super::icons::UserIcon;
use crate::session::use_session;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session_ctx = use_session();
    let session = move || session_ctx.state.get();

    let field = |label: &'static str, value: Signal<String>| {
        view! {
            <div>
                <label class="block text-sm font-medium text-gray-500">{label}</label>
                <p class="mt-1 text-gray-900">{value}</p>
            </div>
        }
    };

    let name = Signal::derive(move || {
        session().map(|s| s.display_name).unwrap_or_default()
    });
    let email = Signal::derive(move || session().map(|s| s.email).unwrap_or_default());
    let role = Signal::derive(move || {
        session()
            .map(|s| {
                if s.role.is_admin() {
                    "Administrador".to_string()
                } else {
                    "Usuario".to_string()
                }
            })
            .unwrap_or_default()
    });

    view! {
        <div class="max-w-xl">
            <div class="bg-white rounded-lg shadow-lg overflow-hidden">
                <div class="bg-gradient-to-r from-amber-600 to-orange-700 p-6 flex items-center space-x-4">
                    <div class="bg-white/20 rounded-full p-3">
                        <UserIcon class="h-8 w-8 text-white" />
                    </div>
                    <div>
                        <h2 class="text-xl font-semibold text-white">{name}</h2>
                        <p class="text-amber-100 text-sm">"Perfil de usuario"</p>
                    </div>
                </div>
                <div class="p-6 space-y-4">
                    {field("Nombre completo", name)}
                    {field("Correo electrónico", email)}
                    {field("Rol", role)}
                </div>
            </div>
        </div>
    }
}
