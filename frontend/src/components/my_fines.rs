//! Patron view of their own fines, read-only, with a pending total.

use biblioteca_shared::Fine;
use biblioteca_shared::protocol::ListMyFinesRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::session::use_session;

#[component]
pub fn MyFinesPage() -> impl IntoView {
    let session_ctx = use_session();

    let (fines, set_fines) = signal(Vec::<Fine>::new());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        let api = session_ctx.api();
        spawn_local(async move {
            match api.send(&ListMyFinesRequest).await {
                Ok(data) => set_fines.set(data),
                Err(e) => {
                    web_sys::console::error_1(&format!("Error al cargar tus multas: {}", e).into());
                }
            }
            set_loading.set(false);
        });
    });

    let pending_total = move || {
        fines
            .get()
            .iter()
            .filter(|fine| !fine.paid)
            .map(|fine| fine.amount)
            .sum::<f64>()
    };

    view! {
        <div class="bg-white rounded-lg shadow-lg p-6">
            <div class="flex justify-between items-center mb-6">
                <h2 class="text-2xl font-semibold text-gray-800">"Mis Multas"</h2>
                <span class="text-sm text-gray-600">
                    {move || format!("Pendiente: ${:.2}", pending_total())}
                </span>
            </div>

            <Show when=move || loading.get()>
                <p>"Cargando..."</p>
            </Show>

            <Show when=move || !loading.get()>
                <Show
                    when=move || !fines.get().is_empty()
                    fallback=|| view! { <p class="text-gray-500">"No tienes multas registradas"</p> }
                >
                    <div class="overflow-x-auto">
                        <table class="min-w-full divide-y divide-gray-200">
                            <thead class="bg-gray-50">
                                <tr>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Libro"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Monto"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Motivo"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Fecha"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Estado"</th>
                                </tr>
                            </thead>
                            <tbody class="bg-white divide-y divide-gray-200">
                                <For
                                    each=move || fines.get()
                                    key=|fine| fine.id.clone()
                                    children=move |fine: Fine| {
                                        view! {
                                            <tr>
                                                <td class="px-6 py-4 text-sm font-medium text-gray-900">{fine.book.title.clone()}</td>
                                                <td class="px-6 py-4 text-sm text-gray-500">{format!("${:.2}", fine.amount)}</td>
                                                <td class="px-6 py-4 text-sm text-gray-500">{fine.reason.clone()}</td>
                                                <td class="px-6 py-4 text-sm text-gray-500">
                                                    {fine.date.format("%d/%m/%Y").to_string()}
                                                </td>
                                                <td class="px-6 py-4 text-sm">
                                                    {if fine.paid {
                                                        view! { <span class="px-2 py-1 rounded-full text-xs bg-green-100 text-green-800">"Pagada"</span> }
                                                    } else {
                                                        view! { <span class="px-2 py-1 rounded-full text-xs bg-red-100 text-red-800">"Pendiente"</span> }
                                                    }}
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </Show>
            </Show>
        </div>
    }
}
