//! Patron view of their own loans, read-only.

use biblioteca_shared::{Loan, LoanStatus};
use biblioteca_shared::protocol::ListMyLoansRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::session::use_session;

#[component]
pub fn MyLoansPage() -> impl IntoView {
    let session_ctx = use_session();

    let (loans, set_loans) = signal(Vec::<Loan>::new());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        let api = session_ctx.api();
        spawn_local(async move {
            match api.send(&ListMyLoansRequest).await {
                Ok(data) => set_loans.set(data),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Error al cargar tus préstamos: {}", e).into(),
                    );
                }
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="bg-white rounded-lg shadow-lg p-6">
            <h2 class="text-2xl font-semibold text-gray-800 mb-6">"Mis Préstamos"</h2>

            <Show when=move || loading.get()>
                <p>"Cargando..."</p>
            </Show>

            <Show when=move || !loading.get()>
                <Show
                    when=move || !loans.get().is_empty()
                    fallback=|| view! { <p class="text-gray-500">"No tienes préstamos registrados"</p> }
                >
                    <div class="overflow-x-auto">
                        <table class="min-w-full divide-y divide-gray-200">
                            <thead class="bg-gray-50">
                                <tr>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Libro"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Fecha Préstamo"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Fecha Devolución"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Estado"</th>
                                </tr>
                            </thead>
                            <tbody class="bg-white divide-y divide-gray-200">
                                <For
                                    each=move || loans.get()
                                    key=|loan| loan.id.clone()
                                    children=move |loan: Loan| {
                                        let status = loan.status;
                                        view! {
                                            <tr>
                                                <td class="px-6 py-4 text-sm font-medium text-gray-900">{loan.book.title.clone()}</td>
                                                <td class="px-6 py-4 text-sm text-gray-500">
                                                    {loan.loan_date.format("%d/%m/%Y").to_string()}
                                                </td>
                                                <td class="px-6 py-4 text-sm text-gray-500">
                                                    {loan.due_date.format("%d/%m/%Y").to_string()}
                                                </td>
                                                <td class="px-6 py-4 text-sm">
                                                    <span class=match status {
                                                        LoanStatus::Active => "px-2 py-1 rounded-full text-xs bg-blue-100 text-blue-800",
                                                        LoanStatus::Returned => "px-2 py-1 rounded-full text-xs bg-green-100 text-green-800",
                                                        LoanStatus::Overdue => "px-2 py-1 rounded-full text-xs bg-red-100 text-red-800",
                                                    }>
                                                        {status.label()}
                                                    </span>
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
