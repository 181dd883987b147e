//! Admin dashboard: counters derived from the list endpoints.

use biblioteca_shared::protocol::{
    ListBooksRequest, ListFinesRequest, ListLoansRequest, ListUsersRequest,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::session::use_session;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session_ctx = use_session();

    let (total_books, set_total_books) = signal(Option::<usize>::None);
    let (active_loans, set_active_loans) = signal(Option::<usize>::None);
    let (total_users, set_total_users) = signal(Option::<usize>::None);
    let (pending_fines, set_pending_fines) = signal(Option::<usize>::None);

    Effect::new(move |_| {
        let api = session_ctx.api();
        spawn_local(async move {
            if let Ok(books) = api.send(&ListBooksRequest { estado: None }).await {
                set_total_books.set(Some(books.len()));
            }
            if let Ok(loans) = api.send(&ListLoansRequest).await {
                set_active_loans.set(Some(loans.iter().filter(|l| !l.returned).count()));
            }
            if let Ok(users) = api.send(&ListUsersRequest).await {
                set_total_users.set(Some(users.len()));
            }
            if let Ok(fines) = api.send(&ListFinesRequest).await {
                set_pending_fines.set(Some(fines.iter().filter(|f| !f.paid).count()));
            }
        });
    });

    let stat = |count: ReadSignal<Option<usize>>| {
        move || match count.get() {
            Some(n) => n.to_string(),
            None => "—".to_string(),
        }
    };

    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
            <div class="bg-white p-6 rounded-lg shadow">
                <h3 class="text-gray-500 text-sm">"Total Libros"</h3>
                <p class="text-2xl font-semibold">{stat(total_books)}</p>
            </div>
            <div class="bg-white p-6 rounded-lg shadow">
                <h3 class="text-gray-500 text-sm">"Préstamos Activos"</h3>
                <p class="text-2xl font-semibold">{stat(active_loans)}</p>
            </div>
            <div class="bg-white p-6 rounded-lg shadow">
                <h3 class="text-gray-500 text-sm">"Usuarios Registrados"</h3>
                <p class="text-2xl font-semibold">{stat(total_users)}</p>
            </div>
            <div class="bg-white p-6 rounded-lg shadow">
                <h3 class="text-gray-500 text-sm">"Multas Pendientes"</h3>
                <p class="text-2xl font-semibold">{stat(pending_fines)}</p>
            </div>
        </div>
    }
}
