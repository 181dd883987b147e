//! Loan management (admin): list, search, create with explicit dates, and
//! registration of returns. A late return may come back with the fine the
//! backend created for it.

use biblioteca_shared::{Book, Loan, User};
use biblioteca_shared::protocol::{
    CreateLoanRequest, ListBooksRequest, ListLoansRequest, ListUsersRequest, ReturnLoanRequest,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

use crate::dialog::use_prompter;
use crate::session::use_session;
use crate::web::latest::RequestSeq;

#[derive(Clone, Copy)]
struct LoanFormState {
    book_id: RwSignal<String>,
    patron_id: RwSignal<String>,
    loan_date: RwSignal<String>,
    due_date: RwSignal<String>,
}

impl LoanFormState {
    fn new() -> Self {
        Self {
            book_id: RwSignal::new(String::new()),
            patron_id: RwSignal::new(String::new()),
            loan_date: RwSignal::new(String::new()),
            due_date: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.book_id.set(String::new());
        self.patron_id.set(String::new());
        self.loan_date.set(String::new());
        self.due_date.set(String::new());
    }

    fn to_request(&self) -> Result<CreateLoanRequest, &'static str> {
        let request = CreateLoanRequest {
            book_id: self.book_id.get_untracked(),
            patron_id: self.patron_id.get_untracked(),
            loan_date: self.loan_date.get_untracked(),
            due_date: self.due_date.get_untracked(),
        };
        if request.book_id.is_empty()
            || request.patron_id.is_empty()
            || request.loan_date.is_empty()
            || request.due_date.is_empty()
        {
            return Err("Por favor, completa todos los campos del préstamo");
        }
        if request.due_date < request.loan_date {
            return Err("La fecha de devolución no puede ser anterior a la de préstamo");
        }
        Ok(request)
    }
}

#[component]
pub fn LoansPage() -> impl IntoView {
    let session_ctx = use_session();
    let prompter = use_prompter();

    let (loans, set_loans) = signal(Vec::<Loan>::new());
    let (books, set_books) = signal(Vec::<Book>::new());
    let (users, set_users) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let (search_term, set_search_term) = signal(String::new());
    let (show_form, set_show_form) = signal(false);
    let form = LoanFormState::new();

    let seq = Arc::new(RequestSeq::new());

    let load_loans = {
        let seq = seq.clone();
        move || {
            let api = session_ctx.api();
            let tag = seq.issue();
            let seq = seq.clone();
            set_loading.set(true);
            spawn_local(async move {
                let result = api.send(&ListLoansRequest).await;
                if !seq.is_current(tag) {
                    return;
                }
                match result {
                    Ok(data) => set_loans.set(data),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Error al cargar préstamos: {}", e).into(),
                        );
                    }
                }
                set_loading.set(false);
            });
        }
    };

    Effect::new({
        let load_loans = load_loans.clone();
        move |_| {
            load_loans();
            // The creation form needs books and patrons for its selectors.
            let api = session_ctx.api();
            spawn_local(async move {
                if let Ok(data) = api.send(&ListBooksRequest { estado: None }).await {
                    set_books.set(data);
                }
                if let Ok(data) = api.send(&ListUsersRequest).await {
                    set_users.set(data);
                }
            });
        }
    });

    let handle_create = {
        let prompter = prompter.clone();
        let load_loans = load_loans.clone();
        move || {
            let request = match form.to_request() {
                Ok(r) => r,
                Err(msg) => {
                    prompter.alert(msg);
                    return;
                }
            };
            let api = session_ctx.api();
            let prompter = prompter.clone();
            let load_loans = load_loans.clone();
            spawn_local(async move {
                match api.send(&request).await {
                    Ok(_) => {
                        prompter.alert("Préstamo registrado exitosamente");
                        form.reset();
                        set_show_form.set(false);
                        load_loans();
                    }
                    Err(e) => prompter.alert(&format!("No se pudo registrar el préstamo: {}", e)),
                }
            });
        }
    };

    let handle_return = {
        let prompter = prompter.clone();
        let load_loans = load_loans.clone();
        move |loan: Loan| {
            if !prompter.confirm(&format!(
                "¿Registrar la devolución de \"{}\"?",
                loan.book.title
            )) {
                return;
            }
            let api = session_ctx.api();
            let prompter = prompter.clone();
            let load_loans = load_loans.clone();
            spawn_local(async move {
                match api.send(&ReturnLoanRequest { id: loan.id }).await {
                    Ok(response) => {
                        // The backend decides whether the return generated a fine.
                        match response.fine {
                            Some(fine) => prompter.alert(&format!(
                                "{} Se generó una multa de ${:.2}.",
                                response.message, fine.amount
                            )),
                            None => prompter.alert(&response.message),
                        }
                        load_loans();
                    }
                    Err(e) => {
                        prompter.alert(&format!("No se pudo registrar la devolución: {}", e))
                    }
                }
            });
        }
    };

    let filtered_loans = move || {
        let term = search_term.get().to_lowercase();
        loans
            .get()
            .into_iter()
            .filter(|loan| {
                term.is_empty()
                    || loan.book.title.to_lowercase().contains(&term)
                    || loan.patron.full_name.to_lowercase().contains(&term)
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="space-y-6">
            <div class="bg-white rounded-lg shadow-lg p-6">
                <div class="flex justify-between items-center mb-6">
                    <h2 class="text-2xl font-semibold text-gray-800">"Gestión de Préstamos"</h2>
                    <button
                        on:click=move |_| {
                            form.reset();
                            set_show_form.set(true);
                        }
                        class="bg-gradient-to-r from-amber-600 to-orange-700 hover:from-amber-700 hover:to-orange-800 text-white px-4 py-2 rounded-lg"
                    >
                        "Nuevo Préstamo"
                    </button>
                </div>

                <div class="mb-6">
                    <input
                        type="text"
                        placeholder="Buscar por libro o usuario..."
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
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Libro"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Usuario"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Fecha Préstamo"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Fecha Devolución"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Estado"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Acciones"</th>
                                </tr>
                            </thead>
                            <tbody class="bg-white divide-y divide-gray-200">
                                <For
                                    each=filtered_loans
                                    key=|loan| loan.id.clone()
                                    children={
                                        let handle_return = handle_return.clone();
                                        move |loan: Loan| {
                                            let return_loan = loan.clone();
                                            let handle_return = handle_return.clone();
                                            let status = loan.status;
                                            view! {
                                                <tr>
                                                    <td class="px-6 py-4 text-sm font-medium text-gray-900">{loan.book.title.clone()}</td>
                                                    <td class="px-6 py-4 text-sm text-gray-500">{loan.patron.full_name.clone()}</td>
                                                    <td class="px-6 py-4 text-sm text-gray-500">
                                                        {loan.loan_date.format("%d/%m/%Y").to_string()}
                                                    </td>
                                                    <td class="px-6 py-4 text-sm text-gray-500">
                                                        {loan.due_date.format("%d/%m/%Y").to_string()}
                                                    </td>
                                                    <td class="px-6 py-4 text-sm">
                                                        <span class=match status {
                                                            biblioteca_shared::LoanStatus::Active => "px-2 py-1 rounded-full text-xs bg-blue-100 text-blue-800",
                                                            biblioteca_shared::LoanStatus::Returned => "px-2 py-1 rounded-full text-xs bg-green-100 text-green-800",
                                                            biblioteca_shared::LoanStatus::Overdue => "px-2 py-1 rounded-full text-xs bg-red-100 text-red-800",
                                                        }>
                                                            {status.label()}
                                                        </span>
                                                    </td>
                                                    <td class="px-6 py-4 text-sm font-medium">
                                                        <Show when={let returned = loan.returned; move || !returned}>
                                                            <button
                                                                on:click={
                                                                    let handle_return = handle_return.clone();
                                                                    let return_loan = return_loan.clone();
                                                                    move |_| handle_return(return_loan.clone())
                                                                }
                                                                class="bg-green-600 text-white px-3 py-1 rounded hover:bg-green-700"
                                                            >
                                                                "Registrar Devolución"
                                                            </button>
                                                        </Show>
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

            <Show when=move || show_form.get()>
                <div class="fixed inset-0 bg-black/50 flex items-center justify-center p-4 z-30">
                    <div class="bg-white rounded-lg p-6 w-full max-w-md">
                        <h3 class="text-xl font-semibold mb-4">"Nuevo Préstamo"</h3>
                        <form
                            class="space-y-4"
                            on:submit={
                                let handle_create = handle_create.clone();
                                move |ev: web_sys::SubmitEvent| {
                                    ev.prevent_default();
                                    handle_create();
                                }
                            }
                        >
                            <select
                                class="w-full p-2 border rounded-md"
                                on:change=move |ev| form.book_id.set(event_target_value(&ev))
                            >
                                <option value="">"Selecciona un libro"</option>
                                <For
                                    each=move || {
                                        books
                                            .get()
                                            .into_iter()
                                            .filter(|b| b.is_available() && !b.deleted)
                                            .collect::<Vec<_>>()
                                    }
                                    key=|book| book.id.clone()
                                    children=move |book: Book| {
                                        view! {
                                            <option value=book.id.clone()>
                                                {format!("{} ({} disponibles)", book.title, book.copies_available)}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                            <select
                                class="w-full p-2 border rounded-md"
                                on:change=move |ev| form.patron_id.set(event_target_value(&ev))
                            >
                                <option value="">"Selecciona un usuario"</option>
                                <For
                                    each=move || users.get()
                                    key=|user| user.id.clone()
                                    children=move |user: User| {
                                        view! {
                                            <option value=user.id.clone()>{user.full_name.clone()}</option>
                                        }
                                    }
                                />
                            </select>
                            <div>
                                <label class="block text-sm text-gray-600 mb-1">"Fecha de préstamo"</label>
                                <input type="date" class="w-full p-2 border rounded-md"
                                    prop:value=form.loan_date
                                    on:input=move |ev| form.loan_date.set(event_target_value(&ev)) />
                            </div>
                            <div>
                                <label class="block text-sm text-gray-600 mb-1">"Fecha de devolución"</label>
                                <input type="date" class="w-full p-2 border rounded-md"
                                    prop:value=form.due_date
                                    on:input=move |ev| form.due_date.set(event_target_value(&ev)) />
                            </div>
                            <div class="flex justify-end space-x-2">
                                <button
                                    type="button"
                                    on:click=move |_| set_show_form.set(false)
                                    class="px-4 py-2 text-gray-700 bg-gray-100 rounded-md hover:bg-gray-200"
                                >
                                    "Cancelar"
                                </button>
                                <button type="submit" class="px-4 py-2 text-white bg-amber-600 rounded-md hover:bg-amber-700">
                                    "Registrar"
                                </button>
                            </div>
                        </form>
                    </div>
                </div>
            </Show>
        </div>
    }
}
