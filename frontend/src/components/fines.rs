//! Fine management (admin): list, manual creation against overdue loans and
//! one-way payment. Amounts are echoed from the backend, never computed here.

use biblioteca_shared::{Fine, Loan};
use biblioteca_shared::protocol::{
    CreateFineRequest, ListFinesRequest, ListLoansRequest, PayFineRequest,
};
use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

use crate::dialog::use_prompter;
use crate::session::use_session;
use crate::web::latest::RequestSeq;

#[derive(Clone, Copy)]
struct FineFormState {
    loan_id: RwSignal<String>,
    amount: RwSignal<String>,
    reason: RwSignal<String>,
}

impl FineFormState {
    fn new() -> Self {
        Self {
            loan_id: RwSignal::new(String::new()),
            amount: RwSignal::new(String::new()),
            reason: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.loan_id.set(String::new());
        self.amount.set(String::new());
        self.reason.set(String::new());
    }

    fn to_request(&self) -> Result<CreateFineRequest, &'static str> {
        let loan_id = self.loan_id.get_untracked();
        if loan_id.is_empty() {
            return Err("Selecciona el préstamo vencido");
        }
        let amount = self
            .amount
            .get_untracked()
            .trim()
            .parse::<f64>()
            .map_err(|_| "El monto debe ser un número")?;
        if amount <= 0.0 {
            return Err("El monto debe ser mayor que cero");
        }
        let reason = self.reason.get_untracked();
        if reason.trim().is_empty() {
            return Err("Describe el motivo de la multa");
        }
        Ok(CreateFineRequest {
            loan_id,
            amount,
            reason,
        })
    }
}

#[component]
pub fn FinesPage() -> impl IntoView {
    let session_ctx = use_session();
    let prompter = use_prompter();

    let (fines, set_fines) = signal(Vec::<Fine>::new());
    let (loans, set_loans) = signal(Vec::<Loan>::new());
    let (loading, set_loading) = signal(true);
    let (show_form, set_show_form) = signal(false);
    let form = FineFormState::new();

    let seq = Arc::new(RequestSeq::new());

    let load_fines = {
        let seq = seq.clone();
        move || {
            let api = session_ctx.api();
            let tag = seq.issue();
            let seq = seq.clone();
            set_loading.set(true);
            spawn_local(async move {
                let result = api.send(&ListFinesRequest).await;
                if !seq.is_current(tag) {
                    return;
                }
                match result {
                    Ok(data) => set_fines.set(data),
                    Err(e) => {
                        web_sys::console::error_1(&format!("Error al cargar multas: {}", e).into());
                    }
                }
                set_loading.set(false);
            });
        }
    };

    Effect::new({
        let load_fines = load_fines.clone();
        move |_| {
            load_fines();
            let api = session_ctx.api();
            spawn_local(async move {
                if let Ok(data) = api.send(&ListLoansRequest).await {
                    set_loans.set(data);
                }
            });
        }
    });

    // Only overdue, still-out loans are eligible targets for a manual fine.
    let overdue_loans = move || {
        let now = Utc::now();
        loans
            .get()
            .into_iter()
            .filter(|loan| loan.is_overdue_at(now))
            .collect::<Vec<_>>()
    };

    let handle_create = {
        let prompter = prompter.clone();
        let load_fines = load_fines.clone();
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
            let load_fines = load_fines.clone();
            spawn_local(async move {
                match api.send(&request).await {
                    Ok(_) => {
                        prompter.alert("Multa registrada exitosamente");
                        form.reset();
                        set_show_form.set(false);
                        load_fines();
                    }
                    Err(e) => prompter.alert(&format!("No se pudo registrar la multa: {}", e)),
                }
            });
        }
    };

    let handle_pay = {
        let prompter = prompter.clone();
        let load_fines = load_fines.clone();
        move |fine: Fine| {
            if !prompter.confirm(&format!(
                "¿Marcar como pagada la multa de ${:.2} de {}?",
                fine.amount, fine.patron.full_name
            )) {
                return;
            }
            let api = session_ctx.api();
            let prompter = prompter.clone();
            let load_fines = load_fines.clone();
            spawn_local(async move {
                match api.send(&PayFineRequest { id: fine.id }).await {
                    Ok(_) => {
                        prompter.alert("Multa marcada como pagada");
                        load_fines();
                    }
                    Err(e) => prompter.alert(&format!("No se pudo registrar el pago: {}", e)),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <div class="bg-white rounded-lg shadow-lg p-6">
                <div class="flex justify-between items-center mb-6">
                    <h2 class="text-2xl font-semibold text-gray-800">"Gestión de Multas"</h2>
                    <button
                        on:click=move |_| {
                            form.reset();
                            set_show_form.set(true);
                        }
                        class="bg-gradient-to-r from-amber-600 to-orange-700 hover:from-amber-700 hover:to-orange-800 text-white px-4 py-2 rounded-lg"
                    >
                        "Nueva Multa"
                    </button>
                </div>

                <Show when=move || loading.get()>
                    <p>"Cargando..."</p>
                </Show>

                <Show when=move || !loading.get()>
                    <div class="overflow-x-auto">
                        <table class="min-w-full divide-y divide-gray-200">
                            <thead class="bg-gray-50">
                                <tr>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Usuario"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Libro"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Monto"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Motivo"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Fecha"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Estado"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Acciones"</th>
                                </tr>
                            </thead>
                            <tbody class="bg-white divide-y divide-gray-200">
                                <For
                                    each=move || fines.get()
                                    key=|fine| fine.id.clone()
                                    children={
                                        let handle_pay = handle_pay.clone();
                                        move |fine: Fine| {
                                            let pay_fine = fine.clone();
                                            let handle_pay = handle_pay.clone();
                                            view! {
                                                <tr>
                                                    <td class="px-6 py-4 text-sm font-medium text-gray-900">{fine.patron.full_name.clone()}</td>
                                                    <td class="px-6 py-4 text-sm text-gray-500">{fine.book.title.clone()}</td>
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
                                                    <td class="px-6 py-4 text-sm font-medium">
                                                        <Show when={let paid = fine.paid; move || !paid}>
                                                            <button
                                                                on:click={
                                                                    let handle_pay = handle_pay.clone();
                                                                    let pay_fine = pay_fine.clone();
                                                                    move |_| handle_pay(pay_fine.clone())
                                                                }
                                                                class="bg-green-600 text-white px-3 py-1 rounded hover:bg-green-700"
                                                            >
                                                                "Marcar Pagada"
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
                        <h3 class="text-xl font-semibold mb-4">"Nueva Multa"</h3>
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
                                on:change=move |ev| form.loan_id.set(event_target_value(&ev))
                            >
                                <option value="">"Selecciona un préstamo vencido"</option>
                                <For
                                    each=overdue_loans
                                    key=|loan| loan.id.clone()
                                    children=move |loan: Loan| {
                                        view! {
                                            <option value=loan.id.clone()>
                                                {format!("{} ({})", loan.book.title, loan.patron.full_name)}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                            <input type="number" min="0" step="0.01" placeholder="Monto" class="w-full p-2 border rounded-md"
                                prop:value=form.amount
                                on:input=move |ev| form.amount.set(event_target_value(&ev)) />
                            <input type="text" placeholder="Motivo" class="w-full p-2 border rounded-md"
                                prop:value=form.reason
                                on:input=move |ev| form.reason.set(event_target_value(&ev)) />
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
