//! Book management (admin): list with server-side `estado` filter, create,
//! edit, soft delete with confirmation, restore.

use biblioteca_shared::Book;
use biblioteca_shared::protocol::{
    BookFilter, BookPayload, DeleteBookRequest, ListBooksRequest, RestoreBookRequest,
    UpdateBookRequest,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

use crate::catalog::{self, FilterState};
use crate::dialog::use_prompter;
use crate::session::use_session;
use crate::web::latest::RequestSeq;

/// Book form state: one struct instead of loose signals, owning reset,
/// prefill and the conversion to the request payload.
#[derive(Clone, Copy)]
struct BookFormState {
    /// `Some(id)` while editing an existing book.
    editing: RwSignal<Option<String>>,
    title: RwSignal<String>,
    author: RwSignal<String>,
    year: RwSignal<String>,
    publisher: RwSignal<String>,
    literature_type: RwSignal<String>,
    copies_available: RwSignal<String>,
    photo_url: RwSignal<String>,
}

impl BookFormState {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            title: RwSignal::new(String::new()),
            author: RwSignal::new(String::new()),
            year: RwSignal::new(String::new()),
            publisher: RwSignal::new(String::new()),
            literature_type: RwSignal::new(String::new()),
            copies_available: RwSignal::new(String::new()),
            photo_url: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.editing.set(None);
        self.title.set(String::new());
        self.author.set(String::new());
        self.year.set(String::new());
        self.publisher.set(String::new());
        self.literature_type.set(String::new());
        self.copies_available.set(String::new());
        self.photo_url.set(String::new());
    }

    fn load(&self, book: &Book) {
        self.editing.set(Some(book.id.clone()));
        self.title.set(book.title.clone());
        self.author.set(book.author.clone());
        self.year.set(book.year.to_string());
        self.publisher.set(book.publisher.clone());
        self.literature_type.set(book.literature_type.clone());
        self.copies_available.set(book.copies_available.to_string());
        self.photo_url.set(book.photo_url.clone().unwrap_or_default());
    }

    /// Validated payload, or a user-facing message naming what is wrong.
    fn to_payload(&self) -> Result<BookPayload, &'static str> {
        let title = self.title.get_untracked();
        let author = self.author.get_untracked();
        let publisher = self.publisher.get_untracked();
        let literature_type = self.literature_type.get_untracked();
        if title.trim().is_empty()
            || author.trim().is_empty()
            || publisher.trim().is_empty()
            || literature_type.trim().is_empty()
        {
            return Err("Por favor, completa todos los campos obligatorios");
        }

        let year = self
            .year
            .get_untracked()
            .trim()
            .parse::<i32>()
            .map_err(|_| "El año debe ser un número")?;
        let copies_available = self
            .copies_available
            .get_untracked()
            .trim()
            .parse::<u32>()
            .map_err(|_| "La cantidad disponible debe ser un número no negativo")?;

        let photo = self.photo_url.get_untracked();
        Ok(BookPayload {
            title,
            author,
            year,
            publisher,
            literature_type,
            copies_available,
            photo_url: (!photo.trim().is_empty()).then_some(photo),
        })
    }
}

#[component]
pub fn BooksPage() -> impl IntoView {
    let session_ctx = use_session();
    let prompter = use_prompter();

    let (books, set_books) = signal(Vec::<Book>::new());
    let (loading, set_loading) = signal(true);
    let (search_term, set_search_term) = signal(String::new());
    let (show_deleted, set_show_deleted) = signal(false);
    let (show_form, set_show_form) = signal(false);
    let form = BookFormState::new();

    let seq = Arc::new(RequestSeq::new());

    let load_books = {
        let seq = seq.clone();
        move || {
            let api = session_ctx.api();
            let estado = if show_deleted.get_untracked() {
                Some(BookFilter::Deleted)
            } else {
                None
            };
            let tag = seq.issue();
            let seq = seq.clone();
            set_loading.set(true);
            spawn_local(async move {
                let result = api.send(&ListBooksRequest { estado }).await;
                // A newer request supersedes this one; drop the response.
                if !seq.is_current(tag) {
                    return;
                }
                match result {
                    Ok(data) => set_books.set(data),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Error al cargar libros: {}", e).into(),
                        );
                    }
                }
                set_loading.set(false);
            });
        }
    };

    Effect::new({
        let load_books = load_books.clone();
        move |_| {
            // Re-fetch whenever the server-side filter flips.
            let _ = show_deleted.get();
            load_books();
        }
    });

    let handle_save = {
        let prompter = prompter.clone();
        let load_books = load_books.clone();
        move || {
            let payload = match form.to_payload() {
                Ok(p) => p,
                Err(msg) => {
                    prompter.alert(msg);
                    return;
                }
            };
            let api = session_ctx.api();
            let editing = form.editing.get_untracked();
            let prompter = prompter.clone();
            let load_books = load_books.clone();
            spawn_local(async move {
                let result = match editing {
                    Some(id) => api.send(&UpdateBookRequest { id, payload }).await.map(|_| ()),
                    None => api.send(&payload).await.map(|_| ()),
                };
                match result {
                    Ok(()) => {
                        prompter.alert("Libro guardado exitosamente");
                        form.reset();
                        set_show_form.set(false);
                        load_books();
                    }
                    Err(e) => prompter.alert(&format!("No se pudo guardar el libro: {}", e)),
                }
            });
        }
    };

    let handle_delete = {
        let prompter = prompter.clone();
        let load_books = load_books.clone();
        move |book: Book| {
            // Declining the prompt must not reach the network.
            if !prompter.confirm(&format!(
                "¿Eliminar el libro \"{}\"? Podrás restaurarlo después.",
                book.title
            )) {
                return;
            }
            let api = session_ctx.api();
            let prompter = prompter.clone();
            let load_books = load_books.clone();
            spawn_local(async move {
                match api.send(&DeleteBookRequest { id: book.id }).await {
                    Ok(_) => {
                        prompter.alert("Libro eliminado exitosamente");
                        load_books();
                    }
                    Err(e) => prompter.alert(&format!("No se pudo eliminar el libro: {}", e)),
                }
            });
        }
    };

    let handle_restore = {
        let prompter = prompter.clone();
        let load_books = load_books.clone();
        move |book_id: String| {
            let api = session_ctx.api();
            let prompter = prompter.clone();
            let load_books = load_books.clone();
            spawn_local(async move {
                match api.send(&RestoreBookRequest { id: book_id }).await {
                    Ok(_) => {
                        prompter.alert("Libro restaurado exitosamente");
                        load_books();
                    }
                    Err(e) => prompter.alert(&format!("No se pudo restaurar el libro: {}", e)),
                }
            });
        }
    };

    // Client-side search on top of the server-side estado filter.
    let filtered_books = move || {
        let filters = FilterState {
            search_term: search_term.get(),
            ..Default::default()
        };
        catalog::apply(&books.get(), &filters)
    };

    view! {
        <div class="space-y-6">
            <div class="bg-white rounded-lg shadow-lg p-6">
                <div class="flex justify-between items-center mb-6">
                    <h2 class="text-2xl font-semibold text-gray-800">"Gestión de Libros"</h2>
                    <div class="flex gap-2">
                        <button
                            on:click=move |_| set_show_deleted.update(|v| *v = !*v)
                            class="px-4 py-2 rounded-lg border border-amber-300 text-amber-700 hover:bg-amber-50"
                        >
                            {move || if show_deleted.get() { "Ver disponibles" } else { "Ver eliminados" }}
                        </button>
                        <button
                            on:click=move |_| {
                                form.reset();
                                set_show_form.set(true);
                            }
                            class="bg-gradient-to-r from-amber-600 to-orange-700 hover:from-amber-700 hover:to-orange-800 text-white px-4 py-2 rounded-lg"
                        >
                            "Nuevo Libro"
                        </button>
                    </div>
                </div>

                <div class="mb-6">
                    <input
                        type="text"
                        placeholder="Buscar por título, autor, editorial o tipo..."
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
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Título"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Autor"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Año"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Tipo"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Disponibles"</th>
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">"Acciones"</th>
                                </tr>
                            </thead>
                            <tbody class="bg-white divide-y divide-gray-200">
                                <For
                                    each=filtered_books
                                    key=|book| book.id.clone()
                                    children={
                                        let handle_delete = handle_delete.clone();
                                        let handle_restore = handle_restore.clone();
                                        move |book: Book| {
                                            let edit_book = book.clone();
                                            let delete_book = book.clone();
                                            let restore_id = book.id.clone();
                                            let handle_delete = handle_delete.clone();
                                            let handle_restore = handle_restore.clone();
                                            view! {
                                                <tr>
                                                    <td class="px-6 py-4 text-sm font-medium text-gray-900">{book.title.clone()}</td>
                                                    <td class="px-6 py-4 text-sm text-gray-500">{book.author.clone()}</td>
                                                    <td class="px-6 py-4 text-sm text-gray-500">{book.year}</td>
                                                    <td class="px-6 py-4 text-sm text-gray-500">{book.literature_type.clone()}</td>
                                                    <td class="px-6 py-4 text-sm text-gray-500">{book.copies_available}</td>
                                                    <td class="px-6 py-4 text-sm font-medium space-x-2">
                                                        <Show when={let deleted = book.deleted; move || !deleted}>
                                                            <button
                                                                on:click={
                                                                    let edit_book = edit_book.clone();
                                                                    move |_| {
                                                                        form.load(&edit_book);
                                                                        set_show_form.set(true);
                                                                    }
                                                                }
                                                                class="bg-amber-600 text-white px-3 py-1 rounded hover:bg-amber-700"
                                                            >
                                                                "Editar"
                                                            </button>
                                                            <button
                                                                on:click={
                                                                    let handle_delete = handle_delete.clone();
                                                                    let delete_book = delete_book.clone();
                                                                    move |_| handle_delete(delete_book.clone())
                                                                }
                                                                class="bg-red-600 text-white px-3 py-1 rounded hover:bg-red-700"
                                                            >
                                                                "Eliminar"
                                                            </button>
                                                        </Show>
                                                        <Show when={let deleted = book.deleted; move || deleted}>
                                                            <button
                                                                on:click={
                                                                    let handle_restore = handle_restore.clone();
                                                                    let restore_id = restore_id.clone();
                                                                    move |_| handle_restore(restore_id.clone())
                                                                }
                                                                class="bg-green-600 text-white px-3 py-1 rounded hover:bg-green-700"
                                                            >
                                                                "Restaurar"
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
                        <h3 class="text-xl font-semibold mb-4">
                            {move || if form.editing.get().is_some() { "Editar Libro" } else { "Nuevo Libro" }}
                        </h3>
                        <form
                            class="space-y-4"
                            on:submit={
                                let handle_save = handle_save.clone();
                                move |ev: web_sys::SubmitEvent| {
                                    ev.prevent_default();
                                    handle_save();
                                }
                            }
                        >
                            <input type="text" placeholder="Título" class="w-full p-2 border rounded-md"
                                prop:value=form.title
                                on:input=move |ev| form.title.set(event_target_value(&ev)) />
                            <input type="text" placeholder="Autor" class="w-full p-2 border rounded-md"
                                prop:value=form.author
                                on:input=move |ev| form.author.set(event_target_value(&ev)) />
                            <input type="number" placeholder="Año" class="w-full p-2 border rounded-md"
                                prop:value=form.year
                                on:input=move |ev| form.year.set(event_target_value(&ev)) />
                            <input type="text" placeholder="Editorial" class="w-full p-2 border rounded-md"
                                prop:value=form.publisher
                                on:input=move |ev| form.publisher.set(event_target_value(&ev)) />
                            <input type="text" placeholder="Tipo de literatura" class="w-full p-2 border rounded-md"
                                prop:value=form.literature_type
                                on:input=move |ev| form.literature_type.set(event_target_value(&ev)) />
                            <input type="number" min="0" placeholder="Cantidad disponible" class="w-full p-2 border rounded-md"
                                prop:value=form.copies_available
                                on:input=move |ev| form.copies_available.set(event_target_value(&ev)) />
                            <input type="text" placeholder="URL de la foto (opcional)" class="w-full p-2 border rounded-md"
                                prop:value=form.photo_url
                                on:input=move |ev| form.photo_url.set(event_target_value(&ev)) />
                            <div class="flex justify-end space-x-2">
                                <button
                                    type="button"
                                    on:click=move |_| set_show_form.set(false)
                                    class="px-4 py-2 text-gray-700 bg-gray-100 rounded-md hover:bg-gray-200"
                                >
                                    "Cancelar"
                                </button>
                                <button type="submit" class="px-4 py-2 text-white bg-amber-600 rounded-md hover:bg-amber-700">
                                    "Guardar"
                                </button>
                            </div>
                        </form>
                    </div>
                </div>
            </Show>
        </div>
    }
}
