//! Patron-facing catalog: filterable, sortable card grid with the
//! request-loan action. Filter state is per-visit; it resets on mount.

use biblioteca_shared::Book;
use biblioteca_shared::protocol::{ListBooksRequest, RequestLoanRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

use crate::catalog::{self, Availability, FilterState, SortKey};
use crate::dialog::use_prompter;
use crate::session::use_session;
use crate::web::latest::RequestSeq;

#[component]
pub fn CatalogPage() -> impl IntoView {
    let session_ctx = use_session();
    let prompter = use_prompter();

    let (books, set_books) = signal(Vec::<Book>::new());
    let (loading, set_loading) = signal(true);
    let (search_term, set_search_term) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let (availability, set_availability) = signal(Availability::All);
    let (sort_key, set_sort_key) = signal(SortKey::Title);

    let seq = Arc::new(RequestSeq::new());

    let load_books = {
        let seq = seq.clone();
        move || {
            let api = session_ctx.api();
            let tag = seq.issue();
            let seq = seq.clone();
            set_loading.set(true);
            spawn_local(async move {
                let result = api.send(&ListBooksRequest { estado: None }).await;
                if !seq.is_current(tag) {
                    return;
                }
                match result {
                    Ok(data) => set_books.set(data),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Error al cargar el catálogo: {}", e).into(),
                        );
                    }
                }
                set_loading.set(false);
            });
        }
    };

    Effect::new({
        let load_books = load_books.clone();
        move |_| load_books()
    });

    let filtered_books = move || {
        let filters = FilterState {
            search_term: search_term.get(),
            category: category.get(),
            availability: availability.get(),
            sort_key: sort_key.get(),
        };
        catalog::apply(&books.get(), &filters)
    };

    let category_options = move || catalog::categories(&books.get());

    let handle_request = Callback::new({
        let prompter = prompter.clone();
        let load_books = load_books.clone();
        move |book: Book| {
            // Re-check at action time; the rendering may be stale.
            if !catalog::can_request(&book) {
                prompter.alert("Este libro ya no está disponible");
                return;
            }
            if !prompter.confirm(&format!("¿Solicitar el préstamo de \"{}\"?", book.title)) {
                return;
            }
            let api = session_ctx.api();
            let prompter = prompter.clone();
            let load_books = load_books.clone();
            spawn_local(async move {
                match api.send(&RequestLoanRequest { book_id: book.id }).await {
                    Ok(_) => {
                        prompter.alert("Préstamo solicitado exitosamente");
                        load_books();
                    }
                    Err(e) => prompter.alert(&format!("No se pudo solicitar el préstamo: {}", e)),
                }
            });
        }
    });

    view! {
        <div class="space-y-6">
            <div class="bg-white rounded-lg shadow-lg p-6">
                <h2 class="text-2xl font-semibold text-gray-800 mb-6">"Catálogo de Libros"</h2>

                <div class="grid grid-cols-1 md:grid-cols-4 gap-4">
                    <input
                        type="text"
                        placeholder="Buscar por título, autor, editorial o tipo..."
                        class="p-3 border border-amber-200 rounded-lg md:col-span-2"
                        prop:value=search_term
                        on:input=move |ev| set_search_term.set(event_target_value(&ev))
                    />
                    <select
                        class="p-3 border border-amber-200 rounded-lg"
                        on:change=move |ev| set_category.set(event_target_value(&ev))
                    >
                        <option value="">"Todas las categorías"</option>
                        <For
                            each=category_options
                            key=|cat| cat.clone()
                            children=move |cat: String| {
                                view! { <option value=cat.clone()>{cat.clone()}</option> }
                            }
                        />
                    </select>
                    <select
                        class="p-3 border border-amber-200 rounded-lg"
                        on:change=move |ev| {
                            set_availability.set(match event_target_value(&ev).as_str() {
                                "disponible" => Availability::Available,
                                "prestado" => Availability::Loaned,
                                _ => Availability::All,
                            })
                        }
                    >
                        <option value="todos">"Todos"</option>
                        <option value="disponible">"Disponibles"</option>
                        <option value="prestado">"Prestados"</option>
                    </select>
                </div>

                <div class="mt-4 flex items-center gap-2">
                    <span class="text-sm text-gray-600">"Ordenar por:"</span>
                    <select
                        class="p-2 border border-amber-200 rounded-lg text-sm"
                        on:change=move |ev| {
                            set_sort_key.set(match event_target_value(&ev).as_str() {
                                "autor" => SortKey::Author,
                                "año" => SortKey::Year,
                                _ => SortKey::Title,
                            })
                        }
                    >
                        <option value="titulo">"Título"</option>
                        <option value="autor">"Autor"</option>
                        <option value="año">"Año (más reciente)"</option>
                    </select>
                </div>
            </div>

            <Show when=move || loading.get()>
                <p>"Cargando..."</p>
            </Show>

            <Show when=move || !loading.get()>
                <Show
                    when=move || !filtered_books().is_empty()
                    fallback=|| {
                        view! {
                            <div class="bg-white rounded-lg shadow p-8 text-center text-gray-500">
                                "No se encontraron libros con los filtros seleccionados"
                            </div>
                        }
                    }
                >
                    <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6">
                        <For
                            each=filtered_books
                            key=|book| book.id.clone()
                            children={
                                let handle_request = handle_request.clone();
                                move |book: Book| {
                                    let request_book = book.clone();
                                    let handle_request = handle_request.clone();
                                    let requestable = catalog::can_request(&book);
                                    view! {
                                        <div class="bg-white rounded-lg shadow-lg overflow-hidden flex flex-col">
                                            {book
                                                .photo_url
                                                .clone()
                                                .map(|url| {
                                                    view! {
                                                        <img src=url alt=book.title.clone() class="h-48 w-full object-cover" />
                                                    }
                                                })}
                                            <div class="p-4 flex-1 flex flex-col">
                                                <h3 class="font-semibold text-gray-900">{book.title.clone()}</h3>
                                                <p class="text-sm text-gray-600">{book.author.clone()}</p>
                                                <p class="text-sm text-gray-500">
                                                    {format!("{} · {}", book.literature_type, book.year)}
                                                </p>
                                                <p class="text-sm mt-2">
                                                    {if book.is_available() {
                                                        view! {
                                                            <span class="text-green-700">
                                                                {format!("{} disponibles", book.copies_available)}
                                                            </span>
                                                        }
                                                    } else {
                                                        view! { <span class="text-red-600">{"Sin copias".to_string()}</span> }
                                                    }}
                                                </p>
                                                <button
                                                    on:click={
                                                        let handle_request = handle_request.clone();
                                                        let request_book = request_book.clone();
                                                        move |_| handle_request.run(request_book.clone())
                                                    }
                                                    disabled=!requestable
                                                    class="mt-auto pt-3 w-full"
                                                >
                                                    <span class=if requestable {
                                                        "block w-full text-center bg-gradient-to-r from-amber-600 to-orange-700 hover:from-amber-700 hover:to-orange-800 text-white py-2 rounded-lg text-sm font-medium"
                                                    } else {
                                                        "block w-full text-center bg-gray-300 text-gray-500 py-2 rounded-lg text-sm font-medium cursor-not-allowed"
                                                    }>
                                                        "Solicitar Préstamo"
                                                    </span>
                                                </button>
                                            </div>
                                        </div>
                                    }
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}
