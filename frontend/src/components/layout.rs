//! Page shells: sidebar navigation plus a header with the session identity
//! and the logout action. Purely presentational; the guard has already run
//! by the time a shell renders.

use leptos::prelude::*;

use super::icons::{LogoutIcon, UserIcon};
use crate::auth;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

struct NavItem {
    title: &'static str,
    route: AppRoute,
}

const ADMIN_NAV: &[NavItem] = &[
    NavItem {
        title: "Dashboard",
        route: AppRoute::AdminDashboard,
    },
    NavItem {
        title: "Libros",
        route: AppRoute::AdminBooks,
    },
    NavItem {
        title: "Usuarios",
        route: AppRoute::AdminUsers,
    },
    NavItem {
        title: "Préstamos",
        route: AppRoute::AdminLoans,
    },
    NavItem {
        title: "Multas",
        route: AppRoute::AdminFines,
    },
    NavItem {
        title: "Usuarios Permitidos",
        route: AppRoute::AdminAllowedUsers,
    },
];

const USER_NAV: &[NavItem] = &[
    NavItem {
        title: "Mi Perfil",
        route: AppRoute::Profile,
    },
    NavItem {
        title: "Catálogo de Libros",
        route: AppRoute::Catalog,
    },
    NavItem {
        title: "Mis Préstamos",
        route: AppRoute::MyLoans,
    },
    NavItem {
        title: "Mis Multas",
        route: AppRoute::MyFines,
    },
];

#[component]
fn Shell(
    heading: &'static str,
    nav_items: &'static [NavItem],
    children: Children,
) -> impl IntoView {
    let session_ctx = use_session();
    let router = use_router();
    let display_name = session_ctx.display_name();

    let on_logout = move |_| {
        auth::logout(&session_ctx);
        router.navigate(AppRoute::Login);
    };

    view! {
        <div class="min-h-screen flex bg-amber-50/50">
            <aside class="w-64 shrink-0 bg-gradient-to-b from-amber-700 to-orange-800">
                <div class="h-16 flex items-center justify-center border-b border-amber-600">
                    <h2 class="text-xl font-bold text-white">"Biblioteca JUMALI"</h2>
                </div>
                <nav class="mt-6">
                    {nav_items
                        .iter()
                        .map(|item| {
                            let route = item.route;
                            let is_active =
                                move || router.current_route().get() == route;
                            view! {
                                <a
                                    class=move || {
                                        if is_active() {
                                            "flex items-center px-6 py-3 text-white bg-amber-800 cursor-pointer"
                                        } else {
                                            "flex items-center px-6 py-3 text-white hover:bg-amber-600 cursor-pointer"
                                        }
                                    }
                                    on:click=move |_| router.navigate(route)
                                >
                                    {item.title}
                                </a>
                            }
                        })
                        .collect_view()}
                </nav>
            </aside>

            <div class="flex-1 flex flex-col">
                <header class="bg-white shadow-md">
                    <div class="flex items-center justify-between h-16 px-6">
                        <h1 class="text-xl font-semibold text-amber-800">{heading}</h1>
                        <div class="flex items-center space-x-4">
                            <div class="flex items-center space-x-2 text-gray-700">
                                <UserIcon class="h-5 w-5 text-amber-600" />
                                <span>{display_name}</span>
                            </div>
                            <button
                                on:click=on_logout
                                class="flex items-center gap-2 bg-gradient-to-r from-amber-600 to-orange-700 hover:from-amber-700 hover:to-orange-800 text-white px-4 py-2 rounded-lg text-sm font-medium"
                            >
                                <LogoutIcon class="h-4 w-4" />
                                "Cerrar Sesión"
                            </button>
                        </div>
                    </div>
                </header>
                <main class="flex-1 p-6">{children()}</main>
            </div>
        </div>
    }
}

#[component]
pub fn AdminLayout(children: Children) -> impl IntoView {
    view! { <Shell heading="Panel Administrativo" nav_items=ADMIN_NAV>{children()}</Shell> }
}

#[component]
pub fn UserLayout(children: Children) -> impl IntoView {
    view! { <Shell heading="Portal del Usuario" nav_items=USER_NAV>{children()}</Shell> }
}
