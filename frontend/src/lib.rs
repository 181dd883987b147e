//! Biblioteca JUMALI web client
//!
//! Context-driven architecture, high cohesion and low coupling:
//! - `web::route`: route definitions (domain model)
//! - `web::router`: routing service (core engine)
//! - `session`: persisted session state, injected via Context
//! - `auth`: login/registration flows and the route guard
//! - `catalog`: pure filter/sort engine over the book list
//! - `components`: UI layer

mod api;
mod auth;
mod catalog;
mod dialog;
mod session;

mod components {
    pub mod allowed_users;
    pub mod books;
    pub mod catalog_view;
    pub mod dashboard;
    pub mod fines;
    mod icons;
    pub mod layout;
    pub mod loans;
    pub mod login;
    pub mod my_fines;
    pub mod my_loans;
    pub mod profile;
    pub mod users;
}

// Browser plumbing: history-API router and the stale-response gate.
pub(crate) mod web {
    pub mod latest;
    pub mod route;
    pub mod router;
}

use leptos::prelude::*;

use crate::auth::RequireAuth;
use crate::components::allowed_users::AllowedUsersPage;
use crate::components::books::BooksPage;
use crate::components::catalog_view::CatalogPage;
use crate::components::dashboard::DashboardPage;
use crate::components::fines::FinesPage;
use crate::components::layout::{AdminLayout, UserLayout};
use crate::components::loans::LoansPage;
use crate::components::login::LoginPage;
use crate::components::my_fines::MyFinesPage;
use crate::components::my_loans::MyLoansPage;
use crate::components::profile::ProfilePage;
use crate::components::users::UsersPage;
use crate::session::SessionContext;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// The page for a route, without any access control.
fn page_for(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::AdminDashboard => {
            view! { <AdminLayout><DashboardPage /></AdminLayout> }.into_any()
        }
        AppRoute::AdminBooks => view! { <AdminLayout><BooksPage /></AdminLayout> }.into_any(),
        AppRoute::AdminUsers => view! { <AdminLayout><UsersPage /></AdminLayout> }.into_any(),
        AppRoute::AdminLoans => view! { <AdminLayout><LoansPage /></AdminLayout> }.into_any(),
        AppRoute::AdminFines => view! { <AdminLayout><FinesPage /></AdminLayout> }.into_any(),
        AppRoute::AdminAllowedUsers => {
            view! { <AdminLayout><AllowedUsersPage /></AdminLayout> }.into_any()
        }
        AppRoute::Profile => view! { <UserLayout><ProfilePage /></UserLayout> }.into_any(),
        AppRoute::Catalog => view! { <UserLayout><CatalogPage /></UserLayout> }.into_any(),
        AppRoute::MyLoans => view! { <UserLayout><MyLoansPage /></UserLayout> }.into_any(),
        AppRoute::MyFines => view! { <UserLayout><MyFinesPage /></UserLayout> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="min-h-screen flex items-center justify-center bg-amber-50">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-amber-700">"404"</h1>
                    <p class="text-xl mt-4 text-gray-600">"Página no encontrada"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

/// Maps the current route to its view.
///
/// The wrapping is driven by [`AppRoute::requires_auth`], so the route table
/// and the guard cannot drift: any route the predicate marks as protected is
/// wrapped in [`RequireAuth`], which re-verifies the stored token against the
/// backend before rendering. The page is built inside a closure so
/// `RequireAuth` can defer it until verification resolves.
fn route_matcher(route: AppRoute) -> AnyView {
    if route.requires_auth() {
        view! { <RequireAuth view=move || page_for(route) /> }.into_any()
    } else {
        page_for(route)
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. Session context: the only process-wide mutable state. Restored from
    //    LocalStorage once at startup (explicit serialize/restore boundary).
    let session_ctx = SessionContext::new();
    provide_context(session_ctx);
    session::restore(&session_ctx);

    // 2. Confirmation/alert capability, injected so controllers stay
    //    decoupled from the dialog widget.
    dialog::provide_window_prompter();

    view! {
        <Router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
