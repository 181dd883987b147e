//! Routing service (core engine).
//!
//! Wraps the web_sys History API with high cohesion: every operation on
//! `window.history` lives in this module. Authentication is deliberately not
//! the router's concern; guarded routes wrap their views in `RequireAuth`,
//! which re-verifies the token per navigation.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// Current browser path.
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Used for redirects, so the denied entry does not stay in history.
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Router service: owns the current-route signal and drives the UI from it.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
}

impl RouterService {
    fn new() -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);
        Self {
            current_route,
            set_route,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Pushes a new history entry and loads the route.
    pub fn navigate(&self, route: AppRoute) {
        push_history_state(route.to_path());
        self.set_route.set(route);
    }

    /// Replaces the current history entry; used by guard redirects.
    pub fn replace(&self, route: AppRoute) {
        replace_history_state(route.to_path());
        self.set_route.set(route);
    }

    /// Back/forward buttons re-enter through the same route signal, so the
    /// guard wrapper re-evaluates like any other navigation.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(AppRoute::from_path(&current_path()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Leak the closure to keep the listener alive.
        closure.forget();
    }
}

fn provide_router() -> RouterService {
    let router = RouterService::new();
    router.init_popstate_listener();
    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI components
// ============================================================================

/// Router root component; provides the routing context at the app root.
#[component]
pub fn Router(children: Children) -> impl IntoView {
    provide_router();
    children()
}

/// Renders the view matching the current route.
#[component]
pub fn RouterOutlet(
    /// Route matching function: current route in, view out.
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
