//! Authentication flows and the route guard.
//!
//! The guard is a three-state machine evaluated once per guarded navigation:
//! no stored token short-circuits to `Unauthenticated` without touching the
//! network; otherwise the token is verified against the backend and every
//! failure mode (invalid, non-2xx, network error) collapses to
//! `Unauthenticated`. Local token presence alone never grants access.

use biblioteca_shared::Role;
use biblioteca_shared::protocol::{
    CheckAllowedRequest, LoginRequest, RegisterRequest, VerifyTokenRequest, VerifyTokenResponse,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiError, LibraryApi, backend_url};
use crate::session::{self, Session, SessionContext, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

// =========================================================
// Guard state machine
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Verification request outstanding; render a neutral loading indicator.
    Pending,
    Authenticated,
    Unauthenticated,
}

impl GuardState {
    /// First transition: decided locally, before any network traffic.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(t) if !t.is_empty() => GuardState::Pending,
            _ => GuardState::Unauthenticated,
        }
    }

    /// Second transition: outcome of the backend verification. Network
    /// failures and explicit invalidity are deliberately indistinguishable.
    pub fn from_verification(result: Result<VerifyTokenResponse, ApiError>) -> Self {
        match result {
            Ok(VerifyTokenResponse { valid: true }) => GuardState::Authenticated,
            _ => GuardState::Unauthenticated,
        }
    }
}

/// Wraps a guarded view. Evaluates the guard on mount, shows the loading
/// indicator while pending, and replaces the history entry with the login
/// page when the guard denies access.
#[component]
pub fn RequireAuth(#[prop(into)] view: ViewFn) -> impl IntoView {
    let session_ctx = use_session();
    let router = use_router();

    let token = session_ctx.token();
    let (state, set_state) = signal(GuardState::from_token(token.as_deref()));

    if state.get_untracked() == GuardState::Pending {
        let api = session_ctx.api();
        spawn_local(async move {
            let result = api.send(&VerifyTokenRequest).await;
            set_state.set(GuardState::from_verification(result));
        });
    }

    Effect::new(move |_| {
        if state.get() == GuardState::Unauthenticated {
            web_sys::console::log_1(&"[Guard] Access denied. Redirecting to login.".into());
            router.replace(AppRoute::Login);
        }
    });

    move || match state.get() {
        GuardState::Pending => view! {
            <div class="min-h-screen flex items-center justify-center text-gray-600">
                "Cargando..."
            </div>
        }
        .into_any(),
        GuardState::Authenticated => view.run(),
        GuardState::Unauthenticated => ().into_any(),
    }
}

// =========================================================
// Login / logout
// =========================================================

/// Authenticates against the backend and persists the returned session.
/// Returns the role so the caller can route to the right landing page.
pub async fn login(
    ctx: &SessionContext,
    username: String,
    password: String,
) -> Result<Role, ApiError> {
    // Login is the one unauthenticated call: no bearer token yet.
    let api = LibraryApi::new(backend_url(), None);
    let response = api.send(&LoginRequest { username, password }).await?;

    let role = response.role;
    session::persist(
        ctx,
        Session {
            token: response.token,
            display_name: response.display_name,
            email: response.email,
            role,
        },
    );
    Ok(role)
}

/// Clears the session; the caller navigates back to the login page.
pub fn logout(ctx: &SessionContext) {
    session::clear(ctx);
}

// =========================================================
// Self-registration
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterError {
    /// The allow-list check answered 403: the applicant is not pre-approved.
    NotAllowed,
    Other(String),
}

impl RegisterError {
    fn from_check(err: ApiError) -> Self {
        if err.is_not_allowed() {
            RegisterError::NotAllowed
        } else {
            RegisterError::Other(err.to_string())
        }
    }
}

/// Registers a new patron: the allow-list is consulted first, and only a
/// pre-approved applicant reaches the register endpoint.
pub async fn register(form: RegisterRequest) -> Result<(), RegisterError> {
    let api = LibraryApi::new(backend_url(), None);

    api.send(&CheckAllowedRequest {
        email: form.email.clone(),
        national_id: form.national_id.clone(),
    })
    .await
    .map_err(RegisterError::from_check)?;

    api.send(&form)
        .await
        .map(|_| ())
        .map_err(|e| RegisterError::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_token_denies_synchronously() {
        // Guard property: an empty session never reaches the network.
        assert_eq!(GuardState::from_token(None), GuardState::Unauthenticated);
        assert_eq!(
            GuardState::from_token(Some("")),
            GuardState::Unauthenticated
        );
    }

    #[test]
    fn present_token_is_pending_until_verified() {
        assert_eq!(GuardState::from_token(Some("tok")), GuardState::Pending);
    }

    #[test]
    fn backend_validity_decides_the_final_state() {
        assert_eq!(
            GuardState::from_verification(Ok(VerifyTokenResponse { valid: true })),
            GuardState::Authenticated
        );
        assert_eq!(
            GuardState::from_verification(Ok(VerifyTokenResponse { valid: false })),
            GuardState::Unauthenticated
        );
    }

    #[test]
    fn every_verification_failure_is_unauthenticated() {
        let cases = [
            ApiError::Network("offline".into()),
            ApiError::Client {
                status: 401,
                message: None,
            },
            ApiError::Server { status: 500 },
        ];
        for err in cases {
            assert_eq!(
                GuardState::from_verification(Err(err)),
                GuardState::Unauthenticated
            );
        }
    }

    #[test]
    fn only_forbidden_check_maps_to_not_allowed() {
        let forbidden = ApiError::Client {
            status: 403,
            message: Some("no está en la lista".into()),
        };
        assert_eq!(
            RegisterError::from_check(forbidden),
            RegisterError::NotAllowed
        );

        let conflict = ApiError::Client {
            status: 409,
            message: Some("ya existe".into()),
        };
        assert!(matches!(
            RegisterError::from_check(conflict),
            RegisterError::Other(_)
        ));
    }
}
