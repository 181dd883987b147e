//! Login page with the self-registration dialog.

use biblioteca_shared::protocol::RegisterRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::icons::BookIcon;
use crate::api::ApiError;
use crate::auth::{self, RegisterError};
use crate::dialog::use_prompter;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Guidance shown when the allow-list check rejects the applicant. Kept
/// distinct from generic registration failures on purpose.
const NOT_ALLOWED_MESSAGE: &str = "No te encuentras en la lista de usuarios permitidos del \
     sistema. Por favor, contacta a soportebibliotecajumali@gmail.com exponiendo tu caso.";

const LOGIN_FAILED_MESSAGE: &str =
    "Error al iniciar sesión. Por favor, verifica tus credenciales.";

/// Error text for the login banner. The backend's own message (bad
/// credentials, blocked account) is shown when there is one; only a failure
/// with no response falls back to the generic credentials hint.
fn login_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Network(_) => LOGIN_FAILED_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

/// Registration form state, grouped so reset and validation live in one
/// place instead of being scattered over loose signals.
#[derive(Clone, Copy)]
struct RegisterFormState {
    full_name: RwSignal<String>,
    email: RwSignal<String>,
    national_id: RwSignal<String>,
    phone: RwSignal<String>,
    password: RwSignal<String>,
}

impl RegisterFormState {
    fn new() -> Self {
        Self {
            full_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            national_id: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.full_name.set(String::new());
        self.email.set(String::new());
        self.national_id.set(String::new());
        self.phone.set(String::new());
        self.password.set(String::new());
    }

    /// Pre-submission validation: name of the first empty field, if any.
    /// Nothing is sent while this returns `Some`.
    fn first_missing_field(&self) -> Option<&'static str> {
        let fields: [(&'static str, String); 5] = [
            ("nombre completo", self.full_name.get_untracked()),
            ("correo electrónico", self.email.get_untracked()),
            ("cédula", self.national_id.get_untracked()),
            ("teléfono", self.phone.get_untracked()),
            ("contraseña", self.password.get_untracked()),
        ];
        fields
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
    }

    fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            full_name: self.full_name.get_untracked(),
            email: self.email.get_untracked(),
            national_id: self.national_id.get_untracked(),
            phone: self.phone.get_untracked(),
            password: self.password.get_untracked(),
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session_ctx = use_session();
    let router = use_router();
    let prompter = use_prompter();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (show_register, set_show_register) = signal(false);
    let form = RegisterFormState::new();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if username.get().trim().is_empty() || password.get().trim().is_empty() {
            set_error_msg.set(Some("Por favor, completa todos los campos".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match auth::login(&session_ctx, username.get_untracked(), password.get_untracked())
                .await
            {
                Ok(role) => router.navigate(AppRoute::landing_for(role)),
                Err(err) => set_error_msg.set(Some(login_error_message(&err))),
            }
            set_is_submitting.set(false);
        });
    };

    let on_register = {
        let prompter = prompter.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if let Some(field) = form.first_missing_field() {
                prompter.alert(&format!("Por favor, completa el campo {}", field));
                return;
            }

            let prompter = prompter.clone();
            spawn_local(async move {
                match auth::register(form.to_request()).await {
                    Ok(()) => {
                        prompter.alert(
                            "¡Registro exitoso! Por favor, inicia sesión con tus credenciales",
                        );
                        form.reset();
                        set_show_register.set(false);
                    }
                    Err(RegisterError::NotAllowed) => prompter.alert(NOT_ALLOWED_MESSAGE),
                    Err(RegisterError::Other(msg)) => {
                        prompter.alert(&format!("Error en el registro: {}", msg))
                    }
                }
            });
        }
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-gradient-to-br from-amber-50 to-orange-100 p-4">
            <div class="w-full max-w-sm">
                <div class="bg-white rounded-3xl shadow-lg overflow-hidden">
                    <div class="bg-gradient-to-r text-center from-amber-700 to-orange-800 p-6">
                        <BookIcon class="w-12 h-12 mx-auto text-amber-100" />
                        <h2 class="text-2xl font-bold text-white">"Sistema Bibliotecario"</h2>
                        <h2 class="text-2xl font-bold text-white">"JUMALI"</h2>
                        <p class="text-amber-100 mt-1 text-sm">"Gestión y Control de Recursos"</p>
                    </div>

                    <Show
                        when=move || !show_register.get()
                        fallback=move || {
                            let on_register = on_register.clone();
                            view! {
                                <form class="p-6 space-y-4" on:submit=on_register>
                                    <h3 class="text-lg font-semibold text-gray-800">"Registro de Usuario"</h3>
                                    <input
                                        type="text"
                                        placeholder="Nombre completo"
                                        class="w-full p-3 bg-amber-50/50 border border-amber-200 rounded-lg"
                                        prop:value=form.full_name
                                        on:input=move |ev| form.full_name.set(event_target_value(&ev))
                                    />
                                    <input
                                        type="email"
                                        placeholder="Correo electrónico"
                                        class="w-full p-3 bg-amber-50/50 border border-amber-200 rounded-lg"
                                        prop:value=form.email
                                        on:input=move |ev| form.email.set(event_target_value(&ev))
                                    />
                                    <input
                                        type="text"
                                        placeholder="Cédula"
                                        class="w-full p-3 bg-amber-50/50 border border-amber-200 rounded-lg"
                                        prop:value=form.national_id
                                        on:input=move |ev| form.national_id.set(event_target_value(&ev))
                                    />
                                    <input
                                        type="text"
                                        placeholder="Teléfono"
                                        class="w-full p-3 bg-amber-50/50 border border-amber-200 rounded-lg"
                                        prop:value=form.phone
                                        on:input=move |ev| form.phone.set(event_target_value(&ev))
                                    />
                                    <input
                                        type="password"
                                        placeholder="Contraseña"
                                        class="w-full p-3 bg-amber-50/50 border border-amber-200 rounded-lg"
                                        prop:value=form.password
                                        on:input=move |ev| form.password.set(event_target_value(&ev))
                                    />
                                    <button
                                        type="submit"
                                        class="w-full py-3 rounded-lg text-sm font-medium text-white bg-gradient-to-r from-amber-600 to-orange-700 hover:from-amber-700 hover:to-orange-800"
                                    >
                                        "Registrarse"
                                    </button>
                                    <button
                                        type="button"
                                        on:click=move |_| set_show_register.set(false)
                                        class="w-full py-2 text-amber-700 hover:text-amber-600 text-sm"
                                    >
                                        "Volver al inicio de sesión"
                                    </button>
                                </form>
                            }
                        }
                    >
                        <form class="p-6" on:submit=on_submit>
                            <Show when=move || error_msg.get().is_some()>
                                <div class="mb-4 bg-red-50 text-red-600 p-3 rounded-lg text-sm border border-red-200">
                                    {move || error_msg.get().unwrap_or_default()}
                                </div>
                            </Show>

                            <div class="mb-6">
                                <label class="block text-gray-700 text-sm font-semibold mb-2">
                                    "Nombre de Usuario"
                                </label>
                                <input
                                    type="text"
                                    placeholder="Ingresa tu usuario"
                                    class="w-full py-3 px-4 bg-amber-50/50 text-gray-700 border border-amber-200 rounded-lg"
                                    prop:value=username
                                    on:input=move |ev| set_username.set(event_target_value(&ev))
                                />
                            </div>
                            <div class="mb-6">
                                <label class="block text-gray-700 text-sm font-semibold mb-2">
                                    "Contraseña"
                                </label>
                                <input
                                    type="password"
                                    placeholder="Ingresa tu contraseña"
                                    class="w-full py-3 px-4 bg-amber-50/50 text-gray-700 border border-amber-200 rounded-lg"
                                    prop:value=password
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                />
                            </div>

                            <button
                                type="submit"
                                disabled=move || is_submitting.get()
                                class="w-full py-3 rounded-lg text-sm font-medium text-white bg-gradient-to-r from-amber-600 to-orange-700 hover:from-amber-700 hover:to-orange-800 disabled:opacity-70"
                            >
                                {move || if is_submitting.get() { "Procesando..." } else { "Iniciar Sesión" }}
                            </button>

                            <div class="mt-4 text-center">
                                <button
                                    type="button"
                                    on:click=move |_| set_show_register.set(true)
                                    class="text-amber-700 hover:text-amber-600 text-xs font-medium"
                                >
                                    "¿No tienes cuenta? Regístrate"
                                </button>
                            </div>
                        </form>
                    </Show>

                    <div class="px-6 py-4 bg-amber-50/50 border-t border-amber-100">
                        <p class="text-xs text-gray-600 text-center">"© 2025 Sistema Bibliotecario"</p>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_login_message_is_shown_verbatim() {
        let blocked = ApiError::Client {
            status: 403,
            message: Some("Tu cuenta está bloqueada".into()),
        };
        assert_eq!(
            login_error_message(&blocked),
            "Tu cuenta está bloqueada (403)"
        );

        let rejected = ApiError::Client {
            status: 401,
            message: None,
        };
        assert_eq!(login_error_message(&rejected), "Error en la solicitud (401)");
    }

    #[test]
    fn network_failure_falls_back_to_the_credentials_hint() {
        let offline = ApiError::Network("offline".into());
        assert_eq!(login_error_message(&offline), LOGIN_FAILED_MESSAGE);
    }
}
