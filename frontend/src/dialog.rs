//! Confirmation/alert capability.
//!
//! View controllers talk to a [`Prompter`] injected through Context, not to a
//! concrete dialog widget. The production implementation wraps the native
//! `window.confirm` / `window.alert` modals; declining a confirmation must
//! result in no network call, which callers get for free by gating the
//! request on the returned bool.

use leptos::prelude::*;
use std::sync::Arc;

pub trait Prompter {
    /// Blocking yes/no prompt. `false` both on decline and when no window is
    /// available (e.g. native test runs).
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

/// Native browser modals.
pub struct WindowPrompter;

impl Prompter for WindowPrompter {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .map(|w| w.confirm_with_message(message).unwrap_or(false))
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

#[derive(Clone)]
pub struct PrompterContext(Arc<dyn Prompter + Send + Sync>);

impl PrompterContext {
    pub fn confirm(&self, message: &str) -> bool {
        self.0.confirm(message)
    }

    pub fn alert(&self, message: &str) {
        self.0.alert(message);
    }
}

pub fn provide_window_prompter() {
    provide_context(PrompterContext(Arc::new(WindowPrompter)));
}

pub fn use_prompter() -> PrompterContext {
    use_context::<PrompterContext>().expect("PrompterContext should be provided")
}
