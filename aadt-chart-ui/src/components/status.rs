//! Loading and error banners.

use crate::state::AppState;
use dioxus::prelude::*;

/// Shown while the station layer is being parsed.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
            "Loading count stations..."
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Offer a button that clears `AppState::error_msg`
    #[props(default = false)]
    pub dismissable: bool,
}

/// Displays an error message in a styled box.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let mut state = use_context::<AppState>();
    let on_dismiss = move |_: Event<MouseData>| {
        state.error_msg.set(None);
    };

    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            strong { "Error: " }
            "{props.message}"
            if props.dismissable {
                button {
                    style: "margin-left: 12px;",
                    onclick: on_dismiss,
                    "Dismiss"
                }
            }
        }
    }
}
