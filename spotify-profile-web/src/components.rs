use leptos::{IntoView, component, prelude::*};

use crate::html;

pub(crate) fn button_class() -> &'static str {
    "flex gap-2 justify-center items-center py-2 px-4 bg-green-600 rounded cursor-pointer transition-colors hover:bg-green-700"
}

pub(crate) struct TrackDuration {
    pub minutes: u64,
    pub seconds: u64,
}

impl std::fmt::Display for TrackDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

pub(crate) fn parse_duration(duration_ms: u64) -> TrackDuration {
    let total_seconds = duration_ms / 1000;

    TrackDuration {
        minutes: total_seconds / 60,
        seconds: total_seconds % 60,
    }
}

/// Full-width error line for hard failures inside a partial.
#[component]
pub(crate) fn error_message(message: String) -> impl IntoView {
    html! { <p class="py-8 w-full text-center text-red-400">{message}</p> }
}

/// Inline indicator shown while htmx swaps in latest data.
#[component]
pub(crate) fn loading_indicator(id: &'static str) -> impl IntoView {
    html! {
        <span id=id class="htmx-indicator text-sm text-gray-400">
            "Loading latest data..."
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formats_as_minutes_and_padded_seconds() {
        assert_eq!(parse_duration(259_733).to_string(), "4:19");
        assert_eq!(parse_duration(61_000).to_string(), "1:01");
        assert_eq!(parse_duration(999).to_string(), "0:00");
    }
}
