use axum::http::StatusCode;
use maud::{html, Markup, PreEscaped, DOCTYPE};

pub const INPUT_CLASS: &str = "w-full rounded border border-gray-500 px-2 py-1 text-lg";
pub const BUTTON_CLASS: &str = "rounded bg-blue-500 py-2 px-4 text-white hover:bg-blue-600 focus:bg-blue-400 disabled:bg-blue-300";

// The submitter is disabled on the next tick: disabling it inside the submit
// event would drop its `_action` value from the form data.
const BUSY_SCRIPT: &str = r#"
document.addEventListener("submit", (event) => {
  const button = event.submitter;
  if (!button || !button.dataset.busyLabel) return;
  button.textContent = button.dataset.busyLabel;
  setTimeout(() => { button.disabled = true; });
});
"#;

pub fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                (content)
                script { (PreEscaped(BUSY_SCRIPT)) }
            }
        }
    }
}

/// Inline message next to a form field.
pub fn field_error(error: Option<&str>) -> Markup {
    html! {
        @if let Some(error) = error {
            em class="text-red-600" { (error) }
        }
    }
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
    layout(
        status.canonical_reason().unwrap_or("Error"),
        html! {
            main {
                h1 { (status.as_u16()) " " (status.canonical_reason().unwrap_or("Error")) }
                pre { (message) }
                p { a href=(crate::blog::ADMIN_POSTS_PATH) { "Back to posts" } }
            }
        },
    )
}
