//! Best-effort HTTP collaborators.
//!
//! - `food`: product image lookup by name
//! - `chat`: OpenAI-compatible `/chat/completions` text generation
//! - `suggest`: dish suggestions parsed from generated text
//!
//! None of these retry. The public entry points (`FoodImageClient::lookup`,
//! `DishSuggester::suggest`) log failures and return an empty result instead
//! of an error, so the caller never has to handle network failure.

use std::time::Duration;

mod chat;
mod food;
mod suggest;

pub use chat::{ChatCompletionsClient, TextGenerator};
pub use food::FoodImageClient;
pub use suggest::{build_prompt, parse_suggestions, DishSuggester, DishSuggestion};

/// Build an HTTP client with timeout applied.
pub(crate) fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Read a non-2xx response into [`crate::error::ApiError::Status`].
pub(crate) async fn status_error(response: reqwest::Response) -> crate::error::ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    crate::error::ApiError::Status(status, body)
}
