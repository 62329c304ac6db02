//! Default configuration constants.
//!
//! These replace what used to be module-level constants in the app (playlist,
//! API endpoints) so callers pass them explicitly into constructors.

/// Embedded default `pantry.toml` template written by `pantry init`.
pub(super) const DEFAULT_PANTRY_CONFIG_TEMPLATE: &str = include_str!("../templates/pantry.toml");
/// Seconds between timer-driven background rotations.
pub(super) const DEFAULT_ROTATION_SECS: u64 = 10;
/// Open Food Facts–compatible search endpoint for product images.
pub(super) const DEFAULT_FOOD_BASE_URL: &str = "https://world.openfoodfacts.org";
/// OpenAI-compatible API base URL used for dish suggestions.
pub(super) const DEFAULT_SUGGEST_BASE_URL: &str = "https://api.openai.com/v1";
/// Model used for dish suggestions.
pub(super) const DEFAULT_SUGGEST_MODEL: &str = "gpt-4o-mini";
/// Env var consulted for the suggestion API key when none is set inline.
pub(super) const DEFAULT_SUGGEST_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Request timeout for both network collaborators.
pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Background videos shown behind the home screen.
pub(super) fn default_playlist() -> Vec<String> {
    [
        "https://media.example.com/pantry/backgrounds/farmers-market.mp4",
        "https://media.example.com/pantry/backgrounds/chopping-vegetables.mp4",
        "https://media.example.com/pantry/backgrounds/bread-oven.mp4",
        "https://media.example.com/pantry/backgrounds/fruit-stand.mp4",
        "https://media.example.com/pantry/backgrounds/spice-rack.mp4",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
