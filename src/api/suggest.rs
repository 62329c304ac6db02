//! Dish suggestions from a generative-text service.

use serde::{Deserialize, Serialize};

use super::TextGenerator;
use crate::error::ApiError;

/// One suggested dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishSuggestion {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Asks a [`TextGenerator`] for dishes that use the given ingredients.
#[derive(Debug, Clone)]
pub struct DishSuggester<G> {
    generator: G,
}

impl<G: TextGenerator> DishSuggester<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Suggested dishes, or an empty list when generation or parsing fails.
    pub async fn suggest(&self, ingredients: &[String]) -> Vec<DishSuggestion> {
        if ingredients.iter().all(|item| item.trim().is_empty()) {
            tracing::debug!("no ingredients given; skipping suggestion request");
            return Vec::new();
        }
        let prompt = build_prompt(ingredients);
        let reply = match self.generator.generate(&prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = %err, "dish suggestion request failed");
                return Vec::new();
            }
        };
        match parse_suggestions(&reply) {
            Ok(dishes) => dishes,
            Err(err) => {
                tracing::warn!(error = %err, "could not parse dish suggestions");
                Vec::new()
            }
        }
    }
}

/// Prompt asking for a JSON array of dishes.
pub fn build_prompt(ingredients: &[String]) -> String {
    let list = ingredients
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "I have these ingredients in my pantry: {list}.\n\
         Suggest up to 3 dishes I could cook with them. Respond with only a JSON \
         array where each element has the fields \"name\" (string), \
         \"description\" (one sentence) and \"ingredients\" (array of strings)."
    )
}

/// Parse generated text as a dish list.
///
/// Accepts a bare JSON array, an object with a `dishes` array, and either of
/// those wrapped in a Markdown code fence.
pub fn parse_suggestions(text: &str) -> Result<Vec<DishSuggestion>, ApiError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Reply {
        List(Vec<DishSuggestion>),
        Wrapped { dishes: Vec<DishSuggestion> },
    }

    let payload = strip_code_fence(text);
    if payload.is_empty() {
        return Err(ApiError::Decode("empty reply".to_string()));
    }
    let dishes = match serde_json::from_str::<Reply>(payload)? {
        Reply::List(dishes) | Reply::Wrapped { dishes } => dishes,
    };
    Ok(dishes
        .into_iter()
        .filter(|dish| !dish.name.trim().is_empty())
        .collect())
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening fence line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Canned {
        reply: Result<String, ()>,
        prompts: Mutex<Vec<String>>,
    }

    impl Canned {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .clone()
                .map_err(|_| ApiError::Status(502, "bad gateway".to_string()))
        }
    }

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn suggest_parses_fenced_reply() {
        let reply = "```json\n[{\"name\":\"Omelette\",\"description\":\"Eggs, folded.\",\"ingredients\":[\"eggs\",\"cheese\"]}]\n```";
        let suggester = DishSuggester::new(Canned::ok(reply));
        let dishes = suggester.suggest(&items(&["eggs", "cheese"])).await;
        assert_eq!(
            dishes,
            vec![DishSuggestion {
                name: "Omelette".to_string(),
                description: "Eggs, folded.".to_string(),
                ingredients: items(&["eggs", "cheese"]),
            }]
        );
        let prompts = suggester.generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("eggs, cheese"), "got: {}", prompts[0]);
    }

    #[tokio::test]
    async fn suggest_fails_soft_on_request_error() {
        let suggester = DishSuggester::new(Canned::failing());
        assert!(suggester.suggest(&items(&["rice"])).await.is_empty());
    }

    #[tokio::test]
    async fn suggest_fails_soft_on_prose_reply() {
        let suggester = DishSuggester::new(Canned::ok("Sure! You could make fried rice."));
        assert!(suggester.suggest(&items(&["rice"])).await.is_empty());
    }

    #[tokio::test]
    async fn suggest_skips_request_without_ingredients() {
        let suggester = DishSuggester::new(Canned::ok("[]"));
        assert!(suggester.suggest(&items(&["  "])).await.is_empty());
        assert!(suggester.generator.prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn parse_accepts_wrapped_object_and_drops_nameless_entries() {
        let dishes =
            parse_suggestions(r#"{"dishes":[{"name":"Soup"},{"name":"  "}]}"#).expect("parse");
        assert_eq!(dishes.len(), 1);
        assert_eq!(dishes[0].name, "Soup");
        assert!(dishes[0].ingredients.is_empty());
    }

    #[test]
    fn parse_rejects_empty_reply() {
        assert!(parse_suggestions("   ").is_err());
        assert!(parse_suggestions("```\n```").is_err());
    }
}
