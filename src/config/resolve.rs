//! Turn the file-level config into the runtime [`Config`].

use crate::error::ConfigError;
use crate::host::Appearance;
use crate::ui::theme::PaletteSet;

use super::types::{FileConfig, SuggestConfig, ThemeConfig};
use super::Config;

pub(super) fn resolve_config_from_file_config<FEnv>(
    parsed: FileConfig,
    env_lookup: &FEnv,
) -> Result<Config, ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if parsed.media.rotation_secs == 0 {
        return Err(ConfigError::Invalid(
            "media.rotation_secs must be at least 1".to_string(),
        ));
    }
    if parsed.media.playlist.iter().all(|item| item.trim().is_empty()) {
        return Err(ConfigError::Invalid(
            "media.playlist must list at least one resource".to_string(),
        ));
    }
    if parsed.network.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "network.timeout_secs must be at least 1".to_string(),
        ));
    }

    let palettes = PaletteSet::from_overrides(&parsed.theme.light, &parsed.theme.dark)
        .map_err(ConfigError::Invalid)?;

    // An inline key wins over the env var named by `api_key_env`.
    let suggest = parsed.suggest;
    let api_key = if !suggest.api_key.trim().is_empty() {
        suggest.api_key.trim().to_string()
    } else {
        suggest
            .api_key_env
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .and_then(env_lookup)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    };

    Ok(Config {
        theme: ThemeConfig {
            appearance: Appearance::parse(&parsed.theme.appearance),
            palettes,
        },
        media: parsed.media,
        food: parsed.food,
        suggest: SuggestConfig {
            base_url: suggest.base_url.trim_end_matches('/').to_string(),
            model: suggest.model,
            api_key,
            temperature: suggest.temperature,
        },
        network: parsed.network,
        display: parsed.display,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::{Palette, ThemeColor};

    fn parse(text: &str) -> FileConfig {
        toml::from_str(text).expect("valid toml")
    }

    #[test]
    fn api_key_comes_from_named_env_var() {
        let parsed = parse("[suggest]\napi_key_env = \"MY_KEY\"\n");
        let config = resolve_config_from_file_config(parsed, &|name: &str| {
            (name == "MY_KEY").then(|| "secret".to_string())
        })
        .unwrap();
        assert_eq!(config.suggest.api_key, "secret");
    }

    #[test]
    fn inline_api_key_wins() {
        let parsed = parse("[suggest]\napi_key = \"inline\"\n");
        let config =
            resolve_config_from_file_config(parsed, &|_: &str| Some("env".to_string())).unwrap();
        assert_eq!(config.suggest.api_key, "inline");
    }

    #[test]
    fn theme_section_resolves_palettes_and_appearance() {
        let parsed = parse(
            "[theme]\nappearance = \"dark\"\n[theme.dark]\nbackground = \"#000000\"\n",
        );
        let config = resolve_config_from_file_config(parsed, &|_: &str| None).unwrap();
        assert_eq!(config.theme.appearance, Appearance::Dark);
        assert_eq!(config.theme.palettes.dark.background, ThemeColor::rgb(0, 0, 0));
        assert_eq!(config.theme.palettes.light, Palette::LIGHT);
    }

    #[test]
    fn bad_palette_value_is_invalid_config() {
        let parsed = parse("[theme.light]\ntext = \"mauve-ish\"\n");
        let err = resolve_config_from_file_config(parsed, &|_: &str| None).expect_err("bad color");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_rotation_is_invalid_config() {
        let parsed = parse("[media]\nrotation_secs = 0\n");
        let err = resolve_config_from_file_config(parsed, &|_: &str| None).expect_err("zero");
        assert!(err.to_string().contains("rotation_secs"));
    }

    #[test]
    fn empty_playlist_is_invalid_config() {
        for text in ["[media]\nplaylist = []\n", "[media]\nplaylist = [\"  \"]\n"] {
            let err = resolve_config_from_file_config(parse(text), &|_: &str| None)
                .expect_err("empty playlist");
            assert!(matches!(err, ConfigError::Invalid(_)), "got: {err}");
            assert!(err.to_string().contains("media.playlist"));
        }
    }
}
