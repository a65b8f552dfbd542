//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, SECRET_CONFIG_KEYS, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    set_value(&mut config, key, value)?;
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key, display_value(key, value)));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;
    match get_value(&config, key) {
        Some(v) => presenter.output(&display_value(key, &v)),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = get_value(&config, key)
            .map(|v| display_value(key, &v))
            .unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim().to_string();
    match key {
        "supabase_url" => config.supabase_url = Some(value.trim_end_matches('/').to_string()),
        "supabase_key" => config.supabase_key = Some(value),
        "gemini_api_key" => config.gemini_api_key = Some(value),
        "openai_api_key" => config.openai_api_key = Some(value),
        "user_id" => config.user_id = Some(value),
        "transcription_model" => config.transcription_model = Some(value),
        "summary_model" => config.summary_model = Some(value),
        "notify" => config.notify = Some(parse_bool_for(key, &value)?),
        _ => return ensure_known_key(key),
    }
    Ok(())
}

fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "supabase_url" => config.supabase_url.clone(),
        "supabase_key" => config.supabase_key.clone(),
        "gemini_api_key" => config.gemini_api_key.clone(),
        "openai_api_key" => config.openai_api_key.clone(),
        "user_id" => config.user_id.clone(),
        "transcription_model" => config.transcription_model.clone(),
        "summary_model" => config.summary_model.clone(),
        "notify" => config.notify.map(|b| b.to_string()),
        _ => None,
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: &str| ConfigError::ValidationError {
        key: key.to_string(),
        message: message.to_string(),
    };

    match key {
        "supabase_url" => {
            if !(value.starts_with("https://") || value.starts_with("http://")) {
                return Err(invalid("Value must be an http(s) URL"));
            }
        }
        "notify" => {
            parse_bool_for(key, value)?;
        }
        _ => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty"));
            }
        }
    }
    Ok(())
}

fn parse_bool_for(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be 'true' or 'false'".to_string(),
    })
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

fn display_value(key: &str, value: &str) -> String {
    if SECRET_CONFIG_KEYS.contains(&key) {
        mask_secret(value)
    } else {
        value.to_string()
    }
}

/// Mask a secret for display (show first 4 and last 4 chars)
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("NO"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn mask_secret_long() {
        assert_eq!(mask_secret("sk-abcdefghijklmnop"), "sk-a...mnop");
    }

    #[test]
    fn mask_secret_short() {
        assert_eq!(mask_secret("short"), "*****");
    }

    #[test]
    fn only_secrets_are_masked() {
        assert_eq!(display_value("user_id", "1234567890abc"), "1234567890abc");
        assert_eq!(display_value("openai_api_key", "1234567890abc"), "1234...0abc");
    }

    #[test]
    fn validate_url() {
        assert!(validate_config_value("supabase_url", "https://x.supabase.co").is_ok());
        assert!(validate_config_value("supabase_url", "x.supabase.co").is_err());
    }

    #[test]
    fn validate_rejects_blank() {
        assert!(validate_config_value("user_id", "  ").is_err());
        assert!(validate_config_value("notify", "sometimes").is_err());
    }

    #[test]
    fn set_then_get_every_key() {
        let mut config = AppConfig::empty();
        for key in VALID_CONFIG_KEYS {
            let value = match *key {
                "supabase_url" => "https://x.supabase.co/",
                "notify" => "yes",
                _ => "value",
            };
            set_value(&mut config, key, value).unwrap();
            assert!(get_value(&config, key).is_some(), "{key} not stored");
        }
        assert_eq!(config.supabase_url.as_deref(), Some("https://x.supabase.co"));
        assert_eq!(config.notify, Some(true));
    }
}
