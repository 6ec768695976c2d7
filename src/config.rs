use std::path::PathBuf;

use thiserror::Error;

pub const TOKEN_VAR: &str = "TELOXIDE_TOKEN";
pub const BANK_PATH_VAR: &str = "QUIZ_BANK_PATH";
pub const EVENT_LOG_VAR: &str = "QUIZ_EVENT_LOG";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{var} must be `on` or `off`, got `{value}`")]
    InvalidSwitch { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON question bank to use instead of the built-in one.
    pub bank_path: Option<PathBuf>,
    pub event_log: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // The token itself is read by `Bot::from_env`, we only fail early here
        if lookup(TOKEN_VAR).map_or(true, |token| token.trim().is_empty()) {
            return Err(ConfigError::Missing(TOKEN_VAR));
        }

        let bank_path = lookup(BANK_PATH_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let event_log = match lookup(EVENT_LOG_VAR) {
            None => true,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "" | "on" | "true" | "1" => true,
                "off" | "false" | "0" => false,
                _ => {
                    return Err(ConfigError::InvalidSwitch {
                        var: EVENT_LOG_VAR,
                        value,
                    })
                }
            },
        };

        Ok(Self {
            bank_path,
            event_log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_with_only_a_token() {
        let config = Config::from_lookup(lookup(&[(TOKEN_VAR, "123:abc")])).unwrap();
        assert_eq!(
            config,
            Config {
                bank_path: None,
                event_log: true
            }
        );
    }

    #[test]
    fn missing_token_is_reported() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(TOKEN_VAR)));
    }

    #[test]
    fn reads_bank_path_and_log_switch() {
        let config = Config::from_lookup(lookup(&[
            (TOKEN_VAR, "123:abc"),
            (BANK_PATH_VAR, "questions.json"),
            (EVENT_LOG_VAR, "OFF"),
        ]))
        .unwrap();
        assert_eq!(config.bank_path, Some(PathBuf::from("questions.json")));
        assert!(!config.event_log);
    }

    #[test]
    fn rejects_unknown_switch_value() {
        let err = Config::from_lookup(lookup(&[(TOKEN_VAR, "t"), (EVENT_LOG_VAR, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSwitch { .. }));
    }
}
