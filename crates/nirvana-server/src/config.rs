use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use nirvana_classifier::{ClassifierConfig, DEFAULT_ENDPOINT};

pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub db_timeout: Duration,
    pub author: String,
    pub classifier: ClassifierConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_token = lookup("NIRVANA_CLASSIFIER_TOKEN").filter(|t| !t.is_empty());
        if api_token.is_none() {
            warn!("NIRVANA_CLASSIFIER_TOKEN is unset; classifier requests go out unauthenticated");
        }

        Ok(Self {
            host: lookup("NIRVANA_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "NIRVANA_PORT", 8000)?,
            db_path: lookup("NIRVANA_DB_PATH")
                .unwrap_or_else(|| "nirvana.db".into())
                .into(),
            db_timeout: Duration::from_secs(parse_or(&lookup, "NIRVANA_DB_TIMEOUT_SECS", 5)?),
            author: lookup("NIRVANA_AUTHOR").unwrap_or_else(|| "anonymous".into()),
            classifier: ClassifierConfig {
                endpoint: lookup("NIRVANA_CLASSIFIER_URL")
                    .unwrap_or_else(|| DEFAULT_ENDPOINT.into()),
                api_token,
                timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "NIRVANA_CLASSIFIER_TIMEOUT_SECS",
                    15,
                )?),
            },
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("invalid {key} value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.db_path, PathBuf::from("nirvana.db"));
        assert_eq!(config.db_timeout, Duration::from_secs(5));
        assert_eq!(config.author, "anonymous");
        assert_eq!(config.classifier.endpoint, DEFAULT_ENDPOINT);
        assert!(config.classifier.api_token.is_none());
        assert_eq!(config.classifier.timeout, Duration::from_secs(15));
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let config = load(&[
            ("NIRVANA_PORT", "9100"),
            ("NIRVANA_AUTHOR", "moderator"),
            ("NIRVANA_CLASSIFIER_TOKEN", "hf_abc"),
            ("NIRVANA_CLASSIFIER_URL", "http://localhost:9000/classify"),
        ])
        .unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.author, "moderator");
        assert_eq!(config.classifier.api_token.as_deref(), Some("hf_abc"));
        assert_eq!(config.classifier.endpoint, "http://localhost:9000/classify");
    }

    #[test]
    fn empty_token_counts_as_unset() {
        let config = load(&[("NIRVANA_CLASSIFIER_TOKEN", "")]).unwrap();
        assert!(config.classifier.api_token.is_none());
    }

    #[test]
    fn bad_number_names_the_variable() {
        let err = load(&[("NIRVANA_PORT", "eighty")]).err().unwrap();
        assert!(err.to_string().contains("NIRVANA_PORT"));
    }
}
