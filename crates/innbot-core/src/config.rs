use std::{fs, path::Path};

use serde::Deserialize;

use crate::{errors::Error, Result};

/// Startup secrets, read from a local `tokens.json`.
///
/// Both tokens are required; the process refuses to start without them.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    pub dadata_api_token: String,
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(rename = "TelegramBotToken")]
    telegram_bot_token: Option<String>,
    #[serde(rename = "DaDataApiToken")]
    dadata_api_token: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        let raw: RawConfig = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))?;

        Ok(Self {
            telegram_bot_token: required(raw.telegram_bot_token, "TelegramBotToken")?,
            dadata_api_token: required(raw.dadata_api_token, "DaDataApiToken")?,
        })
    }
}

fn required(value: Option<String>, key: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Config(format!("{key} is required in tokens.json"))),
    }
}
