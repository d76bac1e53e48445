use std::{path::Path, sync::Arc};

use innbot_core::{config::Config, ports::RegistryPort};
use innbot_dadata::DadataClient;

#[tokio::main]
async fn main() -> Result<(), innbot_core::Error> {
    innbot_core::logging::init("innbot")?;

    // Missing or incomplete tokens.json is fatal; the bot never starts
    // partially configured.
    let cfg = Arc::new(Config::load(Path::new("tokens.json"))?);

    let registry: Arc<dyn RegistryPort> = Arc::new(DadataClient::new(cfg.dadata_api_token.clone()));

    innbot_telegram::router::run_polling(cfg, registry)
        .await
        .map_err(|e| innbot_core::Error::Transport(format!("telegram bot failed: {e}")))?;

    Ok(())
}
