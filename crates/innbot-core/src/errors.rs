/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the bot core
/// can handle failures consistently (per-item outcome vs fatal startup).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
