use async_trait::async_trait;

use crate::{
    domain::{ChatId, CompanyInfo},
    Result,
};

/// Outbound messaging port.
///
/// Telegram is the first implementation; the shape is small enough that other
/// messengers can fit behind the same interface.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()>;
}

/// Company-registry lookup port (one request per INN).
///
/// `Ok(None)` means the registry answered but knows no such company.
#[async_trait]
pub trait RegistryPort: Send + Sync {
    async fn find_party(&self, inn: &str) -> Result<Option<CompanyInfo>>;
}
