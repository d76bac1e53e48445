use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use innbot_core::{
    config::Config,
    dispatch,
    domain::ChatId,
    ports::{MessagingPort, RegistryPort},
    session::SessionStore,
};

use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<dispatch::Dispatcher>,
}

/// Start long polling and run until shutdown (ctrl-c).
pub async fn run_polling(cfg: Arc<Config>, registry: Arc<dyn RegistryPort>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!("innbot started: @{}", me.username()),
        Err(e) => tracing::warn!("get_me failed: {e}"),
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState {
        dispatcher: Arc::new(dispatch::Dispatcher::new(
            SessionStore::new(),
            registry,
            messenger,
        )),
    });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    // Failures here (send errors included) are logged and the update is
    // considered handled; the polling loop keeps running.
    if let Err(e) = state
        .dispatcher
        .handle_message(ChatId(msg.chat.id.0), text)
        .await
    {
        tracing::error!("handling message in chat {} failed: {e}", msg.chat.id.0);
    }

    Ok(())
}
