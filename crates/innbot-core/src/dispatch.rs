use std::sync::Arc;

use crate::{
    command::{parse, Action},
    domain::ChatId,
    lookup::{format_outcomes, resolve},
    ports::{MessagingPort, RegistryPort},
    session::SessionStore,
    Result,
};

pub const START_TEXT: &str = "Привет! Я бот, который выдает информацию о компаниях по ИНН.";
pub const HELP_TEXT: &str = "/start – начать общение\n\
/help – список команд\n\
/hello – информация о разработчике\n\
/inn <ИНН...> – найти компании\n\
/last – повторить последнее действие";
pub const HELLO_TEXT: &str = "ФИО: Иванов Иван Иванович\n\
Email: ivan.ivanov@example.com\n\
GitHub: https://github.com/ivanov-dev";
pub const INN_MISSING_TEXT: &str = "Укажите ИНН после команды /inn. Можно несколько через пробел.";
pub const NO_PREVIOUS_TEXT: &str = "Нет предыдущей команды.";
pub const UNKNOWN_TEXT: &str = "Неизвестная команда. Введите /help.";

/// Maps one inbound message to one outbound reply, maintaining the per-chat
/// replay slot.
pub struct Dispatcher {
    sessions: SessionStore,
    registry: Arc<dyn RegistryPort>,
    messenger: Arc<dyn MessagingPort>,
}

impl Dispatcher {
    pub fn new(
        sessions: SessionStore,
        registry: Arc<dyn RegistryPort>,
        messenger: Arc<dyn MessagingPort>,
    ) -> Self {
        Self {
            sessions,
            registry,
            messenger,
        }
    }

    /// Handle one inbound message end-to-end: parse, update the chat's
    /// replay slot, execute, reply. Empty messages are a no-op; every other
    /// path sends exactly one reply.
    pub async fn handle_message(&self, chat_id: ChatId, text: &str) -> Result<()> {
        let Some(action) = parse(text) else {
            return Ok(());
        };

        // The slot is updated before execution and never by a replay, so a
        // stored action is never `Replay`. Replay replays whatever was last
        // attempted, unrecognized commands included.
        let action = match action {
            Action::Replay => match self.sessions.recall(chat_id).await {
                Some(stored) => stored,
                None => {
                    return self.messenger.send_text(chat_id, NO_PREVIOUS_TEXT).await;
                }
            },
            other => {
                self.sessions.remember(chat_id, other.clone()).await;
                other
            }
        };

        let reply = self.execute(&action).await;
        self.messenger.send_text(chat_id, &reply).await
    }

    async fn execute(&self, action: &Action) -> String {
        match action {
            Action::Start => START_TEXT.to_string(),
            Action::Help => HELP_TEXT.to_string(),
            Action::Hello => HELLO_TEXT.to_string(),
            Action::InnMissing => INN_MISSING_TEXT.to_string(),
            Action::Unknown => UNKNOWN_TEXT.to_string(),
            Action::InnQuery(args) => {
                let outcomes = resolve(self.registry.as_ref(), args).await;
                format_outcomes(&outcomes)
            }
            // Replays are resolved to the stored action in `handle_message`;
            // a bare `Replay` here means the slot was empty.
            Action::Replay => NO_PREVIOUS_TEXT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::CompanyInfo, errors::Error};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMessenger {
        sent: Mutex<Vec<(ChatId, String)>>,
    }

    impl RecordingMessenger {
        fn sent(&self) -> Vec<(ChatId, String)> {
            self.sent.lock().unwrap().clone()
        }

        fn last_text(&self) -> Option<String> {
            self.sent.lock().unwrap().last().map(|(_, t)| t.clone())
        }
    }

    #[async_trait]
    impl MessagingPort for RecordingMessenger {
        async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeRegistry {
        fail_on: Vec<String>,
    }

    #[async_trait]
    impl RegistryPort for FakeRegistry {
        async fn find_party(&self, inn: &str) -> Result<Option<CompanyInfo>> {
            if self.fail_on.iter().any(|i| i == inn) {
                return Err(Error::Registry("down".to_string()));
            }
            Ok(Some(CompanyInfo {
                name: format!("Company {inn}"),
                address: String::new(),
            }))
        }
    }

    fn dispatcher_with(registry: FakeRegistry) -> (Arc<RecordingMessenger>, Dispatcher) {
        let messenger = Arc::new(RecordingMessenger::default());
        let dispatcher = Dispatcher::new(
            SessionStore::new(),
            Arc::new(registry),
            messenger.clone(),
        );
        (messenger, dispatcher)
    }

    fn dispatcher() -> (Arc<RecordingMessenger>, Dispatcher) {
        dispatcher_with(FakeRegistry::default())
    }

    #[tokio::test]
    async fn empty_message_sends_nothing() {
        let (messenger, d) = dispatcher();
        d.handle_message(ChatId(1), "   ").await.unwrap();
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn fixed_commands_send_fixed_texts() {
        let (messenger, d) = dispatcher();
        d.handle_message(ChatId(1), "/start").await.unwrap();
        d.handle_message(ChatId(1), "/help").await.unwrap();
        d.handle_message(ChatId(1), "/hello").await.unwrap();

        let texts: Vec<String> = messenger.sent().into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts, vec![START_TEXT, HELP_TEXT, HELLO_TEXT]);
    }

    #[tokio::test]
    async fn inn_without_args_prompts() {
        let (messenger, d) = dispatcher();
        d.handle_message(ChatId(1), "/inn").await.unwrap();
        assert_eq!(messenger.last_text().as_deref(), Some(INN_MISSING_TEXT));
    }

    #[tokio::test]
    async fn unknown_command_replies_and_is_replayable() {
        let (messenger, d) = dispatcher();
        d.handle_message(ChatId(1), "/frobnicate").await.unwrap();
        d.handle_message(ChatId(1), "/last").await.unwrap();

        let texts: Vec<String> = messenger.sent().into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts, vec![UNKNOWN_TEXT, UNKNOWN_TEXT]);
    }

    #[tokio::test]
    async fn replay_reproduces_the_last_reply() {
        let (messenger, d) = dispatcher();
        d.handle_message(ChatId(1), "/inn 1111111111").await.unwrap();
        d.handle_message(ChatId(1), "/last").await.unwrap();

        let texts: Vec<String> = messenger.sent().into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0], texts[1]);
        assert_eq!(texts[0], "Company 1111111111");
    }

    #[tokio::test]
    async fn replay_twice_yields_the_same_result_both_times() {
        let (messenger, d) = dispatcher();
        d.handle_message(ChatId(1), "/help").await.unwrap();
        d.handle_message(ChatId(1), "/last").await.unwrap();
        d.handle_message(ChatId(1), "/last").await.unwrap();

        let texts: Vec<String> = messenger.sent().into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts, vec![HELP_TEXT, HELP_TEXT, HELP_TEXT]);
    }

    #[tokio::test]
    async fn replay_without_history_says_so() {
        let (messenger, d) = dispatcher();
        d.handle_message(ChatId(1), "/last").await.unwrap();
        assert_eq!(messenger.last_text().as_deref(), Some(NO_PREVIOUS_TEXT));
    }

    #[tokio::test]
    async fn replay_slots_are_per_chat() {
        let (messenger, d) = dispatcher();
        d.handle_message(ChatId(1), "/help").await.unwrap();
        d.handle_message(ChatId(2), "/last").await.unwrap();

        let texts: Vec<(ChatId, String)> = messenger.sent();
        assert_eq!(texts[1], (ChatId(2), NO_PREVIOUS_TEXT.to_string()));
    }

    #[tokio::test]
    async fn lookup_failure_is_surfaced_inline_not_raised() {
        let (messenger, d) = dispatcher_with(FakeRegistry {
            fail_on: vec!["2222222222".to_string()],
        });
        d.handle_message(ChatId(1), "/inn 2222222222 1111111111")
            .await
            .unwrap();

        let text = messenger.last_text().unwrap();
        assert!(text.contains("Company 1111111111"));
        assert!(text.contains("Ошибка при запросе ИНН 2222222222"));
        assert!(text.contains("registry error: down"));
    }

    #[tokio::test]
    async fn inn_batch_is_one_multiline_message() {
        let (messenger, d) = dispatcher();
        d.handle_message(ChatId(1), "/inn 1111111111 2222222222")
            .await
            .unwrap();

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.lines().count(), 2);
    }
}
