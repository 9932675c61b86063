//! Chat handlers.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tabled::Tabled;
use tracing::warn;

use hostelio_core::{ChatEvent, ChatMessage, EntityId, Marketplace};

use crate::cli::{GlobalOpts, MessagesArgs, MessagesCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct MessageRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl MessageRow {
    fn new(m: &ChatMessage, me: Option<&EntityId>) -> Self {
        Self {
            time: output::timestamp(m.sent_at),
            from: if Some(&m.sender) == me {
                "me".into()
            } else {
                m.sender.to_string()
            },
            message: m.message.clone(),
        }
    }
}

fn line(m: &ChatMessage, me: Option<&EntityId>) -> String {
    let row = MessageRow::new(m, me);
    format!("[{}] {}: {}", row.time, row.from, row.message)
}

fn oldest_first(mut messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    messages.sort_by_key(|m| m.sent_at);
    messages
}

/// What `messages watch` has already printed.
///
/// Messages with a backend id are matched by id. Messages without one fall
/// back to the newest timestamp shown so far.
#[derive(Default)]
struct SeenMessages {
    ids: HashSet<EntityId>,
    newest: Option<DateTime<Utc>>,
}

impl SeenMessages {
    /// Filter a refreshed conversation down to unprinted messages, oldest
    /// first, and remember them.
    fn take_new(&mut self, messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
        let mut fresh = oldest_first(messages);
        fresh.retain(|m| match m.id {
            Some(ref id) => !self.ids.contains(id),
            None => self.newest.is_none_or(|t| m.sent_at > t),
        });
        for m in &fresh {
            if let Some(ref id) = m.id {
                self.ids.insert(id.clone());
            }
            self.newest = self.newest.max(Some(m.sent_at));
        }
        fresh
    }
}

pub async fn handle(
    market: &Marketplace,
    args: MessagesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let session = market.require_session()?;
    let me = Some(&session.user_id);

    match args.command {
        MessagesCommand::List { with } => {
            let messages = oldest_first(market.conversation(&EntityId::from(with)).await?);
            let out = output::render_list(
                &global.output,
                &messages,
                |m| MessageRow::new(m, me),
                |m| m.message.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MessagesCommand::Send { to, message } => {
            let sent = market.send_message(&EntityId::from(to), &message).await?;
            let out = output::render_single(&global.output, &sent, |m| line(m, me), |m| {
                m.message.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MessagesCommand::Watch { with } => {
            let mut sub = market.chat_poller().start(with);
            let mut seen = SeenMessages::default();

            loop {
                let event = tokio::select! {
                    event = sub.recv() => event,
                    _ = tokio::signal::ctrl_c() => None,
                };
                match event {
                    Some(ChatEvent::Messages { messages, .. }) => {
                        for m in &seen.take_new(messages) {
                            let text = match global.output {
                                OutputFormat::Table | OutputFormat::Plain => line(m, me),
                                _ => output::render_single(
                                    &OutputFormat::JsonCompact,
                                    m,
                                    |m| line(m, me),
                                    |m| m.message.clone(),
                                ),
                            };
                            output::print_output(&text, global.quiet);
                        }
                    }
                    Some(ChatEvent::Error(e)) => warn!(error = %e, "chat refresh failed"),
                    None => break,
                }
            }

            sub.stop().await;
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn msg(id: Option<&str>, minute: u32, text: &str) -> ChatMessage {
        ChatMessage {
            id: id.map(EntityId::from),
            sender: EntityId::from("7"),
            receiver: EntityId::from("9"),
            message: text.into(),
            sent_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, minute, 0).unwrap(),
        }
    }

    fn texts(messages: &[ChatMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.message.as_str()).collect()
    }

    #[test]
    fn first_refresh_prints_everything_oldest_first() {
        let mut seen = SeenMessages::default();
        let out = seen.take_new(vec![msg(Some("2"), 5, "b"), msg(Some("1"), 1, "a")]);
        assert_eq!(texts(&out), ["a", "b"]);
    }

    #[test]
    fn later_refresh_skips_already_printed() {
        let mut seen = SeenMessages::default();
        seen.take_new(vec![msg(Some("1"), 1, "old"), msg(Some("2"), 3, "same")]);
        let out = seen.take_new(vec![
            msg(Some("1"), 1, "old"),
            msg(Some("2"), 3, "same"),
            msg(Some("3"), 4, "new"),
        ]);
        assert_eq!(texts(&out), ["new"]);
    }

    #[test]
    fn same_second_reply_is_not_lost() {
        let mut seen = SeenMessages::default();
        seen.take_new(vec![msg(Some("1"), 3, "ping")]);
        let out = seen.take_new(vec![msg(Some("1"), 3, "ping"), msg(Some("2"), 3, "pong")]);
        assert_eq!(texts(&out), ["pong"]);
    }

    #[test]
    fn messages_without_ids_fall_back_to_timestamps() {
        let mut seen = SeenMessages::default();
        seen.take_new(vec![msg(None, 3, "a")]);
        let out = seen.take_new(vec![msg(None, 3, "a"), msg(None, 4, "b")]);
        assert_eq!(texts(&out), ["b"]);
    }

    #[test]
    fn own_messages_are_labelled() {
        let me = EntityId::from("7");
        assert_eq!(MessageRow::new(&msg(None, 0, "hi"), Some(&me)).from, "me");
    }
}
