//! Adapters from Telegram (teloxide) types to relay_core types.
//! Depends only on teloxide and relay_core type definitions.

use relay_core::{Chat, Update, UpdateKind, User};

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific update type to the core [`Update`] envelope.
pub trait ToCoreUpdate {
    fn to_core(&self) -> Update;
}

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl ToCoreUser for TelegramUserWrapper<'_> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_channel() {
        "channel"
    } else {
        "unknown"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
    }
}

/// Wraps a teloxide Update for conversion to the core envelope. Kinds the bot
/// does not process map to `Other`, keeping whatever chat/sender metadata the
/// update carries.
pub struct TelegramUpdateWrapper<'a>(pub &'a teloxide::types::Update);

impl ToCoreUpdate for TelegramUpdateWrapper<'_> {
    fn to_core(&self) -> Update {
        let id = Some(i64::from(self.0.id.0));
        match &self.0.kind {
            teloxide::types::UpdateKind::Message(msg) => Update {
                id,
                chat: Some(core_chat(&msg.chat)),
                from: msg.from.as_ref().map(|u| TelegramUserWrapper(u).to_core()),
                kind: UpdateKind::Message {
                    text: msg.text().map(str::to_string),
                },
            },
            teloxide::types::UpdateKind::EditedMessage(msg) => Update {
                id,
                chat: Some(core_chat(&msg.chat)),
                from: msg.from.as_ref().map(|u| TelegramUserWrapper(u).to_core()),
                kind: UpdateKind::EditedMessage {
                    text: msg.text().map(str::to_string),
                },
            },
            teloxide::types::UpdateKind::CallbackQuery(query) => Update {
                id,
                // The callback's originating chat, when the message is still
                // accessible.
                chat: self.0.chat().map(core_chat),
                from: Some(TelegramUserWrapper(&query.from).to_core()),
                kind: UpdateKind::CallbackQuery {
                    data: query.data.clone(),
                },
            },
            _ => Update {
                id,
                chat: self.0.chat().map(core_chat),
                from: self.0.from().map(|u| TelegramUserWrapper(u).to_core()),
                kind: UpdateKind::Other,
            },
        }
    }
}
