// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw payload normalization into channel-agnostic [`InboundMessage`]s.
//!
//! Several raw payload shapes carry text (plain conversation, extended text,
//! image caption, video caption); the first non-empty source wins.

use zapgate_core::{ChatId, InboundMessage};

use crate::wire::{RawMessage, RawMessageContent};

/// Extracts the normalized text from a raw payload.
///
/// Returns an empty string when no textual source is present; the relay
/// admission filter treats that as "nothing to relay", not an error.
pub fn normalized_text(content: Option<&RawMessageContent>) -> String {
    let Some(content) = content else {
        return String::new();
    };

    let candidates = [
        content.conversation.as_deref(),
        content
            .extended_text_message
            .as_ref()
            .and_then(|e| e.text.as_deref()),
        content.image_message.as_ref().and_then(|m| m.caption.as_deref()),
        content.video_message.as_ref().and_then(|m| m.caption.as_deref()),
    ];

    for candidate in candidates.into_iter().flatten() {
        if !candidate.is_empty() {
            return candidate.to_string();
        }
    }

    String::new()
}

/// Converts a raw transport payload into a normalized [`InboundMessage`].
pub fn to_inbound_message(raw: &RawMessage) -> InboundMessage {
    let chat_id = raw.key.remote_jid.clone().map(ChatId);
    InboundMessage {
        is_group_or_broadcast: chat_id
            .as_ref()
            .is_some_and(ChatId::is_group_or_broadcast),
        message_id: raw.key.id.clone(),
        text: normalized_text(raw.message.as_ref()),
        is_from_self: raw.key.from_me,
        chat_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::RawMessageKey;

    fn make_raw(jid: Option<&str>, from_me: bool, content: serde_json::Value) -> RawMessage {
        let content: Option<RawMessageContent> = if content.is_null() {
            None
        } else {
            Some(serde_json::from_value(content).expect("valid raw content fixture"))
        };
        RawMessage {
            key: RawMessageKey {
                remote_jid: jid.map(str::to_string),
                id: "MSG1".into(),
                from_me,
            },
            message: content,
        }
    }

    #[test]
    fn plain_conversation_wins() {
        let raw = make_raw(
            Some("5511999990000@s.whatsapp.net"),
            false,
            serde_json::json!({"conversation": "oi"}),
        );
        let inbound = to_inbound_message(&raw);
        assert_eq!(inbound.text, "oi");
        assert_eq!(inbound.message_id, "MSG1");
        assert!(!inbound.is_from_self);
        assert!(!inbound.is_group_or_broadcast);
    }

    #[test]
    fn extended_text_used_when_conversation_absent() {
        let raw = make_raw(
            Some("a@s.whatsapp.net"),
            false,
            serde_json::json!({"extendedTextMessage": {"text": "quoted reply"}}),
        );
        assert_eq!(to_inbound_message(&raw).text, "quoted reply");
    }

    #[test]
    fn image_caption_used_when_text_sources_absent() {
        let raw = make_raw(
            Some("a@s.whatsapp.net"),
            false,
            serde_json::json!({"imageMessage": {"caption": "look at this"}}),
        );
        assert_eq!(to_inbound_message(&raw).text, "look at this");
    }

    #[test]
    fn video_caption_is_last_resort() {
        let raw = make_raw(
            Some("a@s.whatsapp.net"),
            false,
            serde_json::json!({"videoMessage": {"caption": "watch"}}),
        );
        assert_eq!(to_inbound_message(&raw).text, "watch");
    }

    #[test]
    fn first_non_empty_source_wins_over_later_ones() {
        let raw = make_raw(
            Some("a@s.whatsapp.net"),
            false,
            serde_json::json!({
                "conversation": "",
                "extendedTextMessage": {"text": "the actual text"},
                "imageMessage": {"caption": "ignored"}
            }),
        );
        assert_eq!(to_inbound_message(&raw).text, "the actual text");
    }

    #[test]
    fn captionless_media_normalizes_to_empty_text() {
        let raw = make_raw(
            Some("a@s.whatsapp.net"),
            false,
            serde_json::json!({"imageMessage": {}}),
        );
        assert_eq!(to_inbound_message(&raw).text, "");
    }

    #[test]
    fn missing_payload_normalizes_to_empty_text() {
        let raw = make_raw(Some("a@s.whatsapp.net"), false, serde_json::Value::Null);
        assert_eq!(to_inbound_message(&raw).text, "");
    }

    #[test]
    fn group_jid_sets_broadcast_flag() {
        let raw = make_raw(
            Some("12036302@g.us"),
            false,
            serde_json::json!({"conversation": "hello group"}),
        );
        assert!(to_inbound_message(&raw).is_group_or_broadcast);
    }

    #[test]
    fn absent_jid_yields_no_chat_id() {
        let raw = make_raw(None, false, serde_json::json!({"conversation": "hi"}));
        let inbound = to_inbound_message(&raw);
        assert!(inbound.chat_id.is_none());
        assert!(!inbound.is_group_or_broadcast);
    }

    #[test]
    fn own_messages_keep_from_self_flag() {
        let raw = make_raw(
            Some("a@s.whatsapp.net"),
            true,
            serde_json::json!({"conversation": "me"}),
        );
        assert!(to_inbound_message(&raw).is_from_self);
    }
}
