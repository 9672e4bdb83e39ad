// SPDX-License-Identifier: Apache-2.0

//! The multi-write sequences that keep a contact's chat and a chat's
//! message bookkeeping in step.
//!
//! None of these spans a transaction: the primary write survives a failed
//! secondary write, which is logged and left for eventual correction. A
//! contact without a `chat_id` means "chat provisioning pending", and a
//! chat whose counters miss a stored message is stale, not lost.

use tracing::warn;

use parley_model::{Chat, Contact, Message};
use parley_store::DocumentStore;

/// Contact-creation side effect: create the contact's chat and persist the
/// chat id back onto the contact. Returns the chat when provisioning fully
/// or partially succeeded; `contact.chat_id` reflects only what was
/// actually persisted.
pub async fn provision_chat(store: &DocumentStore, contact: &mut Contact) -> Option<Chat> {
    if contact.chat_id.is_some() {
        return None;
    }
    let chat = Chat::new(contact.id.clone());
    if let Err(e) = store.insert_chat(&chat).await {
        warn!(contact_id = %contact.id, error = %e, "chat provisioning failed; contact left pending");
        return None;
    }
    contact.chat_id = Some(chat.id.clone());
    match store.update_contact(contact).await {
        Ok(true) => Some(chat),
        Ok(false) => {
            warn!(contact_id = %contact.id, chat_id = %chat.id, "contact vanished before chat back-reference");
            contact.chat_id = None;
            Some(chat)
        }
        Err(e) => {
            warn!(contact_id = %contact.id, chat_id = %chat.id, error = %e, "chat back-reference write failed");
            contact.chat_id = None;
            Some(chat)
        }
    }
}

/// Message-insertion side effect: append the message to the chat's list,
/// repoint `last_message`, bump the unread counter, persist. The message
/// itself is already durable; a failure here only leaves the chat's
/// counters behind.
pub async fn record_message(store: &DocumentStore, chat: &mut Chat, message: &Message) {
    chat.record_message(message.id.clone());
    match store.update_chat(chat).await {
        Ok(true) => {}
        Ok(false) => {
            warn!(chat_id = %chat.id, message_id = %message.id, "chat vanished before counter update");
        }
        Err(e) => {
            warn!(chat_id = %chat.id, message_id = %message.id, error = %e, "chat counter update failed");
        }
    }
}

/// Read-side transition: viewing a chat resets its unread counter. The
/// caller shapes its response from the pre-reset `chat`; only the stored
/// document is updated here.
pub async fn mark_read(store: &DocumentStore, chat: &Chat) {
    let mut viewed = chat.clone();
    if !viewed.mark_read() {
        return;
    }
    match store.update_chat(&mut viewed).await {
        Ok(true) => {}
        Ok(false) => warn!(chat_id = %chat.id, "mark-as-read skipped; chat vanished"),
        Err(e) => warn!(chat_id = %chat.id, error = %e, "mark-as-read update failed"),
    }
}

/// Direction flag for messages that omit `isContactMessage`.
///
/// TODO: confirm the intended sender attribution for untagged messages;
/// the random default mirrors the admin panel's current behavior and is
/// not a considered design.
#[must_use]
pub fn resolve_direction(flag: Option<bool>) -> bool {
    flag.unwrap_or_else(rand::random)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_model::ContactId;
    use std::sync::Arc;

    fn seeded_contact() -> Contact {
        Contact::new(
            "Ana".to_string(),
            "ana@x.com".to_string(),
            "123456789".to_string(),
        )
    }

    #[tokio::test]
    async fn provisioning_creates_chat_and_back_reference() {
        let store = Arc::new(DocumentStore::open_in_memory().expect("open store"));
        let mut contact = seeded_contact();
        store.insert_contact(&contact).await.expect("insert");

        let chat = provision_chat(&store, &mut contact)
            .await
            .expect("chat provisioned");
        assert_eq!(contact.chat_id.as_ref(), Some(&chat.id));

        let stored = store
            .contact_by_id(&contact.id)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.chat_id, Some(chat.id.clone()));

        let found = store
            .chat_by_contact(&contact.id)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(found.id, chat.id);
        assert_eq!(found.unread_count, 0);
        assert!(found.message_ids.is_empty());
    }

    #[tokio::test]
    async fn provisioning_is_skipped_when_chat_already_linked() {
        let store = Arc::new(DocumentStore::open_in_memory().expect("open store"));
        let mut contact = seeded_contact();
        contact.chat_id = Some(parley_model::ChatId::generate());
        assert!(provision_chat(&store, &mut contact).await.is_none());
    }

    #[tokio::test]
    async fn failed_back_reference_leaves_contact_pending() {
        let store = Arc::new(DocumentStore::open_in_memory().expect("open store"));
        // Contact never inserted: the chat write succeeds, the back-reference
        // update touches zero rows.
        let mut contact = seeded_contact();
        let chat = provision_chat(&store, &mut contact)
            .await
            .expect("chat still created");
        assert!(contact.chat_id.is_none());
        assert!(store
            .chat_by_id(&chat.id)
            .await
            .expect("lookup")
            .is_some());
    }

    #[tokio::test]
    async fn recording_a_message_updates_chat_bookkeeping() {
        let store = Arc::new(DocumentStore::open_in_memory().expect("open store"));
        let mut contact = seeded_contact();
        store.insert_contact(&contact).await.expect("insert");
        provision_chat(&store, &mut contact).await.expect("chat");

        let mut chat = store
            .chat_by_contact(&contact.id)
            .await
            .expect("lookup")
            .expect("present");
        let message = Message::new(chat.id.clone(), "hi".to_string(), true, None);
        store.insert_message(&message).await.expect("insert");
        record_message(&store, &mut chat, &message).await;

        let stored = store
            .chat_by_id(&chat.id)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.last_message, Some(message.id.clone()));
        assert_eq!(stored.message_ids, vec![message.id]);
        assert_eq!(stored.unread_count, 1);
    }

    #[tokio::test]
    async fn mark_read_persists_zero_but_leaves_caller_view_untouched() {
        let store = Arc::new(DocumentStore::open_in_memory().expect("open store"));
        let mut chat = Chat::new(ContactId::generate());
        store.insert_chat(&chat).await.expect("insert chat");
        let message = Message::new(chat.id.clone(), "hi".to_string(), false, None);
        store.insert_message(&message).await.expect("insert");
        record_message(&store, &mut chat, &message).await;

        let fetched = store
            .chat_by_id(&chat.id)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(fetched.unread_count, 1);

        mark_read(&store, &fetched).await;
        assert_eq!(fetched.unread_count, 1);

        let after = store
            .chat_by_id(&chat.id)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(after.unread_count, 0);
    }

    #[test]
    fn explicit_direction_flag_wins_over_default() {
        assert!(resolve_direction(Some(true)));
        assert!(!resolve_direction(Some(false)));
    }
}
