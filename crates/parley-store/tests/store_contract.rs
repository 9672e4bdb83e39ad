// SPDX-License-Identifier: Apache-2.0

use parley_model::{Chat, Contact, ContactId, Message};
use parley_store::{DocumentStore, StoreErrorCode};

fn contact(name: &str, email: &str) -> Contact {
    Contact::new(name.to_string(), email.to_string(), "123456789".to_string())
}

#[tokio::test]
async fn contact_round_trip_preserves_document() {
    let store = DocumentStore::open_in_memory().expect("open store");
    let ana = contact("Ana", "ana@x.com");
    store.insert_contact(&ana).await.expect("insert");

    let loaded = store
        .contact_by_id(&ana.id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(loaded, ana);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_and_creates_no_record() {
    let store = DocumentStore::open_in_memory().expect("open store");
    store
        .insert_contact(&contact("Ana", "ana@x.com"))
        .await
        .expect("first insert");

    let dup = contact("Other Ana", "ana@x.com");
    let err = store.insert_contact(&dup).await.expect_err("duplicate");
    assert_eq!(err.code, StoreErrorCode::Conflict);

    assert!(store
        .contact_by_id(&dup.id)
        .await
        .expect("lookup")
        .is_none());
    assert_eq!(store.list_contacts().await.expect("list").len(), 1);
}

#[tokio::test]
async fn missing_ids_signal_absence_not_errors() {
    let store = DocumentStore::open_in_memory().expect("open store");
    let ghost = ContactId::generate();
    assert!(store.contact_by_id(&ghost).await.expect("lookup").is_none());
    assert!(!store.delete_contact(&ghost).await.expect("delete"));
}

#[tokio::test]
async fn contact_listing_is_newest_first() {
    let store = DocumentStore::open_in_memory().expect("open store");
    let first = contact("Ana", "ana@x.com");
    let second = contact("Bo", "bo@x.com");
    store.insert_contact(&first).await.expect("insert first");
    store.insert_contact(&second).await.expect("insert second");

    let listed = store.list_contacts().await.expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
async fn update_refreshes_updated_at_and_reports_missing_rows() {
    let store = DocumentStore::open_in_memory().expect("open store");
    let mut ana = contact("Ana", "ana@x.com");
    store.insert_contact(&ana).await.expect("insert");

    let before = ana.updated_at;
    ana.name = "Ana Maria".to_string();
    assert!(store.update_contact(&mut ana).await.expect("update"));
    assert!(ana.updated_at > before);

    let loaded = store
        .contact_by_id(&ana.id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(loaded.name, "Ana Maria");
    assert_eq!(loaded.created_at, ana.created_at);

    let mut ghost = contact("Ghost", "ghost@x.com");
    assert!(!store.update_contact(&mut ghost).await.expect("update"));
}

#[tokio::test]
async fn second_chat_for_same_contact_is_a_conflict() {
    let store = DocumentStore::open_in_memory().expect("open store");
    let ana = contact("Ana", "ana@x.com");
    store.insert_contact(&ana).await.expect("insert contact");

    store
        .insert_chat(&Chat::new(ana.id.clone()))
        .await
        .expect("first chat");
    let err = store
        .insert_chat(&Chat::new(ana.id.clone()))
        .await
        .expect_err("second chat");
    assert!(err.is_conflict());
}

#[tokio::test]
async fn chat_lookup_by_contact_resolves() {
    let store = DocumentStore::open_in_memory().expect("open store");
    let ana = contact("Ana", "ana@x.com");
    store.insert_contact(&ana).await.expect("insert contact");
    let chat = Chat::new(ana.id.clone());
    store.insert_chat(&chat).await.expect("insert chat");

    let found = store
        .chat_by_contact(&ana.id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(found.id, chat.id);
    assert!(store
        .chat_by_contact(&ContactId::generate())
        .await
        .expect("lookup")
        .is_none());
}

#[tokio::test]
async fn chat_listing_follows_recent_activity() {
    let store = DocumentStore::open_in_memory().expect("open store");
    let ana = contact("Ana", "ana@x.com");
    let bo = contact("Bo", "bo@x.com");
    store.insert_contact(&ana).await.expect("insert ana");
    store.insert_contact(&bo).await.expect("insert bo");

    let mut ana_chat = Chat::new(ana.id.clone());
    let bo_chat = Chat::new(bo.id.clone());
    store.insert_chat(&ana_chat).await.expect("insert ana chat");
    store.insert_chat(&bo_chat).await.expect("insert bo chat");

    // Touching ana's chat moves it to the front of the listing.
    assert!(store.update_chat(&mut ana_chat).await.expect("touch"));
    let listed = store.list_chats().await.expect("list");
    assert_eq!(listed[0].id, ana_chat.id);
    assert_eq!(listed[1].id, bo_chat.id);
}

#[tokio::test]
async fn messages_list_ascending_and_recent_window_descends() {
    let store = DocumentStore::open_in_memory().expect("open store");
    let ana = contact("Ana", "ana@x.com");
    store.insert_contact(&ana).await.expect("insert contact");
    let chat = Chat::new(ana.id.clone());
    store.insert_chat(&chat).await.expect("insert chat");

    let mut ids = Vec::new();
    for i in 0..5 {
        let m = Message::new(chat.id.clone(), format!("m{i}"), i % 2 == 0, None);
        store.insert_message(&m).await.expect("insert message");
        ids.push(m.id);
    }

    let ascending = store.messages_by_chat(&chat.id).await.expect("ascending");
    assert_eq!(
        ascending.iter().map(|m| m.id.clone()).collect::<Vec<_>>(),
        ids
    );

    let recent = store
        .recent_messages(&chat.id, 3)
        .await
        .expect("recent window");
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].id, ids[4]);
    assert_eq!(recent[2].id, ids[2]);
}

#[tokio::test]
async fn deleting_a_chat_leaves_its_messages() {
    let store = DocumentStore::open_in_memory().expect("open store");
    let ana = contact("Ana", "ana@x.com");
    store.insert_contact(&ana).await.expect("insert contact");
    let chat = Chat::new(ana.id.clone());
    store.insert_chat(&chat).await.expect("insert chat");
    let msg = Message::new(chat.id.clone(), "hi".to_string(), true, None);
    store.insert_message(&msg).await.expect("insert message");

    assert!(store.delete_chat(&chat.id).await.expect("delete chat"));
    assert!(store.chat_by_id(&chat.id).await.expect("lookup").is_none());
    assert_eq!(
        store
            .messages_by_chat(&chat.id)
            .await
            .expect("messages survive")
            .len(),
        1
    );
}

#[tokio::test]
async fn on_disk_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("parley.db");
    let path = path.to_str().expect("utf8 path");

    let ana = contact("Ana", "ana@x.com");
    {
        let store = DocumentStore::open(path).expect("open store");
        store.insert_contact(&ana).await.expect("insert");
    }

    let reopened = DocumentStore::open(path).expect("reopen store");
    reopened.ping().await.expect("ping");
    let loaded = reopened
        .contact_by_id(&ana.id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(loaded.email, "ana@x.com");
}
