//! Per-chat routing: ordering within a chat, isolation across chats.

mod common;

use std::time::Duration;

use common::Harness;
use signup_bot::{ChatRouter, InboundEvent};
use signup_core::ChatId;
use signup_session::SessionStore;
use signup_state::FormStep;

fn text(chat_id: i64, body: &str) -> InboundEvent {
    InboundEvent::text(ChatId(chat_id), Some(format!("user{chat_id}")), body)
}

fn button(chat_id: i64, data: &str) -> InboundEvent {
    InboundEvent::button(ChatId(chat_id), None, data)
}

fn full_form(chat_id: i64) -> Vec<InboundEvent> {
    vec![
        text(chat_id, "/start"),
        text(chat_id, "Ali Hosseini"),
        text(chat_id, "09123456789"),
        button(chat_id, "companions_2"),
        button(chat_id, "major_کامپیوتر"),
        text(chat_id, "4001234567"),
        text(chat_id, "123456"),
        button(chat_id, "confirm"),
    ]
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_interleaved_chats_each_register_once() {
    let harness = Harness::new();
    let router = ChatRouter::new(harness.dispatcher.clone());

    let chats: Vec<i64> = (1..=20).collect();
    let conversations: Vec<Vec<InboundEvent>> = chats.iter().map(|id| full_form(*id)).collect();
    for step in 0..conversations[0].len() {
        for conversation in &conversations {
            router.route(conversation[step].clone());
        }
    }
    assert_eq!(router.active_chats(), chats.len());

    router.shutdown().await;
    assert_eq!(router.active_chats(), 0);

    let records = harness.repository.records();
    assert_eq!(records.len(), chats.len());
    for chat_id in chats {
        assert_eq!(
            records.iter().filter(|record| record.chat_id == ChatId(chat_id)).count(),
            1
        );
        let session = harness.sessions.get(ChatId(chat_id)).await.unwrap();
        assert_eq!(session.step(), FormStep::Registered);
    }
}

#[tokio::test]
async fn test_events_of_one_chat_keep_their_order() {
    let harness = Harness::new();
    let router = ChatRouter::new(harness.dispatcher.clone());

    for event in full_form(5) {
        router.route(event);
    }
    router.shutdown().await;

    let records = harness.repository.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].submitter_handle, None);
    assert_eq!(records[0].transaction_ref, "123456");
}

#[tokio::test]
async fn test_router_accepts_new_work_after_shutdown() {
    let harness = Harness::new();
    let router = ChatRouter::new(harness.dispatcher.clone());

    router.route(text(1, "/start"));
    router.shutdown().await;
    router.route(text(1, "Ali Hosseini"));
    router.shutdown().await;

    let session = harness.sessions.get(ChatId(1)).await.unwrap();
    assert_eq!(session.step(), FormStep::AwaitingPhone);
}

#[tokio::test]
async fn test_idle_workers_retire_and_restart_on_demand() {
    let harness = Harness::new();
    let router =
        ChatRouter::new(harness.dispatcher.clone()).with_idle_timeout(Duration::from_millis(50));

    router.route(text(1, "/start"));
    router.route(text(2, "/start"));
    assert_eq!(router.active_chats(), 2);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(router.active_chats(), 0);

    router.route(text(1, "Ali Hosseini"));
    assert_eq!(router.active_chats(), 1);
    router.shutdown().await;

    let session = harness.sessions.get(ChatId(1)).await.unwrap();
    assert_eq!(session.step(), FormStep::AwaitingPhone);
    let session = harness.sessions.get(ChatId(2)).await.unwrap();
    assert_eq!(session.step(), FormStep::AwaitingFullName);
}
