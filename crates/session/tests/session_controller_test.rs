//! Integration tests for [`session::SessionController`].
//!
//! Drives full request cycles with a recording messenger and scripted backends: reset, empty
//! prompt, successful ask with context, backend failure, chunked replies per destination kind,
//! timeouts and late results, and isolation between chats.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{MockMessenger, Script, ScriptedBackend, Sent};
use conversation_store::ConversationStore;
use relay_core::{BackendError, ConversationKey, Destination, DestinationKind, Role};
use session::messages::{EMPTY_PROMPT_GUIDANCE, EMPTY_REPLY_NOTICE, HELP_TEXT, RESET_CONFIRMATION};
use session::{AskOutcome, SessionController, SessionSettings};

const CHAT: i64 = 456;

fn direct() -> Destination {
    Destination::new(CHAT, DestinationKind::Direct)
}

fn key() -> ConversationKey {
    direct().conversation_key()
}

fn controller(
    backend: Arc<ScriptedBackend>,
    messenger: Arc<MockMessenger>,
    settings: SessionSettings,
) -> SessionController {
    SessionController::new(
        Arc::new(ConversationStore::default()),
        backend,
        messenger,
        settings,
    )
}

/// **Test: a successful ask acks, records both turns, sends the reply.**
///
/// **Expected:** backend receives `"User: hi\nAssistant:"`; history is [User, Assistant].
#[tokio::test]
async fn ask_records_turns_and_sends_reply() {
    let backend = ScriptedBackend::new(Script::Reply("  hello there \n".to_string()));
    let messenger = MockMessenger::new();
    let c = controller(backend.clone(), messenger.clone(), SessionSettings::default());

    let outcome = c.ask(&key(), &direct(), "hi").await.unwrap();

    assert_eq!(outcome, AskOutcome::Answered { chunks: 1 });
    assert_eq!(backend.prompts(), vec!["User: hi\nAssistant:"]);
    assert_eq!(
        messenger.sent(),
        vec![Sent::Ack(CHAT), Sent::Message(CHAT, "hello there".to_string())]
    );

    let history = c.store().get_or_create(&key());
    let turns: Vec<(Role, &str)> = history.turns().map(|t| (t.role(), t.text())).collect();
    assert_eq!(
        turns,
        vec![(Role::User, "hi"), (Role::Assistant, "hello there")]
    );
}

/// **Test: the second ask sees the first exchange as context.**
#[tokio::test]
async fn follow_up_prompt_includes_history() {
    let backend = ScriptedBackend::new(Script::Reply("ok".to_string()));
    let messenger = MockMessenger::new();
    let c = controller(backend.clone(), messenger, SessionSettings::default());

    c.ask(&key(), &direct(), "first").await.unwrap();
    c.ask(&key(), &direct(), "second").await.unwrap();

    assert_eq!(
        backend.prompts()[1],
        "User: first\nAssistant: ok\nUser: second\nAssistant:"
    );
}

/// **Test: `reset` (any case, padded) clears history without calling the model.**
#[tokio::test]
async fn reset_clears_history_without_model_call() {
    let backend = ScriptedBackend::new(Script::Reply("ok".to_string()));
    let messenger = MockMessenger::new();
    let c = controller(backend.clone(), messenger.clone(), SessionSettings::default());

    c.ask(&key(), &direct(), "hello").await.unwrap();
    assert_eq!(c.store().len(&key()), 2);

    let outcome = c.ask(&key(), &direct(), "  RESET ").await.unwrap();

    assert_eq!(outcome, AskOutcome::Reset);
    assert!(c.store().get_or_create(&key()).is_empty());
    assert_eq!(backend.prompts().len(), 1);
    assert_eq!(
        messenger.sent().last(),
        Some(&Sent::Ephemeral(CHAT, RESET_CONFIRMATION.to_string()))
    );

    // A second reset on the now-empty chat behaves the same.
    assert_eq!(
        c.ask(&key(), &direct(), "reset").await.unwrap(),
        AskOutcome::Reset
    );
}

/// **Test: an empty prompt gets guidance; no model call, no history.**
#[tokio::test]
async fn empty_prompt_is_rejected() {
    let backend = ScriptedBackend::new(Script::Reply("unused".to_string()));
    let messenger = MockMessenger::new();
    let c = controller(backend.clone(), messenger.clone(), SessionSettings::default());

    let outcome = c.ask(&key(), &direct(), "   ").await.unwrap();

    assert_eq!(outcome, AskOutcome::Rejected);
    assert!(backend.prompts().is_empty());
    assert_eq!(c.store().conversation_count(), 0);
    assert_eq!(
        messenger.sent(),
        vec![Sent::Ephemeral(CHAT, EMPTY_PROMPT_GUIDANCE.to_string())]
    );
}

/// **Test: a backend failure sends one error message with the cause; only the user turn stays.**
#[tokio::test]
async fn backend_failure_reports_cause_and_keeps_user_turn() {
    let backend = ScriptedBackend::new(Script::Fail(BackendError::Request(
        "429 quota exceeded".to_string(),
    )));
    let messenger = MockMessenger::new();
    let c = controller(backend, messenger.clone(), SessionSettings::default());

    let outcome = c.ask(&key(), &direct(), "hi").await.unwrap();

    assert_eq!(
        outcome,
        AskOutcome::Failed {
            reason: BackendError::Request("429 quota exceeded".to_string())
        }
    );
    let messages = messenger.messages_to(CHAT);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("429 quota exceeded"));

    let history = c.store().get_or_create(&key());
    assert_eq!(history.len(), 1);
    assert_eq!(history.last().map(|t| t.role()), Some(Role::User));
}

/// **Test: a failure in one chat leaves another chat's history intact.**
#[tokio::test]
async fn failure_is_scoped_to_its_conversation() {
    let store = Arc::new(ConversationStore::default());
    let messenger = MockMessenger::new();
    let ok = SessionController::new(
        store.clone(),
        ScriptedBackend::new(Script::Reply("fine".to_string())),
        messenger.clone(),
        SessionSettings::default(),
    );
    let failing = SessionController::new(
        store.clone(),
        ScriptedBackend::new(Script::Fail(BackendError::EmptyChoices)),
        messenger,
        SessionSettings::default(),
    );

    let other = Destination::new(789, DestinationKind::Direct);
    ok.ask(&other.conversation_key(), &other, "hello").await.unwrap();
    failing.ask(&key(), &direct(), "hello").await.unwrap();

    assert_eq!(store.len(&other.conversation_key()), 2);
    assert_eq!(store.len(&key()), 1);
}

/// **Test: long replies are chunked with the group limit and sent in order.**
#[tokio::test]
async fn long_reply_is_chunked_for_group_destination() {
    let reply = (0..600)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ");
    let backend = ScriptedBackend::new(Script::Reply(reply.clone()));
    let messenger = MockMessenger::new();
    let c = controller(backend, messenger.clone(), SessionSettings::default());
    let group = Destination::new(-100, DestinationKind::Group);

    let outcome = c
        .ask(&group.conversation_key(), &group, "tell me a lot")
        .await
        .unwrap();

    let messages = messenger.messages_to(-100);
    assert!(messages.len() > 1);
    assert_eq!(outcome, AskOutcome::Answered { chunks: messages.len() });
    assert!(messages.iter().all(|m| m.chars().count() <= 1024));
    assert_eq!(messages.concat(), reply);
}

/// **Test: the same reply fits in fewer chunks in a direct chat.**
#[tokio::test]
async fn direct_destination_uses_larger_limit() {
    let reply = "abc ".repeat(500);
    let backend = ScriptedBackend::new(Script::Reply(reply.clone()));
    let messenger = MockMessenger::new();
    let c = controller(backend, messenger.clone(), SessionSettings::default());

    c.ask(&key(), &direct(), "go").await.unwrap();

    // Trimmed reply is 1999 chars.
    assert_eq!(messenger.messages_to(CHAT), vec![reply.trim().to_string()]);
}

/// **Test: a whitespace-only reply sends a notice and records no assistant turn.**
#[tokio::test]
async fn empty_reply_sends_notice() {
    let backend = ScriptedBackend::new(Script::Reply(" \n ".to_string()));
    let messenger = MockMessenger::new();
    let c = controller(backend, messenger.clone(), SessionSettings::default());

    let outcome = c.ask(&key(), &direct(), "hi").await.unwrap();

    assert_eq!(outcome, AskOutcome::EmptyReply);
    assert_eq!(messenger.messages_to(CHAT), vec![EMPTY_REPLY_NOTICE]);
    assert_eq!(c.store().len(&key()), 1);
}

/// **Test: a failed acknowledgement does not stop the request.**
#[tokio::test]
async fn failed_ack_is_ignored() {
    let backend = ScriptedBackend::new(Script::Reply("still here".to_string()));
    let messenger = MockMessenger::failing_ack();
    let c = controller(backend, messenger.clone(), SessionSettings::default());

    let outcome = c.ask(&key(), &direct(), "hi").await.unwrap();

    assert_eq!(outcome, AskOutcome::Answered { chunks: 1 });
    assert_eq!(messenger.messages_to(CHAT), vec!["still here"]);
}

/// **Test: the backend timeout turns a slow call into a reported failure.**
#[tokio::test(start_paused = true)]
async fn backend_timeout_fails_request() {
    let backend = ScriptedBackend::new(Script::Slow(Duration::from_secs(60), "late".to_string()));
    let messenger = MockMessenger::new();
    let settings = SessionSettings {
        backend_timeout: Some(Duration::from_secs(5)),
        ..SessionSettings::default()
    };
    let c = controller(backend, messenger.clone(), settings);

    let outcome = c.ask(&key(), &direct(), "hi").await.unwrap();

    assert_eq!(
        outcome,
        AskOutcome::Failed {
            reason: BackendError::Timeout(Duration::from_secs(5))
        }
    );
    assert!(messenger.messages_to(CHAT)[0].contains("timed out"));
}

/// **Test: an expired interaction discards the late model result without touching history.**
#[tokio::test(start_paused = true)]
async fn expired_interaction_discards_late_result() {
    let backend = ScriptedBackend::new(Script::Slow(Duration::from_secs(60), "late".to_string()));
    let messenger = MockMessenger::new();
    let settings = SessionSettings {
        interaction_timeout: Some(Duration::from_secs(10)),
        ..SessionSettings::default()
    };
    let c = controller(backend, messenger.clone(), settings);

    let outcome = c.ask(&key(), &direct(), "hi").await.unwrap();
    assert_eq!(outcome, AskOutcome::Cancelled);

    // Let the detached worker finish; its result must go nowhere.
    tokio::time::sleep(Duration::from_secs(120)).await;

    assert_eq!(c.store().len(&key()), 1);
    assert!(messenger.messages_to(CHAT).is_empty());
    assert_eq!(messenger.sent(), vec![Sent::Ack(CHAT)]);
}

/// **Test: a slow chat does not hold up another chat.**
#[tokio::test(start_paused = true)]
async fn slow_conversation_does_not_block_others() {
    let store = Arc::new(ConversationStore::default());
    let messenger = MockMessenger::new();
    let slow = SessionController::new(
        store.clone(),
        ScriptedBackend::new(Script::Slow(Duration::from_secs(30), "slow".to_string())),
        messenger.clone(),
        SessionSettings::default(),
    );
    let fast = SessionController::new(
        store.clone(),
        ScriptedBackend::new(Script::Reply("fast".to_string())),
        messenger.clone(),
        SessionSettings::default(),
    );

    let slow_dest = Destination::new(1, DestinationKind::Direct);
    let fast_dest = Destination::new(2, DestinationKind::Direct);
    let slow_task = tokio::spawn(async move {
        slow.ask(&slow_dest.conversation_key(), &slow_dest, "q").await
    });
    tokio::task::yield_now().await;

    fast.ask(&fast_dest.conversation_key(), &fast_dest, "q")
        .await
        .unwrap();
    assert_eq!(messenger.messages_to(2), vec!["fast"]);
    assert!(messenger.messages_to(1).is_empty());

    slow_task.await.unwrap().unwrap();
    assert_eq!(messenger.messages_to(1), vec!["slow"]);
}

/// **Test: history stays capped at 15 turns across many exchanges.**
#[tokio::test]
async fn history_is_capped_across_exchanges() {
    let backend = ScriptedBackend::new(Script::Reply("a".to_string()));
    let messenger = MockMessenger::new();
    let c = controller(backend, messenger, SessionSettings::default());

    for i in 0..8 {
        c.ask(&key(), &direct(), &format!("q{i}")).await.unwrap();
    }

    let history = c.store().get_or_create(&key());
    assert_eq!(history.len(), 15);
    assert_eq!(history.turns().next().map(|t| t.text()), Some("a"));
}

/// **Test: help is sent to the requester only.**
#[tokio::test]
async fn help_is_ephemeral() {
    let messenger = MockMessenger::new();
    let c = controller(
        ScriptedBackend::new(Script::Reply(String::new())),
        messenger.clone(),
        SessionSettings::default(),
    );

    c.help(&direct()).await.unwrap();

    assert_eq!(
        messenger.sent(),
        vec![Sent::Ephemeral(CHAT, HELP_TEXT.to_string())]
    );
}
