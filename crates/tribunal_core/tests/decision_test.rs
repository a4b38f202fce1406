//! Tests for moderator decisions.

mod test_utils;

use std::sync::Arc;
use test_utils::{
    AUTHOR, GUILD, MOD_ROLE, MODERATOR, MockFetcher, MockPlatform, ORIGIN_CHANNEL,
    RecordingNotifier, RecordingSurface, filer, flagged_message, flagged_message_with_attachments,
    moderator, reporter,
};
use tribunal_core::{
    DecisionAction, DecisionActor, DecisionControl, DecisionHandler, DecisionOutcome,
    FlaggedMessage, ReportId, ReportStore, UserRef, notices,
};
use tribunal_error::ReportErrorKind;

/// File one report for `message` and return its id.
async fn file_message(
    platform: &Arc<MockPlatform>,
    store: &Arc<ReportStore>,
    message: FlaggedMessage,
) -> ReportId {
    let fetcher = MockFetcher::new().with_payload("https://cdn.test/a", b"aaa");
    filer(Arc::clone(platform), fetcher, Arc::clone(store))
        .file(&message, &reporter(), &RecordingNotifier::new())
        .await
        .expect("Report filed")
}

async fn file_report(platform: &Arc<MockPlatform>, store: &Arc<ReportStore>, content: &str) -> ReportId {
    file_message(platform, store, flagged_message(7, content)).await
}

fn handler(platform: &Arc<MockPlatform>, store: &Arc<ReportStore>) -> DecisionHandler {
    DecisionHandler::new(platform.clone(), Arc::clone(store), MOD_ROLE)
}

fn moderator_actor() -> DecisionActor {
    DecisionActor::new(Some(GUILD), moderator())
}

#[tokio::test]
async fn test_approve_restores_and_retires() {
    let platform = Arc::new(MockPlatform::new().with_moderator(MODERATOR));
    let store = Arc::new(ReportStore::new());
    let report_id = file_report(&platform, &store, "hello").await;
    let surface = RecordingSurface::new();

    let outcome = handler(&platform, &store)
        .decide(
            &DecisionControl::new(DecisionAction::Approve, report_id.clone()),
            &moderator_actor(),
            &surface,
        )
        .await
        .expect("Decision applied");

    assert!(matches!(outcome, DecisionOutcome::Approved { .. }));

    // Restored into the origin channel with attribution
    let sent = platform.channel_messages();
    assert_eq!(sent.len(), 1);
    let (channel, restored) = &sent[0];
    assert_eq!(channel, &ORIGIN_CHANNEL);
    assert!(restored.text().contains(&AUTHOR.mention()));
    assert!(restored.text().contains("restored after review"));
    assert!(restored.text().ends_with("hello"));

    // Controls disabled with outcome
    let resolutions = surface.resolutions();
    assert_eq!(resolutions.len(), 1);
    assert_eq!(resolutions[0].action(), &DecisionAction::Approve);
    assert_eq!(resolutions[0].describe(), "Approved by moderator");

    assert!(store.get(&report_id).is_none());
}

#[tokio::test]
async fn test_approve_reposts_captured_files() {
    let platform = Arc::new(MockPlatform::new().with_moderator(MODERATOR));
    let store = Arc::new(ReportStore::new());
    let message =
        flagged_message_with_attachments(7, "with file", &[("a.png", "https://cdn.test/a")]);
    let report_id = file_message(&platform, &store, message).await;

    handler(&platform, &store)
        .decide(
            &DecisionControl::new(DecisionAction::Approve, report_id),
            &moderator_actor(),
            &RecordingSurface::new(),
        )
        .await
        .expect("Decision applied");

    // First channel message is the attachment follow-up, second the restore
    let sent = platform.channel_messages();
    let (channel, restored) = sent.last().expect("Restored message");
    assert_eq!(channel, &ORIGIN_CHANNEL);
    assert_eq!(restored.files().len(), 1);
    assert_eq!(restored.files()[0].name(), "a.png");
}

#[tokio::test]
async fn test_approve_restores_long_content_in_full() {
    let platform = Arc::new(MockPlatform::new().with_moderator(MODERATOR));
    let store = Arc::new(ReportStore::new());
    let content = "a long post that keeps going ".repeat(140);
    let message =
        flagged_message_with_attachments(7, &content, &[("a.png", "https://cdn.test/a")]);
    let report_id = file_message(&platform, &store, message).await;

    let outcome = handler(&platform, &store)
        .decide(
            &DecisionControl::new(DecisionAction::Approve, report_id),
            &moderator_actor(),
            &RecordingSurface::new(),
        )
        .await
        .expect("Decision applied");

    let restored: Vec<_> = platform
        .channel_messages()
        .into_iter()
        .filter(|(channel, _)| *channel == ORIGIN_CHANNEL)
        .map(|(_, message)| message)
        .collect();
    assert!(restored.len() > 1);
    assert!(
        restored
            .iter()
            .all(|m| m.text().chars().count() <= notices::MESSAGE_LIMIT)
    );

    let DecisionOutcome::Approved {
        restored_messages, ..
    } = outcome
    else {
        panic!("Expected approval, got {outcome:?}");
    };
    assert_eq!(restored_messages.len(), restored.len());

    // Nothing dropped, files only on the final part
    let (_, lead) = restored[0].text().split_once("\n\n").expect("Header separator");
    let rejoined: String = std::iter::once(lead)
        .chain(restored[1..].iter().map(|m| m.text().as_str()))
        .collect();
    assert_eq!(rejoined, content);
    assert!(restored[..restored.len() - 1].iter().all(|m| m.files().is_empty()));
    assert_eq!(restored.last().expect("Last part").files().len(), 1);
}

#[tokio::test]
async fn test_second_decision_is_unknown() {
    let platform = Arc::new(MockPlatform::new().with_moderator(MODERATOR));
    let store = Arc::new(ReportStore::new());
    let report_id = file_report(&platform, &store, "hello").await;
    let handler = handler(&platform, &store);
    let control = DecisionControl::new(DecisionAction::Approve, report_id.clone());

    handler
        .decide(&control, &moderator_actor(), &RecordingSurface::new())
        .await
        .expect("First decision applied");

    let surface = RecordingSurface::new();
    let outcome = handler
        .decide(
            &DecisionControl::new(DecisionAction::Delete, report_id.clone()),
            &moderator_actor(),
            &surface,
        )
        .await
        .expect("Second decision answered");

    assert_eq!(outcome, DecisionOutcome::UnknownReport(report_id));
    assert_eq!(surface.rejections(), vec![notices::REPORT_UNAVAILABLE.to_string()]);
    assert!(surface.resolutions().is_empty());
    // Only the first restore went out, and no removal DM
    assert_eq!(platform.channel_messages().len(), 1);
    assert!(platform.dms_to(AUTHOR).is_empty());
}

#[tokio::test]
async fn test_non_moderator_changes_nothing() {
    let platform = Arc::new(MockPlatform::new());
    let store = Arc::new(ReportStore::new());
    let report_id = file_report(&platform, &store, "hello").await;
    let surface = RecordingSurface::new();
    let bystander = UserRef::new(999u64, "bystander");

    for action in [DecisionAction::Approve, DecisionAction::Delete] {
        let outcome = handler(&platform, &store)
            .decide(
                &DecisionControl::new(action, report_id.clone()),
                &DecisionActor::new(Some(GUILD), bystander.clone()),
                &surface,
            )
            .await
            .expect("Decision answered");
        assert_eq!(outcome, DecisionOutcome::Unauthorized(*bystander.id()));
    }

    assert!(store.contains(&report_id));
    assert!(platform.channel_messages().is_empty());
    assert!(platform.dms_to(AUTHOR).is_empty());
    assert!(surface.resolutions().is_empty());
    assert_eq!(
        surface.rejections(),
        vec![notices::MODERATORS_ONLY.to_string(); 2]
    );
}

#[tokio::test]
async fn test_decision_outside_guild_is_unauthorized() {
    let platform = Arc::new(MockPlatform::new().with_moderator(MODERATOR));
    let store = Arc::new(ReportStore::new());
    let report_id = file_report(&platform, &store, "hello").await;

    let outcome = handler(&platform, &store)
        .decide(
            &DecisionControl::new(DecisionAction::Delete, report_id.clone()),
            &DecisionActor::new(None, moderator()),
            &RecordingSurface::new(),
        )
        .await
        .expect("Decision answered");

    assert_eq!(outcome, DecisionOutcome::Unauthorized(MODERATOR));
    assert!(store.contains(&report_id));
}

#[tokio::test]
async fn test_role_lookup_failure_is_unauthorized() {
    let platform = Arc::new(
        MockPlatform::new()
            .with_moderator(MODERATOR)
            .with_role_lookup_failure(),
    );
    let store = Arc::new(ReportStore::new());
    let report_id = file_report(&platform, &store, "hello").await;

    let outcome = handler(&platform, &store)
        .decide(
            &DecisionControl::new(DecisionAction::Approve, report_id.clone()),
            &moderator_actor(),
            &RecordingSurface::new(),
        )
        .await
        .expect("Decision answered");

    assert_eq!(outcome, DecisionOutcome::Unauthorized(MODERATOR));
    assert!(store.contains(&report_id));
}

#[tokio::test]
async fn test_delete_notifies_author() {
    let platform = Arc::new(MockPlatform::new().with_moderator(MODERATOR));
    let store = Arc::new(ReportStore::new());
    let report_id = file_report(&platform, &store, "hello").await;
    let surface = RecordingSurface::new();

    let outcome = handler(&platform, &store)
        .decide(
            &DecisionControl::new(DecisionAction::Delete, report_id.clone()),
            &moderator_actor(),
            &surface,
        )
        .await
        .expect("Decision applied");

    assert_eq!(
        outcome,
        DecisionOutcome::Deleted {
            report_id: report_id.clone(),
            author_notified: true,
        }
    );
    let dms = platform.dms_to(AUTHOR);
    assert_eq!(dms.len(), 1);
    assert!(dms[0].contains("Test Guild"));
    assert_eq!(
        surface.resolutions()[0].describe(),
        "Deleted by moderator; author notified by DM"
    );
    assert!(platform.channel_messages().is_empty());
    assert!(store.get(&report_id).is_none());
}

#[tokio::test]
async fn test_delete_with_closed_dms_still_resolves() {
    let platform = Arc::new(
        MockPlatform::new()
            .with_moderator(MODERATOR)
            .with_closed_dms(AUTHOR),
    );
    let store = Arc::new(ReportStore::new());
    let report_id = file_report(&platform, &store, "hello").await;
    let surface = RecordingSurface::new();

    let outcome = handler(&platform, &store)
        .decide(
            &DecisionControl::new(DecisionAction::Delete, report_id.clone()),
            &moderator_actor(),
            &surface,
        )
        .await
        .expect("DM failure is not fatal");

    assert_eq!(
        outcome,
        DecisionOutcome::Deleted {
            report_id: report_id.clone(),
            author_notified: false,
        }
    );
    let resolutions = surface.resolutions();
    assert_eq!(resolutions.len(), 1);
    assert!(!resolutions[0].author_notified());
    assert!(resolutions[0].describe().contains("could not be notified"));
    assert!(store.get(&report_id).is_none());
}

#[tokio::test]
async fn test_delete_falls_back_when_guild_name_unknown() {
    let platform = Arc::new(
        MockPlatform::new()
            .with_moderator(MODERATOR)
            .without_guild_name(),
    );
    let store = Arc::new(ReportStore::new());
    let report_id = file_report(&platform, &store, "hello").await;

    handler(&platform, &store)
        .decide(
            &DecisionControl::new(DecisionAction::Delete, report_id),
            &moderator_actor(),
            &RecordingSurface::new(),
        )
        .await
        .expect("Decision applied");

    assert!(platform.dms_to(AUTHOR)[0].contains("the server"));
}

#[tokio::test]
async fn test_failed_restore_keeps_report_pending() {
    let platform = Arc::new(MockPlatform::new().with_moderator(MODERATOR));
    let store = Arc::new(ReportStore::new());
    let report_id = file_report(&platform, &store, "hello").await;

    let failing = Arc::new(
        MockPlatform::new()
            .with_moderator(MODERATOR)
            .with_channel_send_failure(),
    );
    let surface = RecordingSurface::new();

    let err = handler(&failing, &store)
        .decide(
            &DecisionControl::new(DecisionAction::Approve, report_id.clone()),
            &moderator_actor(),
            &surface,
        )
        .await
        .expect_err("Restore failure surfaces");

    assert!(matches!(err.kind(), ReportErrorKind::RestoreFailed { .. }));
    assert!(store.contains(&report_id));
    assert!(surface.resolutions().is_empty());
}

#[tokio::test]
async fn test_concurrent_decisions_apply_once() {
    let platform = Arc::new(MockPlatform::new().with_moderator(MODERATOR));
    let store = Arc::new(ReportStore::new());
    let report_id = file_report(&platform, &store, "hello").await;
    let handler = Arc::new(handler(&platform, &store));

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let handler = Arc::clone(&handler);
            let control = DecisionControl::new(DecisionAction::Approve, report_id.clone());
            tokio::spawn(async move {
                handler
                    .decide(&control, &moderator_actor(), &RecordingSurface::new())
                    .await
                    .expect("Decision answered")
            })
        })
        .collect();

    let mut approved = 0;
    for task in tasks {
        if matches!(task.await.expect("Task completed"), DecisionOutcome::Approved { .. }) {
            approved += 1;
        }
    }

    assert_eq!(approved, 1);
    assert_eq!(platform.channel_messages().len(), 1);
}
