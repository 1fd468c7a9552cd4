//! Create/edit submission flow: tag handling, toast lifecycle, reset, and
//! deferred navigation

mod common;

use std::time::Duration;

use bindery_admin::domains::library::{
    FormEffect, LibraryFormMessage, LibraryFormValues, SubmissionKind, SubmitError,
    TagOption,
};
use bindery_admin::domains::ui::feedback_ui::ToastLevel;
use bindery_admin::domains::ui::navigation::Route;
use bindery_admin::infrastructure::RepositoryError;
use bindery_model::{LibraryPattern, LibraryScanMode};
use common::{Harness, NAVIGATION_DELAY, fill};

fn tag_options(names: &[&str]) -> Vec<TagOption> {
    names.iter().map(|name| TagOption::new(*name)).collect()
}

#[tokio::test(start_paused = true)]
async fn create_resets_form_and_navigates_home_after_delay() {
    let harness = Harness::new();
    let mut form = harness.create_form();
    fill(&mut form, "Comics", "/srv/comics");
    form.update(LibraryFormMessage::SetConvertRarToZip(true));

    let library = form.submit().await.expect("create succeeds");
    assert_eq!(library.name, "Comics");

    let requests = harness.api.create_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].library_options.id, None);
    assert!(requests[0].library_options.convert_rar_to_zip);
    assert_eq!(requests[0].scan_mode, Some(LibraryScanMode::Batched));

    assert_eq!(harness.toast_messages(), ["Creating library...", "Library created!"]);
    assert_eq!(form.values(), &LibraryFormValues::default());

    let started = tokio::time::Instant::now();
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert!(harness.navigator.routes().is_empty());

    let navigation = form.take_pending_navigation().expect("navigation scheduled");
    assert!(navigation.finished().await);
    assert!(started.elapsed() >= NAVIGATION_DELAY);
    assert_eq!(harness.navigator.routes(), [Route::Home]);
}

#[tokio::test(start_paused = true)]
async fn dismissing_success_toast_navigates_early() {
    let harness = Harness::new();
    let mut form = harness.create_form();
    fill(&mut form, "Comics", "/srv/comics");
    form.submit().await.unwrap();

    let success = harness
        .toasts
        .toasts()
        .into_iter()
        .find(|toast| toast.level == ToastLevel::Success)
        .expect("success toast visible");

    tokio::time::sleep(Duration::from_millis(50)).await;
    harness.toasts.dismiss(success.id);

    let started = tokio::time::Instant::now();
    assert!(form.take_pending_navigation().unwrap().finished().await);
    assert!(started.elapsed() < NAVIGATION_DELAY);
    assert_eq!(harness.navigator.routes(), [Route::Home]);
}

#[tokio::test(start_paused = true)]
async fn dropping_form_before_delay_prevents_navigation() {
    let harness = Harness::new();
    let mut form = harness.create_form();
    fill(&mut form, "Comics", "/srv/comics");
    form.submit().await.unwrap();
    assert!(form.has_pending_navigation());

    tokio::time::sleep(Duration::from_millis(300)).await;
    drop(form);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(harness.navigator.routes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn closing_form_cancels_taken_navigation() {
    let harness = Harness::new();
    let mut form = harness.create_form();
    fill(&mut form, "Comics", "/srv/comics");
    form.submit().await.unwrap();

    let navigation = form.take_pending_navigation().unwrap();
    form.close();
    assert!(!navigation.finished().await);
    assert!(harness.navigator.routes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn create_partitions_and_creates_missing_tags() {
    let harness = Harness::new();
    let mut form = harness.create_form();
    fill(&mut form, "Comics", "/srv/comics");
    form.update(LibraryFormMessage::SetTags(tag_options(&["Action", "New"])));

    let pending = form.begin_submit().unwrap();
    let partition = pending.plan().tags().clone();
    assert_eq!(pending.plan().kind(), SubmissionKind::Create);
    assert_eq!(
        partition.existing.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        ["Action"]
    );
    assert_eq!(partition.to_create, ["New"]);

    let result = pending.run().await;
    form.finish_submit(result).unwrap();

    assert_eq!(harness.api.tag_requests(), [vec!["New".to_string()]]);
    let sent: Vec<_> = harness.api.create_requests()[0]
        .tags
        .clone()
        .unwrap_or_default()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(sent, ["Action", "New"]);
    assert!(harness.catalog.contains("New"));
}

#[tokio::test(start_paused = true)]
async fn edit_merges_options_and_reports_removed_tags() {
    let harness = Harness::new();
    let mut form = harness.edit_form("Sample Library");
    let original = form.editing().cloned().unwrap();

    form.update(LibraryFormMessage::SetTags(tag_options(&["Drama", "Fresh"])));
    form.update(LibraryFormMessage::SetLibraryPattern("COLLECTION_BASED".into()));
    form.update(LibraryFormMessage::SetScanMode("SYNC".into()));

    let saved = form.submit().await.expect("unchanged name and path are valid");

    let request = harness.api.edit_requests().remove(0);
    assert_eq!(request.library.id, original.id);
    assert_eq!(request.library.library_options.id, original.library_options.id);
    assert_eq!(request.library.library_options.library_id, Some(original.id));
    assert_eq!(
        request.library.library_options.library_pattern,
        LibraryPattern::CollectionBased
    );
    assert_eq!(request.scan_mode, Some(LibraryScanMode::Sync));
    let removed: Vec<_> = request
        .removed_tags
        .unwrap_or_default()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(removed, ["Action"]);

    assert_eq!(harness.toast_messages(), ["Updating library...", "Updates saved!"]);
    assert_eq!(harness.api.tag_requests(), [vec!["Fresh".to_string()]]);

    // Defaults now follow the saved library
    assert_eq!(form.editing().map(|lib| lib.id), Some(saved.id));
    assert_eq!(form.values().tags.as_ref().map(Vec::len), Some(2));
}

#[tokio::test(start_paused = true)]
async fn edit_without_tag_changes_omits_removed_tags() {
    let harness = Harness::new();
    let mut form = harness.edit_form("Sample Library");
    form.update(LibraryFormMessage::SetDescription("Pull list".into()));

    form.submit().await.unwrap();
    let request = harness.api.edit_requests().remove(0);
    assert_eq!(request.removed_tags, None);
    assert_eq!(request.library.description.as_deref(), Some("Pull list"));
    assert!(harness.api.tag_requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_mutation_shows_generic_toast_and_keeps_values() {
    let harness = Harness::new();
    harness.api.set_fail_library_mutations(true);
    let mut form = harness.create_form();
    fill(&mut form, "Comics", "/srv/comics");

    let err = form.submit().await.unwrap_err();
    assert!(matches!(err, SubmitError::Create(RepositoryError::CreateFailed(_))));
    assert_eq!(
        harness.toast_messages(),
        ["Creating library...", "Something went wrong."]
    );
    assert_eq!(form.values().name, "Comics");
    assert!(!form.is_submitting());
    assert!(form.take_pending_navigation().is_none());

    harness.api.set_fail_library_mutations(false);
    assert!(form.submit().await.is_ok(), "resubmitting recovers");
}

#[tokio::test(start_paused = true)]
async fn tag_creation_failure_aborts_submission() {
    let harness = Harness::new();
    harness.api.set_fail_tag_creation(true);
    let mut form = harness.create_form();
    fill(&mut form, "Comics", "/srv/comics");
    form.update(LibraryFormMessage::SetTags(tag_options(&["New"])));

    let err = form.submit().await.unwrap_err();
    assert!(matches!(err, SubmitError::TagCreation(_)));
    assert!(harness.api.create_requests().is_empty());

    let last = harness.toasts.history().pop().unwrap();
    assert_eq!(last.level, ToastLevel::Error);
    assert_eq!(last.message, "Something went wrong when creating the tags.");
}

#[tokio::test(start_paused = true)]
async fn submit_while_in_flight_is_ignored() {
    let harness = Harness::new();
    harness.api.set_latency(Some(Duration::from_millis(200)));
    let mut form = harness.create_form();
    fill(&mut form, "Comics", "/srv/comics");

    let Some(FormEffect::Submit(pending)) = form.update(LibraryFormMessage::Submit) else {
        panic!("valid form should submit");
    };
    assert!(form.update(LibraryFormMessage::Submit).is_none());
    assert!(form.is_submitting());

    let result = pending.run().await;
    form.finish_submit(result).unwrap();
    assert_eq!(harness.api.create_requests().len(), 1);
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn typed_tag_is_created_and_offered() {
    let harness = Harness::new();
    let mut form = harness.create_form();

    let Some(FormEffect::CreateTag(name)) =
        form.update(LibraryFormMessage::CreateTag("Horror".into()))
    else {
        panic!("expected a create-tag effect");
    };
    assert!(form.create_tag(&name).await);
    assert!(form.tag_options().contains(&TagOption::new("Horror")));

    harness.api.set_fail_tag_creation(true);
    assert!(!form.create_tag("Mystery").await);
    assert!(!harness.catalog.contains("Mystery"));
}

#[tokio::test(start_paused = true)]
async fn abandoned_submission_frees_the_form() {
    let harness = Harness::new();
    let mut form = harness.create_form();
    fill(&mut form, "Comics", "/srv/comics");

    let Some(FormEffect::Submit(pending)) = form.update(LibraryFormMessage::Submit) else {
        panic!("valid form should submit");
    };
    assert!(form.is_submitting());
    drop(pending);
    assert!(!form.is_submitting());

    let library = form.submit().await.expect("resubmit after abandoning");
    assert_eq!(library.name, "Comics");
    assert_eq!(harness.api.create_requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn aborted_submission_task_frees_the_form() {
    let harness = Harness::new();
    harness.api.set_latency(Some(Duration::from_secs(5)));
    let mut form = harness.create_form();
    fill(&mut form, "Comics", "/srv/comics");

    let pending = form.begin_submit().unwrap();
    let task = tokio::spawn(pending.run());
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(form.is_submitting());

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());
    assert!(!form.is_submitting());
    assert!(form.begin_submit().is_ok());
}
