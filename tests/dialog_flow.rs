//! End-to-end dialog flows against a mock profile service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use profile_editor::{
    ApiClient, DraftEdit, EditProfileDialog, ImageFile, ImageUploadState, Notification,
    NotificationVariant, Notifier, ProfileRecord, SubmitOutcome,
};

fn amal() -> ProfileRecord {
    ProfileRecord {
        id: 7,
        first_name: Some("Amal".to_string()),
        last_name: Some("B.".to_string()),
        gender_id: Some(2),
        user_gender: None,
        dob: NaiveDate::from_ymd_opt(1990, 1, 1),
        profile_img_url: Some("https://cdn.example.com/a.png".to_string()),
        mobile_no: Some("+212600000000".to_string()),
        email_address: Some("amal@example.com".to_string()),
        bio: Some("".to_string()),
    }
}

struct Harness {
    server: MockServer,
    dialog: EditProfileDialog,
    notifications: UnboundedReceiver<Notification>,
    refetches: Arc<AtomicUsize>,
}

async fn harness() -> Harness {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gender/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "id": 1, "title": "Male" },
                { "id": 2, "title": "Female" }
            ]
        })))
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri(), 5).expect("api client");
    let (notifier, notifications) = Notifier::channel();
    let refetches = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&refetches);
    let dialog = EditProfileDialog::new(api, amal(), notifier, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    Harness {
        server,
        dialog,
        notifications,
        refetches,
    }
}

async fn open_and_wait_for_options(harness: &mut Harness) {
    if let Some(fetch) = harness.dialog.open() {
        fetch.await.expect("option fetch task");
    }
}

#[tokio::test]
async fn editing_the_bio_and_submitting_commits_and_closes() {
    let mut h = harness().await;

    Mock::given(method("PUT"))
        .and(path("/user/update/7"))
        .and(body_json(json!({
            "first_name": "Amal",
            "last_name": "B.",
            "gender": 2,
            "dob": "1990-01-01",
            "profile_img_url": "https://cdn.example.com/a.png",
            "mobile_no": "+212600000000",
            "bio": "Hi"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&h.server)
        .await;

    open_and_wait_for_options(&mut h).await;
    assert_eq!(h.dialog.gender_options().len(), 2);

    h.dialog.edit(DraftEdit::Bio("Hi".to_string()));
    let outcome = h.dialog.submit().await;

    assert_eq!(outcome, SubmitOutcome::Completed);
    assert!(!h.dialog.is_open());
    assert_eq!(h.refetches.load(Ordering::SeqCst), 1);

    let notification = h.notifications.try_recv().expect("success notification");
    assert_eq!(notification.variant, NotificationVariant::Info);
    assert_eq!(notification.title, "Success");
}

#[tokio::test]
async fn missing_first_name_is_rejected_without_a_network_call() {
    let mut h = harness().await;

    Mock::given(method("PUT"))
        .and(path("/user/update/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&h.server)
        .await;

    open_and_wait_for_options(&mut h).await;
    h.dialog.edit(DraftEdit::FirstName(String::new()));

    let outcome = h.dialog.submit().await;
    match outcome {
        SubmitOutcome::Rejected(reasons) => {
            assert!(reasons.iter().any(|r| r.contains("First name")));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }

    assert!(h.dialog.is_open());
    assert_eq!(h.refetches.load(Ordering::SeqCst), 0);

    let notification = h.notifications.try_recv().expect("validation notification");
    assert_eq!(notification.variant, NotificationVariant::Error);
    assert_eq!(notification.title, "Validation Error");
}

#[tokio::test]
async fn concurrent_submits_send_exactly_one_request() {
    let mut h = harness().await;

    Mock::given(method("PUT"))
        .and(path("/user/update/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(100))
                .set_body_json(json!({ "success": true })),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    open_and_wait_for_options(&mut h).await;

    let (first, second) = tokio::join!(h.dialog.submit(), h.dialog.submit());
    assert_eq!(first, SubmitOutcome::Completed);
    assert_eq!(second, SubmitOutcome::InFlight);
    assert_eq!(h.refetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejected_commit_keeps_the_dialog_open_with_the_draft_preserved() {
    let mut h = harness().await;

    Mock::given(method("PUT"))
        .and(path("/user/update/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "profile locked"
        })))
        .expect(2)
        .mount(&h.server)
        .await;

    open_and_wait_for_options(&mut h).await;
    h.dialog.edit(DraftEdit::Bio("Hi".to_string()));

    let outcome = h.dialog.submit().await;
    assert_eq!(outcome, SubmitOutcome::Failed("profile locked".to_string()));
    assert!(h.dialog.is_open());
    assert_eq!(h.dialog.draft().bio, "Hi");
    assert_eq!(h.refetches.load(Ordering::SeqCst), 0);

    let notification = h.notifications.try_recv().expect("failure notification");
    assert_eq!(notification.variant, NotificationVariant::Error);
    assert_eq!(notification.title, "Failed");
    assert_eq!(notification.description, "profile locked");

    // The controller is back to Idle: the user can retry as-is.
    let retry = h.dialog.submit().await;
    assert_eq!(retry, SubmitOutcome::Failed("profile locked".to_string()));
}

#[tokio::test]
async fn upload_failure_preserves_the_prior_image() {
    let mut h = harness().await;

    Mock::given(method("POST"))
        .and(path("/upload/single"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "too large"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    open_and_wait_for_options(&mut h).await;

    let upload = h
        .dialog
        .select_image(ImageFile::new("big.png", "image/png", vec![0u8; 64]));
    upload.await.expect("upload task");

    assert_eq!(
        h.dialog.upload_state(),
        ImageUploadState::Failed {
            reason: "too large".to_string()
        }
    );
    assert_eq!(h.dialog.draft().profile_img_url, "https://cdn.example.com/a.png");

    let notification = h.notifications.try_recv().expect("failure notification");
    assert_eq!(notification.variant, NotificationVariant::Error);
    assert_eq!(notification.title, "Image Upload Failed");
    assert_eq!(notification.description, "too large");

    // The rest of the form stays editable.
    h.dialog.edit(DraftEdit::Bio("still here".to_string()));
    assert_eq!(h.dialog.draft().bio, "still here");
}

#[tokio::test]
async fn uploaded_image_flows_into_the_commit_payload() {
    let mut h = harness().await;

    Mock::given(method("POST"))
        .and(path("/upload/single"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "fileUrl": "https://cdn.example.com/u/new.png" }
        })))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/user/update/7"))
        .and(body_json(json!({
            "first_name": "Amal",
            "last_name": "B.",
            "gender": 2,
            "dob": "1990-01-01",
            "profile_img_url": "https://cdn.example.com/u/new.png",
            "mobile_no": "+212600000000",
            "bio": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&h.server)
        .await;

    open_and_wait_for_options(&mut h).await;

    let upload = h
        .dialog
        .select_image(ImageFile::new("new.png", "image/png", vec![1, 2, 3]));
    upload.await.expect("upload task");

    let uploaded = h.notifications.try_recv().expect("upload notification");
    assert_eq!(uploaded.variant, NotificationVariant::Info);
    assert_eq!(uploaded.title, "Image Upload Successful");
    assert_eq!(h.dialog.draft().profile_img_url, "https://cdn.example.com/u/new.png");

    let outcome = h.dialog.submit().await;
    assert_eq!(outcome, SubmitOutcome::Completed);
}

#[tokio::test]
async fn clearing_the_image_commits_an_explicit_removal() {
    let mut h = harness().await;

    Mock::given(method("PUT"))
        .and(path("/user/update/7"))
        .and(body_json(json!({
            "first_name": "Amal",
            "last_name": "B.",
            "gender": 2,
            "dob": "1990-01-01",
            "profile_img_url": "",
            "mobile_no": "+212600000000",
            "bio": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&h.server)
        .await;

    open_and_wait_for_options(&mut h).await;
    h.dialog.clear_image();

    assert_eq!(h.dialog.upload_state(), ImageUploadState::Empty);
    assert_eq!(h.dialog.draft().profile_img_url, "");
    assert_eq!(h.dialog.submit().await, SubmitOutcome::Completed);
}

#[tokio::test]
async fn closing_discards_an_in_flight_upload() {
    let mut h = harness().await;

    Mock::given(method("POST"))
        .and(path("/upload/single"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(100))
                .set_body_json(json!({
                    "success": true,
                    "data": { "fileUrl": "https://cdn.example.com/u/late.png" }
                })),
        )
        .mount(&h.server)
        .await;

    open_and_wait_for_options(&mut h).await;

    let upload = h
        .dialog
        .select_image(ImageFile::new("late.png", "image/png", vec![1, 2, 3]));
    h.dialog.close();
    upload.await.expect("upload task");

    // The stale resolution was dropped: no state change, no notification.
    h.dialog.open();
    assert_eq!(h.dialog.upload_state(), ImageUploadState::Empty);
    assert_eq!(h.dialog.draft().profile_img_url, "https://cdn.example.com/a.png");
    assert!(h.notifications.try_recv().is_err());
}

#[tokio::test]
async fn option_fetch_failure_degrades_silently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gender/get"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/user/update/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri(), 5).expect("api client");
    let (notifier, mut notifications) = Notifier::channel();
    let dialog = EditProfileDialog::new(api, amal(), notifier, || {});

    if let Some(fetch) = dialog.open() {
        fetch.await.expect("option fetch task");
    }

    assert!(dialog.gender_options().is_empty());
    assert!(notifications.try_recv().is_err());

    // Reopening does not retry the fetch; the form still submits.
    dialog.close();
    assert!(dialog.open().is_none());
    assert_eq!(dialog.submit().await, SubmitOutcome::Completed);
    let success = notifications.try_recv().expect("success notification");
    assert_eq!(success.title, "Success");
}
