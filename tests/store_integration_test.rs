// Integration tests for the toast store public API

use std::sync::{Arc, Mutex};
use std::time::Duration;

use toastd::notifications::{
    ToastActionButton, ToastConfig, ToastContent, ToastId, ToastState, ToastStore, ToastUpdate,
    ToastVariant,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn recorder(store: &ToastStore) -> Arc<Mutex<Vec<ToastState>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    // Dropping the subscription handle keeps the subscriber registered
    let _subscription = store.subscribe(move |state: &ToastState| {
        sink.lock().unwrap().push(state.clone());
    });
    seen
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn test_full_lifecycle() {
    init_logging();
    let store = ToastStore::new(ToastConfig::new(3, Duration::from_millis(500))).unwrap();
    let seen = recorder(&store);

    let saving = store.toast(
        ToastContent::titled("Saving")
            .with_description("draft.md")
            .with_action(ToastActionButton::new("Undo", "Undo save")),
    );
    let failed = store.toast(
        ToastContent::titled("Sync failed").with_variant(ToastVariant::Destructive),
    );

    assert!(saving.update(ToastUpdate::new().with_title("Saved")));
    assert!(failed.dismiss());

    let state = store.snapshot();
    assert_eq!(state.ids(), vec![ToastId::from(2), ToastId::from(1)]);
    assert_eq!(state.get(&ToastId::from(1)).unwrap().title.as_deref(), Some("Saved"));
    assert_eq!(state.get(&ToastId::from(1)).unwrap().description.as_deref(), Some("draft.md"));
    assert!(!state.get(&ToastId::from(2)).unwrap().open);

    advance(501).await;

    assert_eq!(store.snapshot().ids(), vec![ToastId::from(1)]);
    assert_eq!(seen.lock().unwrap().len(), 5);

    let stats = store.stats();
    assert_eq!(stats.created, 2);
    assert_eq!(stats.updated, 1);
    assert_eq!(stats.dismissed, 1);
    assert_eq!(stats.removed, 1);
}

#[tokio::test(start_paused = true)]
async fn test_default_limit_keeps_single_toast() {
    init_logging();
    let store = ToastStore::new(ToastConfig::default()).unwrap();

    store.toast(ToastContent::titled("first"));
    store.toast(ToastContent::titled("second"));

    let state = store.snapshot();
    assert_eq!(state.len(), 1);
    assert_eq!(state.front().unwrap().title.as_deref(), Some("second"));
    assert_eq!(store.stats().evicted, 1);
}

#[tokio::test(start_paused = true)]
async fn test_watch_channel_follows_store() {
    init_logging();
    let store = ToastStore::new(ToastConfig::new(2, Duration::from_millis(10))).unwrap();
    let mut rx = store.watch();

    let handle = store.toast(ToastContent::titled("ping"));
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().len(), 1);

    handle.dismiss();
    advance(20).await;
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_empty());
}

#[tokio::test]
async fn test_shutdown_stops_everything() {
    init_logging();
    let store = ToastStore::new(ToastConfig::new(2, Duration::from_secs(60))).unwrap();
    let seen = recorder(&store);

    let handle = store.toast(ToastContent::titled("A"));
    handle.dismiss();
    assert_eq!(store.pending_removals(), 1);

    store.shutdown();
    assert!(store.is_shutdown());
    assert_eq!(store.pending_removals(), 0);
    assert_eq!(store.subscriber_count(), 0);

    store.toast(ToastContent::titled("B"));
    assert_eq!(store.snapshot().len(), 1);
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn test_store_requires_runtime() {
    assert!(ToastStore::new(ToastConfig::default()).is_err());
}
