// SPDX-License-Identifier: MPL-2.0
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;
use tokio::sync::broadcast::error::TryRecvError;
use toast_relay::config::{self, Config};
use toast_relay::notifications::{
    ConfirmSpec, Event, Kind, NotificationCenter, NotificationId, NotificationSpec, Notifier,
    Resolution, State,
};

fn center() -> NotificationCenter {
    NotificationCenter::new(Config::default()).expect("runtime available")
}

async fn advance_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn state_of(center: &NotificationCenter, id: &NotificationId) -> Option<State> {
    center.get(id).map(|n| n.state())
}

fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&count);
    (count, move || {
        hits.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test(start_paused = true)]
async fn ids_are_pairwise_distinct() {
    let center = center();
    let mut ids = HashSet::new();
    for i in 0..200 {
        let id = if i % 3 == 0 {
            center.confirm(ConfirmSpec::new(format!("confirm-{i}")))
        } else {
            center.add(NotificationSpec::info(format!("info-{i}")))
        };
        assert!(ids.insert(id), "id reused");
    }
}

#[tokio::test(start_paused = true)]
async fn list_is_in_reverse_call_order() {
    let center = center();
    let ids: Vec<_> = (0..5)
        .map(|i| center.add(NotificationSpec::success(format!("n{i}"))))
        .collect();

    let listed: Vec<_> = center.list().into_iter().map(|n| n.id().clone()).collect();
    let expected: Vec<_> = ids.into_iter().rev().collect();
    assert_eq!(listed, expected);
}

#[tokio::test(start_paused = true)]
async fn auto_close_timing() {
    let center = center();
    let a = center.add(
        NotificationSpec::success("Saved").auto_close(Duration::from_millis(5_000)),
    );
    assert_eq!(state_of(&center, &a), Some(State::Active));

    advance_ms(5_001).await;
    assert_eq!(state_of(&center, &a), Some(State::Closing));

    advance_ms(298).await; // t = 5299
    assert_eq!(state_of(&center, &a), Some(State::Closing));

    advance_ms(2).await; // t = 5301
    assert!(center.list().iter().all(|n| n.id() != &a));
    assert_eq!(center.pending_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn manual_close_cancels_auto_close() {
    let center = center();
    let mut events = center.subscribe();
    let a = center.add(NotificationSpec::info("x").auto_close(Duration::from_millis(5_000)));

    advance_ms(1_000).await;
    center.close(&a);
    assert_eq!(state_of(&center, &a), Some(State::Closing));

    advance_ms(301).await; // t = 1301
    assert!(center.get(&a).is_none());

    assert!(matches!(events.try_recv(), Ok(Event::Added { .. })));
    assert_eq!(events.try_recv(), Ok(Event::Closing { id: a.clone() }));
    assert_eq!(events.try_recv(), Ok(Event::Removed { id: a.clone() }));

    advance_ms(5_000).await; // well past the original auto-close deadline
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    assert_eq!(center.pending_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn manual_close_twice_is_harmless() {
    let center = center();
    let a = center.add(NotificationSpec::warning("x"));

    center.close(&a);
    advance_ms(200).await;
    center.close(&a); // must not restart the removal delay
    advance_ms(101).await;

    assert!(center.get(&a).is_none());
}

#[tokio::test(start_paused = true)]
async fn remove_is_idempotent() {
    let center = center();
    let keep = center.add(NotificationSpec::info("keep"));
    let a = center.add(NotificationSpec::info("drop me"));

    center.remove(&a);
    let once: Vec<_> = center.list().into_iter().map(|n| n.id().clone()).collect();
    center.remove(&a);
    let twice: Vec<_> = center.list().into_iter().map(|n| n.id().clone()).collect();

    assert_eq!(once, twice);
    assert_eq!(once, vec![keep]);
    center.remove(&NotificationId::from("never-issued"));
    assert_eq!(center.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn remove_during_closing_skips_removal_delay() {
    let center = center();
    let a = center.add(NotificationSpec::error("x"));

    center.close(&a);
    assert_eq!(center.pending_timers(), 1);
    center.remove(&a);

    assert!(center.get(&a).is_none());
    assert_eq!(center.pending_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn confirmation_resolves_exactly_once() {
    let center = center();
    let (confirmed, f) = counter();
    let (cancelled, g) = counter();
    let id = center.confirm(ConfirmSpec::new("Delete?").on_confirm(f).on_cancel(g));

    assert!(center.resolve_cancel(&id));
    assert!(!center.resolve_confirm(&id));
    assert!(!center.resolve_cancel(&id));

    assert_eq!(cancelled.load(Ordering::SeqCst), 1);
    assert_eq!(confirmed.load(Ordering::SeqCst), 0);
    assert_eq!(state_of(&center, &id), Some(State::Closing));

    advance_ms(301).await;
    assert!(center.get(&id).is_none());
    assert!(!center.resolve_confirm(&id));
    assert_eq!(confirmed.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn confirmation_never_auto_closes() {
    let center = center();
    let id = center.confirm(ConfirmSpec::new("Proceed?"));

    let n = center.get(&id).unwrap();
    assert_eq!(n.kind(), Kind::Confirm);
    assert_eq!(n.auto_close(), None);
    assert_eq!(n.title(), Some("Confirm action"));
    let labels = n.labels().unwrap();
    assert_eq!(labels.confirm_text, "Confirm");
    assert_eq!(labels.cancel_text, "Cancel");

    advance_ms(3_600_000).await;
    assert_eq!(state_of(&center, &id), Some(State::Active));
    assert_eq!(center.pending_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn dismissing_unresolved_confirmation_cancels_it() {
    let center = center();
    let (confirmed, f) = counter();
    let (cancelled, g) = counter();
    let closed = center.confirm(ConfirmSpec::new("a").on_confirm(f).on_cancel(g));
    let (removed_cancel, h) = counter();
    let removed = center.confirm(ConfirmSpec::new("b").on_cancel(h));

    center.close(&closed);
    center.remove(&removed);
    center.remove(&removed);
    assert!(!center.resolve_confirm(&closed));

    assert_eq!(cancelled.load(Ordering::SeqCst), 1);
    assert_eq!(confirmed.load(Ordering::SeqCst), 0);
    assert_eq!(removed_cancel.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn clear_evicts_everything_and_cancels_confirmations() {
    let center = center();
    let (cancelled, g) = counter();
    center.add(NotificationSpec::success("a"));
    center.add(NotificationSpec::error("b"));
    let c = center.confirm(ConfirmSpec::new("c").on_cancel(g));
    let mut events = center.subscribe();

    center.clear();

    assert_eq!(
        events.try_recv(),
        Ok(Event::Resolved {
            id: c.clone(),
            resolution: Resolution::Cancelled
        })
    );
    let mut removed = 0;
    while let Ok(event) = events.try_recv() {
        assert!(matches!(event, Event::Removed { .. }));
        removed += 1;
    }
    assert_eq!(removed, 3);
    assert!(center.is_empty());
    assert_eq!(center.pending_timers(), 0);
    assert_eq!(cancelled.load(Ordering::SeqCst), 1);
    assert!(!center.resolve_cancel(&c));
    assert_eq!(cancelled.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn default_durations_per_kind() {
    let center = center();
    let error = center.add(NotificationSpec::new(Kind::Error, "x"));
    let warning = center.add(NotificationSpec::new(Kind::Warning, "y"));
    let plain = center.add(NotificationSpec::default());

    assert_eq!(
        center.get(&error).unwrap().auto_close(),
        Some(Duration::from_millis(7_000))
    );
    assert_eq!(
        center.get(&warning).unwrap().auto_close(),
        Some(Duration::from_millis(6_000))
    );
    let plain = center.get(&plain).unwrap();
    assert_eq!(plain.kind(), Kind::Info);
    assert_eq!(plain.message(), "");
    assert_eq!(plain.auto_close(), Some(Duration::from_millis(5_000)));
}

#[tokio::test(start_paused = true)]
async fn kinds_close_in_duration_order() {
    let center = center();
    let success = center.add(NotificationSpec::success("s"));
    let warning = center.add(NotificationSpec::warning("w"));
    let error = center.add(NotificationSpec::error("e"));

    advance_ms(5_001).await;
    assert_eq!(state_of(&center, &success), Some(State::Closing));
    assert_eq!(state_of(&center, &warning), Some(State::Active));

    advance_ms(1_000).await; // t = 6001
    assert!(center.get(&success).is_none());
    assert_eq!(state_of(&center, &warning), Some(State::Closing));
    assert_eq!(state_of(&center, &error), Some(State::Active));

    advance_ms(1_300).await; // t = 7301
    assert!(center.is_empty());
}

/// A collaborator that only sees the `Notifier` seam.
fn report_save<N: Notifier>(notifier: &N, outcome: Result<(), String>) -> NotificationId {
    match outcome {
        Ok(()) => notifier.add(NotificationSpec::success("Record saved")),
        Err(reason) => notifier.add(NotificationSpec::error(reason).with_title("Save failed")),
    }
}

#[tokio::test(start_paused = true)]
async fn collaborators_use_notifier_trait() {
    let center = center();
    report_save(&center, Ok(()));
    let failed = report_save(&center, Err("network unreachable".to_string()));

    let list = Notifier::list(&center);
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id(), &failed);
    assert_eq!(list[0].kind(), Kind::Error);
    assert_eq!(list[0].title(), Some("Save failed"));

    Notifier::remove(&center, &failed);
    assert_eq!(center.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_resolution_fires_one_callback() {
    let center = center();
    for _ in 0..20 {
        let (confirmed, f) = counter();
        let (cancelled, g) = counter();
        let id = center.confirm(ConfirmSpec::new("race").on_confirm(f).on_cancel(g));

        let threads: Vec<_> = (0..8)
            .map(|i| {
                let center = center.clone();
                let id = id.clone();
                std::thread::spawn(move || {
                    if i % 2 == 0 {
                        center.resolve_confirm(&id)
                    } else {
                        center.resolve_cancel(&id)
                    }
                })
            })
            .collect();
        let winners = threads
            .into_iter()
            .map(|t| t.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(
            confirmed.load(Ordering::SeqCst) + cancelled.load(Ordering::SeqCst),
            1
        );
    }
}

#[test]
fn center_usable_from_threads_outside_runtime() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()
        .unwrap();
    let center = NotificationCenter::with_runtime(Config::default(), runtime.handle().clone());

    let ids: Vec<_> = (0..4)
        .map(|i| {
            let center = center.clone();
            std::thread::spawn(move || center.add(NotificationSpec::info(format!("t{i}"))))
        })
        .map(|t| t.join().unwrap())
        .collect();

    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 4);
    assert_eq!(center.len(), 4);
    assert_eq!(center.pending_timers(), 4);

    center.clear();
    assert_eq!(center.pending_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn config_file_drives_center_defaults() {
    let dir = tempdir().expect("failed to create temp dir");
    std::fs::write(
        dir.path().join("notifications.toml"),
        "[durations]\nerror_ms = 2000\nremoval_delay_ms = 100\n\n[confirm]\ntitle = \"Please confirm\"\n",
    )
    .expect("failed to write config");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    let center = NotificationCenter::new(config).unwrap();

    let error = center.add(NotificationSpec::error("boom"));
    let confirm = center.confirm(ConfirmSpec::new("ok?"));
    assert_eq!(center.get(&confirm).unwrap().title(), Some("Please confirm"));

    advance_ms(2_001).await;
    assert_eq!(state_of(&center, &error), Some(State::Closing));
    advance_ms(100).await;
    assert!(center.get(&error).is_none());
}
