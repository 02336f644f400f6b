//! Drives a live drawing actor through its handle.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use sw_core::config::EngineConfig;
use sw_core::geometry::{CanvasSize, NormalizedPoint};
use sw_core::landmarks::{DetectionResult, INDEX_TIP, MIDDLE_TIP, RING_TIP, THUMB_TIP};
use sw_editor::Snapshot;
use sw_host::spawn;
use tokio::sync::watch;
use tokio::time::timeout;

const CANVAS: CanvasSize = CanvasSize::new(1000.0, 1000.0);

fn pinch_at(t: u64, x: f32, y: f32) -> DetectionResult {
    DetectionResult {
        timestamp_ms: t,
        hands: vec![vec![NormalizedPoint::new(x, y); 21]],
    }
}

/// Index and middle up, ring curled, thumb away from the index tip.
fn victory_at(t: u64) -> DetectionResult {
    let mut hand = vec![NormalizedPoint::new(0.5, 0.6); 21];
    hand[THUMB_TIP] = NormalizedPoint::new(0.8, 0.8);
    hand[INDEX_TIP] = NormalizedPoint::new(0.5, 0.3);
    hand[MIDDLE_TIP] = NormalizedPoint::new(0.55, 0.3);
    hand[RING_TIP] = NormalizedPoint::new(0.5, 0.7);
    DetectionResult {
        timestamp_ms: t,
        hands: vec![hand],
    }
}

/// Wait until a published snapshot satisfies `pred`.
async fn wait_for(
    rx: &mut watch::Receiver<Arc<Snapshot>>,
    pred: impl Fn(&Snapshot) -> bool,
) -> Arc<Snapshot> {
    wait_within(Duration::from_secs(2), rx, pred).await
}

async fn wait_within(
    limit: Duration,
    rx: &mut watch::Receiver<Arc<Snapshot>>,
    pred: impl Fn(&Snapshot) -> bool,
) -> Arc<Snapshot> {
    timeout(limit, async {
        loop {
            {
                let snap = rx.borrow_and_update();
                if pred(&snap) {
                    return snap.clone();
                }
            }
            rx.changed().await.expect("actor stopped");
        }
    })
    .await
    .expect("timed out waiting for snapshot")
}

#[tokio::test]
async fn initial_snapshot_is_empty() {
    let (handle, _task) = spawn(EngineConfig::default(), CANVAS);
    let snap = handle.latest();
    assert!(snap.strokes.is_empty());
    assert_eq!(snap.status, "mode: drawing | menu: closed");
}

#[tokio::test]
async fn frames_become_strokes() {
    let (handle, _task) = spawn(EngineConfig::default(), CANVAS);
    let mut rx = handle.snapshots();

    handle.submit(pinch_at(0, 0.3, 0.3));
    wait_for(&mut rx, |s| s.strokes.len() == 1).await;
    handle.submit(pinch_at(33, 0.35, 0.3));
    let snap = wait_for(&mut rx, |s| s.strokes.first().is_some_and(|st| st.points.len() == 2)).await;
    assert_eq!(snap.strokes.len(), 1);
}

#[tokio::test]
async fn clear_wipes_document() {
    let (handle, _task) = spawn(EngineConfig::default(), CANVAS);
    let mut rx = handle.snapshots();

    handle.submit(pinch_at(0, 0.3, 0.3));
    wait_for(&mut rx, |s| !s.strokes.is_empty()).await;
    handle.clear();
    wait_for(&mut rx, |s| s.strokes.is_empty()).await;
}

#[tokio::test]
async fn resize_applies_to_later_frames() {
    let (handle, _task) = spawn(EngineConfig::default(), CANVAS);
    let mut rx = handle.snapshots();

    handle.resize(CanvasSize::new(200.0, 100.0));
    // The resize itself publishes nothing; the next frame sees it.
    handle.submit(pinch_at(0, 0.5, 0.5));
    let snap = wait_for(&mut rx, |s| !s.strokes.is_empty()).await;
    let p = snap.strokes[0].points[0];
    assert!((p.x - 100.0).abs() < 1e-3 && (p.y - 50.0).abs() < 1e-3, "got {p:?}");
}

#[tokio::test]
async fn burst_of_frames_keeps_only_latest() {
    let (handle, _task) = spawn(EngineConfig::default(), CANVAS);
    let mut rx = handle.snapshots();

    // No await between submits, so the actor cannot run in between.
    for i in 0..10u64 {
        handle.submit(pinch_at(i * 33, 0.1 + i as f32 * 0.05, 0.5));
    }
    let snap = wait_for(&mut rx, |s| !s.strokes.is_empty()).await;
    let points = &snap.strokes[0].points;
    assert!(points.len() < 10, "applied {} of 10 frames", points.len());
    let last = points[points.len() - 1];
    assert!((last.x - 550.0).abs() < 1e-3, "got {last:?}");
}

#[tokio::test]
async fn dissolved_particles_fade_on_the_tick() {
    let (handle, _task) = spawn(EngineConfig::default(), CANVAS);
    let mut rx = handle.snapshots();

    for i in 0..6u64 {
        handle.submit(pinch_at(i * 33, 0.2 + i as f32 * 0.02, 0.5));
        let n = i as usize + 1;
        wait_for(&mut rx, move |s| {
            s.strokes.first().is_some_and(|st| st.points.len() == n)
        })
        .await;
    }

    handle.submit(victory_at(300));
    let snap = wait_for(&mut rx, |s| !s.particles.is_empty()).await;
    assert!(snap.strokes.is_empty());
    assert_eq!(snap.particles.len(), 2); // ceil(6 / 5)

    // About 50 ticks at 60 Hz; no frames arrive in the meantime.
    wait_within(Duration::from_secs(5), &mut rx, |s| s.particles.is_empty()).await;
}

#[tokio::test]
async fn dropping_handle_stops_actor() {
    let (handle, task) = spawn(EngineConfig::default(), CANVAS);
    drop(handle);
    timeout(Duration::from_secs(2), task)
        .await
        .expect("actor did not stop")
        .expect("actor panicked");
}
