//! Deterministic replay of a recording through the state machine.
//!
//! Unlike the live actor, replay never drops frames: every record is
//! stepped in order and particles advance by the timestamp deltas.

use serde::Serialize;
use std::time::Duration;
use sw_core::config::EngineConfig;
use sw_core::geometry::CanvasSize;
use sw_core::landmarks::DetectionResult;
use sw_core::model::Document;
use sw_core::particles::ParticleSimulator;
use sw_editor::{GestureMachine, SessionState, Snapshot, UiEvent};

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub frames: usize,
    pub events: Vec<UiEvent>,
    pub snapshot: Snapshot,
}

pub fn replay(
    detections: &[DetectionResult],
    config: &EngineConfig,
    canvas: CanvasSize,
    seed: u64,
) -> ReplayReport {
    let machine = GestureMachine::new(config.clone());
    let mut state = SessionState::new(config);
    let mut doc = Document::with_seed(seed);
    let mut sim = ParticleSimulator::with_seed(seed);
    let mut events = Vec::new();
    let mut last_ts: Option<u64> = None;

    for detection in detections {
        if let Some(prev) = last_ts {
            let dt = detection.timestamp_ms.saturating_sub(prev);
            sim.advance(&mut doc.particles, Duration::from_millis(dt));
        }
        last_ts = Some(detection.timestamp_ms);
        events.extend(machine.step_detection(detection, canvas, &mut state, &mut doc));
    }
    log::info!(
        "replayed {} frames: {} strokes, {} particles ({})",
        detections.len(),
        doc.strokes.len(),
        doc.particles.len(),
        state.status_line()
    );

    ReplayReport {
        frames: detections.len(),
        events,
        snapshot: Snapshot::capture(&state, &doc, canvas),
    }
}
