//! Single-consumer drawing actor.
//!
//! The detector callback and the renderer live on other tasks or threads.
//! The actor is the only place session state and the document are
//! mutated: frames, particle ticks, and control messages are handled one
//! at a time from a single `select!` loop.
//!
//! Frames arrive through a `watch` channel, so a burst of detections while
//! a step is running collapses to the newest one instead of queueing.

use std::sync::Arc;
use std::time::Duration;
use sw_core::config::EngineConfig;
use sw_core::geometry::CanvasSize;
use sw_core::landmarks::DetectionResult;
use sw_core::model::Document;
use sw_core::particles::ParticleSimulator;
use sw_editor::{DocCommand, GestureMachine, SessionState, Snapshot, UiEvent, apply};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Out-of-band requests from the host UI.
#[derive(Debug, Clone)]
pub enum Control {
    /// Wipe strokes and particles.
    Clear,
}

/// Cloneable sending side of a running actor.
#[derive(Clone)]
pub struct DrawingHandle {
    frames: Arc<watch::Sender<Option<DetectionResult>>>,
    canvas: Arc<watch::Sender<CanvasSize>>,
    control: mpsc::UnboundedSender<Control>,
    snapshots: watch::Receiver<Arc<Snapshot>>,
}

impl DrawingHandle {
    /// Deliver a detector result. Overwrites any frame not yet consumed.
    pub fn submit(&self, detection: DetectionResult) {
        self.frames.send_replace(Some(detection));
    }

    pub fn resize(&self, canvas: CanvasSize) {
        self.canvas.send_replace(canvas);
    }

    pub fn clear(&self) {
        if self.control.send(Control::Clear).is_err() {
            log::warn!("clear requested after the drawing actor stopped");
        }
    }

    /// Subscribe to published snapshots.
    pub fn snapshots(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshots.clone()
    }

    pub fn latest(&self) -> Arc<Snapshot> {
        self.snapshots.borrow().clone()
    }
}

pub struct DrawingActor {
    machine: GestureMachine,
    state: SessionState,
    doc: Document,
    sim: ParticleSimulator,
    frames: watch::Receiver<Option<DetectionResult>>,
    canvas: watch::Receiver<CanvasSize>,
    control: mpsc::UnboundedReceiver<Control>,
    snapshots: watch::Sender<Arc<Snapshot>>,
    tick: Duration,
}

/// Start an actor on the current tokio runtime.
///
/// The actor stops once every `DrawingHandle` clone has been dropped.
pub fn spawn(config: EngineConfig, canvas: CanvasSize) -> (DrawingHandle, JoinHandle<()>) {
    let (frames_tx, frames_rx) = watch::channel(None);
    let (canvas_tx, canvas_rx) = watch::channel(canvas);
    let (control_tx, control_rx) = mpsc::unbounded_channel();

    let state = SessionState::new(&config);
    let doc = Document::new();
    let initial = Arc::new(Snapshot::capture(&state, &doc, canvas));
    let (snap_tx, snap_rx) = watch::channel(initial);

    let actor = DrawingActor {
        tick: config.tick_interval(),
        machine: GestureMachine::new(config),
        state,
        doc,
        sim: ParticleSimulator::new(),
        frames: frames_rx,
        canvas: canvas_rx,
        control: control_rx,
        snapshots: snap_tx,
    };
    let handle = DrawingHandle {
        frames: Arc::new(frames_tx),
        canvas: Arc::new(canvas_tx),
        control: control_tx,
        snapshots: snap_rx,
    };
    (handle, tokio::spawn(actor.run()))
}

impl DrawingActor {
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_tick = Instant::now();
        log::debug!("drawing actor started ({:?} tick)", self.tick);

        loop {
            tokio::select! {
                changed = self.frames.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let detection = self.frames.borrow_and_update().clone();
                    if let Some(detection) = detection {
                        self.on_frame(&detection);
                    }
                }
                Some(control) = self.control.recv() => self.on_control(control),
                now = ticker.tick() => {
                    let elapsed = now - last_tick;
                    last_tick = now;
                    if self.doc.particles.is_empty() {
                        continue;
                    }
                    self.sim.advance(&mut self.doc.particles, elapsed);
                }
            }
            self.publish();
        }
        log::debug!("drawing actor stopped");
    }

    fn on_frame(&mut self, detection: &DetectionResult) {
        let canvas = *self.canvas.borrow();
        let events =
            self.machine
                .step_detection(detection, canvas, &mut self.state, &mut self.doc);
        for event in &events {
            match event {
                UiEvent::MenuToggled { .. } | UiEvent::ClickApplied(_) => {
                    log::info!("{event:?} ({})", self.state.status_line());
                }
                _ => log::trace!("{event:?}"),
            }
        }
    }

    fn on_control(&mut self, control: Control) {
        match control {
            Control::Clear => {
                apply(&mut self.doc, DocCommand::Clear);
                self.state.is_drawing = false;
                log::info!("drawing cleared");
            }
        }
    }

    fn publish(&self) {
        let canvas = *self.canvas.borrow();
        let snapshot = Snapshot::capture(&self.state, &self.doc, canvas);
        self.snapshots.send_replace(Arc::new(snapshot));
    }
}
