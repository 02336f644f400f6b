//! Gesture state machine: one validated frame in, document commands and
//! UI events out.
//!
//! ## Frame handling
//!
//! | Hands | Behavior |
//! |-------|----------|
//! | 0 | End any scale gesture; nothing else changes |
//! | 2 | Two-hand pinch-zoom about the index-tip midpoint |
//! | 1 | Menu toggle (palm-open edge), then menu hover or draw/erase/dissolve |
//!
//! Frames must be stepped strictly in arrival order and never concurrently;
//! the host serializes them onto one consumer.

use crate::commands::{DocCommand, apply};
use crate::session::SessionState;
use serde::Serialize;
use sw_core::config::EngineConfig;
use sw_core::geometry::{CanvasSize, to_canvas};
use sw_core::gesture::classify;
use sw_core::hit::{ButtonId, hit_test};
use sw_core::landmarks::{DetectionResult, GestureFrame, HandLandmarks};
use sw_core::model::{Document, Mode};

/// Observable outcomes of a step, for status display and feedback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UiEvent {
    MenuToggled { open: bool },
    /// A button was hit and armed in the debounce window.
    ClickQueued(ButtonId),
    /// A debounced click fired and changed the session.
    ClickApplied(ButtonId),
    StrokeStarted { eraser: bool },
    StrokeEnded,
    Dissolved { particles: usize },
    ScaleStarted,
    Scaled { factor: f32 },
}

/// Stateless driver; all mutable state lives in `SessionState` and
/// `Document`.
#[derive(Debug, Clone, Default)]
pub struct GestureMachine {
    config: EngineConfig,
}

impl GestureMachine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate raw detector output and step it. Malformed detections are
    /// stepped as "no hands".
    pub fn step_detection(
        &self,
        detection: &DetectionResult,
        canvas: CanvasSize,
        state: &mut SessionState,
        doc: &mut Document,
    ) -> Vec<UiEvent> {
        let frame = GestureFrame::from_detection_lossy(detection, canvas);
        self.step(&frame, state, doc)
    }

    /// Fire a due menu click, if any.
    pub fn poll_clicks(&self, now_ms: u64, state: &mut SessionState) -> Option<UiEvent> {
        let click = state.click.poll(now_ms)?;
        state.apply_click(click.action);
        log::info!("menu click {:?} applied ({})", click.button, state.status_line());
        Some(UiEvent::ClickApplied(click.button))
    }

    /// Advance the session by one frame.
    pub fn step(
        &self,
        frame: &GestureFrame,
        state: &mut SessionState,
        doc: &mut Document,
    ) -> Vec<UiEvent> {
        let mut events = Vec::new();
        events.extend(self.poll_clicks(frame.timestamp_ms, state));

        if frame.canvas.is_empty() {
            log::debug!("canvas not measured yet; skipping frame @{}ms", frame.timestamp_ms);
            state.is_scaling = false;
            return events;
        }

        let mut commands = Vec::new();
        match frame.hands.as_slice() {
            [] => {
                state.is_scaling = false;
                state.click.release();
            }
            [first, second] => {
                state.click.release();
                self.two_hands(first, second, frame.canvas, state, &mut commands, &mut events);
            }
            [hand, ..] => {
                state.is_scaling = false;
                self.one_hand(hand, frame, state, doc, &mut commands, &mut events);
            }
        }

        for command in commands {
            let is_dissolve = matches!(command, DocCommand::Dissolve { .. });
            let n = apply(doc, command);
            if is_dissolve {
                log::info!("dissolved strokes into {n} particles");
                events.push(UiEvent::Dissolved { particles: n });
            }
        }
        events
    }

    fn two_hands(
        &self,
        first: &HandLandmarks,
        second: &HandLandmarks,
        canvas: CanvasSize,
        state: &mut SessionState,
        commands: &mut Vec<DocCommand>,
        events: &mut Vec<UiEvent>,
    ) {
        let a = to_canvas(first.index_tip(), canvas);
        let b = to_canvas(second.index_tip(), canvas);
        let dist = a.distance(b);

        if !state.is_scaling {
            // Baseline frame: record distance only.
            state.is_scaling = true;
            state.base_scale_dist = dist;
            if state.is_drawing {
                state.is_drawing = false;
                events.push(UiEvent::StrokeEnded);
            }
            log::debug!("scale gesture started at distance {dist:.1}");
            events.push(UiEvent::ScaleStarted);
            return;
        }

        let factor = 1.0 + (dist - state.base_scale_dist) * self.config.scale_gain;
        state.base_scale_dist = dist;
        if factor.is_nan() || factor <= 0.0 {
            // Would fold the drawing through the center.
            log::debug!("skipping degenerate scale factor {factor}");
            return;
        }
        commands.push(DocCommand::Rescale {
            center: a.midpoint(b),
            factor,
        });
        events.push(UiEvent::Scaled { factor });
    }

    fn one_hand(
        &self,
        hand: &HandLandmarks,
        frame: &GestureFrame,
        state: &mut SessionState,
        doc: &Document,
        commands: &mut Vec<DocCommand>,
        events: &mut Vec<UiEvent>,
    ) {
        let signals = classify(hand, self.config.thresholds());

        if signals.palm_open && !state.was_palm_open {
            state.menu_open = !state.menu_open;
            state.is_drawing = false;
            if !state.menu_open {
                state.click.cancel();
            }
            log::debug!("menu toggled ({})", state.status_line());
            events.push(UiEvent::MenuToggled {
                open: state.menu_open,
            });
        }
        state.was_palm_open = signals.palm_open;

        let index_tip = to_canvas(hand.index_tip(), frame.canvas);

        if state.menu_open {
            match hit_test(frame.canvas, index_tip, self.config.hit_margin) {
                Some(button) => {
                    if state.click.submit(&button, frame.timestamp_ms) {
                        events.push(UiEvent::ClickQueued(button.id));
                    }
                }
                None => state.click.release(),
            }
            return;
        }

        if signals.victory {
            state.is_drawing = false;
            if !doc.strokes.is_empty() {
                commands.push(DocCommand::Dissolve {
                    max_particles: self.config.max_particles,
                });
            }
            return;
        }

        if !signals.pinch {
            if state.is_drawing {
                state.is_drawing = false;
                events.push(UiEvent::StrokeEnded);
            }
            return;
        }

        let working = index_tip.midpoint(to_canvas(hand.thumb_tip(), frame.canvas));
        if !state.is_drawing || doc.strokes.is_empty() {
            let (color, width, is_eraser) = state.stroke_style();
            state.is_drawing = true;
            commands.push(DocCommand::StartStroke {
                origin: working,
                color,
                width,
                is_eraser,
            });
            events.push(UiEvent::StrokeStarted { eraser: is_eraser });
            return;
        }

        commands.push(DocCommand::ExtendStroke { point: working });
        if state.mode == Mode::Eraser {
            commands.push(DocCommand::EraseNear {
                center: working,
                radius: state.eraser_size,
            });
        }
    }
}
