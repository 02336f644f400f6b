//! Per-session gesture state.
//!
//! One instance lives for the duration of a drawing session and is only
//! ever mutated by the gesture state machine.

use crate::debounce::ClickDebouncer;
use sw_core::config::EngineConfig;
use sw_core::hit::ButtonAction;
use sw_core::model::{Color, Mode, clamp_width};

#[derive(Debug, Clone)]
pub struct SessionState {
    pub mode: Mode,
    pub brush_color: Color,
    pub brush_size: f32,
    pub eraser_size: f32,
    pub menu_open: bool,
    /// A pinch stroke is in progress.
    pub is_drawing: bool,
    /// Palm-open signal from the previous single-hand frame, for edge
    /// detection.
    pub was_palm_open: bool,
    /// A two-hand scale gesture is in progress.
    pub is_scaling: bool,
    /// Index-tip distance at the previous scale frame, in canvas units.
    pub base_scale_dist: f32,
    pub click: ClickDebouncer,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl SessionState {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            mode: Mode::Drawing,
            brush_color: config.brush_color,
            brush_size: clamp_width(config.brush_size),
            eraser_size: clamp_width(config.eraser_size),
            menu_open: false,
            is_drawing: false,
            was_palm_open: false,
            is_scaling: false,
            base_scale_dist: 0.0,
            click: ClickDebouncer::new(config.debounce_ms),
        }
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.brush_size = clamp_width(size);
    }

    pub fn set_eraser_size(&mut self, size: f32) {
        self.eraser_size = clamp_width(size);
    }

    /// Apply a menu selection.
    pub fn apply_click(&mut self, action: ButtonAction) {
        match action {
            ButtonAction::Color(color) => {
                self.brush_color = color;
                self.mode = Mode::Drawing;
            }
            ButtonAction::Tool(mode) => self.mode = mode,
            ButtonAction::Size(size) => self.set_brush_size(size),
        }
    }

    /// Color and width for a new stroke in the current mode.
    pub fn stroke_style(&self) -> (Color, f32, bool) {
        match self.mode {
            Mode::Drawing => (self.brush_color, self.brush_size, false),
            Mode::Eraser => (Color::TRANSPARENT, self.eraser_size, true),
        }
    }

    /// One-line status for display, e.g. `mode: drawing | menu: closed`.
    pub fn status_line(&self) -> String {
        format!(
            "mode: {} | menu: {}",
            self.mode.as_str(),
            if self.menu_open { "open" } else { "closed" }
        )
    }
}
