//! Menu layout and hit testing: point → button lookup.
//!
//! The layout is a pure function of canvas size and is recomputed on every
//! call.

use crate::geometry::{CanvasSize, Point};
use crate::model::{Color, Mode};
use serde::Serialize;

/// Button radius as a fraction of canvas width.
pub const BUTTON_RADIUS: f32 = 0.08;
/// Row and column pitch as a fraction of canvas width.
pub const BUTTON_PITCH: f32 = 0.10;
/// Top row center as a fraction of canvas height.
pub const TOP_ROW: f32 = 0.10;
/// Left column center as a fraction of canvas width.
pub const LEFT_COLUMN: f32 = 0.15;
/// Extra reach added to every button radius when testing a fingertip.
pub const HIT_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ButtonId {
    Red,
    Green,
    Blue,
    Pen,
    Eraser,
    Large,
    Small,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ButtonKind {
    Color,
    Tool,
    Size,
}

/// What a click on a button selects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ButtonAction {
    Color(Color),
    Tool(Mode),
    Size(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UiButton {
    pub id: ButtonId,
    pub label: &'static str,
    pub center: Point,
    pub radius: f32,
    pub action: ButtonAction,
}

impl UiButton {
    pub fn kind(&self) -> ButtonKind {
        match self.action {
            ButtonAction::Color(_) => ButtonKind::Color,
            ButtonAction::Tool(_) => ButtonKind::Tool,
            ButtonAction::Size(_) => ButtonKind::Size,
        }
    }

    /// Whether this button reflects the current brush selection, for
    /// highlighting.
    pub fn is_active(&self, mode: Mode, brush_color: Color, brush_size: f32) -> bool {
        match self.action {
            ButtonAction::Color(c) => mode == Mode::Drawing && c == brush_color,
            ButtonAction::Tool(m) => m == mode,
            ButtonAction::Size(s) => s == brush_size,
        }
    }
}

/// Translucent panel drawn behind the buttons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MenuPanel {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

pub fn menu_panel(canvas: CanvasSize) -> MenuPanel {
    MenuPanel {
        x: 50.0,
        y: 50.0,
        width: (canvas.width - 100.0).max(0.0),
        height: canvas.height * 0.4,
    }
}

/// Lay out the seven menu buttons for a canvas.
///
/// Row 0 holds the colors, row 1 the tools, row 2 the sizes.
pub fn layout_buttons(canvas: CanvasSize) -> [UiButton; 7] {
    let w = canvas.width;
    let pitch = w * BUTTON_PITCH;
    let radius = w * BUTTON_RADIUS;
    let at = |col: f32, row: f32| {
        Point::new(
            w * LEFT_COLUMN + col * pitch,
            canvas.height * TOP_ROW + row * pitch,
        )
    };
    let button = |id, label, center, action| UiButton {
        id,
        label,
        center,
        radius,
        action,
    };

    [
        button(ButtonId::Red, "Red", at(0.0, 0.0), ButtonAction::Color(Color::RED)),
        button(ButtonId::Green, "Green", at(1.0, 0.0), ButtonAction::Color(Color::GREEN)),
        button(ButtonId::Blue, "Blue", at(2.0, 0.0), ButtonAction::Color(Color::BLUE)),
        button(ButtonId::Pen, "Pen", at(0.0, 1.0), ButtonAction::Tool(Mode::Drawing)),
        button(ButtonId::Eraser, "Eraser", at(1.0, 1.0), ButtonAction::Tool(Mode::Eraser)),
        button(ButtonId::Large, "Large", at(0.0, 2.0), ButtonAction::Size(20.0)),
        button(ButtonId::Small, "Small", at(1.0, 2.0), ButtonAction::Size(5.0)),
    ]
}

/// Find the button under `point`, widening each button by `margin`.
///
/// Hit zones may overlap; the button whose center is closest wins.
/// Returns `None` on an unmeasured canvas.
pub fn hit_test(canvas: CanvasSize, point: Point, margin: f32) -> Option<UiButton> {
    if canvas.is_empty() {
        return None;
    }
    layout_buttons(canvas)
        .into_iter()
        .map(|b| (b, b.center.distance(point)))
        .filter(|(b, d)| *d < b.radius + margin)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(b, _)| b)
}
