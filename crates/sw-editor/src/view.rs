//! Read-only snapshots handed to a renderer.

use crate::session::SessionState;
use serde::Serialize;
use sw_core::geometry::CanvasSize;
use sw_core::hit::{MenuPanel, UiButton, layout_buttons, menu_panel};
use sw_core::model::{Color, Document, Mode, Particle, Stroke};

#[derive(Debug, Clone, Serialize)]
pub struct ButtonView {
    #[serde(flatten)]
    pub button: UiButton,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuView {
    pub panel: MenuPanel,
    pub buttons: Vec<ButtonView>,
}

/// Everything needed to paint one frame. Owns its data, so the renderer
/// never holds a handle into live state.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub strokes: Vec<Stroke>,
    pub particles: Vec<Particle>,
    pub mode: Mode,
    pub menu_open: bool,
    pub brush_color: Color,
    pub brush_size: f32,
    pub status: String,
    /// Present while the menu is open on a measured canvas.
    pub menu: Option<MenuView>,
}

impl Snapshot {
    pub fn capture(state: &SessionState, doc: &Document, canvas: CanvasSize) -> Self {
        let menu = (state.menu_open && !canvas.is_empty()).then(|| MenuView {
            panel: menu_panel(canvas),
            buttons: layout_buttons(canvas)
                .into_iter()
                .map(|button| ButtonView {
                    active: button.is_active(state.mode, state.brush_color, state.brush_size),
                    button,
                })
                .collect(),
        });

        Self {
            strokes: doc.visible_strokes().cloned().collect(),
            particles: doc.particles.clone(),
            mode: state.mode,
            menu_open: state.menu_open,
            brush_color: state.brush_color,
            brush_size: state.brush_size,
            status: state.status_line(),
            menu,
        }
    }
}
