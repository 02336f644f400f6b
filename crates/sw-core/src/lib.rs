pub mod config;
pub mod geometry;
pub mod gesture;
pub mod hit;
pub mod landmarks;
pub mod model;
pub mod particles;

pub use config::EngineConfig;
pub use geometry::{CanvasSize, NormalizedPoint, Point, to_canvas};
pub use gesture::{GestureSignals, GestureThresholds, classify};
pub use hit::{ButtonAction, ButtonId, ButtonKind, UiButton, hit_test, layout_buttons};
pub use landmarks::{DetectionResult, GestureFrame, HandLandmarks};
pub use model::*;
pub use particles::ParticleSimulator;
