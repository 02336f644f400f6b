//! Skywrite host: the single-consumer drawing actor plus recording replay.

pub mod actor;
pub mod recording;
pub mod replay;

pub use actor::{Control, DrawingActor, DrawingHandle, spawn};
pub use recording::{load_recording, parse_line, parse_recording};
pub use replay::{ReplayReport, replay};
