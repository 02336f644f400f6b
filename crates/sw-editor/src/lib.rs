pub mod commands;
pub mod debounce;
pub mod machine;
pub mod session;
pub mod view;

pub use commands::{DocCommand, apply};
pub use debounce::{ClickDebouncer, PendingClick};
pub use machine::{GestureMachine, UiEvent};
pub use session::SessionState;
pub use view::Snapshot;
