pub mod bindings;
pub mod queue;

pub use bindings::{Action, KeyBindings};
pub use queue::{InputEvent, InputQueue, InputState};
