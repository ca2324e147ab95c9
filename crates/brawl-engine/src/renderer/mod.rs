pub mod camera;
pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use camera::Camera2D;
pub use instance::{RenderBuffer, RenderInstance, FRAME_INFO_FLOATS};
pub use traits::{Color, DrawLayer, DrawSurface, Fill, HudSnapshot, Overlay, OverlayKind, Quad};
