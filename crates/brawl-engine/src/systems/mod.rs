pub mod combat;
pub mod render;
