pub mod manifest;

pub use manifest::{AtlasDescriptor, SpriteDescriptor, SpriteManifest};
