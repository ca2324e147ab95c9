pub mod actor;
pub mod animation;
