pub mod director;
pub mod enemy;
pub mod layouts;
pub mod level;
pub mod player;
pub mod roster;
pub mod session;
