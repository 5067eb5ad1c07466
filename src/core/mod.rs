pub mod components;
pub mod config;
pub mod events;
pub mod round;
pub mod system;
