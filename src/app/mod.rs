pub mod game;
pub mod hud;
pub mod state;
