//! Bloomfield: a small flower-farming game.
//!
//! Everything except the app entry point lives here so the integration
//! tests can drive the game headlessly.

pub mod data;
pub mod grid;
pub mod input;
pub mod player;
pub mod save;
pub mod scenario;
pub mod session;
pub mod shared;
pub mod sim;
pub mod ui;
