//! Service layer for the community duel service
//!
//! This module contains the application state wiring and the HTTP surface
//! the voting, leaderboard and admin collaborators talk to.

pub mod app;
pub mod http;

pub use app::AppState;
pub use http::serve;
