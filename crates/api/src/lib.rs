pub mod app;
pub mod auth;
pub mod config;
pub mod domains;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod services;
pub mod state;

pub use state::AppState;
