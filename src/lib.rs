pub mod api;
pub mod config;
pub mod error;
pub mod listing;
pub mod pagination;
pub mod session;
pub mod state;
pub mod types;
pub mod viewport;
