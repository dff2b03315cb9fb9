// Presentation layer - CLI, OAuth callback listener, terminal output
pub mod app_state;
pub mod browser;
pub mod callback;
pub mod cli;
pub mod handlers;
pub mod report;
