//! quill - a terminal client for a JWT-authenticated blog backend
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod terminal;
pub mod traits;
pub mod ui;
