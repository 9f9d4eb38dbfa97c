//! Asset Tracker Server
//!
//! REST JSON service tracking IT assets, the employees holding them and the
//! history of hand-outs and returns. Asset status is never set directly: the
//! [`lifecycle`] engine derives it from condition and assignment state.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod repository;
pub mod seed;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: repository::Repository,
    pub services: Arc<services::Services>,
}
