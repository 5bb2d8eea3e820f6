//! Municipal business demography dashboard.
//!
//! The `data` layer (load, filter, predict, rank) has no UI dependency and is
//! what the integration tests exercise; `app` and `ui` render it with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod context;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;
