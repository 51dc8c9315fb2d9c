//! Dashboard access
//!
//! Maps authenticated roles to the dashboard branch they may render.

pub mod views;

pub use views::{DashboardView, Panel};
