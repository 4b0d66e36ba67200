//! Weekly-report statistics dashboard.
//!
//! Loads the statistics document written by the WR collector, formats the
//! headline metrics and draws them as animated SVG charts on an HTML page or
//! as a live terminal dashboard.

pub mod chart;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod interactive;
pub mod leaderboard;
pub mod logging;
pub mod page;
pub mod stats;
pub mod summary;

pub use client::{RetryPolicy, StatsClient, StatsSource};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardOptions};
pub use error::{DashboardError, FetchError, Result};
pub use page::{MountPoint, Page, Viewport};
pub use stats::StatsDocument;
