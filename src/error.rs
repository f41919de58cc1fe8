//! Error types for the dashboard core.
//!
//! Errors are classified by recoverability. Everything here is locally
//! recoverable by design: the dashboard is interactive and must stay
//! responsive, so no variant should ever be escalated to a panic.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The source collection could not be obtained. The store degrades to an
    /// empty sequence; the renderer shows a "no data" state.
    #[error("No account data available")]
    NoData,

    #[error("Data file not found: {0}")]
    DataFileNotFound(PathBuf),

    #[error("Failed to read account data: {0}")]
    DataRead(String),

    #[error("Failed to parse account data: {0}")]
    DataParse(String),

    /// Controller construction was attempted before the session gate opened.
    #[error("Dashboard is locked; unlock the session first")]
    Locked,

    #[error("Failed to persist preferences: {0}")]
    Preferences(String),
}

impl DashboardError {
    /// True when the renderer can recover by showing a degraded state
    /// (empty table, login screen) rather than surfacing a failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DashboardError::NoData
                | DashboardError::DataFileNotFound(_)
                | DashboardError::Locked
                | DashboardError::Preferences(_)
        )
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::DataRead(err.to_string())
    }
}
