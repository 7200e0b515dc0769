//! Repository trait definitions for report persistence

use std::path::PathBuf;

use autoclaim_types::Error;

use crate::model::{AggregatedReport, ReportKind};

/// Destination for the artifacts of one run
pub trait ReportRepository {
    /// Persist one view of the report without overwriting earlier runs.
    ///
    /// Returns the path written, or `None` when the view has no content
    /// (a shopping guide for a report without guides).
    fn save(&self, report: &AggregatedReport, kind: ReportKind) -> Result<Option<PathBuf>, Error>;
}
