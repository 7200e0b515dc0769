//! File-based implementation of ReportRepository

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use autoclaim_domain::model::{AggregatedReport, ReportKind};
use autoclaim_domain::repository::ReportRepository;
use autoclaim_domain::service::{labor_report, parts_report, render_report_guides};
use autoclaim_types::{Error, Result};

use super::numbered_file::create_numbered_file;

/// Writes report artifacts as numbered files under one output directory
pub struct FileReportRepository {
    output_dir: PathBuf,
}

impl FileReportRepository {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Serialized contents of one view, or `None` if the view is empty
    fn render(report: &AggregatedReport, kind: ReportKind) -> Result<Option<String>> {
        let contents = match kind {
            ReportKind::Full => Some(serde_json::to_string_pretty(report)?),
            ReportKind::Parts => Some(serde_json::to_string_pretty(&parts_report(report))?),
            ReportKind::Labor => Some(serde_json::to_string_pretty(&labor_report(report))?),
            ReportKind::ShoppingGuide => render_report_guides(report),
        };
        Ok(contents)
    }
}

impl ReportRepository for FileReportRepository {
    fn save(&self, report: &AggregatedReport, kind: ReportKind) -> std::result::Result<Option<PathBuf>, Error> {
        let Some(contents) = Self::render(report, kind)? else {
            debug!(kind = kind.base_name(), "nothing to write");
            return Ok(None);
        };

        let path = create_numbered_file(
            &self.output_dir,
            kind.base_name(),
            kind.extension(),
            contents.as_bytes(),
        )
        .map_err(|e| {
            Error::Persistence(format!(
                "Failed to write {} to {}: {}",
                kind.base_name(),
                self.output_dir.display(),
                e
            ))
        })?;

        info!(kind = kind.base_name(), path = %path.display(), "report written");
        Ok(Some(path))
    }
}
