use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use innomed_mit::{Profile, ReportGenerator, ReportHandle};
use tracing::info;

use crate::layout::report_lines;
use crate::pdf::render_pdf;

/// Writes one PDF summary per call into a reports directory.
#[derive(Debug, Clone)]
pub struct PdfReportGenerator {
    dir: PathBuf,
}

impl PdfReportGenerator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// `"Acetylsalicylic Acid"` → `"Acetylsalicylic_Acid"`. Anything outside
/// `[A-Za-z0-9_()-]` becomes `_` so the name is always a single path segment.
pub fn file_stem(molecule: &str) -> String {
    molecule
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '(' | ')') { c } else { '_' })
        .collect()
}

impl ReportGenerator for PdfReportGenerator {
    fn generate(&self, profile: &Profile) -> anyhow::Result<ReportHandle> {
        let created_at = Utc::now();
        let bytes = render_pdf(&report_lines(profile, created_at))?;

        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating reports dir {}", self.dir.display()))?;
        let filename = format!(
            "{}_summary_{}.pdf",
            file_stem(profile.molecule()),
            created_at.timestamp_millis()
        );
        let path = self.dir.join(&filename);
        std::fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;

        info!(
            molecule = %profile.molecule(),
            path = %path.display(),
            bytes = bytes.len(),
            "Report written"
        );
        Ok(ReportHandle { path, filename, created_at })
    }
}
