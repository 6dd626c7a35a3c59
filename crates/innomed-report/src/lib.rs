//! innomed-report — PDF summaries of Molecule Innovation Twin profiles.

pub mod generator;
pub mod layout;
pub mod pdf;

pub use generator::PdfReportGenerator;
pub use pdf::render_pdf;
