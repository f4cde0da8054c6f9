//! `job`
//!
//! Export jobs stored as JSON: the recorded path plus the layout it was drawn on.

use std::{
    fs::{self, File},
    io,
    path::Path,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    format::{DxfFormat, ExportFormat},
    layout::Layout,
    paths::PlotPath,
};

/// Everything needed to produce one drawing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportJob {
    /// Paper bounds and home position. Missing fields take their defaults.
    #[serde(default)]
    pub layout: Layout,
    /// The recorded moves.
    pub path: PlotPath,
}

/// Errors that can occur when running an export job from files.
#[derive(Error, Debug)]
pub enum JobError {
    /// The job file could not be read or the destination could not be created.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The job file is not a valid job.
    #[error("could not load job: {0}")]
    Json(#[from] serde_json::Error),
    /// The destination does not have a `.dxf` extension.
    #[error("unsupported destination {0}, expected a .dxf file")]
    UnsupportedDestination(String),
    /// The document could not be written. Details have been logged.
    #[error("failed to write {0}")]
    SaveFailed(String),
}

impl ExportJob {
    /// Loads a job from a JSON file.
    ///
    /// # Arguments
    /// * `path`: The job file.
    ///
    /// # Returns
    /// The loaded job.
    ///
    /// # Errors
    /// [`JobError::Io`] if the file cannot be read, [`JobError::Json`] if it is not a job.
    pub fn load(path: &Path) -> Result<Self, JobError> {
        let bytes = fs::read(path)?;
        let job = serde_json::from_slice(&bytes)?;
        Ok(job)
    }

    /// Writes the drawing to a `.dxf` file, replacing it if it exists.
    ///
    /// # Arguments
    /// * `destination`: The file to create.
    ///
    /// # Errors
    /// [`JobError::UnsupportedDestination`] for names without a `.dxf` extension,
    /// [`JobError::Io`] if the file cannot be created, [`JobError::SaveFailed`] if
    /// writing fails part way. A failed file is left truncated.
    pub fn export_to_file(&self, destination: &Path) -> Result<(), JobError> {
        let format = DxfFormat::new();
        let name = destination.to_string_lossy();
        if !format.can_handle(&name) {
            return Err(JobError::UnsupportedDestination(name.into_owned()));
        }

        let file = File::create(destination)?;
        if !format.save(file, &self.path, &self.layout) {
            return Err(JobError::SaveFailed(name.into_owned()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_job() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let job_path = dir.path().join("job.json");
        fs::write(
            &job_path,
            r#"{
                "layout": {"paper_left": -50.0, "paper_right": 50.0},
                "path": [
                    {"kind": "TRAVEL", "x": 0.0, "y": 0.0},
                    {"kind": "DRAW", "x": 1.0, "y": 0.0}
                ]
            }"#,
        )
        .expect("failed to write job");

        let job = ExportJob::load(&job_path).expect("failed to load job");

        assert_eq!(job.layout.paper_left, -50.0, "layout read");
        assert_eq!(job.path.moves().len(), 2, "path read");
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let job_path = dir.path().join("job.json");
        fs::write(&job_path, "not a job").expect("failed to write job");

        assert!(
            matches!(ExportJob::load(&job_path), Err(JobError::Json(_))),
            "invalid JSON is a parse error"
        );
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let destination = dir.path().join("drawing.DXF");
        let mut job = ExportJob::default();
        job.path.travel(0.0, 0.0).draw(1.0, 0.0).draw(1.0, 1.0);

        job.export_to_file(&destination).expect("export failed");

        let written = fs::read_to_string(&destination).expect("failed to read output");
        assert!(written.contains("0\nLINE\n"), "line written");
        assert!(written.ends_with("0\nEOF\n"), "document complete");
    }

    #[test]
    fn test_export_rejects_other_extensions() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let destination = dir.path().join("drawing.svg");

        assert!(
            matches!(
                ExportJob::default().export_to_file(&destination),
                Err(JobError::UnsupportedDestination(_))
            ),
            "svg destination refused"
        );
        assert!(!destination.exists(), "nothing created");
    }
}
