//! Errors produced while exporting.

use std::io;

use thiserror::Error;

/// Errors that can occur while writing a DXF document.
///
/// Any error means the sink holds a truncated document that must be discarded.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Writing to or flushing the output sink failed.
    #[error("failed to write DXF output: {0}")]
    IoFailure(#[from] io::Error),
}
