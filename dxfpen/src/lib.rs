//! `dxfpen`
//!
//! Turns the recorded moves of a pen plotter into DXF drawings that CAD
//! programs can open.
//!
//! ```
//! use dxfpen::{DxfFormat, ExportFormat, Layout, PlotPath};
//!
//! let mut path = PlotPath::new();
//! path.travel(0.0, 0.0).draw(10.0, 0.0).draw(10.0, 10.0);
//!
//! let mut dxf = vec![];
//! assert!(DxfFormat::new().save(&mut dxf, &path, &Layout::default()));
//! ```

pub mod dxf;
mod encoder;
mod error;
mod format;
pub mod job;
mod layout;
pub mod paths;
mod sink;

pub use encoder::{
    encode, encode_with_layers, DxfLayer, LayerAssigner, PenState, Segment, SingleLayer,
    PRODUCER_COMMENT,
};
pub use error::EncodeError;
pub use format::{
    DxfFormat, English, ExportFormat, FileFilter, Translator, FILE_TYPE_KEY, SAVE_ERROR_KEY,
};
pub use job::{ExportJob, JobError};
pub use layout::Layout;
pub use paths::{PlotMove, PlotPath, Point, ToolChange, ToolColour};
