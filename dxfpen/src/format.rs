//! `format`
//!
//! The face the exporter shows to file choosers and save commands.

use std::{io::Write, path::Path};

use crate::{encoder::encode, layout::Layout, paths::PlotPath};

/// Message key for the description shown in file choosers.
pub const FILE_TYPE_KEY: &str = "file_type_dxf";
/// Message key for the prefix of a failed save.
pub const SAVE_ERROR_KEY: &str = "save_error";

/// The extension handled by [`DxfFormat`].
const DXF_EXTENSION: &str = "dxf";

/// Looks up user-facing messages in the user's language.
pub trait Translator {
    /// Gets the message for `key`.
    ///
    /// # Arguments
    /// * `key`: The message key, e.g. [`SAVE_ERROR_KEY`].
    ///
    /// # Returns
    /// The localised message.
    fn translate(&self, key: &str) -> String;
}

/// Built-in English messages. Unknown keys are returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Translator for English {
    fn translate(&self, key: &str) -> String {
        match key {
            FILE_TYPE_KEY => "DXF drawing".to_string(),
            SAVE_ERROR_KEY => "Could not save drawing:".to_string(),
            other => other.to_string(),
        }
    }
}

/// A description and extension pair for a file chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    /// Localised description of the file type.
    pub description: String,
    /// Extensions accepted, without the leading dot.
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// Checks whether a file name passes the filter.
    ///
    /// # Arguments
    /// * `filename`: The file name or path to check.
    ///
    /// # Returns
    /// `true` if the extension matches one of ours, ignoring case.
    pub fn matches(&self, filename: &str) -> bool {
        let Some(extension) = Path::new(filename).extension() else {
            return false;
        };

        self.extensions
            .iter()
            .any(|accepted| extension.eq_ignore_ascii_case(accepted))
    }
}

/// A file type a drawing can be saved as.
pub trait ExportFormat {
    /// Checks whether this format writes files with the given name.
    fn can_handle(&self, filename: &str) -> bool;

    /// Gets the short label shown next to the format.
    fn display_name(&self) -> &str;

    /// Gets the filter used by file choosers.
    fn file_filter(&self) -> FileFilter;

    /// Saves a drawing into `sink`.
    ///
    /// Failures are logged before returning.
    ///
    /// # Returns
    /// `true` if the whole document was written.
    fn save<W: Write>(&self, sink: W, path: &PlotPath, layout: &Layout) -> bool;
}

/// Saves drawings as DXF.
#[derive(Debug, Clone, Default)]
pub struct DxfFormat<T: Translator = English> {
    /// Source of user-facing messages.
    translator: T,
}

impl DxfFormat {
    /// Creates the format with English messages.
    ///
    /// # Returns
    /// A new [`DxfFormat`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Translator> DxfFormat<T> {
    /// Creates the format with messages from `translator`.
    ///
    /// # Arguments
    /// * `translator`: Where to look up user-facing messages.
    ///
    /// # Returns
    /// A new [`DxfFormat`].
    pub fn with_translator(translator: T) -> Self {
        DxfFormat { translator }
    }
}

impl<T: Translator> ExportFormat for DxfFormat<T> {
    fn can_handle(&self, filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case(DXF_EXTENSION))
    }

    fn display_name(&self) -> &str {
        "DXF"
    }

    fn file_filter(&self) -> FileFilter {
        FileFilter {
            description: self.translator.translate(FILE_TYPE_KEY),
            extensions: vec![DXF_EXTENSION.to_string()],
        }
    }

    fn save<W: Write>(&self, sink: W, path: &PlotPath, layout: &Layout) -> bool {
        log::info!("saving...");

        if let Err(err) = encode(path, layout, sink) {
            log::error!("{} {err}", self.translator.translate(SAVE_ERROR_KEY));
            return false;
        }

        log::info!("done.");
        true
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    /// A sink that refuses every write.
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
        }
    }

    /// Messages in a second language.
    struct Pirate;

    impl Translator for Pirate {
        fn translate(&self, key: &str) -> String {
            match key {
                FILE_TYPE_KEY => "DXF treasure map".to_string(),
                _ => "Arr".to_string(),
            }
        }
    }

    #[test]
    fn test_can_handle() {
        let format = DxfFormat::new();

        assert!(format.can_handle("drawing.dxf"), "lower case");
        assert!(format.can_handle("drawing.DXF"), "upper case");
        assert!(format.can_handle("/tmp/out/drawing.Dxf"), "with directories");
        assert!(!format.can_handle("drawing.svg"), "other format");
        assert!(!format.can_handle("drawing"), "no extension");
        assert!(!format.can_handle(""), "empty name");
        assert!(!format.can_handle("drawing.dxf.bak"), "only the last extension counts");
    }

    #[test]
    fn test_file_filter() {
        let filter = DxfFormat::new().file_filter();

        assert_eq!(
            filter,
            FileFilter {
                description: "DXF drawing".to_string(),
                extensions: vec!["dxf".to_string()],
            },
            "english filter"
        );
        assert!(filter.matches("plot.DXF"), "filter agrees with can_handle");
        assert!(!filter.matches("plot.gcode"), "other extension");
    }

    #[test]
    fn test_file_filter_is_translated() {
        let filter = DxfFormat::with_translator(Pirate).file_filter();
        assert_eq!(filter.description, "DXF treasure map", "translated description");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(DxfFormat::new().display_name(), "DXF", "fixed label");
    }

    #[test]
    fn test_save_reports_success() {
        let mut bytes = vec![];
        let mut path = PlotPath::new();
        path.travel(0.0, 0.0).draw(1.0, 0.0).draw(1.0, 1.0);

        assert!(
            DxfFormat::new().save(&mut bytes, &path, &Layout::default()),
            "save into memory succeeds"
        );
        assert!(
            String::from_utf8(bytes)
                .expect("DXF output is ASCII")
                .ends_with("0\nEOF\n"),
            "document is complete"
        );
    }

    #[test]
    fn test_save_reports_failure() {
        assert!(
            !DxfFormat::new().save(Broken, &PlotPath::new(), &Layout::default()),
            "a failing sink fails the save"
        );
    }
}
