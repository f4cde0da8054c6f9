//! `dxf`
//!
//! Low-level writing of ASCII DXF records.
//!
//! Every record is two lines: an integer group code, then its value.
//!
//! ```text
//! 0
//! SECTION
//! 2
//! HEADER
//! ...
//! 0
//! ENDSEC
//! 0
//! EOF
//! ```
//!
//! Group codes used here:
//! - 0: record type (`SECTION`, `TABLE`, `LINE`, ...)
//! - 1: text value
//! - 2: name
//! - 3: description
//! - 6: line type name
//! - 8: layer name
//! - 9: header variable name
//! - 10, 20, 30: X, Y, Z of the first point
//! - 11, 21: X, Y of the second point
//! - 40: pattern length
//! - 62: colour index
//! - 70: flags or entry count
//! - 72, 73: line type alignment and element count
//! - 999: comment

use std::fmt::Display;
use std::io::{self, Write};

use crate::paths::Point;

/// The DXF sections, in the order they must appear in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    /// Drawing variables.
    Header,
    /// Line types, layers and text styles.
    Tables,
    /// Block definitions.
    Blocks,
    /// The drawing itself.
    Entities,
}

impl Section {
    /// Gets the name the section is written with.
    ///
    /// # Returns
    /// The section name as it appears after group code 2.
    pub fn name(self) -> &'static str {
        match self {
            Section::Header => "HEADER",
            Section::Tables => "TABLES",
            Section::Blocks => "BLOCKS",
            Section::Entities => "ENTITIES",
        }
    }
}

/// Rounds a coordinate to three decimal places, half away from zero.
///
/// # Arguments
/// * `value`: The coordinate.
///
/// # Returns
/// The rounded coordinate. Negative zero becomes zero. Values too large to
/// scale (above about 1.8e305) have no fractional part and come back unchanged.
pub fn round_off3(value: f64) -> f64 {
    let scaled = value * 1000.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 1000.0 + 0.0
}

/// Formats a coordinate the way it is written to the document.
///
/// # Arguments
/// * `value`: The coordinate.
///
/// # Returns
/// The coordinate with exactly three decimals. Non-finite values pass through.
pub fn format_coordinate(value: f64) -> String {
    format!("{:.3}", round_off3(value))
}

/// Streams group-code/value records to a sink.
pub struct DxfWriter<W: Write> {
    /// Where records go.
    out: W,
    /// The section currently open, if any.
    open_section: Option<Section>,
    /// The last section that was closed, used to keep sections in order.
    last_section: Option<Section>,
}

impl<W: Write> DxfWriter<W> {
    /// Creates a writer around a sink.
    ///
    /// # Arguments
    /// * `out`: The sink to write records into.
    ///
    /// # Returns
    /// A writer with no section open.
    pub fn new(out: W) -> Self {
        DxfWriter {
            out,
            open_section: None,
            last_section: None,
        }
    }

    /// Writes one group-code/value pair.
    ///
    /// # Errors
    /// Any error from the sink.
    pub fn write_pair(&mut self, code: u16, value: impl Display) -> io::Result<()> {
        writeln!(self.out, "{code}")?;
        writeln!(self.out, "{value}")
    }

    /// Writes a coordinate with three decimal places.
    ///
    /// # Errors
    /// Any error from the sink.
    pub fn write_coordinate(&mut self, code: u16, value: f64) -> io::Result<()> {
        self.write_pair(code, format_coordinate(value))
    }

    /// Writes a 2D point at `base_code` and `base_code + 10`.
    ///
    /// # Errors
    /// Any error from the sink.
    pub fn write_point(&mut self, base_code: u16, point: Point) -> io::Result<()> {
        self.write_coordinate(base_code, point.x)?;
        self.write_coordinate(base_code + 10, point.y)
    }

    /// Writes a point with a zero Z at `base_code`, `+10` and `+20`.
    ///
    /// # Errors
    /// Any error from the sink.
    pub fn write_point_3d(&mut self, base_code: u16, point: Point) -> io::Result<()> {
        self.write_point(base_code, point)?;
        self.write_coordinate(base_code + 20, 0.0)
    }

    /// Writes a 999 comment.
    ///
    /// # Errors
    /// Any error from the sink.
    pub fn write_comment(&mut self, comment: &str) -> io::Result<()> {
        self.write_pair(999, comment)
    }

    /// Writes a header variable name. Its value follows as separate pairs.
    ///
    /// # Errors
    /// Any error from the sink.
    pub fn write_variable(&mut self, name: &str) -> io::Result<()> {
        self.write_pair(9, name)
    }

    /// Opens a section.
    ///
    /// # Panics
    /// In debug builds, if a section is already open or `section` would be out of order.
    ///
    /// # Errors
    /// Any error from the sink.
    pub fn begin_section(&mut self, section: Section) -> io::Result<()> {
        debug_assert!(
            self.open_section.is_none(),
            "section {section:?} opened while {:?} is still open",
            self.open_section
        );
        debug_assert!(
            self.last_section.is_none_or(|last| last < section),
            "section {section:?} written after {:?}",
            self.last_section
        );

        self.write_pair(0, "SECTION")?;
        self.write_pair(2, section.name())?;
        self.open_section = Some(section);
        Ok(())
    }

    /// Closes the open section.
    ///
    /// # Errors
    /// Any error from the sink.
    pub fn end_section(&mut self) -> io::Result<()> {
        debug_assert!(self.open_section.is_some(), "no section to close");

        self.write_pair(0, "ENDSEC")?;
        self.last_section = self.open_section.take();
        Ok(())
    }

    /// Opens a table in the TABLES section.
    ///
    /// # Arguments
    /// * `name`: The table name, e.g. `LAYER`.
    /// * `entries`: Number of entries written to the table.
    ///
    /// # Errors
    /// Any error from the sink.
    pub fn begin_table(&mut self, name: &str, entries: usize) -> io::Result<()> {
        debug_assert_eq!(
            self.open_section,
            Some(Section::Tables),
            "tables belong in the TABLES section"
        );

        self.write_pair(0, "TABLE")?;
        self.write_pair(2, name)?;
        self.write_pair(70, entries)
    }

    /// Closes the open table.
    ///
    /// # Errors
    /// Any error from the sink.
    pub fn end_table(&mut self) -> io::Result<()> {
        self.write_pair(0, "ENDTAB")
    }

    /// Writes a LINE entity.
    ///
    /// # Arguments
    /// * `layer`: The layer the line is drawn on.
    /// * `start`: Where the line starts.
    /// * `end`: Where the line ends.
    ///
    /// # Errors
    /// Any error from the sink.
    pub fn write_line(&mut self, layer: &str, start: Point, end: Point) -> io::Result<()> {
        debug_assert_eq!(
            self.open_section,
            Some(Section::Entities),
            "entities belong in the ENTITIES section"
        );

        self.write_pair(0, "LINE")?;
        self.write_pair(8, layer)?;
        self.write_point(10, start)?;
        self.write_point(11, end)
    }

    /// Writes the end-of-file marker and hands back the sink.
    ///
    /// # Errors
    /// Any error from the sink.
    pub fn finish(mut self) -> io::Result<W> {
        debug_assert!(self.open_section.is_none(), "EOF written inside a section");

        self.write_pair(0, "EOF")?;
        Ok(self.out)
    }
}
