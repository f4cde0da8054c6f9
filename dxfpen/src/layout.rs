//! Paper and machine layout for an export.

use serde::{Deserialize, Serialize};

use crate::paths::Point;

/// Paper bounds and machine home used while exporting a drawing.
///
/// All measurements are in device units. `left < right` and `bottom < top` are
/// expected but not checked, and non-finite values are written out as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Left edge of the paper.
    pub paper_left: f64,
    /// Right edge of the paper.
    pub paper_right: f64,
    /// Top edge of the paper.
    pub paper_top: f64,
    /// Bottom edge of the paper.
    pub paper_bottom: f64,
    /// Where the pen rests before the first move.
    pub home: Point,
    /// Command the controller sends to lift the pen.
    pub pen_up: String,
    /// Command the controller sends to lower the pen.
    pub pen_down: String,
}

impl Default for Layout {
    /// An A4 sheet in landscape, centred on the origin, with the home in the middle.
    fn default() -> Self {
        Layout {
            paper_left: -148.5,
            paper_right: 148.5,
            paper_top: 105.0,
            paper_bottom: -105.0,
            home: Point::new(0.0, 0.0),
            pen_up: "G00 Z90;".to_string(),
            pen_down: "G01 Z40;".to_string(),
        }
    }
}

impl Layout {
    /// The corner the drawing is inserted at and extends from.
    ///
    /// # Returns
    /// The bottom-left corner of the paper.
    pub fn lower_left(&self) -> Point {
        Point::new(self.paper_left, self.paper_bottom)
    }

    /// The far extent of the drawing.
    ///
    /// # Returns
    /// The top-right corner of the paper.
    pub fn upper_right(&self) -> Point {
        Point::new(self.paper_right, self.paper_top)
    }

    /// Gets the pen-up command reduced to the part a controller would echo back.
    ///
    /// # Returns
    /// The command up to the first `;`, without newlines.
    pub fn pen_up_match(&self) -> String {
        command_match(&self.pen_up)
    }

    /// Gets the pen-down command reduced to the part a controller would echo back.
    ///
    /// # Returns
    /// The command up to the first `;`, without newlines.
    pub fn pen_down_match(&self) -> String {
        command_match(&self.pen_down)
    }
}

/// Strips a controller command down to its matchable prefix.
///
/// # Arguments
/// * `command`: The raw command, possibly with a trailing comment.
///
/// # Returns
/// Everything before the first `;`, with newlines removed.
fn command_match(command: &str) -> String {
    let command = command.split_once(';').map_or(command, |(head, _)| head);
    command.replace('\n', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_match() {
        assert_eq!(command_match("G00 Z90;"), "G00 Z90", "trailing terminator");
        assert_eq!(
            command_match("M280 P0 S90;\nG4 P250;"),
            "M280 P0 S90",
            "only the first command"
        );
        assert_eq!(command_match("G01\nZ40"), "G01Z40", "newlines removed");
        assert_eq!(command_match(""), "", "empty");
    }

    #[test]
    fn test_corners() {
        let layout = Layout::default();
        assert_eq!(layout.lower_left(), Point::new(-148.5, -105.0), "lower left");
        assert_eq!(layout.upper_right(), Point::new(148.5, 105.0), "upper right");
    }

    #[test]
    fn test_partial_layout_uses_defaults() {
        let layout: Layout =
            serde_json::from_str(r#"{"paper_left": -10.0, "home": {"x": 1.0, "y": 2.0}}"#)
                .expect("failed to parse layout");

        assert_eq!(layout.paper_left, -10.0, "given field");
        assert_eq!(layout.home, Point::new(1.0, 2.0), "given home");
        assert_eq!(
            layout.paper_right,
            Layout::default().paper_right,
            "missing field falls back to default"
        );
    }
}
