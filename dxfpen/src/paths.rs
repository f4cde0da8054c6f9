//! `paths`
//!
//! The recorded motion of the plotter: an ordered list of moves that the
//! drawing controller produced while tracing a design.

use serde::{Deserialize, Serialize};

/// A position on the drawing surface, in device units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal axis.
    pub x: f64,
    /// Vertical axis.
    pub y: f64,
}

impl Point {
    /// Creates a new [`Point`].
    ///
    /// # Arguments
    /// * `x`: Horizontal axis position.
    /// * `y`: Vertical axis position.
    ///
    /// # Returns
    /// The new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// The colour of the implement loaded by a tool change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ToolColour(pub [u8; 3]);

/// The implement the plotter switched to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolChange {
    /// Colour of the new pen [R, G, B].
    pub colour: ToolColour,
    /// Optional user-facing name of the pen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A single recorded instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlotMove {
    /// Pen up, move to the target without drawing.
    Travel {
        /// Target on the horizontal axis.
        x: f64,
        /// Target on the vertical axis.
        y: f64,
    },
    /// Pen down, draw a straight segment from the previous position to the target.
    Draw {
        /// Target on the horizontal axis.
        x: f64,
        /// Target on the vertical axis.
        y: f64,
    },
    /// Swap the drawing implement.
    ToolChange(ToolChange),
}

impl PlotMove {
    /// Gets the target of the move, if it has one.
    ///
    /// # Returns
    /// The target point of a travel or draw, `None` for a tool change.
    pub fn target(&self) -> Option<Point> {
        match self {
            PlotMove::Travel { x, y } | PlotMove::Draw { x, y } => Some(Point::new(*x, *y)),
            PlotMove::ToolChange(_) => None,
        }
    }
}

/// An ordered, finite recording of plotter moves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlotPath {
    /// The moves, in the order they were made.
    moves: Vec<PlotMove>,
}

impl PlotPath {
    /// Creates an empty path.
    ///
    /// # Returns
    /// A path with no moves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pen-up move to `(x, y)`.
    pub fn travel(&mut self, x: f64, y: f64) -> &mut Self {
        self.moves.push(PlotMove::Travel { x, y });
        self
    }

    /// Records a pen-down move to `(x, y)`.
    pub fn draw(&mut self, x: f64, y: f64) -> &mut Self {
        self.moves.push(PlotMove::Draw { x, y });
        self
    }

    /// Records a tool change.
    pub fn tool_change(&mut self, change: ToolChange) -> &mut Self {
        self.moves.push(PlotMove::ToolChange(change));
        self
    }

    /// Gets the recorded moves.
    ///
    /// # Returns
    /// The moves in recording order.
    pub fn moves(&self) -> &[PlotMove] {
        &self.moves
    }
}

impl From<Vec<PlotMove>> for PlotPath {
    fn from(moves: Vec<PlotMove>) -> Self {
        PlotPath { moves }
    }
}

impl<'a> IntoIterator for &'a PlotPath {
    type Item = &'a PlotMove;
    type IntoIter = std::slice::Iter<'a, PlotMove>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
