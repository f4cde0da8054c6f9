//! `encoder`
//!
//! Replays a recorded [`PlotPath`] and writes it out as a DXF document.

use std::io::{self, Write};

use crate::{
    dxf::{DxfWriter, Section},
    error::EncodeError,
    layout::Layout,
    paths::{PlotMove, PlotPath, Point, ToolChange},
    sink::SinkGuard,
};

/// Written as the leading comment of every document.
pub const PRODUCER_COMMENT: &str = "DXF created by dxfpen";

/// The file format version advertised in `$ACADVER`.
const ACAD_VERSION: &str = "AC1006";

/// Line type every layer is drawn with.
const LINE_TYPE: &str = "CONTINUOUS";

/// Colour index of every layer (white on dark backgrounds, black on light).
const LAYER_COLOUR: u8 = 7;

/// The layers of the fixed two-layer model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DxfLayer {
    /// Layer `1`, where strokes go unless an assigner says otherwise.
    #[default]
    Primary,
    /// Layer `2`.
    Secondary,
}

impl DxfLayer {
    /// Every layer, in the order they are declared in the LAYER table.
    pub const ALL: [DxfLayer; 2] = [DxfLayer::Primary, DxfLayer::Secondary];

    /// Gets the layer name.
    ///
    /// # Returns
    /// The name written after group codes 2 and 8.
    pub fn name(self) -> &'static str {
        match self {
            DxfLayer::Primary => "1",
            DxfLayer::Secondary => "2",
        }
    }
}

/// Decides which layer strokes go on after a tool change.
pub trait LayerAssigner {
    /// Picks the layer for everything drawn after `change`.
    ///
    /// # Arguments
    /// * `change`: The tool the plotter switched to.
    ///
    /// # Returns
    /// The layer for the following strokes.
    fn assign(&mut self, change: &ToolChange) -> DxfLayer;
}

/// Puts every stroke on layer `1`, whatever pen drew it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleLayer;

impl LayerAssigner for SingleLayer {
    fn assign(&mut self, _change: &ToolChange) -> DxfLayer {
        DxfLayer::Primary
    }
}

/// A visible stroke between two positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Where the pen was.
    pub start: Point,
    /// Where the pen went.
    pub end: Point,
}

/// Whether the pen is touching the paper, and where it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenState {
    /// `true` while the pen is lifted.
    pub is_up: bool,
    /// The last position the pen moved to.
    pub position: Point,
}

impl PenState {
    /// The state before any move: lifted, resting at `home`.
    ///
    /// # Arguments
    /// * `home`: The home position from the layout.
    ///
    /// # Returns
    /// The initial pen state.
    pub fn at_home(home: Point) -> Self {
        PenState {
            is_up: true,
            position: home,
        }
    }

    /// Advances the pen by one move.
    ///
    /// The first draw after the pen was lifted only lowers it. Every following
    /// draw produces a segment from the previous position. Tool changes leave the
    /// pen where it is.
    ///
    /// # Arguments
    /// * `plot_move`: The move to apply.
    ///
    /// # Returns
    /// The new pen state, and the segment drawn by the move if there is one.
    pub fn apply(self, plot_move: &PlotMove) -> (PenState, Option<Segment>) {
        let Some(target) = plot_move.target() else {
            return (self, None);
        };

        let is_up = matches!(plot_move, PlotMove::Travel { .. });
        let segment = (!is_up && !self.is_up).then_some(Segment {
            start: self.position,
            end: target,
        });
        (
            PenState {
                is_up,
                position: target,
            },
            segment,
        )
    }
}

/// Writes `path` as a DXF document, with every stroke on layer `1`.
///
/// # Arguments
/// * `path`: The recorded moves to replay.
/// * `layout`: Paper bounds and home position.
/// * `sink`: Where the document is written. It is flushed and dropped before returning.
///
/// # Errors
/// [`EncodeError::IoFailure`] if the sink could not be written or flushed. The
/// sink is left with whatever reached it before the failure; nothing is written
/// to it afterwards.
pub fn encode<W: Write>(path: &PlotPath, layout: &Layout, sink: W) -> Result<(), EncodeError> {
    encode_with_layers(path, layout, sink, &mut SingleLayer)
}

/// Writes `path` as a DXF document, asking `layers` where strokes go after each tool change.
///
/// # Arguments
/// * `path`: The recorded moves to replay.
/// * `layout`: Paper bounds and home position.
/// * `sink`: Where the document is written. It is flushed and dropped before returning.
/// * `layers`: Maps tool changes to layers.
///
/// # Errors
/// [`EncodeError::IoFailure`] if the sink could not be written or flushed.
pub fn encode_with_layers<W, L>(
    path: &PlotPath,
    layout: &Layout,
    sink: W,
    layers: &mut L,
) -> Result<(), EncodeError>
where
    W: Write,
    L: LayerAssigner + ?Sized,
{
    let mut guard = SinkGuard::new(sink);
    let mut writer = DxfWriter::new(&mut guard);

    write_header(&mut writer, layout)?;
    write_tables(&mut writer)?;
    write_blocks(&mut writer)?;
    let lines = write_entities(&mut writer, path, layout, layers)?;
    writer.finish()?;
    guard.finish()?;

    log::debug!(
        "Wrote {lines} line(s) from {} recorded move(s)",
        path.moves().len()
    );

    Ok(())
}

/// Writes the producer comment and the HEADER section.
///
/// # Errors
/// Any error from the sink.
fn write_header<W: Write>(writer: &mut DxfWriter<W>, layout: &Layout) -> io::Result<()> {
    writer.write_comment(PRODUCER_COMMENT)?;
    writer.begin_section(Section::Header)?;

    writer.write_variable("$ACADVER")?;
    writer.write_pair(1, ACAD_VERSION)?;
    writer.write_variable("$INSBASE")?;
    writer.write_point_3d(10, layout.lower_left())?;
    writer.write_variable("$EXTMIN")?;
    writer.write_point_3d(10, layout.lower_left())?;
    writer.write_variable("$EXTMAX")?;
    writer.write_point_3d(10, layout.upper_right())?;

    writer.end_section()
}

/// Writes the TABLES section: one line type, the two layers and no text styles.
///
/// # Errors
/// Any error from the sink.
fn write_tables<W: Write>(writer: &mut DxfWriter<W>) -> io::Result<()> {
    writer.begin_section(Section::Tables)?;

    writer.begin_table("LTYPE", 1)?;
    writer.write_pair(0, "LTYPE")?;
    writer.write_pair(2, LINE_TYPE)?;
    writer.write_pair(70, 64)?;
    writer.write_pair(3, "Solid line")?;
    writer.write_pair(72, 65)?;
    writer.write_pair(73, 0)?;
    writer.write_coordinate(40, 0.0)?;
    writer.end_table()?;

    writer.begin_table("LAYER", DxfLayer::ALL.len())?;
    for layer in DxfLayer::ALL {
        writer.write_pair(0, "LAYER")?;
        writer.write_pair(2, layer.name())?;
        writer.write_pair(70, 64)?;
        writer.write_pair(62, LAYER_COLOUR)?;
        writer.write_pair(6, LINE_TYPE)?;
    }
    writer.end_table()?;

    writer.begin_table("STYLE", 0)?;
    writer.end_table()?;

    writer.end_section()
}

/// Writes the empty BLOCKS section.
///
/// # Errors
/// Any error from the sink.
fn write_blocks<W: Write>(writer: &mut DxfWriter<W>) -> io::Result<()> {
    writer.begin_section(Section::Blocks)?;
    writer.end_section()
}

/// Replays the path into the ENTITIES section.
///
/// # Returns
/// The number of LINE entities written.
///
/// # Errors
/// Any error from the sink.
fn write_entities<W, L>(
    writer: &mut DxfWriter<W>,
    path: &PlotPath,
    layout: &Layout,
    layers: &mut L,
) -> io::Result<usize>
where
    W: Write,
    L: LayerAssigner + ?Sized,
{
    // No output depends on these yet.
    log::debug!(
        "Pen commands: up {:?}, down {:?}",
        layout.pen_up_match(),
        layout.pen_down_match()
    );

    writer.begin_section(Section::Entities)?;

    let (_, _, lines) = path.into_iter().try_fold(
        (PenState::at_home(layout.home), DxfLayer::default(), 0_usize),
        |(pen, layer, lines), plot_move| -> io::Result<_> {
            let layer = match plot_move {
                PlotMove::ToolChange(change) => layers.assign(change),
                _ => layer,
            };

            let (pen, segment) = pen.apply(plot_move);
            let Some(Segment { start, end }) = segment else {
                return Ok((pen, layer, lines));
            };

            writer.write_line(layer.name(), start, end)?;
            Ok((pen, layer, lines + 1))
        },
    )?;

    writer.end_section()?;
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays moves without writing anything.
    fn segments(moves: &[PlotMove]) -> Vec<Segment> {
        let mut pen = PenState::at_home(Point::new(0.0, 0.0));
        let mut segments = vec![];
        for plot_move in moves {
            let (next, segment) = pen.apply(plot_move);
            pen = next;
            segments.extend(segment);
        }
        segments
    }

    #[test]
    fn test_first_draw_only_lowers_pen() {
        let (pen, segment) =
            PenState::at_home(Point::new(5.0, 5.0)).apply(&PlotMove::Draw { x: 1.0, y: 0.0 });

        assert_eq!(segment, None, "no segment when lowering the pen");
        assert!(!pen.is_up, "pen is down");
        assert_eq!(pen.position, Point::new(1.0, 0.0), "pen moved");
    }

    #[test]
    fn test_travel_lifts_pen() {
        let down = PenState {
            is_up: false,
            position: Point::new(1.0, 1.0),
        };
        let (pen, segment) = down.apply(&PlotMove::Travel { x: 3.0, y: 4.0 });

        assert_eq!(segment, None, "travel never draws");
        assert_eq!(
            pen,
            PenState {
                is_up: true,
                position: Point::new(3.0, 4.0)
            },
            "pen lifted and moved"
        );
    }

    #[test]
    fn test_down_stroke_is_one_segment_per_pair() {
        let moves = [
            PlotMove::Travel { x: 0.0, y: 0.0 },
            PlotMove::Draw { x: 1.0, y: 0.0 },
            PlotMove::Draw { x: 2.0, y: 0.0 },
            PlotMove::Draw { x: 3.0, y: 0.0 },
        ];

        assert_eq!(
            segments(&moves),
            vec![
                Segment {
                    start: Point::new(1.0, 0.0),
                    end: Point::new(2.0, 0.0)
                },
                Segment {
                    start: Point::new(2.0, 0.0),
                    end: Point::new(3.0, 0.0)
                },
            ],
            "three points give two segments"
        );
    }

    #[test]
    fn test_tool_change_keeps_pen_state() {
        let pen = PenState {
            is_up: false,
            position: Point::new(2.0, 2.0),
        };
        let (next, segment) = pen.apply(&PlotMove::ToolChange(ToolChange::default()));

        assert_eq!(segment, None, "tool change never draws");
        assert_eq!(next, pen, "pen untouched");
    }

    #[test]
    fn test_draw_from_home_without_travel() {
        let moves = [
            PlotMove::Draw { x: 1.0, y: 1.0 },
            PlotMove::Draw { x: 2.0, y: 1.0 },
        ];

        assert_eq!(
            segments(&moves),
            vec![Segment {
                start: Point::new(1.0, 1.0),
                end: Point::new(2.0, 1.0)
            }],
            "the first draw from home still only lowers the pen"
        );
    }
}
