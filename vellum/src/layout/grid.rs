//! Track-based grid placement.
//!
//! A [`Grid`] has a list of explicit tracks along one axis; the other axis
//! grows implicitly as items are placed. With [`GridFlow::Columns`] the tracks
//! are the rows and items fill a column top to bottom before moving to the
//! next one; [`GridFlow::Rows`] is the transpose.
//!
//! ```text
//! items + tracks -> place (occupancy) -> size tracks -> offsets -> rects
//! ```

use serde::Serialize;

use crate::primitives::{Rect, Size};

/// Sizing policy for one track.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum GridTrack {
    /// Size to the largest item in the track.
    #[default]
    Fit,
    /// Fixed size in points.
    Fixed(f32),
}

/// Number of columns and rows an item covers. Both are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridSpan {
    pub column: usize,
    pub row: usize,
}

impl GridSpan {
    pub const DEFAULT: Self = Self { column: 1, row: 1 };

    /// Build a span, clamping each axis to a minimum of 1.
    pub fn new(column: i64, row: i64) -> Self {
        Self {
            column: column.max(1) as usize,
            row: row.max(1) as usize,
        }
    }
}

impl Default for GridSpan {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Explicit start position of an item. `None` components are auto-placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GridStart {
    pub column: Option<usize>,
    pub row: Option<usize>,
}

impl GridStart {
    pub const AUTO: Self = Self { column: None, row: None };

    /// Build a start position; negative components mean "auto".
    pub fn new(column: Option<i64>, row: Option<i64>) -> Self {
        let non_negative = |v: Option<i64>| v.filter(|v| *v >= 0).map(|v| v as usize);
        Self {
            column: non_negative(column),
            row: non_negative(row),
        }
    }

    pub const fn at(column: usize, row: usize) -> Self {
        Self {
            column: Some(column),
            row: Some(row),
        }
    }
}

/// Horizontal alignment of an item inside its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GridAlignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

impl GridAlignment {
    /// Resolve an optional alignment, falling back to `default`.
    #[inline]
    pub fn resolve(alignment: Option<GridAlignment>, default: GridAlignment) -> GridAlignment {
        alignment.unwrap_or(default)
    }

    /// Offset of content of size `content` inside `available` space.
    #[inline]
    pub fn offset(&self, available: f32, content: f32) -> f32 {
        let free = (available - content).max(0.0);
        match self {
            GridAlignment::Leading => 0.0,
            GridAlignment::Center => free / 2.0,
            GridAlignment::Trailing => free,
        }
    }
}

/// Direction in which auto-placed items fill the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridFlow {
    /// Tracks are columns; items fill rows left to right.
    #[default]
    Rows,
    /// Tracks are rows; items fill columns top to bottom.
    Columns,
}

/// How the grid reacts to the proposed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridContentMode {
    /// Stretch fit tracks to fill a finite proposed size.
    #[default]
    Fill,
    /// Keep intrinsic track sizes; the caller scrolls any overflow.
    Scroll,
}

/// One item to place: its measured content size plus placement requests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridItem {
    pub size: Size,
    pub span: GridSpan,
    pub start: GridStart,
    pub alignment: Option<GridAlignment>,
}

impl GridItem {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn span(mut self, span: GridSpan) -> Self {
        self.span = span;
        self
    }

    pub fn start(mut self, start: GridStart) -> Self {
        self.start = start;
        self
    }

    pub fn alignment(mut self, alignment: Option<GridAlignment>) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Where an item ended up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridPlacement {
    pub row: usize,
    pub column: usize,
    /// Effective span after clamping to the track count.
    pub span: GridSpan,
    pub alignment: GridAlignment,
    /// Union of every slot the item covers, including inner gaps.
    pub region: Rect,
    /// The slot at the item's first row and first column.
    pub origin_slot: Rect,
    /// The aligned content rectangle inside `region`.
    pub frame: Rect,
}

/// Result of [`Grid::arrange`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GridArrangement {
    pub row_heights: Vec<f32>,
    pub column_widths: Vec<f32>,
    pub row_offsets: Vec<f32>,
    pub column_offsets: Vec<f32>,
    /// One entry per input item, in input order.
    pub placements: Vec<GridPlacement>,
    pub content_size: Size,
}

impl GridArrangement {
    pub fn row_count(&self) -> usize {
        self.row_heights.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }
}

/// A grid container.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub tracks: Vec<GridTrack>,
    /// Horizontal (between columns) and vertical (between rows) spacing.
    pub spacing: [f32; 2],
    /// Space between the outer edge and the first/last track.
    pub padding: f32,
    pub flow: GridFlow,
    pub content_mode: GridContentMode,
    pub default_alignment: GridAlignment,
}

impl Grid {
    pub fn new(tracks: Vec<GridTrack>) -> Self {
        Self {
            tracks,
            spacing: [0.0, 0.0],
            padding: 0.0,
            flow: GridFlow::default(),
            content_mode: GridContentMode::default(),
            default_alignment: GridAlignment::default(),
        }
    }

    pub fn spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.spacing = [horizontal, vertical];
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn flow(mut self, flow: GridFlow) -> Self {
        self.flow = flow;
        self
    }

    pub fn content_mode(mut self, mode: GridContentMode) -> Self {
        self.content_mode = mode;
        self
    }

    pub fn default_alignment(mut self, alignment: GridAlignment) -> Self {
        self.default_alignment = alignment;
        self
    }

    /// Place `items`, size the tracks and compute every item's geometry.
    ///
    /// `proposed` only matters in [`GridContentMode::Fill`]; infinite
    /// components leave that axis at its intrinsic size.
    pub fn arrange(&self, items: &[GridItem], proposed: Size) -> GridArrangement {
        debug_assert!(!self.tracks.is_empty() || items.is_empty(), "grid with items but no tracks");
        let track_count = self.tracks.len().max(1);

        let cells = place(self.flow, track_count, items);
        let line_count = cells.iter().map(|c| c.line + c.line_span).max().unwrap_or(0);

        // Map the flow-relative axes back to rows and columns.
        let (row_policies, column_policies) = match self.flow {
            GridFlow::Columns => (self.track_policies(track_count), vec![GridTrack::Fit; line_count]),
            GridFlow::Rows => (vec![GridTrack::Fit; line_count], self.track_policies(track_count)),
        };
        let slots: Vec<Slot> = cells.iter().map(|c| c.to_slot(self.flow)).collect();

        let [h_gap, v_gap] = self.spacing;
        let mut row_heights = size_axis(
            &row_policies,
            slots.iter().zip(items).map(|(s, item)| (s.row, s.row_span, item.size.height)),
            v_gap,
        );
        let mut column_widths = size_axis(
            &column_policies,
            slots.iter().zip(items).map(|(s, item)| (s.column, s.column_span, item.size.width)),
            h_gap,
        );

        if self.content_mode == GridContentMode::Fill {
            stretch(&mut column_widths, &column_policies, proposed.width, self.padding, h_gap);
            stretch(&mut row_heights, &row_policies, proposed.height, self.padding, v_gap);
        }

        let row_offsets = offsets(&row_heights, self.padding, v_gap);
        let column_offsets = offsets(&column_widths, self.padding, h_gap);
        let content_size = Size::new(
            extent(&column_widths, self.padding, h_gap),
            extent(&row_heights, self.padding, v_gap),
        );

        let placements = slots
            .iter()
            .zip(items)
            .map(|(slot, item)| {
                let x = column_offsets[slot.column];
                let y = row_offsets[slot.row];
                let width = span_size(&column_widths, slot.column, slot.column_span, h_gap);
                let height = span_size(&row_heights, slot.row, slot.row_span, v_gap);
                let region = Rect::new(x, y, width, height);
                let origin_slot = Rect::new(x, y, column_widths[slot.column], row_heights[slot.row]);

                let alignment = GridAlignment::resolve(item.alignment, self.default_alignment);
                let content_width = item.size.width.min(width);
                let frame = Rect::new(
                    x + alignment.offset(width, content_width),
                    y,
                    content_width,
                    item.size.height.min(height),
                );

                GridPlacement {
                    row: slot.row,
                    column: slot.column,
                    span: GridSpan {
                        column: slot.column_span,
                        row: slot.row_span,
                    },
                    alignment,
                    region,
                    origin_slot,
                    frame,
                }
            })
            .collect();

        GridArrangement {
            row_heights,
            column_widths,
            row_offsets,
            column_offsets,
            placements,
            content_size,
        }
    }

    fn track_policies(&self, track_count: usize) -> Vec<GridTrack> {
        let mut policies = self.tracks.clone();
        policies.resize(track_count, GridTrack::Fit);
        policies
    }
}

// =========================================================================
// Placement
// =========================================================================

/// A placed item in flow-relative coordinates: `track` runs along the
/// explicit tracks, `line` along the implicit axis.
#[derive(Debug, Clone, Copy)]
struct FlowCell {
    track: usize,
    line: usize,
    track_span: usize,
    line_span: usize,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    row: usize,
    column: usize,
    row_span: usize,
    column_span: usize,
}

impl FlowCell {
    fn to_slot(self, flow: GridFlow) -> Slot {
        match flow {
            GridFlow::Columns => Slot {
                row: self.track,
                column: self.line,
                row_span: self.track_span,
                column_span: self.line_span,
            },
            GridFlow::Rows => Slot {
                row: self.line,
                column: self.track,
                row_span: self.line_span,
                column_span: self.track_span,
            },
        }
    }
}

/// Cells taken so far, indexed `[line][track]`.
struct Occupancy {
    track_count: usize,
    lines: Vec<Vec<bool>>,
}

impl Occupancy {
    fn is_free(&self, cell: &FlowCell) -> bool {
        (cell.line..cell.line + cell.line_span).all(|line| {
            self.lines
                .get(line)
                .is_none_or(|taken| (cell.track..cell.track + cell.track_span).all(|t| !taken[t]))
        })
    }

    fn mark(&mut self, cell: &FlowCell) {
        let end = cell.line + cell.line_span;
        if self.lines.len() < end {
            self.lines.resize(end, vec![false; self.track_count]);
        }
        for line in &mut self.lines[cell.line..end] {
            for taken in &mut line[cell.track..cell.track + cell.track_span] {
                *taken = true;
            }
        }
    }
}

fn place(flow: GridFlow, track_count: usize, items: &[GridItem]) -> Vec<FlowCell> {
    let mut occupancy = Occupancy {
        track_count,
        lines: Vec::new(),
    };
    let mut cells: Vec<Option<FlowCell>> = vec![None; items.len()];

    let requested = |item: &GridItem| match flow {
        GridFlow::Columns => (item.start.row, item.start.column, item.span.row, item.span.column),
        GridFlow::Rows => (item.start.column, item.start.row, item.span.column, item.span.row),
    };

    // Fully explicit items claim their slots first.
    for (i, item) in items.iter().enumerate() {
        let (Some(track), Some(line), track_span, line_span) = requested(item) else {
            continue;
        };
        let track_span = track_span.clamp(1, track_count);
        let max_track = track_count - track_span;
        if track > max_track {
            tracing::warn!(track, track_count, "grid start beyond the last track; clamping");
        }
        let cell = FlowCell {
            track: track.min(max_track),
            line,
            track_span,
            line_span: line_span.max(1),
        };
        occupancy.mark(&cell);
        cells[i] = Some(cell);
    }

    // Everything else goes to the first free slot after the cursor.
    let mut cursor = (0usize, 0usize);
    for (i, item) in items.iter().enumerate() {
        if cells[i].is_some() {
            continue;
        }
        let (track_start, line_start, track_span, line_span) = requested(item);
        let track_span = track_span.clamp(1, track_count);
        let line_span = line_span.max(1);
        let max_track = track_count - track_span;

        let mut line = line_start.unwrap_or(cursor.0);
        let cell = loop {
            let tracks = match track_start {
                Some(track) => track.min(max_track)..=track.min(max_track),
                None if line_start.is_none() && line == cursor.0 => cursor.1.min(max_track + 1)..=max_track,
                None => 0..=max_track,
            };
            let found = tracks
                .map(|track| FlowCell { track, line, track_span, line_span })
                .find(|cell| occupancy.is_free(cell));
            if let Some(cell) = found {
                break cell;
            }
            line += 1;
        };

        occupancy.mark(&cell);
        if line_start.is_none() && track_start.is_none() {
            cursor = (cell.line, cell.track + cell.track_span);
        }
        cells[i] = Some(cell);
    }

    cells.into_iter().flatten().collect()
}

// =========================================================================
// Track sizing
// =========================================================================

/// Size one axis. `spans` yields `(start, span, content size)` per item.
fn size_axis(
    policies: &[GridTrack],
    spans: impl Iterator<Item = (usize, usize, f32)>,
    gap: f32,
) -> Vec<f32> {
    let mut sizes: Vec<f32> = policies
        .iter()
        .map(|p| match p {
            GridTrack::Fit => 0.0,
            GridTrack::Fixed(size) => size.max(0.0),
        })
        .collect();

    let mut spanning = Vec::new();
    for (start, span, size) in spans {
        if span == 1 {
            if policies[start] == GridTrack::Fit {
                sizes[start] = sizes[start].max(size);
            }
        } else {
            spanning.push((start, span, size));
        }
    }

    // Narrow spans first so wide spans see the grown tracks.
    spanning.sort_by_key(|(_, span, _)| *span);
    for (start, span, size) in spanning {
        let covered = span_size(&sizes, start, span, gap);
        if size <= covered {
            continue;
        }
        let fit: Vec<usize> = (start..start + span)
            .filter(|&i| policies[i] == GridTrack::Fit)
            .collect();
        if fit.is_empty() {
            continue;
        }
        let share = (size - covered) / fit.len() as f32;
        for i in fit {
            sizes[i] += share;
        }
    }

    sizes
}

/// Spread the space left in `proposed` evenly over the fit tracks.
fn stretch(sizes: &mut [f32], policies: &[GridTrack], proposed: f32, padding: f32, gap: f32) {
    if !proposed.is_finite() {
        return;
    }
    let extra = proposed - extent(sizes, padding, gap);
    let fit_count = policies.iter().filter(|p| **p == GridTrack::Fit).count();
    if extra <= 0.0 || fit_count == 0 {
        return;
    }
    let share = extra / fit_count as f32;
    for (size, policy) in sizes.iter_mut().zip(policies) {
        if *policy == GridTrack::Fit {
            *size += share;
        }
    }
}

/// Cumulative track positions.
fn offsets(sizes: &[f32], padding: f32, gap: f32) -> Vec<f32> {
    let mut positions = Vec::with_capacity(sizes.len());
    let mut pos = padding;
    for size in sizes {
        positions.push(pos);
        pos += size + gap;
    }
    positions
}

/// Total length of an axis including padding and inner gaps.
fn extent(sizes: &[f32], padding: f32, gap: f32) -> f32 {
    let gaps = sizes.len().saturating_sub(1) as f32 * gap;
    padding * 2.0 + sizes.iter().sum::<f32>() + gaps
}

/// Length covered by `span` tracks starting at `start`, with the gaps between them.
fn span_size(sizes: &[f32], start: usize, span: usize, gap: f32) -> f32 {
    let end = (start + span).min(sizes.len());
    let tracks: f32 = sizes[start..end].iter().sum();
    tracks + end.saturating_sub(start + 1) as f32 * gap
}
