//! Markdown tables: geometry aggregation, decorations and the view driver.

pub mod background;
pub mod border;
pub mod bounds;
pub mod index;
pub mod style;
pub mod view;

pub use background::{background_rectangles, TableBackgroundStyle};
pub use border::{border_decorations, TableBorderSelector};
pub use bounds::{CellAnchors, ColumnExtent, RowExtent, TableBounds, TrackExtents};
pub use index::{column_label, CellIndex};
pub use style::{
    BackgroundConfig, PaddingConfig, TableBorderStyle, TableCellStyle, TableStyle, TableStyleConfig,
};
pub use view::{grid_alignment, CellLayout, TableLayout, TableView};
