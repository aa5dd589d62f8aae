//! Command-line front end for vellum.
//!
//! Reads Markdown, lays it out at a fixed width and writes one of:
//! - `svg`: the rendered document
//! - `json`: the full layout tree
//! - `bounds`: per-table geometry (extents, cells, decorations)

pub mod svg;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use vellum::table::{ColumnExtent, RowExtent, TableLayout};
use vellum::{
    Decoration, DocumentLayout, DocumentView, MonospaceMeasure, Rect, TableBorderSelector,
    TableStyle, TableStyleConfig,
};

#[derive(Debug, Parser)]
#[command(name = "vellum")]
#[command(version)]
#[command(about = "Lay out Markdown documents and render their tables", long_about = None)]
pub struct Args {
    /// Input Markdown file (`-` reads stdin)
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    pub format: Format,

    /// Available width in points
    #[arg(short, long, default_value_t = 720.0)]
    pub width: f32,

    /// Visible table borders (overrides the style file)
    #[arg(long, value_enum)]
    pub borders: Option<Borders>,

    /// Table border width in points (overrides the style file)
    #[arg(long)]
    pub border_width: Option<f32>,

    /// Horizontal scroll offset applied to every table
    #[arg(long, default_value_t = 0.0)]
    pub scroll: f32,

    /// Table style as JSON
    #[arg(long)]
    pub style: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Svg,
    Json,
    Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Borders {
    Outside,
    Inside,
    All,
}

impl From<Borders> for TableBorderSelector {
    fn from(borders: Borders) -> Self {
        match borders {
            Borders::Outside => TableBorderSelector::OutsideBorders,
            Borders::Inside => TableBorderSelector::InsideBorders,
            Borders::All => TableBorderSelector::AllBorders,
        }
    }
}

/// Read, lay out, render and write according to `args`.
pub fn run(args: &Args) -> Result<()> {
    let markdown = read_input(&args.input)?;
    let style = load_style(args)?;
    let output = render(&markdown, &style, args)?;
    write_output(args.output.as_deref(), &output)
}

/// Build the table style from the optional style file plus flag overrides.
pub fn load_style(args: &Args) -> Result<TableStyle> {
    let mut config = match &args.style {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read style file {}", path.display()))?;
            serde_json::from_str::<TableStyleConfig>(&text)
                .with_context(|| format!("failed to parse style file {}", path.display()))?
        }
        None => TableStyleConfig::default(),
    };
    if let Some(borders) = args.borders {
        config.borders = borders.into();
    }
    if let Some(width) = args.border_width {
        config.border_width = width;
    }
    TableStyle::try_from(config).context("invalid table style")
}

/// Lay out `markdown` and render it in the requested format.
pub fn render(markdown: &str, style: &TableStyle, args: &Args) -> Result<String> {
    let document = vellum_document::parse(markdown);
    let measure = MonospaceMeasure::default();
    let layout = DocumentView::layout_scrolled(&document, style, &measure, args.width, args.scroll);
    tracing::debug!(
        format = ?args.format,
        tables = layout.tables().count(),
        height = layout.size.height,
        "rendering"
    );

    Ok(match args.format {
        Format::Svg => svg::render(&layout).context("failed to write svg")?,
        Format::Json => serde_json::to_string_pretty(&layout).context("failed to encode layout")?,
        Format::Bounds => {
            serde_json::to_string_pretty(&table_bounds(&layout)).context("failed to encode bounds")?
        }
    })
}

/// Geometry of one table in the `bounds` output.
#[derive(Debug, Serialize)]
pub struct TableBoundsDump {
    pub table: usize,
    pub bounds: Rect,
    pub viewport: Rect,
    pub rows: Vec<RowExtent>,
    pub columns: Vec<ColumnExtent>,
    pub cells: Vec<CellDump>,
    pub backgrounds: Vec<Decoration>,
    pub borders: Vec<Decoration>,
}

#[derive(Debug, Serialize)]
pub struct CellDump {
    pub label: String,
    pub frame: Rect,
    pub text: String,
}

pub fn table_bounds(layout: &DocumentLayout) -> Vec<TableBoundsDump> {
    layout.tables().enumerate().map(|(i, table)| dump_table(i, table)).collect()
}

fn dump_table(table: usize, layout: &TableLayout) -> TableBoundsDump {
    TableBoundsDump {
        table,
        bounds: layout.bounds,
        viewport: layout.viewport,
        rows: layout.rows.clone(),
        columns: layout.columns.clone(),
        cells: layout
            .cells
            .iter()
            .map(|cell| CellDump {
                label: cell.label.clone(),
                frame: cell.frame,
                text: cell.text.clone(),
            })
            .collect(),
        backgrounds: layout.backgrounds.clone(),
        borders: layout.borders.clone(),
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(path: Option<&Path>, output: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, output).with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes()).context("failed to write stdout")?;
            stdout.write_all(b"\n").context("failed to write stdout")
        }
    }
}
