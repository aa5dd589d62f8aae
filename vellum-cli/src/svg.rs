//! SVG rendering of a document layout.

use anyhow::{Context, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use vellum::layout::{BASE_FONT_SIZE, LINE_HEIGHT};
use vellum::{BlockLayout, Color, Decoration, DocumentLayout, Rect, TextRole};

const TEXT_COLOR: &str = "#1f2328";
const MUTED_COLOR: &str = "#656d76";
const CODE_BACKGROUND: &str = "#f6f8fa";
const RULE_COLOR: &str = "#d0d7de";

type SvgWriter = Writer<Vec<u8>>;

/// Render `layout` as a standalone SVG document.
pub fn render(layout: &DocumentLayout) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    let width = layout.size.width.to_string();
    let height = layout.size.height.to_string();
    let view_box = format!("0 0 {width} {height}");
    let font_size = BASE_FONT_SIZE.to_string();
    writer.write_event(Event::Start(BytesStart::new("svg").with_attributes([
        ("xmlns", "http://www.w3.org/2000/svg"),
        ("width", width.as_str()),
        ("height", height.as_str()),
        ("viewBox", view_box.as_str()),
        ("font-family", "monospace"),
        ("font-size", font_size.as_str()),
    ])))?;

    let mut table_index = 0;
    for block in &layout.blocks {
        match block {
            BlockLayout::Text {
                role,
                background,
                lines,
                ..
            } => {
                if let Some(rect) = background {
                    rect_element(&mut writer, rect, CODE_BACKGROUND)?;
                }
                let (color, weight) = match role {
                    TextRole::Heading { .. } => (TEXT_COLOR, "bold"),
                    TextRole::ListMarker => (MUTED_COLOR, "normal"),
                    _ => (TEXT_COLOR, "normal"),
                };
                for line in lines {
                    text_element(&mut writer, line.origin.x, line.origin.y, &line.text, color, weight)?;
                }
            }
            BlockLayout::Rule { rect } => rect_element(&mut writer, rect, RULE_COLOR)?,
            BlockLayout::QuoteBar { rect } => rect_element(&mut writer, rect, MUTED_COLOR)?,
            BlockLayout::Table(table) => {
                let clip = format!("table-{table_index}");
                table_index += 1;

                writer.write_event(Event::Start(
                    BytesStart::new("clipPath").with_attributes([("id", clip.as_str())]),
                ))?;
                writer.write_event(Event::Empty(rect_start(&table.viewport)))?;
                writer.write_event(Event::End(BytesEnd::new("clipPath")))?;

                let clip_url = format!("url(#{clip})");
                writer.write_event(Event::Start(
                    BytesStart::new("g").with_attributes([("clip-path", clip_url.as_str())]),
                ))?;
                for decoration in &table.backgrounds {
                    decoration_element(&mut writer, decoration)?;
                }
                for cell in &table.cells {
                    for (i, line) in cell.text.split('\n').enumerate() {
                        let y = cell.text_origin.y + i as f32 * LINE_HEIGHT;
                        text_element(&mut writer, cell.text_origin.x, y, line, TEXT_COLOR, "normal")?;
                    }
                }
                for decoration in &table.borders {
                    decoration_element(&mut writer, decoration)?;
                }
                writer.write_event(Event::End(BytesEnd::new("g")))?;
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new("svg")))?;
    String::from_utf8(writer.into_inner()).context("svg output is not UTF-8")
}

fn paint(color: &Color) -> String {
    color.to_hex()
}

/// A `<rect>` start tag carrying the geometry of `rect`.
fn rect_start(rect: &Rect) -> BytesStart<'static> {
    let mut element = BytesStart::new("rect");
    for (name, value) in [("x", rect.x), ("y", rect.y), ("width", rect.width), ("height", rect.height)] {
        element.push_attribute((name, value.to_string().as_str()));
    }
    element
}

fn rect_element(writer: &mut SvgWriter, rect: &Rect, fill: &str) -> Result<()> {
    let element = rect_start(rect).with_attributes([("fill", fill)]);
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn decoration_element(writer: &mut SvgWriter, decoration: &Decoration) -> Result<()> {
    match decoration {
        Decoration::SolidRect { rect, color } => rect_element(writer, rect, &paint(color)),
        Decoration::StrokedRect { rect, color, width } => {
            // SVG strokes are centered on the path; pull it in so the stroke
            // stays inside `rect`.
            let stroke = paint(color);
            let stroke_width = width.to_string();
            let element = rect_start(&rect.inset_by(width / 2.0, width / 2.0)).with_attributes([
                ("fill", "none"),
                ("stroke", stroke.as_str()),
                ("stroke-width", stroke_width.as_str()),
            ]);
            writer.write_event(Event::Empty(element))?;
            Ok(())
        }
    }
}

fn text_element(
    writer: &mut SvgWriter,
    x: f32,
    top: f32,
    text: &str,
    color: &str,
    weight: &str,
) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    let x = x.to_string();
    let baseline = (top + LINE_HEIGHT * 0.8).to_string();
    writer.write_event(Event::Start(BytesStart::new("text").with_attributes([
        ("x", x.as_str()),
        ("y", baseline.as_str()),
        ("fill", color),
        ("font-weight", weight),
        ("xml:space", "preserve"),
    ])))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("text")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(write: impl FnOnce(&mut SvgWriter) -> Result<()>) -> String {
        let mut writer = Writer::new(Vec::new());
        write(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_text_is_escaped() {
        let out = written(|w| text_element(w, 0.0, 0.0, "a < b && c > d", TEXT_COLOR, "normal"));
        assert!(out.contains(">a &lt; b &amp;&amp; c &gt; d</text>"), "{out}");
    }

    #[test]
    fn test_stroke_is_pulled_inside() {
        let out = written(|w| {
            decoration_element(
                w,
                &Decoration::StrokedRect {
                    rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                    color: Color::BLACK,
                    width: 2.0,
                },
            )
        });
        assert!(out.contains(r#"x="1" y="1" width="8" height="8""#), "{out}");
        assert!(out.contains(r#"stroke-width="2""#), "{out}");
    }
}
