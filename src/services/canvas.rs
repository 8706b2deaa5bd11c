// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rendering surfaces for assembled widgets.

use crate::models::RenderedWidget;
use std::fmt::Write;

/// A surface that turns draw instructions into a document.
pub trait Canvas {
    /// MIME type of [`Canvas::draw`] output.
    fn content_type(&self) -> &'static str;

    fn draw(&self, widget: &RenderedWidget) -> String;
}

/// SVG output with one rounded `<rect>` per cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgCanvas;

impl Canvas for SvgCanvas {
    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }

    fn draw(&self, widget: &RenderedWidget) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = widget.width,
            h = widget.height,
        );
        let _ = writeln!(svg, "<title>{}</title>", escape_xml(&widget.user));

        let mut y = 0;
        for row in &widget.rows {
            let mut x = 0;
            let mut row_height: u32 = 0;
            for cell in &row.cells {
                let _ = writeln!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{s}" height="{s}" rx="{r}" ry="{r}" fill="{}" fill-opacity="{:.3}"/>"#,
                    x,
                    y,
                    escape_xml(&cell.color),
                    cell.opacity,
                    s = cell.size,
                    r = cell.corner_radius,
                );
                x += cell.size + row.spacing;
                row_height = row_height.max(cell.size);
            }
            y += row_height + widget.spacing;
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellInstruction, WidgetRow};

    fn cell(row: usize, col: usize, color: &str) -> CellInstruction {
        CellInstruction {
            row,
            col,
            color: color.to_string(),
            opacity: 0.55,
            size: 10,
            corner_radius: 2,
            empty: false,
        }
    }

    #[test]
    fn test_svg_positions_cells() {
        let widget = RenderedWidget {
            user: "alice".to_string(),
            spacing: 2,
            width: 22,
            height: 22,
            rows: (0..2)
                .map(|row| WidgetRow {
                    spacing: 2,
                    cells: (0..2).map(|col| cell(row, col, "#40c463")).collect(),
                })
                .collect(),
        };

        let svg = SvgCanvas.draw(&widget);
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<rect").count(), 4);
        assert!(svg.contains(
            r##"<rect x="12" y="12" width="10" height="10" rx="2" ry="2" fill="#40c463" fill-opacity="0.550"/>"##
        ));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_svg_escapes_untrusted_color() {
        let widget = RenderedWidget {
            user: "a<b".to_string(),
            spacing: 1,
            width: 9,
            height: 9,
            rows: vec![WidgetRow {
                spacing: 1,
                cells: vec![cell(0, 0, r#""/><script>"#)],
            }],
        };

        let svg = SvgCanvas.draw(&widget);
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&quot;/&gt;&lt;script&gt;"));
        assert!(svg.contains("<title>a&lt;b</title>"));
    }
}
