//! Custom `genpdf` elements used by the PDF writer.
//!
//! `genpdf` paragraphs know neither a gap before them, a left indent, nor
//! border rules on selected sides. [`ParagraphBlock`] wraps the laid-out lines
//! of one paragraph and adds those three.

use genpdf::elements::LinearLayout;
use genpdf::error::Error;
use genpdf::style::Style;
use genpdf::{render, Element, Margins, Mm, Position, RenderResult, Size};

use crate::model::Borders;

const BORDER_PADDING_MM: f64 = 1.0;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Converts typographic points to millimetres.
pub(crate) fn mm_from_pt(points: f64) -> Mm {
    mm_from_f64(points * 25.4 / 72.0)
}

/// The lines of one paragraph with spacing, indent and border rules applied.
pub struct ParagraphBlock {
    content: LinearLayout,
    spacing_before: Mm,
    indent: Mm,
    borders: Borders,
    started: bool,
}

impl ParagraphBlock {
    /// Wraps `content`, the vertically stacked lines of a paragraph.
    pub fn new(content: LinearLayout) -> Self {
        Self {
            content,
            spacing_before: Mm::default(),
            indent: Mm::default(),
            borders: Borders::NONE,
            started: false,
        }
    }

    /// Sets the vertical gap rendered before the first line and returns the updated block.
    pub fn with_spacing_before(mut self, spacing: Mm) -> Self {
        self.spacing_before = spacing;
        self
    }

    /// Sets the left indent and returns the updated block.
    pub fn with_indent(mut self, indent: Mm) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the border rules and returns the updated block.
    pub fn with_borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    fn padding(&self) -> f64 {
        if self.borders.any() {
            BORDER_PADDING_MM
        } else {
            0.0
        }
    }
}

impl Element for ParagraphBlock {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();

        // The gap is only rendered once, never again at the top of a continuation page.
        if !self.started {
            self.started = true;
            let available = mm_to_f64(area.size().height);
            let gap = mm_to_f64(self.spacing_before).min(available);
            if gap > 0.0 {
                area.add_offset(Position::new(0, mm_from_f64(gap)));
                result.size = result.size.stack_vertical(Size::new(0, mm_from_f64(gap)));
            }
        }

        let padding = self.padding();
        let indent = mm_to_f64(self.indent);
        let mut inner = area.clone();
        inner.add_margins(Margins::trbl(
            mm_from_f64(padding),
            mm_from_f64(padding),
            mm_from_f64(padding),
            mm_from_f64(indent + padding),
        ));
        let content = self.content.render(context, inner, style)?;
        result.has_more = content.has_more;

        let width = mm_to_f64(area.size().width);
        let height = mm_to_f64(content.size.height) + 2.0 * padding;
        self.draw_borders(&area, indent, width, height);

        result.size = result
            .size
            .stack_vertical(Size::new(mm_from_f64(width), mm_from_f64(height)));
        Ok(result)
    }
}

impl ParagraphBlock {
    fn draw_borders(&self, area: &render::Area<'_>, left: f64, right: f64, bottom: f64) {
        let line = |from: (f64, f64), to: (f64, f64)| {
            area.draw_line(
                vec![
                    Position::new(mm_from_f64(from.0), mm_from_f64(from.1)),
                    Position::new(mm_from_f64(to.0), mm_from_f64(to.1)),
                ],
                Style::new(),
            );
        };
        if self.borders.top {
            line((left, 0.0), (right, 0.0));
        }
        if self.borders.bottom {
            line((left, bottom), (right, bottom));
        }
        if self.borders.left {
            line((left, 0.0), (left, bottom));
        }
        if self.borders.right {
            line((right, 0.0), (right, bottom));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_convert_to_millimetres() {
        assert!((mm_to_f64(mm_from_pt(72.0)) - 25.4).abs() < 1e-9);
        assert!((mm_to_f64(mm_from_f64(3.5)) - 3.5).abs() < 1e-9);
    }

    #[test]
    fn padding_only_applies_to_bordered_blocks() {
        let plain = ParagraphBlock::new(LinearLayout::vertical());
        assert_eq!(plain.padding(), 0.0);
        let boxed = ParagraphBlock::new(LinearLayout::vertical()).with_borders(Borders::ALL);
        assert_eq!(boxed.padding(), BORDER_PADDING_MM);
    }
}
