//! PDF backend built on `genpdf`.
//!
//! Each [`Paragraph`] becomes a vertical layout holding one `genpdf`
//! paragraph per line, wrapped in a [`ParagraphBlock`] for spacing, indent and
//! borders. The running header and footer are drawn by a page decorator that
//! also numbers the pages.

use std::path::Path;

use genpdf::elements::{Break, LinearLayout, PageBreak};
use genpdf::error::{Error as PdfError, ErrorKind};
use genpdf::style::{Style, StyledString};
use genpdf::{Alignment, Element, Margins, PageDecorator, PaperSize, Position};
use log::{debug, info};

use crate::error::Result;
use crate::fonts::FontRegistry;
use crate::model::{Block, Document, HorizontalAlignment, Paragraph, RunStyle, StyledRun};
use crate::writer::elements::{mm_from_f64, mm_from_pt, ParagraphBlock};
use crate::writer::{write_atomically, DocumentWriter};

const PAGE_MARGIN_MM: f64 = 20.0;
const FOOTER_HEIGHT_MM: f64 = 12.0;

/// Line height of one "line" of spacing before a paragraph, relative to 9pt body text.
const SPACING_LINE_MM: f64 = 4.0;

impl From<HorizontalAlignment> for Alignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left => Alignment::Left,
            HorizontalAlignment::Center => Alignment::Center,
            HorizontalAlignment::Right => Alignment::Right,
        }
    }
}

/// Writes documents as A4 PDF files.
#[derive(Clone, Copy, Debug, Default)]
pub struct PdfWriter;

impl PdfWriter {
    /// Creates a writer with A4 paper and the default margins.
    pub fn new() -> Self {
        Self
    }

    /// Renders `document` into PDF bytes.
    pub fn render(&self, document: &Document) -> Result<Vec<u8>> {
        let default_font = first_font(document).unwrap_or(crate::config::DEFAULT_BODY_FONT);
        let (fonts, mut pdf) = FontRegistry::with_document(default_font)?;
        let mut renderer = Renderer { fonts, pdf: &mut pdf };

        let header = match &document.header {
            Some(paragraph) => Some(renderer.line_strings(paragraph)?),
            None => None,
        };
        let footer = match &document.footer {
            Some(footer) => Some((
                renderer.style(&footer.page_number)?,
                renderer.line_strings(&footer.text)?,
            )),
            None => None,
        };

        let mut elements = Vec::with_capacity(document.blocks().len());
        for block in document.blocks() {
            elements.push(renderer.block(block)?);
        }

        pdf.set_title(document.title.clone());
        pdf.set_paper_size(PaperSize::A4);
        pdf.set_page_decorator(ApiDocDecorator::new(
            Margins::all(mm_from_f64(PAGE_MARGIN_MM)),
            header,
            footer,
        ));
        for element in elements {
            pdf.push(element);
        }

        let mut bytes = Vec::new();
        pdf.render(&mut bytes)?;
        debug!("Rendered {} bytes of PDF", bytes.len());
        Ok(bytes)
    }
}

impl DocumentWriter for PdfWriter {
    fn write(&mut self, document: &Document, path: &Path) -> Result<()> {
        let bytes = self.render(document)?;
        write_atomically(path, &bytes)?;
        info!("Generated {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

fn first_font(document: &Document) -> Option<&str> {
    document
        .header
        .iter()
        .chain(document.paragraphs())
        .flat_map(Paragraph::runs)
        .map(|run| run.style.font.as_str())
        .next()
}

/// A line of styled strings with its alignment.
type Line = (Vec<StyledString>, Alignment);

struct Renderer<'d> {
    fonts: FontRegistry,
    pdf: &'d mut genpdf::Document,
}

impl Renderer<'_> {
    fn style(&mut self, run: &RunStyle) -> Result<Style> {
        let family = self.fonts.family(self.pdf, &run.font)?;
        let mut style = Style::new().with_font_family(family).with_font_size(run.size_pt);
        if run.bold {
            style.set_bold();
        }
        if run.italic {
            style.set_italic();
        }
        Ok(style)
    }

    fn styled(&mut self, run: &StyledRun, line_spacing: f64) -> Result<StyledString> {
        let style = self.style(&run.style)?.with_line_spacing(line_spacing);
        Ok(StyledString::new(run.text.clone(), style))
    }

    fn line_strings(&mut self, paragraph: &Paragraph) -> Result<Line> {
        let mut strings = Vec::new();
        for run in paragraph.runs() {
            strings.push(self.styled(run, paragraph.line_spacing)?);
        }
        Ok((strings, paragraph.alignment.into()))
    }

    fn block(&mut self, block: &Block) -> Result<BodyElement> {
        match block {
            Block::PageBreak => Ok(BodyElement::PageBreak(PageBreak::new())),
            Block::Paragraph(paragraph) => Ok(BodyElement::Paragraph(self.paragraph(paragraph)?)),
        }
    }

    fn paragraph(&mut self, paragraph: &Paragraph) -> Result<ParagraphBlock> {
        let mut layout = LinearLayout::vertical();
        for (index, runs) in paragraph.lines().into_iter().enumerate() {
            if runs.iter().all(|run| run.text.is_empty()) {
                layout.push(Break::new(paragraph.line_spacing));
                continue;
            }
            let mut line = genpdf::elements::Paragraph::default();
            if index == 0 {
                if let Some(first_line_indent) = paragraph.first_line_indent {
                    line.push(StyledString::new(
                        " ".repeat(indent_spaces(first_line_indent)),
                        Style::new(),
                    ));
                }
            }
            for run in runs {
                line.push(self.styled(run, paragraph.line_spacing)?);
            }
            line.set_alignment(paragraph.alignment.into());
            layout.push(line);
        }

        Ok(ParagraphBlock::new(layout)
            .with_spacing_before(mm_from_f64(paragraph.spacing_before * SPACING_LINE_MM))
            .with_indent(paragraph.indent.map(mm_from_pt).unwrap_or_default())
            .with_borders(paragraph.borders))
    }
}

/// One top-level element of the document body.
enum BodyElement {
    Paragraph(ParagraphBlock),
    PageBreak(PageBreak),
}

impl Element for BodyElement {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: genpdf::render::Area<'_>,
        style: Style,
    ) -> std::result::Result<genpdf::RenderResult, PdfError> {
        match self {
            Self::Paragraph(block) => block.render(context, area, style),
            Self::PageBreak(page_break) => page_break.render(context, area, style),
        }
    }
}

/// Number of spaces approximating a first-line indent of `points`.
fn indent_spaces(points: f64) -> usize {
    (points / 2.5).round().max(1.0) as usize
}

fn line_paragraph((strings, alignment): &Line) -> genpdf::elements::Paragraph {
    let mut paragraph = genpdf::elements::Paragraph::default();
    for string in strings {
        paragraph.push(string.clone());
    }
    paragraph.set_alignment(*alignment);
    paragraph
}

/// Page decorator drawing margins, the running header and the numbered footer.
struct ApiDocDecorator {
    page: usize,
    margins: Margins,
    header: Option<Line>,
    footer: Option<(Style, Line)>,
}

impl ApiDocDecorator {
    fn new(margins: Margins, header: Option<Line>, footer: Option<(Style, Line)>) -> Self {
        Self {
            page: 0,
            margins,
            header,
            footer,
        }
    }

    fn footer_element(&self) -> Option<LinearLayout> {
        let (number_style, text) = self.footer.as_ref()?;
        let mut layout = LinearLayout::vertical();
        let mut number = genpdf::elements::Paragraph::new(StyledString::new(
            self.page.to_string(),
            *number_style,
        ));
        number.set_alignment(Alignment::Center);
        layout.push(number);
        layout.push(line_paragraph(text));
        Some(layout)
    }
}

impl PageDecorator for ApiDocDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: Style,
    ) -> std::result::Result<genpdf::render::Area<'a>, PdfError> {
        self.page += 1;
        area.add_margins(self.margins);

        if let Some(header) = &self.header {
            let mut element = line_paragraph(header);
            let result = element.render(context, area.clone(), style)?;
            area.add_offset(Position::new(0, result.size.height + mm_from_f64(2.0)));
        }

        if let Some(mut footer) = self.footer_element() {
            let height = mm_from_f64(FOOTER_HEIGHT_MM);
            let available = area.size().height;
            if height > available {
                return Err(PdfError::new(
                    "Footer height exceeds available space",
                    ErrorKind::InvalidData,
                ));
            }

            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - height));
            let result = footer.render(context, footer_area, style)?;
            if result.has_more {
                return Err(PdfError::new(
                    "Footer does not fit into the reserved space",
                    ErrorKind::PageSizeExceeded,
                ));
            }

            area.set_height(available - height);
        }

        Ok(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RunStyle;

    #[test]
    fn first_font_prefers_header() {
        let mut document = Document::new("t");
        let mut header = Paragraph::new();
        header.push_text("h", &RunStyle::new("Header", 8));
        document.header = Some(header);
        let mut body = Paragraph::new();
        body.push_text("b", &RunStyle::new("Body", 9));
        document.push_paragraph(body);
        assert_eq!(first_font(&document), Some("Header"));
    }

    #[test]
    fn first_font_absent_for_empty_document() {
        assert_eq!(first_font(&Document::new("t")), None);
    }

    #[test]
    fn first_line_indent_maps_to_spaces() {
        assert_eq!(indent_spaces(5.0), 2);
        assert_eq!(indent_spaces(0.1), 1);
    }
}
