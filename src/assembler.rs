//! Assembly of complete documents: page header and footer, cover page and body.

use chrono::{Local, NaiveDate};
use log::info;

use crate::config::Options;
use crate::error::Result;
use crate::labels::Labels;
use crate::model::{Document, Footer, HorizontalAlignment, Paragraph, RunStyle};
use crate::style::{Preset, StylePresets};
use crate::tree::DocTree;
use crate::walker::StructureWalker;
use crate::writer::DocumentWriter;

/// Font size of the running header and footer.
const MARGINALIA_FONT_SIZE: u8 = 8;

/// Cover page lines: gap before the line (in lines), font size, bold.
const COVER_TITLE: (f64, u8, bool) = (8.0, 28, true);
const COVER_SUBTITLE: (f64, u8, bool) = (2.0, 20, true);
const COVER_VERSION: (f64, u8, bool) = (3.0, 18, false);
const COVER_DATE: (f64, u8, bool) = (8.0, 16, false);
const COVER_COMPANY: (f64, u8, bool) = (3.0, 20, false);

/// Builds a [`Document`] from a documentation tree and hands it to a writer.
pub struct DocumentAssembler<'a> {
    options: &'a Options,
    presets: StylePresets,
    labels: &'static Labels,
    date: NaiveDate,
}

impl<'a> DocumentAssembler<'a> {
    /// Creates an assembler dated today.
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            presets: StylePresets::new(options),
            labels: Labels::for_locale(options.locale),
            date: Local::now().date_naive(),
        }
    }

    /// Overrides the generation date printed on the cover.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Lays out the whole document: header, footer, cover page and body.
    pub fn assemble(&self, tree: &DocTree) -> Result<Document> {
        let mut document = Document::new(self.options.header_text());
        document.header = Some(self.header());
        document.footer = Some(self.footer());
        self.cover_page(&mut document);

        let body = StructureWalker::new(&self.presets, self.labels).walk(tree)?;
        document.extend(body);
        info!("Assembled document with {} blocks", document.blocks().len());
        Ok(document)
    }

    /// Lays out the document and persists it with `writer` at the configured path.
    ///
    /// The writer is only invoked after the whole document has been laid out.
    pub fn build(&self, tree: &DocTree, writer: &mut dyn DocumentWriter) -> Result<()> {
        let document = self.assemble(tree)?;
        writer.write(&document, &self.options.file)?;
        info!("Wrote {}", self.options.file.display());
        Ok(())
    }

    fn marginalia_style(&self) -> RunStyle {
        RunStyle::new(self.options.body_font.clone(), MARGINALIA_FONT_SIZE)
    }

    fn header(&self) -> Paragraph {
        let mut paragraph = Paragraph::new();
        paragraph.alignment = HorizontalAlignment::Left;
        paragraph.push_text(self.options.header_text(), &self.marginalia_style());
        paragraph
    }

    fn footer(&self) -> Footer {
        let mut text = Paragraph::new();
        text.alignment = HorizontalAlignment::Right;
        text.push_text(self.options.copyright.as_str(), &self.marginalia_style());
        Footer {
            page_number: self.marginalia_style(),
            text,
        }
    }

    fn cover_page(&self, document: &mut Document) {
        let date = self.labels.long_date(self.date);
        let lines = [
            (COVER_TITLE, self.options.title.as_str()),
            (COVER_SUBTITLE, self.options.subtitle.as_str()),
            (COVER_VERSION, self.options.version.as_str()),
            (COVER_DATE, date.as_str()),
            (COVER_COMPANY, self.options.company.as_str()),
        ];
        for ((gap, size, bold), text) in lines {
            let mut paragraph = self.presets.paragraph(Preset::Cover, gap);
            let style = self
                .presets
                .run_style(Preset::Cover)
                .with_size(size)
                .with_bold(bold);
            paragraph.push_text(text, &style);
            document.push_paragraph(paragraph);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use crate::tree::{ClassUnit, PackageUnit};

    fn options() -> Options {
        Options::from_pairs([
            ("-title", "Widgets"),
            ("-subtitle", "API Reference"),
            ("-version", "1.4"),
            ("-company", "Example Corp"),
            ("-copyright", "(c) Example Corp"),
        ])
        .unwrap()
    }

    #[test]
    fn cover_page_lists_five_fields_in_order() {
        let options = options();
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let document = DocumentAssembler::new(&options)
            .with_date(date)
            .assemble(&DocTree::new())
            .unwrap();

        let cover: Vec<_> = document.paragraphs().map(Paragraph::plain_text).collect();
        assert_eq!(
            cover,
            vec!["Widgets", "API Reference", "1.4", "October 19, 2026", "Example Corp"]
        );
        let first = document.paragraphs().next().unwrap();
        assert_eq!(first.spacing_before, 8.0);
        assert_eq!(first.alignment, HorizontalAlignment::Center);
        let title_run = first.runs().next().unwrap();
        assert_eq!(title_run.style.size_pt, 28);
        assert!(title_run.style.bold);
    }

    #[test]
    fn header_and_footer_carry_fixed_texts() {
        let options = options();
        let document = DocumentAssembler::new(&options)
            .assemble(&DocTree::new())
            .unwrap();

        let header = document.header.as_ref().unwrap();
        assert_eq!(header.plain_text(), "Widgets API Reference");
        assert_eq!(header.alignment, HorizontalAlignment::Left);

        let footer = document.footer.as_ref().unwrap();
        assert_eq!(footer.text.plain_text(), "(c) Example Corp");
        assert_eq!(footer.text.alignment, HorizontalAlignment::Right);
        assert_eq!(footer.page_number.size_pt, 8);
    }

    #[test]
    fn body_follows_cover_page() {
        let options = options();
        let tree = DocTree::new()
            .with_package(PackageUnit::new("com.example"))
            .with_class(ClassUnit::new("com.example", "Widget"));
        let document = DocumentAssembler::new(&options).assemble(&tree).unwrap();

        assert!(matches!(document.blocks()[5], Block::PageBreak));
        assert!(document.blocks().len() > 6);
    }
}
