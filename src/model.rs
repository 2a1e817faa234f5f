//! Data structures describing the styled document produced by a build.
//!
//! The types in this module are backend-neutral: they record paragraphs,
//! runs and page breaks together with the formatting attributes a writer
//! backend needs, without referencing the rendering crate. A [`Document`] is
//! only ever appended to; once the build finishes it is handed to a
//! [`crate::writer::DocumentWriter`] exactly once.

/// Horizontal placement of a paragraph.
///
/// The variants map directly to [`genpdf::Alignment`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
}

/// Font attributes shared by all characters of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunStyle {
    /// Font family name.
    pub font: String,
    /// Font size in points.
    pub size_pt: u8,
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
}

impl RunStyle {
    /// Creates a regular style for `font` at `size_pt`.
    pub fn new(font: impl Into<String>, size_pt: u8) -> Self {
        Self {
            font: font.into(),
            size_pt,
            bold: false,
            italic: false,
        }
    }

    /// Sets the font size and returns the updated style.
    pub fn with_size(mut self, size_pt: u8) -> Self {
        self.size_pt = size_pt;
        self
    }

    /// Sets the bold flag and returns the updated style.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Replaces the font family and returns the updated style.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }
}

/// A slice of text rendered with a single [`RunStyle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledRun {
    /// The text of the run.
    pub text: String,
    /// The font attributes of the run.
    pub style: RunStyle,
}

impl StyledRun {
    /// Creates a run.
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Content items of a paragraph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    /// Styled text.
    Run(StyledRun),
    /// Line break inside the paragraph; resets the position, not the style.
    LineBreak,
}

/// Which sides of a paragraph carry a border rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Borders {
    /// Rule above the paragraph.
    pub top: bool,
    /// Rule below the paragraph.
    pub bottom: bool,
    /// Rule left of the paragraph.
    pub left: bool,
    /// Rule right of the paragraph.
    pub right: bool,
}

impl Borders {
    /// No rules.
    pub const NONE: Borders = Borders {
        top: false,
        bottom: false,
        left: false,
        right: false,
    };

    /// A box on all four sides.
    pub const ALL: Borders = Borders {
        top: true,
        bottom: true,
        left: true,
        right: true,
    };

    /// A single rule below the paragraph.
    pub const BOTTOM: Borders = Borders {
        top: false,
        bottom: true,
        left: false,
        right: false,
    };

    /// Returns whether any side carries a rule.
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

/// A paragraph with its formatting attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    inlines: Vec<Inline>,
    /// Horizontal placement.
    pub alignment: HorizontalAlignment,
    /// Left indentation in points, if set.
    pub indent: Option<f64>,
    /// Extra indentation of the first line in points, if set.
    pub first_line_indent: Option<f64>,
    /// Vertical gap before the paragraph, in lines.
    pub spacing_before: f64,
    /// Line spacing as a multiple of single spacing.
    pub line_spacing: f64,
    /// Border rules around the paragraph.
    pub borders: Borders,
}

impl Default for Paragraph {
    fn default() -> Self {
        Self {
            inlines: Vec::new(),
            alignment: HorizontalAlignment::Left,
            indent: None,
            first_line_indent: None,
            spacing_before: 0.0,
            line_spacing: 1.0,
            borders: Borders::NONE,
        }
    }
}

impl Paragraph {
    /// Creates an empty, left-aligned paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content items in order.
    pub fn inlines(&self) -> &[Inline] {
        &self.inlines
    }

    /// Appends a run.
    pub fn push_run(&mut self, run: StyledRun) {
        self.inlines.push(Inline::Run(run));
    }

    /// Appends `text` styled with `style`.
    pub fn push_text(&mut self, text: impl Into<String>, style: &RunStyle) {
        self.push_run(StyledRun::new(text, style.clone()));
    }

    /// Appends a line break.
    pub fn push_line_break(&mut self) {
        self.inlines.push(Inline::LineBreak);
    }

    /// Iterates over the runs, skipping line breaks.
    pub fn runs(&self) -> impl Iterator<Item = &StyledRun> {
        self.inlines.iter().filter_map(|inline| match inline {
            Inline::Run(run) => Some(run),
            Inline::LineBreak => None,
        })
    }

    /// Groups the runs into the lines separated by line breaks.
    ///
    /// A paragraph always has at least one (possibly empty) line.
    pub fn lines(&self) -> Vec<Vec<&StyledRun>> {
        let mut lines = vec![Vec::new()];
        for inline in &self.inlines {
            match inline {
                Inline::Run(run) => {
                    if let Some(line) = lines.last_mut() {
                        line.push(run);
                    }
                }
                Inline::LineBreak => lines.push(Vec::new()),
            }
        }
        lines
    }

    /// Returns the plain text, line breaks rendered as `\n`.
    pub fn plain_text(&self) -> String {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Run(run) => run.text.as_str(),
                Inline::LineBreak => "\n",
            })
            .collect()
    }

    /// Returns whether the paragraph has no text.
    pub fn is_empty(&self) -> bool {
        self.runs().all(|run| run.text.is_empty())
    }
}

/// Top-level content of the document body.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Styled paragraph content.
    Paragraph(Paragraph),
    /// Explicit page break request.
    PageBreak,
}

/// Running footer: a centered page number above a fixed text line.
#[derive(Clone, Debug, PartialEq)]
pub struct Footer {
    /// Style of the page number.
    pub page_number: RunStyle,
    /// The fixed text line.
    pub text: Paragraph,
}

/// A complete styled document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Document title recorded in the output metadata.
    pub title: String,
    /// Running header, one line.
    pub header: Option<Paragraph>,
    /// Running footer.
    pub footer: Option<Footer>,
    blocks: Vec<Block>,
}

impl Document {
    /// Creates an empty document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Returns the body blocks in order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Appends a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Appends a paragraph.
    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.push(Block::Paragraph(paragraph));
    }

    /// Appends a page break.
    pub fn push_page_break(&mut self) {
        self.push(Block::PageBreak);
    }

    /// Appends several blocks in order.
    pub fn extend<I>(&mut self, blocks: I)
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
    }

    /// Iterates over the body paragraphs, skipping page breaks.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(paragraph) => Some(paragraph),
            Block::PageBreak => None,
        })
    }
}
