//! Named formatting presets for paragraphs and runs.
//!
//! Every paragraph of a document is created from one [`Preset`]. The preset
//! table fixes size, weight, alignment, borders and line spacing; the gap
//! before the paragraph and the left indent are chosen by the caller.

use crate::config::Options;
use crate::model::{Borders, HorizontalAlignment, Paragraph, RunStyle};

/// Line spacing shared by all presets except [`Preset::Title`].
pub const AUTO_LINE_SPACING: f64 = 1.15;

/// Tighter line spacing of the boxed [`Preset::Title`].
pub const TITLE_LINE_SPACING: f64 = 1.0;

/// Font size of body text in points.
pub const BODY_FONT_SIZE: u8 = 9;

/// Left indent of descriptions and list entries in points.
pub const BODY_INDENT: f64 = 10.0;

/// Named paragraph styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Centered cover page line.
    Cover,
    /// Large bold chapter heading.
    ChapterTitle,
    /// Boxed group heading.
    Title,
    /// Medium heading of a description or member block.
    SubTitle,
    /// Small label such as "Parameters:".
    Section,
    /// Body text.
    Default,
    /// Empty paragraph drawing only a rule below itself.
    Separator,
}

/// Fixed attributes of a preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresetSpec {
    /// Run font size in points.
    pub size_pt: u8,
    /// Run weight.
    pub bold: bool,
    /// Paragraph alignment.
    pub alignment: HorizontalAlignment,
    /// First-line indent in points.
    pub first_line_indent: Option<f64>,
    /// Border rules.
    pub borders: Borders,
    /// Line spacing multiple.
    pub line_spacing: f64,
}

impl Preset {
    /// Returns the fixed attributes of the preset.
    pub fn spec(self) -> PresetSpec {
        let base = PresetSpec {
            size_pt: BODY_FONT_SIZE,
            bold: false,
            alignment: HorizontalAlignment::Left,
            first_line_indent: None,
            borders: Borders::NONE,
            line_spacing: AUTO_LINE_SPACING,
        };
        match self {
            Preset::Cover => PresetSpec {
                alignment: HorizontalAlignment::Center,
                ..base
            },
            Preset::ChapterTitle => PresetSpec {
                size_pt: 20,
                bold: true,
                ..base
            },
            Preset::Title => PresetSpec {
                size_pt: 14,
                first_line_indent: Some(5.0),
                borders: Borders::ALL,
                line_spacing: TITLE_LINE_SPACING,
                ..base
            },
            Preset::SubTitle => PresetSpec { size_pt: 14, ..base },
            Preset::Section => PresetSpec { size_pt: 10, ..base },
            Preset::Default => base,
            Preset::Separator => PresetSpec {
                borders: Borders::BOTTOM,
                ..base
            },
        }
    }
}

/// Presets bound to the fonts of one build.
#[derive(Clone, Debug)]
pub struct StylePresets {
    body_font: String,
    tag_font: String,
}

impl StylePresets {
    /// Binds the presets to the fonts configured in `options`.
    pub fn new(options: &Options) -> Self {
        Self {
            body_font: options.body_font.clone(),
            tag_font: options.tag_font.clone(),
        }
    }

    /// Creates an empty paragraph of `preset` preceded by `spacing_before` lines.
    pub fn paragraph(&self, preset: Preset, spacing_before: f64) -> Paragraph {
        let spec = preset.spec();
        let mut paragraph = Paragraph::new();
        paragraph.alignment = spec.alignment;
        paragraph.first_line_indent = spec.first_line_indent;
        paragraph.spacing_before = spacing_before;
        paragraph.line_spacing = spec.line_spacing;
        paragraph.borders = spec.borders;
        paragraph
    }

    /// Creates an empty body paragraph, indented by `indent` points when given.
    pub fn body(&self, indent: Option<f64>) -> Paragraph {
        let mut paragraph = self.paragraph(Preset::Default, 0.0);
        paragraph.indent = indent;
        paragraph
    }

    /// Creates the divider drawn between sibling members.
    pub fn separator(&self) -> Paragraph {
        self.paragraph(Preset::Separator, 0.0)
    }

    /// Run style of `preset` in the body font.
    pub fn run_style(&self, preset: Preset) -> RunStyle {
        let spec = preset.spec();
        RunStyle::new(self.body_font.clone(), spec.size_pt).with_bold(spec.bold)
    }

    /// Style of an inline-tagged run: the alternate font at the size of `base`.
    pub fn tagged(&self, base: &RunStyle) -> RunStyle {
        base.clone().with_font(self.tag_font.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presets() -> StylePresets {
        StylePresets::new(&Options::default())
    }

    #[test]
    fn only_title_uses_tight_line_spacing() {
        for preset in [
            Preset::Cover,
            Preset::ChapterTitle,
            Preset::SubTitle,
            Preset::Section,
            Preset::Default,
            Preset::Separator,
        ] {
            assert_eq!(preset.spec().line_spacing, AUTO_LINE_SPACING, "{preset:?}");
        }
        assert_eq!(Preset::Title.spec().line_spacing, TITLE_LINE_SPACING);
        assert_eq!(Preset::Title.spec().borders, Borders::ALL);
    }

    #[test]
    fn paragraph_carries_caller_spacing() {
        let paragraph = presets().paragraph(Preset::Cover, 8.0);
        assert_eq!(paragraph.spacing_before, 8.0);
        assert_eq!(paragraph.alignment, HorizontalAlignment::Center);
        assert!(paragraph.inlines().is_empty());
    }

    #[test]
    fn body_and_title_paragraphs_take_preset_layout() {
        let presets = presets();
        let body = presets.body(Some(BODY_INDENT));
        assert_eq!(body.indent, Some(10.0));
        assert_eq!(body.spacing_before, 0.0);
        assert_eq!(body.line_spacing, AUTO_LINE_SPACING);
        assert_eq!(body.borders, Borders::NONE);

        let title = presets.paragraph(Preset::Title, 1.0);
        assert_eq!(title.first_line_indent, Some(5.0));
        assert_eq!(title.line_spacing, TITLE_LINE_SPACING);
        assert_eq!(title.borders, Borders::ALL);
        assert_eq!(title.indent, None);
    }

    #[test]
    fn separator_draws_only_bottom_rule() {
        let separator = presets().separator();
        assert_eq!(separator.borders, Borders::BOTTOM);
        assert!(separator.is_empty());
    }

    #[test]
    fn tagged_style_switches_font_and_keeps_size() {
        let presets = presets();
        let base = presets.run_style(Preset::SubTitle);
        let tagged = presets.tagged(&base);
        assert_eq!(base.font, "Roboto");
        assert_eq!(tagged.font, "RobotoMono");
        assert_eq!(tagged.size_pt, 14);
        assert!(presets.run_style(Preset::ChapterTitle).bold);
    }
}
