//! Build configuration.
//!
//! [`Options`] is constructed once before a build starts and then passed by
//! reference to every component that needs it. Option names follow the
//! single-dash convention of documentation tool command lines (`-title`), the
//! dash being optional. Every option takes exactly one value.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Output path used when no `file` option is given.
pub const DEFAULT_OUTPUT_FILE: &str = "document.pdf";

/// Body font family used when no `font1` option is given.
pub const DEFAULT_BODY_FONT: &str = "Roboto";

/// Inline-tag font family used when no `font2` option is given.
pub const DEFAULT_TAG_FONT: &str = "RobotoMono";

/// Language of the fixed captions and of the cover page date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    /// English captions, `October 19, 2026` style dates.
    #[default]
    En,
    /// Japanese captions, imperial era dates such as `令和8年10月19日`.
    Ja,
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en_us" => Ok(Self::En),
            "ja" | "ja-jp" | "ja_jp" => Ok(Self::Ja),
            _ => Err(Error::InvalidOptionValue {
                name: "locale".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Immutable settings of one document build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Path of the generated document.
    pub file: PathBuf,
    /// Font family for all regular text.
    pub body_font: String,
    /// Font family for inline-tagged terms.
    pub tag_font: String,
    /// Cover title, also the first half of the page header.
    pub title: String,
    /// Cover subtitle, also the second half of the page header.
    pub subtitle: String,
    /// Version line on the cover.
    pub version: String,
    /// Organization line on the cover.
    pub company: String,
    /// Fixed footer text.
    pub copyright: String,
    /// Caption and date language.
    pub locale: Locale,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            body_font: DEFAULT_BODY_FONT.to_string(),
            tag_font: DEFAULT_TAG_FONT.to_string(),
            title: String::new(),
            subtitle: String::new(),
            version: String::new(),
            company: String::new(),
            copyright: String::new(),
            locale: Locale::default(),
        }
    }
}

impl Options {
    /// Builds options from `(name, value)` pairs on top of the defaults.
    ///
    /// The first unsupported name aborts with [`Error::UnsupportedOption`].
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self::default().with_pairs(pairs)
    }

    /// Applies `(name, value)` pairs in order, later pairs overriding earlier ones.
    pub fn with_pairs<I, K, V>(mut self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in pairs {
            self.set(name.as_ref(), value.into())?;
        }
        Ok(self)
    }

    fn set(&mut self, name: &str, value: String) -> Result<()> {
        match normalize_name(name) {
            "file" => self.file = PathBuf::from(value),
            "font1" => self.body_font = value,
            "font2" => self.tag_font = value,
            "title" => self.title = value,
            "subtitle" => self.subtitle = value,
            "version" => self.version = value,
            "company" => self.company = value,
            "copyright" => self.copyright = value,
            "locale" => self.locale = value.parse()?,
            _ => return Err(Error::UnsupportedOption(name.to_string())),
        }
        Ok(())
    }

    /// Text of the running page header.
    pub fn header_text(&self) -> String {
        format!("{} {}", self.title, self.subtitle)
    }
}

fn normalize_name(name: &str) -> &str {
    name.strip_prefix('-').unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_pairs() {
        let options = Options::from_pairs(Vec::<(&str, &str)>::new()).unwrap();
        assert_eq!(options.file, PathBuf::from("document.pdf"));
        assert_eq!(options.body_font, DEFAULT_BODY_FONT);
        assert_eq!(options.tag_font, DEFAULT_TAG_FONT);
        assert_eq!(options.locale, Locale::En);
    }

    #[test]
    fn pairs_accept_dashed_and_bare_names() {
        let options = Options::from_pairs([
            ("-title", "Reference"),
            ("subtitle", "Core API"),
            ("-file", "out/api.pdf"),
            ("-locale", "ja"),
        ])
        .unwrap();
        assert_eq!(options.title, "Reference");
        assert_eq!(options.subtitle, "Core API");
        assert_eq!(options.file, PathBuf::from("out/api.pdf"));
        assert_eq!(options.locale, Locale::Ja);
        assert_eq!(options.header_text(), "Reference Core API");
    }

    #[test]
    fn later_pairs_override_earlier_ones() {
        let options = Options::from_pairs([("-title", "Old")])
            .and_then(|options| options.with_pairs([("-title", "New")]))
            .unwrap();
        assert_eq!(options.title, "New");
    }

    #[test]
    fn unsupported_option_is_rejected() {
        let err = Options::from_pairs([("-title", "x"), ("-color", "red")]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOption(name) if name == "-color"));
    }

    #[test]
    fn invalid_locale_is_rejected() {
        let err = Options::from_pairs([("-locale", "fr")]).unwrap_err();
        assert!(matches!(err, Error::InvalidOptionValue { name, .. } if name == "locale"));
    }
}
