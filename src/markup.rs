//! Conversion of documentation comment markup into styled text fragments.
//!
//! Comments use a small, lenient dialect: HTML-like `<p>` paragraph markers,
//! arbitrary simple tags that are dropped, six character entities, and inline
//! documentation tags such as `{@code value}` whose payload is highlighted
//! with an alternate font. Conversion is an ordered pipeline of pure text
//! transforms; each step is exposed on its own so it can be exercised in
//! isolation:
//!
//! 1. [`split_paragraphs`]
//! 2. [`collapse_soft_wraps`]
//! 3. [`split_sentences`]
//! 4. [`strip_tags`]
//! 5. [`decode_entities`]
//! 6. [`extract_inline_tags`]
//!
//! [`parse`] runs the whole pipeline and yields a flat list of [`Markup`]
//! items. Styles are applied by the caller: a [`Variant::Default`] run uses
//! the caller's run style, a [`Variant::InlineTagged`] run the alternate font
//! at the same size.

use once_cell::sync::Lazy;
use regex::Regex;

// Whitespace in the patterns below is ASCII only (` \t\n\x0B\f\r`), so
// ideographic and no-break spaces survive as text.

static PARAGRAPH_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\n\x0B\f\r]*<[pP]>[ \t\n\x0B\f\r]*").unwrap());

static SOFT_WRAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\n\x0B\f\r]*[\r\n]+[ \t\n\x0B\f\r]*").unwrap());

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[ \t\n\x0B\f\r]+|。[ \t\n\x0B\f\r]*").unwrap());

static SIMPLE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t\n\x0B\f\r]*</?(?:[a-z]+|[A-Z]+)>[ \t\n\x0B\f\r]*").unwrap()
});

static INLINE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{@[a-z][A-Za-z]*[ \t\n\x0B\f\r]*([^}]*)\}").unwrap());

const ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&nbsp;", " "),
    ("&amp;", "&"),
];

/// Rendering variant of a text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Body text in the caller's run style.
    Default,
    /// Payload of an inline documentation tag, set in the alternate font.
    InlineTagged,
}

/// A run of text produced by the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    /// The decoded text.
    pub text: String,
    /// How the run is styled.
    pub variant: Variant,
}

impl Run {
    /// Creates a body text run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            variant: Variant::Default,
        }
    }

    /// Creates an inline-tagged run.
    pub fn tagged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            variant: Variant::InlineTagged,
        }
    }
}

/// One item of parser output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Markup {
    /// Starts a new paragraph.
    ParagraphBreak,
    /// Starts a new line inside the current paragraph.
    LineBreak,
    /// Styled text.
    Run(Run),
}

/// Converts one raw comment into paragraph breaks, line breaks and runs.
///
/// For a paragraph the output is `line (LineBreak line)*`, each line being a
/// possibly empty sequence of runs. Paragraphs are separated by
/// [`Markup::ParagraphBreak`], so `k` paragraph markers always yield `k`
/// breaks.
pub fn parse(text: &str) -> Vec<Markup> {
    let mut items = Vec::new();
    for (index, chunk) in split_paragraphs(text).into_iter().enumerate() {
        if index > 0 {
            items.push(Markup::ParagraphBreak);
        }
        let collapsed = collapse_soft_wraps(chunk);
        for (line_index, line) in split_sentences(&collapsed).into_iter().enumerate() {
            if line_index > 0 {
                items.push(Markup::LineBreak);
            }
            let decoded = decode_entities(&strip_tags(line));
            items.extend(extract_inline_tags(&decoded).into_iter().map(Markup::Run));
        }
    }
    items
}

/// Splits `text` on case-insensitive `<p>` markers and their surrounding whitespace.
///
/// Empty chunks are kept, so the result always has one more element than
/// there are markers.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_MARKER.split(text).collect()
}

/// Replaces every whitespace run containing a line terminator with one space.
pub fn collapse_soft_wraps(text: &str) -> String {
    SOFT_WRAP.replace_all(text, " ").into_owned()
}

/// Splits `text` into pseudo-lines after each sentence terminator.
///
/// A terminator is a `.` followed by whitespace, or a full-width `。`. The
/// terminator stays with its line, the whitespace after it is consumed.
/// Trailing empty lines are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    for found in SENTENCE_END.find_iter(text) {
        let terminator_len = found.as_str().chars().next().map_or(0, char::len_utf8);
        lines.push(&text[start..found.start() + terminator_len]);
        start = found.end();
    }
    lines.push(&text[start..]);

    while lines.len() > 1 && lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Removes simple tags such as `<b>`, `</CODE>` or `<br>` with their surrounding whitespace.
///
/// Tag names must be entirely lower-case or entirely upper-case. Anything
/// lacking a closing `>` is left untouched.
pub fn strip_tags(text: &str) -> String {
    SIMPLE_TAG.replace_all(text, "").into_owned()
}

/// Decodes the six supported character entities.
///
/// `&amp;` is decoded last so an escaped entity is decoded exactly once.
pub fn decode_entities(text: &str) -> String {
    let mut decoded = text.to_string();
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }
    decoded
}

/// Splits `text` around inline documentation tags.
///
/// The tag name is discarded; a non-empty trimmed payload becomes an
/// [`Variant::InlineTagged`] run. Text between tags becomes
/// [`Variant::Default`] runs, empty ones are omitted. The payload ends at the
/// first `}`, nested braces are not supported.
pub fn extract_inline_tags(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut position = 0;
    for captures in INLINE_TAG.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        push_plain(&mut runs, &text[position..whole.start()]);
        let payload = captures.get(1).map_or("", |payload| trim_ascii(payload.as_str()));
        if !payload.is_empty() {
            runs.push(Run::tagged(payload));
        }
        position = whole.end();
    }
    push_plain(&mut runs, &text[position..]);
    runs
}

fn trim_ascii(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0B')
}

fn push_plain(runs: &mut Vec<Run>, text: &str) {
    if !text.is_empty() {
        runs.push(Run::plain(text));
    }
}
