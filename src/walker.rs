//! Layout of the document body from the documentation tree.
//!
//! The walker visits classes in tree order and never re-sorts them. The first
//! class of every package opens a chapter for that package; every class then
//! gets its own page with the inheritance breadcrumb, the class description
//! and one block per member.

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::labels::Labels;
use crate::markup::{self, Markup, Variant};
use crate::model::{Block, Paragraph, RunStyle};
use crate::style::{Preset, StylePresets, BODY_INDENT};
use crate::tree::{CallableUnit, ClassUnit, DocTree, MemberKind, MemberUnit, PackageUnit};

const INDENT_UNIT: &str = "　　 ";
const CONNECTOR: &str = "　└ ";

/// Qualified prefixes removed from type names in signatures.
const STANDARD_PREFIXES: &[&str] = &["java.lang.", "java.util.", "java.io.", "java.nio."];

/// Removes the well-known standard library package prefixes from `type_name`.
///
/// Prefixes are removed wherever they occur, so type arguments are simplified
/// too: `java.util.Map<java.lang.String, T>` becomes `Map<String, T>`.
pub fn simplify_type(type_name: &str) -> String {
    let mut simplified = type_name.to_string();
    for prefix in STANDARD_PREFIXES {
        simplified = simplified.replace(prefix, "");
    }
    simplified
}

/// Returns the last segment of a qualified name.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Breadcrumb lines of a class: furthest ancestor first, the class itself last.
pub fn breadcrumb(class: &ClassUnit) -> Vec<String> {
    let chain = class
        .superclasses
        .iter()
        .rev()
        .chain(std::iter::once(&class.qualified_name));
    chain
        .enumerate()
        .map(|(depth, name)| {
            let mut line = String::new();
            if depth > 0 {
                line.push_str(&INDENT_UNIT.repeat(depth - 1));
                line.push_str(CONNECTOR);
            }
            line.push_str(name);
            line
        })
        .collect()
}

/// Packages that already received a chapter, in emission order.
#[derive(Debug, Default)]
struct EmittedPackages<'t> {
    names: Vec<&'t str>,
}

impl<'t> EmittedPackages<'t> {
    /// Records `name`; returns `false` if it was already present.
    fn insert(&mut self, name: &'t str) -> bool {
        if self.names.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }
}

/// Walks one documentation tree into body blocks.
///
/// A walker is scoped to a single build; it owns the set of emitted packages.
pub struct StructureWalker<'a> {
    presets: &'a StylePresets,
    labels: &'a Labels,
    blocks: Vec<Block>,
}

impl<'a> StructureWalker<'a> {
    /// Creates a walker using `presets` for styling and `labels` for captions.
    pub fn new(presets: &'a StylePresets, labels: &'a Labels) -> Self {
        Self {
            presets,
            labels,
            blocks: Vec::new(),
        }
    }

    /// Lays out every class of `tree` and returns the body blocks.
    pub fn walk(mut self, tree: &DocTree) -> Result<Vec<Block>> {
        let mut emitted = EmittedPackages::default();
        for class in &tree.classes {
            let package = tree
                .package(&class.package)
                .ok_or_else(|| Error::UnknownPackage {
                    class: class.qualified_name.clone(),
                    package: class.package.clone(),
                })?;
            if emitted.insert(&package.name) {
                self.package_chapter(package);
            }
            self.class_page(class);
        }
        info!(
            "Laid out {} classes in {} packages",
            tree.classes.len(),
            emitted.names.len()
        );
        Ok(self.blocks)
    }

    fn package_chapter(&mut self, package: &PackageUnit) {
        debug!("Opening chapter for package {}", package.name);
        self.blocks.push(Block::PageBreak);
        self.plain(
            Preset::ChapterTitle,
            0.0,
            &format!("{} {}", package.name, self.labels.package),
        );
        if !package.comment.is_empty() {
            self.finish(self.presets.separator());
            self.print(self.presets.body(Some(0.0)), Preset::Default, &package.comment);
        }
    }

    fn class_page(&mut self, class: &ClassUnit) {
        debug!("Laying out class {}", class.qualified_name);
        self.blocks.push(Block::PageBreak);

        let caption = format!("{} {}", class.package, self.labels.package);
        let mut paragraph = self.presets.body(Some(0.0));
        paragraph.push_text(caption, &self.presets.run_style(Preset::Default));
        self.finish(paragraph);

        self.plain(
            Preset::ChapterTitle,
            1.0,
            &format!("{} {}", class.name, self.labels.class),
        );
        self.lines(self.presets.body(Some(0.0)), &breadcrumb(class), false);

        if !class.interfaces.is_empty() {
            self.plain(Preset::Section, 1.0, self.labels.interfaces);
            self.lines(
                self.presets.body(Some(BODY_INDENT)),
                &[class.interfaces.join(", ")],
                false,
            );
        }

        self.plain(
            Preset::SubTitle,
            2.0,
            &join_words(&[class.modifiers.as_str(), class.name.as_str()]),
        );
        self.print(self.presets.body(Some(0.0)), Preset::Default, &class.comment);

        self.tag_section(self.labels.version, &class.version);
        self.tag_section(self.labels.author, &class.author);

        self.group(self.labels.enum_constant_detail, &class.enum_constants, Self::field_block);
        self.group(self.labels.field_detail, &class.fields, Self::field_block);
        self.group(self.labels.constructor_detail, &class.constructors, Self::callable_block);
        self.group(self.labels.method_detail, &class.methods, Self::callable_block);
    }

    fn tag_section(&mut self, label: &str, texts: &[String]) {
        if texts.is_empty() {
            return;
        }
        self.plain(Preset::Section, 1.0, label);
        self.lines(self.presets.body(Some(BODY_INDENT)), texts, true);
    }

    fn group<T>(&mut self, title: &str, members: &[T], mut block: impl FnMut(&mut Self, &T)) {
        if members.is_empty() {
            return;
        }
        self.plain(Preset::Title, 1.0, title);
        for (index, member) in members.iter().enumerate() {
            if index > 0 {
                self.finish(self.presets.separator());
            }
            block(self, member);
        }
    }

    fn field_block(&mut self, member: &MemberUnit) {
        self.member_heading(&member.name, member.kind);
        self.plain(
            Preset::Default,
            0.0,
            &join_words(&[member.modifiers.as_str(), member.name.as_str()]),
        );
        self.print(
            self.presets.body(Some(BODY_INDENT)),
            Preset::Default,
            &member.comment,
        );
    }

    fn callable_block(&mut self, callable: &CallableUnit) {
        self.member_heading(&callable.name, callable.kind);
        self.plain(Preset::Default, 0.0, &signature(callable));
        if !callable.comment.is_empty() {
            self.print(
                self.presets.body(Some(BODY_INDENT)),
                Preset::Default,
                &callable.comment,
            );
        }

        if !callable.parameters.is_empty() {
            self.plain(Preset::Section, 1.0, self.labels.parameters);
            for (index, parameter) in callable.parameters.iter().enumerate() {
                let entry = format!("{}) {}", index + 1, parameter.name);
                self.described(&entry, callable.param_comment(&parameter.name));
            }
        }
        for tag in &callable.param_comments {
            if !callable.parameters.iter().any(|parameter| parameter.name == tag.name) {
                warn!(
                    "`{}` documents unknown parameter `{}`",
                    callable.name, tag.name
                );
            }
        }

        if callable.kind == MemberKind::Method {
            let return_type = simplify_type(&callable.return_type);
            if return_type != "void" {
                self.plain(Preset::Section, 1.0, self.labels.returns);
                self.described(&return_type, callable.return_comment.as_deref());
            }
        }

        if !callable.thrown_types.is_empty() {
            self.plain(Preset::Section, 1.0, self.labels.throws);
            for exception in &callable.thrown_types {
                self.described(simple_name(exception), callable.throws_comment(exception));
            }
        }
    }

    fn member_heading(&mut self, name: &str, kind: MemberKind) {
        self.plain(
            Preset::SubTitle,
            1.0,
            &format!("{} {}", name, self.labels.kind(kind)),
        );
    }

    /// Indented entry `subject`, followed by ` - comment` when a comment exists.
    fn described(&mut self, subject: &str, comment: Option<&str>) {
        let style = self.presets.run_style(Preset::Default);
        let mut paragraph = self.presets.body(Some(BODY_INDENT));
        match comment.filter(|comment| !comment.is_empty()) {
            Some(comment) => {
                paragraph.push_text(format!("{subject} - "), &style);
                self.print(paragraph, Preset::Default, comment);
            }
            None => {
                paragraph.push_text(subject, &style);
                self.finish(paragraph);
            }
        }
    }

    /// One paragraph of `preset` holding `text` verbatim.
    fn plain(&mut self, preset: Preset, spacing_before: f64, text: &str) {
        let mut paragraph = self.presets.paragraph(preset, spacing_before);
        paragraph.push_text(text, &self.presets.run_style(preset));
        self.finish(paragraph);
    }

    /// One paragraph with `texts` on separate lines, parsed as markup when `markup` is set.
    fn lines(&mut self, mut paragraph: Paragraph, texts: &[String], markup: bool) {
        let style = self.presets.run_style(Preset::Default);
        for (index, text) in texts.iter().enumerate() {
            if index > 0 {
                paragraph.push_line_break();
            }
            if markup {
                paragraph = self.write_markup(paragraph, &style, text);
            } else {
                paragraph.push_text(text.as_str(), &style);
            }
        }
        self.finish(paragraph);
    }

    /// Appends `text` as markup to `paragraph`, then emits it.
    fn print(&mut self, paragraph: Paragraph, preset: Preset, text: &str) {
        let style = self.presets.run_style(preset);
        let paragraph = self.write_markup(paragraph, &style, text);
        self.finish(paragraph);
    }

    /// Writes parsed markup into `paragraph` and returns the paragraph still open.
    ///
    /// Each paragraph break emits the open paragraph and continues in a new
    /// body paragraph with the same indent.
    fn write_markup(&mut self, mut paragraph: Paragraph, style: &RunStyle, text: &str) -> Paragraph {
        for item in markup::parse(text) {
            match item {
                Markup::ParagraphBreak => {
                    let indent = paragraph.indent;
                    self.finish(paragraph);
                    paragraph = self.presets.body(indent);
                }
                Markup::LineBreak => paragraph.push_line_break(),
                Markup::Run(run) => {
                    let run_style = match run.variant {
                        Variant::Default => style.clone(),
                        Variant::InlineTagged => self.presets.tagged(style),
                    };
                    paragraph.push_text(run.text, &run_style);
                }
            }
        }
        paragraph
    }

    fn finish(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }
}

/// Declaration line of a constructor or method.
pub fn signature(callable: &CallableUnit) -> String {
    let parameters = callable
        .parameters
        .iter()
        .map(|parameter| format!("{} {}", simplify_type(&parameter.type_name), parameter.name))
        .collect::<Vec<_>>()
        .join(", ");
    let declaration = format!("{}({})", callable.name, parameters);
    let return_type = match callable.kind {
        MemberKind::Method => simplify_type(&callable.return_type),
        _ => String::new(),
    };
    join_words(&[callable.modifiers.as_str(), return_type.as_str(), declaration.as_str()])
}

fn join_words(words: &[&str]) -> String {
    words
        .iter()
        .filter(|word| !word.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breadcrumb_runs_from_root_to_class() {
        let class = ClassUnit::new("p", "A").with_superclasses(["p.B", "p.C"]);
        assert_eq!(
            breadcrumb(&class),
            vec!["p.C".to_string(), "　└ p.B".to_string(), "　　 　└ p.A".to_string()]
        );
    }

    #[test]
    fn breadcrumb_of_root_class_is_the_class_alone() {
        let class = ClassUnit::new("java.lang", "Object");
        assert_eq!(breadcrumb(&class), vec!["java.lang.Object".to_string()]);
    }

    #[test]
    fn standard_prefixes_are_simplified() {
        assert_eq!(
            simplify_type("java.util.Map<java.lang.String, java.io.File>"),
            "Map<String, File>"
        );
        assert_eq!(simplify_type("com.example.Widget"), "com.example.Widget");
        assert_eq!(simple_name("java.io.IOException"), "IOException");
        assert_eq!(simple_name("Plain"), "Plain");
    }

    #[test]
    fn signatures_list_parameters_in_declaration_order() {
        let method = CallableUnit::method("copy", "public static", "long")
            .with_parameter("from", "java.nio.file.Path")
            .with_parameter("to", "java.io.OutputStream");
        assert_eq!(
            signature(&method),
            "public static long copy(file.Path from, OutputStream to)"
        );

        let constructor = CallableUnit::constructor("Widget", "");
        assert_eq!(signature(&constructor), "Widget()");
    }

    #[test]
    fn return_types_keep_non_standard_packages() {
        let method = CallableUnit::method("mix", "public", "com.example.Color");
        assert_eq!(signature(&method), "public com.example.Color mix()");
        let method = CallableUnit::method("names", "public", "java.util.List<java.lang.String>");
        assert_eq!(signature(&method), "public List<String> names()");
    }

    #[test]
    fn emitted_packages_reject_duplicates() {
        let mut emitted = EmittedPackages::default();
        assert!(emitted.insert("a"));
        assert!(emitted.insert("b"));
        assert!(!emitted.insert("a"));
        assert_eq!(emitted.names, vec!["a", "b"]);
    }
}
