//! The documentation tree consumed by a build.
//!
//! The tree is produced by an external documentation model provider and handed
//! over as JSON. All values are read-only once loaded; the walker only
//! traverses them. Classes appear in traversal order, which need not group
//! classes by package.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Kind of a member block, used to select its renderer and its label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemberKind {
    /// A regular field or constant.
    #[default]
    Field,
    /// A constant of an enum type.
    EnumConstant,
    /// A constructor.
    Constructor,
    /// A method.
    Method,
}

/// A documented package.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PackageUnit {
    /// Package name, e.g. `com.example.io`.
    pub name: String,
    /// Raw package description.
    pub comment: String,
}

impl PackageUnit {
    /// Creates a package without a description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
        }
    }

    /// Sets the description and returns the updated package.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// A field or enum constant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemberUnit {
    /// Simple member name.
    pub name: String,
    /// Modifier keywords, e.g. `public static final int`.
    pub modifiers: String,
    /// Raw member description.
    pub comment: String,
    /// Assigned from the class group the member is listed in.
    #[serde(skip)]
    pub kind: MemberKind,
}

impl MemberUnit {
    /// Creates a field.
    pub fn field(name: impl Into<String>, modifiers: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: modifiers.into(),
            comment: String::new(),
            kind: MemberKind::Field,
        }
    }

    /// Creates an enum constant.
    pub fn enum_constant(name: impl Into<String>, modifiers: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::EnumConstant,
            ..Self::field(name, modifiers)
        }
    }

    /// Sets the description and returns the updated member.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// A declared parameter of a callable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Fully qualified type, e.g. `java.util.List<java.lang.String>`.
    pub type_name: String,
}

/// Text of a `@param` tag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParamComment {
    /// Name of the parameter the tag documents.
    pub name: String,
    /// Raw tag text.
    pub comment: String,
}

/// Text of a `@throws` tag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThrowsComment {
    /// Qualified name of the documented exception type.
    pub exception: String,
    /// Raw tag text.
    pub comment: String,
}

/// A constructor or method.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CallableUnit {
    /// Simple name.
    pub name: String,
    /// Modifier keywords.
    pub modifiers: String,
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
    /// `@param` tags in source order.
    pub param_comments: Vec<ParamComment>,
    /// Fully qualified return type; empty for constructors.
    pub return_type: String,
    /// Text of the first `@return` tag.
    pub return_comment: Option<String>,
    /// Qualified names of declared exception types.
    pub thrown_types: Vec<String>,
    /// `@throws` tags in source order.
    pub throws_comments: Vec<ThrowsComment>,
    /// Raw description.
    pub comment: String,
    /// Assigned from the class group the callable is listed in.
    #[serde(skip)]
    pub kind: MemberKind,
}

impl CallableUnit {
    /// Creates a constructor.
    pub fn constructor(name: impl Into<String>, modifiers: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: modifiers.into(),
            kind: MemberKind::Constructor,
            ..Self::default()
        }
    }

    /// Creates a method returning `return_type`.
    pub fn method(
        name: impl Into<String>,
        modifiers: impl Into<String>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            modifiers: modifiers.into(),
            return_type: return_type.into(),
            kind: MemberKind::Method,
            ..Self::default()
        }
    }

    /// Appends a parameter and returns the updated callable.
    pub fn with_parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    /// Appends a `@param` tag and returns the updated callable.
    pub fn with_param_comment(mut self, name: impl Into<String>, comment: impl Into<String>) -> Self {
        self.param_comments.push(ParamComment {
            name: name.into(),
            comment: comment.into(),
        });
        self
    }

    /// Sets the `@return` text and returns the updated callable.
    pub fn with_return_comment(mut self, comment: impl Into<String>) -> Self {
        self.return_comment = Some(comment.into());
        self
    }

    /// Declares a thrown exception, optionally documented by a `@throws` tag.
    pub fn with_throws(mut self, exception: impl Into<String>, comment: Option<&str>) -> Self {
        let exception = exception.into();
        if let Some(comment) = comment {
            self.throws_comments.push(ThrowsComment {
                exception: exception.clone(),
                comment: comment.to_string(),
            });
        }
        self.thrown_types.push(exception);
        self
    }

    /// Sets the description and returns the updated callable.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Returns the `@param` text documenting `name`, matched by name only.
    pub fn param_comment(&self, name: &str) -> Option<&str> {
        self.param_comments
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.comment.as_str())
    }

    /// Returns the `@throws` text documenting the exception with qualified name `exception`.
    pub fn throws_comment(&self, exception: &str) -> Option<&str> {
        self.throws_comments
            .iter()
            .find(|tag| tag.exception == exception)
            .map(|tag| tag.comment.as_str())
    }
}

/// A documented class, interface or enum.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClassUnit {
    /// Simple name.
    pub name: String,
    /// Fully qualified name.
    pub qualified_name: String,
    /// Name of the containing package.
    pub package: String,
    /// Modifier keywords, e.g. `public abstract class`.
    pub modifiers: String,
    /// Qualified names of ancestors, immediate parent first.
    pub superclasses: Vec<String>,
    /// Qualified names of implemented interfaces.
    pub interfaces: Vec<String>,
    /// Raw class description.
    pub comment: String,
    /// Texts of `@version` tags.
    pub version: Vec<String>,
    /// Texts of `@author` tags.
    pub author: Vec<String>,
    /// Enum constants in declaration order.
    pub enum_constants: Vec<MemberUnit>,
    /// Fields in declaration order.
    pub fields: Vec<MemberUnit>,
    /// Constructors in declaration order.
    pub constructors: Vec<CallableUnit>,
    /// Methods in declaration order.
    pub methods: Vec<CallableUnit>,
}

impl ClassUnit {
    /// Creates a class named `name` inside `package`.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        let package = package.into();
        let name = name.into();
        let qualified_name = if package.is_empty() {
            name.clone()
        } else {
            format!("{package}.{name}")
        };
        Self {
            name,
            qualified_name,
            package,
            ..Self::default()
        }
    }

    /// Sets the modifiers and returns the updated class.
    pub fn with_modifiers(mut self, modifiers: impl Into<String>) -> Self {
        self.modifiers = modifiers.into();
        self
    }

    /// Sets the ancestor chain (immediate parent first) and returns the updated class.
    pub fn with_superclasses<I, S>(mut self, superclasses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.superclasses = superclasses.into_iter().map(Into::into).collect();
        self
    }

    /// Appends an implemented interface and returns the updated class.
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Sets the description and returns the updated class.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Appends a `@version` tag and returns the updated class.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version.push(version.into());
        self
    }

    /// Appends an `@author` tag and returns the updated class.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author.push(author.into());
        self
    }

    /// Appends an enum constant and returns the updated class.
    pub fn with_enum_constant(mut self, member: MemberUnit) -> Self {
        self.enum_constants.push(member);
        self
    }

    /// Appends a field and returns the updated class.
    pub fn with_field(mut self, member: MemberUnit) -> Self {
        self.fields.push(member);
        self
    }

    /// Appends a constructor and returns the updated class.
    pub fn with_constructor(mut self, callable: CallableUnit) -> Self {
        self.constructors.push(callable);
        self
    }

    /// Appends a method and returns the updated class.
    pub fn with_method(mut self, callable: CallableUnit) -> Self {
        self.methods.push(callable);
        self
    }

    fn assign_member_kinds(&mut self) {
        for member in &mut self.enum_constants {
            member.kind = MemberKind::EnumConstant;
        }
        for member in &mut self.fields {
            member.kind = MemberKind::Field;
        }
        for callable in &mut self.constructors {
            callable.kind = MemberKind::Constructor;
        }
        for callable in &mut self.methods {
            callable.kind = MemberKind::Method;
        }
    }
}

/// The whole documentation tree of one build.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocTree {
    /// Tool options recorded alongside the tree, as `(name, value)` pairs.
    pub options: Vec<(String, String)>,
    /// Described packages.
    pub packages: Vec<PackageUnit>,
    /// Classes in traversal order.
    pub classes: Vec<ClassUnit>,
}

impl DocTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a tree from JSON.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut tree: DocTree = serde_json::from_reader(reader)?;
        for class in &mut tree.classes {
            class.assign_member_kinds();
        }
        Ok(tree)
    }

    /// Decodes the JSON tree stored at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Appends a package and returns the updated tree.
    pub fn with_package(mut self, package: PackageUnit) -> Self {
        self.packages.push(package);
        self
    }

    /// Appends a class in traversal order and returns the updated tree.
    pub fn with_class(mut self, class: ClassUnit) -> Self {
        self.classes.push(class);
        self
    }

    /// Looks up a package by name.
    pub fn package(&self, name: &str) -> Option<&PackageUnit> {
        self.packages.iter().find(|package| package.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "options": [["-title", "Sample"]],
        "packages": [{"name": "com.example", "comment": "Example package."}],
        "classes": [{
            "name": "Color",
            "qualified_name": "com.example.Color",
            "package": "com.example",
            "modifiers": "public enum",
            "superclasses": ["java.lang.Enum", "java.lang.Object"],
            "enum_constants": [{"name": "RED", "modifiers": "public static final"}],
            "methods": [{
                "name": "mix",
                "modifiers": "public",
                "return_type": "com.example.Color",
                "parameters": [{"name": "other", "type_name": "com.example.Color"}],
                "param_comments": [{"name": "other", "comment": "the color to mix in"}]
            }]
        }]
    }"#;

    #[test]
    fn decodes_tree_and_assigns_kinds() {
        let tree = DocTree::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(tree.options, vec![("-title".to_string(), "Sample".to_string())]);
        assert_eq!(tree.package("com.example").unwrap().comment, "Example package.");

        let class = &tree.classes[0];
        assert_eq!(class.enum_constants[0].kind, MemberKind::EnumConstant);
        assert_eq!(class.methods[0].kind, MemberKind::Method);
        assert_eq!(class.methods[0].param_comment("other"), Some("the color to mix in"));
        assert!(class.fields.is_empty());
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = DocTree::from_reader("{\"classes\": 3}".as_bytes()).unwrap_err();
        assert!(matches!(err, crate::Error::Tree(_)));
    }

    #[test]
    fn comments_match_by_name_only() {
        let method = CallableUnit::method("put", "public", "void")
            .with_parameter("key", "java.lang.String")
            .with_parameter("value", "java.lang.Object")
            .with_param_comment("value", "stored value")
            .with_throws("java.io.IOException", Some("on failure"))
            .with_throws("java.lang.IllegalStateException", None);

        assert_eq!(method.param_comment("key"), None);
        assert_eq!(method.param_comment("value"), Some("stored value"));
        assert_eq!(method.throws_comment("java.io.IOException"), Some("on failure"));
        assert_eq!(method.throws_comment("IOException"), None);
        assert_eq!(method.thrown_types.len(), 2);
    }

    #[test]
    fn class_builder_derives_qualified_name() {
        let class = ClassUnit::new("com.example", "Widget");
        assert_eq!(class.qualified_name, "com.example.Widget");
        assert_eq!(ClassUnit::new("", "Top").qualified_name, "Top");
    }
}
