//! Core entry point for the apidoc_pdf crate.
//!
//! A [`DocTree`] describing packages, classes and their members is laid out
//! by the [`DocumentAssembler`] into a format-neutral [`model::Document`],
//! which a [`DocumentWriter`] then persists. [`generate`] wires the pieces
//! together with the PDF backend.

pub mod assembler;
pub mod config;
pub mod error;
pub mod fonts;
pub mod labels;
pub mod markup;
pub mod model;
pub mod style;
pub mod tree;
pub mod walker;
pub mod writer;

pub use assembler::DocumentAssembler;
pub use config::{Locale, Options};
pub use error::{Error, Result};
pub use tree::DocTree;
pub use writer::{DocumentWriter, PdfWriter};

/// Renders `tree` as a PDF file at `options.file`.
pub fn generate(tree: &DocTree, options: &Options) -> Result<()> {
    DocumentAssembler::new(options).build(tree, &mut PdfWriter::new())
}
