//! Font loading utilities for the apidoc_pdf crate.
//!
//! Families are looked up by name. A family `Name` consists of the files
//! `Name-Regular.ttf`, `Name-Bold.ttf`, `Name-Italic.ttf` and
//! `Name-BoldItalic.ttf` inside one of the search directories, in order:
//!
//! 1. the directory named by `APIDOC_PDF_FONTS_DIR`,
//! 2. `assets/fonts` next to the running executable,
//! 3. `assets/fonts` inside the crate directory.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use genpdf::fonts::{self, Font, FontData, FontFamily};
use log::debug;

use crate::error::{Error, Result};

/// Environment variable naming an additional font directory searched first.
pub const FONTS_DIR_ENV: &str = "APIDOC_PDF_FONTS_DIR";

const STYLE_SUFFIXES: &[&str] = &["Regular", "Bold", "Italic", "BoldItalic"];

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(path) = env::var(FONTS_DIR_ENV) {
        if !path.trim().is_empty() {
            candidates.push(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.iter().any(|existing| existing == &candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if !candidates
        .iter()
        .any(|existing| existing == &manifest_candidate)
    {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn missing_font_files(directory: &Path, family: &str) -> Vec<String> {
    STYLE_SUFFIXES
        .iter()
        .map(|suffix| format!("{family}-{suffix}.ttf"))
        .filter(|name| !directory.join(name).is_file())
        .collect()
}

fn resolve_font_directory(family: &str) -> Result<PathBuf> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }
        let missing = missing_font_files(&candidate, family);
        if missing.is_empty() {
            return Ok(candidate);
        }
        attempts.push(format!(
            "{} (missing files [{}])",
            candidate.display(),
            missing.join(", ")
        ));
    }

    Err(Error::Font {
        family: family.to_string(),
        message: format!(
            "checked {}; set {} to a directory holding the family",
            attempts.join(", "),
            FONTS_DIR_ENV
        ),
    })
}

/// Loads the four styles of the font family `family`.
pub fn load_font_family(family: &str) -> Result<FontFamily<FontData>> {
    let directory = resolve_font_directory(family)?;
    debug!("Loading font family {} from {}", family, directory.display());

    fonts::from_files(&directory, family, None).map_err(|err| Error::Font {
        family: family.to_string(),
        message: format!("failed to load from {}: {}", directory.display(), err),
    })
}

/// Indicates whether all files of the font family `family` are present in a search directory.
pub fn font_family_available(family: &str) -> bool {
    resolve_font_directory(family).is_ok()
}

/// Font families installed into one `genpdf` document, loaded at most once each.
pub struct FontRegistry {
    families: HashMap<String, FontFamily<Font>>,
}

impl FontRegistry {
    /// Creates the document with `default_family` as its default font and registers it.
    pub fn with_document(default_family: &str) -> Result<(Self, genpdf::Document)> {
        let data = load_font_family(default_family)?;
        let mut document = genpdf::Document::new(data.clone());
        let mut families = HashMap::new();
        families.insert(default_family.to_string(), document.add_font_family(data));
        Ok((Self { families }, document))
    }

    /// Returns the installed family `name`, loading it into `document` on first use.
    pub fn family(
        &mut self,
        document: &mut genpdf::Document,
        name: &str,
    ) -> Result<FontFamily<Font>> {
        if let Some(family) = self.families.get(name) {
            return Ok(*family);
        }
        let family = document.add_font_family(load_font_family(name)?);
        self.families.insert(name.to_string(), family);
        Ok(family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_family_reports_search_paths() {
        let err = load_font_family("NoSuchFamily-For-Tests").unwrap_err();
        match err {
            Error::Font { family, message } => {
                assert_eq!(family, "NoSuchFamily-For-Tests");
                assert!(message.contains(FONTS_DIR_ENV));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!font_family_available("NoSuchFamily-For-Tests"));
    }
}
