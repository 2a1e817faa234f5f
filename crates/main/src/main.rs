use std::error::Error;
use std::path::PathBuf;

use apidoc_pdf::{DocTree, Options};
use clap::Parser;
use log::info;

/// Renders a JSON documentation tree into a paginated PDF reference.
///
/// Fonts are looked up under `assets/fonts` next to the binary or inside the
/// crate, or in the directory named by `APIDOC_PDF_FONTS_DIR`.
#[derive(Parser)]
#[command(author, version, about = "Generate PDF API references from documentation trees")]
struct Cli {
    /// Documentation tree in JSON form.
    tree: PathBuf,

    /// Output file.
    #[arg(long)]
    file: Option<String>,

    /// Font family for regular text.
    #[arg(long)]
    font1: Option<String>,

    /// Font family for inline-tagged terms.
    #[arg(long)]
    font2: Option<String>,

    /// Cover title.
    #[arg(long)]
    title: Option<String>,

    /// Cover subtitle.
    #[arg(long)]
    subtitle: Option<String>,

    /// Version line on the cover.
    #[arg(long = "version-label")]
    version_label: Option<String>,

    /// Organization line on the cover.
    #[arg(long)]
    company: Option<String>,

    /// Footer text.
    #[arg(long)]
    copyright: Option<String>,

    /// Caption language (`en` or `ja`).
    #[arg(long)]
    locale: Option<String>,
}

impl Cli {
    fn option_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("file", &self.file),
            ("font1", &self.font1),
            ("font2", &self.font2),
            ("title", &self.title),
            ("subtitle", &self.subtitle),
            ("version", &self.version_label),
            ("company", &self.company),
            ("copyright", &self.copyright),
            ("locale", &self.locale),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|value| (name, value)))
        .collect()
    }
}

fn run(cli: &Cli) -> apidoc_pdf::Result<()> {
    let tree = DocTree::from_path(&cli.tree)?;
    let options = Options::from_pairs(tree.options.iter().map(|(k, v)| (k, v.clone())))?
        .with_pairs(cli.option_pairs())?;
    info!(
        "Generating {} from {}",
        options.file.display(),
        cli.tree.display()
    );
    apidoc_pdf::generate(&tree, &options)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        print_error_sources(&err);
        std::process::exit(1);
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
