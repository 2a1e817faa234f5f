use apidoc_pdf::config::{DEFAULT_BODY_FONT, DEFAULT_TAG_FONT};
use apidoc_pdf::fonts;
use apidoc_pdf::tree::{CallableUnit, ClassUnit, PackageUnit};
use apidoc_pdf::{DocTree, DocumentAssembler, DocumentWriter, Options, PdfWriter};
use chrono::NaiveDate;
use sha2::{Digest, Sha256};

const SKIP_HINT: &str =
    "default font families missing. Set APIDOC_PDF_FONTS_DIR or copy assets/fonts next to the binary.";

fn fonts_available() -> bool {
    fonts::font_family_available(DEFAULT_BODY_FONT) && fonts::font_family_available(DEFAULT_TAG_FONT)
}

fn sample_tree() -> DocTree {
    let method = CallableUnit::method("paint", "public", "void")
        .with_parameter("canvas", "com.example.Canvas")
        .with_param_comment("canvas", "the target, see {@code Canvas#flush}.")
        .with_comment("Paints the widget.<p>Runs on the UI thread &amp; never blocks.")
        .with_throws("java.lang.IllegalStateException", Some("if detached"));
    let class = ClassUnit::new("com.example", "Widget")
        .with_modifiers("public abstract class")
        .with_superclasses(["java.lang.Object"])
        .with_comment("Base type of all widgets. Subclasses override {@link #paint}.")
        .with_author("Example Corp")
        .with_method(method);
    DocTree::new()
        .with_package(PackageUnit::new("com.example").with_comment("Widget toolkit."))
        .with_class(class)
}

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

fn render_sample_pdf() -> Option<Vec<u8>> {
    if !fonts_available() {
        return None;
    }

    let options = options();
    let document = DocumentAssembler::new(&options)
        .with_date(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
        .assemble(&sample_tree())
        .expect("assemble sample document");
    let bytes = PdfWriter::new()
        .render(&document)
        .expect("render sample pdf");

    Some(bytes)
}

/// Dictionary entries holding timestamps or random identifiers, with their terminator.
const VOLATILE_ENTRIES: &[(&[u8], u8)] = &[
    (b"/CreationDate(", b')'),
    (b"/ModDate(", b')'),
    (b"/ID[", b']'),
    (b"/Producer(", b')'),
];

/// XMP metadata elements holding timestamps or random identifiers.
const VOLATILE_XMP: &[&str] = &[
    "xmp:CreateDate",
    "xmp:ModifyDate",
    "xmp:MetadataDate",
    "xmpMM:DocumentID",
    "xmpMM:InstanceID",
    "xmpMM:VersionID",
];

fn find(data: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    data.get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|position| from + position)
}

/// Zeroes the bytes between `start` and `end` markers, keeping structural characters.
fn blank_between(data: &mut [u8], start: &[u8], end: &[u8], keep: &[u8]) {
    let mut offset = 0;
    while let Some(found) = find(data, start, offset) {
        let begin = found + start.len();
        let Some(stop) = find(data, end, begin) else {
            break;
        };
        for byte in &mut data[begin..stop] {
            if !keep.contains(byte) {
                *byte = b'0';
            }
        }
        offset = stop + end.len();
    }
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    let mut normalized = bytes.to_vec();
    for (tag, terminator) in VOLATILE_ENTRIES {
        blank_between(&mut normalized, tag, &[*terminator], b"<> \n\r\t");
    }
    for element in VOLATILE_XMP {
        let start = format!("<{element}>");
        let end = format!("</{element}>");
        blank_between(
            &mut normalized,
            start.as_bytes(),
            end.as_bytes(),
            b"<>/ \n\r\t",
        );
    }
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    let digest = Sha256::digest(&normalized);
    digest.into()
}

#[test]
fn renders_non_empty_output() {
    let Some(bytes) = render_sample_pdf() else {
        eprintln!("Skipping renders_non_empty_output: {SKIP_HINT}");
        return;
    };
    assert!(bytes.starts_with(b"%PDF"), "output should be a PDF file");
}

#[test]
fn rendering_is_deterministic() {
    let Some(bytes_a) = render_sample_pdf() else {
        eprintln!("Skipping rendering_is_deterministic: {SKIP_HINT}");
        return;
    };
    let Some(bytes_b) = render_sample_pdf() else {
        eprintln!("Skipping rendering_is_deterministic: {SKIP_HINT}");
        return;
    };

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn writes_configured_output_file() {
    if !fonts_available() {
        eprintln!("Skipping writes_configured_output_file: {SKIP_HINT}");
        return;
    }

    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("reference.pdf");
    let options = options()
        .with_pairs([("file", path.to_string_lossy().into_owned())])
        .unwrap();
    apidoc_pdf::generate(&sample_tree(), &options).expect("generate reference");

    let written = std::fs::read(&path).expect("read generated file");
    assert!(written.starts_with(b"%PDF"));
}

#[test]
fn missing_font_leaves_no_file_behind() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("reference.pdf");
    let options = options()
        .with_pairs([
            ("file", path.to_string_lossy().into_owned()),
            ("font1", "NoSuchFamily-For-Tests".to_string()),
        ])
        .unwrap();
    let document = DocumentAssembler::new(&options)
        .assemble(&sample_tree())
        .unwrap();

    let err = PdfWriter::new().write(&document, &path).unwrap_err();
    assert!(matches!(err, apidoc_pdf::Error::Font { .. }));
    assert!(!path.exists());
}
