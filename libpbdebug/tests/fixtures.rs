//! Test harness for the parser against fixture files.
//!
//! Every `test/txtpb/*.txtpb` file is parsed and its JSON rendering compared
//! with `test/json/<name>.json`. Every `test/bad/*.txtpb` file must fail
//! with the message in the `.error` file beside it.

use std::fs;
use std::path::{Path, PathBuf};

use libpbdebug::{encode, parse_with_options, Format, ParseOptions};

/// Root test directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("test")
}

/// All files matching `pattern` under the test root, sorted.
fn fixture_files(pattern: &str) -> Vec<PathBuf> {
    let pattern = test_root().join(pattern);
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .expect("valid glob pattern")
        .flatten()
        .collect();
    files.sort();
    files
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

fn sibling(path: &Path, dir: &str, ext: &str) -> PathBuf {
    let stem = path.file_stem().unwrap().to_string_lossy();
    test_root().join(dir).join(format!("{}.{}", stem, ext))
}

/// Parse one good fixture and compare against its expected JSON.
fn run_good_fixture(path: &Path) -> Result<(), String> {
    let filename = file_name(path);
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", filename, e))?;
    let expected_path = sibling(path, "json", "json");
    let expected = fs::read_to_string(&expected_path)
        .map_err(|e| format!("{}: no expected output ({})", filename, e))?;

    let options = ParseOptions::new().filename(filename.clone());
    let parsed = parse_with_options(&content, &options)
        .map_err(|e| format!("{}: Unexpected parse error: {}", filename, e))?;

    let actual = encode(&parsed.document, Format::Json);
    if actual.trim_end() != expected.trim_end() {
        return Err(format!(
            "{}: Output mismatch\n    expected: {}\n    actual:   {}",
            filename,
            expected.trim_end(),
            actual
        ));
    }
    println!("  {} => ok ({} recoveries)", filename, parsed.recoveries.len());
    Ok(())
}

/// Parse one bad fixture and compare the error message.
fn run_bad_fixture(path: &Path) -> Result<(), String> {
    let filename = file_name(path);
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", filename, e))?;
    let expected = fs::read_to_string(path.with_extension("error"))
        .map_err(|e| format!("{}: no .error file ({})", filename, e))?;

    let options = ParseOptions::new().filename(filename.clone());
    match parse_with_options(&content, &options) {
        Ok(parsed) => Err(format!(
            "{}: Expected parse error, but got success: {:?}",
            filename, parsed.document
        )),
        Err(e) if e.to_string() == expected.trim() => {
            println!("  {} => error (as expected)", filename);
            Ok(())
        }
        Err(e) => Err(format!(
            "{}: Error mismatch\n    expected: {}\n    actual:   {}",
            filename,
            expected.trim(),
            e
        )),
    }
}

/// Text renderings of a fixture must read back to the same JSON.
fn run_text_roundtrip(path: &Path) -> Result<(), String> {
    let filename = file_name(path);
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", filename, e))?;
    let tree = libpbdebug::parse_to_tree(&content)
        .map_err(|e| format!("{}: Unexpected parse error: {}", filename, e))?;
    let expected = encode(&tree, Format::Json);

    for format in [Format::Text, Format::ShortText] {
        let text = encode(&tree, format);
        let reparsed = libpbdebug::parse(&text)
            .map_err(|e| format!("{}: {:?} output failed to parse: {}", filename, format, e))?;
        if !reparsed.is_complete() {
            return Err(format!(
                "{}: {:?} output needed recovery: {:?}",
                filename, format, reparsed.recoveries
            ));
        }
        let actual = encode(&reparsed.document, Format::Json);
        if actual != expected {
            return Err(format!(
                "{}: {:?} round trip changed the tree\n    expected: {}\n    actual:   {}",
                filename, format, expected, actual
            ));
        }
    }
    Ok(())
}

fn run_all(label: &str, files: &[PathBuf], run: fn(&Path) -> Result<(), String>) {
    assert!(!files.is_empty(), "no {} fixtures found", label);
    println!("\nRunning {} {} fixtures:", files.len(), label);

    let errors: Vec<String> = files.iter().filter_map(|f| run(f).err()).collect();

    println!(
        "\nResults: {} passed, {} failed",
        files.len() - errors.len(),
        errors.len()
    );
    if !errors.is_empty() {
        println!("\nErrors:");
        for error in &errors {
            println!("  - {}", error);
        }
    }
    assert!(errors.is_empty(), "{} {} fixtures failed", errors.len(), label);
}

#[test]
fn test_all_good_fixtures() {
    run_all("txtpb", &fixture_files("txtpb/*.txtpb"), run_good_fixture);
}

#[test]
fn test_all_bad_fixtures() {
    run_all("bad", &fixture_files("bad/*.txtpb"), run_bad_fixture);
}

#[test]
fn test_text_roundtrip_all_fixtures() {
    run_all("round-trip", &fixture_files("txtpb/*.txtpb"), run_text_roundtrip);
}
