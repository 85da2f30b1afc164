//! Tests for the wordlink and eqgroup command line tools:
//! - Corpus runs writing JSON lines (-o)
//! - Fatal document errors exit non-zero
//! - Argument validation

use std::path::{Path, PathBuf};
use std::process::Command;

// ============================================================================
// Helper functions
// ============================================================================

fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "{}_{}_{}",
        prefix,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    for sub in ["sentences", "words", "equations"] {
        std::fs::create_dir_all(dir.join(sub)).unwrap();
    }
    dir
}

/// Writes document `paper` (id 1): "Let x hold." with an equation line.
fn write_paper(root: &Path, regions: &str) {
    std::fs::write(
        root.join("sentences/paper.json"),
        r#"{"id": 1, "name": "paper", "sentences": [
            {"id": 1, "document_id": 1, "section_id": 1, "paragraph_id": 1, "name": "Body Text", "text": "Let"},
            {"id": 2, "document_id": 1, "section_id": 1, "paragraph_id": 2, "name": "Equation", "text": "x_i"},
            {"id": 3, "document_id": 1, "section_id": 1, "paragraph_id": 3, "name": "Body Text", "text": "hold."}
        ]}"#,
    )
    .unwrap();
    std::fs::write(
        root.join("words/paper.html.json"),
        r#"[
            {"text": "Let", "word_bbox": {"xmin": 0, "xmax": 20, "ymin": 0, "ymax": 10, "page_num": 1},
             "line_bbox": {"ymin": 0, "ymax": 12}, "type": "Body Text", "latex": "Let"},
            {"text": "x", "word_bbox": {"xmin": 30, "xmax": 40, "ymin": 0, "ymax": 10, "page_num": 1},
             "line_bbox": {"ymin": 0, "ymax": 12}, "type": "Equation", "latex": "x_i"},
            {"text": "hold.", "word_bbox": {"xmin": 50, "xmax": 80, "ymin": 0, "ymax": 10, "page_num": 1},
             "line_bbox": {"ymin": 0, "ymax": 12}, "type": "Body Text", "latex": "hold."}
        ]"#,
    )
    .unwrap();
    std::fs::write(root.join("equations/paper.html.json"), regions).unwrap();
}

/// Run a binary with given arguments and return (exit_code, stdout, stderr).
fn run(binary: &str, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(binary)
        .args(args)
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn read_lines(path: &Path) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

const ONE_REGION: &str = r#"[{"xmin": 25, "ymin": 0, "xmax": 45, "ymax": 12, "page_num": 1}]"#;

// ============================================================================
// wordlink
// ============================================================================

#[test]
fn test_wordlink_writes_geometry() {
    let root = make_temp_dir("wordlink_cli");
    write_paper(&root, ONE_REGION);
    let out = root.join("out");

    let (code, _, stderr) = run(
        env!("CARGO_BIN_EXE_wordlink"),
        &[
            "--words-dir",
            root.join("words").to_str().unwrap(),
            "--sentences-dir",
            root.join("sentences").to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-t",
            "1",
        ],
    );
    assert_eq!(code, 0, "stderr: {stderr}");

    let sentences = read_lines(&out.join("sentences.jsonl"));
    assert_eq!(sentences.len(), 3);
    assert_eq!(sentences[0]["token_geometry"]["left"][0], 0.0);
    assert_eq!(sentences[2]["token_geometry"]["right"][0], 80.0);

    let tokens = read_lines(&out.join("tokens.jsonl"));
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1]["tokens"][0], "hold.");

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn test_wordlink_ignored_files() {
    let root = make_temp_dir("wordlink_ignored");
    write_paper(&root, ONE_REGION);
    let out = root.join("out");

    let (code, _, stderr) = run(
        env!("CARGO_BIN_EXE_wordlink"),
        &[
            "--words-dir",
            root.join("words").to_str().unwrap(),
            "--sentences-dir",
            root.join("sentences").to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--ignored-files",
            "paper.html",
        ],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(read_lines(&out.join("sentences.jsonl")).is_empty());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn test_wordlink_missing_words_fails() {
    let root = make_temp_dir("wordlink_missing");
    write_paper(&root, ONE_REGION);
    std::fs::remove_file(root.join("words/paper.html.json")).unwrap();

    let (code, _, stderr) = run(
        env!("CARGO_BIN_EXE_wordlink"),
        &[
            "--words-dir",
            root.join("words").to_str().unwrap(),
            "--sentences-dir",
            root.join("sentences").to_str().unwrap(),
            "-o",
            root.join("out").to_str().unwrap(),
        ],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("paper.html.json"), "stderr: {stderr}");

    let _ = std::fs::remove_dir_all(&root);
}

// ============================================================================
// eqgroup
// ============================================================================

#[test]
fn test_eqgroup_writes_regions() {
    let root = make_temp_dir("eqgroup_cli");
    write_paper(&root, ONE_REGION);
    let out = root.join("out");

    let (code, _, stderr) = run(
        env!("CARGO_BIN_EXE_eqgroup"),
        &[
            "--regions-dir",
            root.join("equations").to_str().unwrap(),
            "--sentences-dir",
            root.join("sentences").to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ],
    );
    assert_eq!(code, 0, "stderr: {stderr}");

    let regions = read_lines(&out.join("regions.jsonl"));
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0]["concatenated_text"], "x_i");
    assert_eq!(regions[0]["symbols"][0], "x_i");
    assert_eq!(regions[0]["box"]["xmin"], 25.0);
    // Only the region pass ran.
    assert!(read_lines(&out.join("sentences.jsonl")).is_empty());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn test_eqgroup_count_mismatch_fails() {
    let root = make_temp_dir("eqgroup_mismatch");
    write_paper(
        &root,
        r#"[{"xmin": 0, "ymin": 0, "xmax": 1, "ymax": 1, "page_num": 1},
            {"xmin": 0, "ymin": 5, "xmax": 1, "ymax": 6, "page_num": 1}]"#,
    );

    let (code, _, stderr) = run(
        env!("CARGO_BIN_EXE_eqgroup"),
        &[
            "--regions-dir",
            root.join("equations").to_str().unwrap(),
            "--sentences-dir",
            root.join("sentences").to_str().unwrap(),
            "-o",
            root.join("out").to_str().unwrap(),
        ],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("1 region groups but 2 detection regions"), "stderr: {stderr}");

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn test_eqgroup_page_ordering_accepts_sorted_regions() {
    let root = make_temp_dir("eqgroup_ordering");
    write_paper(&root, ONE_REGION);
    let out = root.join("out");

    let (code, _, stderr) = run(
        env!("CARGO_BIN_EXE_eqgroup"),
        &[
            "--regions-dir",
            root.join("equations").to_str().unwrap(),
            "--sentences-dir",
            root.join("sentences").to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--region-ordering",
            "page-then-top",
        ],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(read_lines(&out.join("regions.jsonl")).len(), 1);

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn test_eqgroup_rejects_unknown_ordering() {
    let (code, _, stderr) = run(
        env!("CARGO_BIN_EXE_eqgroup"),
        &["--region-ordering", "sideways"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("sideways"), "stderr: {stderr}");
}
