//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries hold:
//! domain is pure, application depends only on domain and ports, infra never
//! reaches into presentation.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    fn process_line(&mut self, line: &str) -> bool {
        if line.trim().contains("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Non-test, non-comment lines of every file under `src/<layer>`, with
/// their file and line number.
fn production_lines(layer: &str) -> Vec<(String, usize, String)> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut out = Vec::new();
    for file in collect_rs_files(&root.join("src").join(layer)) {
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        let rel = file.strip_prefix(root).unwrap_or(&file).display().to_string();
        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            if in_test || trimmed.starts_with("//") {
                continue;
            }
            out.push((rel.clone(), i + 1, line.to_string()));
        }
    }
    out
}

fn assert_no_matches(layer: &str, forbidden: &[&str], hint: &str) {
    let violations: Vec<String> = production_lines(layer)
        .into_iter()
        .filter(|(_, _, line)| forbidden.iter().any(|f| line.contains(f)))
        .map(|(rel, n, line)| format!("{rel}:{n}: {line}"))
        .collect();
    assert!(
        violations.is_empty(),
        "{hint}:\n{}",
        violations.join("\n")
    );
}

#[test]
fn domain_is_pure() {
    assert_no_matches(
        "domain",
        &[
            "crate::infra",
            "crate::commands",
            "crate::application",
            "crate::output",
            "tokio::",
            "std::fs",
            "std::net",
            "std::process",
        ],
        "domain/ must stay free of I/O and outer layers",
    );
}

#[test]
fn application_does_not_depend_on_outer_layers() {
    assert_no_matches(
        "application",
        &["crate::infra", "crate::commands", "crate::output", "println!"],
        "application/ may only depend on domain/ and its own ports",
    );
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    assert_no_matches(
        "infra",
        &["crate::commands", "crate::output"],
        "infra/ must not import from commands/ or output/",
    );
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    assert_no_matches(
        "infra",
        &["println!", "eprintln!"],
        "infra/ must not use println!/eprintln! outside #[cfg(test)]",
    );
}

#[test]
fn no_inline_json_branching_in_commands() {
    assert_no_matches(
        "commands",
        &["json: bool", "if json", "if !json", "serde_json::"],
        "commands/ must render through app.renderer()",
    );
}
