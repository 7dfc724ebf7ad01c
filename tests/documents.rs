use std::fs;

use lmath::evaluate_document;
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

/// Marks the expected rendering of the body on the line above.
const EXPECTATION: &str = "==>";

/// One body of a documented example and, optionally, what it must render.
struct Step {
    body:     String,
    expected: Option<String>,
}

#[test]
fn documented_examples_render_as_shown() {
    let mut count = 0;

    for entry in
        WalkDir::new("docs").into_iter()
                            .filter_map(Result::ok)
                            .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, steps) in extract_lmath_blocks(&content).into_iter().enumerate() {
            count += 1;
            let chain = evaluate_document(steps.iter().map(|step| step.body.as_str()));
            for (step, block) in steps.iter().zip(chain.blocks()) {
                if let Some(expected) = &step.expected {
                    assert_eq!(block.rendered(),
                               expected,
                               "example {} in {:?}: body {:?}",
                               i + 1,
                               path,
                               step.body);
                }
            }
        }
    }

    assert!(count > 0, "No lmath examples found in docs");
}

/// Collects the bodies of every ```` ```lmath ```` fence.
///
/// Each non-blank line is a body, except lines starting with `==>`, which
/// hold the expected rendering of the body before them.
fn extract_lmath_blocks(content: &str) -> Vec<Vec<Step>> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut steps: Vec<Step> = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```lmath") {
            inside = true;
            steps.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(std::mem::take(&mut steps));
            continue;
        }
        if !inside || trimmed.is_empty() {
            continue;
        }
        if let Some(expected) = trimmed.strip_prefix(EXPECTATION) {
            let step = steps.last_mut()
                            .unwrap_or_else(|| panic!("expectation {line:?} without a body"));
            step.expected = Some(expected.trim().to_string());
        } else {
            steps.push(Step { body:     line.to_string(),
                              expected: None, });
        }
    }

    blocks
}

#[test]
fn expectations_attach_to_the_previous_body() {
    let content = "text\n```lmath\n!x = 2\n= x\n==> 2\n```\n";
    let blocks = extract_lmath_blocks(content);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].len(), 2);
    assert_eq!(blocks[0][0].expected, None);
    assert_eq!(blocks[0][1].body, "= x");
    assert_eq!(blocks[0][1].expected.as_deref(), Some("2"));
}
