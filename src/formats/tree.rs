use crate::ascii_tree;
pub use crate::ascii_tree::Tree::{self, Leaf, Node};
use crate::test_result::FailureReason;
use crate::utils::string;
use std::fmt::Error;

pub fn draw_tree(tree: &Tree) -> Result<String, Error> {
    let mut output = String::new();
    ascii_tree::write_tree(&mut output, tree)?;
    Ok(output)
}

pub fn text_block(content: &str) -> String {
    let prefixed_content = string::indent_with("│ ", content);

    if content.ends_with('\n') {
        format!("╭\n{}╰", prefixed_content)
    } else {
        format!("╭\n{}\n╰ (No newline at end)", prefixed_content)
    }
}

// ERROR FORMATTING

pub fn tree_from_failure(reason: &FailureReason, char_limit: Option<usize>) -> Vec<Tree> {
    let mut categories = vec![Leaf(vec![reason.to_string()])];

    match reason {
        FailureReason::ErrorNotDetected => {}
        FailureReason::ErrorOutputMismatch { expected, got } => {
            categories.push(Node(
                String::from("Standard error"),
                show_string_diff(expected, got, char_limit),
            ));
        }
        FailureReason::ExecutionError { exit_code, stderr } => {
            categories.push(Node(
                String::from("Exit code"),
                vec![Leaf(vec![exit_code.to_string()])],
            ));
            if !stderr.is_empty() {
                categories.push(Node(
                    String::from("Standard error"),
                    vec![Leaf(string_to_lines(&text_block(&string::truncate_chars(
                        stderr, char_limit,
                    ))))],
                ));
            }
        }
        FailureReason::WrongOutput { expected, got, .. } => {
            categories.push(Node(
                String::from("Standard output"),
                vec![Leaf(show_line_diff(expected, got, char_limit))],
            ));
        }
    }

    categories
}

fn show_string_diff(expected: &str, got: &str, char_limit: Option<usize>) -> Vec<Tree> {
    let expected = string::truncate_chars(expected, char_limit);
    let got = string::truncate_chars(got, char_limit);

    let expected_lines = string_to_lines(&format!("Expected\n{}", text_block(&expected)));
    let got_lines = string_to_lines(&format!("Got\n{}", text_block(&got)));

    vec![Leaf(expected_lines), Leaf(got_lines)]
}

/// Line diff in the style of `diff -u`, without hunk headers
fn show_line_diff(expected: &[String], got: &[String], char_limit: Option<usize>) -> Vec<String> {
    let mut output = String::new();

    for line in diff::slice(expected, got) {
        let (marker, content) = match line {
            diff::Result::Left(l) => ('-', l),
            diff::Result::Right(r) => ('+', r),
            diff::Result::Both(l, _) => (' ', l),
        };
        output.push(marker);
        output.push(' ');
        output.push_str(content);
        output.push('\n');
    }

    string_to_lines(&string::truncate_chars(&output, char_limit))
}

fn string_to_lines(str: &str) -> Vec<String> {
    str.lines().map(|x| x.to_owned()).collect()
}

// TESTS
