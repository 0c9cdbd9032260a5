use crate::utils::string;

pub fn print_version() {
    println!("TAP version 14")
}

pub fn print_plan(start: usize, end: usize) {
    println!("{}..{}", start, end)
}

pub fn print_ok(test_number: usize, message: &str, indent_level: usize) {
    println!("{}", ok_line(test_number, message, indent_level))
}

pub fn print_not_ok(test_number: usize, message: &str, diagnostics: &str, indent_level: usize) {
    println!("{}", not_ok_line(test_number, message, indent_level));
    if !diagnostics.is_empty() {
        println!("{}", diagnostics_block(diagnostics));
    }
}

fn ok_line(test_number: usize, message: &str, indent_level: usize) -> String {
    format!(
        "ok     {:>indent$} - {}",
        test_number,
        message,
        indent = indent_level
    )
}

fn not_ok_line(test_number: usize, message: &str, indent_level: usize) -> String {
    format!(
        "not ok {:>indent$} - {}",
        test_number,
        message,
        indent = indent_level
    )
}

/// YAML-ish block attached to a failing test
fn diagnostics_block(diagnostics: &str) -> String {
    let code_block = format!("---\n{}...", diagnostics);
    string::indent_lines(&code_block, 2)
}
