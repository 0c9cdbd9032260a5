pub fn indent_lines(input: &str, indent_level: usize) -> String {
    indent_with(&format!("{:indent$}", "", indent = indent_level), input)
}

/// Prefix every line of `input` with `prefix`, keeping a trailing newline
pub fn indent_with(prefix: &str, input: &str) -> String {
    let mut output = String::new();

    if input.is_empty() {
        output.push_str(prefix);
        return output;
    }

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            output.push('\n')
        }

        output.push_str(prefix);
        output.push_str(line);
    }

    if input.ends_with('\n') {
        output.push('\n')
    }

    output
}

/// Cut `input` down to at most `limit` characters
///
/// Returns the input untouched when no limit is given or it already fits.
pub fn truncate_chars(input: &str, limit: Option<usize>) -> String {
    match limit {
        Some(limit) if input.chars().count() > limit => {
            let mut output: String = input.chars().take(limit).collect();
            output.push_str("\n[...]\n");
            output
        }
        _ => input.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_lines_keeps_trailing_newline() {
        assert_eq!(indent_lines("a\nb\n", 2), "  a\n  b\n");
    }

    #[test]
    fn test_indent_with_empty_input() {
        assert_eq!(indent_with("│ ", ""), "│ ");
    }

    #[test]
    fn test_indent_with_blank_line() {
        assert_eq!(indent_with("│ ", "a\n\nb"), "│ a\n│ \n│ b");
    }

    #[test]
    fn test_truncate_chars_without_limit() {
        assert_eq!(truncate_chars("abcdef", None), "abcdef");
    }

    #[test]
    fn test_truncate_chars_fits() {
        assert_eq!(truncate_chars("abc", Some(3)), "abc");
    }

    #[test]
    fn test_truncate_chars_cuts() {
        assert_eq!(truncate_chars("abcdef", Some(3)), "abc\n[...]\n");
    }
}
