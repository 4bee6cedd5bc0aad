//! Splitting of raw input into trimmed fields.
//!
//! The same routine runs twice for every command: once with a separator marker to cut
//! a line into command units, and once with a single space to cut a command unit into
//! its argument vector.

/// Delimiter used to split a command unit into its argument vector.
pub const ARGUMENT_DELIMITER: &str = " ";

/// Splits `input` wherever any character of `delimiter` occurs.
///
/// Every field loses its leading whitespace and at most one trailing space, and fields
/// that end up empty are dropped. The delimiter is a set of cut characters rather than a
/// literal substring, so `"&&"` also cuts on a lone `&`. An empty delimiter yields the
/// whole input as a single field.
///
/// Fields are owned copies and stay valid after `input` is gone.
///
/// ```
/// use shell_modes::lexer::tokenize;
/// assert_eq!(tokenize("  ls   -la  ", " "), ["ls", "-la"]);
/// assert!(tokenize("", "##").is_empty());
/// ```
pub fn tokenize(input: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return trim_field(input).map(str::to_owned).into_iter().collect();
    }
    input
        .split(|c: char| delimiter.contains(c))
        .filter_map(trim_field)
        .map(str::to_owned)
        .collect()
}

/// Splits a command unit into its argument vector.
pub fn split_arguments(unit: &str) -> Vec<String> {
    tokenize(unit, ARGUMENT_DELIMITER)
}

fn trim_field(field: &str) -> Option<&str> {
    let field = field.trim_start();
    if field.is_empty() {
        return None;
    }
    Some(field.strip_suffix(' ').unwrap_or(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_padding_is_dropped() {
        assert_eq!(tokenize("  ls   -la  ", " "), vec!["ls", "-la"]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(tokenize("", " ").is_empty());
        assert!(tokenize("", "&&").is_empty());
        assert!(tokenize("", "").is_empty());
        assert!(tokenize("   ", "").is_empty());
    }

    #[test]
    fn test_final_token_without_trailing_delimiter_is_kept() {
        assert_eq!(
            tokenize("echo a ## echo b ## echo c", "##"),
            vec!["echo a", "echo b", "echo c"]
        );
    }

    #[test]
    fn test_delimiter_is_a_set_of_characters() {
        assert_eq!(tokenize("a&b&&c", "&&"), vec!["a", "b", "c"]);
        assert_eq!(tokenize("a#b", "##"), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_delimiter_keeps_whole_line() {
        assert_eq!(tokenize("  ls -la /tmp", ""), vec!["ls -la /tmp"]);
    }

    #[test]
    fn test_only_one_trailing_space_is_stripped() {
        assert_eq!(tokenize("pwd  ", ""), vec!["pwd "]);
        assert_eq!(tokenize("x > out.txt  ", ">"), vec!["x", "out.txt "]);
    }

    #[test]
    fn test_leading_tabs_are_trimmed_but_do_not_split() {
        assert_eq!(split_arguments("\tls\t-la"), vec!["ls\t-la"]);
    }

    #[test]
    fn test_tokens_outlive_their_source() {
        let tokens = {
            let line = String::from("cat notes.txt");
            split_arguments(&line)
        };
        assert_eq!(tokens, vec!["cat", "notes.txt"]);
    }
}
