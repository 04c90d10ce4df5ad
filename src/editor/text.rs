use std::sync::LazyLock;

use regex::Regex;

const MAILTO: &str = "mailto:";

/// A blank line: a newline, any whitespace (including further newlines),
/// then another newline.
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph break pattern is valid"));

pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

pub fn join_paragraphs(paragraphs: &[String]) -> String {
    paragraphs.join("\n\n")
}

pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn split_paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip one leading `mailto:` scheme.
pub fn strip_mailto(href: &str) -> &str {
    href.strip_prefix(MAILTO).unwrap_or(href)
}

pub fn mailto(address: &str) -> String {
    format!("{MAILTO}{address}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn split_paragraphs_treats_runs_of_blank_lines_as_one_break() {
        assert_eq!(split_paragraphs("A\n\nB\n\n\nC"), strings(&["A", "B", "C"]));
        assert_eq!(split_paragraphs("A\n  \t\nB"), strings(&["A", "B"]));
        assert_eq!(split_paragraphs("A\r\n\r\nB"), strings(&["A", "B"]));
    }

    #[test]
    fn split_paragraphs_keeps_single_newlines_inside_a_paragraph() {
        assert_eq!(
            split_paragraphs("  first line\nsecond line  \n\nnext"),
            strings(&["first line\nsecond line", "next"])
        );
    }

    #[test]
    fn split_lines_trims_and_drops_blank_lines() {
        assert_eq!(split_lines("x\n \ny\n"), strings(&["x", "y"]));
        assert_eq!(split_lines("  padded  \r\n"), strings(&["padded"]));
    }

    #[test]
    fn whitespace_only_text_splits_to_nothing() {
        assert!(split_lines(" \n\n\t").is_empty());
        assert!(split_paragraphs("\n\n   \n").is_empty());
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn joins_are_inverted_by_splits() {
        let lines = strings(&["Staff Engineer", "Open source maintainer"]);
        assert_eq!(split_lines(&join_lines(&lines)), lines);

        let paragraphs = strings(&["First paragraph.", "Second\nwith a wrapped line."]);
        assert_eq!(split_paragraphs(&join_paragraphs(&paragraphs)), paragraphs);

        assert_eq!(join_lines(&[]), "");
    }

    #[test]
    fn mailto_prefix_is_stripped_once() {
        assert_eq!(strip_mailto("mailto:a@b.com"), "a@b.com");
        assert_eq!(strip_mailto("a@b.com"), "a@b.com");
        assert_eq!(strip_mailto("mailto:mailto:x"), "mailto:x");
        assert_eq!(mailto("a@b.com"), "mailto:a@b.com");
    }
}
