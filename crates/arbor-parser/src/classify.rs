//! Line classifier for markdown-like outlines.
//!
//! [`classify`] looks at a single non-blank line and decides what it is.
//! Nothing here can fail: a line that is neither a heading nor a list item
//! is free text, and a free-text line reading `---` ends the outline.
//!
//! Classification is context free. Turning a list item's indentation into a
//! tree level needs the builder's ancestor stack, so that part lives in
//! [`OutlineBuilder`](crate::OutlineBuilder).

use winnow::{
    Parser as _,
    combinator::alt,
    error::ModalResult,
    token::{one_of, take_while},
};

/// Content that stops the outline when it appears on a free-text line.
pub const TERMINATOR: &str = "---";

/// A classified outline line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `#`-prefixed line; `depth` is the number of leading `#`.
    Heading { depth: usize, content: String },
    /// Bullet (`-`, `*`) or numbered (`1.`) line.
    ///
    /// `indent` counts the leading whitespace characters. A `key: value`
    /// item carries the key in `content` and the value in `value`; the
    /// value may be empty after cleaning.
    ListItem {
        indent: usize,
        content: String,
        value: Option<String>,
    },
    /// Anything else.
    FreeText { content: String },
    /// A free-text line whose cleaned content is `---`.
    Terminator,
}

/// Run of leading `#` characters.
fn heading_marker(input: &mut &str) -> ModalResult<usize> {
    take_while(1.., '#').map(str::len).parse_next(input)
}

/// `- `, `* ` or a single digit followed by `.`.
fn list_marker(input: &mut &str) -> ModalResult<()> {
    alt((
        (one_of(['-', '*']), ' ').void(),
        (one_of(|c: char| c.is_ascii_digit()), '.').void(),
    ))
    .parse_next(input)
}

/// Classifies one raw line.
///
/// Blank lines are expected to be skipped by the caller; given one, this
/// returns empty free text.
///
/// # Examples
///
/// ```
/// use arbor_parser::{Line, classify};
///
/// assert_eq!(
///     classify("## Methods"),
///     Line::Heading { depth: 2, content: "Methods".to_string() }
/// );
/// assert_eq!(
///     classify("  - **Dataset**: ImageNet"),
///     Line::ListItem {
///         indent: 2,
///         content: "Dataset".to_string(),
///         value: Some("ImageNet".to_string()),
///     }
/// );
/// assert_eq!(classify("---"), Line::Terminator);
/// ```
pub fn classify(line: &str) -> Line {
    let mut input = line;
    if let Ok(depth) = heading_marker(&mut input) {
        return Line::Heading {
            depth,
            content: clean_content(input),
        };
    }

    let trimmed = line.trim_start();
    let mut input = trimmed;
    if list_marker(&mut input).is_ok() {
        let indent = line.chars().count() - trimmed.chars().count();
        let content = clean_content(input);
        return match content.split_once(':') {
            Some((key, value)) => Line::ListItem {
                indent,
                content: clean_content(key),
                value: Some(clean_content(value)),
            },
            None => Line::ListItem {
                indent,
                content,
                value: None,
            },
        };
    }

    let content = clean_content(trimmed);
    if content == TERMINATOR {
        Line::Terminator
    } else {
        Line::FreeText { content }
    }
}

/// Strips emphasis markers and trailing punctuation.
///
/// Every `**` is removed, then trailing full-width colons, ASCII colons and
/// ideographic full stops are trimmed in that order, re-trimming
/// whitespace after each step.
///
/// # Examples
///
/// ```
/// use arbor_parser::clean_content;
///
/// assert_eq!(clean_content("  **Results**： "), "Results");
/// assert_eq!(clean_content("Done。"), "Done");
/// ```
pub fn clean_content(raw: &str) -> String {
    raw.trim()
        .replace("**", "")
        .trim()
        .trim_end_matches('：')
        .trim()
        .trim_end_matches(':')
        .trim()
        .trim_end_matches('。')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_item(indent: usize, content: &str, value: Option<&str>) -> Line {
        Line::ListItem {
            indent,
            content: content.to_string(),
            value: value.map(str::to_string),
        }
    }

    fn free_text(content: &str) -> Line {
        Line::FreeText {
            content: content.to_string(),
        }
    }

    #[test]
    fn test_heading_depth_counts_hashes() {
        assert_eq!(
            classify("# Title"),
            Line::Heading {
                depth: 1,
                content: "Title".to_string()
            }
        );
        assert_eq!(
            classify("#### Deep   "),
            Line::Heading {
                depth: 4,
                content: "Deep".to_string()
            }
        );
    }

    #[test]
    fn test_heading_requires_hash_in_first_column() {
        assert_eq!(classify("  # not a heading"), free_text("# not a heading"));
    }

    #[test]
    fn test_bullet_markers() {
        assert_eq!(classify("- item"), list_item(0, "item", None));
        assert_eq!(classify("* item"), list_item(0, "item", None));
        assert_eq!(classify("    - nested"), list_item(4, "nested", None));
        assert_eq!(classify("\t- tabbed"), list_item(1, "tabbed", None));
    }

    #[test]
    fn test_numbered_marker() {
        assert_eq!(classify("1. First"), list_item(0, "First", None));
        assert_eq!(classify("  3.Third"), list_item(2, "Third", None));
    }

    #[test]
    fn test_marker_needs_separator() {
        assert_eq!(classify("-dash"), free_text("-dash"));
        assert_eq!(classify("*emph*"), free_text("*emph*"));
        assert_eq!(classify("2024 was a year"), free_text("2024 was a year"));
        assert_eq!(classify("12. twelve"), free_text("12. twelve"));
    }

    #[test]
    fn test_key_value_split() {
        assert_eq!(
            classify("- Model: Transformer"),
            list_item(0, "Model", Some("Transformer"))
        );
        assert_eq!(
            classify("- **Loss**: cross-entropy。"),
            list_item(0, "Loss", Some("cross-entropy"))
        );
    }

    #[test]
    fn test_key_value_splits_at_first_colon() {
        assert_eq!(
            classify("- Time: 10:30"),
            list_item(0, "Time", Some("10:30"))
        );
    }

    #[test]
    fn test_trailing_colon_is_not_a_separator() {
        assert_eq!(classify("- Findings:"), list_item(0, "Findings", None));
        assert_eq!(classify("- Findings:："), list_item(0, "Findings", None));
    }

    #[test]
    fn test_empty_value_is_kept() {
        assert_eq!(classify("- Key: 。"), list_item(0, "Key", Some("")));
    }

    #[test]
    fn test_full_width_colon_does_not_split() {
        assert_eq!(classify("- 方法：对比学习"), list_item(0, "方法：对比学习", None));
    }

    #[test]
    fn test_terminator() {
        assert_eq!(classify("---"), Line::Terminator);
        assert_eq!(classify("   ---  "), Line::Terminator);
        assert_eq!(classify("**---**"), Line::Terminator);
        assert_eq!(classify("----"), free_text("----"));
    }

    #[test]
    fn test_free_text_is_cleaned() {
        assert_eq!(
            classify("  Some **bold** remark:"),
            free_text("Some bold remark")
        );
    }

    #[test]
    fn test_clean_content_cascade() {
        assert_eq!(clean_content("Summary：:。"), "Summary：:");
        assert_eq!(clean_content("Summary 。"), "Summary");
        assert_eq!(clean_content("Summary : "), "Summary");
        assert_eq!(clean_content("Summary ：: 。"), "Summary ：:");
        assert_eq!(clean_content("Summary：: "), "Summary：");
    }
}
