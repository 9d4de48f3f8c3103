//! Stack machine that turns outline lines into a tree.
//!
//! The builder keeps the chain of open ancestors on an explicit stack whose
//! bottom is the synthetic root. Each new node pops every ancestor whose
//! level is not strictly smaller than its own, becomes the last child of
//! the remaining top, and is pushed in turn.
//!
//! ```text
//!            push_line
//! Scanning ──────────────▶ Scanning
//!    │
//!    │ `---` free-text line
//!    ▼
//! Terminated  (absorbing: later lines are ignored)
//! ```

use log::{debug, trace};

use arbor_core::tree::{NodeIndex, NodeKind, Tree};

use crate::{
    ParseConfig,
    classify::{Line, classify},
};

/// Scanner state of an [`OutlineBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Lines are classified and attached.
    Scanning,
    /// The terminator was seen; every further line is ignored.
    Terminated,
}

/// Incremental outline-to-tree builder.
///
/// # Examples
///
/// ```
/// use arbor_parser::{OutlineBuilder, ParseConfig, ScanState};
///
/// let mut builder = OutlineBuilder::new(&ParseConfig::default());
/// assert_eq!(builder.push_line("# Paper"), ScanState::Scanning);
/// assert_eq!(builder.push_line("- Idea"), ScanState::Scanning);
/// assert_eq!(builder.push_line("---"), ScanState::Terminated);
/// assert_eq!(builder.push_line("- ignored"), ScanState::Terminated);
///
/// let tree = builder.finish();
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Debug)]
pub struct OutlineBuilder {
    tree: Tree,
    stack: Vec<NodeIndex>,
    state: ScanState,
}

impl OutlineBuilder {
    /// Creates a builder whose synthetic root is labelled with the
    /// configured root label.
    pub fn new(config: &ParseConfig) -> Self {
        let tree = Tree::new(config.root_label(), NodeKind::Root);
        let stack = vec![tree.root()];
        Self {
            tree,
            stack,
            state: ScanState::Scanning,
        }
    }

    /// Current scanner state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Classifies one raw line and attaches the result.
    ///
    /// Blank lines are skipped. Returns the state after the line.
    pub fn push_line(&mut self, line: &str) -> ScanState {
        if self.state == ScanState::Terminated || line.trim().is_empty() {
            return self.state;
        }

        match classify(line) {
            Line::Terminator => {
                debug!(nodes_count = self.tree.len(); "Outline terminator reached");
                self.state = ScanState::Terminated;
            }
            Line::Heading { depth, content } => {
                trace!(level = depth, content = content.as_str(); "Heading");
                self.attach(content, depth, NodeKind::Heading);
            }
            Line::ListItem {
                indent,
                content,
                value,
            } => {
                let level = indent / 2 + 1 + self.heading_anchor();
                trace!(level, content = content.as_str(); "List item");
                let key = self.attach(content, level, NodeKind::ListItem);
                if let Some(value) = value {
                    self.tree.add_child(key, value, level + 1, NodeKind::ListItem);
                }
            }
            Line::FreeText { content } => {
                let level = self.tree.node(self.top()).level() + 1;
                trace!(level, content = content.as_str(); "Free text");
                self.attach(content, level, NodeKind::FreeText);
            }
        }

        self.state
    }

    /// Normalizes and returns the built tree.
    pub fn finish(self) -> Tree {
        self.tree.normalize()
    }

    fn top(&self) -> NodeIndex {
        self.stack.last().copied().unwrap_or_else(|| self.tree.root())
    }

    /// Offset that anchors list nesting below the closest open heading:
    /// that heading's level plus one, or zero without a heading.
    fn heading_anchor(&self) -> usize {
        self.stack
            .iter()
            .skip(1)
            .rev()
            .map(|&idx| self.tree.node(idx))
            .find(|node| node.kind() == NodeKind::Heading)
            .map_or(0, |heading| heading.level() + 1)
    }

    fn attach(&mut self, content: String, level: usize, kind: NodeKind) -> NodeIndex {
        while self.stack.len() > 1 && self.tree.node(self.top()).level() >= level {
            self.stack.pop();
        }

        let idx = self.tree.add_child(self.top(), content, level, kind);
        self.stack.push(idx);
        idx
    }
}

/// Parses a whole outline into a canonical tree.
///
/// Never fails: unrecognized lines become free text, and reading stops at
/// the first `---` terminator line.
///
/// # Examples
///
/// ```
/// use arbor_parser::{ParseConfig, parse_outline};
///
/// let tree = parse_outline("# A\n- B\n  - C: D\n", &ParseConfig::default());
/// let labels: Vec<_> = tree
///     .preorder()
///     .map(|idx| tree.node(idx).content().to_string())
///     .collect();
/// assert_eq!(labels, ["A", "B", "C", "D"]);
/// ```
pub fn parse_outline(source: &str, config: &ParseConfig) -> Tree {
    let mut builder = OutlineBuilder::new(config);
    for line in source.lines() {
        if builder.push_line(line) == ScanState::Terminated {
            break;
        }
    }

    let tree = builder.finish();
    debug!(nodes_count = tree.len(); "Outline parsed");
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `(content, level, parent content)` for every node in pre-order.
    fn shape(tree: &Tree) -> Vec<(String, usize, Option<String>)> {
        tree.preorder()
            .map(|idx| {
                let node = tree.node(idx);
                let parent = node
                    .parent()
                    .map(|parent| tree.node(parent).content().to_string());
                (node.content().to_string(), node.level(), parent)
            })
            .collect()
    }

    fn entry(content: &str, level: usize, parent: Option<&str>) -> (String, usize, Option<String>) {
        (content.to_string(), level, parent.map(str::to_string))
    }

    fn parse(source: &str) -> Tree {
        parse_outline(source, &ParseConfig::default())
    }

    #[test]
    fn test_heading_list_key_value_chain() {
        let tree = parse("# A\n- B\n  - C: D\n");

        assert_eq!(
            shape(&tree),
            vec![
                entry("A", 0, None),
                entry("B", 1, Some("A")),
                entry("C", 2, Some("B")),
                entry("D", 3, Some("C")),
            ]
        );
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.edge_count(), 3);
    }

    #[test]
    fn test_terminator_stops_reading() {
        let tree = parse("# A\n- B\n---\n- C\n");

        assert_eq!(
            shape(&tree),
            vec![entry("A", 0, None), entry("B", 1, Some("A"))]
        );
    }

    #[test]
    fn test_terminator_state_is_absorbing() {
        let mut builder = OutlineBuilder::new(&ParseConfig::default());
        builder.push_line("# A");
        assert_eq!(builder.push_line("---"), ScanState::Terminated);
        assert_eq!(builder.push_line("# B"), ScanState::Terminated);
        assert_eq!(builder.push_line("---"), ScanState::Terminated);
        assert_eq!(builder.state(), ScanState::Terminated);

        let tree = builder.finish();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).content(), "A");
    }

    #[test]
    fn test_sibling_headings_keep_synthetic_root() {
        let tree = parse("# A\n# B\n");

        assert_eq!(
            shape(&tree),
            vec![
                entry("Mindmap", 0, None),
                entry("A", 1, Some("Mindmap")),
                entry("B", 1, Some("Mindmap")),
            ]
        );
        assert_eq!(tree.node(tree.root()).kind(), NodeKind::Root);
    }

    #[test]
    fn test_custom_root_label() {
        let tree = parse_outline("- x\n- y\n", &ParseConfig::new("Paper"));
        assert_eq!(tree.node(tree.root()).content(), "Paper");
        assert_eq!(tree.children(tree.root()).len(), 2);
    }

    #[test]
    fn test_nested_headings() {
        let tree = parse("# Paper\n## Method\n### Details\n## Results\n");

        assert_eq!(
            shape(&tree),
            vec![
                entry("Paper", 0, None),
                entry("Method", 1, Some("Paper")),
                entry("Details", 2, Some("Method")),
                entry("Results", 1, Some("Paper")),
            ]
        );
    }

    #[test]
    fn test_list_anchored_to_nearest_heading() {
        // The bullets under `## Sub` must not climb back above it even
        // though they carry no indentation.
        let tree = parse("# Top\n## Sub\n- one\n- two\n## Next\n- three\n");

        assert_eq!(
            shape(&tree),
            vec![
                entry("Top", 0, None),
                entry("Sub", 1, Some("Top")),
                entry("one", 2, Some("Sub")),
                entry("two", 2, Some("Sub")),
                entry("Next", 1, Some("Top")),
                entry("three", 2, Some("Next")),
            ]
        );
    }

    #[test]
    fn test_inconsistent_indentation() {
        // Three spaces and one space both round down onto usable levels.
        let tree = parse("# T\n- a\n   - b\n - c\n     - d\n");

        assert_eq!(
            shape(&tree),
            vec![
                entry("T", 0, None),
                entry("a", 1, Some("T")),
                entry("b", 2, Some("a")),
                entry("c", 1, Some("T")),
                entry("d", 2, Some("c")),
            ]
        );
    }

    #[test]
    fn test_list_without_heading() {
        let tree = parse("- a\n  - b\n- c\n");

        assert_eq!(
            shape(&tree),
            vec![
                entry("Mindmap", 0, None),
                entry("a", 1, Some("Mindmap")),
                entry("b", 2, Some("a")),
                entry("c", 1, Some("Mindmap")),
            ]
        );
    }

    #[test]
    fn test_free_text_attaches_to_latest_node() {
        let tree = parse("# A\n- B\nsome remark\n- C\n");

        assert_eq!(
            shape(&tree),
            vec![
                entry("A", 0, None),
                entry("B", 1, Some("A")),
                entry("some remark", 2, Some("B")),
                entry("C", 1, Some("A")),
            ]
        );
        let remark = tree.children(tree.children(tree.root())[0])[0];
        assert_eq!(tree.node(remark).kind(), NodeKind::FreeText);
    }

    #[test]
    fn test_key_value_value_is_not_an_ancestor() {
        // `E` has the same indentation as `D`'s key and must land under `C`'s
        // parent chain, never under the value node `D`.
        let tree = parse("# A\n- C: D\n  - E\n");

        assert_eq!(
            shape(&tree),
            vec![
                entry("A", 0, None),
                entry("C", 1, Some("A")),
                entry("D", 2, Some("C")),
                entry("E", 2, Some("C")),
            ]
        );
    }

    #[test]
    fn test_key_with_empty_value_keeps_value_node() {
        let tree = parse("# A\n- Key: 。\n- Next\n");

        assert_eq!(
            shape(&tree),
            vec![
                entry("A", 0, None),
                entry("Key", 1, Some("A")),
                entry("", 2, Some("Key")),
                entry("Next", 1, Some("A")),
            ]
        );
        assert_eq!(tree.edge_count(), tree.len() - 1);
    }

    #[test]
    fn test_trailing_colon_is_a_plain_item() {
        let tree = parse("# A\n- Findings:\n");
        assert_eq!(
            shape(&tree),
            vec![entry("A", 0, None), entry("Findings", 1, Some("A"))]
        );
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let tree = parse("# A\r\n\r\n   \r\n- B\r\n");
        assert_eq!(
            shape(&tree),
            vec![entry("A", 0, None), entry("B", 1, Some("A"))]
        );
    }

    #[test]
    fn test_empty_input_yields_root_only() {
        let tree = parse("");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).content(), "Mindmap");
        assert_eq!(tree.edge_count(), 0);
    }

    #[test]
    fn test_node_kinds() {
        let tree = parse("# A\n- B: C\nnote\n");
        let kinds: Vec<NodeKind> = tree.preorder().map(|idx| tree.node(idx).kind()).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Heading,
                NodeKind::ListItem,
                NodeKind::ListItem,
                NodeKind::FreeText,
            ]
        );
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn line_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "#{1,4} [a-z]{1,8}",
            " {0,7}[-*] [a-z]{1,6}(: [a-z]{0,6})?",
            " {0,4}[0-9]\\. [a-z]{1,6}",
            "[a-z :。*]{0,12}",
            Just("---".to_string()),
            Just(String::new()),
        ]
    }

    fn outline_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(line_strategy(), 0..40).prop_map(|lines| lines.join("\n"))
    }

    fn check_always_canonical(source: &str) -> Result<(), TestCaseError> {
        let tree = parse_outline(source, &ParseConfig::default());
        prop_assert!(tree.validate().is_ok());
        prop_assert_eq!(tree.edge_count(), tree.len() - 1);
        for idx in tree.preorder() {
            let node = tree.node(idx);
            match node.parent() {
                Some(parent) => prop_assert_eq!(node.level(), tree.node(parent).level() + 1),
                None => prop_assert_eq!(node.level(), 0),
            }
        }
        Ok(())
    }

    fn check_terminator_truncates(source: &str) -> Result<(), TestCaseError> {
        let config = ParseConfig::default();
        let full = parse_outline(&format!("{source}\n---\n# tail\n- more"), &config);
        let head = parse_outline(source, &config);
        prop_assert_eq!(full.len(), head.len());
        Ok(())
    }

    proptest! {
        #[test]
        fn always_canonical(source in outline_strategy()) {
            check_always_canonical(&source)?;
        }

        #[test]
        fn terminator_truncates(source in outline_strategy()) {
            check_terminator_truncates(&source)?;
        }
    }
}
