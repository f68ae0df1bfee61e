//! Tree construction from normalized lines.
//!
//! The builder walks the lines once, front to back, and tracks where it is
//! with an explicit state instead of recursion, so nesting depth never grows
//! the call stack.

use crate::error::ParseError;
use crate::tree::{NodeId, Tree};

use super::line::{classify, Line};
use super::normalize::normalize_line;

/// Where the builder is between two lines.
///
/// `depth` is the signed brace depth: opening braces minus closing ones.
/// Closing more blocks than were opened drives it below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No block opened yet.
    Start { depth: isize },
    /// A root exists. `cursor` receives entries; closing the root leaves it
    /// on the root.
    Rooted { cursor: NodeId, depth: isize },
}

impl State {
    fn depth(self) -> isize {
        match self {
            State::Start { depth } | State::Rooted { depth, .. } => depth,
        }
    }
}

/// Single-use tree builder.
///
/// Each `Parser` owns the tree it builds, so separate parsers share nothing.
#[derive(Debug)]
pub struct Parser {
    tree: Tree,
    state: State,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            state: State::Start { depth: 0 },
        }
    }

    /// Build a tree from raw lines (without line terminators).
    ///
    /// Each line is normalized before it is classified. Any error aborts the
    /// whole parse and the partial tree is dropped.
    pub fn parse<S: AsRef<str>>(mut self, lines: &[S]) -> Result<Tree, ParseError> {
        let mut index = 0;

        while index < lines.len() {
            let line_no = index + 1;
            let text = normalize_line(lines[index].as_ref());
            index += 1;

            match classify(text) {
                Line::Blank => {}
                Line::Pair { key, value } => self.insert(key, value, line_no)?,
                Line::Tag(tag) => {
                    match lines.get(index).map(|next| normalize_line(next.as_ref())) {
                        Some("{") => {
                            index += 1;
                            self.open(tag, line_no)?;
                        }
                        found => {
                            return Err(ParseError::ExpectedBlockOpen {
                                line: line_no,
                                tag: tag.to_string(),
                                found: found.map(str::to_string),
                            });
                        }
                    }
                }
                Line::Close => self.close(),
                Line::Open | Line::Other => {
                    return Err(ParseError::MalformedLine {
                        line: line_no,
                        text: text.to_string(),
                    });
                }
            }
        }

        self.finish()
    }

    fn insert(&mut self, key: &str, value: &str, line: usize) -> Result<(), ParseError> {
        match self.state {
            State::Rooted { cursor, .. } => {
                self.tree.insert_attribute(cursor, key, value, line);
                Ok(())
            }
            State::Start { .. } => Err(ParseError::NoActiveBlock { line }),
        }
    }

    fn open(&mut self, tag: &str, line: usize) -> Result<(), ParseError> {
        self.state = match self.state {
            // A tag at depth zero always starts a new root, replacing any
            // root that was already closed.
            State::Start { depth: 0 } | State::Rooted { depth: 0, .. } => State::Rooted {
                cursor: self.tree.add_root(tag, line),
                depth: 1,
            },
            State::Rooted { cursor, depth } => State::Rooted {
                cursor: self.tree.add_child(cursor, tag, line),
                depth: depth + 1,
            },
            State::Start { .. } => return Err(ParseError::NoActiveBlock { line }),
        };
        Ok(())
    }

    fn close(&mut self) {
        self.state = match self.state {
            State::Start { depth } => State::Start { depth: depth - 1 },
            State::Rooted { cursor, depth } => State::Rooted {
                cursor: self.tree.parent_of(cursor).unwrap_or(cursor),
                depth: depth - 1,
            },
        };
    }

    fn finish(self) -> Result<Tree, ParseError> {
        match self.state.depth() {
            0 => Ok(self.tree),
            depth => Err(ParseError::UnmatchedBraces { depth }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use pretty_assertions::assert_eq;

    fn parse(lines: &[&str]) -> Result<Tree, ParseError> {
        Parser::new().parse(lines)
    }

    #[test]
    fn test_root_with_attribute() {
        let tree = parse(&[r#""Root""#, "{", r#""k" "v""#, "}"]).unwrap();
        let root = tree.root().unwrap();

        assert_eq!(root.name(), "Root");
        assert_eq!(root.attributes().len(), 1);
        assert_eq!(root.attribute("k"), Some("v"));
        assert_eq!(root.children().count(), 0);
    }

    #[test]
    fn test_nested_blocks() {
        let tree = parse(&[r#""A""#, "{", r#""B""#, "{", "}", "}"]).unwrap();
        let root = tree.root().unwrap();

        assert_eq!(root.name(), "A");
        assert!(root.attributes().is_empty());
        let children: Vec<_> = root.children().collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name(), "B");
        assert!(children[0].attributes().is_empty());
        assert_eq!(children[0].parent().unwrap().name(), "A");
    }

    #[test]
    fn test_stray_trailing_close() {
        let err = parse(&[r#""A""#, "{", "}", "}"]).unwrap_err();
        assert_eq!(err, ParseError::UnmatchedBraces { depth: -1 });
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse(&[r#""A""#, "{", r#""B""#, "{", "}"]).unwrap_err();
        assert_eq!(err, ParseError::UnmatchedBraces { depth: 1 });
    }

    #[test]
    fn test_lone_close() {
        let err = parse(&["}"]).unwrap_err();
        assert_eq!(err, ParseError::UnmatchedBraces { depth: -1 });
    }

    #[test]
    fn test_malformed_quoting() {
        let err = parse(&[r#""onlyonequote"#]).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::MalformedLine);
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_three_segments_is_malformed() {
        let err = parse(&[r#""A""#, "{", r#""a" "b" "c""#, "}"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedLine {
                line: 3,
                text: r#""a" "b" "c""#.to_string()
            }
        );
    }

    #[test]
    fn test_stray_open_brace_is_malformed() {
        let err = parse(&[r#""A""#, "{", "{", "}"]).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::MalformedLine);
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_tag_not_followed_by_open() {
        let err = parse(&[r#""Tag""#, r#""k" "v""#]).unwrap_err();
        assert_eq!(
            err,
            ParseError::ExpectedBlockOpen {
                line: 1,
                tag: "Tag".to_string(),
                found: Some(r#""k" "v""#.to_string()),
            }
        );
    }

    #[test]
    fn test_tag_at_end_of_input() {
        let err = parse(&[r#""Tag""#]).unwrap_err();
        assert_eq!(
            err,
            ParseError::ExpectedBlockOpen {
                line: 1,
                tag: "Tag".to_string(),
                found: None,
            }
        );
    }

    #[test]
    fn test_tag_followed_by_blank_line() {
        let err = parse(&[r#""Tag""#, "", "{", "}"]).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::ExpectedBlockOpen);
    }

    #[test]
    fn test_pair_before_any_block() {
        let err = parse(&[r#""k" "v""#]).unwrap_err();
        assert_eq!(err, ParseError::NoActiveBlock { line: 1 });
    }

    #[test]
    fn test_pair_after_root_closed_goes_to_root() {
        let tree = parse(&[r#""A""#, "{", "}", r#""k" "v""#]).unwrap();
        let root = tree.root().unwrap();

        assert_eq!(root.name(), "A");
        assert_eq!(root.attribute("k"), Some("v"));
    }

    #[test]
    fn test_second_top_level_block_replaces_root() {
        let tree = parse(&[
            r#""A""#,
            "{",
            r#""a" "1""#,
            r#""A1""#,
            "{",
            "}",
            "}",
            r#""B""#,
            "{",
            r#""b" "2""#,
            "}",
        ])
        .unwrap();
        let root = tree.root().unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(root.name(), "B");
        assert_eq!(root.line(), 8);
        assert_eq!(root.attribute("b"), Some("2"));
        assert_eq!(root.attribute("a"), None);
        assert_eq!(tree.replaced_roots().len(), 1);
        assert_eq!(tree.replaced_roots()[0].name, "A");
        assert_eq!(tree.replaced_roots()[0].replaced_at, 8);
    }

    #[test]
    fn test_block_after_overclosed_root_is_child() {
        let tree = parse(&[r#""A""#, "{", "}", "}", r#""B""#, "{"]).unwrap();
        let root = tree.root().unwrap();

        assert_eq!(root.name(), "A");
        assert_eq!(root.child("B").unwrap().parent().unwrap().name(), "A");
        assert!(tree.replaced_roots().is_empty());
    }

    #[test]
    fn test_block_after_lone_close() {
        let err = parse(&["}", r#""A""#, "{", "}"]).unwrap_err();
        assert_eq!(err, ParseError::NoActiveBlock { line: 2 });
    }

    #[test]
    fn test_empty_input() {
        let tree = parse(&[]).unwrap();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());

        let tree = parse(&["", "   ", r"\t"]).unwrap();
        assert!(tree.root().is_none());
    }

    #[test]
    fn test_lines_are_normalized() {
        let tree = parse(&[
            r#"  \t"Root"\t"#,
            "\t{",
            r#"    "key"		"value"  "#,
            r"\t}",
        ])
        .unwrap();
        assert_eq!(tree.root().unwrap().attribute("key"), Some("value"));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let tree = parse(&[r#""A""#, "{", r#""k" "1""#, r#""k" "2""#, "}"]).unwrap();

        assert_eq!(tree.root().unwrap().attribute("k"), Some("2"));
        assert_eq!(tree.overwrites().len(), 1);
        assert_eq!(tree.overwrites()[0].line, 4);
    }

    #[test]
    fn test_attributes_after_nested_block_go_to_parent() {
        let tree = parse(&[
            r#""A""#,
            "{",
            r#""a1" "x""#,
            r#""B""#,
            "{",
            r#""b1" "y""#,
            "}",
            r#""a2" "z""#,
            "}",
        ])
        .unwrap();

        let root = tree.root().unwrap();
        assert_eq!(root.attributes().len(), 2);
        assert_eq!(root.attribute("a2"), Some("z"));
        assert_eq!(root.child("B").unwrap().attributes().len(), 1);
    }

    #[test]
    fn test_line_numbers_recorded() {
        let tree = parse(&["", r#""A""#, "{", r#""B""#, "{", "}", "}"]).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(root.line(), 2);
        assert_eq!(root.child("B").unwrap().line(), 4);
    }

    #[test]
    fn test_deep_nesting_is_iterative() {
        let depth = 50_000;
        let mut lines = Vec::with_capacity(depth * 3);
        for i in 0..depth {
            lines.push(format!("\"n{}\"", i));
            lines.push("{".to_string());
        }
        for _ in 0..depth {
            lines.push("}".to_string());
        }

        let tree = Parser::new().parse(lines.as_slice()).unwrap();
        assert_eq!(tree.len(), depth);
        assert_eq!(tree.walk().last().map(|(level, _)| level), Some(depth - 1));
    }
}
