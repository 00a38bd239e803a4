//! Tokenizer and block parser for stencil template markup.
//!
//! This crate splits template text into the three constructs the stencil
//! engine understands and leaves everything else alone:
//!
//! - `{{ user.name }}` - variable placeholders with dotted paths
//! - `{% for item in items %}...{% endfor %}` - single-level loop blocks
//! - `{% include "header.liquid" %}` - static partial inclusion
//!
//! Every [`Token`] keeps the exact slice of input it was cut from, so a
//! processing stage can re-emit the tokens it does not handle byte-for-byte.
//! Markup that looks like a directive but is not one of the three forms
//! (`{{ a | upper }}`, `{% if x %}`) comes out as [`TokenKind::Text`].
//!
//! # Example
//!
//! ```rust
//! use stencil_syntax::{parse, Node};
//!
//! let nodes = parse("Hi {{ name }}!{% for x in xs %}[{{ x }}]{% endfor %}").unwrap();
//! assert_eq!(nodes.len(), 4);
//! assert!(matches!(nodes[1], Node::Variable { path: "name", .. }));
//! assert!(matches!(&nodes[3], Node::Loop(block) if block.array == "xs"));
//! ```
//!
//! # Identifier Syntax
//!
//! Identifiers (path segments, loop variables, array names) are one or more
//! ASCII letters, digits, underscores, or hyphens. Digits are accepted in any
//! position so `items.0` can index into arrays.
//!
//! Pattern: `[A-Za-z0-9_-]+`
//!
//! # Loop Nesting
//!
//! Loop blocks do not nest. A `for` tag that appears inside another loop's
//! body is reported as [`SyntaxError::NestedLoop`] rather than guessed at.

use thiserror::Error;

/// Opening/closing delimiter pairs.
const VARIABLE_OPEN: &str = "{{";
const VARIABLE_CLOSE: &str = "}}";
const DIRECTIVE_CLOSE: &str = "%}";

/// A 1-based line/column location in template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Computes the position of a byte offset within `input`.
    ///
    /// Columns count characters, not bytes.
    pub fn of(input: &str, offset: usize) -> Self {
        let before = &input[..offset.min(input.len())];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors produced while grouping tokens into blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A `for` tag was found inside the body of another loop block.
    #[error("nested loop blocks are not supported ({position})")]
    NestedLoop { position: Position },
}

/// What a token represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Literal text, including any markup that is not a recognized directive.
    Text,
    /// `{{ path }}`
    Variable { path: &'a str },
    /// `{% for item in array %}`
    ForStart { item: &'a str, array: &'a str },
    /// `{% endfor %}`
    ForEnd,
    /// `{% include "name" %}`
    Include { name: &'a str },
}

/// A classified slice of template input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// The exact input this token was cut from.
    pub source: &'a str,
    /// Byte offset of `source` within the input.
    pub offset: usize,
}

/// Splits template text into [`Token`]s.
///
/// The tokenizer never fails: anything it cannot classify is text. A
/// directive ends at the first closer and never contains another `{{` or
/// `{%`, so an include name cannot either.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Finds the next `{{` or `{%` in `s`.
    fn find_opener(s: &str) -> Option<usize> {
        s.as_bytes()
            .windows(2)
            .position(|w| w[0] == b'{' && (w[1] == b'{' || w[1] == b'%'))
    }

    /// Consumes `len` bytes as a token of the given kind.
    fn take(&mut self, kind: TokenKind<'a>, len: usize) -> Token<'a> {
        let start = self.pos;
        self.pos += len;
        Token {
            kind,
            source: &self.input[start..self.pos],
            offset: start,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let remaining = &self.input[self.pos..];

        match Self::find_opener(remaining) {
            None => return Some(self.take(TokenKind::Text, remaining.len())),
            Some(0) => {}
            Some(n) => return Some(self.take(TokenKind::Text, n)),
        }

        // We're at `{{` or `{%`
        let is_variable = remaining.starts_with(VARIABLE_OPEN);
        let closer = if is_variable {
            VARIABLE_CLOSE
        } else {
            DIRECTIVE_CLOSE
        };

        // A directive never contains another opener, so the closer is only
        // looked for up to the next `{{` or `{%`. This keeps the scan linear
        // when openers are left unclosed.
        let body = &remaining[2..];
        let window = match Self::find_opener(body) {
            Some(next) => &body[..next],
            None => body,
        };

        let classified = window.find(closer).and_then(|end| {
            let inner = &window[..end];
            let kind = if is_variable {
                classify_variable(inner)
            } else {
                classify_directive(inner)
            };
            kind.map(|kind| (kind, end + 4))
        });

        match classified {
            Some((kind, len)) => Some(self.take(kind, len)),
            // Not a directive: emit the brace alone so a real directive
            // starting one byte later (`{{{ x }}}`) is still found.
            None => Some(self.take(TokenKind::Text, 1)),
        }
    }
}

/// Checks if a string is a valid identifier.
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Checks if a string is a dot-separated sequence of identifiers.
pub fn is_path(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_identifier)
}

fn classify_variable(inner: &str) -> Option<TokenKind<'_>> {
    let path = inner.trim();
    is_path(path).then_some(TokenKind::Variable { path })
}

fn classify_directive(inner: &str) -> Option<TokenKind<'_>> {
    let body = inner.trim();

    if body == "endfor" {
        return Some(TokenKind::ForEnd);
    }

    if let Some(rest) = body.strip_prefix("include") {
        let name = rest.trim_start().strip_prefix('"')?.strip_suffix('"')?;
        if name.is_empty() || name.contains('"') {
            return None;
        }
        return Some(TokenKind::Include { name });
    }

    let mut words = body.split_whitespace();
    match (
        words.next(),
        words.next(),
        words.next(),
        words.next(),
        words.next(),
    ) {
        (Some("for"), Some(item), Some("in"), Some(array), None)
            if is_identifier(item) && is_identifier(array) =>
        {
            Some(TokenKind::ForStart { item, array })
        }
        _ => None,
    }
}

/// A parsed template element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'a> {
    Text(&'a str),
    Variable { path: &'a str, source: &'a str },
    Include { name: &'a str, source: &'a str },
    Loop(LoopBlock<'a>),
}

impl<'a> Node<'a> {
    /// The input text this node was parsed from.
    pub fn source(&self) -> &'a str {
        match self {
            Node::Text(text) => text,
            Node::Variable { source, .. } | Node::Include { source, .. } => source,
            Node::Loop(block) => block.source,
        }
    }
}

/// A `{% for %}...{% endfor %}` region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopBlock<'a> {
    /// Name bound to each element inside the body.
    pub item: &'a str,
    /// Context key holding the array to iterate.
    pub array: &'a str,
    /// Body nodes. Never contains another [`Node::Loop`].
    pub body: Vec<Node<'a>>,
    /// The whole block, opening tag through closing tag.
    pub source: &'a str,
}

enum BlockEnd<'a> {
    /// Index (relative to the body start) of the closing `endfor`.
    Found(usize),
    /// A `for` tag that opened before the closing `endfor`.
    Nested(Token<'a>),
    /// No `endfor` follows.
    Missing,
}

fn find_block_end<'a>(tokens: &[Token<'a>]) -> BlockEnd<'a> {
    let Some(end) = tokens
        .iter()
        .position(|t| matches!(t.kind, TokenKind::ForEnd))
    else {
        return BlockEnd::Missing;
    };

    match tokens[..end]
        .iter()
        .find(|t| matches!(t.kind, TokenKind::ForStart { .. }))
    {
        Some(inner) => BlockEnd::Nested(*inner),
        None => BlockEnd::Found(end),
    }
}

/// Converts a non-loop token into a node. Stray loop tags become text.
fn leaf_node<'a>(token: &Token<'a>) -> Node<'a> {
    match token.kind {
        TokenKind::Variable { path } => Node::Variable {
            path,
            source: token.source,
        },
        TokenKind::Include { name } => Node::Include {
            name,
            source: token.source,
        },
        TokenKind::Text | TokenKind::ForStart { .. } | TokenKind::ForEnd => {
            Node::Text(token.source)
        }
    }
}

/// Parses template text into nodes, grouping loop tags into [`LoopBlock`]s.
///
/// Each `for` closes on the nearest following `endfor`, so sibling loops are
/// independent. A `for` with no closing tag and an `endfor` with no opening
/// tag are kept as literal text.
///
/// # Errors
///
/// Returns [`SyntaxError::NestedLoop`] if a loop body contains another `for`.
pub fn parse(input: &str) -> Result<Vec<Node<'_>>, SyntaxError> {
    let tokens: Vec<Token<'_>> = Tokenizer::new(input).collect();
    let mut nodes = Vec::with_capacity(tokens.len());
    let last_end = tokens
        .iter()
        .rposition(|t| matches!(t.kind, TokenKind::ForEnd));

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if let TokenKind::ForStart { item, array } = token.kind {
            // Past the final `endfor` every `for` is unclosed; skip the scan
            let block_end = if last_end.is_some_and(|end| end > i) {
                find_block_end(&tokens[i + 1..])
            } else {
                BlockEnd::Missing
            };
            match block_end {
                BlockEnd::Found(len) => {
                    let close = &tokens[i + 1 + len];
                    let end = close.offset + close.source.len();
                    nodes.push(Node::Loop(LoopBlock {
                        item,
                        array,
                        body: tokens[i + 1..i + 1 + len].iter().map(leaf_node).collect(),
                        source: &input[token.offset..end],
                    }));
                    i += len + 2;
                    continue;
                }
                BlockEnd::Nested(inner) => {
                    return Err(SyntaxError::NestedLoop {
                        position: Position::of(input, inner.offset),
                    });
                }
                BlockEnd::Missing => nodes.push(Node::Text(token.source)),
            }
        } else {
            nodes.push(leaf_node(token));
        }
        i += 1;
    }

    Ok(nodes)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn identifier() -> impl Strategy<Value = String> {
        "[a-z_][a-z0-9_]{0,8}"
    }

    // Strategy for text without any braces or percent signs
    fn plain_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,!?:;'\"\n]{0,60}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn plain_text_is_all_text(content in plain_text()) {
            let tokens: Vec<_> = Tokenizer::new(&content).collect();
            prop_assert!(tokens.iter().all(|t| t.kind == TokenKind::Text));
        }

        #[test]
        fn token_sources_reassemble_input(content in "[a-z {}%\"]{0,60}") {
            let joined: String = Tokenizer::new(&content).map(|t| t.source).collect();
            prop_assert_eq!(joined, content);
        }

        #[test]
        fn valid_paths_tokenize_as_variables(
            segments in proptest::collection::vec(identifier(), 1..4),
            pad in " {0,3}",
        ) {
            let path = segments.join(".");
            let input = format!("{{{{{pad}{path}{pad}}}}}");
            let tokens: Vec<_> = Tokenizer::new(&input).collect();
            prop_assert_eq!(tokens.len(), 1);
            prop_assert_eq!(tokens[0].kind, TokenKind::Variable { path: path.as_str() });
        }

        #[test]
        fn loop_source_spans_whole_block(
            item in identifier(),
            array in identifier(),
            body in plain_text(),
        ) {
            let input = format!("{{% for {item} in {array} %}}{body}{{% endfor %}}");
            let nodes = parse(&input).unwrap();
            prop_assert_eq!(nodes.len(), 1);
            prop_assert_eq!(nodes[0].source(), input.as_str());
        }
    }
}
