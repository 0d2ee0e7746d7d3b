//! Character cursor over the expression source.

use crate::matchers::{Matcher, WHITESPACE};

/// Position-tracking view over the source text.
///
/// `pos` is a byte offset that always sits on a char boundary.
pub(crate) struct Cursor<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Cursor { source, pos: 0 }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Position in characters, as reported to users.
    pub fn char_position(&self) -> usize {
        self.source[..self.pos].chars().count()
    }

    /// Unconsumed input.
    #[inline]
    pub fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn check(&self, matcher: Matcher) -> bool {
        self.peek().is_some_and(|c| matcher.matches(c))
    }

    /// Consume one character if it matches.
    pub fn eat(&mut self, matcher: Matcher) -> bool {
        match self.peek() {
            Some(c) if matcher.matches(c) => {
                self.pos += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    /// Consume `text` if the input continues with it.
    pub fn eat_str(&mut self, text: &str) -> bool {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            true
        } else {
            false
        }
    }

    /// Consume the longest run of matching characters.
    pub fn eat_while(&mut self, matcher: Matcher) -> &'src str {
        let start = self.pos;
        let len = self
            .rest()
            .find(|c| !matcher.matches(c))
            .unwrap_or(self.rest().len());
        self.pos += len;
        &self.source[start..self.pos]
    }

    pub fn skip_whitespace(&mut self) {
        self.eat_while(WHITESPACE);
    }
}
