//! Character classes recognized by the parser.
//!
//! The grammar is small enough that the parser scans characters directly
//! instead of producing a token stream; these named classes keep the scanning
//! code readable and give error messages something to say ("expected `,`").

/// A named character class.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Matcher {
    pub name: &'static str,
    test: fn(char) -> bool,
}

impl Matcher {
    const fn new(name: &'static str, test: fn(char) -> bool) -> Self {
        Matcher { name, test }
    }

    #[inline]
    pub fn matches(self, c: char) -> bool {
        (self.test)(c)
    }
}

pub(crate) const WHITESPACE: Matcher = Matcher::new("whitespace", char::is_whitespace);
pub(crate) const DIGIT: Matcher = Matcher::new("digit", |c| c.is_ascii_digit());
/// Digits and the decimal point; the literal's shape is validated afterwards.
pub(crate) const NUMBER: Matcher = Matcher::new("number", |c| c.is_ascii_digit() || c == '.');
pub(crate) const SIGN: Matcher = Matcher::new("`-`", |c| c == '-');
pub(crate) const NAME_START: Matcher =
    Matcher::new("name", |c| c.is_ascii_alphabetic() || c == '_');
pub(crate) const NAME: Matcher = Matcher::new("name", |c| c.is_ascii_alphanumeric() || c == '_');
pub(crate) const DOT: Matcher = Matcher::new("`.`", |c| c == '.');
pub(crate) const SEPARATOR: Matcher = Matcher::new("`,`", |c| c == ',');
pub(crate) const LIST_START: Matcher = Matcher::new("`{`", |c| c == '{');
pub(crate) const LIST_END: Matcher = Matcher::new("`}`", |c| c == '}');
pub(crate) const PAREN_START: Matcher = Matcher::new("`(`", |c| c == '(');
pub(crate) const PAREN_END: Matcher = Matcher::new("`)`", |c| c == ')');
pub(crate) const INDEX_START: Matcher = Matcher::new("`[`", |c| c == '[');
pub(crate) const INDEX_END: Matcher = Matcher::new("`]`", |c| c == ']');
