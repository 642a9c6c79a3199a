use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Literal prefixes that mark a string as a locator candidate.
pub const LOCATOR_MARKERS: [&str; 2] = ["xpath=", "//"];

/// Check whether a literal body begins with one of the locator markers
pub fn starts_with_marker(text: &str) -> bool {
    LOCATOR_MARKERS.iter().any(|marker| text.starts_with(marker))
}

/// Which syntactic shape a candidate was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    /// `find('//div')`
    CallArgument,
    /// `$_loc = '//div';`
    PropertyAssignment,
    /// `$loc = '//div';`
    VariableAssignment,
}

impl CandidateKind {
    /// Pass order. Each pass sees the text produced by the previous one.
    pub const PASS_ORDER: [CandidateKind; 3] = [
        CandidateKind::CallArgument,
        CandidateKind::PropertyAssignment,
        CandidateKind::VariableAssignment,
    ];
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CandidateKind::CallArgument => "call argument",
            CandidateKind::PropertyAssignment => "property",
            CandidateKind::VariableAssignment => "variable",
        };
        f.write_str(name)
    }
}

/// Quote character delimiting a literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    Single,
    Double,
}

impl QuoteStyle {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '\'' => Some(QuoteStyle::Single),
            '"' => Some(QuoteStyle::Double),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }

    /// Double-quoted literals interpolate `$variables` at runtime
    pub fn interpolates(self) -> bool {
        matches!(self, QuoteStyle::Double)
    }

    /// Escape every occurrence of this quote character with a backslash
    pub fn escape(self, text: &str) -> String {
        let quote = self.as_char();
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            if c == quote {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }

    /// Undo `\<quote>` escapes, leaving every other escape sequence alone
    pub fn unescape(self, text: &str) -> String {
        let quote = self.as_char();
        let mut unescaped = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\' && chars.peek() == Some(&quote) {
                continue;
            }
            unescaped.push(c);
        }
        unescaped
    }
}

/// One located occurrence of a locator literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: CandidateKind,
    /// Byte range of the whole call or assignment shape
    pub span: Range<usize>,
    /// Byte range of the locator text between the quotes
    pub locator_span: Range<usize>,
    /// Locator text as written, without surrounding quotes
    pub locator: String,
    pub quote: QuoteStyle,
    /// Bound identifier with its sigil (`$this->_loc`, `$loc`), or the
    /// called routine name for call arguments
    pub binding: String,
}

impl Candidate {
    /// The matched source text this candidate was extracted from
    pub fn raw_text<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.span.clone())
    }
}
