//! Candidate extraction
//!
//! A regex finds the head of each shape (`name(`, `$_prop =`, `$var =`) up to
//! the opening quote; the literal body is then scanned by hand so escaped
//! quotes are honoured and the literal ends at its real closing quote.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use x2c_core::{Candidate, CandidateKind, QuoteStyle, starts_with_marker};

// Matches: find(' / getXpathCount(" / $this->click('
static CALL_HEAD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(\w+)\((['"])"#).unwrap());

// Matches: $_locator = '
static PROPERTY_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\$(_\w+)\s*=\s*(['"])"#).unwrap());

// Matches: $xpath = ' / $this->row = "
static VARIABLE_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\$\w+(?:->\w+)*)\s*=\s*(['"])"#).unwrap());

// Loose marker count: any quote followed by a marker
static MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"](?:xpath=|//)"#).unwrap());

/// Extract all candidates of one kind from `text`, in source order
pub fn extract(kind: CandidateKind, text: &str) -> Vec<Candidate> {
    match kind {
        CandidateKind::CallArgument => call_arguments(text),
        CandidateKind::PropertyAssignment => property_assignments(text),
        CandidateKind::VariableAssignment => variable_assignments(text),
    }
}

/// `name('//locator')` and `name("//locator", ...)`
pub fn call_arguments(text: &str) -> Vec<Candidate> {
    scan(&CALL_HEAD, text, CandidateKind::CallArgument, |caps, _| {
        caps.get(1).map(|m| m.as_str().to_string())
    })
}

/// `$_name = '//locator';`, bound as `$this->_name`
pub fn property_assignments(text: &str) -> Vec<Candidate> {
    scan(&PROPERTY_HEAD, text, CandidateKind::PropertyAssignment, |caps, _| {
        caps.get(1).map(|m| format!("$this->{}", m.as_str()))
    })
}

/// `$name = '//locator';` where the locator holds no `$variable`
pub fn variable_assignments(text: &str) -> Vec<Candidate> {
    scan(&VARIABLE_HEAD, text, CandidateKind::VariableAssignment, |caps, locator| {
        if locator.contains('$') {
            return None;
        }
        caps.get(1).map(|m| m.as_str().to_string())
    })
}

/// Count quoted literals that start with a locator marker
pub fn count_markers(text: &str) -> usize {
    MARKER_REGEX.find_iter(text).count()
}

fn scan<F>(head: &Regex, text: &str, kind: CandidateKind, binding: F) -> Vec<Candidate>
where
    F: Fn(&Captures<'_>, &str) -> Option<String>,
{
    let mut candidates = Vec::new();
    let mut last_end = 0;

    for caps in head.captures_iter(text) {
        let (Some(whole), Some(quote_match)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        if whole.start() < last_end {
            continue;
        }
        let Some(quote) = quote_match.as_str().chars().next().and_then(QuoteStyle::from_char)
        else {
            continue;
        };

        let body_start = whole.end();
        let Some(body_end) = closing_quote(text, body_start, quote) else {
            continue;
        };
        let Some(locator) = text.get(body_start..body_end) else {
            continue;
        };
        if !starts_with_marker(locator) {
            continue;
        }

        let terminator = text.get(body_end + 1..).and_then(|rest| rest.chars().next());
        if !accepts_terminator(kind, terminator) {
            continue;
        }

        let Some(binding) = binding(&caps, locator) else {
            continue;
        };

        // Quote and terminator are both single-byte
        let span_end = body_end + 2;
        candidates.push(Candidate {
            kind,
            span: whole.start()..span_end,
            locator_span: body_start..body_end,
            locator: locator.to_string(),
            quote,
            binding,
        });
        last_end = span_end;
    }

    candidates
}

fn accepts_terminator(kind: CandidateKind, terminator: Option<char>) -> bool {
    match kind {
        CandidateKind::CallArgument => matches!(terminator, Some(')' | ',')),
        CandidateKind::PropertyAssignment | CandidateKind::VariableAssignment => {
            terminator == Some(';')
        }
    }
}

/// Byte offset of the first unescaped `quote` at or after `body_start`.
/// Literals never span lines.
fn closing_quote(text: &str, body_start: usize, quote: QuoteStyle) -> Option<usize> {
    let quote = quote.as_char();
    let mut escaped = false;

    for (offset, c) in text.get(body_start..)?.char_indices() {
        match c {
            '\n' => return None,
            '\\' if !escaped => escaped = true,
            c if c == quote && !escaped => return Some(body_start + offset),
            _ => escaped = false,
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_argument() {
        let text = r#"$this->click("//div[@id='x']");"#;
        let found = call_arguments(text);

        assert_eq!(found.len(), 1);
        let candidate = &found[0];
        assert_eq!(candidate.binding, "click");
        assert_eq!(candidate.locator, "//div[@id='x']");
        assert_eq!(candidate.quote, QuoteStyle::Double);
        assert_eq!(candidate.raw_text(text), Some(r#"click("//div[@id='x']")"#));
        assert_eq!(&text[candidate.locator_span.clone()], "//div[@id='x']");
    }

    #[test]
    fn test_multi_argument_call() {
        let text = "$this->type('//input[@name=\"q\"]', 'hello');";
        let found = call_arguments(text);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].locator, "//input[@name=\"q\"]");
        assert_eq!(found[0].binding, "type");
    }

    #[test]
    fn test_two_locator_arguments() {
        let text = "dragAndDrop('//a', '//b');";
        let found = call_arguments(text);

        // Only the first argument follows the opening parenthesis
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].locator, "//a");
    }

    #[test]
    fn test_escaped_quote_inside_literal() {
        let text = r#"click("//a[contains(@class, \"stuff\")]");"#;
        let found = call_arguments(text);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].locator, r#"//a[contains(@class, \"stuff\")]"#);
    }

    #[test]
    fn test_call_requires_boundary() {
        assert!(call_arguments("click('//a' . $suffix);").is_empty());
        assert!(call_arguments("click('not a locator');").is_empty());
        assert!(call_arguments("click(\n'//a');").is_empty());
    }

    #[test]
    fn test_scheme_marker() {
        let found = call_arguments("isElementPresent('xpath=//div')");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].locator, "xpath=//div");
    }

    #[test]
    fn test_property_assignment() {
        let text = "    protected $_submit = '//input[@type=\"submit\"]';\n";
        let found = property_assignments(text);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].binding, "$this->_submit");
        assert_eq!(found[0].kind, CandidateKind::PropertyAssignment);
        assert_eq!(found[0].quote, QuoteStyle::Single);
    }

    #[test]
    fn test_property_requires_terminator() {
        assert!(property_assignments("$_a = '//a' . $b;").is_empty());
        assert!(property_assignments("$a = '//a';").is_empty());
    }

    #[test]
    fn test_variable_assignment() {
        let text = "$xpath = '//table';\n$this->row = \"//tr\";\n";
        let found = variable_assignments(text);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].binding, "$xpath");
        assert_eq!(found[1].binding, "$this->row");
        assert_eq!(found[1].quote, QuoteStyle::Double);
    }

    #[test]
    fn test_variable_rejects_embedded_variable() {
        assert!(variable_assignments("$x = \"//tr[$i]\";").is_empty());
        assert!(variable_assignments("$x = '//tr[$i]';").is_empty());
    }

    #[test]
    fn test_property_also_matches_variable_shape() {
        let text = "$_loc = '//span';";
        assert_eq!(property_assignments(text).len(), 1);
        assert_eq!(variable_assignments(text)[0].binding, "$_loc");
    }

    #[test]
    fn test_count_markers() {
        let text = r#"find('//a'); $x = "xpath=//b"; $y = '//c'; echo '/d';"#;
        assert_eq!(count_markers(text), 3);
        assert_eq!(count_markers("css=div"), 0);
    }
}
