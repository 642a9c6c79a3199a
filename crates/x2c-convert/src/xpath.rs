//! XPath subset parser and CSS renderer

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::{ConversionError, LocatorConverter, Result};

/// Scheme marker some locator APIs accept in front of an xpath.
const XPATH_SCHEME: &str = "xpath=";

// Matches one location step at the start of the remaining xpath:
//   id('main')
//   //div[@id='x'][2]
//   /a[contains(@href, 'logout')]
static STEP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let value = r"\s*[\w/:][-/\w\s,:;.]*";
    let attr = r"@?[.a-zA-Z_:][-\w:.]*(?:\(\))?";
    let pattern = format!(
        concat!(
            r#"^(?:id\(["']?(?P<idvalue>{value})["']?\)"#,
            r#"|(?P<nav>//?)(?P<tag>[a-zA-Z][a-zA-Z0-9]{{0,10}}|\*)"#,
            r#"(?:\[(?:(?P<mattr>{attr})=["'](?P<mvalue>{value})["']"#,
            r#"|contains\((?P<cattr>{attr}),\s*["'](?P<cvalue>{value})["']\))\])?"#,
            r#"(?:\[(?P<nth>\d)\])?)"#,
        ),
        value = value,
        attr = attr,
    );
    Regex::new(&pattern).unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Id(String),
    Class(String),
    TextEquals(String),
    AttrEquals { name: String, value: String },
    AttrContains { name: String, value: String },
    TextContains(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    tag: String,
    predicate: Option<Predicate>,
    index: Option<String>,
}

impl Step {
    fn from_captures(caps: &Captures<'_>, xpath: &str) -> Result<Self> {
        if let Some(id) = caps.name("idvalue") {
            return Ok(Self {
                axis: Axis::Descendant,
                tag: String::new(),
                predicate: Some(Predicate::Id(id.as_str().to_string())),
                index: None,
            });
        }

        let axis = match caps.name("nav").map(|m| m.as_str()) {
            Some("//") => Axis::Descendant,
            _ => Axis::Child,
        };
        let tag = match caps.name("tag").map(|m| m.as_str()) {
            Some("*") | None => String::new(),
            Some(tag) => tag.to_string(),
        };

        let predicate = if let (Some(attr), Some(value)) = (caps.name("mattr"), caps.name("mvalue"))
        {
            let value = value.as_str().to_string();
            Some(match attr.as_str() {
                "@id" => Predicate::Id(value),
                "@class" => Predicate::Class(value),
                "text()" | "." => Predicate::TextEquals(value),
                other => Predicate::AttrEquals {
                    name: other.replace('@', ""),
                    value,
                },
            })
        } else if let (Some(attr), Some(value)) = (caps.name("cattr"), caps.name("cvalue")) {
            let value = value.as_str().to_string();
            match attr.as_str() {
                "text()" => Some(Predicate::TextContains(value)),
                name if name.starts_with('@') => Some(Predicate::AttrContains {
                    name: name.replace('@', ""),
                    value,
                }),
                _ => return Err(ConversionError::UnsupportedPredicate(xpath.to_string())),
            }
        } else {
            None
        };

        Ok(Self {
            axis,
            tag,
            predicate,
            index: caps.name("nth").map(|m| m.as_str().to_string()),
        })
    }

    fn render(&self, first: bool) -> String {
        let mut css = String::new();

        if !first {
            css.push_str(match self.axis {
                Axis::Descendant => " ",
                Axis::Child => " > ",
            });
        }
        css.push_str(&self.tag);

        match &self.predicate {
            Some(Predicate::Id(value)) => {
                css.push('#');
                css.push_str(&value.replace(' ', "#"));
            }
            Some(Predicate::Class(value)) => {
                css.push('.');
                css.push_str(&value.replace(' ', "."));
            }
            Some(Predicate::TextEquals(value)) => {
                css.push_str(&format!(":contains(^{value}$)"));
            }
            Some(Predicate::AttrEquals { name, value }) if value.contains(' ') => {
                css.push_str(&format!("[{name}=\"{value}\"]"));
            }
            Some(Predicate::AttrEquals { name, value }) => {
                css.push_str(&format!("[{name}={value}]"));
            }
            Some(Predicate::AttrContains { name, value }) => {
                css.push_str(&format!("[{name}*={value}]"));
            }
            Some(Predicate::TextContains(value)) => {
                css.push_str(&format!(":contains({value})"));
            }
            None => {}
        }

        if let Some(index) = &self.index {
            css.push_str(&format!(":nth-of-type({index})"));
        }

        css
    }
}

/// Default converter: the common XPath subset to CSS
#[derive(Debug, Clone, Copy, Default)]
pub struct XpathToCss;

impl XpathToCss {
    pub fn new() -> Self {
        Self
    }
}

impl LocatorConverter for XpathToCss {
    fn convert(&self, locator: &str) -> Result<String> {
        let xpath = locator.strip_prefix(XPATH_SCHEME).unwrap_or(locator);
        if xpath.is_empty() {
            return Err(ConversionError::Empty);
        }

        let mut css = String::new();
        let mut position = 0;

        while position < xpath.len() {
            let unsupported = || ConversionError::Unsupported {
                xpath: xpath.to_string(),
                offset: position,
            };

            let rest = xpath.get(position..).ok_or_else(unsupported)?;
            let caps = STEP_REGEX.captures(rest).ok_or_else(unsupported)?;
            let consumed = caps.get(0).map_or(0, |m| m.end());

            // id() only makes sense as the first step
            if consumed == 0 || (position != 0 && caps.name("idvalue").is_some()) {
                return Err(unsupported());
            }

            let step = Step::from_captures(&caps, xpath)?;
            css.push_str(&step.render(position == 0));
            position += consumed;
        }

        let css = css.trim();
        if css.is_empty() {
            return Err(ConversionError::EmptySelector(xpath.to_string()));
        }

        Ok(css.to_string())
    }
}
