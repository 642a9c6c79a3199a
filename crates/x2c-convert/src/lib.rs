//! Locator syntax conversion
//!
//! Turns an XPath locator into an equivalent CSS selector, or reports that it
//! cannot. Only a small, common XPath subset is understood; everything else
//! is rejected so callers can leave the original locator in place.

pub mod error;
pub mod xpath;

pub use error::{ConversionError, Result};
pub use xpath::XpathToCss;

/// Converts a locator string into a selector string
///
/// Implementations must be pure: same input, same output, no I/O.
pub trait LocatorConverter {
    fn convert(&self, locator: &str) -> Result<String>;
}
