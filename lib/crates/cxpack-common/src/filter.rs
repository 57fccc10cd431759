//! Activation filter matched against service bindings.

use regex::Regex;

use crate::binding::ServiceBinding;

/// Compiled pattern deciding whether a binding activates a pipeline component.
///
/// A binding matches when the pattern is found in its name, its label, or any
/// of its tags. The pattern is an unanchored regex, so a plain literal acts as
/// a substring test.
#[derive(Debug, Clone)]
pub struct ActivationFilter {
    pattern: Regex,
}

impl ActivationFilter {
    /// Compile a filter from the given pattern.
    ///
    /// # Errors
    ///
    /// Returns the underlying regex error when the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// The source pattern, for diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether the binding's name, label, or any tag matches.
    #[must_use]
    pub fn matches(&self, binding: &ServiceBinding) -> bool {
        self.pattern.is_match(&binding.name)
            || self.pattern.is_match(&binding.label)
            || binding.tags.iter().any(|tag| self.pattern.is_match(tag))
    }
}
