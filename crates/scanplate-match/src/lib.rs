//! Matching engine: fits input text to a parsed template.
//!
//! The engine looks for a way to cut the input into exactly one segment per
//! spec, in order, such that each segment satisfies its spec's length and
//! matcher. Fields with open-ended lengths are resolved by backtracking,
//! trying longer segments first.
//!
//! # Example
//!
//! ```
//! use scanplate_match::{match_template, MatchOptions, SearchError};
//! use scanplate_template::Template;
//!
//! let template = Template::parse("{a:i}-{b:i}").unwrap();
//! let options = MatchOptions::default();
//!
//! let captures = match_template(&template, "12-34", &options).unwrap();
//! assert_eq!(captures["a"], "12");
//! assert_eq!(captures["b"], "34");
//!
//! assert_eq!(
//!     match_template(&template, "abc", &options),
//!     Err(SearchError::DoesNotMatch)
//! );
//! ```

mod search;

pub use search::decompose;

use scanplate_template::{Spec, Template};
use std::collections::HashMap;
use thiserror::Error;

/// Field name to matched text, for named fields only.
pub type Captures = HashMap<String, String>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("input does not match template")]
    DoesNotMatch,
    #[error("search gave up after {limit} steps")]
    SearchExhausted { limit: u64 },
}

/// Knobs for a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Ceiling on candidate lengths tried before giving up with
    /// [`SearchError::SearchExhausted`]. `None` searches to completion.
    pub max_steps: Option<u64>,
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}

/// Collects the named segments into a map. A name that occurs more than once
/// keeps the segment matched last.
pub fn collect_captures(specs: &[Spec], segments: &[&str]) -> Captures {
    let mut captures = Captures::new();
    for (spec, segment) in specs.iter().zip(segments) {
        if let Some(name) = spec.name() {
            captures.insert(name.to_string(), segment.to_string());
        }
    }
    captures
}

pub fn match_specs(
    specs: &[Spec],
    input: &str,
    options: &MatchOptions,
) -> Result<Captures, SearchError> {
    let segments = decompose(specs, input, options)?;
    Ok(collect_captures(specs, &segments))
}

pub fn match_template(
    template: &Template,
    input: &str,
    options: &MatchOptions,
) -> Result<Captures, SearchError> {
    match_specs(template.specs(), input, options)
}
