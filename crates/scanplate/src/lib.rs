//! Match text against brace templates and extract named fields.
//!
//! ```
//! use scanplate::{match_all, MatchError, TemplateError};
//!
//! let fields = match_all("Hello, {name}!", "Hello, World!").unwrap();
//! assert_eq!(fields["name"], "World");
//!
//! assert_eq!(match_all("{a:i}-{b:i}", "abc"), Err(MatchError::DoesNotMatch));
//! assert_eq!(
//!     match_all("{n:i:abc}", "123"),
//!     Err(MatchError::Template(TemplateError::InvalidTokenLength("abc".to_string())))
//! );
//! ```

pub mod cli;
pub mod error;
pub mod output;
pub mod runner;

pub use error::{MatchError, Result};
pub use scanplate_interval::{BoundedInterval, Interval};
pub use scanplate_match::{Captures, MatchOptions};
pub use scanplate_template::{ByteClass, FieldName, Matcher, Spec, Template, TemplateError};

use tracing_subscriber::EnvFilter;

/// Parses `template` and matches `input` against it.
pub fn match_all(template: &str, input: &str) -> Result<Captures> {
    match_all_with(template, input, &MatchOptions::default())
}

pub fn match_all_with(template: &str, input: &str, options: &MatchOptions) -> Result<Captures> {
    let template = Template::parse(template)?;
    Ok(scanplate_match::match_template(&template, input, options)?)
}

/// A parsed template bundled with its search options, for matching many
/// inputs. Shareable across threads.
#[derive(Debug, Clone)]
pub struct Scanner {
    template: Template,
    options: MatchOptions,
}

impl Scanner {
    pub fn new(template: &str) -> std::result::Result<Self, TemplateError> {
        Self::with_options(template, MatchOptions::default())
    }

    pub fn with_options(
        template: &str,
        options: MatchOptions,
    ) -> std::result::Result<Self, TemplateError> {
        Ok(Self {
            template: Template::parse(template)?,
            options,
        })
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn scan(&self, input: &str) -> Result<Captures> {
        Ok(scanplate_match::match_template(
            &self.template,
            input,
            &self.options,
        )?)
    }
}

/// Installs a stderr `fmt` subscriber. `RUST_LOG` takes precedence over
/// `verbosity` (0 = warn, 1 = debug, 2+ = trace).
pub fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
