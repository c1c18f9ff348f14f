use scanplate_match::SearchError;
use scanplate_template::TemplateError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("input does not match template")]
    DoesNotMatch,

    #[error("search gave up after {limit} steps")]
    SearchExhausted { limit: u64 },

    #[error("invalid template: {0}")]
    Template(#[from] TemplateError),
}

impl From<SearchError> for MatchError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::DoesNotMatch => MatchError::DoesNotMatch,
            SearchError::SearchExhausted { limit } => MatchError::SearchExhausted { limit },
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
