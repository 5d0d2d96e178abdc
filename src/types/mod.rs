pub mod error;
pub mod keyword;

pub use error::{
    ErrorCategory, ErrorClassifier, KeyweaveError, ProviderError, Result, ValidationError,
    ValidationErrorKind,
};
pub use keyword::{Competitor, Intent, KeywordNode, Preorder};
