//! Error taxonomy shared by descriptors, the factory and collections.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The designator names neither a primitive kind nor a usable nominal type.
    #[error("could not resolve type designator `{designator}`: {reason}")]
    Designator { designator: String, reason: String },

    /// A value failed validation against a collection's descriptor.
    #[error(
        "Data is not {}: `{expected}`, but {}: `{actual}`",
        expected_phrase(.expected_nominal),
        actual_phrase(.actual_nominal)
    )]
    ElementType {
        expected: String,
        expected_nominal: bool,
        actual: String,
        actual_nominal: bool,
    },

    #[error("element doesn't exist in this collection")]
    ElementNotFound,

    /// The argument collection's type is not assignable to the receiving type.
    #[error(
        "can not merge typed collections with different types: this collection is of type `{expected}` and the other collection of type `{actual}`"
    )]
    CollectionTypeMismatch { expected: String, actual: String },

    #[error("invalid argument: {0}")]
    Argument(String),

    /// Write-through attempted on a read-only view.
    #[error("`{operation}` is not supported on a read-only view, use `Collection::{use_instead}` instead")]
    ReadOnly {
        operation: &'static str,
        use_instead: &'static str,
    },

    #[error("type registry: {0}")]
    Registry(String),
}

fn expected_phrase(nominal: &bool) -> &'static str {
    if *nominal { "an instance of" } else { "of expected type" }
}

fn actual_phrase(nominal: &bool) -> &'static str {
    if *nominal { "an instance of" } else { "of type" }
}

impl Error {
    pub(crate) fn designator(designator: &str, reason: impl Into<String>) -> Self {
        Error::Designator {
            designator: designator.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn argument(msg: impl Into<String>) -> Self {
        Error::Argument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_type_phrasing_distinguishes_nominal_and_primitive() {
        let primitive = Error::ElementType {
            expected: "integer".into(),
            expected_nominal: false,
            actual: "string".into(),
            actual_nominal: false,
        };
        assert_eq!(
            primitive.to_string(),
            "Data is not of expected type: `integer`, but of type: `string`"
        );

        let nominal = Error::ElementType {
            expected: "App\\Shape".into(),
            expected_nominal: true,
            actual: "App\\Dog".into(),
            actual_nominal: true,
        };
        assert_eq!(
            nominal.to_string(),
            "Data is not an instance of: `App\\Shape`, but an instance of: `App\\Dog`"
        );
    }

    #[test]
    fn read_only_names_the_replacement() {
        let err = Error::ReadOnly { operation: "offset_set", use_instead: "push_element" };
        assert!(err.to_string().contains("Collection::push_element"));
    }
}
