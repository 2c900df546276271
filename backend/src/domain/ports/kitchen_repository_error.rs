//! Error shared by the kitchen entity store ports.

/// Persistence errors raised by kitchen repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KitchenRepositoryError {
    /// Repository connection could not be established.
    #[error("kitchen repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("kitchen repository query failed: {message}")]
    Query { message: String },
    /// A unique column already holds the value.
    #[error("a record with this {field} already exists")]
    Duplicate { field: String },
    /// The record is still referenced and cannot be deleted.
    #[error("record is still in use: {message}")]
    InUse { message: String },
    /// A referenced record does not exist.
    #[error("referenced {field} does not exist")]
    MissingReference { field: String },
}

impl KitchenRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// `field` names the unique column, e.g. `username`.
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }

    pub fn in_use(message: impl Into<String>) -> Self {
        Self::InUse {
            message: message.into(),
        }
    }

    /// `field` names the dangling reference, e.g. `dish_type` or `cook`.
    pub fn missing_reference(field: impl Into<String>) -> Self {
        Self::MissingReference {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        KitchenRepositoryError::duplicate("username"),
        "a record with this username already exists"
    )]
    #[case(
        KitchenRepositoryError::missing_reference("dish_type"),
        "referenced dish_type does not exist"
    )]
    #[case(
        KitchenRepositoryError::in_use(String::from("dishes use this type")),
        "record is still in use: dishes use this type"
    )]
    #[case(
        KitchenRepositoryError::connection("pool exhausted"),
        "kitchen repository connection failed: pool exhausted"
    )]
    #[case(
        KitchenRepositoryError::query("syntax error"),
        "kitchen repository query failed: syntax error"
    )]
    fn constructors_format_messages(#[case] err: KitchenRepositoryError, #[case] message: &str) {
        assert_eq!(err.to_string(), message);
    }

    #[rstest]
    fn constructors_accept_borrowed_and_owned_text() {
        assert_eq!(
            KitchenRepositoryError::duplicate("name"),
            KitchenRepositoryError::Duplicate {
                field: String::from("name")
            }
        );
        assert_eq!(
            KitchenRepositoryError::query(String::from("boom")),
            KitchenRepositoryError::query("boom")
        );
    }
}
