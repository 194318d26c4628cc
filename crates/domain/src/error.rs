type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] BoxError),
}

impl ReadError {
    #[must_use]
    pub fn is_unexpected(&self) -> bool {
        matches!(self, ReadError::Storage(_) | ReadError::Other(_))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] BoxError),
}

impl CreateError {
    #[must_use]
    pub fn is_unexpected(&self) -> bool {
        matches!(self, CreateError::Storage(_) | CreateError::Other(_))
    }
}

impl From<ReadError> for CreateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound => CreateError::NotFound,
            ReadError::Storage(storage) => CreateError::Storage(storage),
            ReadError::Other(other) => CreateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("not found")]
    NotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] BoxError),
}

impl UpdateError {
    #[must_use]
    pub fn is_unexpected(&self) -> bool {
        matches!(self, UpdateError::Storage(_) | UpdateError::Other(_))
    }
}

impl From<ReadError> for UpdateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound => UpdateError::NotFound,
            ReadError::Storage(storage) => UpdateError::Storage(storage),
            ReadError::Other(other) => UpdateError::Other(other),
        }
    }
}

impl From<DeleteError> for UpdateError {
    fn from(value: DeleteError) -> Self {
        match value {
            DeleteError::NotFound => UpdateError::NotFound,
            DeleteError::Forbidden => UpdateError::Forbidden,
            DeleteError::Conflict(conflict) => UpdateError::Conflict(conflict),
            DeleteError::Storage(storage) => UpdateError::Storage(storage),
            DeleteError::Other(other) => UpdateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error("not found")]
    NotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] BoxError),
}

impl DeleteError {
    #[must_use]
    pub fn is_unexpected(&self) -> bool {
        matches!(self, DeleteError::Storage(_) | DeleteError::Other(_))
    }
}

impl From<ReadError> for DeleteError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound => DeleteError::NotFound,
            ReadError::Storage(storage) => DeleteError::Storage(storage),
            ReadError::Other(other) => DeleteError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Other(#[from] BoxError),
}

impl From<crate::NameError> for ValidationError {
    fn from(value: crate::NameError) -> Self {
        ValidationError::Invalid {
            field: "name",
            message: value.to_string(),
        }
    }
}

impl From<crate::RepsError> for ValidationError {
    fn from(value: crate::RepsError) -> Self {
        ValidationError::Invalid {
            field: "reps",
            message: value.to_string(),
        }
    }
}

impl From<crate::WeightError> for ValidationError {
    fn from(value: crate::WeightError) -> Self {
        ValidationError::Invalid {
            field: "weight_kg",
            message: value.to_string(),
        }
    }
}

impl From<crate::DayOfWeekError> for ValidationError {
    fn from(value: crate::DayOfWeekError) -> Self {
        ValidationError::Invalid {
            field: "day_of_week",
            message: value.to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("database error")]
    Database(#[source] BoxError),
    #[error(transparent)]
    Other(#[from] BoxError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_error_from_read_error() {
        assert!(matches!(
            CreateError::from(ReadError::NotFound),
            CreateError::NotFound
        ));
        assert!(matches!(
            CreateError::from(ReadError::Other("foo".into())),
            CreateError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_update_error_from_read_error() {
        assert!(matches!(
            UpdateError::from(ReadError::NotFound),
            UpdateError::NotFound
        ));
        assert!(matches!(
            UpdateError::from(ReadError::Other("foo".into())),
            UpdateError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_delete_error_from_read_error() {
        assert!(matches!(
            DeleteError::from(ReadError::NotFound),
            DeleteError::NotFound
        ));
        assert!(matches!(
            DeleteError::from(ReadError::Storage(StorageError::Other("foo".into()))),
            DeleteError::Storage(StorageError::Other(_))
        ));
    }

    #[test]
    fn test_expected_errors_are_not_unexpected() {
        assert!(!ReadError::NotFound.is_unexpected());
        assert!(!UpdateError::Forbidden.is_unexpected());
        assert!(!DeleteError::Conflict("already deleted".into()).is_unexpected());
        assert!(ReadError::Other("foo".into()).is_unexpected());
    }
}
