//! Runtime enforcement of the "every field present" response contract.

use crate::{Error, Result};

/// Conversion from an optional-by-default wire type into its fully
/// populated counterpart.
///
/// Every successful API response is expected to carry all of its declared
/// fields. Implementations check that expectation and fail with
/// [`ErrorKind::ContractViolation`](crate::ErrorKind::ContractViolation)
/// naming the first missing field.
pub trait DeepRequired: Sized {
    /// The fully populated form.
    type Required;

    /// Validates and converts, reporting missing fields relative to `path`.
    fn require_at(self, path: &str) -> Result<Self::Required>;

    /// Validates and converts a top-level value.
    fn into_required(self) -> Result<Self::Required> {
        self.require_at("")
    }
}

impl<T: DeepRequired> DeepRequired for Vec<T> {
    type Required = Vec<T::Required>;

    fn require_at(self, path: &str) -> Result<Self::Required> {
        self.into_iter()
            .enumerate()
            .map(|(index, item)| item.require_at(&format!("{path}[{index}]")))
            .collect()
    }
}

/// Unwraps a field, reporting `parent.field` when it is absent.
pub(crate) fn require<T>(value: Option<T>, parent: &str, field: &str) -> Result<T> {
    value.ok_or_else(|| Error::missing_field(field_path(parent, field)))
}

/// Joins a parent path and a field name.
pub(crate) fn field_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_owned()
    } else {
        format!("{parent}.{field}")
    }
}
