use crate::remote::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("{0} must not be empty")]
    Invalid(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Trimmed `value`, or `Invalid(field)` when nothing is left.
pub(super) fn required(field: &'static str, value: &str) -> Result<String, ControllerError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ControllerError::Invalid(field));
    }
    Ok(v.to_string())
}
