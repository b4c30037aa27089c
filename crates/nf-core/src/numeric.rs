use crate::NfError;

/// Pass `v` through if finite, otherwise report it as `what`.
pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, NfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(NfError::NonFinite { what, value: v })
    }
}
