//! Field-presence validation helpers for creation payloads.
//!
//! Empty strings and numeric zero are treated alike as "absent" when
//! checking required fields: a required numeric field carrying zero is
//! rejected exactly like a missing string. Tests that depend on the
//! zero case call it out.

use crate::error::{DomusError, DomusResult};

/// Reject an empty required string field.
pub fn require_str(field: &str, value: &str) -> DomusResult<()> {
    if value.is_empty() {
        return Err(DomusError::missing_field(field));
    }
    Ok(())
}

/// Reject a required float field carrying the absent-by-zero value.
pub fn require_f64(field: &str, value: f64) -> DomusResult<()> {
    if value == 0.0 {
        return Err(DomusError::missing_field(field));
    }
    Ok(())
}

/// Reject a required integer field carrying the absent-by-zero value.
pub fn require_u32(field: &str, value: u32) -> DomusResult<()> {
    if value == 0 {
        return Err(DomusError::missing_field(field));
    }
    Ok(())
}
