//! Domain model for posts, comments and paged listings.
//!
//! # Responsibility
//! - Define persisted records, request inputs and transfer representations.
//! - Own field-by-field conversion between records and transfer shapes.
//! - Declare request input rules (checked by services before persistence).
//!
//! # Invariants
//! - Identifiers are generated by the store and never reused.
//! - Every `Comment` belongs to exactly one `Post`.

use validator::ValidationError;

pub mod comment;
pub mod page;
pub mod post;

/// Rejects values made only of whitespace; length rules alone accept them.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}
