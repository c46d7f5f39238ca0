pub mod airplanes;
pub mod airports;
pub mod auth;
pub mod crews;
pub mod datetime;
pub mod flights;
pub mod orders;
pub mod routes;
pub mod tickets;

use crate::error::{AppError, AppResult};

/// Trims `value` and rejects it when blank or longer than `max_len` characters.
pub fn required_text(field: &str, value: &str, max_len: usize) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(field, "This field may not be blank."));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(
            field,
            format!("Ensure this field has no more than {max_len} characters."),
        ));
    }
    Ok(value.to_string())
}

pub fn positive(field: &str, value: i32) -> AppResult<i32> {
    if value <= 0 {
        return Err(AppError::validation(
            field,
            "Ensure this value is greater than 0.",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_bounds_length() {
        assert_eq!(required_text("name", "  JFK ", 255).unwrap(), "JFK");
        assert!(required_text("name", "   ", 255).is_err());
        assert!(required_text("code", "FL123456", 7).is_err());
    }

    #[test]
    fn positive_rejects_zero_and_negatives() {
        assert_eq!(positive("rows", 20).unwrap(), 20);
        assert!(positive("rows", 0).is_err());
        assert!(positive("distance", -5).is_err());
    }
}
