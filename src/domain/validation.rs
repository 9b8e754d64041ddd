// src/domain/validation.rs

use crate::errors::ServerError;

pub const REPORT_TEXT_LEN: (usize, usize) = (5, 1000);
pub const HELP_TITLE_LEN: (usize, usize) = (3, 200);
pub const HELP_DESCRIPTION_LEN: (usize, usize) = (5, 2000);
pub const HELP_CATEGORY_MAX: usize = 64;
pub const HELP_CONTACT_MAX: usize = 200;

/// Length in characters, inclusive bounds.
pub fn check_length(field: &str, value: &str, bounds: (usize, usize)) -> Result<(), ServerError> {
    let (min, max) = bounds;
    let n = value.chars().count();
    if n < min || n > max {
        return Err(ServerError::Validation(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(())
}

pub fn check_coordinates(lat: f64, lng: f64) -> Result<(), ServerError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(ServerError::Validation("lat must be within [-90, 90]".into()));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(ServerError::Validation("lng must be within [-180, 180]".into()));
    }
    Ok(())
}

/// Help categories are free-form tags; blank falls back to "other".
pub fn normalize_help_category(raw: &str) -> Result<String, ServerError> {
    let c = raw.trim();
    if c.is_empty() {
        return Ok("other".to_string());
    }
    if c.chars().count() > HELP_CATEGORY_MAX {
        return Err(ServerError::Validation(format!(
            "category must be at most {HELP_CATEGORY_MAX} characters"
        )));
    }
    Ok(c.to_string())
}

/// Blank contact is the same as none.
pub fn normalize_contact(raw: Option<&str>) -> Result<Option<String>, ServerError> {
    let Some(c) = raw.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    if c.chars().count() > HELP_CONTACT_MAX {
        return Err(ServerError::Validation(format!(
            "contact must be at most {HELP_CONTACT_MAX} characters"
        )));
    }
    Ok(Some(c.to_string()))
}
