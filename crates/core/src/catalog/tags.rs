#![forbid(unsafe_code)]

use std::collections::BTreeSet;

/// Deduplicates tag names keeping the first occurrence of each, in input order.
/// Names are case-sensitive and kept exactly as given.
pub fn normalize_tag_names(names: &[String]) -> Result<Vec<String>, TagNameError> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        validate_tag_name(name)?;
        if seen.insert(name.as_str()) {
            out.push(name.clone());
        }
    }
    Ok(out)
}

pub fn validate_tag_name(name: &str) -> Result<(), TagNameError> {
    if name.trim().is_empty() {
        return Err(TagNameError::Empty);
    }
    if name.chars().any(|c| c.is_control()) {
        return Err(TagNameError::ContainsControl);
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TagNameError {
    #[error("tag name must not be empty")]
    Empty,
    #[error("tag name contains control characters")]
    ContainsControl,
}

impl TagNameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "tag name must not be empty",
            Self::ContainsControl => "tag name contains control characters",
        }
    }
}
