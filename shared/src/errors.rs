//! Error types for QuickCals

use crate::metabolic::MissingFields;
use thiserror::Error;

/// A metabolic rate was requested for a profile lacking required fields
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Insufficient profile data for BMR calculation (missing: {missing})")]
pub struct MissingFieldsError {
    pub missing: MissingFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message() {
        let err = MissingFieldsError {
            missing: MissingFields {
                age: true,
                gender: false,
                height: false,
                weight: true,
            },
        };
        assert_eq!(
            err.to_string(),
            "Insufficient profile data for BMR calculation (missing: age, weight)"
        );
    }
}
