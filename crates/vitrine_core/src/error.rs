use thiserror::Error;

/// Rejected tuning values for the movement and look controllers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("pitch range is empty: min {min} > max {max}")]
    EmptyPitchRange { min: f32, max: f32 },
}

impl ConfigError {
    /// Checks that `value` is finite and `>= 0`.
    pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), Self> {
        Self::finite(field, value)?;
        if value < 0.0 {
            return Err(Self::Negative { field, value });
        }
        Ok(())
    }

    pub(crate) fn finite(field: &'static str, value: f32) -> Result<(), Self> {
        if !value.is_finite() {
            return Err(Self::NotFinite { field, value });
        }
        Ok(())
    }
}
