//! Setup errors. These are fatal and only raised while building a scene;
//! nothing in the per-tick path returns them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("entity {0} has no rigid body")]
    MissingBody(&'static str),
    #[error("entity {0} has no collider")]
    MissingCollider(&'static str),
    #[error("tuning value `{field}` = {value} is outside {min}..={max}")]
    InvalidTuning {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl SetupError {
    /// Check `value` lies in `min..=max`.
    pub fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), Self> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(SetupError::InvalidTuning { field, value, min, max })
        }
    }
}
