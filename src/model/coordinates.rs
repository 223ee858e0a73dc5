use std::fmt;

use crate::core::ValidationError;

/// Upper bound for the X coordinate (inclusive)
pub const MAX_X: f64 = 636.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    x: f64,
    y: i32,
}

impl Coordinates {
    pub fn new(x: f64, y: i32) -> Result<Self, ValidationError> {
        validate_x(x)?;
        Ok(Self { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn set_x(&mut self, x: f64) -> Result<(), ValidationError> {
        validate_x(x)?;
        self.x = x;
        Ok(())
    }

    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }
}

pub fn validate_x(x: f64) -> Result<(), ValidationError> {
    if x.is_nan() {
        return Err(ValidationError::new("x", "must be a number"));
    }
    if x > MAX_X {
        return Err(ValidationError::new("x", format!("must be <= {}, got {}", MAX_X, x)));
    }
    Ok(())
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {})", self.x, self.y)
    }
}
