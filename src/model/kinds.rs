use std::fmt;
use std::str::FromStr;

use crate::core::ValidationError;

/// Vehicle kind. Declaration order is the comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VehicleType {
    Car,
    Submarine,
    Bicycle,
    Hoverboard,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Car,
        VehicleType::Submarine,
        VehicleType::Bicycle,
        VehicleType::Hoverboard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "CAR",
            VehicleType::Submarine => "SUBMARINE",
            VehicleType::Bicycle => "BICYCLE",
            VehicleType::Hoverboard => "HOVERBOARD",
        }
    }

    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    /// Case-insensitive parse for interactive input
    pub fn parse_lenient(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(ValidationError::new("type", "must not be empty"));
        }
        normalized.parse()
    }

    /// Comma-separated list of every literal, for prompts and help text
    pub fn variants() -> String {
        Self::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl FromStr for VehicleType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new("type", format!("must be one of: {}", Self::variants()))
            })
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FuelType {
    Gasoline,
    Kerosene,
    Alcohol,
    Manpower,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [
        FuelType::Gasoline,
        FuelType::Kerosene,
        FuelType::Alcohol,
        FuelType::Manpower,
    ];

    /// Token written in place of an absent fuel type
    pub const NULL_LITERAL: &'static str = "null";

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "GASOLINE",
            FuelType::Kerosene => "KEROSENE",
            FuelType::Alcohol => "ALCOHOL",
            FuelType::Manpower => "MANPOWER",
        }
    }

    pub fn parse_lenient(input: &str) -> Result<Self, ValidationError> {
        input.trim().to_uppercase().parse()
    }

    /// `""` and `"null"` mean absent; anything else must be a known literal.
    pub fn parse_optional(input: &str) -> Result<Option<Self>, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == Self::NULL_LITERAL {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }

    pub fn variants() -> String {
        Self::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
    }

    pub fn display_optional(fuel: Option<FuelType>) -> &'static str {
        fuel.map_or(Self::NULL_LITERAL, |f| f.as_str())
    }
}

impl FromStr for FuelType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new("fuelType", format!("must be one of: {}", Self::variants()))
            })
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
