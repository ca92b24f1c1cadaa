//! Enums used as keys for identifying the inputs to the model.
use std::fmt::Display;
use strum_macros::EnumIter;

/// The surface observations the cloud base model is driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Hash, PartialOrd, Ord)]
pub enum ModelInput {
    /// Relative humidity (%)
    RelativeHumidity,
    /// Air pressure (hPa)
    Pressure,
    /// Air temperature (C)
    Temperature,
    /// Height the air starts rising from (meters)
    StartHeight,
}

impl ModelInput {
    /// The value used when a caller does not supply this input, in the units listed on the
    /// variant.
    pub fn default_value(self) -> f64 {
        use ModelInput::*;

        match self {
            RelativeHumidity => 50.0,
            Pressure => 1013.0,
            Temperature => 15.0,
            StartHeight => 0.0,
        }
    }

    /// Unit symbol for display.
    pub fn units(self) -> &'static str {
        use ModelInput::*;

        match self {
            RelativeHumidity => "%",
            Pressure => "hPa",
            Temperature => "\u{00B0}C",
            StartHeight => "m",
        }
    }
}

impl Display for ModelInput {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ModelInput::*;

        let name = match self {
            RelativeHumidity => "relative humidity",
            Pressure => "pressure",
            Temperature => "temperature",
            StartHeight => "start height",
        };

        write!(f, "{}", name)
    }
}
