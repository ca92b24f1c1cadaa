//! The observed state of the air before it starts rising.
use crate::{
    error::{AnalysisError, Result},
    formulas::{self, SATURATION_SINGULARITY},
    keys::ModelInput,
};
use metfor::{Celsius, HectoPascal, Meters, Quantity};
use optional::Optioned;
use tracing::warn;

/// Variables describing the air at the height it starts rising from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConditions {
    /// Relative humidity in %
    pub relative_humidity: f64,
    /// Pressure in hPa
    pub pressure: HectoPascal,
    /// Temperature in C
    pub temperature: Celsius,
    /// Height the air starts rising from.
    pub height: Meters,
}

impl Default for SurfaceConditions {
    fn default() -> Self {
        SurfaceConditions {
            relative_humidity: ModelInput::RelativeHumidity.default_value(),
            pressure: HectoPascal(ModelInput::Pressure.default_value()),
            temperature: Celsius(ModelInput::Temperature.default_value()),
            height: Meters(ModelInput::StartHeight.default_value()),
        }
    }
}

impl SurfaceConditions {
    /// Create a new `SurfaceConditions` from all four observations.
    #[inline]
    pub fn new(
        relative_humidity: f64,
        pressure: HectoPascal,
        temperature: Celsius,
        height: Meters,
    ) -> Self {
        SurfaceConditions {
            relative_humidity,
            pressure,
            temperature,
            height,
        }
    }

    /// Create a new `SurfaceConditions`, filling in any missing value with the default for that
    /// input (see [`ModelInput::default_value`]).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cloud_base_analysis::SurfaceConditions;
    /// use metfor::{Celsius, HectoPascal, Meters};
    /// use optional::{none, some};
    ///
    /// let sfc =
    ///     SurfaceConditions::with_defaults(65.0, HectoPascal(1002.0), none::<Celsius>(), none::<Meters>());
    /// assert_eq!(sfc.temperature, Celsius(15.0));
    /// assert_eq!(sfc.height, Meters(0.0));
    ///
    /// let sfc =
    ///     SurfaceConditions::with_defaults(none::<f64>(), some(HectoPascal(990.0)), Celsius(22.0), Meters(450.0));
    /// assert_eq!(sfc.relative_humidity, 50.0);
    /// ```
    pub fn with_defaults<R, P, T, H>(
        relative_humidity: R,
        pressure: P,
        temperature: T,
        height: H,
    ) -> Self
    where
        R: Into<Optioned<f64>>,
        P: Into<Optioned<HectoPascal>>,
        T: Into<Optioned<Celsius>>,
        H: Into<Optioned<Meters>>,
    {
        let defaults = Self::default();

        SurfaceConditions {
            relative_humidity: relative_humidity
                .into()
                .unwrap_or(defaults.relative_humidity),
            pressure: pressure.into().unwrap_or(defaults.pressure),
            temperature: temperature.into().unwrap_or(defaults.temperature),
            height: height.into().unwrap_or(defaults.height),
        }
    }

    /// Check that the model can produce finite values from these conditions.
    ///
    /// Every value must be finite, the pressure must be positive, and the temperature must be
    /// above the singularity in the saturation vapor pressure formula. Relative humidity is not
    /// range checked.
    pub fn validate(&self) -> Result<()> {
        let invalid = if !self.relative_humidity.is_finite() {
            Some(ModelInput::RelativeHumidity)
        } else if !self.pressure.unpack().is_finite() || self.pressure <= HectoPascal(0.0) {
            Some(ModelInput::Pressure)
        } else if !self.temperature.unpack().is_finite()
            || self.temperature <= SATURATION_SINGULARITY
        {
            Some(ModelInput::Temperature)
        } else if !self.height.unpack().is_finite() {
            Some(ModelInput::StartHeight)
        } else {
            None
        };

        match invalid {
            Some(input) => {
                warn!(%input, surface = ?self, "rejected surface conditions");
                Err(AnalysisError::InvalidInput(input))
            }
            None => Ok(()),
        }
    }

    /// Get the specific humidity (g/kg) of the air.
    #[inline]
    pub fn specific_humidity(&self) -> f64 {
        formulas::specific_humidity(self.relative_humidity, self.pressure, self.temperature)
    }
}
