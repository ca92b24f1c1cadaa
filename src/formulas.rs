//! Thermodynamic formulas for air rising from the surface without condensing.
//!
//! Humidities are plain numbers: relative humidity in percent and specific humidity in grams of
//! water vapor per kilogram of air. None of these functions check their inputs, callers that take
//! values from the outside world should validate them first (see
//! [`SurfaceConditions::validate`](crate::SurfaceConditions::validate)).
use metfor::{Celsius, HectoPascal, Meters, Quantity};

/// Absolute zero, used to convert to Kelvin.
pub const ABSOLUTE_ZERO: Celsius = Celsius(-273.15);

/// Rate of cooling with height for unsaturated rising air, C/m.
pub const DRY_ADIABATIC_LAPSE_RATE: f64 = 0.00976;

/// Temperature lapse rate used by the barometric formula, K/m.
pub const STANDARD_LAPSE_RATE: f64 = 0.0065;

/// Exponent in the barometric formula, g / (R_d * lapse rate).
pub const BAROMETRIC_EXPONENT: f64 = 5.257;

/// Ratio of the gas constants of dry air and water vapor.
pub const EPSILON: f64 = 0.622;

// Magnus approximation coefficients.
const MAGNUS_E0: HectoPascal = HectoPascal(6.1078);
const MAGNUS_A: f64 = 17.27;
const MAGNUS_B: f64 = 237.3;

/// The saturation vapor pressure formula is singular at this temperature. Temperatures at or
/// below it are not physical inputs to the model.
pub const SATURATION_SINGULARITY: Celsius = Celsius(-MAGNUS_B);

/// Saturation vapor pressure over liquid water.
///
/// Uses the Magnus type approximation `6.1078 * exp(17.27 T / (T + 237.3))`, which is good over
/// the usual atmospheric range of roughly -40C to 50C.
#[inline]
pub fn water_vapor_saturation_pressure(temperature: Celsius) -> HectoPascal {
    let t = temperature.unpack();
    HectoPascal(MAGNUS_E0.unpack() * f64::exp(MAGNUS_A * t / (t + MAGNUS_B)))
}

/// Specific humidity (g/kg) of air with the given relative humidity (%).
#[inline]
pub fn specific_humidity(
    relative_humidity: f64,
    pressure: HectoPascal,
    temperature: Celsius,
) -> f64 {
    let e_s = water_vapor_saturation_pressure(temperature);
    relative_humidity / 100.0 * (EPSILON * e_s.unpack() / pressure.unpack()) * 1000.0
}

/// Pressure at `height` given the pressure and temperature at zero height.
///
/// The result is rounded to a whole hPa.
#[inline]
pub fn pressure_from_altitude(
    height: Meters,
    pressure0: HectoPascal,
    temperature: Celsius,
) -> HectoPascal {
    let h = height.unpack();
    let t_k = temperature.unpack() - ABSOLUTE_ZERO.unpack();

    let ratio = 1.0 - STANDARD_LAPSE_RATE * h / (t_k + STANDARD_LAPSE_RATE * h);
    HectoPascal(f64::round(
        pressure0.unpack() * ratio.powf(BAROMETRIC_EXPONENT),
    ))
}

/// Relative humidity (%) of air with the given specific humidity (g/kg).
///
/// This is not limited to 100%, values above that mean the air is supersaturated.
#[inline]
pub fn relative_humidity(specific_humidity: f64, pressure: HectoPascal, temperature: Celsius) -> f64 {
    let e_s = water_vapor_saturation_pressure(temperature);
    specific_humidity / (EPSILON * 10.0 * e_s.unpack() / pressure.unpack())
}

/// Temperature of air that rose `height_diff` meters from where it had `temperature`.
///
/// Always uses the dry adiabatic lapse rate.
#[inline]
pub fn temperature_after_rising(temperature: Celsius, height_diff: Meters) -> Celsius {
    Celsius(temperature.unpack() - height_diff.unpack() * DRY_ADIABATIC_LAPSE_RATE)
}
