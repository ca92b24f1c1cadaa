//! Lift surface air one step at a time and track its state.
//!
//! The specific humidity of the air is fixed at its surface value for the whole ascent, only the
//! pressure and temperature change with height. Each step the pressure comes from the barometric
//! formula using the *surface* pressure and temperature, and the temperature from the dry
//! adiabatic lapse rate.
use crate::{
    error::{AnalysisError, Result},
    formulas::{pressure_from_altitude, relative_humidity, temperature_after_rising},
    keys::ModelInput,
    surface::SurfaceConditions,
};
use metfor::{Celsius, HectoPascal, Meters, Quantity};
use tracing::{trace, warn};

/// The most levels a single ascent will visit, whatever the search ceiling.
pub const MAX_STEPS: u64 = 1_000_000;

/// Where the height used for adiabatic cooling is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoolingReference {
    /// Cool the air by the full height above zero, regardless of where it started.
    Datum,
    /// Cool the air only by the height it has risen above its start height.
    StartHeight,
}

impl Default for CoolingReference {
    fn default() -> Self {
        CoolingReference::Datum
    }
}

/// Bounds and resolution for searching upward for the cloud base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    max_height: Meters,
    step: u32,
    cooling_reference: CoolingReference,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_height: Meters(20_000.0),
            step: 1,
            cooling_reference: CoolingReference::default(),
        }
    }
}

impl SearchLimits {
    /// Create limits with the default 20 km ceiling and 1 meter steps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the highest level that will be checked. No more than [`MAX_STEPS`] levels are checked
    /// no matter how high this is.
    pub fn with_max_height(self, max_height: Meters) -> Self {
        SearchLimits { max_height, ..self }
    }

    /// Set the distance between checked levels in whole meters. Zero is treated as 1.
    pub fn with_step(self, step: u32) -> Self {
        SearchLimits {
            step: step.max(1),
            ..self
        }
    }

    /// Set where the cooling height is measured from.
    pub fn with_cooling_reference(self, cooling_reference: CoolingReference) -> Self {
        SearchLimits {
            cooling_reference,
            ..self
        }
    }

    /// The highest level that will be checked.
    pub fn max_height(&self) -> Meters {
        self.max_height
    }

    /// The distance between checked levels.
    pub fn step(&self) -> Meters {
        Meters(f64::from(self.step))
    }

    /// Where the cooling height is measured from.
    pub fn cooling_reference(&self) -> CoolingReference {
        self.cooling_reference
    }
}

/// The state of the rising air at one level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AscentLevel {
    /// Height of the level
    pub height: Meters,
    /// Pressure in hPa
    pub pressure: HectoPascal,
    /// Temperature in C
    pub temperature: Celsius,
    /// Relative humidity in %, may be above 100.
    pub relative_humidity: f64,
}

impl AscentLevel {
    /// Has the air reached more than 100% relative humidity?
    #[inline]
    pub fn is_supersaturated(&self) -> bool {
        self.relative_humidity > 100.0
    }
}

/// An iterator over the levels air passes through as it rises from the surface.
///
/// The first level is one step above the start height, the last is the highest level at or below
/// the search ceiling. The iterator ends early if the relative humidity stops being a finite
/// number.
#[derive(Debug, Clone)]
pub struct Ascent {
    surface: SurfaceConditions,
    specific_humidity: f64,
    cooling_base: Meters,
    step: Meters,
    next_step: u64,
    num_steps: u64,
}

impl Ascent {
    /// Start an ascent from validated surface conditions.
    ///
    /// Also fails with `InvalidInput(ModelInput::StartHeight)` if the start height is so large that
    /// adding a step to it does not change it.
    pub fn new(surface: &SurfaceConditions, limits: &SearchLimits) -> Result<Self> {
        surface.validate()?;

        let start = surface.height;
        let step = limits.step();

        // Heights this far from zero no longer change when a step is added.
        if start.unpack() + step.unpack() == start.unpack() {
            warn!(start_height = start.unpack(), "start height too large to step from");
            return Err(AnalysisError::InvalidInput(ModelInput::StartHeight));
        }

        let num_steps = if limits.max_height() > start {
            let steps = (limits.max_height().unpack() - start.unpack()) / step.unpack();
            (f64::floor(steps) as u64).min(MAX_STEPS)
        } else {
            0
        };

        let cooling_base = match limits.cooling_reference() {
            CoolingReference::Datum => Meters(0.0),
            CoolingReference::StartHeight => start,
        };

        Ok(Ascent {
            surface: *surface,
            specific_humidity: surface.specific_humidity(),
            cooling_base,
            step,
            next_step: 1,
            num_steps,
        })
    }

    /// The conditions the air started with.
    pub fn surface(&self) -> &SurfaceConditions {
        &self.surface
    }

    /// The specific humidity (g/kg) carried through the whole ascent.
    pub fn specific_humidity(&self) -> f64 {
        self.specific_humidity
    }

    /// The starting state of the air expressed as a level.
    pub fn start_level(&self) -> AscentLevel {
        AscentLevel {
            height: self.surface.height,
            pressure: self.surface.pressure,
            temperature: self.surface.temperature,
            relative_humidity: self.surface.relative_humidity,
        }
    }

    fn level_at(&self, height: Meters) -> AscentLevel {
        let SurfaceConditions {
            pressure: sfc_p,
            temperature: sfc_t,
            ..
        } = self.surface;

        let pressure = pressure_from_altitude(height, sfc_p, sfc_t);
        let rise = Meters(height.unpack() - self.cooling_base.unpack());
        let temperature = temperature_after_rising(sfc_t, rise);
        let relative_humidity = relative_humidity(self.specific_humidity, pressure, temperature);

        AscentLevel {
            height,
            pressure,
            temperature,
            relative_humidity,
        }
    }
}

impl Iterator for Ascent {
    type Item = AscentLevel;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_step > self.num_steps {
            return None;
        }

        let height =
            Meters(self.surface.height.unpack() + self.next_step as f64 * self.step.unpack());
        let level = self.level_at(height);

        if !level.relative_humidity.is_finite() {
            warn!(?level, "non-finite relative humidity, ending ascent");
            self.next_step = self.num_steps + 1;
            return None;
        }

        trace!(
            height = level.height.unpack(),
            pressure = level.pressure.unpack(),
            temperature = level.temperature.unpack(),
            relative_humidity = level.relative_humidity,
            "ascent level"
        );

        self.next_step += 1;
        Some(level)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .num_steps
            .saturating_add(1)
            .saturating_sub(self.next_step) as usize;
        (0, Some(remaining))
    }
}

/// The path of the rising air from its start height up to the cloud base.
#[derive(Debug, Clone, Default)]
pub struct AscentProfile {
    /// Height profile
    pub height: Vec<Meters>,
    /// Pressure profile
    pub pressure: Vec<HectoPascal>,
    /// Temperature profile
    pub temperature: Vec<Celsius>,
    /// Relative humidity profile
    pub relative_humidity: Vec<f64>,
}

impl AscentProfile {
    fn push(&mut self, level: AscentLevel) {
        self.height.push(level.height);
        self.pressure.push(level.pressure);
        self.temperature.push(level.temperature);
        self.relative_humidity.push(level.relative_humidity);
    }

    /// The number of levels in the profile.
    pub fn len(&self) -> usize {
        self.height.len()
    }

    /// Is the profile empty?
    pub fn is_empty(&self) -> bool {
        self.height.is_empty()
    }

    /// The highest level in the profile.
    pub fn top(&self) -> Option<AscentLevel> {
        let last = self.len().checked_sub(1)?;

        Some(AscentLevel {
            height: self.height[last],
            pressure: self.pressure[last],
            temperature: self.temperature[last],
            relative_humidity: self.relative_humidity[last],
        })
    }
}

/// Lift the surface air and record every level it passes through.
///
/// The profile starts with the observed surface state and includes every level up to and including
/// the cloud base. If the air never saturates the profile runs up to the search ceiling.
pub fn ascent_profile(surface: &SurfaceConditions, limits: &SearchLimits) -> Result<AscentProfile> {
    let ascent = Ascent::new(surface, limits)?;

    let mut profile = AscentProfile::default();
    profile.push(ascent.start_level());

    ascent
        .take_while(|level| !level.is_supersaturated())
        .for_each(|level| profile.push(level));

    Ok(profile)
}
