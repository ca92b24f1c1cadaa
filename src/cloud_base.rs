//! Find the height where air rising from the surface becomes saturated and cumulus form.
use crate::{
    ascent::{Ascent, SearchLimits},
    error::{AnalysisError, Result},
    surface::SurfaceConditions,
};
use itertools::Itertools;
use metfor::{Celsius, HectoPascal, Meters, Quantity};
use optional::{none, some, Optioned};
use std::fmt::Display;
use tracing::debug;

/// The outcome of a cloud base search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CloudBase {
    /// The highest level below saturation.
    Found(Meters),
    /// The air never saturated below the search ceiling.
    NotFound,
}

impl CloudBase {
    /// Get the cloud base height, if there is one.
    #[inline]
    pub fn height(self) -> Option<Meters> {
        match self {
            CloudBase::Found(height) => Some(height),
            CloudBase::NotFound => None,
        }
    }

    /// Was a cloud base found?
    #[inline]
    pub fn is_found(self) -> bool {
        self.height().is_some()
    }
}

impl From<CloudBase> for Optioned<Meters> {
    fn from(cloud_base: CloudBase) -> Self {
        match cloud_base {
            CloudBase::Found(height) => some(height),
            CloudBase::NotFound => none(),
        }
    }
}

impl Display for CloudBase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CloudBase::Found(height) => {
                write!(f, "The height of cloudbase is {:.0}", height.unpack())
            }
            CloudBase::NotFound => write!(f, "No cloud base found"),
        }
    }
}

/// Find the cloud base using the default [`SearchLimits`].
///
/// See [`find_cloud_base_with_limits`].
#[inline]
pub fn find_cloud_base(surface: &SurfaceConditions) -> Result<Meters> {
    find_cloud_base_with_limits(surface, &SearchLimits::default())
}

/// Find the cloud base by lifting the surface air one step at a time.
///
/// The result is the last level before the relative humidity goes over 100%. If the very first
/// step is already supersaturated, the start height is returned. Returns
/// `AnalysisError::NoConvergence` if the air is still unsaturated at the search ceiling, and
/// `AnalysisError::InvalidInput` if the surface conditions fail validation.
pub fn find_cloud_base_with_limits(
    surface: &SurfaceConditions,
    limits: &SearchLimits,
) -> Result<Meters> {
    let ascent = Ascent::new(surface, limits)?;

    let cloud_base = std::iter::once(ascent.start_level())
        .chain(ascent)
        // Look at the levels two at a time...
        .tuple_windows::<(_, _)>()
        // ...until the upper one is supersaturated.
        .find(|(_, above)| above.is_supersaturated())
        .map(|(below, _)| below.height)
        .ok_or(AnalysisError::NoConvergence);

    debug!(
        relative_humidity = surface.relative_humidity,
        pressure = surface.pressure.unpack(),
        temperature = surface.temperature.unpack(),
        start_height = surface.height.unpack(),
        cloud_base = ?cloud_base.map(|h| h.unpack()),
        "cloud base search"
    );

    cloud_base
}

/// Compute the cloud base from surface observations, using the default value for any that are
/// missing.
///
/// The defaults are 50% relative humidity, 1013 hPa, 15C and a start height of 0 m. Invalid
/// inputs are an error, a search that never saturates is `CloudBase::NotFound`.
///
/// # Examples
///
/// ```rust
/// use cloud_base_analysis::{compute_cloud_base, CloudBase};
/// use metfor::{Celsius, HectoPascal, Meters};
/// use optional::none;
///
/// let cb = compute_cloud_base(50.0, HectoPascal(1013.0), Celsius(15.0), Meters(0.0)).unwrap();
/// assert_eq!(cb, CloudBase::Found(Meters(1273.0)));
/// assert_eq!(cb.to_string(), "The height of cloudbase is 1273");
///
/// let cb = compute_cloud_base(0.0, none::<HectoPascal>(), none::<Celsius>(), none::<Meters>());
/// assert_eq!(cb, Ok(CloudBase::NotFound));
///
/// assert!(compute_cloud_base(50.0, HectoPascal(0.0), Celsius(15.0), Meters(0.0)).is_err());
/// ```
pub fn compute_cloud_base<R, P, T, H>(
    relative_humidity: R,
    pressure: P,
    temperature: T,
    start_height: H,
) -> Result<CloudBase>
where
    R: Into<Optioned<f64>>,
    P: Into<Optioned<HectoPascal>>,
    T: Into<Optioned<Celsius>>,
    H: Into<Optioned<Meters>>,
{
    let surface =
        SurfaceConditions::with_defaults(relative_humidity, pressure, temperature, start_height);

    match find_cloud_base(&surface) {
        Ok(height) => Ok(CloudBase::Found(height)),
        Err(AnalysisError::NoConvergence) => Ok(CloudBase::NotFound),
        Err(err) => Err(err),
    }
}
