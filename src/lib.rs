#![warn(missing_docs)]
/*!
Estimate the height of the cumulus cloud base from surface observations.

Air rising from the surface cools at the dry adiabatic lapse rate while keeping its specific
humidity, so its relative humidity climbs until the air saturates and cloud forms. This crate lifts
surface air one meter at a time and reports the last level before it goes over 100% relative
humidity.

All functions use:
 - Pressure in hPa
 - Temperature in C
 - Height in meters
 - Relative humidity in % (0 to 100)
 - Specific humidity in g/kg

```rust
use cloud_base_analysis::{find_cloud_base, SurfaceConditions};
use metfor::{Celsius, HectoPascal, Meters};

let sfc = SurfaceConditions::new(50.0, HectoPascal(1013.0), Celsius(15.0), Meters(0.0));
assert_eq!(find_cloud_base(&sfc), Ok(Meters(1273.0)));
```
*/

//
// API
//
pub use crate::{
    ascent::{
        ascent_profile, Ascent, AscentLevel, AscentProfile, CoolingReference, SearchLimits,
        MAX_STEPS,
    },
    cloud_base::{compute_cloud_base, find_cloud_base, find_cloud_base_with_limits, CloudBase},
    error::{AnalysisError, Result},
    keys::ModelInput,
    surface::SurfaceConditions,
};

pub mod formulas;

//
// Internal use only
//

// Modules
mod ascent;
mod cloud_base;
mod error;
mod keys;
mod surface;
