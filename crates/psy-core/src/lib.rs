//! psy-core: quantities and units for psychro.
//!
//! Contains:
//! - prefix (SI prefix table)
//! - resolver (unit token -> prefix, canonical symbol, quantity category)
//! - temperature / pressure (validated quantities with in-place conversion)
//! - units (uom bridge + conversion constants)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error type)

pub mod error;
pub mod numeric;
pub mod prefix;
pub mod pressure;
pub mod resolver;
pub mod temperature;
pub mod units;

pub use error::{PsyError, PsyResult};
pub use numeric::*;
pub use prefix::{PREFIXES, Prefix};
pub use pressure::{Pressure, PressureUnit};
pub use resolver::{QuantityKind, UnitDescriptor, UnitEntry, resolve_unit};
pub use temperature::{Temperature, TemperatureUnit};
