//! Unit token resolution.
//!
//! A token is split into an optional SI prefix and a canonical unit symbol of
//! one physical quantity category:
//!
//! - one character: must be a canonical symbol (`"K"`, `"m"`)
//! - two characters: a canonical symbol (`"Pa"`, `"ft"`) or prefix + symbol (`"kK"`, `"cm"`)
//! - longer: any registered alias as a suffix, preceded by an optional prefix
//!   symbol or name (`"kPa"`, `"kilopascals"`, `"mmHg"`)
//!
//! When several aliases are suffixes of the same token, the longest one wins;
//! equal lengths fall back to table order.

use std::fmt;
use std::str::FromStr;

use crate::error::{PsyError, PsyResult};
use crate::prefix::Prefix;

/// Physical quantity category a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityKind {
    Temperature,
    Pressure,
    Energy,
    Power,
    Length,
}

/// A canonical unit symbol and every spelling that resolves to it.
#[derive(Debug)]
pub struct UnitEntry {
    pub symbol: &'static str,
    pub aliases: &'static [&'static str],
}

const fn unit(symbol: &'static str, aliases: &'static [&'static str]) -> UnitEntry {
    UnitEntry { symbol, aliases }
}

static TEMPERATURE_UNITS: [UnitEntry; 3] = [
    unit("C", &["C", "Celsius", "Celcius"]),
    unit("K", &["K", "Kelvin", "Kelvins"]),
    unit("F", &["F", "Fahrenheit", "Fahrenheits"]),
];

static PRESSURE_UNITS: [UnitEntry; 12] = [
    unit("Pa", &["Pa", "Pascal", "Pascals"]),
    unit("pa", &["pa", "pascal", "pascals"]),
    unit("mHg", &["mHg"]),
    unit("mhg", &["mhg"]),
    unit("Atm", &["Atm", "ATM"]),
    unit("atm", &["atm"]),
    unit("bar", &["bar", "bars"]),
    unit("Bar", &["Bar", "Bars"]),
    unit("psi", &["psi"]),
    unit("Psi", &["Psi", "PSI"]),
    unit("torr", &["torr", "torrs"]),
    unit("Torr", &["Torr", "Torrs"]),
];

static ENERGY_UNITS: [UnitEntry; 10] = [
    unit("J", &["J", "Joule", "Joules"]),
    unit("j", &["j", "joule", "joules"]),
    unit("Cal", &["Cal", "Calorie", "Calories"]),
    unit("cal", &["cal", "calorie", "calories"]),
    unit("Btu", &["Btu", "BTU"]),
    unit("btu", &["btu"]),
    unit("wh", &["wh", "watthour", "watthours"]),
    unit("Wh", &["Wh", "Watthour", "Watthours"]),
    unit(
        "eV",
        &["eV", "electronVolt", "electronVolts", "electron-Volt", "electron-Volts"],
    ),
    unit(
        "ev",
        &["ev", "electronvolt", "electronvolts", "electron-volt", "electron-volts"],
    ),
];

static POWER_UNITS: [UnitEntry; 4] = [
    unit("W", &["W", "Watt", "Watts"]),
    unit("w", &["w", "watt", "watts"]),
    unit("hp", &["hp", "horsepower", "horsepowers"]),
    unit("ton", &["ton", "Ton"]),
];

static LENGTH_UNITS: [UnitEntry; 5] = [
    unit("m", &["m", "meter", "meters", "metre", "metres"]),
    unit("inch", &["inch", "inches"]),
    unit("ft", &["ft", "foot", "feet"]),
    unit("yd", &["yd", "yard", "yards"]),
    unit("mile", &["mile", "miles"]),
];

impl QuantityKind {
    pub const ALL: [QuantityKind; 5] = [
        QuantityKind::Temperature,
        QuantityKind::Pressure,
        QuantityKind::Energy,
        QuantityKind::Power,
        QuantityKind::Length,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Temperature => "TEMPERATURE",
            Self::Pressure => "PRESSURE",
            Self::Energy => "ENERGY",
            Self::Power => "POWER",
            Self::Length => "LENGTH",
        }
    }

    /// Canonical units of this category, in tie-break order.
    pub fn units(self) -> &'static [UnitEntry] {
        match self {
            Self::Temperature => &TEMPERATURE_UNITS,
            Self::Pressure => &PRESSURE_UNITS,
            Self::Energy => &ENERGY_UNITS,
            Self::Power => &POWER_UNITS,
            Self::Length => &LENGTH_UNITS,
        }
    }

    /// Resolve a unit token against this category.
    pub fn resolve(self, token: &str) -> PsyResult<UnitDescriptor> {
        let invalid = || PsyError::invalid_unit(token, self.name());
        let units = self.units();

        let (prefix_factor, symbol) = match token.chars().count() {
            0 => return Err(invalid()),
            1 => {
                let entry = find_symbol(units, token).ok_or_else(invalid)?;
                (1.0, entry.symbol)
            }
            2 => {
                if let Some(entry) = find_symbol(units, token) {
                    (1.0, entry.symbol)
                } else {
                    let split = token.chars().next().map_or(0, char::len_utf8);
                    let (prefix, rest) = token.split_at(split);
                    let entry = find_symbol(units, rest).ok_or_else(invalid)?;
                    let prefix = Prefix::from_symbol(prefix).ok_or_else(invalid)?;
                    (prefix.factor, entry.symbol)
                }
            }
            _ => {
                let (entry, alias) = longest_suffix_alias(units, token).ok_or_else(invalid)?;
                let prefix = &token[..token.len() - alias.len()];
                if prefix.is_empty() {
                    (1.0, entry.symbol)
                } else {
                    let prefix = Prefix::parse(prefix).ok_or_else(invalid)?;
                    (prefix.factor, entry.symbol)
                }
            }
        };

        Ok(UnitDescriptor {
            prefix_factor,
            symbol,
            kind: self,
        })
    }
}

fn find_symbol<'a>(units: &'a [UnitEntry], symbol: &str) -> Option<&'a UnitEntry> {
    units.iter().find(|u| u.symbol == symbol)
}

fn longest_suffix_alias<'a>(
    units: &'a [UnitEntry],
    token: &str,
) -> Option<(&'a UnitEntry, &'static str)> {
    let mut best: Option<(&UnitEntry, &'static str)> = None;
    for entry in units {
        for &alias in entry.aliases {
            if token.ends_with(alias) && best.is_none_or(|(_, b)| alias.len() > b.len()) {
                best = Some((entry, alias));
            }
        }
    }
    best
}

impl FromStr for QuantityKind {
    type Err = PsyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PsyError::UnknownQuantity {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDescriptor {
    pub prefix_factor: f64,
    pub symbol: &'static str,
    pub kind: QuantityKind,
}

impl fmt::Display for UnitDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:e} {}", self.kind, self.prefix_factor, self.symbol)
    }
}

/// Resolve `token` as a unit of the quantity called `quantity` (case-insensitive).
pub fn resolve_unit(token: &str, quantity: &str) -> PsyResult<UnitDescriptor> {
    let kind: QuantityKind = quantity.parse()?;
    kind.resolve(token)
}
