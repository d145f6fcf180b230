//! SI prefixes.
//!
//! Symbols are case-sensitive (`m` is milli, `M` is mega). Written names are
//! matched case-insensitively so that `kilopascal` and `Kilopascal` both work.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefix {
    pub symbol: &'static str,
    pub name: &'static str,
    pub factor: f64,
}

pub static PREFIXES: [Prefix; 20] = [
    Prefix::new("y", "yocto", 1e-24),
    Prefix::new("z", "zepto", 1e-21),
    Prefix::new("a", "atto", 1e-18),
    Prefix::new("f", "femto", 1e-15),
    Prefix::new("p", "pico", 1e-12),
    Prefix::new("n", "nano", 1e-9),
    Prefix::new("u", "micro", 1e-6),
    Prefix::new("m", "milli", 1e-3),
    Prefix::new("c", "centi", 1e-2),
    Prefix::new("d", "deci", 1e-1),
    Prefix::new("da", "deca", 1e1),
    Prefix::new("h", "hecto", 1e2),
    Prefix::new("k", "kilo", 1e3),
    Prefix::new("M", "mega", 1e6),
    Prefix::new("G", "giga", 1e9),
    Prefix::new("T", "tera", 1e12),
    Prefix::new("P", "peta", 1e15),
    Prefix::new("E", "exa", 1e18),
    Prefix::new("Z", "zetta", 1e21),
    Prefix::new("Y", "yotta", 1e24),
];

impl Prefix {
    const fn new(symbol: &'static str, name: &'static str, factor: f64) -> Self {
        Self {
            symbol,
            name,
            factor,
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<&'static Prefix> {
        PREFIXES.iter().find(|p| p.symbol == symbol)
    }

    pub fn from_name(name: &str) -> Option<&'static Prefix> {
        PREFIXES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Resolve either a symbol (`k`, `da`) or a written name (`kilo`).
    pub fn parse(text: &str) -> Option<&'static Prefix> {
        Self::from_symbol(text).or_else(|| Self::from_name(text))
    }

    /// Reverse lookup; only exact table factors match.
    pub fn from_factor(factor: f64) -> Option<&'static Prefix> {
        PREFIXES.iter().find(|p| p.factor == factor)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) = {:e}", self.symbol, self.name, self.factor)
    }
}
