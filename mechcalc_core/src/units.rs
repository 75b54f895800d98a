//! # Unit Conversion Registry
//!
//! A quantity → unit → conversion-factor table shared by the calculators and
//! the CLI `convert` command. Every unit is defined relative to the SI base
//! unit of its quantity:
//!
//! ```text
//! base = value · factor + offset
//! ```
//!
//! The offset is only non-zero for temperature scales.
//!
//! ## Example
//!
//! ```rust
//! use mechcalc_core::units::{convert_value, Quantity};
//!
//! let inches = convert_value(Quantity::Length, "ft", "in", 12.0).unwrap();
//! assert!((inches - 144.0).abs() < 1e-9);
//!
//! let f = convert_value(Quantity::Temperature, "degC", "degF", 100.0).unwrap();
//! assert!((f - 212.0).abs() < 1e-9);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::calculations::parse_option;
use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Quantities
// ============================================================================

/// Physical quantity categories known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Length,
    Area,
    Volume,
    Mass,
    Force,
    Pressure,
    Torque,
    Energy,
    Power,
    Velocity,
    Temperature,
    Frequency,
    Density,
}

impl Quantity {
    /// All quantities, in display order
    pub const ALL: [Quantity; 13] = [
        Quantity::Length,
        Quantity::Area,
        Quantity::Volume,
        Quantity::Mass,
        Quantity::Force,
        Quantity::Pressure,
        Quantity::Torque,
        Quantity::Energy,
        Quantity::Power,
        Quantity::Velocity,
        Quantity::Temperature,
        Quantity::Frequency,
        Quantity::Density,
    ];

    /// Accepted spelling of this quantity
    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::Length => "length",
            Quantity::Area => "area",
            Quantity::Volume => "volume",
            Quantity::Mass => "mass",
            Quantity::Force => "force",
            Quantity::Pressure => "pressure",
            Quantity::Torque => "torque",
            Quantity::Energy => "energy",
            Quantity::Power => "power",
            Quantity::Velocity => "velocity",
            Quantity::Temperature => "temperature",
            Quantity::Frequency => "frequency",
            Quantity::Density => "density",
        }
    }

    /// Symbol of the SI base unit for this quantity
    pub fn base_unit(&self) -> &'static str {
        match self {
            Quantity::Length => "m",
            Quantity::Area => "m^2",
            Quantity::Volume => "m^3",
            Quantity::Mass => "kg",
            Quantity::Force => "N",
            Quantity::Pressure => "Pa",
            Quantity::Torque => "N*m",
            Quantity::Energy => "J",
            Quantity::Power => "W",
            Quantity::Velocity => "m/s",
            Quantity::Temperature => "K",
            Quantity::Frequency => "Hz",
            Quantity::Density => "kg/m^3",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quantity {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("quantity", s, &Quantity::ALL, Quantity::as_str)
    }
}

// ============================================================================
// Unit Definitions
// ============================================================================

/// One unit of a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitDef {
    /// Symbol used to select the unit (e.g. "MPa", "degF")
    pub symbol: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Multiplier to the SI base unit
    pub factor: f64,
    /// Additive offset to the SI base unit (temperature only)
    pub offset: f64,
}

impl UnitDef {
    const fn new(symbol: &'static str, name: &'static str, factor: f64) -> Self {
        Self { symbol, name, factor, offset: 0.0 }
    }

    const fn affine(symbol: &'static str, name: &'static str, factor: f64, offset: f64) -> Self {
        Self { symbol, name, factor, offset }
    }

    /// Convert a value in this unit to the SI base unit
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.factor + self.offset
    }

    /// Convert a value in the SI base unit to this unit
    pub fn from_base(&self, base: f64) -> f64 {
        (base - self.offset) / self.factor
    }
}

const INCH: f64 = 0.0254;
const FOOT: f64 = 0.3048;
const POUND_MASS: f64 = 0.453_592_37;
const POUND_FORCE: f64 = 4.448_221_615_260_5;
const STANDARD_GRAVITY: f64 = 9.806_65;

static REGISTRY: Lazy<HashMap<Quantity, Vec<UnitDef>>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        Quantity::Length,
        vec![
            UnitDef::new("m", "meter", 1.0),
            UnitDef::new("km", "kilometer", 1e3),
            UnitDef::new("cm", "centimeter", 1e-2),
            UnitDef::new("mm", "millimeter", 1e-3),
            UnitDef::new("um", "micrometer", 1e-6),
            UnitDef::new("in", "inch", INCH),
            UnitDef::new("ft", "foot", FOOT),
            UnitDef::new("yd", "yard", 3.0 * FOOT),
            UnitDef::new("mi", "mile", 5280.0 * FOOT),
        ],
    );

    table.insert(
        Quantity::Area,
        vec![
            UnitDef::new("m^2", "square meter", 1.0),
            UnitDef::new("cm^2", "square centimeter", 1e-4),
            UnitDef::new("mm^2", "square millimeter", 1e-6),
            UnitDef::new("in^2", "square inch", INCH * INCH),
            UnitDef::new("ft^2", "square foot", FOOT * FOOT),
        ],
    );

    table.insert(
        Quantity::Volume,
        vec![
            UnitDef::new("m^3", "cubic meter", 1.0),
            UnitDef::new("L", "liter", 1e-3),
            UnitDef::new("mL", "milliliter", 1e-6),
            UnitDef::new("in^3", "cubic inch", INCH * INCH * INCH),
            UnitDef::new("ft^3", "cubic foot", FOOT * FOOT * FOOT),
            UnitDef::new("gal", "US gallon", 3.785_411_784e-3),
        ],
    );

    table.insert(
        Quantity::Mass,
        vec![
            UnitDef::new("kg", "kilogram", 1.0),
            UnitDef::new("g", "gram", 1e-3),
            UnitDef::new("t", "metric tonne", 1e3),
            UnitDef::new("lb", "pound", POUND_MASS),
            UnitDef::new("oz", "ounce", POUND_MASS / 16.0),
            UnitDef::new("slug", "slug", 14.593_902_937),
        ],
    );

    table.insert(
        Quantity::Force,
        vec![
            UnitDef::new("N", "newton", 1.0),
            UnitDef::new("kN", "kilonewton", 1e3),
            UnitDef::new("MN", "meganewton", 1e6),
            UnitDef::new("lbf", "pound-force", POUND_FORCE),
            UnitDef::new("kip", "kip", 1e3 * POUND_FORCE),
            UnitDef::new("kgf", "kilogram-force", STANDARD_GRAVITY),
        ],
    );

    table.insert(
        Quantity::Pressure,
        vec![
            UnitDef::new("Pa", "pascal", 1.0),
            UnitDef::new("kPa", "kilopascal", 1e3),
            UnitDef::new("MPa", "megapascal", 1e6),
            UnitDef::new("GPa", "gigapascal", 1e9),
            UnitDef::new("bar", "bar", 1e5),
            UnitDef::new("atm", "standard atmosphere", 101_325.0),
            UnitDef::new("psi", "pound per square inch", POUND_FORCE / (INCH * INCH)),
            UnitDef::new("ksi", "kip per square inch", 1e3 * POUND_FORCE / (INCH * INCH)),
        ],
    );

    table.insert(
        Quantity::Torque,
        vec![
            UnitDef::new("N*m", "newton-meter", 1.0),
            UnitDef::new("N*mm", "newton-millimeter", 1e-3),
            UnitDef::new("kN*m", "kilonewton-meter", 1e3),
            UnitDef::new("lbf*in", "pound-force inch", POUND_FORCE * INCH),
            UnitDef::new("lbf*ft", "pound-force foot", POUND_FORCE * FOOT),
        ],
    );

    table.insert(
        Quantity::Energy,
        vec![
            UnitDef::new("J", "joule", 1.0),
            UnitDef::new("kJ", "kilojoule", 1e3),
            UnitDef::new("Wh", "watt-hour", 3600.0),
            UnitDef::new("kWh", "kilowatt-hour", 3.6e6),
            UnitDef::new("cal", "calorie", 4.184),
            UnitDef::new("BTU", "British thermal unit", 1055.055_852_62),
            UnitDef::new("ft*lbf", "foot-pound", POUND_FORCE * FOOT),
        ],
    );

    table.insert(
        Quantity::Power,
        vec![
            UnitDef::new("W", "watt", 1.0),
            UnitDef::new("kW", "kilowatt", 1e3),
            UnitDef::new("MW", "megawatt", 1e6),
            UnitDef::new("hp", "mechanical horsepower", 745.699_871_582_270_2),
            UnitDef::new("BTU/h", "BTU per hour", 1055.055_852_62 / 3600.0),
        ],
    );

    table.insert(
        Quantity::Velocity,
        vec![
            UnitDef::new("m/s", "meter per second", 1.0),
            UnitDef::new("km/h", "kilometer per hour", 1e3 / 3600.0),
            UnitDef::new("ft/s", "foot per second", FOOT),
            UnitDef::new("mph", "mile per hour", 5280.0 * FOOT / 3600.0),
            UnitDef::new("kn", "knot", 1852.0 / 3600.0),
        ],
    );

    table.insert(
        Quantity::Temperature,
        vec![
            UnitDef::new("K", "kelvin", 1.0),
            UnitDef::affine("degC", "degree Celsius", 1.0, 273.15),
            UnitDef::affine("degF", "degree Fahrenheit", 5.0 / 9.0, 459.67 * 5.0 / 9.0),
            UnitDef::new("degR", "degree Rankine", 5.0 / 9.0),
        ],
    );

    table.insert(
        Quantity::Frequency,
        vec![
            UnitDef::new("Hz", "hertz", 1.0),
            UnitDef::new("kHz", "kilohertz", 1e3),
            UnitDef::new("rpm", "revolution per minute", 1.0 / 60.0),
            UnitDef::new("rad/s", "radian per second", 1.0 / (2.0 * std::f64::consts::PI)),
        ],
    );

    table.insert(
        Quantity::Density,
        vec![
            UnitDef::new("kg/m^3", "kilogram per cubic meter", 1.0),
            UnitDef::new("g/cm^3", "gram per cubic centimeter", 1e3),
            UnitDef::new("lb/ft^3", "pound per cubic foot", POUND_MASS / (FOOT * FOOT * FOOT)),
            UnitDef::new("lb/in^3", "pound per cubic inch", POUND_MASS / (INCH * INCH * INCH)),
        ],
    );

    table
});

/// All units registered for a quantity.
pub fn units_for(quantity: Quantity) -> &'static [UnitDef] {
    REGISTRY.get(&quantity).map(Vec::as_slice).unwrap_or(&[])
}

/// Look up a unit by symbol (exact) or by name (case-insensitive).
pub fn find_unit(quantity: Quantity, unit: &str) -> CalcResult<&'static UnitDef> {
    let units = units_for(quantity);
    let key = unit.trim();
    units
        .iter()
        .find(|u| u.symbol == key)
        .or_else(|| units.iter().find(|u| u.name.eq_ignore_ascii_case(key)))
        .ok_or_else(|| {
            let expected: Vec<&str> = units.iter().map(|u| u.symbol).collect();
            CalcError::unknown_option(format!("{} unit", quantity), unit, &expected)
        })
}

/// Convert `value` of `quantity` from unit `from` to unit `to`.
pub fn convert_value(quantity: Quantity, from: &str, to: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input("value", value.to_string(), "must be finite"));
    }
    let from_unit = find_unit(quantity, from)?;
    let to_unit = find_unit(quantity, to)?;
    Ok(to_unit.from_base(from_unit.to_base(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_every_quantity_has_units() {
        for q in Quantity::ALL {
            let units = units_for(q);
            assert!(!units.is_empty(), "{} has no units", q);
            assert_eq!(units[0].symbol, q.base_unit(), "{} base unit must come first", q);
        }
    }

    #[test]
    fn test_round_trip_all_pairs() {
        for q in Quantity::ALL {
            for a in units_for(q) {
                for b in units_for(q) {
                    for &x in &[-40.0, 0.0, 1.0, 123.456, 1e6] {
                        let there = convert_value(q, a.symbol, b.symbol, x).unwrap();
                        let back = convert_value(q, b.symbol, a.symbol, there).unwrap();
                        assert!(approx_eq(back, x), "{} {} -> {} -> {}: {} vs {}", q, a.symbol, b.symbol, a.symbol, back, x);
                    }
                }
            }
        }
    }

    #[test]
    fn test_known_conversions() {
        assert!(approx_eq(convert_value(Quantity::Pressure, "ksi", "MPa", 1.0).unwrap(), 6.894_757_293));
        assert!(approx_eq(convert_value(Quantity::Temperature, "degF", "degC", -40.0).unwrap(), -40.0));
        assert!(approx_eq(convert_value(Quantity::Temperature, "degC", "K", 0.0).unwrap(), 273.15));
        assert!(approx_eq(convert_value(Quantity::Torque, "lbf*ft", "N*m", 1.0).unwrap(), 1.355_817_948));
        assert!(approx_eq(convert_value(Quantity::Frequency, "rpm", "Hz", 60.0).unwrap(), 1.0));
    }

    #[test]
    fn test_lookup_by_name() {
        let unit = find_unit(Quantity::Length, "Millimeter").unwrap();
        assert_eq!(unit.symbol, "mm");
    }

    #[test]
    fn test_unknown_unit_and_quantity() {
        let err = convert_value(Quantity::Length, "furlong", "m", 1.0).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_OPTION");
        assert!("luminance".parse::<Quantity>().is_err());
        assert_eq!(" Pressure ".parse::<Quantity>().unwrap(), Quantity::Pressure);
    }

    #[test]
    fn test_unknown_quantity_lists_every_option() {
        let err = "luminance".parse::<Quantity>().unwrap_err();
        let expected: Vec<&str> = Quantity::ALL.iter().map(|q| q.as_str()).collect();
        assert_eq!(err, CalcError::unknown_option("quantity", "luminance", &expected));
    }

    #[test]
    fn test_quantity_serialization() {
        let json = serde_json::to_string(&Quantity::Temperature).unwrap();
        assert_eq!(json, "\"temperature\"");
    }
}
