//! Produce records and their validated field types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::{Field, InvalidField};
use crate::validate::{self, CENTS_PER_UNIT};

/// A produce code, e.g. `yrt6-72as-k736-l4ar`.
///
/// Codes are validated on construction and stored lowercase, so two codes
/// which differ only by case compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(String);

impl Code {
    /// Validate and normalize a produce code
    pub fn parse(code: &str) -> Result<Self, InvalidField> {
        if !validate::validate_code(code) {
            return Err(InvalidField::new(Field::Code, code));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }

    /// The normalized code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Code {
    type Err = InvalidField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Code {
    type Error = InvalidField;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A produce name, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Validate and normalize a produce name
    pub fn parse(name: &str) -> Result<Self, InvalidField> {
        if !validate::validate_name(name) {
            return Err(InvalidField::new(Field::Name, name));
        }
        Ok(Self(name.to_ascii_lowercase()))
    }

    /// The normalized name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Name {
    type Err = InvalidField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Name {
    type Error = InvalidField;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A strictly positive price, held as a whole number of cents.
///
/// Parse from a decimal string with [`str::parse`] to avoid floating point
/// entirely. Float input is accepted through [`TryFrom<f64>`], which rounds
/// to the nearest cent after checking the value has at most two decimals.
///
/// Prices serialize as decimal strings with two fractional digits
/// (`"12.10"`), and deserialize from either strings or numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Price(u64);

impl Price {
    /// Create a price from a whole number of cents. Zero is rejected.
    pub fn from_cents(cents: u64) -> Result<Self, InvalidField> {
        if cents == 0 {
            return Err(InvalidField::new(Field::Price, "0"));
        }
        Ok(Self(cents))
    }

    /// The price in cents
    pub fn cents(&self) -> u64 {
        self.0
    }
}

impl FromStr for Price {
    type Err = InvalidField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate::decimal_to_cents(s)
            .map(Self)
            .ok_or_else(|| InvalidField::new(Field::Price, s))
    }
}

impl TryFrom<f64> for Price {
    type Error = InvalidField;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        validate::float_to_cents(value)
            .ok_or_else(|| InvalidField::new(Field::Price, value.to_string()))
            .and_then(Self::from_cents)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / CENTS_PER_UNIT,
            self.0 % CENTS_PER_UNIT
        )
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A price as it arrives in a request: a decimal string, a whole number,
/// or a float.
///
/// Decoding never fails on a bad value, so callers can validate the price
/// alongside other fields and report exactly which one was rejected. Use
/// [`PriceInput::parse`] to get a [`Price`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    /// A decimal string, e.g. `"12.12"`
    Text(String),
    /// A non-negative whole number of units, e.g. `12`
    Whole(u64),
    /// Any other number, e.g. `12.12` or `-1`
    Number(f64),
}

impl PriceInput {
    /// Validate the input and convert it to a price
    pub fn parse(&self) -> Result<Price, InvalidField> {
        match self {
            PriceInput::Text(text) => text.parse(),
            PriceInput::Whole(units) => units
                .checked_mul(CENTS_PER_UNIT)
                .ok_or_else(|| InvalidField::new(Field::Price, units.to_string()))
                .and_then(Price::from_cents),
            PriceInput::Number(number) => Price::try_from(*number),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        PriceInput::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}

/// A single produce entry in the registry.
///
/// Records can only be built from validated fields, and are immutable
/// once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Produce {
    code: Code,
    name: Name,
    price: Price,
}

impl Produce {
    /// Create a new produce record
    pub fn new(code: Code, name: Name, price: Price) -> Self {
        Self { code, name, price }
    }

    /// The unique produce code
    pub fn code(&self) -> &Code {
        &self.code
    }

    /// The produce name
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The produce price
    pub fn price(&self) -> Price {
        self.price
    }
}
