//! Decimal evaluation of a single chained operation.

use crate::{Error, Result};
use core::fmt::{self, Formatter};
use core::str::FromStr;
use rust_decimal::{Decimal, RoundingStrategy};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the four supported arithmetic operators.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum Operator {
    /// `+`, used when no operator has been set.
    #[default]
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl Operator {
    /// Returns the symbol of the operator.
    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = Error;

    fn try_from(symbol: char) -> Result<Self> {
        match symbol {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            _ => Err(Error::InvalidOperator(symbol.into())),
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Operator::try_from(symbol),
            _ => Err(Error::InvalidOperator(s.into())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The rounding policy used for computation and display.
///
/// Defaults to two fractional digits, rounding half away from zero.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rounding {
    /// Number of fractional digits kept.
    pub scale: u32,
    /// How the dropped digits are rounded.
    #[cfg_attr(feature = "serde", serde(with = "strategy"))]
    pub strategy: RoundingStrategy,
}

impl Rounding {
    /// Returns a rounding policy with the given scale and strategy.
    pub const fn new(scale: u32, strategy: RoundingStrategy) -> Rounding {
        Rounding { scale, strategy }
    }

    /// Rounds `value` to the policy's scale.
    pub fn round(self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.scale, self.strategy)
    }

    /// Rounds `value` and pads it with trailing zeros up to the policy's scale.
    pub fn fixed(self, value: Decimal) -> Decimal {
        let mut value = self.round(value);
        value.rescale(self.scale);
        value
    }
}

impl Default for Rounding {
    fn default() -> Self {
        Rounding::new(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Applies `operator` to `accumulated` and `operand`.
///
/// Addition is exact, the other operators are rounded with `rounding`.
///
/// # Errors
/// Returns [`Error::DivisionUndefined`] when dividing by zero and
/// [`Error::Overflow`] when the result does not fit in a [`Decimal`].
///
/// # Examples
/// ```
/// # use rust_decimal::Decimal;
/// # use tally::{evaluator, Operator, Rounding};
/// let result = evaluator::apply(
///     Decimal::from(10),
///     Operator::Divide,
///     Decimal::from(3),
///     Rounding::default(),
/// );
/// assert_eq!(result.unwrap(), Decimal::new(333, 2));
/// ```
pub fn apply(
    accumulated: Decimal,
    operator: Operator,
    operand: Decimal,
    rounding: Rounding,
) -> Result<Decimal> {
    let result = match operator {
        Operator::Add => return accumulated.checked_add(operand).ok_or(Error::Overflow),
        Operator::Subtract => accumulated.checked_sub(operand),
        Operator::Multiply => accumulated.checked_mul(operand),
        Operator::Divide if operand.is_zero() => return Err(Error::DivisionUndefined),
        Operator::Divide => accumulated.checked_div(operand),
    };
    result.map(|r| rounding.round(r)).ok_or(Error::Overflow)
}

#[cfg(feature = "serde")]
mod strategy {
    use rust_decimal::RoundingStrategy;
    use serde::{de, ser, Deserialize, Deserializer, Serializer};

    const NAMES: [(&str, RoundingStrategy); 7] = [
        ("half_even", RoundingStrategy::MidpointNearestEven),
        ("half_up", RoundingStrategy::MidpointAwayFromZero),
        ("half_down", RoundingStrategy::MidpointTowardZero),
        ("down", RoundingStrategy::ToZero),
        ("up", RoundingStrategy::AwayFromZero),
        ("floor", RoundingStrategy::ToNegativeInfinity),
        ("ceiling", RoundingStrategy::ToPositiveInfinity),
    ];

    const VARIANTS: [&str; 7] = ["half_even", "half_up", "half_down", "down", "up", "floor", "ceiling"];

    #[allow(deprecated)]
    const ALIASES: [(&str, RoundingStrategy); 5] = [
        ("half_even", RoundingStrategy::BankersRounding),
        ("half_up", RoundingStrategy::RoundHalfUp),
        ("half_down", RoundingStrategy::RoundHalfDown),
        ("down", RoundingStrategy::RoundDown),
        ("up", RoundingStrategy::RoundUp),
    ];

    pub fn serialize<S: Serializer>(strategy: &RoundingStrategy, s: S) -> Result<S::Ok, S::Error> {
        let name = NAMES
            .iter()
            .chain(&ALIASES)
            .find(|(_, known)| known == strategy)
            .map(|(name, _)| *name)
            .ok_or_else(|| {
                <S::Error as ser::Error>::custom(format!("unsupported rounding strategy {strategy:?}"))
            })?;
        s.serialize_str(name)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<RoundingStrategy, D::Error> {
        let name = String::deserialize(d)?;
        NAMES
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, strategy)| *strategy)
            .ok_or_else(|| de::Error::unknown_variant(&name, &VARIANTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn eval(a: &str, op: Operator, b: &str) -> Result<Decimal> {
        apply(dec(a), op, dec(b), Rounding::default())
    }

    #[test]
    fn addition_is_exact() {
        assert_eq!(eval("2.3", Operator::Add, "0.005").unwrap(), dec("2.305"));
    }

    #[test]
    fn subtraction_and_multiplication_round_half_up() {
        assert_eq!(eval("1.005", Operator::Subtract, "0").unwrap(), dec("1.01"));
        assert_eq!(eval("-1.005", Operator::Subtract, "0").unwrap(), dec("-1.01"));
        assert_eq!(eval("1.25", Operator::Multiply, "1.01").unwrap(), dec("1.26"));
        assert_eq!(eval("20.3", Operator::Subtract, "2.4").unwrap(), dec("17.9"));
    }

    #[test]
    fn division() {
        assert_eq!(eval("2", Operator::Divide, "3").unwrap(), dec("0.67"));
        assert_eq!(eval("16", Operator::Divide, "2").unwrap(), dec("8"));
        assert_eq!(eval("16", Operator::Divide, "0"), Err(Error::DivisionUndefined));
        assert_eq!(eval("0", Operator::Divide, "0.00"), Err(Error::DivisionUndefined));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            apply(Decimal::MAX, Operator::Add, Decimal::ONE, Rounding::default()),
            Err(Error::Overflow)
        );
        assert_eq!(
            apply(Decimal::MAX, Operator::Multiply, Decimal::TWO, Rounding::default()),
            Err(Error::Overflow)
        );
    }

    #[test]
    fn custom_rounding() {
        let rounding = Rounding::new(0, RoundingStrategy::MidpointTowardZero);
        let result = apply(dec("5"), Operator::Divide, dec("2"), rounding);
        assert_eq!(result.unwrap(), dec("2"));
    }

    #[test]
    fn fixed_pads_to_scale() {
        let fixed = Rounding::default().fixed(dec("8"));
        assert_eq!(fixed.to_string(), "8.00");
        assert_eq!(Rounding::default().fixed(dec("17.905")).to_string(), "17.91");
    }

    #[cfg(feature = "serde")]
    #[test]
    #[allow(deprecated)]
    fn rounding_survives_serde() {
        let strategies = [
            RoundingStrategy::MidpointNearestEven,
            RoundingStrategy::MidpointAwayFromZero,
            RoundingStrategy::MidpointTowardZero,
            RoundingStrategy::ToZero,
            RoundingStrategy::AwayFromZero,
            RoundingStrategy::ToNegativeInfinity,
            RoundingStrategy::ToPositiveInfinity,
            RoundingStrategy::BankersRounding,
            RoundingStrategy::RoundHalfUp,
            RoundingStrategy::RoundHalfDown,
            RoundingStrategy::RoundDown,
            RoundingStrategy::RoundUp,
        ];
        let samples = ["1.005", "-1.005", "1.015", "1.004", "-1.006", "2.5"].map(dec);
        for strategy in strategies {
            let rounding = Rounding::new(2, strategy);
            let json = serde_json::to_string(&rounding).unwrap();
            let back: Rounding = serde_json::from_str(&json).unwrap();
            assert_eq!(back.scale, 2);
            for sample in samples {
                assert_eq!(back.round(sample), rounding.round(sample), "{json} {sample}");
            }
        }
        let half_down = Rounding::new(2, RoundingStrategy::RoundHalfDown);
        let json = serde_json::to_string(&half_down).unwrap();
        assert_eq!(json, r#"{"scale":2,"strategy":"half_down"}"#);
        assert!(serde_json::from_str::<Rounding>(r#"{"scale":2,"strategy":"sideways"}"#).is_err());
    }

    #[test]
    fn parse_symbols() {
        assert_eq!("+".parse::<Operator>().unwrap(), Operator::Add);
        assert_eq!(" / ".parse::<Operator>().unwrap(), Operator::Divide);
        assert_eq!(Operator::try_from('*').unwrap(), Operator::Multiply);
        assert_eq!(
            "%".parse::<Operator>(),
            Err(Error::InvalidOperator("%".into()))
        );
        assert_eq!(
            "++".parse::<Operator>(),
            Err(Error::InvalidOperator("++".into()))
        );
        assert_eq!(Operator::Subtract.to_string(), "-");
    }
}
