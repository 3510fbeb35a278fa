use super::collapse::CanonicalMap;
use super::composite::{CompositeUnit, UnitBag};
use crate::error::ConvertError;

/// The set of unit symbols an expression may use.
pub trait KnownUnits {
    fn is_known(&self, symbol: &str) -> bool;
}

impl KnownUnits for CanonicalMap {
    fn is_known(&self, symbol: &str) -> bool {
        self.contains(symbol)
    }
}

/// Parses `a*b/c*d` into a composite unit.
///
/// Tokens are trimmed; empty tokens and `1` are dropped. An empty string is the
/// dimensionless unit. More than one `/` is rejected outright.
pub fn parse<K>(text: &str, known: &K) -> Result<CompositeUnit, ConvertError>
where
    K: KnownUnits + ?Sized,
{
    let mut sides = text.split('/');
    let numerator = sides.next().unwrap_or("");
    let denominator = sides.next();
    if sides.next().is_some() {
        return Err(ConvertError::MalformedExpression(text.to_owned()));
    }

    let numerator = parse_product(numerator, known)?;
    let denominator = match denominator {
        Some(side) => parse_product(side, known)?,
        None => UnitBag::new(),
    };
    Ok(CompositeUnit::new(numerator, denominator))
}

fn parse_product<K>(side: &str, known: &K) -> Result<UnitBag, ConvertError>
where
    K: KnownUnits + ?Sized,
{
    let mut bag = UnitBag::new();
    for token in side.split('*').map(str::trim) {
        if token.is_empty() || token == "1" {
            continue;
        }
        if !known.is_known(token) {
            return Err(ConvertError::UnknownMeasure(token.to_owned()));
        }
        bag.insert(token);
    }
    Ok(bag)
}
