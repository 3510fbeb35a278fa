use super::collapse::{Canonical, CanonicalMap};
use super::composite::{CompositeUnit, UnitBag};
use crate::error::ConvertError;

/// Rewrites every symbol to its representative, folding the factors into the
/// coefficient, then cancels units shared by numerator and denominator.
pub fn normalize(
    unit: &CompositeUnit,
    canonical: &CanonicalMap,
) -> Result<CompositeUnit, ConvertError> {
    let mut coefficient = unit.coefficient.clone();
    let mut numerator = UnitBag::new();
    let mut denominator = UnitBag::new();

    for symbol in unit.numerator.iter() {
        let entry = lookup(canonical, symbol)?;
        coefficient *= &entry.factor;
        numerator.insert(entry.representative.as_str());
    }
    for symbol in unit.denominator.iter() {
        let entry = lookup(canonical, symbol)?;
        coefficient /= &entry.factor;
        denominator.insert(entry.representative.as_str());
    }

    numerator.cancel(&mut denominator);
    Ok(CompositeUnit {
        coefficient,
        numerator,
        denominator,
    })
}

fn lookup<'a>(
    canonical: &'a CanonicalMap,
    symbol: &str,
) -> Result<&'a Canonical, ConvertError> {
    canonical
        .get(symbol)
        .ok_or_else(|| ConvertError::UnknownMeasure(symbol.to_owned()))
}
