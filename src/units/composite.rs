use std::collections::BTreeMap;
use std::fmt;

use num_traits::One;

use crate::math::Num;

/// Multiset of unit symbols, stored as symbol -> multiplicity.
///
/// Entries never hold a zero count, so two bags compare equal exactly when
/// they contain the same symbols with the same multiplicities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitBag {
    counts: BTreeMap<String, usize>,
}

impl UnitBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>) {
        *self.counts.entry(symbol.into()).or_insert(0) += 1;
    }

    /// Removes one occurrence, returns false if the symbol was absent.
    pub fn remove_one(&mut self, symbol: &str) -> bool {
        match self.counts.get_mut(symbol) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.counts.remove(symbol);
                true
            }
            None => false,
        }
    }

    pub fn count(&self, symbol: &str) -> usize {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.counts.contains_key(symbol)
    }

    /// Total number of occurrences.
    pub fn len(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct symbols with their multiplicities, in symbol order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(s, c)| (s.as_str(), *c))
    }

    /// Every occurrence, repeated symbols yielded once per count.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries()
            .flat_map(|(s, c)| std::iter::repeat(s).take(c))
    }

    /// Removes the multiset intersection of `self` and `other` from both.
    pub fn cancel(&mut self, other: &mut UnitBag) {
        let shared: Vec<(String, usize)> = self
            .counts
            .iter()
            .filter_map(|(s, &c)| {
                let common = c.min(other.count(s));
                (common > 0).then(|| (s.clone(), common))
            })
            .collect();

        for (symbol, common) in shared {
            for _ in 0..common {
                self.remove_one(&symbol);
                other.remove_one(&symbol);
            }
        }
    }
}

impl<S: Into<String>> FromIterator<S> for UnitBag {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut bag = UnitBag::new();
        for symbol in iter {
            bag.insert(symbol);
        }
        bag
    }
}

impl fmt::Display for UnitBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "1");
        }
        let symbols: Vec<&str> = self.iter().collect();
        write!(f, "{}", symbols.join("*"))
    }
}

/// A product/quotient of units with a running coefficient, e.g. `km*s/h`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeUnit {
    pub coefficient: Num,
    pub numerator: UnitBag,
    pub denominator: UnitBag,
}

impl Default for CompositeUnit {
    fn default() -> Self {
        Self {
            coefficient: Num::one(),
            numerator: UnitBag::new(),
            denominator: UnitBag::new(),
        }
    }
}

impl CompositeUnit {
    pub fn new(numerator: UnitBag, denominator: UnitBag) -> Self {
        Self {
            coefficient: Num::one(),
            numerator,
            denominator,
        }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.numerator.is_empty() && self.denominator.is_empty()
    }

    /// Same units on both sides, coefficient ignored.
    pub fn same_units(&self, other: &CompositeUnit) -> bool {
        self.numerator == other.numerator && self.denominator == other.denominator
    }
}

impl fmt::Display for CompositeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.numerator)?;
        if !self.denominator.is_empty() {
            write!(f, "/{}", self.denominator)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bag_counts_multiplicity() {
        let bag: UnitBag = ["m", "s", "m"].into_iter().collect();
        assert_eq!(bag.count("m"), 2);
        assert_eq!(bag.count("s"), 1);
        assert_eq!(bag.count("kg"), 0);
        assert_eq!(bag.len(), 3);
        assert_eq!(bag.iter().collect::<Vec<_>>(), vec!["m", "m", "s"]);
    }

    #[test]
    fn remove_one_drops_empty_entries() {
        let mut bag: UnitBag = ["m", "m"].into_iter().collect();
        assert!(bag.remove_one("m"));
        assert!(bag.contains("m"));
        assert!(bag.remove_one("m"));
        assert!(!bag.contains("m"));
        assert!(!bag.remove_one("m"));
        assert_eq!(bag, UnitBag::new());
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: UnitBag = ["km", "s", "min"].into_iter().collect();
        let b: UnitBag = ["min", "km", "s"].into_iter().collect();
        assert_eq!(a, b);

        let c: UnitBag = ["s", "s"].into_iter().collect();
        let d: UnitBag = ["s"].into_iter().collect();
        assert_ne!(c, d);
    }

    #[test]
    fn cancel_removes_intersection() {
        let mut num: UnitBag = ["m", "m", "s"].into_iter().collect();
        let mut den: UnitBag = ["m", "s", "s", "kg"].into_iter().collect();
        num.cancel(&mut den);
        assert_eq!(num, ["m"].into_iter().collect::<UnitBag>());
        assert_eq!(den, ["s", "kg"].into_iter().collect::<UnitBag>());
    }

    #[test]
    fn display() {
        let unit = CompositeUnit::new(
            ["m", "m"].into_iter().collect(),
            ["s"].into_iter().collect(),
        );
        assert_eq!(unit.to_string(), "m*m/s");
        assert_eq!(CompositeUnit::default().to_string(), "1");
        assert!(CompositeUnit::default().is_dimensionless());

        let inverse = CompositeUnit::new(UnitBag::new(), ["s"].into_iter().collect());
        assert_eq!(inverse.to_string(), "1/s");
    }
}
