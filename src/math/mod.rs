pub type Num = num_rational::BigRational;
pub type NumComponent = num_bigint::BigInt;

#[cfg(test)]
macro_rules! num {
    ($numer:expr, $denom:expr) => {
        $crate::math::Num::new(
            $crate::math::NumComponent::from($numer),
            $crate::math::NumComponent::from($denom),
        )
    };
}
#[cfg(test)]
pub(crate) use num;

pub mod parsefmt;
