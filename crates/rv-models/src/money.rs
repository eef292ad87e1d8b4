//! Money arithmetic that stays inside the `Decimal` range

use rust_decimal::Decimal;

/// Sum of `amounts`, or `None` when it leaves the `Decimal` range
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts.into_iter().try_fold(Decimal::ZERO, Decimal::checked_add)
}

/// Sum of `amounts`, clamped to the `Decimal` range
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `100 * part / whole`, or zero when `whole` is zero.
///
/// Divides first when the product is out of range and clamps when the
/// ratio itself is.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .or_else(|| {
            part.checked_div(whole)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        })
        .unwrap_or(if part.is_sign_negative() == whole.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(exponent: u32) -> Decimal {
        Decimal::from_i128_with_scale(10i128.pow(exponent), 0)
    }

    #[test]
    fn test_checked_sum_detects_overflow() {
        let half = Decimal::from_i128_with_scale(5 * 10i128.pow(28), 0);
        assert_eq!(checked_sum([half, half]), None);
        assert_eq!(checked_sum([Decimal::from(2), Decimal::from(3)]), Some(Decimal::from(5)));
        assert_eq!(checked_sum(Vec::new()), Some(Decimal::ZERO));
    }

    #[test]
    fn test_saturating_sum_clamps() {
        let half = Decimal::from_i128_with_scale(5 * 10i128.pow(28), 0);
        assert_eq!(saturating_sum([half, half]), Decimal::MAX);
    }

    #[test]
    fn test_percentage_of_large_amounts() {
        assert_eq!(percentage(big(27), big(27)), Decimal::ONE_HUNDRED);
        assert_eq!(percentage(big(27), big(27) * Decimal::from(4)), Decimal::from(25));
        assert_eq!(percentage(Decimal::MAX, Decimal::new(1, 20)), Decimal::MAX);
    }

    #[test]
    fn test_percentage_of_small_amounts() {
        assert_eq!(percentage(Decimal::from(1), Decimal::from(3)).round_dp(2), Decimal::new(3333, 2));
        assert_eq!(percentage(Decimal::from(5), Decimal::ZERO), Decimal::ZERO);
    }
}
