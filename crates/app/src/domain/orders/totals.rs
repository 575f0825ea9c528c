//! Order total calculation.

/// Sum of `price × quantity` over the given lines, in minor units.
///
/// Returns `None` if the sum does not fit in a `u64`.
#[must_use]
pub fn order_total<I>(lines: I) -> Option<u64>
where
    I: IntoIterator<Item = (u64, u32)>,
{
    lines.into_iter().try_fold(0_u64, |total, (price, quantity)| {
        price
            .checked_mul(u64::from(quantity))
            .and_then(|line| total.checked_add(line))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_order_totals_zero() {
        assert_eq!(order_total([]), Some(0));
    }

    #[test]
    fn sums_price_times_quantity() {
        assert_eq!(order_total([(1_250, 2), (99, 3), (10_000, 1)]), Some(12_797));
    }

    #[test]
    fn zero_priced_lines_contribute_nothing() {
        assert_eq!(order_total([(0, 40), (500, 1)]), Some(500));
    }

    #[test]
    fn multiplication_overflow_is_reported() {
        assert_eq!(order_total([(u64::MAX, 2)]), None);
    }

    #[test]
    fn addition_overflow_is_reported() {
        assert_eq!(order_total([(u64::MAX, 1), (1, 1)]), None);
    }
}
