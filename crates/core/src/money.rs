//! Decimal price arithmetic for carts and orders.
//!
//! All amounts are `rust_decimal::Decimal` end to end; nothing here touches
//! floating point. Rounding is half-up (midpoint away from zero) to two
//! decimals, applied once when totals are produced. Amounts cross the
//! storage/rendering boundary as two-decimal strings via [`format_amount`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A cart line carrying everything the price snapshot needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    /// Base price of the product.
    pub price: Decimal,
    /// Sale price, when one is set. Takes precedence over `price`.
    pub sale_price: Option<Decimal>,
    /// Quantity, at least 1.
    pub quantity: i32,
}

impl PricedLine {
    /// The unit price the buyer actually pays.
    #[must_use]
    pub fn effective_unit_price(&self) -> Decimal {
        effective_unit_price(self.price, self.sale_price)
    }

    /// `effective unit price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.effective_unit_price() * Decimal::from(self.quantity)
    }
}

/// Monetary totals copied onto an order row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub total_amount: Decimal,
    /// Discount applied (currently always zero at checkout).
    pub discount_amount: Decimal,
    /// `total_amount - discount_amount`.
    pub final_amount: Decimal,
}

/// Sale price wins when present, otherwise the base price.
#[must_use]
pub fn effective_unit_price(price: Decimal, sale_price: Option<Decimal>) -> Decimal {
    sale_price.unwrap_or(price)
}

/// Round to two decimals, half-up (midpoint away from zero).
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the totals for a set of priced lines.
///
/// The invariant `final_amount == total_amount - discount_amount` holds by
/// construction; all three fields are rounded to two decimals.
#[must_use]
pub fn order_totals(lines: &[PricedLine], discount: Decimal) -> OrderTotals {
    let subtotal: Decimal = lines.iter().map(PricedLine::line_total).sum();
    let total_amount = round_money(subtotal);
    let discount_amount = round_money(discount);
    let final_amount = round_money(total_amount - discount_amount);

    OrderTotals {
        total_amount,
        discount_amount,
        final_amount,
    }
}

/// Render an amount as a two-decimal string, e.g. `"1998.00"`.
///
/// This is the canonical boundary format for monetary values.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_sale_price_wins() {
        assert_eq!(
            effective_unit_price(dec!(999.00), Some(dec!(799.00))),
            dec!(799.00)
        );
        assert_eq!(effective_unit_price(dec!(999.00), None), dec!(999.00));
    }

    #[test]
    fn test_worked_example() {
        // One line: price 999.00, no sale, quantity 2.
        let lines = vec![PricedLine {
            price: dec!(999.00),
            sale_price: None,
            quantity: 2,
        }];
        let totals = order_totals(&lines, Decimal::ZERO);

        assert_eq!(format_amount(totals.total_amount), "1998.00");
        assert_eq!(format_amount(totals.discount_amount), "0.00");
        assert_eq!(format_amount(totals.final_amount), "1998.00");
    }

    #[test]
    fn test_mixed_lines() {
        let lines = vec![
            PricedLine {
                price: dec!(249.50),
                sale_price: Some(dec!(199.99)),
                quantity: 3,
            },
            PricedLine {
                price: dec!(59.00),
                sale_price: None,
                quantity: 1,
            },
        ];
        // 199.99 * 3 + 59.00 = 658.97
        let totals = order_totals(&lines, Decimal::ZERO);
        assert_eq!(totals.total_amount, dec!(658.97));
        assert_eq!(totals.final_amount, dec!(658.97));
    }

    #[test]
    fn test_final_equals_total_minus_discount() {
        let lines = vec![PricedLine {
            price: dec!(500.00),
            sale_price: None,
            quantity: 2,
        }];
        let totals = order_totals(&lines, dec!(100.00));
        assert_eq!(
            totals.final_amount,
            totals.total_amount - totals.discount_amount
        );
        assert_eq!(totals.final_amount, dec!(900.00));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.004)), dec!(1.00));
        assert_eq!(round_money(dec!(2.675)), dec!(2.68));
    }

    #[test]
    fn test_format_amount_pads_to_two_decimals() {
        assert_eq!(format_amount(dec!(1998)), "1998.00");
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(12.5)), "12.50");
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let totals = order_totals(&[], Decimal::ZERO);
        assert_eq!(totals.total_amount, Decimal::ZERO);
        assert_eq!(totals.final_amount, Decimal::ZERO);
    }
}
