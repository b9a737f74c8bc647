//! Cart totals computation.
//!
//! Pure functions of cart state; the storefront recomputes totals after
//! every cart mutation and on initial render. Values keep full decimal
//! precision - rounding to two places is a display concern.

use rust_decimal::Decimal;

use super::cart::Cart;

/// Flat shipping fee charged on any non-empty cart, in currency units.
pub const DEFAULT_SHIPPING_FEE: Decimal = Decimal::from_parts(1000, 0, 0, false, 2);

/// Monetary totals derived from the current cart contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum over line items of unit price times quantity.
    pub subtotal: Decimal,
    /// Flat fee when the subtotal is positive, zero otherwise.
    pub shipping: Decimal,
    /// Subtotal plus shipping.
    pub total: Decimal,
}

impl Totals {
    /// Compute totals for `cart` with the given flat shipping fee.
    #[must_use]
    pub fn compute(cart: &Cart, shipping_fee: Decimal) -> Self {
        let subtotal: Decimal = cart
            .items()
            .iter()
            .map(|item| item.product.price * Decimal::from(item.quantity))
            .sum();

        let shipping = if subtotal > Decimal::ZERO {
            shipping_fee
        } else {
            Decimal::ZERO
        };

        Self {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}
