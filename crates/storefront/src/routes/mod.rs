//! HTTP page controllers for the storefront.
//!
//! Each page type from the original site maps to a controller that calls
//! the core's initialization and mutation entry points and returns a JSON
//! view model; rendering is the client's concern. Mutating responses carry
//! the drained notification queue so the client can show toasts.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Home page (featured products)
//! GET  /health           - Health check
//!
//! # Products
//! GET  /products         - Product listing, filtered by ?category= and ?q=
//!
//! # Cart
//! GET  /cart             - Cart page (line items + totals)
//! POST /cart/add         - Add a product to the cart
//! POST /cart/update      - Adjust a line item quantity by a delta
//! POST /cart/remove      - Remove a line item
//! GET  /cart/count       - Cart count badge
//! POST /checkout         - Demo checkout (notification only)
//!
//! # Contact
//! GET  /contact          - Contact page (badge count, theme)
//! POST /contact          - Contact form submission with field validation
//!
//! # Theme
//! POST /theme/toggle     - Flip and persist the theme preference
//! ```

pub mod cart;
pub mod contact;
pub mod home;
pub mod products;
pub mod theme;

use axum::{
    Router,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::notify::{Severity, TOAST_DURATION};
use crate::state::AppState;

/// A pending toast for the view, with its fixed display duration.
#[derive(Debug, Clone, Serialize)]
pub struct ToastView {
    pub message: String,
    pub severity: Severity,
    /// How long the client keeps the toast visible, in milliseconds.
    pub duration_ms: u64,
}

/// Drain pending notifications into view form.
pub fn drain_toasts(state: &AppState) -> Vec<ToastView> {
    state
        .notifier()
        .drain()
        .into_iter()
        .map(|n| ToastView {
            message: n.message,
            severity: n.severity,
            duration_ms: u64::try_from(TOAST_DURATION.as_millis()).unwrap_or(u64::MAX),
        })
        .collect()
}

/// Format a decimal amount as a two-decimal price string.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product listing
        .route("/products", get(products::index))
        // Cart routes
        .nest("/cart", cart_routes())
        // Demo checkout
        .route("/checkout", post(cart::checkout))
        // Contact page and form
        .route("/contact", get(contact::show).post(contact::submit))
        // Theme preference
        .route("/theme/toggle", post(theme::toggle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price(Decimal::new(500, 0)), "$500.00");
        assert_eq!(format_price(Decimal::new(1000, 2)), "$10.00");
        assert_eq!(format_price(Decimal::new(104_998, 2)), "$1049.98");
        assert_eq!(format_price(Decimal::ZERO), "$0.00");
    }
}
