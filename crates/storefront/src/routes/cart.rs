//! Cart page controllers.
//!
//! Every mutation goes through the cart store, which persists write-through
//! and queues notifications; the response carries the refreshed cart view,
//! recomputed totals, and the drained toasts.

use axum::{Form, Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use smartcart_core::{CartLineItem, ProductId, Totals};

use crate::error::Result;
use crate::notify::Severity;
use crate::routes::{ToastView, drain_toasts, format_price};
use crate::state::AppState;

/// Cart line item display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_price: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        let line_total = item.product.price * rust_decimal::Decimal::from(item.quantity);
        Self {
            id: item.id().as_i64(),
            name: item.product.name.clone(),
            image: item.product.image.clone(),
            price: format_price(item.product.price),
            quantity: item.quantity,
            line_price: format_price(line_total),
        }
    }
}

/// Cart totals display data, rounded to two decimals for display only.
#[derive(Debug, Clone, Serialize)]
pub struct TotalsView {
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

impl From<Totals> for TotalsView {
    fn from(totals: Totals) -> Self {
        Self {
            subtotal: format_price(totals.subtotal),
            shipping: format_price(totals.shipping),
            total: format_price(totals.total),
        }
    }
}

/// Cart page view model.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub totals: TotalsView,
    pub item_count: u64,
    pub can_checkout: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub toasts: Vec<ToastView>,
}

/// Build the cart view from current state.
fn cart_view(state: &AppState) -> CartView {
    let cart = state.cart();
    let totals = Totals::compute(cart.cart(), state.config().shipping_fee);
    let items: Vec<CartItemView> = cart.items().iter().map(CartItemView::from).collect();
    let item_count = cart.total_item_count();
    drop(cart);

    let empty = items.is_empty();
    CartView {
        items,
        totals: totals.into(),
        item_count,
        can_checkout: !empty,
        empty_message: empty.then(|| "Your cart is empty. Start shopping!".to_owned()),
        toasts: drain_toasts(state),
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i64,
    /// Signed quantity adjustment; dropping to zero or below removes.
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i64,
}

/// Cart count badge view model.
#[derive(Debug, Serialize)]
pub struct CartCountView {
    pub count: u64,
}

/// Display the cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    // Ensure the catalog is loaded before first render, like every page.
    let _ = state.catalog().load().await;
    Json(cart_view(&state))
}

/// Add a product to the cart.
///
/// An unknown product id leaves the cart unchanged and carries an error
/// toast in the response.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Json<CartView>> {
    let catalog = state.catalog().load().await;
    state
        .cart()
        .add_item(catalog, ProductId::new(form.product_id))?;

    Ok(Json(cart_view(&state)))
}

/// Adjust a line item quantity by a signed delta.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Json<CartView>> {
    state
        .cart()
        .change_quantity(ProductId::new(form.product_id), form.delta)?;

    Ok(Json(cart_view(&state)))
}

/// Remove a line item from the cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Json<CartView>> {
    state.cart().remove_item(ProductId::new(form.product_id))?;

    Ok(Json(cart_view(&state)))
}

/// Cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    Json(CartCountView {
        count: state.cart().total_item_count(),
    })
}

/// Demo checkout: emits a notification and changes no state.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> impl IntoResponse {
    state.notifier().notify(
        "Proceeding to checkout (not functional in this demo).",
        Severity::Success,
    );
    Json(cart_view(&state))
}
