//! Product listing page controller.
//!
//! Recomputes the filtered view on every request; the `category` query
//! parameter doubles as the navigation-link seed for the initial filter
//! selection.

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use smartcart_core::{CategorySelector, Product, category_options, filter_products};

use crate::routes::{ToastView, drain_toasts, format_price};
use crate::state::AppState;

/// Product display data for views.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub description: String,
    pub rating: f32,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            price: format_price(product.price),
            image: product.image.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            rating: product.rating,
        }
    }
}

/// Listing filter query parameters.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    /// Category selector; `"all"` or absent means no restriction.
    pub category: Option<String>,
    /// Free-text search term.
    pub q: Option<String>,
}

/// Product listing view model.
#[derive(Debug, Serialize)]
pub struct ListingView {
    pub products: Vec<ProductView>,
    /// Selectable category options, `"all"` first.
    pub categories: Vec<String>,
    /// The selector applied to this view.
    pub selected_category: String,
    /// The search term applied to this view.
    pub search: String,
    pub cart_count: u64,
    pub toasts: Vec<ToastView>,
}

/// Display the product listing, filtered by category and search term.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let catalog = state.catalog().load().await;

    let selector = CategorySelector::parse(query.category.as_deref().unwrap_or_default());
    let search = query.q.unwrap_or_default();

    let products = filter_products(catalog, &selector, &search)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Json(ListingView {
        products,
        categories: category_options(catalog),
        selected_category: selector.as_str().to_owned(),
        search,
        cart_count: state.cart().total_item_count(),
        toasts: drain_toasts(&state),
    })
}
