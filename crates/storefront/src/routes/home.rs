//! Home page controller.

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use tracing::instrument;

use crate::routes::products::ProductView;
use crate::routes::{ToastView, drain_toasts};
use crate::state::AppState;

/// Number of catalog products featured on the home page.
const FEATURED_COUNT: usize = 4;

/// Home page view model.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub featured: Vec<ProductView>,
    pub cart_count: u64,
    pub theme: smartcart_core::Theme,
    pub toasts: Vec<ToastView>,
}

/// Display the home page with the first few catalog products featured.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog().load().await;
    let featured = catalog.iter().take(FEATURED_COUNT).map(ProductView::from).collect();

    Json(HomeView {
        featured,
        cart_count: state.cart().total_item_count(),
        theme: state.theme().current(),
        toasts: drain_toasts(&state),
    })
}
