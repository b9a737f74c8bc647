//! Theme toggle controller.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use smartcart_core::Theme;

use crate::error::Result;
use crate::state::AppState;

/// Theme view model.
#[derive(Debug, Serialize)]
pub struct ThemeView {
    pub theme: Theme,
}

/// Flip the theme preference and persist it.
#[instrument(skip(state))]
pub async fn toggle(State(state): State<AppState>) -> Result<Json<ThemeView>> {
    let theme = state.theme().toggle()?;
    Ok(Json(ThemeView { theme }))
}
