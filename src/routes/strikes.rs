//! Strike report view. Strikes are read-only here.

use askama::Template;
use axum::{extract::State, response::Html};

use crate::charts::build_bar_chart;
use crate::errors::AppError;
use crate::models::Strike;
use crate::AppState;

#[derive(Template)]
#[template(path = "strikes.html")]
struct StrikesTemplate {
    strikes: Vec<Strike>,
    chart_uri: String,
}

/// GET /displayStrikes/ - strike table plus chart.
pub async fn display_strikes(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let strikes = state.repo.list_strikes().await?;

    let labels: Vec<String> = strikes.iter().map(|s| s.user_id.clone()).collect();
    let values: Vec<i64> = strikes.iter().map(|s| s.count).collect();
    let chart_uri = build_bar_chart(&labels, &values, "User", "Strikes", "Strikes per user")?;

    super::render(&StrikesTemplate { strikes, chart_uri })
}
