//! HTTP route handlers.
//!
//! Handlers parse the request, consult the authorization state, call into the
//! repository, and pick a view. Admin gating happens in the `require_admin`
//! middleware before any handler in `topics` or `strikes` runs.

mod index;
mod session;
mod strikes;
mod topics;

pub use index::*;
pub use session::*;
pub use strikes::*;
pub use topics::*;

use askama::Template;
use axum::response::Html;

use crate::errors::AppError;

/// Render a template into an HTML response.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}
