use crate::modules::zoom::controller::create_signature;
use crate::state::AppState;
use axum::{Router, routing::post};

pub fn init_zoom_router() -> Router<AppState> {
    Router::new().route("/signature", post(create_signature))
}
