//! DocGraph server: axum HTTP API over the document graph.

pub mod error;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
