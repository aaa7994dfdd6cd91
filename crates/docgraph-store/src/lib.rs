//! DocGraph Store: in-memory node/edge graph, radial layout, seed ontology, search.

pub mod graph;
pub mod layout;
pub mod review;
pub mod search;
pub mod seed;
pub mod types;

pub use graph::GraphStore;
pub use layout::{LayoutGroup, Position};
pub use review::{ReviewDecision, ReviewItem, ReviewQueue, ReviewStatus};
pub use search::SearchResult;
pub use types::*;
