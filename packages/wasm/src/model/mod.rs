//! Input data model.
//!
//! These types mirror the JSON returned by the lineage API and are
//! deserialized with serde. Nothing in here is mutated by the engine.

mod edge;
mod response;
mod starter;

pub use edge::LineageEdge;
pub use response::TreeResponse;
pub use starter::{GeoPoint, KEY_SEPARATOR, StarterId, StarterNode, StarterType};
