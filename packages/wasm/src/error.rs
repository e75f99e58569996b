//! Error type for contract violations.
//!
//! Malformed graph data is never an error here: unknown edge endpoints,
//! duplicate ids and missing roots are all recovered from during
//! reconstruction. Only caller mistakes end up in [`Error`].

/// Errors raised by the lineage engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A spacing constant was zero, negative or not finite.
    #[error("{axis} spacing must be a positive finite number, got {value}")]
    InvalidSpacing {
        /// Which axis the spacing applies to ("horizontal" or "vertical").
        axis: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Layout was requested from a root that is not a node of the tree.
    #[error("layout root {index} is not a node of the reconstructed tree")]
    RootNotInTree {
        /// Raw arena index of the requested root.
        index: usize,
    },

    /// A location did not carry a `[lng, lat]` coordinate pair.
    #[error("location needs [lng, lat] coordinates, got {len} value(s)")]
    InvalidLocation {
        /// Number of coordinates that were supplied.
        len: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
