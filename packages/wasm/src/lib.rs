//! Starter Lineage - WASM Module
//!
//! This module lays out the family tree of a fermentation starter. It takes
//! the flat node and edge lists returned by the lineage API and produces node
//! positions, connecting edges and stable per-node colors for the renderer.
//! It is compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen.
//!
//! # Architecture
//!
//! - `model`: API payload types (starters, edges, tree response)
//! - `tree`: Rooted tree reconstruction on a petgraph StableGraph arena
//! - `layout`: Breadth-first level layout, palette colors, styles, viewport
//! - `spatial`: R-tree spatial indexing for O(log n) hit testing
//! - `view`: The composed, render-ready family tree

use js_sys::Float32Array;
use log::Level;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod layout;
pub mod model;
pub mod spatial;
pub mod tree;
pub mod view;

pub use error::{Error, Result};
use model::{StarterId, TreeResponse};
use view::{FamilyTreeConfig, FamilyTreeView};

/// Initialize the WASM module: panic hook and console logger.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(Level::Info).is_err() {
        web_sys::console::warn_1(&"starter-lineage: logger already initialized".into());
    }
}

/// Split a starter URL slug into its three identifier words.
///
/// Returns undefined when the slug is not fifteen characters (dashes ignored).
#[wasm_bindgen(js_name = parseStarterSlug)]
pub fn parse_starter_slug(slug: &str) -> Option<Vec<String>> {
    StarterId::parse_slug(slug).map(|id| id.0)
}

/// Main entry point for laying out a family tree.
///
/// This struct wraps one computed [`FamilyTreeView`]. It is immutable: when
/// the tree payload or the focal starter changes, construct a new one and
/// drop the old.
#[wasm_bindgen]
pub struct FamilyTreeWasm {
    view: FamilyTreeView,
}

#[wasm_bindgen]
impl FamilyTreeWasm {
    /// Lay out a tree response.
    ///
    /// # Arguments
    ///
    /// * `tree` - The `/tree` endpoint payload `{ nodes, edges, truncated? }`
    /// * `focal_id` - Joined key of the starter being viewed (optional; falls
    ///   back to the nodes flagged `is_target`)
    /// * `config` - Optional `{ layout, viewport, style }` overrides
    #[wasm_bindgen(constructor)]
    pub fn new(
        tree: JsValue,
        focal_id: Option<String>,
        config: JsValue,
    ) -> std::result::Result<FamilyTreeWasm, JsError> {
        let response: TreeResponse = serde_wasm_bindgen::from_value(tree)?;
        let config: FamilyTreeConfig = if config.is_undefined() || config.is_null() {
            FamilyTreeConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };

        let view = FamilyTreeView::build(&response, focal_id.as_deref(), &config)?;
        Ok(Self { view })
    }

    // =========================================================================
    // Summary
    // =========================================================================

    /// Get the number of laid-out nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.view.nodes().len() as u32
    }

    /// Get the number of laid-out edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.view.edges().len() as u32
    }

    /// Whether there is nothing to show.
    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Whether the API capped the tree.
    #[wasm_bindgen(js_name = isTruncated)]
    pub fn is_truncated(&self) -> bool {
        self.view.is_truncated()
    }

    /// Key of the root starter, or undefined for an empty tree.
    #[wasm_bindgen(js_name = rootId)]
    pub fn root_id(&self) -> Option<String> {
        self.view.root().map(|node| node.id.clone())
    }

    // =========================================================================
    // Layout Output
    // =========================================================================

    /// Laid-out nodes as plain objects.
    pub fn nodes(&self) -> std::result::Result<JsValue, JsError> {
        to_js(self.view.nodes())
    }

    /// Laid-out edges as plain objects, each with SVG path data.
    pub fn edges(&self) -> std::result::Result<JsValue, JsError> {
        to_js(self.view.edges())
    }

    /// Palette colors keyed by starter id, for every input starter.
    pub fn colors(&self) -> std::result::Result<JsValue, JsError> {
        to_js(self.view.colors())
    }

    /// Padded canvas extent and layout → canvas offset.
    pub fn viewport(&self) -> std::result::Result<JsValue, JsError> {
        to_js(self.view.viewport())
    }

    /// Node positions as [x0, y0, x1, y1, ...] in node order.
    pub fn positions(&self) -> Float32Array {
        Float32Array::from(&self.view.positions()[..])
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Find the starter under a point (layout coordinates).
    ///
    /// Returns the starter id, or undefined if no node is within the distance.
    #[wasm_bindgen(js_name = findNodeAt)]
    pub fn find_node_at(&self, x: f32, y: f32, max_distance: f32) -> Option<String> {
        self.view
            .node_at(x, y, max_distance)
            .map(|node| node.id.clone())
    }
}

/// Serialize to plain JS objects (maps become objects, not `Map`s).
fn to_js<T: Serialize + ?Sized>(value: &T) -> std::result::Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}
