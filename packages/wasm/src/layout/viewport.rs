//! Viewport fitting.
//!
//! Layout coordinates are centered on x = 0 with the root at y = 0. The
//! viewport gives the renderer a padded canvas size and the translation
//! that moves the top-left node to `(padding, padding)`.

use serde::{Deserialize, Serialize};

use super::level::Point;

/// Viewport sizing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Space kept around the outermost nodes.
    pub padding: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            padding: 80.0,
            min_width: 300.0,
            min_height: 200.0,
        }
    }
}

/// Canvas extent for a laid-out tree.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
    pub width: f32,
    pub height: f32,
    /// Add to a layout x to get a canvas x.
    pub offset_x: f32,
    /// Add to a layout y to get a canvas y.
    pub offset_y: f32,
}

impl Viewport {
    /// Fit a viewport around the given points. No points gives a zero viewport.
    pub fn fit<I>(points: I, config: &ViewportConfig) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        let mut any = false;

        for p in points {
            any = true;
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        if !any {
            return Self::default();
        }

        let padding = config.padding;
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            width: (max_x - min_x + padding * 2.0).max(config.min_width),
            height: (max_y - min_y + padding * 2.0).max(config.min_height),
            offset_x: padding - min_x,
            offset_y: padding - min_y,
        }
    }
}
