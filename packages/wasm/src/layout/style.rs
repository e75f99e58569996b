//! Drawing hints for nodes and edges.
//!
//! The focal starter is drawn larger, with a heavier stroke and an inner
//! dot. That treatment is layered over the node's palette color: the color
//! marks the lineage branch, the style marks the current subject.

use serde::{Deserialize, Serialize};

use super::level::Point;

/// Node sizing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeStyleConfig {
    pub radius: f32,
    pub stroke_width: f32,
    pub focal_radius: f32,
    pub focal_stroke_width: f32,
    pub focal_dot_radius: f32,
}

impl Default for NodeStyleConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            stroke_width: 2.0,
            focal_radius: 12.0,
            focal_stroke_width: 3.0,
            focal_dot_radius: 6.0,
        }
    }
}

impl NodeStyleConfig {
    /// Style for a regular or focal node.
    pub fn style_for(&self, focal: bool) -> NodeStyle {
        if focal {
            NodeStyle {
                radius: self.focal_radius,
                stroke_width: self.focal_stroke_width,
                inner_dot_radius: Some(self.focal_dot_radius),
            }
        } else {
            NodeStyle {
                radius: self.radius,
                stroke_width: self.stroke_width,
                inner_dot_radius: None,
            }
        }
    }
}

/// Resolved drawing style of one node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub radius: f32,
    pub stroke_width: f32,
    /// Only the focal node has an inner dot.
    pub inner_dot_radius: Option<f32>,
}

/// SVG path data for a vertical cubic curve from `source` to `target`.
///
/// Both control points sit on the horizontal midline between the ends.
pub fn edge_path(source: Point, target: Point) -> String {
    let mid_y = (source.y + target.y) / 2.0;
    format!(
        "M{},{} C{},{} {},{} {},{}",
        source.x, source.y, source.x, mid_y, target.x, mid_y, target.x, target.y
    )
}
