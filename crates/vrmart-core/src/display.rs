//! Declared viewer metadata for 3D models.
//!
//! Each item carries the scale it should be rendered at. Uploaded models
//! without an authored scale are fitted to the viewport from their bounding
//! box instead.

use serde::{Deserialize, Serialize};

/// Scale applied when an item declares nothing else.
pub const DEFAULT_MODEL_SCALE: f32 = 8.0;

/// Largest dimension an auto-fitted model occupies in scene units.
const VIEWPORT_EXTENT: f32 = 3.0;

/// Axis-aligned bounding box in model units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    pub fn max_dimension(&self) -> f32 {
        let [x, y, z] = self.size();
        x.max(y).max(z)
    }
}

/// Scale and offset handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerPlacement {
    pub scale: f32,
    pub position: [f32; 3],
}

/// Authored display metadata for a model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelDisplay {
    pub scale: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
}

impl Default for ModelDisplay {
    fn default() -> Self {
        Self {
            scale: DEFAULT_MODEL_SCALE,
            bounds: None,
        }
    }
}

impl ModelDisplay {
    /// Display metadata with an authored scale.
    pub fn with_scale(scale: f32) -> Self {
        Self {
            scale,
            bounds: None,
        }
    }

    /// Display metadata for an uploaded model, fitted from its bounds.
    pub fn fitted(bounds: BoundingBox) -> Self {
        Self {
            scale: Self::fit_to_viewport(&bounds).scale,
            bounds: Some(bounds),
        }
    }

    /// Fit a model into the viewport and center it on the origin.
    ///
    /// A degenerate box keeps unit scale.
    pub fn fit_to_viewport(bounds: &BoundingBox) -> ViewerPlacement {
        let max_dimension = bounds.max_dimension();
        let scale = if max_dimension > 0.0 {
            VIEWPORT_EXTENT / max_dimension
        } else {
            1.0
        };
        let [cx, cy, cz] = bounds.center();
        ViewerPlacement {
            scale,
            position: [-cx * scale, -cy * scale, -cz * scale],
        }
    }

    /// Placement for the renderer.
    ///
    /// Models with known bounds are centered; otherwise they sit at the origin.
    pub fn placement(&self) -> ViewerPlacement {
        match &self.bounds {
            Some(bounds) => {
                let [cx, cy, cz] = bounds.center();
                ViewerPlacement {
                    scale: self.scale,
                    position: [-cx * self.scale, -cy * self.scale, -cz * self.scale],
                }
            }
            None => ViewerPlacement {
                scale: self.scale,
                position: [0.0, 0.0, 0.0],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_to_viewport() {
        let bounds = BoundingBox::new([0.0, 0.0, 0.0], [6.0, 2.0, 1.0]);
        let placement = ModelDisplay::fit_to_viewport(&bounds);
        assert_eq!(placement.scale, 0.5);
        assert_eq!(placement.position, [-1.5, -0.5, -0.25]);
    }

    #[test]
    fn test_fit_degenerate_box() {
        let bounds = BoundingBox::new([1.0, 1.0, 1.0], [1.0, 1.0, 1.0]);
        assert_eq!(ModelDisplay::fit_to_viewport(&bounds).scale, 1.0);
    }

    #[test]
    fn test_authored_scale_without_bounds() {
        let display = ModelDisplay::with_scale(45.0);
        let placement = display.placement();
        assert_eq!(placement.scale, 45.0);
        assert_eq!(placement.position, [0.0, 0.0, 0.0]);
        assert_eq!(ModelDisplay::default().scale, DEFAULT_MODEL_SCALE);
    }
}
