//! Editor configuration.
//!
//! Hosts may pass a JSON object to override any subset of the defaults:
//!
//! ```json
//! { "canvas": { "width": 720, "height": 600 }, "coarseStep": 20 }
//! ```

use crate::geometry::{CanvasSize, Footprint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub canvas: CanvasSize,
    pub footprint: Footprint,
    /// Keyboard nudge distance without the coarse modifier.
    pub fine_step: f64,
    /// Keyboard nudge distance with the coarse modifier (Shift).
    pub coarse_step: f64,
    /// Device-pixel multiplier for PDF rasterization.
    pub export_scale: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            footprint: Footprint::default(),
            fine_step: 1.0,
            coarse_step: 10.0,
            export_scale: 2.0,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = EditorConfig::from_json(r#"{"coarseStep": 20, "unknown": true}"#).unwrap();
        assert_eq!(cfg.coarse_step, 20.0);
        assert_eq!(cfg.fine_step, 1.0);
        assert_eq!(cfg.footprint, Footprint::default());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(EditorConfig::from_json(r#"{"fineStep": "big"}"#).is_err());
    }
}
