//! Drafting-standard definition loading and lookup
//!
//! A [`StandardDefinition`] is the single source of presentation attributes:
//! line types with their dash patterns, the logical-role to physical-layer
//! mapping, line weights, text heights and the arrow size. It is loaded
//! once from a JSON document (or taken from the embedded GB definition),
//! then shared read-only by every strategy in a session.
//!
//! Lookups are strict. A missing key is an error, never a silent default:
//! a drawing that falls back to an unconfigured layer or height is no
//! longer standards-compliant, so the failure must surface at the call.

mod roles;

pub use roles::{LayerRole, LineWeightTier, TextHeightTier};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DraftError, Result};

/// Built-in GB (Chinese national standard) definition document
const GB_STANDARD_JSON: &str = include_str!("gb_standard.json");

/// Preferred scale denominators used when a definition omits `scales`
const DEFAULT_SCALES: [u32; 10] = [1, 2, 5, 10, 20, 50, 100, 200, 500, 1000];

static GB: Lazy<Arc<StandardDefinition>> = Lazy::new(|| {
    Arc::new(
        StandardDefinition::from_json_str(GB_STANDARD_JSON)
            .expect("embedded GB standard definition is valid"),
    )
});

/// One line type entry: display description plus dash pattern
///
/// Pattern elements are signed lengths in mm: positive for a dash, negative
/// for a gap, zero for a dot. An empty pattern means a continuous line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineTypeDef {
    /// Display string for the line type
    pub description: String,
    /// Ordered dash/gap/dot lengths
    pub pattern: Vec<f64>,
}

impl LineTypeDef {
    /// Whether this is a continuous (unpatterned) line type
    pub fn is_continuous(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Total pattern length (sum of absolute element lengths)
    pub fn pattern_length(&self) -> f64 {
        self.pattern.iter().map(|e| e.abs()).sum()
    }
}

/// An immutable drafting-standard definition
///
/// Field order is preserved from the source document so that re-serializing
/// a loaded definition reproduces it without reordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StandardDefinition {
    line_types: IndexMap<String, LineTypeDef>,
    layer_mapping: IndexMap<String, String>,
    line_weights: IndexMap<String, f64>,
    text_heights: IndexMap<String, f64>,
    arrow_size: f64,
    font_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scales: Option<Vec<u32>>,
}

impl StandardDefinition {
    /// The embedded GB definition, parsed once and shared
    pub fn gb() -> Arc<StandardDefinition> {
        Arc::clone(&GB)
    }

    /// Load a definition from a JSON string
    pub fn from_json_str(source: &str) -> Result<StandardDefinition> {
        let definition: StandardDefinition = serde_json::from_str(source)?;
        definition.validate()?;
        debug!(
            line_types = definition.line_types.len(),
            layers = definition.layer_mapping.len(),
            "standard definition loaded"
        );
        Ok(definition)
    }

    /// Load a definition from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<StandardDefinition> {
        let source = fs::read_to_string(path)?;
        StandardDefinition::from_json_str(&source)
    }

    /// Serialize the definition back to pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        for (name, def) in &self.line_types {
            if def.pattern.is_empty() && !name.eq_ignore_ascii_case("CONTINUOUS") {
                return Err(DraftError::Config(format!(
                    "line type '{}' has an empty dash pattern",
                    name
                )));
            }
        }
        if !(self.arrow_size.is_finite() && self.arrow_size > 0.0) {
            return Err(DraftError::Config(format!(
                "arrow_size must be positive, got {}",
                self.arrow_size
            )));
        }
        for (tier, weight) in &self.line_weights {
            if !(weight.is_finite() && *weight > 0.0) {
                return Err(DraftError::Config(format!(
                    "line weight '{}' must be positive, got {}",
                    tier, weight
                )));
            }
        }
        for (tier, height) in &self.text_heights {
            if !(height.is_finite() && *height > 0.0) {
                return Err(DraftError::Config(format!(
                    "text height '{}' must be positive, got {}",
                    tier, height
                )));
            }
        }
        Ok(())
    }

    /// Look up a line type by name
    pub fn line_type(&self, name: &str) -> Result<&LineTypeDef> {
        self.line_types.get(name).ok_or_else(|| {
            warn!(name, "line type not defined by the standard");
            DraftError::lookup("line_types", name)
        })
    }

    /// Resolve a logical layer role to its physical layer name
    pub fn layer(&self, role: LayerRole) -> Result<&str> {
        self.layer_for_key(role.key())
    }

    /// Resolve an open-ended role key to its physical layer name
    pub fn layer_for_key(&self, key: &str) -> Result<&str> {
        self.layer_mapping.get(key).map(String::as_str).ok_or_else(|| {
            warn!(role = key, "layer role not mapped by the standard");
            DraftError::lookup("layer_mapping", key)
        })
    }

    /// Look up a line weight tier, in mm
    pub fn line_weight(&self, tier: LineWeightTier) -> Result<f64> {
        self.line_weights.get(tier.key()).copied().ok_or_else(|| {
            warn!(tier = tier.key(), "line weight tier not defined");
            DraftError::lookup("line_weights", tier.key())
        })
    }

    /// Look up a text height tier, in mm
    pub fn text_height(&self, tier: TextHeightTier) -> Result<f64> {
        self.text_heights.get(tier.key()).copied().ok_or_else(|| {
            warn!(tier = tier.key(), "text height tier not defined");
            DraftError::lookup("text_heights", tier.key())
        })
    }

    /// Dimension arrow size, in mm
    pub fn arrow_size(&self) -> f64 {
        self.arrow_size
    }

    /// Text style identifier used for annotation fonts
    pub fn font_style(&self) -> &str {
        &self.font_style
    }

    /// Preferred scale denominators
    pub fn scales(&self) -> &[u32] {
        self.scales.as_deref().unwrap_or(&DEFAULT_SCALES)
    }

    /// Iterate all line types in definition order
    pub fn line_types(&self) -> impl Iterator<Item = (&str, &LineTypeDef)> {
        self.line_types.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate the full role to layer mapping in definition order
    pub fn layer_mapping(&self) -> impl Iterator<Item = (&str, &str)> {
        self.layer_mapping.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check that every role and tier the built-in strategies reference
    /// resolves in this definition
    pub fn verify_coverage(&self) -> Result<()> {
        for role in LayerRole::ALL {
            self.layer(role)?;
        }
        for tier in TextHeightTier::ALL {
            self.text_height(tier)?;
        }
        for tier in LineWeightTier::ALL {
            self.line_weight(tier)?;
        }
        Ok(())
    }
}
