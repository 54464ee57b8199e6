//! Detection parameters
//!
//! Values resolve in three layers: built-in defaults or a JSON params file,
//! then `ODONTO_*` environment overrides (read once per process), then
//! explicit caller or CLI values.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::detector::flood_fill::Connectivity;
use crate::error::{Error, Result};
use crate::models::Dentition;

/// Default brightness cutoff
pub const DEFAULT_THRESHOLD: u8 = 180;
/// Default smallest accepted cluster, in pixels
pub const DEFAULT_MIN_AREA: usize = 100;
/// Default largest accepted cluster, in pixels
pub const DEFAULT_MAX_AREA: usize = 3000;
/// Default confidence attached to every region
pub const DEFAULT_CONFIDENCE: f32 = 0.8;

/// Tuning knobs for one detection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectionParams {
    /// Pixels with luma `>= threshold` are bright
    pub threshold: u8,
    /// Clusters smaller than this are noise (inclusive bound)
    pub min_area: usize,
    /// Clusters larger than this are background (inclusive bound)
    pub max_area: usize,
    /// Neighborhood used by the flood fill
    pub connectivity: Connectivity,
    /// Numbering set used for assigned tooth numbers
    pub dentition: Dentition,
    /// Constant score attached to every region, clamped to `[0, 1]`
    pub confidence: f32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_area: DEFAULT_MIN_AREA,
            max_area: DEFAULT_MAX_AREA,
            connectivity: Connectivity::default(),
            dentition: Dentition::default(),
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

impl DetectionParams {
    /// Defaults with `ODONTO_*` environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `ODONTO_*` environment overrides on top of these params
    pub fn with_env_overrides(mut self) -> Self {
        self.apply(&EnvOverrides::get());
        self
    }

    fn apply(&mut self, overrides: &EnvOverrides) {
        if let Some(v) = overrides.threshold {
            self.threshold = v;
        }
        if let Some(v) = overrides.min_area {
            self.min_area = v;
        }
        if let Some(v) = overrides.max_area {
            self.max_area = v;
        }
        if let Some(v) = overrides.connectivity {
            self.connectivity = v;
        }
    }

    /// Read a JSON params file; missing fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    /// Reject parameter sets that cannot describe any run.
    ///
    /// Thresholds that merely produce zero or absurd region counts are valid.
    pub fn validate(&self) -> Result<()> {
        if self.min_area > self.max_area {
            return Err(Error::InvalidParams(format!(
                "min_area {} exceeds max_area {}",
                self.min_area, self.max_area
            )));
        }
        if !self.confidence.is_finite() {
            return Err(Error::InvalidParams(format!(
                "confidence {} is not finite",
                self.confidence
            )));
        }
        Ok(())
    }

    /// Confidence clamped into `[0, 1]`
    pub fn clamped_confidence(&self) -> f32 {
        self.confidence.clamp(0.0, 1.0)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
}

/// Detection overrides read from the environment
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct EnvOverrides {
    threshold: Option<u8>,
    min_area: Option<usize>,
    max_area: Option<usize>,
    connectivity: Option<Connectivity>,
}

static OVERRIDES: OnceLock<EnvOverrides> = OnceLock::new();

impl EnvOverrides {
    fn get() -> Self {
        *OVERRIDES.get_or_init(|| EnvOverrides {
            threshold: parse_env("ODONTO_THRESHOLD"),
            min_area: parse_env("ODONTO_MIN_AREA"),
            max_area: parse_env("ODONTO_MAX_AREA"),
            connectivity: parse_env("ODONTO_CONNECTIVITY"),
        })
    }
}

static MAX_DIM: OnceLock<Option<u32>> = OnceLock::new();

/// Longest image side the tool layer analyses; `ODONTO_MAX_DIM=0` or unset disables downscaling
pub fn max_dim() -> Option<u32> {
    *MAX_DIM.get_or_init(|| parse_env::<u32>("ODONTO_MAX_DIM").filter(|&v| v > 0))
}
