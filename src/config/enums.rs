//! Configuration enum types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dither::{BayerMatrix, FitMode};

/// Ordered-dither threshold matrix used for imported photos.
///
/// # Examples
/// ```toml
/// [dither]
/// matrix = "bayer8"
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DitherMatrixSpec {
    /// 4×4 matrix, 16 gray levels, coarse texture
    #[default]
    Bayer4,
    /// 8×8 matrix, 64 gray levels, finer texture
    Bayer8,
}

impl DitherMatrixSpec {
    pub fn to_matrix(self) -> BayerMatrix {
        match self {
            DitherMatrixSpec::Bayer4 => BayerMatrix::Bayer4,
            DitherMatrixSpec::Bayer8 => BayerMatrix::Bayer8,
        }
    }
}

/// How photos are fitted into their panel.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FitModeSpec {
    /// Letterbox: the whole photo is visible
    Contain,
    /// Crop: the photo fills the whole panel
    #[default]
    Cover,
}

impl FitModeSpec {
    pub fn to_fit_mode(self) -> FitMode {
        match self {
            FitModeSpec::Contain => FitMode::Contain,
            FitModeSpec::Cover => FitMode::Cover,
        }
    }
}
