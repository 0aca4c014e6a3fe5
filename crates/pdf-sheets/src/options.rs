use crate::constants::REQUIRED_PAGE_COUNT;
use crate::layout::{Pairing, SheetGeometry};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Imposition configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImposeOptions {
    /// Which pages share a sheet and on which side
    pub pairing: Pairing,

    /// Exact page count the input must have; `None` accepts any even count
    pub required_pages: Option<usize>,

    /// Output sheet size
    pub sheet: SheetGeometry,

    /// How source pages are scaled into their half
    pub scaling: ScalingMode,
}

impl Default for ImposeOptions {
    fn default() -> Self {
        Self {
            pairing: Pairing::Booklet,
            required_pages: Some(REQUIRED_PAGE_COUNT),
            sheet: SheetGeometry::default(),
            scaling: ScalingMode::Stretch,
        }
    }
}

impl ImposeOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SheetError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SheetError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if let Some(pages) = self.required_pages {
            if pages == 0 || pages % 2 != 0 {
                return Err(SheetError::Config(format!(
                    "Required page count must be a positive even number (got {})",
                    pages
                )));
            }
        }

        let sheet = &self.sheet;
        if !(sheet.width_pt.is_finite() && sheet.height_pt.is_finite())
            || sheet.width_pt <= 0.0
            || sheet.height_pt <= 0.0
        {
            return Err(SheetError::Config(format!(
                "Sheet size must be positive (got {} x {} pt)",
                sheet.width_pt, sheet.height_pt
            )));
        }

        Ok(())
    }
}
