//! Extraction configuration.

use isomesh_core::{OutputMode, Region};

use crate::error::{IsoMeshError, Result};

/// Parameters of one extraction over a [`Volume`](crate::Volume).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtractionConfig {
    /// Surface threshold. Samples strictly below it are inside.
    pub iso_level: f32,
    /// Sub-box of grid points to process; the whole volume when `None`.
    pub region: Option<Region>,
    /// Triangle mesh or wireframe.
    pub mode: OutputMode,
    /// Tag vertices with the volume's group ids.
    pub use_ids: bool,
}

impl ExtractionConfig {
    /// Mesh extraction of the whole volume at `iso_level`.
    #[inline]
    pub const fn new(iso_level: f32) -> Self {
        Self {
            iso_level,
            region: None,
            mode: OutputMode::Mesh,
            use_ids: false,
        }
    }

    /// Restrict extraction to grid points in `[bottom_left, top_right)`.
    pub fn with_region(mut self, bottom_left: [usize; 3], top_right: [usize; 3]) -> Self {
        self.region = Some(Region::new(bottom_left, top_right));
        self
    }

    /// Choose the output shape.
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Produce a wireframe instead of a mesh.
    pub fn lines(self) -> Self {
        self.with_mode(OutputMode::Lines)
    }

    /// Carry the volume's group ids into the output.
    pub fn with_ids(mut self, use_ids: bool) -> Self {
        self.use_ids = use_ids;
        self
    }

    /// Check the settings that do not depend on a volume.
    ///
    /// Region bounds are checked by the engine against the volume at extraction.
    ///
    /// # Errors
    /// `InvalidConfig` if the iso-level is not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.iso_level.is_finite() {
            return Err(IsoMeshError::InvalidConfig {
                message: format!("iso level must be finite, got {}", self.iso_level),
            });
        }
        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(config.iso_level, 0.0);
        assert_eq!(config.region, None);
        assert_eq!(config.mode, OutputMode::Mesh);
        assert!(!config.use_ids);
    }

    #[test]
    fn test_config_builder() {
        let config = ExtractionConfig::new(0.5)
            .with_region([1, 1, 1], [8, 8, 8])
            .lines()
            .with_ids(true);
        assert_eq!(config.region, Some(Region::new([1, 1, 1], [8, 8, 8])));
        assert_eq!(config.mode, OutputMode::Lines);
        assert!(config.use_ids);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_finite_iso_level_rejected() {
        for iso in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert!(matches!(
                ExtractionConfig::new(iso).validate(),
                Err(IsoMeshError::InvalidConfig { .. })
            ));
        }
    }
}
