//! Configuration for GASD descriptor estimation

use gasd_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default value every histogram block is rescaled to
pub const DEFAULT_NORMALIZATION: f32 = 100.0;

/// Largest number of entries a single histogram block may hold
pub const MAX_BLOCK_LEN: usize = 1 << 24;

/// How a sample's unit weight is spread over neighboring histogram bins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// All weight goes to the bin the sample falls into.
    None,
    /// Weight is split over the 2x2x2 spatial neighbors; the extra
    /// (radial or hue) dimension uses its nearest bin.
    Trilinear,
    /// Weight is split over the 2x2x2x2 neighbors in the three spatial
    /// dimensions and the extra dimension.
    Quadrilinear,
}

impl Interpolation {
    /// Whether the three spatial axes are interpolated
    pub fn spatial(self) -> bool {
        !matches!(self, Interpolation::None)
    }

    /// Whether the extra (radial or hue) axis is interpolated
    pub fn extra_axis(self) -> bool {
        matches!(self, Interpolation::Quadrilinear)
    }

    /// Number of bins a single sample touches
    pub fn cells_per_sample(self) -> usize {
        match self {
            Interpolation::None => 1,
            Interpolation::Trilinear => 8,
            Interpolation::Quadrilinear => 16,
        }
    }
}

/// Layout of one histogram block: a cubic spatial grid with a small
/// histogram in every cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramConfig {
    /// Number of grid cells on each side of the origin along every axis.
    /// The grid has `2 * half_grid_size` cells per axis.
    pub half_grid_size: usize,
    /// Number of bins of the per-cell histogram (radial distance for the
    /// shape block, hue for the color block).
    pub hists_size: usize,
    /// Interpolation method used while accumulating samples.
    pub interpolation: Interpolation,
}

impl HistogramConfig {
    pub fn new(half_grid_size: usize, hists_size: usize, interpolation: Interpolation) -> Self {
        Self {
            half_grid_size,
            hists_size,
            interpolation,
        }
    }

    /// Cells per spatial axis
    pub fn grid_size(&self) -> usize {
        self.half_grid_size.saturating_mul(2)
    }

    /// Histogram dimensions, spatial axes first: `[x, y, z, extra]`
    pub fn dims(&self) -> [usize; 4] {
        let g = self.grid_size();
        [g, g, g, self.hists_size]
    }

    /// Number of entries this block contributes to the descriptor, `None` on
    /// overflow
    pub fn checked_len(&self) -> Option<usize> {
        self.dims().iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// Number of entries this block contributes to the descriptor, saturating
    /// at `usize::MAX` for layouts `validate` rejects
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    /// Check whether the block has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate(&self, block: &str) -> Result<()> {
        if self.half_grid_size == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "{} half grid size must be positive",
                block
            )));
        }
        if self.hists_size == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "{} histogram size must be positive",
                block
            )));
        }
        match self.checked_len() {
            Some(len) if len <= MAX_BLOCK_LEN => Ok(()),
            _ => Err(Error::InvalidConfiguration(format!(
                "{} block of {}x{}x{}x{} bins exceeds {} entries",
                block,
                self.grid_size(),
                self.grid_size(),
                self.grid_size(),
                self.hists_size,
                MAX_BLOCK_LEN
            ))),
        }
    }
}

/// How the signs of the principal axes are fixed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisDisambiguation {
    /// Each axis points towards the side holding the heavier tail of the
    /// projected distribution (positive third moment). Invariant to rigid
    /// motion of the input.
    Skewness,
    /// The minor axis is turned towards the sensor, opposite to `direction`;
    /// the major axis keeps a skewness sign check and the middle axis
    /// completes a right-handed frame. Suited to single partial views.
    ViewDirection { direction: [f32; 3] },
}

impl Default for AxisDisambiguation {
    fn default() -> Self {
        AxisDisambiguation::Skewness
    }
}

/// Complete configuration of a GASD estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasdConfig {
    /// Shape block layout
    pub shape: HistogramConfig,
    /// Color block layout; `None` disables the color descriptor.
    /// The per-cell histogram bins split the hue circle.
    pub color: Option<HistogramConfig>,
    /// Sum every histogram block is rescaled to
    pub normalization: f32,
    /// Sign disambiguation of the reference frame axes
    pub disambiguation: AxisDisambiguation,
}

impl Default for GasdConfig {
    fn default() -> Self {
        Self::shape_only()
    }
}

impl GasdConfig {
    /// Shape-only descriptor with 512 entries: 8x8x8 grid, one radial bin,
    /// trilinear interpolation
    pub fn shape_only() -> Self {
        Self {
            shape: HistogramConfig::new(4, 1, Interpolation::Trilinear),
            color: None,
            normalization: DEFAULT_NORMALIZATION,
            disambiguation: AxisDisambiguation::Skewness,
        }
    }

    /// Shape and color descriptor with 984 entries: a 6x6x6 shape grid with
    /// one radial bin followed by a 4x4x4 grid with 12 hue bins, no
    /// interpolation
    pub fn shape_and_color() -> Self {
        Self {
            shape: HistogramConfig::new(3, 1, Interpolation::None),
            color: Some(HistogramConfig::new(2, 12, Interpolation::None)),
            normalization: DEFAULT_NORMALIZATION,
            disambiguation: AxisDisambiguation::Skewness,
        }
    }

    /// Set the shape grid half size and radial bin count
    pub fn with_shape_grid(mut self, half_grid_size: usize, hists_size: usize) -> Self {
        self.shape.half_grid_size = half_grid_size;
        self.shape.hists_size = hists_size;
        self
    }

    /// Set the interpolation used for the shape block
    pub fn with_shape_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.shape.interpolation = interpolation;
        self
    }

    /// Enable the color block with the given layout
    pub fn with_color(mut self, color: HistogramConfig) -> Self {
        self.color = Some(color);
        self
    }

    /// Disable the color block
    pub fn without_color(mut self) -> Self {
        self.color = None;
        self
    }

    /// Set the interpolation used for the color block, enabling it with the
    /// default layout if needed
    pub fn with_color_interpolation(mut self, interpolation: Interpolation) -> Self {
        let mut color = self
            .color
            .unwrap_or_else(|| HistogramConfig::new(2, 12, Interpolation::None));
        color.interpolation = interpolation;
        self.color = Some(color);
        self
    }

    /// Set the normalization constant
    pub fn with_normalization(mut self, normalization: f32) -> Self {
        self.normalization = normalization;
        self
    }

    /// Use viewpoint based sign disambiguation
    pub fn with_view_direction(mut self, direction: [f32; 3]) -> Self {
        self.disambiguation = AxisDisambiguation::ViewDirection { direction };
        self
    }

    /// Length of the shape block
    pub fn shape_len(&self) -> usize {
        self.shape.len()
    }

    /// Length of the color block, zero when color is disabled
    pub fn color_len(&self) -> usize {
        self.color.as_ref().map_or(0, HistogramConfig::len)
    }

    /// Total descriptor length
    pub fn descriptor_len(&self) -> usize {
        self.shape_len().saturating_add(self.color_len())
    }

    /// Check the configuration before any computation
    pub fn validate(&self) -> Result<()> {
        self.shape.validate("shape")?;
        if let Some(color) = &self.color {
            color.validate("color")?;
        }

        if !self.normalization.is_finite() || self.normalization <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "normalization must be a positive finite number, got {}",
                self.normalization
            )));
        }

        if let AxisDisambiguation::ViewDirection { direction } = self.disambiguation {
            let norm_sq: f32 = direction.iter().map(|v| v * v).sum();
            if !norm_sq.is_finite() || norm_sq == 0.0 {
                return Err(Error::InvalidConfiguration(
                    "view direction must be a non-zero finite vector".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let shape = GasdConfig::shape_only();
        assert_eq!(shape.descriptor_len(), 512);
        assert_eq!(shape.color_len(), 0);
        assert_eq!(shape.shape.interpolation, Interpolation::Trilinear);
        assert_eq!(GasdConfig::default(), shape);

        let color = GasdConfig::shape_and_color();
        assert_eq!(color.shape_len(), 216);
        assert_eq!(color.color_len(), 768);
        assert_eq!(color.descriptor_len(), 984);
    }

    #[test]
    fn test_builders() {
        let config = GasdConfig::shape_only()
            .with_shape_grid(2, 3)
            .with_shape_interpolation(Interpolation::Quadrilinear)
            .with_color_interpolation(Interpolation::Quadrilinear)
            .with_normalization(1.0)
            .with_view_direction([0.0, 0.0, 1.0]);

        assert_eq!(config.shape.dims(), [4, 4, 4, 3]);
        assert_eq!(config.shape_len(), 192);
        assert_eq!(
            config.color,
            Some(HistogramConfig::new(2, 12, Interpolation::Quadrilinear))
        );
        assert!(config.validate().is_ok());
        assert_eq!(config.without_color().color_len(), 0);
    }

    #[test]
    fn test_interpolation_cells() {
        assert_eq!(Interpolation::None.cells_per_sample(), 1);
        assert_eq!(Interpolation::Trilinear.cells_per_sample(), 8);
        assert_eq!(Interpolation::Quadrilinear.cells_per_sample(), 16);
        assert!(!Interpolation::Trilinear.extra_axis());
        assert!(Interpolation::Quadrilinear.spatial());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let zero_grid = GasdConfig::shape_only().with_shape_grid(0, 1);
        assert!(matches!(zero_grid.validate(), Err(Error::InvalidConfiguration(_))));

        let zero_bins = GasdConfig::shape_only().with_shape_grid(2, 0);
        assert!(matches!(zero_bins.validate(), Err(Error::InvalidConfiguration(_))));

        let zero_hue = GasdConfig::shape_only().with_color(HistogramConfig::new(2, 0, Interpolation::None));
        assert!(matches!(zero_hue.validate(), Err(Error::InvalidConfiguration(_))));

        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = GasdConfig::shape_only().with_normalization(bad);
            assert!(config.validate().is_err(), "normalization {} accepted", bad);
        }

        let no_view = GasdConfig::shape_only().with_view_direction([0.0, 0.0, 0.0]);
        assert!(matches!(no_view.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_oversized_layout_is_rejected() {
        let config: GasdConfig = serde_json::from_str(
            r#"{ "shape": { "half_grid_size": 4294967296, "hists_size": 1, "interpolation": "none" } }"#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));
        assert_eq!(config.shape.checked_len(), None);
        assert_eq!(config.descriptor_len(), usize::MAX);

        // fits in usize but above the block cap
        let large = GasdConfig::shape_only().with_shape_grid(64, 64);
        assert_eq!(large.shape.checked_len(), Some(128 * 128 * 128 * 64));
        assert!(matches!(large.validate(), Err(Error::InvalidConfiguration(_))));

        let largest = GasdConfig::shape_only().with_shape_grid(64, 8);
        assert_eq!(largest.shape_len(), MAX_BLOCK_LEN);
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GasdConfig = serde_json::from_str(
            r#"{
                "color": { "half_grid_size": 2, "hists_size": 8, "interpolation": "quadrilinear" },
                "disambiguation": { "view_direction": { "direction": [0.0, 0.0, 1.0] } }
            }"#,
        )
        .unwrap();

        assert_eq!(config.shape, GasdConfig::shape_only().shape);
        assert_eq!(config.normalization, DEFAULT_NORMALIZATION);
        assert_eq!(config.color_len(), 64 * 8);
        assert_eq!(
            config.disambiguation,
            AxisDisambiguation::ViewDirection { direction: [0.0, 0.0, 1.0] }
        );
    }
}
