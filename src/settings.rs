use serde::Deserialize;

use crate::error::{Result, SettingsError};

/// Every tunable used while marking.
///
/// The tolerance bands are absolute and assume answers are drawn on a canvas scaled to roughly
/// `[-1, 1]` in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Half-width of the band around each axis that counts as on the axis.
    pub axis_slop: f64,
    /// Half-width of the square around (0, 0) that counts as the origin.
    pub origin_slop: f64,
    /// Half-width of the looser origin square used when checking odd symmetry.
    pub relaxed_origin_slop: f64,
    /// Ratio of width to height (or height to width) beyond which a slope is flat (or steep).
    pub slope_threshold: f64,
    /// Number of points at each end of a line used to measure its slope.
    pub slope_window: usize,
    /// Maximum relative size difference between mirrored sections of a symmetric line.
    pub symmetry_tolerance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            axis_slop: 0.02,
            origin_slop: 0.05,
            relaxed_origin_slop: 0.1,
            slope_threshold: 4.0,
            slope_window: 5,
            symmetry_tolerance: 0.4,
        }
    }
}

impl Settings {
    /// Checks that every tunable is usable.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::NotPositive` if a tolerance is zero, negative or NaN, and
    /// `SettingsError::SlopeWindow` if fewer than two points would be used to measure slope.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("axisSlop", self.axis_slop),
            ("originSlop", self.origin_slop),
            ("relaxedOriginSlop", self.relaxed_origin_slop),
            ("slopeThreshold", self.slope_threshold),
            ("symmetryTolerance", self.symmetry_tolerance),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(SettingsError::NotPositive { name, value }.into());
            }
        }
        if self.slope_window < 2 {
            return Err(SettingsError::SlopeWindow(self.slope_window).into());
        }
        Ok(())
    }

    /// Parses settings from JSON, filling anything missing from the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the resulting settings fail
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).map_err(SettingsError::Malformed)?;
        settings.validate()?;
        Ok(settings)
    }
}
