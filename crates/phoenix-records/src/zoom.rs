//! Page zoom factor

use serde::Serialize;

/// Zoom factor of a tab, `1.0` meaning 100%.
///
/// Constructed through [`ZoomLevel::from_raw`], which never yields NaN,
/// infinity, zero or a negative factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ZoomLevel(f64);

impl ZoomLevel {
    pub const NEUTRAL: ZoomLevel = ZoomLevel(1.0);

    /// Validate a zoom factor read from storage.
    ///
    /// Unusable values fall back to [`ZoomLevel::NEUTRAL`]; anything else is
    /// kept bit-exact.
    pub fn from_raw(factor: f64) -> Self {
        if factor.is_finite() && factor > 0.0 {
            ZoomLevel(factor)
        } else {
            tracing::debug!(factor, "Replacing unusable zoom factor with neutral zoom");
            Self::NEUTRAL
        }
    }

    pub fn factor(&self) -> f64 {
        self.0
    }

    pub fn is_neutral(&self) -> bool {
        self.0 == Self::NEUTRAL.0
    }

    /// Zoom as a rounded percentage, e.g. `125` for `1.25`
    pub fn percent(&self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl std::fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
