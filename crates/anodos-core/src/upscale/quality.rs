// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The quality-mode data model of the upscaler.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete upscaling preset trading render cost for output quality.
///
/// The mode determines the resolution fraction the view is rendered at
/// before upscaling. Which modes are actually usable is reported by the
/// backend at enumeration time; callers must check support before relying
/// on a mode's settings.
///
/// Variant order runs from cheapest (lowest input resolution) to most
/// expensive. Nothing may rely on the discriminant values matching any
/// backend-specific constant: backends translate to their own vocabulary,
/// and the settings table is indexed through [`QualityMode::index`] only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityMode {
    /// Lowest input resolution, highest performance gain.
    UltraPerformance,
    /// Low input resolution, favoring performance.
    Performance,
    /// Middle ground between performance and quality.
    Balanced,
    /// High input resolution, favoring image quality.
    Quality,
    /// Highest input resolution, smallest performance gain.
    UltraQuality,
}

impl QualityMode {
    /// The number of quality modes.
    pub const COUNT: usize = 5;

    /// All quality modes, cheapest first.
    pub const ALL: [QualityMode; Self::COUNT] = [
        QualityMode::UltraPerformance,
        QualityMode::Performance,
        QualityMode::Balanced,
        QualityMode::Quality,
        QualityMode::UltraQuality,
    ];

    /// A stable table index for this mode, in `0..COUNT`.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            QualityMode::UltraPerformance => 0,
            QualityMode::Performance => 1,
            QualityMode::Balanced => 2,
            QualityMode::Quality => 3,
            QualityMode::UltraQuality => 4,
        }
    }
}

impl fmt::Display for QualityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QualityMode::UltraPerformance => "UltraPerformance",
            QualityMode::Performance => "Performance",
            QualityMode::Balanced => "Balanced",
            QualityMode::Quality => "Quality",
            QualityMode::UltraQuality => "UltraQuality",
        };
        write!(f, "{name}")
    }
}

/// Per-mode settings reported by the backend at enumeration time.
///
/// Populated once when the settings table is built and read-only
/// thereafter. When `is_supported` holds, the fractions satisfy
/// `min_fraction <= optimal_fraction <= max_fraction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimalSettings {
    /// Whether the backend supports this mode at runtime.
    pub is_supported: bool,
    /// The resolution fraction the backend recommends for this mode.
    pub optimal_fraction: f32,
    /// The smallest resolution fraction the mode accepts.
    pub min_fraction: f32,
    /// The largest resolution fraction the mode accepts.
    pub max_fraction: f32,
    /// The sharpening strength the backend recommends for this mode.
    pub sharpness: f32,
}

impl OptimalSettings {
    /// Whether the mode's resolution fraction is not continuously
    /// adjustable.
    ///
    /// Fixed-resolution modes are excluded from the global resolution
    /// bounds because they cannot participate in dynamic resolution.
    #[inline]
    pub fn is_fixed_resolution(&self) -> bool {
        self.min_fraction == self.max_fraction
    }
}

impl Default for OptimalSettings {
    /// An unsupported mode with zeroed fractions.
    fn default() -> Self {
        Self {
            is_supported: false,
            optimal_fraction: 0.0,
            min_fraction: 0.0,
            max_fraction: 0.0,
            sharpness: 0.0,
        }
    }
}

/// The overall resolution-fraction range across supported, non-fixed modes.
///
/// Derived once when the settings table is built and constant for the
/// lifetime of the upscaler context. The bounds accumulate each mode's
/// *optimal* fraction rather than its min/max so that dynamic-resolution
/// drivers never operate floating-point-close to a mode's hard edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalResolutionBounds {
    /// The smallest optimal fraction across supported, non-fixed modes.
    pub min_fraction: f32,
    /// The largest optimal fraction across supported, non-fixed modes.
    pub max_fraction: f32,
}
