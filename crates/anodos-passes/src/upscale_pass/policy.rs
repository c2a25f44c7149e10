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

//! The per-mode settings table and its derived resolution bounds.

use anodos_core::upscale::quality::{GlobalResolutionBounds, OptimalSettings, QualityMode};
use anodos_core::{UpscaleBackend, UpscaleError};

/// Maps each quality mode to the settings the backend reported for it.
///
/// Built exactly once, at context creation, by querying the backend for
/// every mode; read-only afterwards. The accessors taking a mode panic when
/// the mode is unsupported — callers must branch on
/// [`is_supported`](Self::is_supported) first, because requesting settings
/// for an unsupported mode is an integration bug, not a runtime condition.
#[derive(Debug, Clone)]
pub struct QualityModePolicy {
    table: [OptimalSettings; QualityMode::COUNT],
    bounds: Option<GlobalResolutionBounds>,
    runtime_mode_count: u32,
}

impl QualityModePolicy {
    /// Queries the backend for every quality mode and builds the table.
    pub fn build(backend: &dyn UpscaleBackend) -> Result<Self, UpscaleError> {
        let mut table = [OptimalSettings::default(); QualityMode::COUNT];

        for mode in QualityMode::ALL {
            let settings = backend.optimal_settings(mode)?;
            if settings.is_supported {
                debug_assert!(
                    settings.min_fraction <= settings.optimal_fraction
                        && settings.optimal_fraction <= settings.max_fraction,
                    "backend reported inconsistent fractions for {mode}"
                );
            }
            log::info!(
                "Quality mode {}: supported={}, fraction={:.4} in [{:.4}, {:.4}]",
                mode,
                settings.is_supported,
                settings.optimal_fraction,
                settings.min_fraction,
                settings.max_fraction
            );
            table[mode.index()] = settings;
        }

        let policy = Self::from_table(table);
        log::info!(
            "{} runtime quality mode(s), fraction bounds {:?}",
            policy.runtime_mode_count,
            policy.bounds
        );

        // Higher levels branch on per-mode support before use; flagging the
        // common trio here just eases bring-up on exotic backends.
        for mode in [
            QualityMode::Performance,
            QualityMode::Balanced,
            QualityMode::Quality,
        ] {
            if !policy.is_supported(mode) {
                log::warn!("Quality mode {mode} is not supported by this backend");
            }
        }

        Ok(policy)
    }

    fn from_table(table: [OptimalSettings; QualityMode::COUNT]) -> Self {
        let mut min_fraction = f32::MAX;
        let mut max_fraction = f32::MIN;
        let mut runtime_mode_count = 0u32;

        for settings in &table {
            // Fixed-resolution modes cannot participate in dynamic
            // resolution, so they are excluded from the overall bounds.
            if settings.is_supported && !settings.is_fixed_resolution() {
                // The optimal fraction, not min/max, keeps dynamic
                // resolution clear of each mode's hard edges.
                min_fraction = min_fraction.min(settings.optimal_fraction);
                max_fraction = max_fraction.max(settings.optimal_fraction);
                runtime_mode_count += 1;
            }
        }

        let bounds = (runtime_mode_count > 0).then_some(GlobalResolutionBounds {
            min_fraction,
            max_fraction,
        });

        Self {
            table,
            bounds,
            runtime_mode_count,
        }
    }

    /// Builds a policy directly from a settings table, bypassing a backend.
    #[cfg(test)]
    pub(crate) fn from_table_for_tests(table: [OptimalSettings; QualityMode::COUNT]) -> Self {
        Self::from_table(table)
    }

    /// Whether upscaling is usable at all: at least one runtime quality
    /// mode ended up supported.
    pub fn is_available(&self) -> bool {
        self.runtime_mode_count > 0
    }

    /// The number of supported, dynamically-adjustable quality modes.
    pub fn runtime_mode_count(&self) -> u32 {
        self.runtime_mode_count
    }

    /// Whether the backend supports `mode` at runtime.
    pub fn is_supported(&self, mode: QualityMode) -> bool {
        self.table[mode.index()].is_supported
    }

    fn checked(&self, mode: QualityMode) -> &OptimalSettings {
        let settings = &self.table[mode.index()];
        assert!(
            settings.is_supported,
            "{mode} is not a supported quality mode"
        );
        settings
    }

    /// The resolution fraction the backend recommends for `mode`.
    ///
    /// # Panics
    /// Panics when `mode` is unsupported.
    pub fn optimal_fraction(&self, mode: QualityMode) -> f32 {
        self.checked(mode).optimal_fraction
    }

    /// The smallest resolution fraction `mode` accepts.
    ///
    /// # Panics
    /// Panics when `mode` is unsupported.
    pub fn min_fraction(&self, mode: QualityMode) -> f32 {
        self.checked(mode).min_fraction
    }

    /// The largest resolution fraction `mode` accepts.
    ///
    /// # Panics
    /// Panics when `mode` is unsupported.
    pub fn max_fraction(&self, mode: QualityMode) -> f32 {
        self.checked(mode).max_fraction
    }

    /// The sharpening strength the backend recommends for `mode`.
    ///
    /// # Panics
    /// Panics when `mode` is unsupported.
    pub fn optimal_sharpness(&self, mode: QualityMode) -> f32 {
        self.checked(mode).sharpness
    }

    /// Whether `mode` runs at a fixed, non-adjustable resolution fraction.
    ///
    /// # Panics
    /// Panics when `mode` is unsupported.
    pub fn is_fixed_resolution(&self, mode: QualityMode) -> bool {
        self.checked(mode).is_fixed_resolution()
    }

    /// The overall fraction range across supported non-fixed modes, or
    /// `None` when upscaling is unavailable.
    pub fn fraction_bounds(&self) -> Option<GlobalResolutionBounds> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported(optimal: f32, min: f32, max: f32) -> OptimalSettings {
        OptimalSettings {
            is_supported: true,
            optimal_fraction: optimal,
            min_fraction: min,
            max_fraction: max,
            sharpness: 0.0,
        }
    }

    fn table_with(
        entries: &[(QualityMode, OptimalSettings)],
    ) -> [OptimalSettings; QualityMode::COUNT] {
        let mut table = [OptimalSettings::default(); QualityMode::COUNT];
        for (mode, settings) in entries {
            table[mode.index()] = *settings;
        }
        table
    }

    #[test]
    fn test_bounds_exclude_fixed_resolution_modes() {
        let policy = QualityModePolicy::from_table_for_tests(table_with(&[
            // Fixed: min == max. Must not widen the bounds downwards.
            (
                QualityMode::UltraPerformance,
                supported(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
            ),
            (QualityMode::Performance, supported(0.5, 0.5, 0.58)),
            (QualityMode::Quality, supported(0.667, 0.58, 0.77)),
        ]));

        let bounds = policy.fraction_bounds().unwrap();
        assert_eq!(bounds.min_fraction, 0.5);
        assert_eq!(bounds.max_fraction, 0.667);
        assert_eq!(policy.runtime_mode_count(), 2);
    }

    #[test]
    fn test_no_supported_modes_reports_unavailable() {
        let policy = QualityModePolicy::from_table_for_tests(table_with(&[]));
        assert!(!policy.is_available());
        assert!(policy.fraction_bounds().is_none());
    }

    #[test]
    fn test_only_fixed_modes_reports_unavailable() {
        let policy = QualityModePolicy::from_table_for_tests(table_with(&[(
            QualityMode::UltraPerformance,
            supported(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
        )]));
        assert!(!policy.is_available());
    }

    #[test]
    fn test_fraction_invariant_for_supported_modes() {
        let policy = QualityModePolicy::from_table_for_tests(table_with(&[
            (QualityMode::Performance, supported(0.5, 0.5, 0.58)),
            (QualityMode::Balanced, supported(0.58, 0.5, 0.667)),
        ]));
        for mode in QualityMode::ALL {
            if policy.is_supported(mode) {
                assert!(policy.min_fraction(mode) <= policy.optimal_fraction(mode));
                assert!(policy.optimal_fraction(mode) <= policy.max_fraction(mode));
            }
        }
    }

    #[test]
    #[should_panic(expected = "not a supported quality mode")]
    fn test_querying_unsupported_mode_panics() {
        let policy = QualityModePolicy::from_table_for_tests(table_with(&[(
            QualityMode::Performance,
            supported(0.5, 0.5, 0.58),
        )]));
        policy.optimal_fraction(QualityMode::UltraQuality);
    }
}
