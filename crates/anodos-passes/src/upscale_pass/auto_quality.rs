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

//! Automatic quality-mode selection from the output resolution.

use super::policy::QualityModePolicy;
use anodos_core::math::Extent2D;
use anodos_core::upscale::quality::QualityMode;

/// Output pixel count at or above which UltraPerformance is preferred
/// (roughly 4K and beyond).
const ULTRA_PERFORMANCE_MIN_PIXELS: u64 = 8_300_000;
/// Output pixel count at or above which Performance is preferred
/// (roughly 1440p and beyond).
const PERFORMANCE_MIN_PIXELS: u64 = 3_690_000;
/// Output pixel count at or above which Quality is preferred
/// (roughly 1080p and beyond).
const QUALITY_MIN_PIXELS: u64 = 2_030_000;

/// Picks a quality mode from a target output pixel count.
///
/// Coarse resolution buckets approximate the render-cost/quality tradeoff
/// without per-scene heuristics: the larger the output, the cheaper the
/// selected mode. Buckets are checked high to low and each is gated on the
/// backend actually supporting the mode, so an unsupported bucket falls
/// through to the next cheaper-output one. Below the lowest bucket no mode
/// is selected and the caller falls back to its configured default or
/// skips upscaling.
#[derive(Debug, Clone, Copy)]
pub struct AutoQualitySelector<'a> {
    policy: &'a QualityModePolicy,
}

impl<'a> AutoQualitySelector<'a> {
    /// Creates a selector consulting `policy` for mode support.
    pub fn new(policy: &'a QualityModePolicy) -> Self {
        Self { policy }
    }

    /// Selects a quality mode for the given output pixel count, or `None`
    /// when no threshold with a supported mode applies.
    ///
    /// Thresholds are inclusive: a pixel count exactly at a boundary
    /// selects the higher-cost bucket.
    pub fn select_for_pixel_count(&self, pixel_count: u64) -> Option<QualityMode> {
        if pixel_count >= ULTRA_PERFORMANCE_MIN_PIXELS
            && self.policy.is_supported(QualityMode::UltraPerformance)
        {
            Some(QualityMode::UltraPerformance)
        } else if pixel_count >= PERFORMANCE_MIN_PIXELS
            && self.policy.is_supported(QualityMode::Performance)
        {
            Some(QualityMode::Performance)
        } else if pixel_count >= QUALITY_MIN_PIXELS
            && self.policy.is_supported(QualityMode::Quality)
        {
            Some(QualityMode::Quality)
        } else {
            None
        }
    }

    /// Selects a quality mode for the given output extent.
    pub fn select_for_output(&self, output: Extent2D) -> Option<QualityMode> {
        self.select_for_pixel_count(output.pixel_count())
    }
}
