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

//! Tile-granular render-target size quantization.

use anodos_core::math::Extent2D;
use anodos_core::BufferSizeQuantizer;

/// Default render-target tile alignment in pixels.
const DEFAULT_GRANULARITY: u32 = 32;

/// Rounds requested render-target sizes up to a fixed tile granularity.
///
/// Render targets allocated at tile-aligned sizes can be reused across
/// small viewport changes without reallocation.
#[derive(Debug, Clone, Copy)]
pub struct TileQuantizer {
    granularity: u32,
}

impl TileQuantizer {
    /// Creates a quantizer rounding up to multiples of `granularity`.
    ///
    /// # Panics
    /// Panics when `granularity` is zero.
    pub fn new(granularity: u32) -> Self {
        assert!(granularity > 0, "quantization granularity must be non-zero");
        Self { granularity }
    }
}

impl Default for TileQuantizer {
    fn default() -> Self {
        Self::new(DEFAULT_GRANULARITY)
    }
}

impl BufferSizeQuantizer for TileQuantizer {
    fn quantize(&self, requested: Extent2D) -> Extent2D {
        Extent2D::new(
            requested.width.div_ceil(self.granularity) * self.granularity,
            requested.height.div_ceil(self.granularity) * self.granularity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_rounds_up_to_tiles() {
        let quantizer = TileQuantizer::new(32);
        assert_eq!(
            quantizer.quantize(Extent2D::new(1280, 720)),
            Extent2D::new(1280, 736)
        );
        assert_eq!(
            quantizer.quantize(Extent2D::new(1, 1)),
            Extent2D::new(32, 32)
        );
    }

    #[test]
    fn test_quantize_keeps_aligned_sizes() {
        let quantizer = TileQuantizer::new(32);
        assert_eq!(
            quantizer.quantize(Extent2D::new(1920, 1088)),
            Extent2D::new(1920, 1088)
        );
        assert_eq!(quantizer.quantize(Extent2D::ZERO), Extent2D::ZERO);
    }

    #[test]
    #[should_panic(expected = "granularity must be non-zero")]
    fn test_zero_granularity_panics() {
        TileQuantizer::new(0);
    }
}
