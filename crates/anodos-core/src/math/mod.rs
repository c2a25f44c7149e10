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

//! Pixel-space mathematics primitives used by the upscaling subsystem.
//!
//! Everything in here is deliberately integer-first: extents, origins and
//! rectangles describe texture regions in whole pixels. The only floating
//! point type is [`Vec2`], used for sub-pixel jitter offsets and motion
//! vector scales.

pub mod dimension;
pub mod rect;
pub mod vector;

pub use self::dimension::{Extent2D, Origin2D};
pub use self::rect::IntRect;
pub use self::vector::Vec2;
