// Copyright 2026 the Opaline authors
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

//! Pixel-space extents used for frame requests and render-target cull rects.
//!
//! Components are `u32`, making these types suitable for swapchain and
//! texture dimensions where negative or fractional sizes have no meaning.

use bytemuck::{Pod, Zeroable};

/// A two-dimensional pixel extent (width and height).
///
/// This is the type of a frame request and of a presentable target's
/// renderable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Extent2D {
    /// The width component of the extent, in pixels.
    pub width: u32,
    /// The height component of the extent, in pixels.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new extent from a width and a height.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if the extent covers zero area.
    ///
    /// An extent is empty when either dimension is zero. Empty extents are
    /// rejected by frame acquisition.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the covered area in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl std::fmt::Display for Extent2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
