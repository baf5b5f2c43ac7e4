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

//! Capability declarations for a surface backend.
//!
//! Fixed-answer surface queries (root transform, raster cache, legacy
//! context, thread-bound context) are driven by a capability table instead
//! of individual overrides, so a backend that gains one of these
//! capabilities only changes its table.

use crate::math::Transform2D;

/// An opaque handle to a legacy raster GPU context.
///
/// This backend never exposes one; callers built against the older raster
/// abstraction must branch on the `None` sentinel rather than dereference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegacyRasterContextId(pub u64);

/// The capability table declared by a surface backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceCapabilities {
    /// The root transformation applied to all content. This backend does not
    /// support non-identity root transforms; the value is always identity.
    pub root_transformation: Transform2D,
    /// Whether a raster cache below the content renderer is permitted.
    /// Disabled here: it would double-buffer against the content renderer's
    /// own caching.
    pub raster_cache: bool,
    /// The legacy raster context handle, if the backend exposes one.
    pub legacy_context: Option<LegacyRasterContextId>,
    /// Whether the backend has a thread-bound "current" context that must be
    /// made current before rendering.
    pub thread_bound_context: bool,
}

impl SurfaceCapabilities {
    /// The table for this backend: identity transform only, no raster
    /// cache, no legacy context, no thread-bound context.
    pub const fn baseline() -> Self {
        Self {
            root_transformation: Transform2D::IDENTITY,
            raster_cache: false,
            legacy_context: None,
            thread_bound_context: false,
        }
    }
}

impl Default for SurfaceCapabilities {
    fn default() -> Self {
        Self::baseline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_declares_no_optional_capabilities() {
        let caps = SurfaceCapabilities::baseline();
        assert!(caps.root_transformation.is_identity());
        assert!(!caps.raster_cache);
        assert!(caps.legacy_context.is_none());
        assert!(!caps.thread_bound_context);
    }
}
