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

//! The surface facade implementing the frame acquisition/submission
//! protocol.

use crate::math::{Extent2D, Transform2D};
use crate::surface::capabilities::{LegacyRasterContextId, SurfaceCapabilities};
use crate::surface::dispatch::{DispatchMode, SurfaceConfig};
use crate::surface::error::SurfaceError;
use crate::surface::frame::{SubmissionTask, SurfaceFrame};
use crate::surface::frame_renderer::FrameRenderer;
use crate::surface::traits::{ContentRenderer, PresentationContext};
use std::fmt;
use std::sync::Arc;

/// The on-screen drawing surface facade.
///
/// A surface sits between a display-command producer and a GPU presentation
/// backend. It validates the backend once at construction, acquires one
/// presentable target per frame, and packages the deferred submission work
/// into a [`SurfaceFrame`].
///
/// Construction is fail-fast and fail-closed: if the presentation context,
/// frame renderer, or content renderer is unusable, the whole surface is
/// inert (`is_valid() == false`) rather than failing at use time. There is
/// no transition back to validity.
pub struct GpuSurface {
    // Declared before the context so teardown releases the renderers first
    // (reverse of construction); the context handle they share keeps the
    // backend alive until both are gone.
    frame_renderer: Option<Arc<FrameRenderer>>,
    content_renderer: Option<Arc<dyn ContentRenderer>>,
    context: Arc<dyn PresentationContext>,
    capabilities: SurfaceCapabilities,
    dispatch_mode: DispatchMode,
    is_valid: bool,
}

impl fmt::Debug for GpuSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpuSurface")
            .field("is_valid", &self.is_valid)
            .field("dispatch_mode", &self.dispatch_mode)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

impl GpuSurface {
    /// Creates a surface over a presentation context and a content renderer.
    ///
    /// Validation is ordered: context first, then the frame renderer built
    /// from it, then the content renderer. The first failure logs an error
    /// and yields an inert surface holding no renderers.
    pub fn new(
        context: Arc<dyn PresentationContext>,
        content_renderer: Arc<dyn ContentRenderer>,
        config: SurfaceConfig,
    ) -> Self {
        let mut surface = Self {
            context,
            frame_renderer: None,
            content_renderer: None,
            capabilities: SurfaceCapabilities::baseline(),
            dispatch_mode: config.dispatch_mode,
            is_valid: false,
        };

        if !surface.context.is_valid() {
            log::error!("Presentation context is invalid; surface disabled.");
            return surface;
        }

        let frame_renderer = FrameRenderer::new(surface.context.clone());
        if !frame_renderer.is_valid() {
            log::error!("Frame renderer failed validation; surface disabled.");
            return surface;
        }

        if !content_renderer.is_valid() {
            log::error!("Content renderer is invalid; surface disabled.");
            return surface;
        }

        log::info!(
            "Surface initialized (dispatch mode: {:?}).",
            surface.dispatch_mode
        );
        surface.frame_renderer = Some(Arc::new(frame_renderer));
        surface.content_renderer = Some(content_renderer);
        surface.is_valid = true;
        surface
    }

    /// Returns the surface's validity. Pure query, no side effects.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Returns the dispatch strategy this surface was configured with.
    pub fn dispatch_mode(&self) -> DispatchMode {
        self.dispatch_mode
    }

    /// Returns the backend capability table.
    pub fn capabilities(&self) -> &SurfaceCapabilities {
        &self.capabilities
    }

    /// Returns the shared content renderer, if the surface is valid.
    pub fn content_renderer(&self) -> Option<Arc<dyn ContentRenderer>> {
        self.content_renderer.clone()
    }

    /// Acquires a presentable target and returns a frame deferring its
    /// submission.
    ///
    /// Exactly one target is acquired per successful call. No retry happens
    /// here; on [`SurfaceError::Acquisition`] the caller's scheduler decides
    /// whether to retry or back off.
    ///
    /// ## Errors
    /// * [`SurfaceError::InvalidBackend`] - the surface failed construction
    ///   validation; no target is acquired, for any size.
    /// * [`SurfaceError::EmptyFrameRequest`] - `size` has zero area; no
    ///   target is acquired.
    /// * [`SurfaceError::Acquisition`] - the backend could not produce a
    ///   target (exhausted, device lost, ...).
    pub fn acquire_frame(&self, size: Extent2D) -> Result<SurfaceFrame, SurfaceError> {
        if !self.is_valid {
            log::error!("Frame requested from an invalid surface.");
            return Err(SurfaceError::InvalidBackend(
                "surface failed construction-time validation".to_string(),
            ));
        }

        if size.is_empty() {
            log::error!("Surface was asked for an empty frame ({size}).");
            return Err(SurfaceError::EmptyFrameRequest(size));
        }

        // Both are Some whenever is_valid holds; construction establishes
        // the invariant.
        let frame_renderer = self
            .frame_renderer
            .as_ref()
            .ok_or_else(|| SurfaceError::InvalidBackend("missing frame renderer".to_string()))?;
        let content_renderer = self
            .content_renderer
            .as_ref()
            .ok_or_else(|| SurfaceError::InvalidBackend("missing content renderer".to_string()))?;

        let target = self.context.acquire_next_target().map_err(|err| {
            log::error!("No presentable target available: {err}");
            SurfaceError::Acquisition(err)
        })?;

        let task = SubmissionTask::new(
            frame_renderer.clone(),
            Arc::downgrade(content_renderer),
            target,
            self.dispatch_mode,
        );

        Ok(SurfaceFrame::new(task, size))
    }

    /// Returns the root transformation. This backend does not support
    /// non-identity root transforms, so this is always identity.
    pub fn root_transformation(&self) -> Transform2D {
        self.capabilities.root_transformation
    }

    /// Returns whether a raster cache below this layer may be enabled.
    /// Always `false`: it is redundant with the content renderer's own
    /// caching.
    pub fn enable_raster_cache(&self) -> bool {
        self.capabilities.raster_cache
    }

    /// Returns the legacy raster context handle. Always `None` for this
    /// backend; callers must branch on the sentinel.
    pub fn legacy_context(&self) -> Option<LegacyRasterContextId> {
        self.capabilities.legacy_context
    }

    /// Makes the render context current on this thread.
    ///
    /// This backend has no thread-bound context, so the call trivially
    /// succeeds.
    pub fn make_context_current(&self) -> Result<(), SurfaceError> {
        debug_assert!(!self.capabilities.thread_bound_context);
        Ok(())
    }
}
