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

//! The per-frame value produced by a surface and its deferred submission
//! task.
//!
//! A [`SurfaceFrame`] is created by frame acquisition and handed to the
//! external frame scheduler, which later supplies the resolved display
//! commands and calls [`SurfaceFrame::submit`]. The captured target is
//! exclusively owned by the frame until then; submission transfers it into
//! the render call, and a frame dropped without submission releases it
//! unpresented (the cancelled-frame path).

use crate::math::Extent2D;
use crate::surface::dispatch::DispatchMode;
use crate::surface::error::{ContentError, SurfaceError};
use crate::surface::frame_renderer::FrameRenderer;
use crate::surface::traits::{
    ContentRenderer, DirectDispatchParams, DisplayCommandSource, PresentableTarget,
};
use std::fmt;
use std::sync::{Arc, Weak};

/// Scheduler-provided metadata supplied at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitInfo {
    /// Whether this frame completes a logical presentation unit. Controls
    /// whether per-frame transient host buffers are recycled during this
    /// submission or deferred.
    pub frame_boundary: bool,
}

impl Default for SubmitInfo {
    fn default() -> Self {
        Self {
            frame_boundary: true,
        }
    }
}

/// Backend-agnostic framebuffer metadata attached to a frame.
///
/// This backend reports the defaults: no readback support and no partial
/// repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FramebufferInfo {
    /// Whether the framebuffer contents can be read back after submission.
    pub supports_readback: bool,
    /// Whether the backend can retain and partially repaint the previous
    /// frame's contents.
    pub supports_partial_repaint: bool,
}

/// The deferred, single-shot unit of work that renders and presents one
/// acquired target.
///
/// The task captures shared handles to the frame renderer and content
/// renderer plus an owning slot for the target. [`SubmissionTask::submit`]
/// takes the target out of the slot, so a second invocation observes an
/// empty slot and fails deterministically instead of reusing a consumed
/// resource.
pub struct SubmissionTask {
    frame_renderer: Arc<FrameRenderer>,
    // Weak so "the content renderer was released" is an observable state
    // rather than an unreachable branch.
    content_renderer: Weak<dyn ContentRenderer>,
    target: Option<Box<dyn PresentableTarget>>,
    mode: DispatchMode,
}

impl fmt::Debug for SubmissionTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionTask")
            .field("mode", &self.mode)
            .field("target", &self.target)
            .field("consumed", &self.target.is_none())
            .finish()
    }
}

impl SubmissionTask {
    pub(crate) fn new(
        frame_renderer: Arc<FrameRenderer>,
        content_renderer: Weak<dyn ContentRenderer>,
        target: Box<dyn PresentableTarget>,
        mode: DispatchMode,
    ) -> Self {
        Self {
            frame_renderer,
            content_renderer,
            target: Some(target),
            mode,
        }
    }

    /// Returns `true` once the task has consumed its target.
    pub fn is_consumed(&self) -> bool {
        self.target.is_none()
    }

    /// Resolves the command source and drives the render-and-present cycle.
    ///
    /// ## Errors
    /// * [`SurfaceError::Content`] with [`ContentError::Unavailable`] - the
    ///   content renderer was released; the target slot is left untouched.
    /// * [`SurfaceError::AlreadySubmitted`] - the task was already consumed.
    /// * [`SurfaceError::CommandResolutionFailed`] - the source did not
    ///   resolve; the target is released unused and no GPU work is issued.
    /// * Any error propagated from the content renderer or presentation.
    pub fn submit(
        &mut self,
        info: &SubmitInfo,
        source: &dyn DisplayCommandSource,
    ) -> Result<(), SurfaceError> {
        // Checked before the target slot so an unavailable renderer has no
        // side effects.
        let content = self
            .content_renderer
            .upgrade()
            .ok_or(SurfaceError::Content(ContentError::Unavailable))?;

        let target = self.target.take().ok_or(SurfaceError::AlreadySubmitted)?;

        let Some(list) = source.resolve() else {
            log::error!("Could not resolve the display-command source for the frame.");
            return Err(SurfaceError::CommandResolutionFailed);
        };

        let cull_rect = target.descriptor().extent;
        let mode = self.mode;
        let frame_boundary = info.frame_boundary;

        self.frame_renderer.render(target, |destination| {
            match mode {
                DispatchMode::DirectPicture => {
                    let picture = content.record_picture(list.as_ref(), cull_rect)?;
                    content.render_picture(&picture, destination, frame_boundary)?;
                }
                DispatchMode::DirectDispatch => {
                    content.collect_text_frames(list.as_ref(), cull_rect);
                    let params = DirectDispatchParams {
                        root_has_backdrop_filter: list.root_has_backdrop_filter(),
                        max_root_blend_mode: list.max_root_blend_mode(),
                        cull_rect,
                    };
                    content.dispatch_list(list.as_ref(), destination, &params)?;
                    content.reset_transient_buffers();
                    content.reset_glyph_atlas();
                }
            }
            Ok(())
        })
    }
}

impl Drop for SubmissionTask {
    fn drop(&mut self) {
        if self.target.is_some() {
            log::debug!("Presentable target dropped without submission.");
        }
    }
}

/// A frame produced by [`GpuSurface::acquire_frame`], consumed at most once
/// by the external frame scheduler.
///
/// [`GpuSurface::acquire_frame`]: crate::surface::GpuSurface::acquire_frame
#[derive(Debug)]
pub struct SurfaceFrame {
    task: SubmissionTask,
    size: Extent2D,
    framebuffer_info: FramebufferInfo,
    supports_fallback_display_list: bool,
}

impl SurfaceFrame {
    pub(crate) fn new(task: SubmissionTask, size: Extent2D) -> Self {
        Self {
            task,
            size,
            framebuffer_info: FramebufferInfo::default(),
            supports_fallback_display_list: true,
        }
    }

    /// Returns the size the frame was requested with.
    pub fn size(&self) -> Extent2D {
        self.size
    }

    /// Returns the framebuffer metadata for this frame.
    pub fn framebuffer_info(&self) -> FramebufferInfo {
        self.framebuffer_info
    }

    /// Returns `true` if the scheduler may fall back to replaying a display
    /// list for this frame. Always `true` for this backend.
    pub fn supports_fallback_display_list(&self) -> bool {
        self.supports_fallback_display_list
    }

    /// Returns `true` once the frame has been submitted.
    pub fn is_submitted(&self) -> bool {
        self.task.is_consumed()
    }

    /// Renders the resolved display commands against the captured target and
    /// presents it. Single-shot; see [`SubmissionTask::submit`].
    pub fn submit(
        &mut self,
        info: &SubmitInfo,
        source: &dyn DisplayCommandSource,
    ) -> Result<(), SurfaceError> {
        self.task.submit(info, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_info_defaults_to_frame_boundary() {
        assert!(SubmitInfo::default().frame_boundary);
    }

    #[test]
    fn framebuffer_info_defaults_to_no_capabilities() {
        let info = FramebufferInfo::default();
        assert!(!info.supports_readback);
        assert!(!info.supports_partial_repaint);
    }
}
