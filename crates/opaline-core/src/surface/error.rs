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

//! Defines the hierarchy of error types for the presentation-surface layer.
//!
//! All errors here are non-fatal to the process: every failure degrades to
//! "this frame was dropped", visible at most as a skipped or duplicated
//! visual frame. No operation in this crate panics on a protocol error.

use crate::math::Extent2D;
use std::fmt;

/// An error reported by the presentation backend while acquiring or
/// presenting a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// The backend has no presentable target available right now.
    ///
    /// Retry policy, if any, belongs to the caller's frame scheduler.
    Exhausted,
    /// The graphics device was lost. The owning context becomes permanently
    /// invalid and the surface must be torn down and rebuilt.
    DeviceLost,
    /// Any other backend-specific acquisition or presentation failure.
    Backend(String),
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetError::Exhausted => {
                write!(f, "No presentable target available from the backend.")
            }
            TargetError::DeviceLost => write!(f, "The graphics device was lost."),
            TargetError::Backend(msg) => write!(f, "Presentation backend error: {msg}"),
        }
    }
}

impl std::error::Error for TargetError {}

/// An error reported by the content renderer while converting a picture or
/// command list into GPU work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The content renderer has been released and is no longer reachable
    /// from the submission task.
    Unavailable,
    /// A backend-specific rendering failure. Rendering is treated as atomic:
    /// no partially-submitted state is observable after this error.
    Backend(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Unavailable => {
                write!(f, "The content renderer is no longer available.")
            }
            ContentError::Backend(msg) => write!(f, "Content renderer error: {msg}"),
        }
    }
}

impl std::error::Error for ContentError {}

/// A high-level error produced by the surface facade or a frame's
/// submission task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface failed construction-time validation and is permanently
    /// inert. Acquisition on an invalid surface always reports this.
    InvalidBackend(String),
    /// A frame was requested with a zero-area extent. No backend target was
    /// acquired; retrying with the same extent will fail again.
    EmptyFrameRequest(Extent2D),
    /// Target acquisition failed inside the presentation backend.
    Acquisition(TargetError),
    /// The display-command source failed to resolve into a drawable list.
    /// No GPU work was issued; the acquired target was released unused.
    CommandResolutionFailed,
    /// The content renderer rejected or failed the rendering work.
    Content(ContentError),
    /// The frame's submission task was already consumed. Submission is
    /// single-shot; a second invocation observes the empty target slot.
    AlreadySubmitted,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::InvalidBackend(msg) => {
                write!(f, "The rendering backend is invalid: {msg}")
            }
            SurfaceError::EmptyFrameRequest(extent) => {
                write!(f, "A frame was requested with empty extent {extent}.")
            }
            SurfaceError::Acquisition(err) => {
                write!(f, "Failed to acquire a presentable target: {err}")
            }
            SurfaceError::CommandResolutionFailed => {
                write!(f, "The display-command source could not be resolved.")
            }
            SurfaceError::Content(err) => {
                write!(f, "Content rendering failed: {err}")
            }
            SurfaceError::AlreadySubmitted => {
                write!(f, "The frame was already submitted.")
            }
        }
    }
}

impl std::error::Error for SurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurfaceError::Acquisition(err) => Some(err),
            SurfaceError::Content(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TargetError> for SurfaceError {
    fn from(err: TargetError) -> Self {
        SurfaceError::Acquisition(err)
    }
}

impl From<ContentError> for SurfaceError {
    fn from(err: ContentError) -> Self {
        SurfaceError::Content(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn target_error_display() {
        assert_eq!(
            format!("{}", TargetError::Exhausted),
            "No presentable target available from the backend."
        );
        assert_eq!(
            format!("{}", TargetError::Backend("swapchain out of date".to_string())),
            "Presentation backend error: swapchain out of date"
        );
    }

    #[test]
    fn surface_error_display_wrapping_target_error() {
        let err: SurfaceError = TargetError::DeviceLost.into();
        assert_eq!(
            format!("{err}"),
            "Failed to acquire a presentable target: The graphics device was lost."
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn surface_error_display_wrapping_content_error() {
        let err: SurfaceError = ContentError::Unavailable.into();
        assert_eq!(
            format!("{err}"),
            "Content rendering failed: The content renderer is no longer available."
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn empty_frame_request_reports_the_extent() {
        let err = SurfaceError::EmptyFrameRequest(Extent2D::new(0, 1080));
        assert_eq!(
            format!("{err}"),
            "A frame was requested with empty extent 0x1080."
        );
        assert!(err.source().is_none());
    }
}
