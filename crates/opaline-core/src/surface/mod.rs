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

//! The presentation-surface layer and its frame submission protocol.
//!
//! This module is the "common language" between a display-command producer
//! and a GPU presentation backend. It defines the abstract collaborator
//! `traits` (like [`PresentationContext`] and [`ContentRenderer`]), the
//! [`GpuSurface`] facade that validates the backend and acquires one
//! presentable target per frame, and the [`SurfaceFrame`] /
//! [`SubmissionTask`] pair that defers rendering work and guarantees the
//! target is presented or released exactly once.
//!
//! Concrete backends live elsewhere (e.g. the wgpu presentation context in
//! the `opaline-wgpu` crate) and plug in by implementing these traits.

pub mod capabilities;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod frame_renderer;
pub mod gpu_surface;
pub mod traits;

// Re-export the most important types for easier use.
pub use self::capabilities::{LegacyRasterContextId, SurfaceCapabilities};
pub use self::dispatch::{DispatchMode, SurfaceConfig};
pub use self::error::{ContentError, SurfaceError, TargetError};
pub use self::frame::{FramebufferInfo, SubmissionTask, SubmitInfo, SurfaceFrame};
pub use self::frame_renderer::FrameRenderer;
pub use self::gpu_surface::GpuSurface;
pub use self::traits::{ContentRenderer, PresentationContext};
