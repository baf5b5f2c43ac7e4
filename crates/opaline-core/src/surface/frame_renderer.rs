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

//! The per-frame GPU work executor.

use crate::surface::error::SurfaceError;
use crate::surface::traits::{PresentableTarget, PresentationContext, RenderTarget};
use std::fmt;
use std::sync::Arc;

/// Executes one unit of GPU work against a presentable target and submits
/// the result for presentation.
///
/// The renderer wraps the shared [`PresentationContext`] and owns no
/// per-frame state; it is shared by every in-flight frame of a surface.
pub struct FrameRenderer {
    context: Arc<dyn PresentationContext>,
}

impl fmt::Debug for FrameRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRenderer")
            .field("context", &self.context)
            .finish()
    }
}

impl FrameRenderer {
    /// Creates a frame renderer over the given presentation context.
    pub fn new(context: Arc<dyn PresentationContext>) -> Self {
        Self { context }
    }

    /// Returns `true` while the underlying context is usable.
    pub fn is_valid(&self) -> bool {
        self.context.is_valid()
    }

    /// Runs `work` against the target's render destination and presents the
    /// target.
    ///
    /// The render-and-present cycle is atomic from the caller's point of
    /// view: if `work` fails, the target is dropped without presentation
    /// (the swapchain image is released unused) and the error propagates.
    /// Success means the target was presented exactly once.
    pub fn render<F>(
        &self,
        mut target: Box<dyn PresentableTarget>,
        work: F,
    ) -> Result<(), SurfaceError>
    where
        F: FnOnce(&mut dyn RenderTarget) -> Result<(), SurfaceError>,
    {
        work(target.render_target())?;
        target.present().map_err(SurfaceError::from)
    }
}
