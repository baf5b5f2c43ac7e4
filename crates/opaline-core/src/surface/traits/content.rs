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

//! Contracts presented by the content-rendering engine (drawing side).
//!
//! The content renderer is the stateful engine that converts resolved
//! display commands into GPU draw calls. It owns per-frame caches (glyph
//! atlas, transient host buffers) whose reset timing is driven by the
//! submission protocol, not by the renderer itself.

use crate::math::Extent2D;
use crate::surface::error::ContentError;
use crate::surface::traits::RenderTarget;
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// A blend mode attached to display-list content.
///
/// The discriminant order is from most to least restrictive, so the
/// "dominant" blend mode of a subtree is simply the maximum. Only the root
/// content's dominant mode matters to the submission protocol; it
/// parameterizes the direct-dispatch path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlendMode {
    /// Destination pixels are cleared.
    Clear,
    /// Source replaces destination.
    Src,
    /// Destination is kept unchanged.
    Dst,
    /// Source over destination (the common case).
    SrcOver,
    /// Destination over source.
    DstOver,
    /// Source where the destination has coverage.
    SrcIn,
    /// Destination where the source has coverage.
    DstIn,
    /// Source where the destination has no coverage.
    SrcOut,
    /// Destination where the source has no coverage.
    DstOut,
    /// Source atop destination.
    SrcAtop,
    /// Destination atop source.
    DstAtop,
    /// Exclusive-or of source and destination coverage.
    Xor,
    /// Saturating component-wise sum.
    Plus,
    /// Component-wise product.
    Modulate,
    /// Inverted product of inverted components.
    Screen,
    /// Multiply, reading the destination.
    Multiply,
}

impl Default for BlendMode {
    fn default() -> Self {
        BlendMode::SrcOver
    }
}

/// A concrete, already-resolved drawable produced from a display list.
///
/// The payload is opaque to the submission protocol; a content renderer
/// stores whatever intermediate representation it records and retrieves it
/// with [`Picture::payload`].
#[derive(Debug, Clone)]
pub struct Picture {
    bounds: Extent2D,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Picture {
    /// Creates a picture with the given bounds and renderer-specific payload.
    pub fn new(bounds: Extent2D, payload: Arc<dyn Any + Send + Sync>) -> Self {
        Self { bounds, payload }
    }

    /// Returns the bounds the picture was recorded against. Recording clips
    /// to the render target's pixel rectangle, so these never exceed the
    /// target extent.
    pub fn bounds(&self) -> Extent2D {
        self.bounds
    }

    /// Returns the renderer-specific payload, if it is of type `T`.
    pub fn payload<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.payload.downcast_ref()
    }
}

/// A deferred, resolvable description of one frame's drawing operations.
pub trait DisplayCommandSource {
    /// Resolves the source into a concrete display list.
    ///
    /// Returns `None` when there is nothing to draw (an empty or cancelled
    /// frame); the submission protocol treats that as a dropped frame and
    /// issues no GPU work.
    fn resolve(&self) -> Option<Arc<dyn DisplayList>>;
}

/// A resolved display-command buffer for one frame.
pub trait DisplayList: Send + Sync + Debug {
    /// Returns `true` if the root content carries a backdrop filter.
    fn root_has_backdrop_filter(&self) -> bool;

    /// Returns the dominant blend mode of the root content.
    fn max_root_blend_mode(&self) -> BlendMode;

    /// Downcast support so content renderers can reach their own list type.
    fn as_any(&self) -> &dyn Any;
}

/// Parameters for the direct-dispatch rendering path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectDispatchParams {
    /// Whether the root content carries a backdrop filter.
    pub root_has_backdrop_filter: bool,
    /// The dominant blend mode of the root content.
    pub max_root_blend_mode: BlendMode,
    /// The render target's pixel rectangle.
    pub cull_rect: Extent2D,
}

/// The stateful rendering engine that turns display lists into GPU work.
///
/// Shared across frames; its per-frame caches are mutated once per frame.
/// The backend contract is "one active frame's GPU work at a time", enforced
/// by the caller's frame scheduler rather than by internal locking.
pub trait ContentRenderer: Send + Sync + Debug {
    /// Returns `true` while the renderer is usable.
    fn is_valid(&self) -> bool;

    /// Records the display list into an intermediate picture bounded by
    /// `cull_rect` (the direct-picture path).
    fn record_picture(
        &self,
        list: &dyn DisplayList,
        cull_rect: Extent2D,
    ) -> Result<Picture, ContentError>;

    /// Renders a recorded picture into the destination.
    ///
    /// `reset_host_buffer` recycles the per-frame transient host buffers as
    /// part of this call; passing `false` defers the reset to a later frame
    /// boundary.
    fn render_picture(
        &self,
        picture: &Picture,
        destination: &mut dyn RenderTarget,
        reset_host_buffer: bool,
    ) -> Result<(), ContentError>;

    /// Walks the display list to pre-resolve text and glyph placement
    /// (the direct-dispatch pre-pass).
    fn collect_text_frames(&self, list: &dyn DisplayList, cull_rect: Extent2D);

    /// Dispatches the display list directly into the destination, without
    /// an intermediate picture.
    fn dispatch_list(
        &self,
        list: &dyn DisplayList,
        destination: &mut dyn RenderTarget,
        params: &DirectDispatchParams,
    ) -> Result<(), ContentError>;

    /// Recycles the per-frame transient host buffers.
    fn reset_transient_buffers(&self);

    /// Clears the glyph atlas's per-frame text cache.
    fn reset_glyph_atlas(&self);
}
