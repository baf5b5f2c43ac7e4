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

//! Contracts presented by the presentation backend (swapchain side).
//!
//! The surface layer never talks to a graphics API directly. It consumes a
//! [`PresentationContext`] that owns the device/queue and hands out one
//! [`PresentableTarget`] per frame; the target's [`RenderTarget`] is the
//! concrete destination the content renderer draws into.

use crate::math::Extent2D;
use crate::surface::error::TargetError;
use std::any::Any;
use std::fmt::Debug;

/// Backend-agnostic metadata describing a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// The renderable area of the target in pixels. This extent defines the
    /// cull rect for all drawing against the target.
    pub extent: Extent2D,
}

/// The connection to the graphics API that produces presentable targets.
///
/// Owned by the embedding shell and shared with the surface. Acquisition is
/// synchronous: [`PresentationContext::acquire_next_target`] blocks until a
/// target is obtained or acquisition fails. No timeout is imposed here; if
/// the presentation backend blocks, this call blocks.
pub trait PresentationContext: Send + Sync + Debug + 'static {
    /// Returns `true` while the underlying device and swapchain are usable.
    ///
    /// Once this returns `false` (for example after device loss) it never
    /// returns `true` again for the same context.
    fn is_valid(&self) -> bool;

    /// Acquires the next presentable target from the swapchain.
    ///
    /// ## Errors
    /// * [`TargetError::Exhausted`] - the backend has no target available;
    ///   the caller decides whether and when to retry.
    /// * [`TargetError::DeviceLost`] - the device is gone and the context is
    ///   permanently invalid.
    fn acquire_next_target(&self) -> Result<Box<dyn PresentableTarget>, TargetError>;
}

/// One swapchain image, exclusively owned by a single frame.
///
/// A target must be consumed through [`PresentableTarget::present`] exactly
/// once, or dropped to release it without presentation. Ownership (`Box` +
/// by-value `present`) enforces the at-most-once presentation rule at
/// compile time.
pub trait PresentableTarget: Send + Debug {
    /// Returns the target's metadata; the extent is the frame's cull rect.
    fn descriptor(&self) -> TargetDescriptor;

    /// Returns the concrete render destination for this target.
    fn render_target(&mut self) -> &mut dyn RenderTarget;

    /// Submits the target for presentation, consuming it.
    fn present(self: Box<Self>) -> Result<(), TargetError>;
}

/// The concrete destination a content renderer draws into.
///
/// Concrete renderers downcast through [`RenderTarget::as_any_mut`] to reach
/// backend-specific resources (texture views, attachments, ...).
pub trait RenderTarget: Debug {
    /// Returns the destination's metadata.
    fn descriptor(&self) -> TargetDescriptor;

    /// Downcast support for backend-specific access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
