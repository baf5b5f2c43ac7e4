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

//! Defines the collaborator contracts consumed by the surface layer.
//!
//! These traits decouple the frame submission protocol from any concrete
//! graphics backend or drawing engine:
//!
//! - [`PresentationContext`]: owns the device/queue and produces targets.
//! - [`PresentableTarget`] / [`RenderTarget`]: one swapchain image and its
//!   concrete render destination.
//! - [`ContentRenderer`]: the stateful engine that turns display lists into
//!   GPU work.
//! - [`DisplayCommandSource`] / [`DisplayList`] / [`Picture`]: the deferred
//!   command representation and its resolved forms.

mod content;
mod presentation;

pub use self::content::{
    BlendMode, ContentRenderer, DirectDispatchParams, DisplayCommandSource, DisplayList, Picture,
};
pub use self::presentation::{
    PresentableTarget, PresentationContext, RenderTarget, TargetDescriptor,
};
