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

//! # Opaline WGPU
//!
//! The concrete, WGPU-based presentation backend. Implements the
//! `opaline-core` [`PresentationContext`] contract over a window surface:
//! swapchain configuration, per-frame target acquisition, and presentation.
//!
//! [`PresentationContext`]: opaline_core::surface::PresentationContext

#![warn(missing_docs)]

mod context;
mod convert;
mod target;

pub use context::WgpuPresentationContext;
pub use target::{WgpuPresentableTarget, WgpuRenderTarget};
