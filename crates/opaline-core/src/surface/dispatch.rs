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

//! Render-mode dispatch strategies and surface configuration.
//!
//! Two mutually exclusive strategies convert a resolved display list into
//! GPU work. Both must produce equivalent visual output for the same input;
//! the choice is a performance/architecture trade, not a semantic one, and
//! is made once at surface construction.

use serde::{Deserialize, Serialize};

/// The strategy used to convert a resolved display list into GPU work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Record the display list into an intermediate picture bounded by the
    /// target's pixel rectangle, then render the picture. Transient host
    /// buffers are recycled when the frame is a logical frame boundary.
    DirectPicture,
    /// Walk the display list twice: a lightweight pre-pass resolving text
    /// and glyph placement, then a direct dispatch into the destination
    /// parameterized by the root content's backdrop filter and dominant
    /// blend mode. Trades the extra traversal for skipping the intermediate
    /// picture. Transient buffers and the glyph text cache are reset
    /// explicitly afterwards.
    DirectDispatch,
}

impl Default for DispatchMode {
    fn default() -> Self {
        DispatchMode::DirectPicture
    }
}

/// Construction-time configuration for a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// The render-mode dispatch strategy.
    pub dispatch_mode: DispatchMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_direct_picture() {
        assert_eq!(DispatchMode::default(), DispatchMode::DirectPicture);
        assert_eq!(
            SurfaceConfig::default().dispatch_mode,
            DispatchMode::DirectPicture
        );
    }
}
