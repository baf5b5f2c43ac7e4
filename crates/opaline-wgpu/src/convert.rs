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

//! Conversions between WGPU types and the backend-agnostic contracts.

use opaline_core::surface::TargetError;

/// Maps a WGPU surface error onto the abstract target error.
///
/// `Timeout` and `Outdated` are transient: the swapchain simply has no
/// usable image right now and the caller may retry on a later frame. `Lost`
/// is terminal for the context.
pub(crate) fn map_surface_error(err: wgpu::SurfaceError) -> TargetError {
    match err {
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Outdated => TargetError::Exhausted,
        wgpu::SurfaceError::Lost => TargetError::DeviceLost,
        wgpu::SurfaceError::OutOfMemory => {
            TargetError::Backend("the backend is out of memory".to_string())
        }
        wgpu::SurfaceError::Other => {
            TargetError::Backend("unclassified surface error".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_map_to_exhausted() {
        assert_eq!(
            map_surface_error(wgpu::SurfaceError::Timeout),
            TargetError::Exhausted
        );
        assert_eq!(
            map_surface_error(wgpu::SurfaceError::Outdated),
            TargetError::Exhausted
        );
    }

    #[test]
    fn lost_maps_to_device_lost() {
        assert_eq!(
            map_surface_error(wgpu::SurfaceError::Lost),
            TargetError::DeviceLost
        );
    }

    #[test]
    fn remaining_errors_map_to_backend() {
        assert!(matches!(
            map_surface_error(wgpu::SurfaceError::OutOfMemory),
            TargetError::Backend(_)
        ));
    }
}
