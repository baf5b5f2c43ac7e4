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

//! One acquired swapchain image and its render destination.

use opaline_core::math::Extent2D;
use opaline_core::surface::traits::{PresentableTarget, RenderTarget, TargetDescriptor};
use opaline_core::surface::TargetError;
use std::any::Any;

/// The concrete WGPU render destination backing a presentable target.
///
/// Content renderers reach this type through
/// [`RenderTarget::as_any_mut`] to attach the color view to their render
/// passes.
#[derive(Debug)]
pub struct WgpuRenderTarget {
    view: wgpu::TextureView,
    format: wgpu::TextureFormat,
    extent: Extent2D,
}

impl WgpuRenderTarget {
    /// Returns the color attachment view for this target.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Returns the texture format of the swapchain image.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

impl RenderTarget for WgpuRenderTarget {
    fn descriptor(&self) -> TargetDescriptor {
        TargetDescriptor {
            extent: self.extent,
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One swapchain image acquired from a [`WgpuPresentationContext`].
///
/// Presentation consumes the target; dropping it instead returns the image
/// to the swapchain without presenting.
///
/// [`WgpuPresentationContext`]: crate::WgpuPresentationContext
#[derive(Debug)]
pub struct WgpuPresentableTarget {
    texture: wgpu::SurfaceTexture,
    destination: WgpuRenderTarget,
}

impl WgpuPresentableTarget {
    pub(crate) fn new(texture: wgpu::SurfaceTexture) -> Self {
        let extent = Extent2D::new(texture.texture.width(), texture.texture.height());
        let format = texture.texture.format();
        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            destination: WgpuRenderTarget {
                view,
                format,
                extent,
            },
        }
    }
}

impl PresentableTarget for WgpuPresentableTarget {
    fn descriptor(&self) -> TargetDescriptor {
        self.destination.descriptor()
    }

    fn render_target(&mut self) -> &mut dyn RenderTarget {
        &mut self.destination
    }

    fn present(self: Box<Self>) -> Result<(), TargetError> {
        let this = *self;
        this.texture.present();
        Ok(())
    }
}
