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

//! The WGPU presentation context: device, queue, and swapchain state.

use crate::convert::map_surface_error;
use crate::target::WgpuPresentableTarget;
use anyhow::{anyhow, Result};
use opaline_core::math::Extent2D;
use opaline_core::surface::traits::{PresentableTarget, PresentationContext};
use opaline_core::surface::TargetError;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use wgpu::SurfaceTargetUnsafe;

/// Holds the core WGPU state required to present to one window surface.
///
/// The context is initialized with a pre-selected adapter and owns the
/// logical device, the command queue, and the swapchain configuration. It
/// hands out one [`WgpuPresentableTarget`] per acquisition and becomes
/// permanently invalid if the device is lost.
#[derive(Debug)]
pub struct WgpuPresentationContext {
    surface: wgpu::Surface<'static>,
    #[allow(dead_code)]
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    // Swapchain behavior; taken under lock so resizes can happen while the
    // context is shared.
    surface_config: Mutex<wgpu::SurfaceConfiguration>,

    // Latched false on device loss, never set true again.
    valid: AtomicBool,
}

impl WgpuPresentationContext {
    /// Asynchronously initializes the presentation context for a window.
    ///
    /// ## Arguments
    /// * `instance` - A reference to the shared `wgpu::Instance`.
    /// * `window` - Any object providing raw window and display handles.
    /// * `adapter` - The pre-selected `wgpu::Adapter` to use.
    /// * `initial_extent` - The initial physical size of the window surface.
    ///
    /// ## Errors
    /// Fails if the native surface cannot be created or the logical device
    /// request is rejected.
    pub async fn new<W>(
        instance: &wgpu::Instance,
        window: &W,
        adapter: wgpu::Adapter,
        initial_extent: Extent2D,
    ) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle,
    {
        log::info!("Initializing WGPU presentation context...");

        let surface_target = unsafe {
            SurfaceTargetUnsafe::from_window(window)
                .map_err(|e| anyhow!("Failed to create surface target: {e}"))?
        };
        let surface = unsafe { instance.create_surface_unsafe(surface_target)? };
        log::debug!("WGPU surface created for the window.");

        let adapter_info = adapter.get_info();
        log::info!(
            "Using graphics adapter: \"{}\" (Backend: {:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Opaline Presentation Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
            })
            .await
            .map_err(|e| anyhow!("Failed to create logical device: {e}"))?;
        log::info!("Logical device and command queue created.");

        device.on_uncaptured_error(Box::new(|e| {
            log::error!("WGPU uncaptured error: {e:?}");
        }));

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: initial_extent.width.max(1),
            height: initial_extent.height.max(1),
            present_mode: surface_caps
                .present_modes
                .iter()
                .copied()
                .find(|m| *m == wgpu::PresentMode::Mailbox)
                .unwrap_or(wgpu::PresentMode::Fifo), // Fifo is always supported
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        Ok(Self {
            surface,
            adapter,
            device,
            queue,
            surface_config: Mutex::new(surface_config),
            valid: AtomicBool::new(true),
        })
    }

    /// Blocking variant of [`WgpuPresentationContext::new`] for embedders
    /// without an async runtime.
    pub fn new_blocking<W>(
        instance: &wgpu::Instance,
        window: &W,
        adapter: wgpu::Adapter,
        initial_extent: Extent2D,
    ) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle,
    {
        pollster::block_on(Self::new(instance, window, adapter, initial_extent))
    }

    /// Reconfigures the swapchain when the window is resized.
    ///
    /// Zero-area requests are ignored with a warning; the swapchain keeps
    /// its previous configuration.
    pub fn resize(&self, new_extent: Extent2D) {
        if new_extent.is_empty() {
            log::warn!("Ignoring resize request to zero dimensions: {new_extent}");
            return;
        }
        log::info!("Resizing surface configuration to {new_extent}");
        let mut config = self
            .surface_config
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        config.width = new_extent.width;
        config.height = new_extent.height;
        self.surface.configure(&self.device, &config);
    }

    /// Returns the currently configured swapchain extent.
    pub fn extent(&self) -> Extent2D {
        let config = self
            .surface_config
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Extent2D::new(config.width, config.height)
    }

    /// Returns the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}

impl PresentationContext for WgpuPresentationContext {
    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::SeqCst)
    }

    fn acquire_next_target(&self) -> Result<Box<dyn PresentableTarget>, TargetError> {
        if !self.is_valid() {
            return Err(TargetError::DeviceLost);
        }
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(Box::new(WgpuPresentableTarget::new(texture))),
            Err(err) => {
                let mapped = map_surface_error(err);
                if mapped == TargetError::DeviceLost {
                    log::error!("Graphics device lost; presentation context disabled.");
                    self.valid.store(false, Ordering::SeqCst);
                }
                Err(mapped)
            }
        }
    }
}
