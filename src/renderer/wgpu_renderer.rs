//! WGPU-based renderer implementation for chromeless
//!
//! The chrome is painted on the CPU into a [`Canvas`]; this renderer uploads
//! that canvas into a texture and draws it over the whole window surface.

use crate::renderer::{Canvas, Renderer};
use crate::utils::error::{ChromeError, Result};
use std::sync::Arc;
use winit::window::Window;

use super::pipeline::RenderPipeline;
use super::texture::TextureManager;

/// WGPU renderer implementation
pub struct WgpuRenderer {
    /// WGPU device
    device: wgpu::Device,

    /// WGPU queue for submitting commands
    queue: wgpu::Queue,

    /// Surface configuration
    surface_config: wgpu::SurfaceConfiguration,

    /// Render surface
    surface: wgpu::Surface<'static>,

    /// Render pipeline
    pipeline: RenderPipeline,

    /// Texture manager for the painted frame
    texture_manager: TextureManager,

    /// Largest surface or texture side the device accepts
    max_dimension: u32,
}

impl WgpuRenderer {
    /// Create a renderer drawing into `window`
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let (device, queue, surface, surface_config) = pollster::block_on(Self::init_wgpu(window))?;
        let max_dimension = device.limits().max_texture_dimension_2d;

        let pipeline = RenderPipeline::new(&device, surface_config.format)?;
        let texture_manager = TextureManager::new(&device)?;

        log::info!(
            "Renderer ready: {}x{} {:?}",
            surface_config.width,
            surface_config.height,
            surface_config.format
        );

        Ok(Self {
            device,
            queue,
            surface_config,
            surface,
            pipeline,
            texture_manager,
            max_dimension,
        })
    }

    /// Clamp a window size to what the surface can be configured with
    pub fn fit_size(&self, width: u32, height: u32) -> (u32, u32) {
        fit_to_limit(width, height, self.max_dimension)
    }

    /// Current surface size in physical pixels
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Initialize wgpu instance, device, queue, and surface
    async fn init_wgpu(
        window: Arc<Window>,
    ) -> Result<(wgpu::Device, wgpu::Queue, wgpu::Surface<'static>, wgpu::SurfaceConfiguration)> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let size = window.inner_size();

        let surface = instance
            .create_surface(window)
            .map_err(|e| ChromeError::Renderer(format!("Failed to create surface: {:?}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| ChromeError::Renderer(format!("Failed to find suitable GPU adapter: {:?}", e)))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Chromeless GPU Device"),
                required_features: wgpu::Features::empty(),
                required_limits: device_limits(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| ChromeError::Renderer(format!("Failed to create GPU device: {:?}", e)))?;

        let max_dimension = device.limits().max_texture_dimension_2d;
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| ChromeError::Renderer("Surface reports no texture formats".to_string()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.clamp(1, max_dimension),
            height: size.height.clamp(1, max_dimension),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        Ok((device, queue, surface, surface_config))
    }

    /// Reconfigure the surface (e.g., after resize or lost surface)
    fn reconfigure_surface(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
    }
}

impl Renderer for WgpuRenderer {
    fn present(&mut self, canvas: &Canvas) -> Result<()> {
        if canvas.width() == 0 || canvas.height() == 0 {
            return Ok(());
        }
        if canvas.width() > self.max_dimension || canvas.height() > self.max_dimension {
            return Err(ChromeError::Renderer(format!(
                "Canvas {}x{} exceeds the {} px texture limit",
                canvas.width(),
                canvas.height(),
                self.max_dimension
            )));
        }

        if self.texture_manager.upload(&self.device, &self.queue, canvas)? {
            self.pipeline.invalidate_bind_group();
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure_surface();
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(ChromeError::Renderer("Out of GPU memory".to_string()));
            }
            Err(e) => {
                log::warn!("Surface texture acquisition failed: {:?}", e);
                return Ok(());
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        self.pipeline
            .render_frame(&self.device, &mut encoder, &view, &self.texture_manager)?;

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        // Minimized windows report a zero size; keep the last configuration.
        if width == 0 || height == 0 {
            return Ok(());
        }

        let (width, height) = self.fit_size(width, height);
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.reconfigure_surface();

        log::debug!("Surface resized to {}x{}", width, height);
        Ok(())
    }
}

/// Default limits, with texture sizes raised to whatever the adapter offers
fn device_limits(adapter: wgpu::Limits) -> wgpu::Limits {
    wgpu::Limits::default().using_resolution(adapter)
}

fn fit_to_limit(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    (width.min(max_dimension), height.min(max_dimension))
}
