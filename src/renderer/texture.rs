//! Texture management for painted frames
//!
//! This module owns the GPU texture the CPU canvas is uploaded into. The
//! texture is recreated whenever the canvas size changes.

use crate::renderer::Canvas;
use crate::utils::error::{ChromeError, Result};

/// Texture manager for the chrome frame
pub struct TextureManager {
    /// RGBA texture holding the last uploaded canvas
    frame_texture: Option<wgpu::Texture>,

    /// View over `frame_texture`
    frame_view: Option<wgpu::TextureView>,

    /// Texture sampler
    sampler: wgpu::Sampler,

    /// Current texture dimensions
    current_dimensions: Option<(u32, u32)>,
}

impl TextureManager {
    /// Create a new texture manager
    pub fn new(device: &wgpu::Device) -> Result<Self> {
        // The canvas matches the surface pixel for pixel, so sample nearest.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Frame Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            frame_texture: None,
            frame_view: None,
            sampler,
            current_dimensions: None,
        })
    }

    /// Upload the canvas, recreating the texture if the size changed.
    ///
    /// Returns `true` when the texture was recreated, so bind groups that
    /// reference the old view must be rebuilt.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, canvas: &Canvas) -> Result<bool> {
        let dimensions = (canvas.width(), canvas.height());
        if dimensions.0 == 0 || dimensions.1 == 0 {
            return Err(ChromeError::InvalidInput("Cannot upload an empty canvas".to_string()));
        }

        let recreated = self.current_dimensions != Some(dimensions);
        if recreated {
            self.create_texture(device, dimensions);
            self.current_dimensions = Some(dimensions);
        }

        let texture = self
            .frame_texture
            .as_ref()
            .ok_or_else(|| ChromeError::Renderer("Frame texture not initialized".to_string()))?;

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            canvas.pixels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            wgpu::Extent3d {
                width: dimensions.0,
                height: dimensions.1,
                depth_or_array_layers: 1,
            },
        );

        Ok(recreated)
    }

    /// Get the texture view and sampler for binding
    pub fn frame_view(&self) -> Result<(&wgpu::TextureView, &wgpu::Sampler)> {
        let view = self
            .frame_view
            .as_ref()
            .ok_or_else(|| ChromeError::Renderer("Frame texture not initialized".to_string()))?;
        Ok((view, &self.sampler))
    }

    fn create_texture(&mut self, device: &wgpu::Device, (width, height): (u32, u32)) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Chrome Frame Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.frame_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.frame_texture = Some(texture);
    }
}
