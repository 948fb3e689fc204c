use anyhow::{Context, Result};

use geoforge_geo::Nswe;

use crate::render::RenderCtx;

use super::geometry::ATLAS_ROWS_COLS;

/// CPU-side RGBA pixels for the NSWE tile atlas.
///
/// Square, side divisible by the tile-grid dimension; tile `n` occupies the
/// grid slot `(n / 4, n % 4)` matching the UV table in `geometry`.
#[derive(Debug, Clone)]
pub struct AtlasImage {
    size: u32,
    rgba: Vec<u8>,
}

impl AtlasImage {
    /// Decodes a user-supplied PNG atlas.
    pub fn decode_png(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .context("failed to decode NSWE atlas png")?
            .to_rgba8();

        anyhow::ensure!(
            img.width() == img.height(),
            "NSWE atlas must be square, got {}x{}",
            img.width(),
            img.height()
        );
        anyhow::ensure!(
            img.width() as usize % ATLAS_ROWS_COLS == 0,
            "NSWE atlas side {} is not divisible by the tile grid {}",
            img.width(),
            ATLAS_ROWS_COLS
        );

        Ok(Self {
            size: img.width(),
            rgba: img.into_raw(),
        })
    }

    /// Generates a diagnostic fallback atlas requiring no assets: each tile
    /// shows dark bars on its closed walls over a light field.
    pub fn generated(tile_px: u32) -> Self {
        let tile_px = tile_px.max(8);
        let size = tile_px * ATLAS_ROWS_COLS as u32;
        let mut rgba = vec![0u8; (size * size * 4) as usize];
        let bar = (tile_px / 8).max(1);

        for n in 0..Nswe::COMBINATIONS {
            let nswe = Nswe::new(n as u8);
            let tx = (n / ATLAS_ROWS_COLS) as u32 * tile_px;
            let ty = (n % ATLAS_ROWS_COLS) as u32 * tile_px;

            for py in 0..tile_px {
                for px in 0..tile_px {
                    let closed = (!nswe.north_open() && py < bar)
                        || (!nswe.south_open() && py >= tile_px - bar)
                        || (!nswe.west_open() && px < bar)
                        || (!nswe.east_open() && px >= tile_px - bar);
                    let shade: u8 = if closed { 0x30 } else { 0xE0 };

                    let i = (((ty + py) * size + tx + px) * 4) as usize;
                    rgba[i] = shade;
                    rgba[i + 1] = shade;
                    rgba[i + 2] = shade;
                    rgba[i + 3] = 0xFF;
                }
            }
        }

        Self { size, rgba }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// Device-side NSWE atlas (texture view + sampler).
pub struct NsweAtlas {
    pub(super) view: wgpu::TextureView,
    pub(super) sampler: wgpu::Sampler,
}

impl NsweAtlas {
    /// Uploads `img` as an immutable texture. Failure is fatal to renderer
    /// initialization.
    pub fn upload(ctx: &RenderCtx<'_>, img: &AtlasImage) -> Result<Self> {
        let validation_scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let oom_scope = ctx.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

        let extent = wgpu::Extent3d {
            width: img.size(),
            height: img.size(),
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("geoforge nswe atlas"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            img.rgba(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(img.size() * 4),
                rows_per_image: Some(img.size()),
            },
            extent,
        );

        let oom = pollster::block_on(oom_scope.pop());
        let validation = pollster::block_on(validation_scope.pop());
        if let Some(err) = oom.or(validation) {
            anyhow::bail!("NSWE atlas upload failed: {err}");
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("geoforge nswe atlas sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self { view, sampler })
    }
}
