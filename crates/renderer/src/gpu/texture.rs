use std::path::Path;

use image::GenericImageView;
use wgpu::util::{DeviceExt, TextureDataOrder};

use crate::error::ViewerError;

use super::context::SurfaceColorSpace;

/// RGBA8 pixels ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Opaque white 1×1 image used when nothing else could be loaded.
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![255, 255, 255, 255],
        }
    }
}

/// Decodes `path` to RGBA8, rejecting images the device cannot hold in a
/// single 2D texture.
pub(crate) fn decode_image(path: &Path, max_dimension: u32) -> Result<DecodedImage, ViewerError> {
    let image = image::open(path).map_err(|err| ViewerError::image(path, err))?;
    let (width, height) = image.dimensions();
    if width > max_dimension || height > max_dimension {
        return Err(ViewerError::image(
            path,
            format!("{width}x{height} exceeds the GPU texture limit of {max_dimension}"),
        ));
    }
    Ok(DecodedImage {
        width,
        height,
        pixels: image.to_rgba8().into_raw(),
    })
}

pub(crate) struct ImageTexture {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

impl ImageTexture {
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
        label: &str,
        color_space: SurfaceColorSpace,
    ) -> Self {
        let texture_format = match color_space {
            SurfaceColorSpace::Gamma => wgpu::TextureFormat::Rgba8Unorm,
            SurfaceColorSpace::Linear => wgpu::TextureFormat::Rgba8UnormSrgb,
        };
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: image.width,
                    height: image.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: texture_format,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            TextureDataOrder::LayerMajor,
            &image.pixels,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
            width: image.width,
            height: image.height,
        }
    }
}

pub(crate) fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("image sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn decodes_png_to_rgba_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stripe.png");
        let mut img = RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 255]));
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let decoded = decode_image(&path, 8192).unwrap();
        assert_eq!((decoded.width, decoded.height), (4, 2));
        assert_eq!(decoded.pixels.len(), 4 * 2 * 4);
        assert_eq!(&decoded.pixels[..4], &[255, 0, 0, 255]);
        assert_eq!(&decoded.pixels[4..8], &[10, 20, 30, 255]);
    }

    #[test]
    fn oversized_images_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbaImage::new(16, 4).save(&path).unwrap();
        let err = decode_image(&path, 8).unwrap_err();
        assert!(matches!(err, ViewerError::ResourceLoad { .. }));
        assert!(err.to_string().contains("16x4"));
    }

    #[test]
    fn missing_and_corrupt_files_are_resource_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.jpg");
        assert!(matches!(
            decode_image(&missing, 8192),
            Err(ViewerError::ResourceLoad { .. })
        ));

        let corrupt = dir.path().join("corrupt.png");
        std::fs::write(&corrupt, b"definitely not a png").unwrap();
        assert!(matches!(
            decode_image(&corrupt, 8192),
            Err(ViewerError::ResourceLoad { .. })
        ));
    }

    #[test]
    fn placeholder_is_a_single_white_pixel() {
        let placeholder = DecodedImage::placeholder();
        assert_eq!((placeholder.width, placeholder.height), (1, 1));
        assert_eq!(placeholder.pixels, vec![255; 4]);
    }
}
