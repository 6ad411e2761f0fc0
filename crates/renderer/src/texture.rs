//! Image decoding and texture creation.

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::TextureError;

/// Decoded RGBA8 pixels with the bottom image row first.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Channel count of the source file (3 or 4).
    pub channels: u8,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Decode an image file. Only RGB and RGBA sources are accepted.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_dynamic(path, image)
    }

    fn from_dynamic(path: &Path, image: DynamicImage) -> Result<Self, TextureError> {
        let channels = image.color().channel_count();
        if channels != 3 && channels != 4 {
            return Err(TextureError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels,
            });
        }

        // Texture coordinate t = 0 is the bottom of the picture.
        let mut rgba = image.to_rgba8();
        image::imageops::flip_vertical_in_place(&mut rgba);
        let (width, height) = rgba.dimensions();

        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            channels,
            rgba: rgba.into_raw(),
        })
    }
}

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Upload decoded pixels as a repeating, linearly filtered sRGB texture.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
        label: &str,
    ) -> Self {
        use wgpu::util::DeviceExt;

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
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &image.rgba,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        log::info!(
            "Loaded texture {}: {}x{}, {} channels",
            image.path.display(),
            image.width,
            image.height,
            image.channels
        );

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Depth attachment matching the surface size.
    pub fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, GrayImage, Luma, LumaA, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn rgb_is_expanded_and_flipped() {
        let mut img = RgbImage::new(1, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        let decoded =
            DecodedImage::from_dynamic(Path::new("two.png"), DynamicImage::ImageRgb8(img))
                .expect("rgb accepted");
        assert_eq!(decoded.channels, 3);
        assert_eq!((decoded.width, decoded.height), (1, 2));
        // Bottom source row comes first.
        assert_eq!(decoded.rgba, vec![0, 0, 255, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn rgba_keeps_alpha() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([10, 20, 30, 40]));
        let decoded =
            DecodedImage::from_dynamic(Path::new("glass.png"), DynamicImage::ImageRgba8(img))
                .expect("rgba accepted");
        assert_eq!(decoded.channels, 4);
        assert_eq!(decoded.rgba, vec![10, 20, 30, 40, 10, 20, 30, 40]);
    }

    #[test]
    fn grayscale_is_rejected() {
        let img = GrayImage::from_pixel(1, 1, Luma([128]));
        let err = DecodedImage::from_dynamic(Path::new("gray.png"), DynamicImage::ImageLuma8(img))
            .expect_err("one channel");
        assert!(matches!(
            err,
            TextureError::UnsupportedChannels { channels: 1, .. }
        ));
    }

    #[test]
    fn gray_alpha_is_rejected() {
        let img = GrayAlphaImage::from_pixel(1, 1, LumaA([128, 255]));
        let err =
            DecodedImage::from_dynamic(Path::new("ga.png"), DynamicImage::ImageLumaA8(img))
                .expect_err("two channels");
        assert!(matches!(
            err,
            TextureError::UnsupportedChannels { channels: 2, .. }
        ));
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let err = DecodedImage::load("does/not/exist.png").expect_err("no such file");
        assert!(matches!(err, TextureError::Decode { .. }));
    }
}
