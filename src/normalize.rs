//! Loading and canonicalizing source textures to 8-bit RGB or RGBA.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader, RgbImage, RgbaImage};
use tracing::debug;

use crate::error::{Error, Result};

/// A decoded texture with exactly three or four 8-bit channels.
///
/// Channels 0, 1, 2 are always R, G, B. Channel 3, if present, is alpha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackedImage {
    /// Three channels, no alpha.
    Rgb(RgbImage),
    /// Four channels, alpha last.
    Rgba(RgbaImage),
}

impl PackedImage {
    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        match self {
            Self::Rgb(img) => img.width(),
            Self::Rgba(img) => img.width(),
        }
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        match self {
            Self::Rgb(img) => img.height(),
            Self::Rgba(img) => img.height(),
        }
    }

    /// Number of channels per pixel: 3 or 4.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        match self {
            Self::Rgb(_) => 3,
            Self::Rgba(_) => 4,
        }
    }

    /// Whether the image carries an alpha channel.
    #[must_use]
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Rgba(_))
    }

    /// Interleaved raw samples, `channel_count()` bytes per pixel.
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        match self {
            Self::Rgb(img) => img.as_raw(),
            Self::Rgba(img) => img.as_raw(),
        }
    }
}

/// Canonicalize a decoded image to [`PackedImage`].
///
/// Anything carrying alpha (luminance+alpha included) becomes RGBA, anything
/// else becomes RGB. Deeper bit depths are narrowed to 8 bits per channel.
/// Palettes are already expanded by the decoder here; [`load_packed`]
/// promotes paletted files to RGBA.
#[must_use]
pub fn normalize(image: DynamicImage) -> PackedImage {
    match image {
        DynamicImage::ImageRgb8(img) => PackedImage::Rgb(img),
        DynamicImage::ImageRgba8(img) => PackedImage::Rgba(img),
        other if other.color().has_alpha() => {
            debug!(color = ?other.color(), "converting to RGBA8");
            PackedImage::Rgba(other.to_rgba8())
        }
        other => {
            debug!(color = ?other.color(), "converting to RGB8");
            PackedImage::Rgb(other.to_rgb8())
        }
    }
}

/// Decode the file at `path` and normalize it.
///
/// Paletted sources always become RGBA, opaque ones with alpha 255.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the file is missing, corrupt, or in an
/// unsupported container.
pub fn load_packed(path: &Path) -> Result<PackedImage> {
    let decode_err = |source| Error::Decode {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?;
    let paletted = reader.format().is_some_and(|format| is_paletted(path, format));
    let decoded = reader.decode().map_err(decode_err)?;

    if paletted {
        debug!(path = %path.display(), "paletted source, converting to RGBA8");
        return Ok(PackedImage::Rgba(decoded.into_rgba8()));
    }
    Ok(normalize(decoded))
}

/// Whether the file stores palette indices rather than colors.
///
/// The decoder expands palettes before the color type is visible, so the
/// container header is inspected directly. Unreadable headers count as not
/// paletted and surface later as decode errors.
fn is_paletted(path: &Path, format: ImageFormat) -> bool {
    match format {
        ImageFormat::Png => File::open(path)
            .ok()
            .and_then(|file| png::Decoder::new(BufReader::new(file)).read_info().ok())
            .is_some_and(|reader| reader.info().color_type == png::ColorType::Indexed),
        ImageFormat::Tga => {
            // Byte 2 is the image type: 1 raw color-mapped, 9 RLE color-mapped.
            let mut header = [0u8; 3];
            File::open(path)
                .and_then(|mut file| file.read_exact(&mut header))
                .is_ok_and(|()| matches!(header[2], 1 | 9))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, GrayImage, LumaA, Rgb, Rgba};

    #[test]
    fn rgb_passes_through() {
        let img = RgbImage::from_pixel(3, 2, Rgb([1, 2, 3]));
        let packed = normalize(DynamicImage::ImageRgb8(img.clone()));
        assert_eq!(packed, PackedImage::Rgb(img));
        assert_eq!(packed.channel_count(), 3);
        assert!(!packed.has_alpha());
    }

    #[test]
    fn rgba_keeps_alpha() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 40]));
        let packed = normalize(DynamicImage::ImageRgba8(img.clone()));
        assert_eq!(packed, PackedImage::Rgba(img));
        assert_eq!(packed.channel_count(), 4);
        assert_eq!((packed.width(), packed.height()), (2, 2));
    }

    #[test]
    fn luma_alpha_becomes_rgba() {
        let img = GrayAlphaImage::from_pixel(2, 1, LumaA([77, 128]));
        let packed = normalize(DynamicImage::ImageLumaA8(img));
        assert!(packed.has_alpha());
        assert_eq!(packed.as_raw(), &[77, 77, 77, 128, 77, 77, 77, 128]);
    }

    #[test]
    fn luma_becomes_rgb() {
        let img = GrayImage::from_pixel(1, 1, image::Luma([200]));
        let packed = normalize(DynamicImage::ImageLuma8(img));
        assert_eq!(packed.channel_count(), 3);
        assert_eq!(packed.as_raw(), &[200, 200, 200]);
    }

    #[test]
    fn sixteen_bit_rgba_is_narrowed() {
        let img = image::ImageBuffer::from_pixel(1, 1, Rgba([u16::MAX, 0, u16::MAX, u16::MAX]));
        let packed = normalize(DynamicImage::ImageRgba16(img));
        assert_eq!(packed.as_raw(), &[255, 0, 255, 255]);
    }

    fn write_indexed_png(path: &Path, trns: Option<Vec<u8>>) {
        let file = std::io::BufWriter::new(File::create(path).unwrap());
        let mut encoder = png::Encoder::new(file, 2, 1);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(vec![10, 20, 30, 200, 100, 50]);
        if let Some(trns) = trns {
            encoder.set_trns(trns);
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0, 1]).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn opaque_palette_png_becomes_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indexed.png");
        write_indexed_png(&path, None);

        let packed = load_packed(&path).unwrap();
        assert_eq!(packed.channel_count(), 4);
        assert_eq!(packed.as_raw(), &[10, 20, 30, 255, 200, 100, 50, 255]);
    }

    #[test]
    fn transparent_palette_png_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indexed.png");
        write_indexed_png(&path, Some(vec![255, 40]));

        let packed = load_packed(&path).unwrap();
        assert_eq!(packed.as_raw(), &[10, 20, 30, 255, 200, 100, 50, 40]);
    }

    #[test]
    fn truecolor_png_stays_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        RgbImage::from_pixel(1, 1, Rgb([4, 5, 6])).save(&path).unwrap();

        let packed = load_packed(&path).unwrap();
        assert_eq!(packed, PackedImage::Rgb(RgbImage::from_pixel(1, 1, Rgb([4, 5, 6]))));
    }

    #[test]
    fn color_mapped_tga_header_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let mapped = dir.path().join("mapped.tga");
        std::fs::write(&mapped, [0u8, 1, 1, 0, 0]).unwrap();
        let rle_mapped = dir.path().join("rle.tga");
        std::fs::write(&rle_mapped, [0u8, 1, 9]).unwrap();
        let truecolor = dir.path().join("rgb.tga");
        std::fs::write(&truecolor, [0u8, 0, 2]).unwrap();

        assert!(is_paletted(&mapped, ImageFormat::Tga));
        assert!(is_paletted(&rle_mapped, ImageFormat::Tga));
        assert!(!is_paletted(&truecolor, ImageFormat::Tga));
        assert!(!is_paletted(&dir.path().join("missing.tga"), ImageFormat::Tga));
    }

    #[test]
    fn load_missing_file_is_decode_error() {
        let err = load_packed(Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
