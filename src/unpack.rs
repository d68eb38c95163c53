//! Channel extraction and grayscale map output.
//!
//! A packed texture stores one material property per color channel. This
//! module copies the channel a [`Preset`] names into a standalone 8-bit
//! grayscale map, optionally inverts it, and writes it next to its siblings:
//!
//! | map       | file name                | invertible |
//! |-----------|--------------------------|------------|
//! | AO        | `{stem}_AO.png`          | no         |
//! | Roughness | `{stem}_Roughness.png`   | yes        |
//! | Metallic  | `{stem}_Metallic.png`    | yes        |
//! | Height    | `{stem}_Height.png`      | no, alpha only |

use std::path::{Path, PathBuf};

use image::{imageops, DynamicImage, GrayImage, ImageFormat, Luma};
use tracing::debug;

use crate::error::{Error, Result};
use crate::normalize::PackedImage;
use crate::preset::Preset;

/// The grayscale maps produced from one packed texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// Ambient occlusion.
    Ao,
    /// Surface roughness.
    Roughness,
    /// Metalness.
    Metallic,
    /// Height, copied from alpha.
    Height,
}

impl MapKind {
    /// File name suffix appended after the source stem.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Ao => "AO",
            Self::Roughness => "Roughness",
            Self::Metallic => "Metallic",
            Self::Height => "Height",
        }
    }
}

/// In-memory result of [`unpack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackedMaps {
    /// Ambient occlusion map.
    pub ao: GrayImage,
    /// Roughness map, inverted if requested.
    pub roughness: GrayImage,
    /// Metallic map, inverted if requested.
    pub metallic: GrayImage,
    /// Alpha channel, present only when requested and available.
    pub height: Option<GrayImage>,
}

/// Split a packed texture into grayscale maps according to `preset`.
///
/// Roughness and metallic samples become `255 - v` when their invert flag is
/// set. AO is never inverted. Height is the alpha channel verbatim, and is
/// `None` when `want_height` is false or the image has no alpha.
#[must_use]
pub fn unpack(
    image: &PackedImage,
    preset: &Preset,
    invert_roughness: bool,
    invert_metallic: bool,
    want_height: bool,
) -> UnpackedMaps {
    let ao = extract_channel(image, preset.ao.index());

    let mut roughness = extract_channel(image, preset.roughness.index());
    if invert_roughness {
        imageops::invert(&mut roughness);
    }

    let mut metallic = extract_channel(image, preset.metallic.index());
    if invert_metallic {
        imageops::invert(&mut metallic);
    }

    let height = (want_height && image.has_alpha()).then(|| extract_channel(image, 3));

    UnpackedMaps {
        ao,
        roughness,
        metallic,
        height,
    }
}

/// Copy channel `index` of every pixel into a grayscale buffer.
fn extract_channel(image: &PackedImage, index: usize) -> GrayImage {
    let stride = image.channel_count();
    let width = image.width() as usize;
    let raw = image.as_raw();
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([raw[(y as usize * width + x as usize) * stride + index]])
    })
}

/// Output location of one map: `{output_dir}/{stem}_{suffix}.png`.
///
/// Sources sharing a stem map to the same path; the later write wins.
#[must_use]
pub fn output_path(input: &Path, output_dir: &Path, kind: MapKind) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{stem}_{}.png", kind.suffix()))
}

/// Save any image as an 8-bit single-channel PNG.
///
/// Images with more than one channel or a different bit depth are converted
/// to 8-bit luminance first. The parent directory is created if missing, and
/// the file is written as PNG whatever its extension.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory cannot be created, or
/// [`Error::Save`] if encoding or writing fails.
pub fn save_grayscale(image: &DynamicImage, path: &Path) -> Result<()> {
    match image {
        DynamicImage::ImageLuma8(gray) => write_luma(gray, path),
        other => write_luma(&other.to_luma8(), path),
    }
}

pub(crate) fn write_luma(gray: &GrayImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    gray.save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::Save {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "wrote grayscale map");
    Ok(())
}
