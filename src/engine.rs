//! Single-file unpacking: configuration, request and result types.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::normalize::load_packed;
use crate::preset::Preset;
use crate::unpack::{output_path, unpack, write_luma, MapKind};

/// Options shared by every file of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackOptions {
    /// Preset short name or label.
    pub preset: String,
    /// Store `255 - v` in the Roughness map (gloss to roughness).
    pub invert_roughness: bool,
    /// Store `255 - v` in the Metallic map.
    pub invert_metallic: bool,
    /// Write the alpha channel, when present, as a Height map.
    pub export_alpha_as_height: bool,
}

impl Default for UnpackOptions {
    fn default() -> Self {
        Self {
            preset: Preset::default().name.to_string(),
            invert_roughness: false,
            invert_metallic: false,
            export_alpha_as_height: false,
        }
    }
}

/// One source texture and where to put its maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackRequest {
    /// Packed source texture.
    pub input: PathBuf,
    /// Directory receiving the grayscale maps.
    pub output_dir: PathBuf,
    /// Run configuration.
    pub options: UnpackOptions,
}

/// Paths written for one source texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackResult {
    /// Ambient occlusion map.
    pub ao: PathBuf,
    /// Roughness map.
    pub roughness: PathBuf,
    /// Metallic map.
    pub metallic: PathBuf,
    /// Height map, if alpha was exported.
    pub height: Option<PathBuf>,
}

impl UnpackResult {
    /// Every written path, in AO, Roughness, Metallic, Height order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        [&self.ao, &self.roughness, &self.metallic]
            .into_iter()
            .chain(self.height.as_ref())
            .map(PathBuf::as_path)
    }
}

/// A validated unpacking configuration.
///
/// Create once with [`Unpacker::new()`] and reuse for many textures. The
/// preset is resolved at construction, so an unknown name fails before any
/// file is touched.
#[derive(Debug, Clone)]
pub struct Unpacker {
    preset: &'static Preset,
    invert_roughness: bool,
    invert_metallic: bool,
    export_alpha_as_height: bool,
}

impl Unpacker {
    /// Resolve the preset named in `options`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownPreset`] if the preset is not registered.
    pub fn new(options: &UnpackOptions) -> Result<Self> {
        Ok(Self {
            preset: Preset::from_name(&options.preset)?,
            invert_roughness: options.invert_roughness,
            invert_metallic: options.invert_metallic,
            export_alpha_as_height: options.export_alpha_as_height,
        })
    }

    /// The resolved preset.
    #[must_use]
    pub fn preset(&self) -> &'static Preset {
        self.preset
    }

    /// Decode `input`, split it and write the maps into `output_dir`.
    ///
    /// Existing files with the same names are overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Decode`] if `input` cannot be read, or an I/O
    /// error if the maps cannot be written.
    pub fn unpack_file(&self, input: &Path, output_dir: &Path) -> Result<UnpackResult> {
        let image = load_packed(input)?;

        let maps = unpack(
            &image,
            self.preset,
            self.invert_roughness,
            self.invert_metallic,
            self.export_alpha_as_height,
        );

        std::fs::create_dir_all(output_dir)?;

        let ao = output_path(input, output_dir, MapKind::Ao);
        let roughness = output_path(input, output_dir, MapKind::Roughness);
        let metallic = output_path(input, output_dir, MapKind::Metallic);

        write_luma(&maps.ao, &ao)?;
        write_luma(&maps.roughness, &roughness)?;
        write_luma(&maps.metallic, &metallic)?;

        let height = match &maps.height {
            Some(alpha) => {
                let path = output_path(input, output_dir, MapKind::Height);
                write_luma(alpha, &path)?;
                Some(path)
            }
            None => None,
        };

        info!(
            input = %input.display(),
            preset = self.preset.name,
            width = image.width(),
            height = image.height(),
            with_height = height.is_some(),
            "unpacked texture"
        );

        Ok(UnpackResult {
            ao,
            roughness,
            metallic,
            height,
        })
    }
}

/// Unpack a single texture as described by `request`.
///
/// # Errors
///
/// Returns [`crate::Error::UnknownPreset`] before touching the filesystem if
/// the preset is unknown, [`crate::Error::Decode`] if the input cannot be
/// decoded, and an I/O error if the output cannot be written.
pub fn unpack_one(request: &UnpackRequest) -> Result<UnpackResult> {
    Unpacker::new(&request.options)?.unpack_file(&request.input, &request.output_dir)
}
