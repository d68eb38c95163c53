//! Split packed PBR textures into standalone grayscale maps.
//!
//! Game engines and DCC exports often pack Ambient Occlusion, Roughness and
//! Metallic into the color channels of one texture (ORM, MRA, RMA layouts).
//! This crate reverses that: it picks each channel named by a [`Preset`],
//! optionally inverts roughness or metallic, and writes 8-bit single-channel
//! PNGs. The alpha channel can be exported as a Height map.
//!
//! # Quick Start
//!
//! ```no_run
//! use orm_unpack::{unpack_one, UnpackOptions, UnpackRequest};
//!
//! let request = UnpackRequest {
//!     input: "crate_orm.png".into(),
//!     output_dir: "maps".into(),
//!     options: UnpackOptions::default(),
//! };
//! let result = unpack_one(&request).expect("unpack failed");
//! for path in result.paths() {
//!     println!("{}", path.display());
//! }
//! ```
//!
//! # Batch
//!
//! Every `.png`, `.jpg`, `.jpeg`, `.tga`, `.tif` and `.tiff` file below a
//! directory can be processed with one configuration. All maps land flat in
//! the output directory.
//!
//! ```no_run
//! use std::path::Path;
//! use orm_unpack::{unpack_batch, UnpackOptions};
//!
//! let opts = UnpackOptions {
//!     preset: "MRA".to_string(),
//!     invert_roughness: true,
//!     ..UnpackOptions::default()
//! };
//! let summary = unpack_batch(Path::new("textures"), Path::new("maps"), &opts).unwrap();
//! println!("unpacked {} textures", summary.count);
//! ```

#![deny(missing_docs)]

pub mod batch;
mod engine;
pub mod error;
pub mod normalize;
pub mod preset;
pub mod unpack;

pub use batch::{discover, is_supported_image, unpack_batch, BatchSummary, SUPPORTED_EXTENSIONS};
pub use engine::{unpack_one, UnpackOptions, UnpackRequest, UnpackResult, Unpacker};
pub use error::{Error, Result};
pub use normalize::{load_packed, normalize, PackedImage};
pub use preset::{Channel, Preset};
pub use unpack::{output_path, save_grayscale, unpack, MapKind, UnpackedMaps};
