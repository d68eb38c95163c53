//! Channel layouts for packed textures.
//!
//! A [`Preset`] names which color channel of a packed texture holds each of
//! the AO, Roughness and Metallic maps. The registry is fixed at compile time.

use std::fmt;

use crate::error::{Error, Result};

/// One of the three color channels of a packed texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red, channel index 0.
    R,
    /// Green, channel index 1.
    G,
    /// Blue, channel index 2.
    B,
}

impl Channel {
    /// Position of this channel inside an RGB(A) pixel.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::R => 0,
            Self::G => 1,
            Self::B => 2,
        }
    }

    /// Single-letter name.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::R => 'R',
            Self::G => 'G',
            Self::B => 'B',
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A named channel layout: which source channel feeds each output map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Short name, e.g. `"ORM"`.
    pub name: &'static str,
    /// Human-readable description of the layout.
    pub label: &'static str,
    /// Source channel of the Ambient Occlusion map.
    pub ao: Channel,
    /// Source channel of the Roughness map.
    pub roughness: Channel,
    /// Source channel of the Metallic map.
    pub metallic: Channel,
}

/// Every known preset. The first entry is the default.
static PRESETS: &[Preset] = &[
    Preset {
        name: "ORM",
        label: "ORM (R=AO, G=Roughness, B=Metallic)",
        ao: Channel::R,
        roughness: Channel::G,
        metallic: Channel::B,
    },
    Preset {
        name: "MRA",
        label: "MRA (R=Metallic, G=Roughness, B=AO)",
        ao: Channel::B,
        roughness: Channel::G,
        metallic: Channel::R,
    },
    Preset {
        name: "RMA",
        label: "RMA (R=Roughness, G=Metallic, B=AO)",
        ao: Channel::B,
        roughness: Channel::R,
        metallic: Channel::G,
    },
];

impl Preset {
    /// All registered presets, default first.
    #[must_use]
    pub fn all() -> &'static [Preset] {
        PRESETS
    }

    /// Look up a preset by short name (case-insensitive) or by its full label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPreset`] if nothing in the registry matches.
    pub fn from_name(name: &str) -> Result<&'static Preset> {
        let wanted = name.trim();
        PRESETS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted) || p.label == wanted)
            .ok_or_else(|| Error::UnknownPreset(name.to_string()))
    }
}

impl Default for Preset {
    fn default() -> Self {
        PRESETS[0]
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}
