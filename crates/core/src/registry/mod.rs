//! Static hardware-type registry.
//!
//! Everything that varies between hardware types is expressed as data here:
//! which shell fields a console type carries, which chip slots its boards
//! have, which photo files a unit directory may contain, and which board
//! layouts and mappers cartridges use. The rest of the crate stays generic
//! and is driven by these descriptors.

pub mod cartridge;
pub mod console;

use serde::{Deserialize, Serialize};

pub use cartridge::{
    game_config, CartChip, CartLayout, CartLayoutId, GameConfig, MapperId, CARTRIDGE_PHOTOS,
    CARTRIDGE_ROLES,
};
pub use console::{
    CalendarSpec, ChipSlot, ConsoleDescriptor, PhotoSpec, ShellSpec, SubBoardSpec,
};

/// The ten known console types, in release order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleKind {
    /// Game Boy
    Dmg,
    /// Super Game Boy
    Sgb,
    /// Game Boy Pocket
    Mgb,
    /// Game Boy Light
    Mgl,
    /// Super Game Boy 2
    Sgb2,
    /// Game Boy Color
    Cgb,
    /// Game Boy Advance
    Agb,
    /// Game Boy Advance SP
    Ags,
    /// Game Boy Player
    Gbs,
    /// Game Boy Micro
    Oxy,
}

impl ConsoleKind {
    /// All console kinds, in release order.
    pub const ALL: [ConsoleKind; 10] = [
        ConsoleKind::Dmg,
        ConsoleKind::Sgb,
        ConsoleKind::Mgb,
        ConsoleKind::Mgl,
        ConsoleKind::Sgb2,
        ConsoleKind::Cgb,
        ConsoleKind::Agb,
        ConsoleKind::Ags,
        ConsoleKind::Gbs,
        ConsoleKind::Oxy,
    ];

    /// Parse an uppercase hardware-type directory name.
    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.dir_name() == name)
    }

    /// Directory name used in the submission tree.
    pub fn dir_name(self) -> &'static str {
        match self {
            ConsoleKind::Dmg => "DMG",
            ConsoleKind::Sgb => "SGB",
            ConsoleKind::Mgb => "MGB",
            ConsoleKind::Mgl => "MGL",
            ConsoleKind::Sgb2 => "SGB2",
            ConsoleKind::Cgb => "CGB",
            ConsoleKind::Agb => "AGB",
            ConsoleKind::Ags => "AGS",
            ConsoleKind::Gbs => "GBS",
            ConsoleKind::Oxy => "OXY",
        }
    }

    /// Lowercase identifier used in serialized output and file names.
    pub fn id(self) -> &'static str {
        match self {
            ConsoleKind::Dmg => "dmg",
            ConsoleKind::Sgb => "sgb",
            ConsoleKind::Mgb => "mgb",
            ConsoleKind::Mgl => "mgl",
            ConsoleKind::Sgb2 => "sgb2",
            ConsoleKind::Cgb => "cgb",
            ConsoleKind::Agb => "agb",
            ConsoleKind::Ags => "ags",
            ConsoleKind::Gbs => "gbs",
            ConsoleKind::Oxy => "oxy",
        }
    }

    /// Human-readable product name.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Schema descriptor for this console type.
    pub fn descriptor(self) -> &'static ConsoleDescriptor {
        console::descriptor(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_names_round_trip() {
        for kind in ConsoleKind::ALL {
            assert_eq!(ConsoleKind::from_dir_name(kind.dir_name()), Some(kind));
        }
        assert_eq!(ConsoleKind::from_dir_name("GBA"), None);
        assert_eq!(ConsoleKind::from_dir_name("dmg"), None);
    }

    #[test]
    fn serialized_form_is_the_lowercase_id() {
        for kind in ConsoleKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
    }

    #[test]
    fn every_kind_has_a_descriptor() {
        for kind in ConsoleKind::ALL {
            let desc = kind.descriptor();
            assert_eq!(desc.kind, kind);
            assert!(!desc.mainboard_slots.is_empty());
            assert!(!desc.photos.is_empty());
        }
    }
}
