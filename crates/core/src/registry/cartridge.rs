//! Cartridge schema: board layouts, the game catalog and mapper types.

use crate::error::ValidationError;
use crate::metadata::CartridgeMetadata;
use crate::registry::console::{validate_board, PhotoSpec};

/// Photo files a cartridge unit directory may contain.
pub const CARTRIDGE_PHOTOS: &[PhotoSpec] = &[
    PhotoSpec {
        role: "front",
        file_name: "01_front.jpg",
    },
    PhotoSpec {
        role: "pcbFront",
        file_name: "02_pcb_front.jpg",
    },
    PhotoSpec {
        role: "pcbBack",
        file_name: "03_pcb_back.jpg",
    },
];

/// Every chip role that can appear on a cartridge board, across all
/// layouts. Boards of uncataloged games validate against this vocabulary.
pub const CARTRIDGE_ROLES: &[&str] = &[
    "rom",
    "rom2",
    "mapper",
    "ram",
    "ram_protector",
    "line_decoder",
    "flash",
    "eeprom",
    "accelerometer",
    "u4",
    "u5",
    "crystal",
];

const CARTRIDGE_BOARD_FIELDS: &[&str] = &["circled_letters", "number_pair", "stamp", "extra_label"];

/// One chip position on a cartridge board layout.
///
/// Designators are per layout: the same role sits at different positions on
/// different board families (an MBC6 board has its mapper at U1 and ROM at
/// U2, the common layouts the other way around).
#[derive(Clone, Copy, Debug)]
pub struct CartChip {
    /// Reference designator on the PCB, e.g. `U1`.
    pub designator: &'static str,
    /// Human-readable position name.
    pub name: &'static str,
    /// Role key used in metadata documents.
    pub role: &'static str,
}

const fn chip(designator: &'static str, name: &'static str, role: &'static str) -> CartChip {
    CartChip {
        designator,
        name,
        role,
    }
}

/// Identifier of a cartridge board layout.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CartLayoutId {
    /// Bare ROM, no mapper.
    Rom,
    /// ROM plus mapper.
    RomMbc,
    /// ROM, mapper, RAM and RAM protector.
    RomMbcRam,
    /// ROM, mapper and RAM protector without RAM.
    RomMbcProtect,
    /// ROM, mapper, RAM, RAM protector and RTC crystal.
    RomMbcRamXtal,
    /// MBC6 board with extra flash.
    Mbc6,
    /// MBC7 board with EEPROM and accelerometer.
    Mbc7,
    /// HuC-3 board.
    Huc3,
    /// TAMA5 board family.
    Tama,
    /// Multi-ROM board with a line decoder.
    A15,
}

/// Structural description of one board layout.
#[derive(Clone, Copy, Debug)]
pub struct CartLayout {
    /// Layout identifier.
    pub id: CartLayoutId,
    /// Human-readable name.
    pub name: &'static str,
    /// Chip positions on boards of this layout.
    pub chips: &'static [CartChip],
    /// Boards of this layout carry a backup battery.
    pub battery: bool,
}

static ROM: CartLayout = CartLayout {
    id: CartLayoutId::Rom,
    name: "ROM only",
    chips: &[chip("U1", "ROM", "rom")],
    battery: false,
};

static ROM_MBC: CartLayout = CartLayout {
    id: CartLayoutId::RomMbc,
    name: "ROM + mapper",
    chips: &[chip("U1", "ROM", "rom"), chip("U2", "Mapper", "mapper")],
    battery: false,
};

static ROM_MBC_RAM: CartLayout = CartLayout {
    id: CartLayoutId::RomMbcRam,
    name: "ROM + mapper + RAM",
    chips: &[
        chip("U1", "ROM", "rom"),
        chip("U2", "Mapper", "mapper"),
        chip("U3", "RAM", "ram"),
        chip("U4", "RAM protector", "ram_protector"),
    ],
    battery: true,
};

static ROM_MBC_PROTECT: CartLayout = CartLayout {
    id: CartLayoutId::RomMbcProtect,
    name: "ROM + mapper + protector",
    chips: &[
        chip("U1", "ROM", "rom"),
        chip("U2", "Mapper", "mapper"),
        chip("U3", "RAM protector", "ram_protector"),
    ],
    battery: true,
};

static ROM_MBC_RAM_XTAL: CartLayout = CartLayout {
    id: CartLayoutId::RomMbcRamXtal,
    name: "ROM + mapper + RAM + crystal",
    chips: &[
        chip("U1", "ROM", "rom"),
        chip("U2", "Mapper", "mapper"),
        chip("U3", "RAM", "ram"),
        chip("U4", "RAM protector", "ram_protector"),
        chip("X1", "Crystal", "crystal"),
    ],
    battery: true,
};

static MBC6: CartLayout = CartLayout {
    id: CartLayoutId::Mbc6,
    name: "MBC6",
    chips: &[
        chip("U1", "Mapper", "mapper"),
        chip("U2", "ROM", "rom"),
        chip("U3", "Flash", "flash"),
        chip("U4", "RAM", "ram"),
        chip("U5", "RAM protector", "ram_protector"),
    ],
    battery: true,
};

static MBC7: CartLayout = CartLayout {
    id: CartLayoutId::Mbc7,
    name: "MBC7",
    chips: &[
        chip("U1", "ROM", "rom"),
        chip("U2", "Mapper", "mapper"),
        chip("U3", "EEPROM", "eeprom"),
        chip("U4", "Accelerometer", "accelerometer"),
    ],
    battery: false,
};

static HUC3: CartLayout = CartLayout {
    id: CartLayoutId::Huc3,
    name: "HuC-3",
    chips: &[
        chip("U1", "ROM", "rom"),
        chip("U2", "Mapper", "mapper"),
        chip("U3", "RAM", "ram"),
        chip("U4", "RAM protector", "ram_protector"),
        chip("X1", "Crystal", "crystal"),
    ],
    battery: true,
};

static TAMA: CartLayout = CartLayout {
    id: CartLayoutId::Tama,
    name: "TAMA5",
    chips: &[
        chip("U1", "ROM", "rom"),
        chip("U2", "Mapper", "mapper"),
        chip("U3", "?", "u4"),
        chip("U4", "?", "u5"),
        chip("X1", "Crystal", "crystal"),
    ],
    battery: true,
};

static A15: CartLayout = CartLayout {
    id: CartLayoutId::A15,
    name: "Multi-ROM",
    chips: &[
        chip("U1", "ROM", "rom"),
        chip("U2", "Mapper", "mapper"),
        chip("U3", "RAM", "ram"),
        chip("U4", "RAM protector", "ram_protector"),
        chip("U5", "ROM 2", "rom2"),
        chip("U6", "Line decoder", "line_decoder"),
    ],
    battery: true,
};

impl CartLayoutId {
    /// All layout ids.
    pub const ALL: [CartLayoutId; 10] = [
        CartLayoutId::Rom,
        CartLayoutId::RomMbc,
        CartLayoutId::RomMbcRam,
        CartLayoutId::RomMbcProtect,
        CartLayoutId::RomMbcRamXtal,
        CartLayoutId::Mbc6,
        CartLayoutId::Mbc7,
        CartLayoutId::Huc3,
        CartLayoutId::Tama,
        CartLayoutId::A15,
    ];

    /// Structural description of this layout.
    pub fn layout(self) -> &'static CartLayout {
        match self {
            CartLayoutId::Rom => &ROM,
            CartLayoutId::RomMbc => &ROM_MBC,
            CartLayoutId::RomMbcRam => &ROM_MBC_RAM,
            CartLayoutId::RomMbcProtect => &ROM_MBC_PROTECT,
            CartLayoutId::RomMbcRamXtal => &ROM_MBC_RAM_XTAL,
            CartLayoutId::Mbc6 => &MBC6,
            CartLayoutId::Mbc7 => &MBC7,
            CartLayoutId::Huc3 => &HUC3,
            CartLayoutId::Tama => &TAMA,
            CartLayoutId::A15 => &A15,
        }
    }

    /// Chip position with the given role, if this layout has one.
    pub fn chip(self, role: &str) -> Option<&'static CartChip> {
        self.layout().chips.iter().find(|chip| chip.role == role)
    }

    /// True when boards of this layout have a mapper position.
    pub fn has_mapper(self) -> bool {
        self.chip("mapper").is_some()
    }
}

/// Known mapper families.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum MapperId {
    /// MBC1 family.
    Mbc1,
    /// MBC2 family.
    Mbc2,
    /// MBC3 family.
    Mbc3,
    /// MBC30.
    Mbc30,
    /// MBC5.
    Mbc5,
    /// MBC6.
    Mbc6,
    /// MBC7.
    Mbc7,
    /// MMM01.
    Mmm01,
    /// HuC-1 family.
    Huc1,
    /// HuC-3.
    Huc3,
    /// TAMA5.
    Tama5,
    /// Board layout has no mapper position at all.
    NoMapper,
}

impl MapperId {
    /// Lowercase identifier used in serialized output and file names.
    pub fn id(self) -> &'static str {
        match self {
            MapperId::Mbc1 => "mbc1",
            MapperId::Mbc2 => "mbc2",
            MapperId::Mbc3 => "mbc3",
            MapperId::Mbc30 => "mbc30",
            MapperId::Mbc5 => "mbc5",
            MapperId::Mbc6 => "mbc6",
            MapperId::Mbc7 => "mbc7",
            MapperId::Mmm01 => "mmm01",
            MapperId::Huc1 => "huc1",
            MapperId::Huc3 => "huc3",
            MapperId::Tama5 => "tama5",
            MapperId::NoMapper => "no-mapper",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            MapperId::Mbc1 => "MBC1",
            MapperId::Mbc2 => "MBC2",
            MapperId::Mbc3 => "MBC3",
            MapperId::Mbc30 => "MBC30",
            MapperId::Mbc5 => "MBC5",
            MapperId::Mbc6 => "MBC6",
            MapperId::Mbc7 => "MBC7",
            MapperId::Mmm01 => "MMM01",
            MapperId::Huc1 => "HuC-1",
            MapperId::Huc3 => "HuC-3",
            MapperId::Tama5 => "TAMA5",
            MapperId::NoMapper => "No mapper",
        }
    }

    /// Classify a transcribed mapper chip type, e.g. `MBC1B` -> MBC1.
    ///
    /// Matches the exact part numbers seen in the wild rather than prefixes;
    /// `MBC30` must not fall into the MBC3 bucket.
    pub fn from_chip_kind(kind: &str) -> Option<Self> {
        match kind {
            "MBC1" | "MBC1A" | "MBC1B" | "MBC1B1" => Some(MapperId::Mbc1),
            "MBC2" | "MBC2A" => Some(MapperId::Mbc2),
            "MBC3" | "MBC3A" | "MBC3B" => Some(MapperId::Mbc3),
            "MBC30" => Some(MapperId::Mbc30),
            "MBC5" => Some(MapperId::Mbc5),
            "MBC6" => Some(MapperId::Mbc6),
            "MBC7" => Some(MapperId::Mbc7),
            "MMM01" => Some(MapperId::Mmm01),
            "HuC-1" | "HuC-1A" => Some(MapperId::Huc1),
            "HuC-3" => Some(MapperId::Huc3),
            "TAMA5" => Some(MapperId::Tama5),
            _ => None,
        }
    }
}

/// Catalog entry for one game release.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    /// ROM identifier, e.g. `DMG-AAUJ-1`.
    pub code: &'static str,
    /// Game title.
    pub name: &'static str,
    /// Board layouts this release was manufactured with, most common first.
    pub layouts: &'static [CartLayoutId],
}

const GAMES: &[GameConfig] = &[
    GameConfig {
        code: "DMG-AAUJ-1",
        name: "Money Idol Exchanger",
        layouts: &[CartLayoutId::RomMbcRam],
    },
    GameConfig {
        code: "DMG-ACXJ-0",
        name: "Pocket Camera",
        layouts: &[CartLayoutId::RomMbcRam],
    },
    GameConfig {
        code: "DMG-AD3J-0",
        name: "Game Boy Wars 2",
        layouts: &[CartLayoutId::RomMbcRam],
    },
    GameConfig {
        code: "DMG-AFGJ-0",
        name: "Sakata Goro Kudan no Renju Kyoshitsu",
        layouts: &[CartLayoutId::RomMbcRam],
    },
    GameConfig {
        code: "DMG-AOBJ-0",
        name: "Pocket Bomberman",
        layouts: &[CartLayoutId::RomMbc],
    },
    GameConfig {
        code: "DMG-APAE-0",
        name: "Pokemon Red",
        layouts: &[CartLayoutId::RomMbcRam],
    },
    GameConfig {
        code: "DMG-APSJ-0",
        name: "Pocket Monsters Gin",
        layouts: &[CartLayoutId::RomMbcRamXtal],
    },
    GameConfig {
        code: "DMG-AWAJ-0",
        name: "Wario Land 2",
        layouts: &[CartLayoutId::RomMbcRam],
    },
    GameConfig {
        code: "DMG-AYLJ-0",
        name: "Pocket Love",
        layouts: &[CartLayoutId::RomMbcRam],
    },
    GameConfig {
        code: "DMG-A2ME-0",
        name: "Mary-Kate and Ashley Pocket Planner",
        layouts: &[CartLayoutId::Mbc6],
    },
    GameConfig {
        code: "DMG-A4KJ-0",
        name: "Korokoro Kirby",
        layouts: &[CartLayoutId::Mbc7],
    },
    GameConfig {
        code: "DMG-A6BJ-0",
        name: "Net de Get: Minigame @ 100",
        layouts: &[CartLayoutId::Mbc6],
    },
    GameConfig {
        code: "DMG-HFAJ-0",
        name: "Pocket Family GB",
        layouts: &[CartLayoutId::Huc3],
    },
    GameConfig {
        code: "DMG-HQAJ-0",
        name: "Robot Poncots",
        layouts: &[CartLayoutId::Huc3],
    },
    GameConfig {
        code: "DMG-HRCJ-0",
        name: "Pocket Club",
        layouts: &[CartLayoutId::Huc3],
    },
    GameConfig {
        code: "DMG-KGBJ-0",
        name: "Game de Hakken!! Tamagotchi Osutchi to Mesutchi",
        layouts: &[CartLayoutId::Tama],
    },
    GameConfig {
        code: "DMG-MQE-2",
        name: "Momotarou Collection 2",
        layouts: &[CartLayoutId::A15],
    },
    GameConfig {
        code: "DMG-TRA-1",
        name: "Tetris",
        layouts: &[CartLayoutId::Rom],
    },
    GameConfig {
        code: "DMG-VUA-0",
        name: "Dr. Mario",
        layouts: &[CartLayoutId::Rom],
    },
    GameConfig {
        code: "DMG-W2A-0",
        name: "Super Mario Land",
        layouts: &[CartLayoutId::RomMbc],
    },
    GameConfig {
        code: "DMG-ZLE-0",
        name: "The Legend of Zelda: Link's Awakening",
        layouts: &[CartLayoutId::RomMbcRam],
    },
    GameConfig {
        code: "CGB-AWOJ-0",
        name: "Wario Land 3",
        layouts: &[CartLayoutId::RomMbcRam],
    },
    GameConfig {
        code: "CGB-AW8A-0",
        name: "Wario Land II",
        layouts: &[CartLayoutId::RomMbcRam],
    },
    GameConfig {
        code: "CGB-AZLJ-0",
        name: "Zelda no Densetsu: Fushigi no Kinomi",
        layouts: &[CartLayoutId::RomMbcRam],
    },
    GameConfig {
        code: "CGB-BMVJ-0",
        name: "Dancing Memories",
        layouts: &[CartLayoutId::RomMbc],
    },
    GameConfig {
        code: "CGB-BXTJ-0",
        name: "Pocket Monsters Crystal",
        layouts: &[CartLayoutId::RomMbcRamXtal],
    },
    GameConfig {
        code: "CGB-BYTE-0",
        name: "Pokemon Trading Card Game",
        layouts: &[CartLayoutId::RomMbcRam],
    },
];

/// Catalog entry for a ROM identifier, if the game is known.
pub fn game_config(code: &str) -> Option<&'static GameConfig> {
    GAMES.iter().find(|game| game.code == code)
}

/// Validate a parsed cartridge metadata document.
///
/// When the game is in the catalog, chip roles must come from one of its
/// candidate layouts; uncataloged games fall back to the full role
/// vocabulary so a submission is never rejected for missing catalog data.
pub fn validate(metadata: &CartridgeMetadata, code: &str) -> Result<(), ValidationError> {
    if let Some(field) = metadata.extra.keys().next() {
        return Err(ValidationError::new(field.clone(), "unknown field"));
    }
    let is_slot: Box<dyn Fn(&str) -> bool> = match game_config(code) {
        Some(game) => Box::new(move |role: &str| {
            game.layouts
                .iter()
                .any(|id| id.chip(role).is_some())
        }),
        None => Box::new(|role: &str| CARTRIDGE_ROLES.contains(&role)),
    };
    validate_board(
        "board",
        &metadata.board,
        CARTRIDGE_BOARD_FIELDS,
        is_slot,
        false,
    )
}
