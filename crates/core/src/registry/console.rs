//! Console schema descriptors and validation.
//!
//! Each console type is described by a static [`ConsoleDescriptor`]: which
//! shell fields it carries, which chip slots sit on its boards, and which
//! photo files its unit directories may contain. Validation walks a parsed
//! metadata document against the descriptor and reports the first violation
//! with a dotted field path.

use crate::error::ValidationError;
use crate::metadata::{Board, Calendar, Chip, ConsoleMetadata, LcdPanel};
use crate::registry::ConsoleKind;

/// Earliest plausible manufacturing year across all covered hardware.
pub const YEAR_MIN: u16 = 1988;
/// Latest plausible manufacturing year across all covered hardware.
pub const YEAR_MAX: u16 = 2010;

/// Which calendar qualifiers a console shell may carry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CalendarSpec {
    /// No shell-level calendar at all.
    None,
    /// Year plus optional month.
    YearMonth,
    /// Year plus optional week.
    YearWeek,
    /// Year plus optional month or week.
    YearMonthWeek,
}

impl CalendarSpec {
    /// A year may be recorded at shell level.
    pub fn allows_year(self) -> bool {
        self != CalendarSpec::None
    }

    /// A month may be recorded at shell level.
    pub fn allows_month(self) -> bool {
        matches!(self, CalendarSpec::YearMonth | CalendarSpec::YearMonthWeek)
    }

    /// A week may be recorded at shell level.
    pub fn allows_week(self) -> bool {
        matches!(self, CalendarSpec::YearWeek | CalendarSpec::YearMonthWeek)
    }
}

/// Shell-level fields a console type carries.
#[derive(Clone, Copy, Debug)]
pub struct ShellSpec {
    /// Shell color is recorded.
    pub color: bool,
    /// A release code is printed on the shell or box.
    pub release_code: bool,
    /// The shell carries an ink stamp.
    pub stamp: bool,
    /// Shell-level calendar markings.
    pub calendar: CalendarSpec,
    /// The LCD panel is recorded at shell level.
    pub lcd_panel: bool,
}

/// One chip position on a board.
#[derive(Clone, Copy, Debug)]
pub struct ChipSlot {
    /// Role key used in metadata documents, e.g. `cpu`.
    pub role: &'static str,
    /// Reference designator on the PCB, e.g. `U1`.
    pub designator: &'static str,
    /// Human-readable slot name.
    pub name: &'static str,
}

const fn slot(role: &'static str, designator: &'static str, name: &'static str) -> ChipSlot {
    ChipSlot {
        role,
        designator,
        name,
    }
}

/// A secondary board inside a unit (DMG only).
#[derive(Clone, Copy, Debug)]
pub struct SubBoardSpec {
    /// Metadata field holding the board, e.g. `lcd_board`.
    pub role: &'static str,
    /// Scalar board fields this board may carry.
    pub fields: &'static [&'static str],
    /// Chip slots on this board.
    pub slots: &'static [ChipSlot],
    /// The board carries a nested LCD panel.
    pub lcd_panel: bool,
}

/// One expected photo file in a unit directory.
#[derive(Clone, Copy, Debug)]
pub struct PhotoSpec {
    /// Logical role used as the key in serialized photo sets.
    pub role: &'static str,
    /// File name inside the unit directory.
    pub file_name: &'static str,
}

const fn photo(role: &'static str, file_name: &'static str) -> PhotoSpec {
    PhotoSpec { role, file_name }
}

/// Complete schema of one console type.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleDescriptor {
    /// The console type this descriptor applies to.
    pub kind: ConsoleKind,
    /// Human-readable product name.
    pub name: &'static str,
    /// Shell-level field rules.
    pub shell: ShellSpec,
    /// Scalar fields the mainboard may carry.
    pub mainboard_fields: &'static [&'static str],
    /// Chip slots on the mainboard.
    pub mainboard_slots: &'static [ChipSlot],
    /// Secondary boards.
    pub sub_boards: &'static [SubBoardSpec],
    /// Photo files a unit directory may contain.
    pub photos: &'static [PhotoSpec],
}

const DEFAULT_PHOTOS: &[PhotoSpec] = &[
    photo("front", "01_front.jpg"),
    photo("back", "02_back.jpg"),
    photo("pcbFront", "03_pcb_front.jpg"),
    photo("pcbBack", "04_pcb_back.jpg"),
];

const LCD_PANEL_SLOTS: &[ChipSlot] = &[
    slot("column_driver", "-", "LCD column driver"),
    slot("row_driver", "-", "LCD row driver"),
];

static DMG: ConsoleDescriptor = ConsoleDescriptor {
    kind: ConsoleKind::Dmg,
    name: "Game Boy",
    shell: ShellSpec {
        color: true,
        release_code: false,
        stamp: false,
        calendar: CalendarSpec::YearMonth,
        lcd_panel: false,
    },
    mainboard_fields: &["circled_letters", "extra_label", "stamp"],
    mainboard_slots: &[
        slot("cpu", "U1", "CPU"),
        slot("video_ram", "U2", "VRAM"),
        slot("work_ram", "U3", "WRAM"),
        slot("amplifier", "U4", "Amplifier"),
        slot("crystal", "X1", "Crystal"),
    ],
    sub_boards: &[
        SubBoardSpec {
            role: "lcd_board",
            fields: &["circled_letters", "stamp"],
            slots: &[slot("regulator", "U1", "Regulator")],
            lcd_panel: true,
        },
        SubBoardSpec {
            role: "power_board",
            fields: &["label"],
            slots: &[],
            lcd_panel: false,
        },
        SubBoardSpec {
            role: "jack_board",
            fields: &["extra_label"],
            slots: &[],
            lcd_panel: false,
        },
    ],
    photos: &[
        photo("front", "01_front.jpg"),
        photo("back", "02_back.jpg"),
        photo("mainboardFront", "03_mainboard_front.jpg"),
        photo("mainboardBack", "04_mainboard_back.jpg"),
        photo("lcdBoardFront", "05_lcd_board_front.jpg"),
        photo("lcdBoardBack", "06_lcd_board_back.jpg"),
        photo("powerBoardFront", "07_power_board_front.jpg"),
        photo("powerBoardBack", "08_power_board_back.jpg"),
        photo("jackBoardFront", "09_jack_board_front.jpg"),
        photo("jackBoardBack", "10_jack_board_back.jpg"),
    ],
};

static SGB: ConsoleDescriptor = ConsoleDescriptor {
    kind: ConsoleKind::Sgb,
    name: "Super Game Boy",
    shell: ShellSpec {
        color: false,
        release_code: false,
        stamp: true,
        calendar: CalendarSpec::None,
        lcd_panel: false,
    },
    mainboard_fields: &["circled_letters", "letter_at_top_right"],
    mainboard_slots: &[
        slot("cpu", "U1", "CPU"),
        slot("icd2", "U2", "ICD2"),
        slot("work_ram", "U3", "WRAM"),
        slot("video_ram", "U4", "VRAM"),
        slot("rom", "U5", "ROM"),
        slot("cic", "U6", "CIC"),
    ],
    sub_boards: &[],
    photos: DEFAULT_PHOTOS,
};

static MGB: ConsoleDescriptor = ConsoleDescriptor {
    kind: ConsoleKind::Mgb,
    name: "Game Boy Pocket",
    shell: ShellSpec {
        color: true,
        release_code: true,
        stamp: false,
        calendar: CalendarSpec::YearMonth,
        lcd_panel: true,
    },
    mainboard_fields: &["circled_letters", "number_pair", "stamp"],
    mainboard_slots: &[
        slot("cpu", "U1", "CPU"),
        slot("work_ram", "U2", "WRAM"),
        slot("amplifier", "U3", "Amplifier"),
        slot("regulator", "U4", "Regulator"),
        slot("crystal", "X1", "Crystal"),
    ],
    sub_boards: &[],
    photos: DEFAULT_PHOTOS,
};

static MGL: ConsoleDescriptor = ConsoleDescriptor {
    kind: ConsoleKind::Mgl,
    name: "Game Boy Light",
    shell: ShellSpec {
        color: true,
        release_code: true,
        stamp: false,
        calendar: CalendarSpec::YearWeek,
        lcd_panel: true,
    },
    mainboard_fields: &["circled_letters", "number_pair", "stamp"],
    mainboard_slots: &[
        slot("cpu", "U1", "CPU"),
        slot("work_ram", "U2", "WRAM"),
        slot("amplifier", "U3", "Amplifier"),
        slot("regulator", "U4", "Regulator"),
        slot("t1", "T1", "Transformer"),
        slot("crystal", "X1", "Crystal"),
    ],
    sub_boards: &[],
    photos: DEFAULT_PHOTOS,
};

static SGB2: ConsoleDescriptor = ConsoleDescriptor {
    kind: ConsoleKind::Sgb2,
    name: "Super Game Boy 2",
    shell: ShellSpec {
        color: false,
        release_code: false,
        stamp: true,
        calendar: CalendarSpec::None,
        lcd_panel: false,
    },
    mainboard_fields: &["circled_letters", "letter_at_top_right"],
    mainboard_slots: &[
        slot("cpu", "U1", "CPU"),
        slot("icd2", "U2", "ICD2"),
        slot("work_ram", "U3", "WRAM"),
        slot("rom", "U4", "ROM"),
        slot("cic", "U5", "CIC"),
        slot("coil", "COIL1", "Coil"),
        slot("crystal", "XTAL1", "Crystal"),
    ],
    sub_boards: &[],
    photos: DEFAULT_PHOTOS,
};

static CGB: ConsoleDescriptor = ConsoleDescriptor {
    kind: ConsoleKind::Cgb,
    name: "Game Boy Color",
    shell: ShellSpec {
        color: true,
        release_code: true,
        stamp: false,
        calendar: CalendarSpec::YearMonthWeek,
        lcd_panel: false,
    },
    mainboard_fields: &["circled_letters", "number_pair", "stamp"],
    mainboard_slots: &[
        slot("cpu", "U1", "CPU"),
        slot("work_ram", "U2", "WRAM"),
        slot("amplifier", "U3", "Amplifier"),
        slot("regulator", "U4", "Regulator"),
        slot("crystal", "X1", "Crystal"),
    ],
    sub_boards: &[],
    photos: DEFAULT_PHOTOS,
};

static AGB: ConsoleDescriptor = ConsoleDescriptor {
    kind: ConsoleKind::Agb,
    name: "Game Boy Advance",
    shell: ShellSpec {
        color: true,
        release_code: true,
        stamp: false,
        calendar: CalendarSpec::YearWeek,
        lcd_panel: false,
    },
    mainboard_fields: &["circled_letters", "number_pair", "stamp"],
    mainboard_slots: &[
        slot("cpu", "U1", "CPU"),
        slot("work_ram", "U2", "WRAM"),
        slot("regulator", "U3", "Regulator"),
        slot("u4", "U4", "?"),
        slot("amplifier", "U6", "Amplifier"),
        slot("crystal", "X1", "Crystal"),
    ],
    sub_boards: &[],
    photos: DEFAULT_PHOTOS,
};

static AGS: ConsoleDescriptor = ConsoleDescriptor {
    kind: ConsoleKind::Ags,
    name: "Game Boy Advance SP",
    shell: ShellSpec {
        color: true,
        release_code: true,
        stamp: false,
        calendar: CalendarSpec::None,
        lcd_panel: false,
    },
    mainboard_fields: &["circled_letters", "number_pair", "stamp"],
    mainboard_slots: &[
        slot("cpu", "U1", "CPU"),
        slot("work_ram", "U2", "WRAM"),
        slot("amplifier", "U3", "Amplifier"),
        slot("u4", "U4", "?"),
        slot("u5", "U5", "Battery controller"),
        slot("crystal", "X1", "Crystal"),
    ],
    sub_boards: &[],
    photos: &[
        photo("front", "01_front.jpg"),
        photo("top", "02_top.jpg"),
        photo("back", "03_back.jpg"),
        photo("pcbFront", "04_pcb_front.jpg"),
        photo("pcbBack", "05_pcb_back.jpg"),
    ],
};

static GBS: ConsoleDescriptor = ConsoleDescriptor {
    kind: ConsoleKind::Gbs,
    name: "Game Boy Player",
    shell: ShellSpec {
        color: true,
        release_code: true,
        stamp: false,
        calendar: CalendarSpec::YearWeek,
        lcd_panel: false,
    },
    mainboard_fields: &["circled_letters", "number_pair", "stamp", "stamp_front", "stamp_back"],
    mainboard_slots: &[
        slot("cpu", "U1", "CPU"),
        slot("work_ram", "U2", "WRAM"),
        slot("u4", "U4", "?"),
        slot("u5", "U5", "Regulator"),
        slot("u6", "U6", "Regulator"),
        slot("crystal", "Y1", "Crystal"),
    ],
    sub_boards: &[],
    photos: DEFAULT_PHOTOS,
};

static OXY: ConsoleDescriptor = ConsoleDescriptor {
    kind: ConsoleKind::Oxy,
    name: "Game Boy Micro",
    shell: ShellSpec {
        color: true,
        release_code: true,
        stamp: false,
        calendar: CalendarSpec::None,
        lcd_panel: false,
    },
    mainboard_fields: &["circled_letters"],
    mainboard_slots: &[
        slot("cpu", "U1", "CPU"),
        slot("u2", "U2", "?"),
        slot("u4", "U4", "?"),
        slot("u5", "U5", "?"),
    ],
    sub_boards: &[],
    photos: DEFAULT_PHOTOS,
};

/// Descriptor for the given console kind.
pub fn descriptor(kind: ConsoleKind) -> &'static ConsoleDescriptor {
    match kind {
        ConsoleKind::Dmg => &DMG,
        ConsoleKind::Sgb => &SGB,
        ConsoleKind::Mgb => &MGB,
        ConsoleKind::Mgl => &MGL,
        ConsoleKind::Sgb2 => &SGB2,
        ConsoleKind::Cgb => &CGB,
        ConsoleKind::Agb => &AGB,
        ConsoleKind::Ags => &AGS,
        ConsoleKind::Gbs => &GBS,
        ConsoleKind::Oxy => &OXY,
    }
}

impl ConsoleDescriptor {
    /// Chip slot on the mainboard with the given role.
    pub fn mainboard_slot(&self, role: &str) -> Option<&ChipSlot> {
        self.mainboard_slots.iter().find(|slot| slot.role == role)
    }

    /// Secondary board spec with the given role.
    pub fn sub_board(&self, role: &str) -> Option<&SubBoardSpec> {
        self.sub_boards.iter().find(|board| board.role == role)
    }

    /// Validate a parsed metadata document against this descriptor.
    pub fn validate(&self, metadata: &ConsoleMetadata) -> Result<(), ValidationError> {
        self.validate_shell(metadata)?;
        validate_board(
            "mainboard",
            &metadata.mainboard,
            self.mainboard_fields,
            |role| self.mainboard_slot(role).is_some(),
            false,
        )?;

        let boards = [
            ("lcd_board", metadata.lcd_board.as_ref()),
            ("power_board", metadata.power_board.as_ref()),
            ("jack_board", metadata.jack_board.as_ref()),
        ];
        for (role, board) in boards {
            match (board, self.sub_board(role)) {
                (Some(board), Some(spec)) => {
                    validate_board(
                        role,
                        board,
                        spec.fields,
                        |r| spec.slots.iter().any(|slot| slot.role == r),
                        spec.lcd_panel,
                    )?;
                }
                (Some(_), None) => {
                    return Err(ValidationError::new(
                        role,
                        format!("field not expected for {}", self.name),
                    ));
                }
                _ => {}
            }
        }

        match &metadata.lcd_panel {
            Some(panel) if self.shell.lcd_panel => validate_lcd_panel("lcd_panel", panel)?,
            Some(_) => {
                return Err(ValidationError::new(
                    "lcd_panel",
                    format!("field not expected for {}", self.name),
                ));
            }
            None => {}
        }
        Ok(())
    }

    fn validate_shell(&self, metadata: &ConsoleMetadata) -> Result<(), ValidationError> {
        if let Some(field) = metadata.extra.keys().next() {
            return Err(ValidationError::new(field.clone(), "unknown field"));
        }
        let scalars = [
            ("color", metadata.color.is_some(), self.shell.color),
            (
                "release_code",
                metadata.release_code.is_some(),
                self.shell.release_code,
            ),
            ("stamp", metadata.stamp.is_some(), self.shell.stamp),
        ];
        for (field, present, allowed) in scalars {
            if present && !allowed {
                return Err(ValidationError::new(
                    field,
                    format!("field not expected for {}", self.name),
                ));
            }
        }

        let calendar = &metadata.calendar;
        let spec = self.shell.calendar;
        if calendar.year.is_some() && !spec.allows_year() {
            return Err(ValidationError::new(
                "year",
                format!("field not expected for {}", self.name),
            ));
        }
        if calendar.month.is_some() && !spec.allows_month() {
            return Err(ValidationError::new(
                "month",
                format!("field not expected for {}", self.name),
            ));
        }
        if calendar.week.is_some() && !spec.allows_week() {
            return Err(ValidationError::new(
                "week",
                format!("field not expected for {}", self.name),
            ));
        }
        if calendar.date_range.is_some() {
            return Err(ValidationError::new(
                "date_range",
                "date ranges only occur on board and chip markings",
            ));
        }
        validate_calendar("", calendar)
    }
}

fn validate_calendar(prefix: &str, calendar: &Calendar) -> Result<(), ValidationError> {
    let at = |field: &str| {
        if prefix.is_empty() {
            field.to_owned()
        } else {
            format!("{prefix}.{field}")
        }
    };
    if let Some(year) = calendar.year {
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(ValidationError::new(
                at("year"),
                format!("year {year} out of range {YEAR_MIN}-{YEAR_MAX}"),
            ));
        }
    }
    if let Some(month) = calendar.month {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::new(
                at("month"),
                format!("month {month} out of range 1-12"),
            ));
        }
    }
    if let Some(week) = calendar.week {
        if !(1..=53).contains(&week) {
            return Err(ValidationError::new(
                at("week"),
                format!("week {week} out of range 1-53"),
            ));
        }
    }
    if let Some(range) = &calendar.date_range {
        for part in [&range.0, &range.1] {
            if let Some(month) = part.month {
                if !(1..=12).contains(&month) {
                    return Err(ValidationError::new(
                        at("date_range"),
                        format!("month {month} out of range 1-12"),
                    ));
                }
            }
            if let Some(part) = part.part {
                if !(1..=3).contains(&part) {
                    return Err(ValidationError::new(
                        at("date_range"),
                        format!("month part {part} out of range 1-3"),
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Validate a board against its allowed scalar fields and chip slots.
pub(crate) fn validate_board(
    prefix: &str,
    board: &Board,
    fields: &[&str],
    is_slot: impl Fn(&str) -> bool,
    allow_lcd_panel: bool,
) -> Result<(), ValidationError> {
    if board.kind.is_empty() {
        return Err(ValidationError::new(
            format!("{prefix}.type"),
            "board type must not be empty",
        ));
    }

    let scalars = [
        ("circled_letters", board.circled_letters.is_some()),
        ("number_pair", board.number_pair.is_some()),
        ("stamp", board.stamp.is_some()),
        ("stamp_front", board.stamp_front.is_some()),
        ("stamp_back", board.stamp_back.is_some()),
        ("extra_label", board.extra_label.is_some()),
        ("letter_at_top_right", board.letter_at_top_right.is_some()),
        ("label", board.label.is_some()),
    ];
    for (field, present) in scalars {
        if present && !fields.contains(&field) {
            return Err(ValidationError::new(
                format!("{prefix}.{field}"),
                "field not expected for this board",
            ));
        }
    }
    validate_calendar(prefix, &board.calendar)?;

    for (role, chip) in &board.chips {
        if !is_slot(role) {
            return Err(ValidationError::new(
                format!("{prefix}.{role}"),
                "unknown chip slot for this board",
            ));
        }
        if let Some(chip) = chip {
            validate_chip(&format!("{prefix}.{role}"), chip)?;
        }
    }

    match &board.lcd_panel {
        Some(panel) if allow_lcd_panel => {
            validate_lcd_panel(&format!("{prefix}.lcd_panel"), panel)?;
        }
        Some(_) => {
            return Err(ValidationError::new(
                format!("{prefix}.lcd_panel"),
                "field not expected for this board",
            ));
        }
        None => {}
    }
    Ok(())
}

pub(crate) fn validate_chip(prefix: &str, chip: &Chip) -> Result<(), ValidationError> {
    let calendar = Calendar {
        year: chip.year,
        month: chip.month,
        week: chip.week,
        date_range: None,
    };
    validate_calendar(prefix, &calendar)
}

fn validate_lcd_panel(prefix: &str, panel: &LcdPanel) -> Result<(), ValidationError> {
    validate_calendar(prefix, &panel.calendar)?;
    for (role, chip) in &panel.chips {
        if !LCD_PANEL_SLOTS.iter().any(|slot| slot.role == role) {
            return Err(ValidationError::new(
                format!("{prefix}.{role}"),
                "unknown chip slot for an LCD panel",
            ));
        }
        if let Some(chip) = chip {
            validate_chip(&format!("{prefix}.{role}"), chip)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ConsoleMetadata;

    fn parse(json: &str) -> ConsoleMetadata {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn minimal_dmg_document_is_valid() {
        let meta = parse(r#"{"mainboard": {"type": "DMG-CPU-06"}}"#);
        assert!(descriptor(ConsoleKind::Dmg).validate(&meta).is_ok());
    }

    #[test]
    fn dmg_slots_are_indexed_by_role() {
        let desc = descriptor(ConsoleKind::Dmg);
        assert_eq!(desc.mainboard_slot("cpu").unwrap().designator, "U1");
        assert_eq!(desc.mainboard_slot("work_ram").unwrap().designator, "U3");
        assert!(desc.mainboard_slot("icd2").is_none());
        assert!(desc.sub_board("lcd_board").unwrap().lcd_panel);
    }

    #[test]
    fn out_of_range_year_is_rejected_with_path() {
        let meta = parse(r#"{"year": 2085, "mainboard": {"type": "DMG-CPU-06"}}"#);
        let err = descriptor(ConsoleKind::Dmg).validate(&meta).unwrap_err();
        assert_eq!(err.path, "year");

        let meta = parse(
            r#"{"mainboard": {"type": "DMG-CPU-06", "cpu": {"type": "DMG-CPU B", "year": 3005}}}"#,
        );
        let err = descriptor(ConsoleKind::Dmg).validate(&meta).unwrap_err();
        assert_eq!(err.path, "mainboard.cpu.year");
    }

    #[test]
    fn unknown_shell_field_is_rejected() {
        let meta = parse(r#"{"colour": "Purple", "mainboard": {"type": "DMG-CPU-06"}}"#);
        let err = descriptor(ConsoleKind::Dmg).validate(&meta).unwrap_err();
        assert_eq!(err.path, "colour");
    }

    #[test]
    fn shell_fields_are_restricted_per_kind() {
        // SGB shells have a stamp but no color
        let meta = parse(r#"{"stamp": "30", "mainboard": {"type": "SGB-R-10"}}"#);
        assert!(descriptor(ConsoleKind::Sgb).validate(&meta).is_ok());
        let meta = parse(r#"{"color": "Gray", "mainboard": {"type": "SGB-R-10"}}"#);
        let err = descriptor(ConsoleKind::Sgb).validate(&meta).unwrap_err();
        assert_eq!(err.path, "color");
    }

    #[test]
    fn calendar_qualifiers_are_restricted_per_kind() {
        // AGB shells carry year/week, never a month
        let meta = parse(r#"{"year": 2001, "week": 28, "mainboard": {"type": "AGB-CPU-03"}}"#);
        assert!(descriptor(ConsoleKind::Agb).validate(&meta).is_ok());
        let meta = parse(r#"{"year": 2001, "month": 7, "mainboard": {"type": "AGB-CPU-03"}}"#);
        let err = descriptor(ConsoleKind::Agb).validate(&meta).unwrap_err();
        assert_eq!(err.path, "month");
    }

    #[test]
    fn unknown_chip_slot_is_rejected() {
        let meta = parse(r#"{"mainboard": {"type": "OXY-CPU-01", "icd2": null}}"#);
        let err = descriptor(ConsoleKind::Oxy).validate(&meta).unwrap_err();
        assert_eq!(err.path, "mainboard.icd2");
    }

    #[test]
    fn sub_boards_are_dmg_only() {
        let meta = parse(
            r#"{"mainboard": {"type": "CGB-CPU-01"}, "jack_board": {"type": "CGB-JACK"}}"#,
        );
        let err = descriptor(ConsoleKind::Cgb).validate(&meta).unwrap_err();
        assert_eq!(err.path, "jack_board");
    }

    #[test]
    fn dmg_unit_with_all_boards_validates() {
        let meta = parse(
            r#"{
                "color": "Gray",
                "year": 1990,
                "month": 11,
                "mainboard": {
                    "type": "DMG-CPU-06",
                    "circled_letters": "D",
                    "year": 1990,
                    "cpu": {"type": "DMG-CPU B", "label": "DMG-CPU B", "year": 1990, "week": 38},
                    "work_ram": {"type": "LH5264N4", "manufacturer": "sharp"},
                    "crystal": null
                },
                "lcd_board": {
                    "type": "LCD-05",
                    "circled_letters": "C",
                    "year": 1990,
                    "month": 9,
                    "regulator": {"type": "IR3E02", "manufacturer": "sharp"},
                    "lcd_panel": {
                        "label": "LPP S90",
                        "column_driver": {"type": "LH5028", "manufacturer": "sharp"},
                        "row_driver": null
                    }
                },
                "power_board": {"type": "B", "label": "05", "year": 1990, "month": 9},
                "jack_board": {"type": "JACK-03", "extra_label": "S"}
            }"#,
        );
        assert!(descriptor(ConsoleKind::Dmg).validate(&meta).is_ok());
    }
}
