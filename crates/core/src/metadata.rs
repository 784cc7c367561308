//! Deserialized shapes of contributor metadata documents.
//!
//! These structs describe the raw `metadata.json` contents. They are
//! deliberately permissive about which fields appear where; per-hardware-type
//! restrictions are enforced afterwards by the registry validators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// Partial manufacturing calendar shared by shells, boards and chips.
///
/// A marking carries at most one time qualifier in practice. When several are
/// recorded anyway, formatting gives month priority over week over date
/// range.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub struct Calendar {
    /// Four-digit manufacturing year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// Calendar month, 1-12.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    /// ISO week, 1-53.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<u8>,
    /// Month range, for markings like `JAN-MAR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl Calendar {
    /// True when no part of the calendar is recorded.
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.month.is_none()
            && self.week.is_none()
            && self.date_range.is_none()
    }
}

/// Inclusive month range, serialized as a two-element array.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct DateRange(pub DateRangePart, pub DateRangePart);

/// One endpoint of a [`DateRange`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub struct DateRangePart {
    /// Calendar month, 1-12.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    /// Part of the month (1 = early, 2 = mid, 3 = late).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<u8>,
}

/// A single chip as transcribed from its package markings.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Chip {
    /// Part type, e.g. `DMG-CPU B`. Absent when the marking is illegible.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Full label text. `null` means the package is verified unlabeled.
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub label: Field<String>,
    /// Manufacturer code, e.g. `sharp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// Manufacturing year, two or four digits as printed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// Manufacturing month, 1-12.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    /// Manufacturing week, 1-53.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<u8>,
    /// Game ROM code for mask ROM chips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rom_code: Option<String>,
    /// Marks a chip unusual for its position, excluded from statistics.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub outlier: bool,
}

/// A circuit board: the mainboard of a unit, a cartridge board, or one of
/// the DMG sub-boards.
///
/// Chip positions are kept in a map keyed by slot role (`cpu`, `work_ram`,
/// ...) so one shape serves every board variant. An entry mapped to `None`
/// records a position verified to be unpopulated.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Board {
    /// Board type as etched on the PCB, e.g. `DMG-CPU-06`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Circled letter markings near the board type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circled_letters: Option<String>,
    /// Two-number pair marking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_pair: Option<String>,
    /// Ink stamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp: Option<String>,
    /// Ink stamp on the front side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp_front: Option<String>,
    /// Ink stamp on the back side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp_back: Option<String>,
    /// Additional label text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_label: Option<String>,
    /// Single letter marking at the top right corner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_at_top_right: Option<String>,
    /// Printed label, used on DMG power boards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Manufacturing calendar markings.
    #[serde(flatten)]
    pub calendar: Calendar,
    /// LCD panel attached to a DMG LCD board.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lcd_panel: Option<LcdPanel>,
    /// Populated chip positions keyed by slot role.
    #[serde(flatten)]
    pub chips: BTreeMap<String, Option<Chip>>,
}

impl Board {
    /// Chip recorded at the given slot role. The outer `Option` is `None`
    /// when the slot has not been inspected, `Some(None)` when it is
    /// verified unpopulated.
    pub fn chip(&self, role: &str) -> Option<&Option<Chip>> {
        self.chips.get(role)
    }
}

/// LCD panel with its flex-mounted driver chips.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct LcdPanel {
    /// Panel label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Manufacturing calendar markings.
    #[serde(flatten)]
    pub calendar: Calendar,
    /// Driver chips keyed by role (`column_driver`, `row_driver`).
    #[serde(flatten)]
    pub chips: BTreeMap<String, Option<Chip>>,
}

/// Metadata document of a console unit. One shape serves all ten console
/// types; the registry validator rejects fields a given type cannot carry.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ConsoleMetadata {
    /// Shell color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Release code printed on the box or shell, e.g. `CGB-001`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_code: Option<String>,
    /// Shell stamp, used on Super Game Boys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp: Option<String>,
    /// Assembly calendar derived from shell or serial markings.
    #[serde(flatten)]
    pub calendar: Calendar,
    /// The mainboard.
    pub mainboard: Board,
    /// DMG LCD board.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lcd_board: Option<Board>,
    /// DMG power board.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_board: Option<Board>,
    /// DMG jack board.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jack_board: Option<Board>,
    /// Shell-level LCD panel, used on pocket-sized models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lcd_panel: Option<LcdPanel>,
    /// Unrecognized top-level keys. Must be empty to pass validation, so a
    /// typo like `colour` surfaces instead of vanishing.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Metadata document of a cartridge unit.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct CartridgeMetadata {
    /// Game code override when the label differs from the directory name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Label stamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp: Option<String>,
    /// The cartridge board.
    pub board: Board,
    /// Unrecognized top-level keys. Must be empty to pass validation.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_separates_scalar_fields_from_chip_slots() {
        let board: Board = serde_json::from_str(
            r#"{
                "type": "DMG-CPU-06",
                "circled_letters": "D",
                "year": 1991,
                "month": 3,
                "cpu": {"type": "DMG-CPU B", "label": "DMG-CPU B"},
                "work_ram": null
            }"#,
        )
        .unwrap();
        assert_eq!(board.kind, "DMG-CPU-06");
        assert_eq!(board.circled_letters.as_deref(), Some("D"));
        assert_eq!(board.calendar.year, Some(1991));
        assert_eq!(board.calendar.month, Some(3));
        let cpu = board.chip("cpu").unwrap().as_ref().unwrap();
        assert_eq!(cpu.kind.as_deref(), Some("DMG-CPU B"));
        // verified-unpopulated slot
        assert_eq!(board.chip("work_ram"), Some(&None));
        // uninspected slot
        assert_eq!(board.chip("video_ram"), None);
    }

    #[test]
    fn console_metadata_round_trips() {
        let json = r#"{"color":"Gray","year":1990,"mainboard":{"type":"DMG-CPU-04"}}"#;
        let meta: ConsoleMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.color.as_deref(), Some("Gray"));
        assert_eq!(meta.calendar.year, Some(1990));
        let back = serde_json::to_value(&meta).unwrap();
        assert_eq!(back["mainboard"]["type"], "DMG-CPU-04");
        assert_eq!(back["year"], 1990);
    }

    #[test]
    fn date_range_is_a_two_element_array() {
        let calendar: Calendar = serde_json::from_str(
            r#"{"year": 1997, "date_range": [{"month": 1}, {"month": 3, "part": 2}]}"#,
        )
        .unwrap();
        let range = calendar.date_range.unwrap();
        assert_eq!(range.0.month, Some(1));
        assert_eq!(range.1.month, Some(3));
        assert_eq!(range.1.part, Some(2));
    }

    #[test]
    fn unknown_top_level_keys_are_captured_not_dropped() {
        let meta: ConsoleMetadata = serde_json::from_str(
            r#"{"colour": "Purple", "mainboard": {"type": "DMG-CPU-06"}}"#,
        )
        .unwrap();
        assert_eq!(meta.color, None);
        assert!(meta.extra.contains_key("colour"));

        let meta: CartridgeMetadata =
            serde_json::from_str(r#"{"stamps": "00A", "board": {"type": "DMG-BEAN"}}"#).unwrap();
        assert!(meta.extra.contains_key("stamps"));
    }

    #[test]
    fn outlier_defaults_to_false_and_is_omitted() {
        let chip: Chip = serde_json::from_str(r#"{"type": "LH5264N4"}"#).unwrap();
        assert!(!chip.outlier);
        let json = serde_json::to_string(&chip).unwrap();
        assert!(!json.contains("outlier"));
    }
}
