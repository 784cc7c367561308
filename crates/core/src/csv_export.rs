//! CSV export of crawled submissions.
//!
//! Columns are generated from the registry descriptors, so every console
//! type gets the right set without a hand-maintained table per type. Cell
//! values follow the display conventions: `????` for details nobody has
//! recorded, `-` for details verified absent.

use std::io::Write;

use anyhow::{Context, Result};

use crate::classify;
use crate::crawler::{CartridgeSubmission, ConsoleSubmission};
use crate::format::{self, UNKNOWN};
use crate::metadata::{Board, Chip, ConsoleMetadata, LcdPanel};
use crate::registry::cartridge::CARTRIDGE_ROLES;
use crate::registry::{game_config, ConsoleKind};

/// One exported column: a header name and a cell accessor.
pub struct CsvColumn<T> {
    name: String,
    get: Box<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T> CsvColumn<T> {
    /// New column with the given header and cell accessor.
    pub fn new(
        name: impl Into<String>,
        get: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        CsvColumn {
            name: name.into(),
            get: Box::new(get),
        }
    }

    /// Header name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell value for one row.
    pub fn value(&self, row: &T) -> String {
        (self.get)(row)
    }
}

/// Write a header row plus one record per submission.
pub fn write_csv<T>(columns: &[CsvColumn<T>], rows: &[T], writer: impl Write) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(columns.iter().map(CsvColumn::name))
        .context("failed to write CSV header")?;
    for row in rows {
        out.write_record(columns.iter().map(|column| column.value(row)))
            .context("failed to write CSV record")?;
    }
    out.flush().context("failed to flush CSV output")?;
    Ok(())
}

fn chip_cell(slot: Option<&Option<Chip>>, f: impl FnOnce(&Chip) -> String) -> String {
    match slot {
        None => UNKNOWN.to_owned(),
        Some(None) => "-".to_owned(),
        Some(Some(chip)) => f(chip),
    }
}

fn chip_columns<T: 'static>(
    prefix: &str,
    get: impl for<'a> Fn(&'a T) -> Option<&'a Option<Chip>> + Send + Sync + Clone + 'static,
) -> Vec<CsvColumn<T>> {
    let g = get.clone();
    let mut columns = vec![CsvColumn::new(prefix.to_owned(), move |row: &T| {
        chip_cell(g(row), |chip| format::optional(chip.kind.as_ref(), String::clone))
    })];
    let g = get.clone();
    columns.push(CsvColumn::new(format!("{prefix}_label"), move |row: &T| {
        chip_cell(g(row), |chip| chip.label.render(String::clone))
    }));
    let g = get.clone();
    columns.push(CsvColumn::new(
        format!("{prefix}_manufacturer"),
        move |row: &T| {
            chip_cell(g(row), |chip| {
                format::optional(chip.manufacturer.as_ref(), String::clone)
            })
        },
    ));
    let g = get.clone();
    columns.push(CsvColumn::new(
        format!("{prefix}_manufacturer_name"),
        move |row: &T| {
            chip_cell(g(row), |chip| {
                format::optional(chip.manufacturer.as_ref(), |code| {
                    format::manufacturer_name(code)
                })
            })
        },
    ));
    let g = get.clone();
    columns.push(CsvColumn::new(
        format!("{prefix}_calendar_short"),
        move |row: &T| chip_cell(g(row), |chip| format::calendar_short(&format::chip_calendar(chip))),
    ));
    let g = get.clone();
    columns.push(CsvColumn::new(
        format!("{prefix}_calendar"),
        move |row: &T| chip_cell(g(row), |chip| format::calendar(&format::chip_calendar(chip))),
    ));
    let g = get.clone();
    columns.push(CsvColumn::new(format!("{prefix}_year"), move |row: &T| {
        chip_cell(g(row), |chip| {
            format::optional(chip.year.as_ref(), u16::to_string)
        })
    }));
    let g = get.clone();
    columns.push(CsvColumn::new(format!("{prefix}_month"), move |row: &T| {
        chip_cell(g(row), |chip| {
            format::optional(chip.month.as_ref(), u8::to_string)
        })
    }));
    columns.push(CsvColumn::new(format!("{prefix}_week"), move |row: &T| {
        chip_cell(get(row), |chip| {
            format::optional(chip.week.as_ref(), u8::to_string)
        })
    }));
    columns
}

fn board_scalar(board: Option<&Board>, f: impl FnOnce(&Board) -> Option<&String>) -> String {
    format::optional(board.and_then(f), String::clone)
}

fn board_columns<T: 'static>(
    prefix: &str,
    fields: &'static [&'static str],
    get: impl for<'a> Fn(&'a T) -> Option<&'a Board> + Send + Sync + Clone + 'static,
) -> Vec<CsvColumn<T>> {
    let g = get.clone();
    let mut columns = vec![CsvColumn::new(prefix.to_owned(), move |row: &T| {
        format::optional(g(row), |board| board.kind.clone())
    })];
    for field in fields {
        let g = get.clone();
        columns.push(CsvColumn::new(format!("{prefix}_{field}"), move |row: &T| {
            board_scalar(g(row), |board| match *field {
                "circled_letters" => board.circled_letters.as_ref(),
                "number_pair" => board.number_pair.as_ref(),
                "stamp" => board.stamp.as_ref(),
                "stamp_front" => board.stamp_front.as_ref(),
                "stamp_back" => board.stamp_back.as_ref(),
                "extra_label" => board.extra_label.as_ref(),
                "letter_at_top_right" => board.letter_at_top_right.as_ref(),
                "label" => board.label.as_ref(),
                _ => None,
            })
        }));
    }
    let g = get.clone();
    columns.push(CsvColumn::new(
        format!("{prefix}_calendar_short"),
        move |row: &T| format::optional(g(row), |board| format::calendar_short(&board.calendar)),
    ));
    let g = get.clone();
    columns.push(CsvColumn::new(
        format!("{prefix}_calendar"),
        move |row: &T| format::optional(g(row), |board| format::calendar(&board.calendar)),
    ));
    let g = get.clone();
    columns.push(CsvColumn::new(format!("{prefix}_year"), move |row: &T| {
        format::optional(
            g(row).and_then(|board| board.calendar.year.as_ref()),
            u16::to_string,
        )
    }));
    columns.push(CsvColumn::new(format!("{prefix}_month"), move |row: &T| {
        format::optional(
            get(row).and_then(|board| board.calendar.month.as_ref()),
            u8::to_string,
        )
    }));
    columns
}

fn lcd_panel_columns<T: 'static>(
    prefix: &str,
    get: impl for<'a> Fn(&'a T) -> Option<&'a LcdPanel> + Send + Sync + Clone + 'static,
) -> Vec<CsvColumn<T>> {
    let g = get.clone();
    let mut columns = vec![CsvColumn::new(format!("{prefix}_label"), move |row: &T| {
        format::optional(
            g(row).and_then(|panel| panel.label.as_ref()),
            String::clone,
        )
    })];
    let g = get.clone();
    columns.push(CsvColumn::new(
        format!("{prefix}_calendar"),
        move |row: &T| format::optional(g(row), |panel| format::calendar(&panel.calendar)),
    ));
    for role in ["column_driver", "row_driver"] {
        let g = get.clone();
        columns.extend(chip_columns(&format!("{prefix}_{role}"), move |row: &T| {
            g(row).and_then(|panel| panel.chips.get(role))
        }));
    }
    columns
}

fn sub_board<'a>(metadata: &'a ConsoleMetadata, role: &str) -> Option<&'a Board> {
    match role {
        "lcd_board" => metadata.lcd_board.as_ref(),
        "power_board" => metadata.power_board.as_ref(),
        "jack_board" => metadata.jack_board.as_ref(),
        _ => None,
    }
}

/// Columns for one console type, derived from its descriptor.
pub fn console_columns(kind: ConsoleKind) -> Vec<CsvColumn<ConsoleSubmission>> {
    let desc = kind.descriptor();
    let mut columns = vec![
        CsvColumn::new("type", |s: &ConsoleSubmission| s.kind.id().to_owned()),
        CsvColumn::new("title", |s: &ConsoleSubmission| s.title.clone()),
        CsvColumn::new("slug", |s: &ConsoleSubmission| s.slug.clone()),
        CsvColumn::new("contributor", |s: &ConsoleSubmission| s.contributor.clone()),
    ];
    if desc.shell.color {
        columns.push(CsvColumn::new("color", |s: &ConsoleSubmission| {
            format::optional(s.metadata.color.as_ref(), String::clone)
        }));
    }
    if desc.shell.release_code {
        columns.push(CsvColumn::new("release_code", |s: &ConsoleSubmission| {
            format::optional(s.metadata.release_code.as_ref(), String::clone)
        }));
    }
    if desc.shell.stamp {
        columns.push(CsvColumn::new("stamp", |s: &ConsoleSubmission| {
            format::optional(s.metadata.stamp.as_ref(), String::clone)
        }));
    }
    if desc.shell.calendar.allows_year() {
        columns.push(CsvColumn::new("calendar_short", |s: &ConsoleSubmission| {
            format::calendar_short(&s.metadata.calendar)
        }));
        columns.push(CsvColumn::new("calendar", |s: &ConsoleSubmission| {
            format::calendar(&s.metadata.calendar)
        }));
        columns.push(CsvColumn::new("year", |s: &ConsoleSubmission| {
            format::optional(s.metadata.calendar.year.as_ref(), u16::to_string)
        }));
    }
    if desc.shell.calendar.allows_month() {
        columns.push(CsvColumn::new("month", |s: &ConsoleSubmission| {
            format::optional(s.metadata.calendar.month.as_ref(), u8::to_string)
        }));
    }
    if desc.shell.calendar.allows_week() {
        columns.push(CsvColumn::new("week", |s: &ConsoleSubmission| {
            format::optional(s.metadata.calendar.week.as_ref(), u8::to_string)
        }));
    }

    columns.extend(board_columns(
        "mainboard",
        desc.mainboard_fields,
        |s: &ConsoleSubmission| Some(&s.metadata.mainboard),
    ));
    for slot in desc.mainboard_slots {
        let role = slot.role;
        columns.extend(chip_columns(
            &format!("mainboard_{role}"),
            move |s: &ConsoleSubmission| s.metadata.mainboard.chip(role),
        ));
    }

    for spec in desc.sub_boards {
        let role = spec.role;
        columns.extend(board_columns(role, spec.fields, move |s: &ConsoleSubmission| {
            sub_board(&s.metadata, role)
        }));
        for slot in spec.slots {
            let slot_role = slot.role;
            columns.extend(chip_columns(
                &format!("{role}_{slot_role}"),
                move |s: &ConsoleSubmission| {
                    sub_board(&s.metadata, role).and_then(|board| board.chip(slot_role))
                },
            ));
        }
        if spec.lcd_panel {
            columns.extend(lcd_panel_columns(
                &format!("{role}_lcd_panel"),
                move |s: &ConsoleSubmission| {
                    sub_board(&s.metadata, role).and_then(|board| board.lcd_panel.as_ref())
                },
            ));
        }
    }
    if desc.shell.lcd_panel {
        columns.extend(lcd_panel_columns("lcd_panel", |s: &ConsoleSubmission| {
            s.metadata.lcd_panel.as_ref()
        }));
    }
    columns
}

/// Columns for cartridge submissions. All layouts share one column set; a
/// chip role absent from a board's layout simply stays unrecorded.
pub fn cartridge_columns() -> Vec<CsvColumn<CartridgeSubmission>> {
    let mut columns = vec![
        CsvColumn::new("type", |s: &CartridgeSubmission| s.code.clone()),
        CsvColumn::new("game", |s: &CartridgeSubmission| {
            format::optional(game_config(&s.code), |game| game.name.to_owned())
        }),
        CsvColumn::new("title", |s: &CartridgeSubmission| s.title.clone()),
        CsvColumn::new("slug", |s: &CartridgeSubmission| s.slug.clone()),
        CsvColumn::new("contributor", |s: &CartridgeSubmission| {
            s.contributor.clone()
        }),
        CsvColumn::new("code", |s: &CartridgeSubmission| {
            format::optional(s.metadata.code.as_ref(), String::clone)
        }),
        CsvColumn::new("stamp", |s: &CartridgeSubmission| {
            format::optional(s.metadata.stamp.as_ref(), String::clone)
        }),
        CsvColumn::new("mapper", |s: &CartridgeSubmission| {
            format::optional(classify::classify_mapper(s).as_ref(), |mapper| {
                mapper.name().to_owned()
            })
        }),
        CsvColumn::new("battery", |s: &CartridgeSubmission| {
            format::optional(game_config(&s.code), |game| {
                let battery = game.layouts[0].layout().battery;
                if battery { "yes" } else { "no" }.to_owned()
            })
        }),
    ];
    columns.extend(board_columns(
        "board",
        &["circled_letters", "number_pair", "stamp", "extra_label"],
        |s: &CartridgeSubmission| Some(&s.metadata.board),
    ));
    columns.push(CsvColumn::new("rom_code", |s: &CartridgeSubmission| {
        chip_cell(s.metadata.board.chip("rom"), |chip| {
            format::optional(chip.rom_code.as_ref(), String::clone)
        })
    }));
    for role in CARTRIDGE_ROLES {
        let role = *role;
        columns.extend(chip_columns(
            &format!("board_{role}"),
            move |s: &CartridgeSubmission| s.metadata.board.chip(role),
        ));
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::PhotoSet;

    fn dmg_submission() -> ConsoleSubmission {
        ConsoleSubmission {
            kind: ConsoleKind::Dmg,
            title: "DMG-ABCD-0".to_owned(),
            slug: "DMG-ABCD-0".to_owned(),
            sort_group: Some("DMG".to_owned()),
            contributor: "alice".to_owned(),
            metadata: serde_json::from_str(
                r#"{
                    "color": "Gray",
                    "year": 1990,
                    "month": 11,
                    "mainboard": {
                        "type": "DMG-CPU-06",
                        "cpu": {"type": "DMG-CPU B", "year": 1990, "week": 38},
                        "work_ram": null
                    }
                }"#,
            )
            .unwrap(),
            photos: PhotoSet::new(),
        }
    }

    fn header(columns: &[CsvColumn<ConsoleSubmission>]) -> Vec<String> {
        columns.iter().map(|c| c.name().to_owned()).collect()
    }

    #[test]
    fn console_columns_follow_the_descriptor() {
        let dmg = header(&console_columns(ConsoleKind::Dmg));
        assert!(dmg.contains(&"color".to_owned()));
        assert!(dmg.contains(&"mainboard_cpu_label".to_owned()));
        assert!(dmg.contains(&"lcd_board_lcd_panel_label".to_owned()));
        assert!(dmg.contains(&"power_board_label".to_owned()));
        assert!(!dmg.contains(&"release_code".to_owned()));
        assert!(!dmg.contains(&"week".to_owned()));

        let sgb = header(&console_columns(ConsoleKind::Sgb));
        assert!(sgb.contains(&"stamp".to_owned()));
        assert!(sgb.contains(&"mainboard_icd2".to_owned()));
        assert!(!sgb.contains(&"color".to_owned()));
        assert!(!sgb.contains(&"calendar".to_owned()));

        let agb = header(&console_columns(ConsoleKind::Agb));
        assert!(agb.contains(&"week".to_owned()));
        assert!(!agb.contains(&"month".to_owned()));
    }

    #[test]
    fn cells_follow_the_display_conventions() {
        let columns = console_columns(ConsoleKind::Dmg);
        let sub = dmg_submission();
        let cell = |name: &str| {
            columns
                .iter()
                .find(|c| c.name() == name)
                .unwrap()
                .value(&sub)
        };
        assert_eq!(cell("type"), "dmg");
        assert_eq!(cell("color"), "Gray");
        assert_eq!(cell("calendar_short"), "Nov/1990");
        assert_eq!(cell("mainboard_cpu"), "DMG-CPU B");
        assert_eq!(cell("mainboard_cpu_calendar"), "Week 38/1990");
        // label present on chip but never transcribed
        assert_eq!(cell("mainboard_cpu_label"), "????");
        // verified-unpopulated slot
        assert_eq!(cell("mainboard_work_ram"), "-");
        // never-inspected slot
        assert_eq!(cell("mainboard_video_ram"), "????");
        // absent sub-board
        assert_eq!(cell("lcd_board"), "????");
    }

    #[test]
    fn write_csv_emits_header_and_rows() {
        let columns = console_columns(ConsoleKind::Dmg);
        let rows = vec![dmg_submission()];
        let mut out = Vec::new();
        write_csv(&columns, &rows, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("type,title,slug,contributor,color"));
        assert!(lines[1].starts_with("dmg,DMG-ABCD-0,DMG-ABCD-0,alice,Gray"));
    }

    #[test]
    fn cartridge_columns_include_catalog_and_classification() {
        let columns = cartridge_columns();
        let sub = CartridgeSubmission {
            code: "DMG-AAUJ-1".to_owned(),
            title: "Unit #1".to_owned(),
            slug: "bob-1".to_owned(),
            sort_group: None,
            contributor: "bob".to_owned(),
            metadata: serde_json::from_str(
                r#"{
                    "board": {
                        "type": "DMG-KGMEF-10",
                        "rom": {"type": "MASK ROM", "rom_code": "DMG-AAUJ-1"},
                        "mapper": {"type": "MBC5"}
                    }
                }"#,
            )
            .unwrap(),
            photos: PhotoSet::new(),
        };
        let cell = |name: &str| {
            columns
                .iter()
                .find(|c| c.name() == name)
                .unwrap()
                .value(&sub)
        };
        assert_eq!(cell("game"), "Money Idol Exchanger");
        assert_eq!(cell("mapper"), "MBC5");
        assert_eq!(cell("battery"), "yes");
        assert_eq!(cell("rom_code"), "DMG-AAUJ-1");
        assert_eq!(cell("board_mapper"), "MBC5");
        assert_eq!(cell("board_ram"), "????");
    }
}
