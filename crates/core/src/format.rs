//! Pure formatting helpers shared by listings and CSV export.

use crate::metadata::{Calendar, Chip, DateRangePart};

/// Placeholder for details nobody has recorded yet.
pub const UNKNOWN: &str = "????";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Clone, Copy)]
enum Style {
    Long,
    Short,
}

/// Render an optional value, `????` when absent.
pub fn optional<T>(value: Option<&T>, f: impl FnOnce(&T) -> String) -> String {
    match value {
        Some(value) => f(value),
        None => UNKNOWN.to_owned(),
    }
}

fn month_name(month: u8, style: Style) -> Option<String> {
    let name = MONTHS.get(usize::from(month).checked_sub(1)?)?;
    Some(match style {
        Style::Long => (*name).to_owned(),
        Style::Short => name[..3].to_owned(),
    })
}

fn range_part(part: &DateRangePart, style: Style) -> String {
    optional(part.month.as_ref(), |month| {
        month_name(*month, style).unwrap_or_else(|| month.to_string())
    })
}

fn calendar_with(calendar: &Calendar, style: Style) -> String {
    let year = optional(calendar.year.as_ref(), |y| y.to_string());
    // month wins over week wins over date range
    let qualifier = if let Some(month) = calendar.month {
        month_name(month, style)
    } else if let Some(week) = calendar.week {
        Some(match style {
            Style::Long => format!("Week {week}"),
            Style::Short => week.to_string(),
        })
    } else {
        calendar.date_range.as_ref().map(|range| {
            format!("{}-{}", range_part(&range.0, style), range_part(&range.1, style))
        })
    };
    match qualifier {
        Some(qualifier) => format!("{qualifier}/{year}"),
        None => year,
    }
}

/// Long calendar form, e.g. `January/1998` or `Week 12/1998`.
pub fn calendar(value: &Calendar) -> String {
    calendar_with(value, Style::Long)
}

/// Short calendar form, e.g. `Jan/1998` or `12/1998`.
pub fn calendar_short(value: &Calendar) -> String {
    calendar_with(value, Style::Short)
}

/// The manufacturing calendar printed on a chip package.
pub fn chip_calendar(chip: &Chip) -> Calendar {
    Calendar {
        year: chip.year,
        month: chip.month,
        week: chip.week,
        date_range: None,
    }
}

/// Display name for a manufacturer code. Unrecognized codes pass through
/// unchanged so new codes degrade gracefully.
pub fn manufacturer_name(code: &str) -> String {
    let name = match code {
        "amic" => "AMIC Technology",
        "analog" => "Analog Devices",
        "atmel" => "Atmel",
        "att" => "AT&T Technologies",
        "bsi" => "BSI",
        "crosslink" => "Crosslink Semiconductor",
        "fujitsu" => "Fujitsu",
        "hudson" => "Hudson",
        "hynix" => "Hynix",
        "hyundai" => "Hyundai",
        "kds" => "Daishinku",
        "kinseki" => "Kinseki",
        "lgs" => "Lucky GoldStar",
        "lsi-logic" => "LSI Logic",
        "macronix" => "Macronix",
        "magnachip" => "MagnaChip",
        "mitsubishi" => "Mitsubishi",
        "mitsumi" => "Mitsumi",
        "mosel-vitelic" => "Mosel-Vitelic",
        "motorola" => "Motorola",
        "nec" => "NEC",
        "oki" => "OKI",
        "panasonic" => "Panasonic",
        "rohm" => "ROHM",
        "samsung" => "Samsung",
        "sanyo" => "Sanyo",
        "seiko" => "Seiko Instruments",
        "sharp" => "Sharp",
        "smsc" => "Standard Microsystems Corporation",
        "sst" => "SST",
        "st" => "STMicroelectronics",
        "tdk" => "TDK",
        "ti" => "Texas Instruments",
        "toshiba" => "Toshiba",
        "victronix" => "Victronix",
        "winbond" => "Winbond",
        other => other,
    };
    name.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::DateRange;

    fn cal(year: Option<u16>, month: Option<u8>, week: Option<u8>) -> Calendar {
        Calendar {
            year,
            month,
            week,
            date_range: None,
        }
    }

    #[test]
    fn month_takes_priority_over_week() {
        let c = cal(Some(1998), Some(3), Some(12));
        assert_eq!(calendar_short(&c), "Mar/1998");
        assert_eq!(calendar(&c), "March/1998");
    }

    #[test]
    fn week_is_used_when_no_month_is_recorded() {
        let c = cal(Some(1998), None, Some(12));
        assert_eq!(calendar_short(&c), "12/1998");
        assert_eq!(calendar(&c), "Week 12/1998");
    }

    #[test]
    fn year_alone_renders_without_separator() {
        assert_eq!(calendar(&cal(Some(1998), None, None)), "1998");
    }

    #[test]
    fn missing_year_renders_the_placeholder() {
        assert_eq!(calendar(&cal(None, None, None)), "????");
        assert_eq!(calendar_short(&cal(None, Some(3), None)), "Mar/????");
    }

    #[test]
    fn date_range_is_the_last_resort_qualifier() {
        let c = Calendar {
            year: Some(1997),
            month: None,
            week: None,
            date_range: Some(DateRange(
                DateRangePart {
                    month: Some(1),
                    part: None,
                },
                DateRangePart {
                    month: Some(3),
                    part: Some(2),
                },
            )),
        };
        assert_eq!(calendar_short(&c), "Jan-Mar/1997");
        assert_eq!(calendar(&c), "January-March/1997");
    }

    #[test]
    fn manufacturer_codes_map_to_display_names() {
        assert_eq!(manufacturer_name("sharp"), "Sharp");
        assert_eq!(manufacturer_name("kds"), "Daishinku");
        assert_eq!(manufacturer_name("smsc"), "Standard Microsystems Corporation");
        // unknown codes pass through
        assert_eq!(manufacturer_name("acme"), "acme");
    }
}
