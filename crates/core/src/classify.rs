//! Ordering and grouping of crawled submissions.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::warn;

use crate::crawler::{CartridgeSubmission, ConsoleSubmission};
use crate::registry::{game_config, ConsoleKind, MapperId};

/// Sort identity shared by both submission kinds.
pub trait Ordered {
    /// Primary sort key, when the unit has one.
    fn sort_group(&self) -> Option<&str>;
    /// Secondary sort key, unique within the partition.
    fn slug(&self) -> &str;
}

impl Ordered for ConsoleSubmission {
    fn sort_group(&self) -> Option<&str> {
        self.sort_group.as_deref()
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

impl Ordered for CartridgeSubmission {
    fn sort_group(&self) -> Option<&str> {
        self.sort_group.as_deref()
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Stable display order: units with a sort group come first, ordered by
/// group, with the slug breaking ties.
pub fn submission_order<T: Ordered>(a: &T, b: &T) -> Ordering {
    let by_group = match (a.sort_group(), b.sort_group()) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_group.then_with(|| a.slug().cmp(b.slug()))
}

/// Console submissions grouped by console type, each group in display order.
pub fn consoles_by_kind(
    submissions: &[ConsoleSubmission],
) -> BTreeMap<ConsoleKind, Vec<&ConsoleSubmission>> {
    let mut groups: BTreeMap<ConsoleKind, Vec<&ConsoleSubmission>> = BTreeMap::new();
    for submission in submissions {
        groups.entry(submission.kind).or_default().push(submission);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| submission_order(*a, *b));
    }
    groups
}

/// Cartridge submissions grouped by ROM id, each group in display order.
pub fn cartridges_by_game(
    submissions: &[CartridgeSubmission],
) -> BTreeMap<&str, Vec<&CartridgeSubmission>> {
    let mut groups: BTreeMap<&str, Vec<&CartridgeSubmission>> = BTreeMap::new();
    for submission in submissions {
        groups
            .entry(submission.code.as_str())
            .or_default()
            .push(submission);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| submission_order(*a, *b));
    }
    groups
}

/// Determine the mapper family of a cartridge.
///
/// A transcribed mapper chip always wins. Without one, the board layout of
/// the game decides: layouts without a mapper position classify as
/// "no mapper", anything else stays indeterminate. Unrecognized chip types
/// are logged and left indeterminate rather than guessed.
pub fn classify_mapper(submission: &CartridgeSubmission) -> Option<MapperId> {
    if let Some(Some(chip)) = submission.metadata.board.chip("mapper") {
        if let Some(kind) = chip.kind.as_deref() {
            return match MapperId::from_chip_kind(kind) {
                Some(mapper) => Some(mapper),
                None => {
                    warn!(
                        "unclassifiable mapper type {:?} on {}/{}",
                        kind, submission.code, submission.slug
                    );
                    None
                }
            };
        }
        // chip present but marking illegible
        return None;
    }
    let layout = game_config(&submission.code)?.layouts[0];
    if layout.has_mapper() {
        None
    } else {
        Some(MapperId::NoMapper)
    }
}

/// Cartridge submissions grouped by classified mapper, each group in
/// display order. Indeterminate cartridges are left out.
pub fn cartridges_by_mapper(
    submissions: &[CartridgeSubmission],
) -> BTreeMap<MapperId, Vec<&CartridgeSubmission>> {
    let mut groups: BTreeMap<MapperId, Vec<&CartridgeSubmission>> = BTreeMap::new();
    for submission in submissions {
        if let Some(mapper) = classify_mapper(submission) {
            groups.entry(mapper).or_default().push(submission);
        }
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| submission_order(*a, *b));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::PhotoSet;

    fn console(slug: &str, sort_group: Option<&str>) -> ConsoleSubmission {
        ConsoleSubmission {
            kind: ConsoleKind::Dmg,
            title: slug.to_owned(),
            slug: slug.to_owned(),
            sort_group: sort_group.map(str::to_owned),
            contributor: "test".to_owned(),
            metadata: serde_json::from_str(r#"{"mainboard": {"type": "DMG-CPU-06"}}"#).unwrap(),
            photos: PhotoSet::new(),
        }
    }

    fn cartridge(code: &str, slug: &str, board: &str) -> CartridgeSubmission {
        CartridgeSubmission {
            code: code.to_owned(),
            title: slug.to_owned(),
            slug: slug.to_owned(),
            sort_group: None,
            contributor: "test".to_owned(),
            metadata: serde_json::from_str(board).unwrap(),
            photos: PhotoSet::new(),
        }
    }

    #[test]
    fn sort_groups_come_before_ungrouped_units() {
        let mut subs = vec![
            console("zeta-1", None),
            console("G13235055", Some("G")),
            console("alpha-2", None),
            console("C10280764", Some("C")),
        ];
        subs.sort_by(|a, b| submission_order(a, b));
        let slugs: Vec<_> = subs.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, ["C10280764", "G13235055", "alpha-2", "zeta-1"]);
    }

    #[test]
    fn equal_sort_groups_fall_back_to_the_slug() {
        let mut subs = vec![
            console("G2", Some("G")),
            console("G1", Some("G")),
        ];
        subs.sort_by(|a, b| submission_order(a, b));
        assert_eq!(subs[0].slug, "G1");
    }

    #[test]
    fn transcribed_mapper_chip_wins_over_layout() {
        // the catalog says MBC5-era layout, the board says MBC30
        let sub = cartridge(
            "DMG-AAUJ-1",
            "test-1",
            r#"{"board": {"type": "DMG-KGMEF-10", "mapper": {"type": "MBC30"}}}"#,
        );
        assert_eq!(classify_mapper(&sub), Some(MapperId::Mbc30));
    }

    #[test]
    fn unknown_mapper_type_stays_indeterminate() {
        let sub = cartridge(
            "DMG-AAUJ-1",
            "test-1",
            r#"{"board": {"type": "DMG-KGMEF-10", "mapper": {"type": "XYZ99"}}}"#,
        );
        assert_eq!(classify_mapper(&sub), None);
    }

    #[test]
    fn mapperless_layout_classifies_without_a_chip() {
        let sub = cartridge(
            "DMG-TRA-1",
            "test-1",
            r#"{"board": {"type": "DMG-BEAN"}}"#,
        );
        assert_eq!(classify_mapper(&sub), Some(MapperId::NoMapper));
    }

    #[test]
    fn unknown_game_without_a_chip_stays_indeterminate() {
        let sub = cartridge(
            "DMG-XXXX-9",
            "test-1",
            r#"{"board": {"type": "DMG-BEAN"}}"#,
        );
        assert_eq!(classify_mapper(&sub), None);
    }

    #[test]
    fn grouping_by_mapper_drops_indeterminate_cartridges() {
        let subs = vec![
            cartridge(
                "CGB-BXTJ-0",
                "a-1",
                r#"{"board": {"type": "CGB-B02", "mapper": {"type": "MBC30"}}}"#,
            ),
            cartridge("DMG-TRA-1", "b-1", r#"{"board": {"type": "DMG-BEAN"}}"#),
            cartridge("DMG-XXXX-9", "c-1", r#"{"board": {"type": "DMG-BEAN"}}"#),
        ];
        let groups = cartridges_by_mapper(&subs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&MapperId::Mbc30].len(), 1);
        assert_eq!(groups[&MapperId::NoMapper].len(), 1);
    }

    #[test]
    fn grouping_by_kind_orders_each_group() {
        let subs = vec![
            console("dana-2", None),
            console("C10280764", Some("C")),
        ];
        let groups = consoles_by_kind(&subs);
        let dmg = &groups[&ConsoleKind::Dmg];
        assert_eq!(dmg[0].slug, "C10280764");
        assert_eq!(dmg[1].slug, "dana-2");
    }
}
