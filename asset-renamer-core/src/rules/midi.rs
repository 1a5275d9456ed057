use std::collections::HashMap;

use super::{has_extension, NamingRule};

/// MIDI tracks: `My Theme (Loop).mid` becomes `MY-THEME-LOOP.MID`.
///
/// When several files normalize to the same base, the first in scan order
/// keeps the bare base and later ones get `-2`, `-3`, and so on.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidiNameRule;

impl NamingRule for MidiNameRule {
    /// Occurrences seen so far per normalized base.
    type State = HashMap<String, usize>;

    fn is_eligible(&self, file_name: &str) -> bool {
        has_extension(file_name, "mid")
    }

    fn destination(&self, stem: &str, seen: &mut Self::State) -> Option<String> {
        let base = normalize_stem(stem);
        if base.is_empty() {
            return None;
        }

        let count = seen.entry(base.clone()).or_insert(0);
        *count += 1;

        if *count == 1 {
            Some(format!("{base}.MID"))
        } else {
            Some(format!("{base}-{count}.MID"))
        }
    }
}

/// Uppercase, drop punctuation, and join words with single hyphens.
///
/// Whitespace, `_`, and `-` all act as separators; runs of them collapse to
/// one `-` and separators at either end are trimmed.
pub fn normalize_stem(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut pending_separator = false;

    for c in stem.to_uppercase().chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_separator = true;
        } else if c.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_examples() {
        assert_eq!(normalize_stem("My Theme (Loop)"), "MY-THEME-LOOP");
        assert_eq!(normalize_stem("boss_fight  final"), "BOSS-FIGHT-FINAL");
        assert_eq!(normalize_stem("--intro--"), "INTRO");
        assert_eq!(normalize_stem("a - b"), "A-B");
        assert_eq!(normalize_stem("a_-_b"), "A-B");
        assert_eq!(normalize_stem("THEME!!"), "THEME");
        assert_eq!(normalize_stem("level 1: the (dark) caves"), "LEVEL-1-THE-DARK-CAVES");
    }

    #[test]
    fn test_stripped_punctuation_does_not_split_words() {
        assert_eq!(normalize_stem("rock'n'roll"), "ROCKNROLL");
        assert_eq!(normalize_stem("a!-!b"), "A-B");
    }

    #[test]
    fn test_normalize_only_punctuation_is_empty() {
        assert_eq!(normalize_stem("!!!"), "");
        assert_eq!(normalize_stem(" _ - "), "");
    }

    #[test]
    fn test_destination_uses_upper_mid_extension() {
        let mut seen = HashMap::new();
        assert_eq!(
            MidiNameRule.destination("My Theme (Loop)", &mut seen).as_deref(),
            Some("MY-THEME-LOOP.MID")
        );
    }

    #[test]
    fn test_duplicates_count_per_base() {
        let mut seen = HashMap::new();
        let rule = MidiNameRule;
        assert_eq!(rule.destination("THEME!!", &mut seen).as_deref(), Some("THEME.MID"));
        assert_eq!(rule.destination("Boss", &mut seen).as_deref(), Some("BOSS.MID"));
        assert_eq!(rule.destination("Theme", &mut seen).as_deref(), Some("THEME-2.MID"));
        assert_eq!(rule.destination("theme ", &mut seen).as_deref(), Some("THEME-3.MID"));
        assert_eq!(rule.destination("boss!", &mut seen).as_deref(), Some("BOSS-2.MID"));
    }

    #[test]
    fn test_empty_base_is_not_mapped_or_counted() {
        let mut seen = HashMap::new();
        assert_eq!(MidiNameRule.destination("???", &mut seen), None);
        assert!(seen.is_empty());
    }

    #[test]
    fn test_eligibility_is_mid_only() {
        assert!(MidiNameRule.is_eligible("theme.mid"));
        assert!(MidiNameRule.is_eligible("THEME.MID"));
        assert!(!MidiNameRule.is_eligible("theme.midi"));
        assert!(!MidiNameRule.is_eligible("theme.wav"));
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(stem in "[ -~\\t]{0,40}") {
            let once = normalize_stem(&stem);
            prop_assert_eq!(normalize_stem(&once), once.clone());
            prop_assert!(!once.starts_with('-'));
            prop_assert!(!once.ends_with('-'));
            prop_assert!(!once.contains("--"));
        }
    }
}
