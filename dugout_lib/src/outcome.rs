//! Classification of terminal at-bat outcome labels.
//!
//! The pitch-log provider encodes at-bat results as snake_case labels on
//! the final pitch of each at-bat ("strikeout", "grounded_into_double_play",
//! "home_run", ...). This module maps that vocabulary onto a closed set of
//! semantic categories. Classification is total: any label the table does
//! not recognize counts as an out, which is a policy choice rather than a
//! data error.

use serde::Serialize;

/// Semantic category of a concluded at-bat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCategory {
    Strikeout,
    /// Walk or hit-by-pitch, including intentional walks.
    Walk,
    Single,
    Double,
    Triple,
    HomeRun,
    /// Everything else: field outs, double plays, errors, unknown labels.
    OtherOut,
}

impl OutcomeCategory {
    /// Display name used in outcome distributions.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Strikeout => "Strikeout",
            Self::Walk => "Walk",
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Triple => "Triple",
            Self::HomeRun => "Home Run",
            Self::OtherOut => "Out",
        }
    }

    /// True for the four hit categories.
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Single | Self::Double | Self::Triple | Self::HomeRun)
    }
}

/// Labels excluded from the at-bat denominator of batting-average-style
/// rates. They still count as plate appearances.
pub const NON_QUALIFYING_EVENTS: &[&str] =
    &["walk", "hit_by_pitch", "sac_fly", "sac_bunt", "intentional_walk"];

/// The four hit labels, matched exactly.
pub const HIT_EVENTS: &[&str] = &["single", "double", "triple", "home_run"];

/// Substring keywords, checked in order. These catch compound labels like
/// "strikeout_double_play".
const KEYWORD_CATEGORIES: &[(&str, OutcomeCategory)] = &[
    ("strikeout", OutcomeCategory::Strikeout),
    ("walk", OutcomeCategory::Walk),
    ("hit_by_pitch", OutcomeCategory::Walk),
];

/// Exact labels. The hit words must not be matched as substrings, or
/// "grounded_into_double_play" would count as a double.
const EXACT_CATEGORIES: &[(&str, OutcomeCategory)] = &[
    ("single", OutcomeCategory::Single),
    ("double", OutcomeCategory::Double),
    ("triple", OutcomeCategory::Triple),
    ("home_run", OutcomeCategory::HomeRun),
];

/// Maps a terminal outcome label to its category.
///
/// Matching is case-insensitive: keyword substrings first, exact labels
/// second, and everything unmatched falls through to
/// [`OutcomeCategory::OtherOut`].
pub fn classify(label: &str) -> OutcomeCategory {
    let label = label.to_ascii_lowercase();
    for (keyword, category) in KEYWORD_CATEGORIES {
        if label.contains(keyword) {
            return *category;
        }
    }
    for (exact, category) in EXACT_CATEGORIES {
        if label == *exact {
            return *category;
        }
    }
    OutcomeCategory::OtherOut
}

/// True when the label counts toward the at-bat denominator.
pub fn counts_as_at_bat(label: &str) -> bool {
    let label = label.to_ascii_lowercase();
    !NON_QUALIFYING_EVENTS.contains(&label.as_str())
}

/// True when the label is one of the four hit types.
pub fn is_hit_label(label: &str) -> bool {
    let label = label.to_ascii_lowercase();
    HIT_EVENTS.contains(&label.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(classify("Strikeout"), OutcomeCategory::Strikeout);
        assert_eq!(classify("STRIKEOUT"), OutcomeCategory::Strikeout);
        assert_eq!(classify("strikeout_double_play"), OutcomeCategory::Strikeout);
    }

    #[test]
    fn classify_walks_and_hbp() {
        assert_eq!(classify("walk"), OutcomeCategory::Walk);
        assert_eq!(classify("intentional_walk"), OutcomeCategory::Walk);
        assert_eq!(classify("hit_by_pitch"), OutcomeCategory::Walk);
    }

    #[test]
    fn classify_hits_exactly() {
        assert_eq!(classify("single"), OutcomeCategory::Single);
        assert_eq!(classify("double"), OutcomeCategory::Double);
        assert_eq!(classify("triple"), OutcomeCategory::Triple);
        assert_eq!(classify("home_run"), OutcomeCategory::HomeRun);
        // Compound labels containing a hit word are not hits.
        assert_eq!(
            classify("grounded_into_double_play"),
            OutcomeCategory::OtherOut
        );
        assert_eq!(classify("double_play"), OutcomeCategory::OtherOut);
    }

    #[test]
    fn classify_is_total_over_the_provider_vocabulary() {
        // The full label vocabulary observed in provider logs, with the
        // category each must land in.
        let vocabulary = [
            ("strikeout", OutcomeCategory::Strikeout),
            ("strikeout_double_play", OutcomeCategory::Strikeout),
            ("walk", OutcomeCategory::Walk),
            ("intentional_walk", OutcomeCategory::Walk),
            ("hit_by_pitch", OutcomeCategory::Walk),
            ("single", OutcomeCategory::Single),
            ("double", OutcomeCategory::Double),
            ("triple", OutcomeCategory::Triple),
            ("home_run", OutcomeCategory::HomeRun),
            ("field_out", OutcomeCategory::OtherOut),
            ("force_out", OutcomeCategory::OtherOut),
            ("grounded_into_double_play", OutcomeCategory::OtherOut),
            ("double_play", OutcomeCategory::OtherOut),
            ("triple_play", OutcomeCategory::OtherOut),
            ("fielders_choice", OutcomeCategory::OtherOut),
            ("fielders_choice_out", OutcomeCategory::OtherOut),
            ("field_error", OutcomeCategory::OtherOut),
            ("sac_fly", OutcomeCategory::OtherOut),
            ("sac_bunt", OutcomeCategory::OtherOut),
            ("sac_fly_double_play", OutcomeCategory::OtherOut),
            ("catcher_interf", OutcomeCategory::OtherOut),
            ("caught_stealing_2b", OutcomeCategory::OtherOut),
            ("pickoff_1b", OutcomeCategory::OtherOut),
            ("truncated_pa", OutcomeCategory::OtherOut),
        ];
        for (label, expected) in vocabulary {
            assert_eq!(classify(label), expected, "label {:?}", label);
        }
    }

    #[test]
    fn unknown_labels_default_to_out() {
        assert_eq!(classify("some_future_event"), OutcomeCategory::OtherOut);
    }

    #[test]
    fn at_bat_denominator_exclusions() {
        for label in NON_QUALIFYING_EVENTS {
            assert!(!counts_as_at_bat(label), "label {:?}", label);
        }
        assert!(counts_as_at_bat("strikeout"));
        assert!(counts_as_at_bat("single"));
        assert!(counts_as_at_bat("field_out"));
    }

    #[test]
    fn hit_labels() {
        assert!(is_hit_label("single"));
        assert!(is_hit_label("home_run"));
        assert!(!is_hit_label("walk"));
        assert!(!is_hit_label("grounded_into_double_play"));
    }
}
