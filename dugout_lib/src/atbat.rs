//! At-bat reconstruction over raw pitch streams.
//!
//! A pitch log is a flat sequence of per-pitch rows. Reconstruction groups
//! rows into plate appearances keyed by (game date, at-bat number), orders
//! the pitches within each group, and resolves the terminal outcome from
//! the highest-numbered pitch that carries an outcome label.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use statcast_api::types::PitchEvent;

use crate::outcome::{self, OutcomeCategory};

/// Resolved result of a reconstructed at-bat.
///
/// `InProgress` marks a group with no outcome-bearing pitch (the at-bat
/// was still live when the log was cut). It is distinguishable from every
/// genuine outcome category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AtBatOutcome {
    /// The raw terminal label from the provider (e.g. "strikeout").
    Event(String),
    InProgress,
}

impl AtBatOutcome {
    /// The raw label, when the at-bat concluded.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Event(label) => Some(label),
            Self::InProgress => None,
        }
    }

    /// Semantic category, when the at-bat concluded.
    pub fn category(&self) -> Option<OutcomeCategory> {
        self.label().map(outcome::classify)
    }

    /// Display string: the raw label, or an explicit in-progress marker.
    pub fn display(&self) -> &str {
        match self {
            Self::Event(label) => label,
            Self::InProgress => "in progress",
        }
    }
}

/// One reconstructed plate appearance.
#[derive(Debug, Clone, Serialize)]
pub struct AtBat {
    pub game_date: NaiveDate,
    pub at_bat_number: i64,
    /// Pitches of this at-bat, ordered by pitch number ascending.
    pub pitches: Vec<PitchEvent>,
    pub outcome: AtBatOutcome,
}

impl AtBat {
    /// Final pitch of the at-bat. Reconstruction never produces an empty
    /// pitch list, so this is only `None` for a hand-built empty value.
    pub fn final_pitch(&self) -> Option<&PitchEvent> {
        self.pitches.last()
    }
}

/// Groups a pitch stream into at-bats, ascending by (game date, at-bat
/// number), each with pitches ordered by pitch number.
///
/// The terminal outcome comes from the pitch with the highest pitch number
/// that carries a non-empty label; a group where no pitch carries one
/// surfaces as [`AtBatOutcome::InProgress`] rather than an error.
pub fn reconstruct(events: &[PitchEvent]) -> Vec<AtBat> {
    let mut groups: BTreeMap<(NaiveDate, i64), Vec<PitchEvent>> = BTreeMap::new();
    for event in events {
        groups
            .entry((event.game_date, event.at_bat_number))
            .or_default()
            .push(event.clone());
    }

    groups
        .into_iter()
        .map(|((game_date, at_bat_number), mut pitches)| {
            pitches.sort_by_key(|p| p.pitch_number);
            let outcome = pitches
                .iter()
                .rev()
                .find_map(|p| p.terminal_label())
                .map(|label| AtBatOutcome::Event(label.to_string()))
                .unwrap_or(AtBatOutcome::InProgress);
            AtBat {
                game_date,
                at_bat_number,
                pitches,
                outcome,
            }
        })
        .collect()
}

/// Orders at-bats for presentation: most recent game first, ties broken by
/// at-bat number descending.
pub fn newest_first(mut at_bats: Vec<AtBat>) -> Vec<AtBat> {
    at_bats.sort_by(|a, b| {
        (b.game_date, b.at_bat_number).cmp(&(a.game_date, a.at_bat_number))
    });
    at_bats
}

/// Terminal labels of the concluded at-bats, in input order.
pub fn terminal_labels(at_bats: &[AtBat]) -> Vec<&str> {
    at_bats
        .iter()
        .filter_map(|ab| ab.outcome.label())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pitch(
        game_date: NaiveDate,
        at_bat_number: i64,
        pitch_number: i64,
        events: Option<&str>,
    ) -> PitchEvent {
        PitchEvent {
            game_date,
            at_bat_number,
            pitch_number,
            events: events.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn outcome_comes_from_highest_labeled_pitch() {
        let d = date(2024, 6, 15);
        // Out of order on purpose.
        let events = vec![
            pitch(d, 23, 3, Some("strikeout")),
            pitch(d, 23, 1, None),
            pitch(d, 23, 2, None),
        ];
        let at_bats = reconstruct(&events);
        assert_eq!(at_bats.len(), 1);
        let ab = &at_bats[0];
        assert_eq!(
            ab.pitches.iter().map(|p| p.pitch_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(ab.outcome, AtBatOutcome::Event("strikeout".to_string()));
        assert_eq!(ab.outcome.category(), Some(OutcomeCategory::Strikeout));
    }

    #[test]
    fn unlabeled_group_is_in_progress() {
        let d = date(2024, 6, 16);
        let events = vec![pitch(d, 12, 1, None), pitch(d, 12, 2, None)];
        let at_bats = reconstruct(&events);
        assert_eq!(at_bats.len(), 1);
        assert_eq!(at_bats[0].outcome, AtBatOutcome::InProgress);
        assert!(at_bats[0].outcome.category().is_none());
        assert_eq!(at_bats[0].outcome.display(), "in progress");
    }

    #[test]
    fn label_on_non_final_pitch_still_wins_when_later_pitches_are_blank() {
        // A label on pitch 2 with an unlabeled pitch 3 after it: the
        // highest-numbered *labeled* pitch decides.
        let d = date(2024, 6, 15);
        let events = vec![
            pitch(d, 5, 1, None),
            pitch(d, 5, 2, Some("single")),
            pitch(d, 5, 3, None),
        ];
        let at_bats = reconstruct(&events);
        assert_eq!(at_bats[0].outcome, AtBatOutcome::Event("single".to_string()));
    }

    #[test]
    fn groups_split_by_date_and_number() {
        let d1 = date(2024, 6, 15);
        let d2 = date(2024, 6, 16);
        let events = vec![
            pitch(d1, 23, 1, Some("field_out")),
            pitch(d1, 41, 1, Some("home_run")),
            pitch(d2, 23, 1, Some("walk")),
        ];
        let at_bats = reconstruct(&events);
        assert_eq!(at_bats.len(), 3);
        // Ascending by (date, number).
        assert_eq!(at_bats[0].at_bat_number, 23);
        assert_eq!(at_bats[0].game_date, d1);
        assert_eq!(at_bats[2].game_date, d2);
    }

    #[test]
    fn newest_first_ordering() {
        let d1 = date(2024, 6, 15);
        let d2 = date(2024, 6, 16);
        let at_bats = reconstruct(&[
            pitch(d1, 23, 1, Some("field_out")),
            pitch(d1, 41, 1, Some("single")),
            pitch(d2, 7, 1, Some("walk")),
        ]);
        let ordered = newest_first(at_bats);
        assert_eq!(
            ordered
                .iter()
                .map(|ab| (ab.game_date, ab.at_bat_number))
                .collect::<Vec<_>>(),
            vec![(d2, 7), (d1, 41), (d1, 23)]
        );
    }

    #[test]
    fn empty_input_reconstructs_to_nothing() {
        assert!(reconstruct(&[]).is_empty());
    }

    #[test]
    fn terminal_labels_skip_in_progress() {
        let d = date(2024, 6, 15);
        let at_bats = reconstruct(&[
            pitch(d, 1, 1, Some("strikeout")),
            pitch(d, 2, 1, None),
            pitch(d, 3, 1, Some("single")),
        ]);
        assert_eq!(terminal_labels(&at_bats), vec!["strikeout", "single"]);
    }
}
