//! The per-pitch row schema returned by the statcast search endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One pitch, as downloaded from the statcast search CSV.
///
/// Every numeric measurement is optional: the provider leaves fields empty
/// for pitches where tracking data is missing, and empty CSV fields
/// deserialize to `None`. Rows are read-only facts; nothing downstream
/// mutates them.
///
/// `events` is only populated on the final pitch of a concluded at-bat;
/// earlier pitches in the same at-bat carry an empty field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PitchEvent {
    /// Date of the game this pitch was thrown in.
    pub game_date: NaiveDate,

    /// At-bat sequence number within the game. Together with `game_date`
    /// this identifies one plate appearance.
    pub at_bat_number: i64,

    /// Pitch sequence number within the at-bat (1-indexed).
    pub pitch_number: i64,

    /// MLBAM id of the pitcher.
    pub pitcher: i64,

    /// MLBAM id of the batter.
    pub batter: i64,

    /// Short pitch-type code (e.g. "FF", "SL").
    pub pitch_type: Option<String>,

    /// Human-readable pitch name (e.g. "4-Seam Fastball").
    pub pitch_name: Option<String>,

    /// Release speed in mph.
    pub release_speed: Option<f64>,

    /// Release spin rate in rpm.
    pub release_spin_rate: Option<f64>,

    pub release_pos_x: Option<f64>,

    pub release_pos_y: Option<f64>,

    pub release_pos_z: Option<f64>,

    /// Horizontal movement in feet, relative to a spinless trajectory.
    pub pfx_x: Option<f64>,

    /// Vertical movement in feet, relative to a spinless trajectory.
    pub pfx_z: Option<f64>,

    /// Horizontal plate-crossing coordinate in feet from the plate center.
    pub plate_x: Option<f64>,

    /// Height of the pitch as it crossed the plate, in feet.
    pub plate_z: Option<f64>,

    /// Top of the batter's strike zone for this pitch, in feet.
    pub sz_top: Option<f64>,

    /// Bottom of the batter's strike zone for this pitch, in feet.
    pub sz_bot: Option<f64>,

    /// Pitch result description (e.g. "called_strike", "hit_into_play").
    pub description: Option<String>,

    /// Terminal outcome label of the at-bat (e.g. "strikeout", "single").
    /// Present only on the last pitch of a concluded at-bat.
    pub events: Option<String>,

    /// Pitch call: "B" (ball), "S" (strike), or "X" (ball in play).
    #[serde(rename = "type")]
    pub pitch_call: Option<String>,

    /// Batter handedness for this pitch: "L" or "R".
    pub stand: Option<String>,

    /// Ball count before the pitch.
    pub balls: Option<i64>,

    /// Strike count before the pitch.
    pub strikes: Option<i64>,

    /// Exit velocity of the batted ball, in mph.
    pub launch_speed: Option<f64>,

    /// Launch angle of the batted ball, in degrees.
    pub launch_angle: Option<f64>,

    /// Projected hit distance, in feet.
    pub hit_distance_sc: Option<f64>,

    /// Hit landing coordinate (provider field units).
    pub hc_x: Option<f64>,

    /// Hit landing coordinate (provider field units).
    pub hc_y: Option<f64>,
}

impl PitchEvent {
    /// True when the batter put this pitch in play.
    pub fn is_in_play(&self) -> bool {
        self.pitch_call.as_deref() == Some("X")
    }

    /// True when the row carries everything needed to render a 3D
    /// trajectory: pitch type, release speed, release position, plate
    /// crossing, and strike-zone bounds.
    pub fn has_trajectory(&self) -> bool {
        self.pitch_type.is_some()
            && self.release_speed.is_some()
            && self.release_pos_x.is_some()
            && self.release_pos_y.is_some()
            && self.release_pos_z.is_some()
            && self.plate_x.is_some()
            && self.plate_z.is_some()
            && self.sz_top.is_some()
            && self.sz_bot.is_some()
    }

    /// The terminal outcome label, if this pitch concluded its at-bat.
    pub fn terminal_label(&self) -> Option<&str> {
        match self.events.as_deref() {
            Some("") | None => None,
            Some(label) => Some(label),
        }
    }
}
