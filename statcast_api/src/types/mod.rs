mod pitch;
pub use self::pitch::PitchEvent;
