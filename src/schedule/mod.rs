//! Time-based scheduling decisions: blackout windows, duration parsing, and
//! hour-indexed list rotation.

mod blackout;
mod duration;
mod rotation;

pub use blackout::{BlackoutWindow, Recurrence, is_blacked_out};
pub use duration::{ParsedDuration, parse_duration};
pub use rotation::{movie_rotation, show_selection};
