//! Adapter implementations for port traits.
//!
//! - `live`: real filesystem and `git` CLI.
//! - `recording`: wraps another adapter and captures interactions to a cassette.
//! - `replaying`: serves interactions back from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
