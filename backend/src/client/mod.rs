//! Client-side settings state, effect application, and voice matching.
//!
//! These modules model the browser-resident half of the subsystem: the
//! optimistic settings cache, the page-level effect applier, and the voice
//! command matcher. They speak to the server only through the domain ports,
//! so tests drive them against in-memory adapters.

pub mod effects;
pub mod state;
pub mod voice;

pub use effects::{
    apply, marker_for, target_markers, DocumentMarkers, GlobalMarker, PresentationSurface,
};
pub use state::{FlagSync, SettingsClientState};
pub use voice::{match_command, normalise_transcript, InteractiveElement};
