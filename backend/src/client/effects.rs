//! Global effect application for accessibility flags.
//!
//! Each flag maps to exactly one page-level marker (a root class or a data
//! attribute). Application is a set difference against the markers currently
//! present, so re-applying the same flags touches nothing and turning a flag
//! off removes precisely what turning it on added.

use std::collections::BTreeSet;

use crate::domain::{AccessibilityFlags, FlagName};

/// A page-level presentation marker controlled by one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GlobalMarker {
    /// A class on the document root.
    Class(&'static str),
    /// A data attribute on the document root.
    Attribute(&'static str),
}

/// The marker a flag controls when enabled.
pub fn marker_for(flag: FlagName) -> GlobalMarker {
    match flag {
        FlagName::VoiceNavigation => GlobalMarker::Attribute("data-voice-nav"),
        FlagName::ScreenReader => GlobalMarker::Attribute("data-screen-reader-hints"),
        FlagName::HighContrast => GlobalMarker::Class("high-contrast"),
        FlagName::LargeText => GlobalMarker::Class("large-text"),
        FlagName::KeyboardNav => GlobalMarker::Class("keyboard-nav-outlines"),
    }
}

/// The complete marker set a flag state calls for.
pub fn target_markers(flags: &AccessibilityFlags) -> BTreeSet<GlobalMarker> {
    flags
        .iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(flag, _)| marker_for(flag))
        .collect()
}

/// Mutable view of the presentation root the markers land on.
pub trait PresentationSurface {
    /// Whether the marker is currently present.
    fn contains(&self, marker: GlobalMarker) -> bool;

    /// Add the marker. Adding a present marker is a no-op.
    fn add(&mut self, marker: GlobalMarker);

    /// Remove the marker. Removing an absent marker is a no-op.
    fn remove(&mut self, marker: GlobalMarker);
}

/// Reconcile the surface with the given flag state.
///
/// Only the differences are touched: markers the flags call for but the
/// surface lacks are added, markers present but no longer called for are
/// removed. Markers outside this module's vocabulary are left alone.
pub fn apply(flags: &AccessibilityFlags, surface: &mut dyn PresentationSurface) {
    let target = target_markers(flags);

    for flag in FlagName::ALL {
        let marker = marker_for(flag);
        let wanted = target.contains(&marker);
        let present = surface.contains(marker);

        if wanted && !present {
            surface.add(marker);
        } else if !wanted && present {
            surface.remove(marker);
        }
    }
}

/// In-memory presentation surface tracking the applied marker set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocumentMarkers {
    markers: BTreeSet<GlobalMarker>,
}

impl DocumentMarkers {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// The markers currently applied.
    pub fn markers(&self) -> &BTreeSet<GlobalMarker> {
        &self.markers
    }
}

impl PresentationSurface for DocumentMarkers {
    fn contains(&self, marker: GlobalMarker) -> bool {
        self.markers.contains(&marker)
    }

    fn add(&mut self, marker: GlobalMarker) {
        self.markers.insert(marker);
    }

    fn remove(&mut self, marker: GlobalMarker) {
        self.markers.remove(&marker);
    }
}
