//! Voice command matching against visible interactive elements.
//!
//! When voice navigation is enabled, a recognised transcript is matched
//! against the labels of the currently interactive elements. Matching is
//! two-pass: first the element whose label contains the phrase, then the
//! element whose label is a prefix of the phrase (so "open settings please"
//! still finds "open settings"). Document order breaks ties.

/// A visible interactive element a voice command may target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveElement {
    /// Accessible label, as presented to the user.
    pub label: String,
}

impl InteractiveElement {
    /// Build an element with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Normalise a transcript for matching: lowercase, alphanumerics and spaces
/// only, runs of whitespace collapsed.
pub fn normalise_transcript(raw: &str) -> String {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Find the element a spoken phrase targets, if any.
///
/// The transcript is normalised before matching and element labels are
/// normalised the same way. An empty phrase matches nothing.
pub fn match_command<'a>(
    transcript: &str,
    elements: &'a [InteractiveElement],
) -> Option<&'a InteractiveElement> {
    let phrase = normalise_transcript(transcript);
    if phrase.is_empty() {
        return None;
    }

    if let Some(element) = elements
        .iter()
        .find(|element| normalise_transcript(&element.label).contains(&phrase))
    {
        return Some(element);
    }

    elements.iter().find(|element| {
        let label = normalise_transcript(&element.label);
        !label.is_empty() && phrase.starts_with(&label)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn elements() -> Vec<InteractiveElement> {
        vec![
            InteractiveElement::new("Search jobs"),
            InteractiveElement::new("Open settings"),
            InteractiveElement::new("Log out"),
        ]
    }

    #[rstest]
    #[case::verbatim("open settings", "Open settings")]
    #[case::cased("OPEN SETTINGS", "Open settings")]
    #[case::punctuated("open, settings!", "Open settings")]
    #[case::partial("settings", "Open settings")]
    #[case::spaced("  log   out  ", "Log out")]
    fn matches_labels_containing_the_phrase(#[case] transcript: &str, #[case] expected: &str) {
        let elements = elements();
        let matched = match_command(transcript, &elements).expect("match found");
        assert_eq!(matched.label, expected);
    }

    #[rstest]
    fn trailing_words_fall_back_to_prefix_matching() {
        let elements = elements();
        let matched = match_command("open settings please", &elements).expect("match found");
        assert_eq!(matched.label, "Open settings");
    }

    #[rstest]
    fn first_element_in_document_order_wins() {
        let elements = vec![
            InteractiveElement::new("Save draft"),
            InteractiveElement::new("Save and publish"),
        ];
        let matched = match_command("save", &elements).expect("match found");
        assert_eq!(matched.label, "Save draft");
    }

    #[rstest]
    #[case::unknown("teleport home")]
    #[case::empty("")]
    #[case::punctuation_only("?!.")]
    fn no_match_yields_none(#[case] transcript: &str) {
        let elements = elements();
        assert!(match_command(transcript, &elements).is_none());
    }

    #[rstest]
    fn empty_labels_never_match() {
        let elements = vec![InteractiveElement::new(""), InteractiveElement::new("Help")];
        let matched = match_command("help me out", &elements).expect("match found");
        assert_eq!(matched.label, "Help");
    }

    #[rstest]
    #[case::plain("open settings", "open settings")]
    #[case::noisy("Open—Settings?!", "open settings")]
    #[case::digits("page 2", "page 2")]
    #[case::blank("   ", "")]
    fn normalisation_cases(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalise_transcript(raw), expected);
    }
}
