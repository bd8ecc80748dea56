//! Filename-based document classification.
//!
//! Pure, case-insensitive substring predicates over two fixed keyword sets.
//! The predicates are independent: a filename can belong to both classes,
//! and callers filter a directory listing per class, not once.

use paddockdocs_shared::DocumentClass;

/// Keywords marking event-notes documents.
const EVENT_NOTES_KEYWORDS: &[&str] = &["pirelli", "event-notes", "eventnotes", "notes"];

/// Keywords marking infringement/decision documents.
const INFRINGEMENT_KEYWORDS: &[&str] = &["infringement", "decision", "summons", "offence"];

/// Whether a filename looks like an event-notes document.
pub fn is_event_notes(filename: &str) -> bool {
    matches_any(filename, EVENT_NOTES_KEYWORDS)
}

/// Whether a filename looks like an infringement/decision document.
pub fn is_infringements(filename: &str) -> bool {
    matches_any(filename, INFRINGEMENT_KEYWORDS)
}

/// The predicate for one document class.
pub fn matches_class(filename: &str, class: DocumentClass) -> bool {
    match class {
        DocumentClass::EventNotes => is_event_notes(filename),
        DocumentClass::Infringements => is_infringements(filename),
        DocumentClass::Unclassified => {
            !is_event_notes(filename) && !is_infringements(filename)
        }
    }
}

/// Every class a filename belongs to; `[Unclassified]` when none match.
pub fn classify(filename: &str) -> Vec<DocumentClass> {
    let mut classes = Vec::new();
    if is_event_notes(filename) {
        classes.push(DocumentClass::EventNotes);
    }
    if is_infringements(filename) {
        classes.push(DocumentClass::Infringements);
    }
    if classes.is_empty() {
        classes.push(DocumentClass::Unclassified);
    }
    classes
}

fn matches_any(filename: &str, keywords: &[&str]) -> bool {
    let lower = filename.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_notes_keywords_match() {
        assert!(is_event_notes("australian-grand-prix-event-notes.pdf"));
        assert!(is_event_notes("Pirelli_Preview_Bahrain.pdf"));
        assert!(is_event_notes("eventnotes-monza.pdf"));
        assert!(!is_event_notes("race-classification.pdf"));
    }

    #[test]
    fn infringement_keywords_match() {
        assert!(is_infringements("infringement-decision-1.pdf"));
        assert!(is_infringements("SUMMONS_car_44.pdf"));
        assert!(is_infringements("offence-car-16.pdf"));
        assert!(!is_infringements("pirelli-preview.pdf"));
    }

    #[test]
    fn classes_are_not_mutually_exclusive() {
        assert!(!is_infringements("australian-grand-prix-event-notes.pdf"));
        assert!(!is_event_notes("infringement-1.pdf"));

        // "decision-notes" trips both keyword sets
        let both = "stewards-decision-notes.pdf";
        assert!(is_event_notes(both));
        assert!(is_infringements(both));
        assert_eq!(
            classify(both),
            vec![DocumentClass::EventNotes, DocumentClass::Infringements]
        );
    }

    #[test]
    fn unmatched_is_unclassified() {
        assert_eq!(
            classify("race-start-times.pdf"),
            vec![DocumentClass::Unclassified]
        );
        assert!(matches_class("race-start-times.pdf", DocumentClass::Unclassified));
    }

    #[test]
    fn classification_is_pure() {
        let name = "bahrain_pirelli_notes.pdf";
        assert_eq!(classify(name), classify(name));
    }
}
