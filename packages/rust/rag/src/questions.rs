//! Fixed question batteries per document class.
//!
//! The battery order is semantically meaningful: answers are reported in
//! exactly this order.

use paddockdocs_shared::DocumentClass;

/// An ordered question list plus an optional domain context string shared
/// by every question in the battery.
#[derive(Debug, Clone, Copy)]
pub struct QuestionBattery {
    pub questions: &'static [&'static str],
    pub shared_context: Option<&'static str>,
}

/// Battery for event-notes documents.
pub const EVENT_NOTES: QuestionBattery = QuestionBattery {
    questions: &[
        "What is the Grand Prix the document refers to?",
        "What is the publication date of each of the documents?",
        "What are the compounds selected for the GP?",
        "What are the mandatory race tyres and the Q3 tyre?",
        "What are the minimum starting pressures for front and rear on each type?",
        "What are the camber limits for front and rear?",
    ],
    shared_context: Some(
        "Tyre compounds include intermediate, wet and slicks which are named by compound, \
         C1, C2 ... compounds do not start with Q",
    ),
};

/// Battery for infringement documents.
pub const INFRINGEMENTS: QuestionBattery = QuestionBattery {
    questions: &[
        "Which drivers and cars had received a penalty or fine decision? \
         Check Infringement, Summons and Decisions documents",
        "Which drivers/cars had received no further action?",
        "What penalties are meant to be served at the next race?",
    ],
    shared_context: None,
};

/// The battery for a document class, if one exists.
pub fn battery_for(class: DocumentClass) -> Option<&'static QuestionBattery> {
    match class {
        DocumentClass::EventNotes => Some(&EVENT_NOTES),
        DocumentClass::Infringements => Some(&INFRINGEMENTS),
        DocumentClass::Unclassified => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battery_sizes_and_context() {
        assert_eq!(EVENT_NOTES.questions.len(), 6);
        assert!(EVENT_NOTES.shared_context.is_some());

        assert_eq!(INFRINGEMENTS.questions.len(), 3);
        assert!(INFRINGEMENTS.shared_context.is_none());
    }

    #[test]
    fn battery_lookup_by_class() {
        assert_eq!(
            battery_for(DocumentClass::EventNotes).unwrap().questions.len(),
            6
        );
        assert_eq!(
            battery_for(DocumentClass::Infringements)
                .unwrap()
                .questions
                .len(),
            3
        );
        assert!(battery_for(DocumentClass::Unclassified).is_none());
    }
}
