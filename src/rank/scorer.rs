use crate::encoder::{cosine_similarity, EncodeError, Encoder};
use crate::parser::Section;

/// The persona + job text every score in a run is measured against.
pub fn context_text(persona: &str, job: &str) -> String {
    format!("{}. {}", persona, job)
}

/// Embedding of the persona and job. Computed once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextVector(Vec<f32>);

impl ContextVector {
    pub fn encode(encoder: &dyn Encoder, persona: &str, job: &str) -> Result<Self, EncodeError> {
        encoder.encode(&context_text(persona, job)).map(ContextVector)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

/// Scores arbitrary text against one context vector. Nothing is cached:
/// every call embeds its text again.
#[derive(Clone, Copy)]
pub struct RelevanceScorer<'a> {
    encoder: &'a dyn Encoder,
    context: &'a ContextVector,
}

impl<'a> RelevanceScorer<'a> {
    pub fn new(encoder: &'a dyn Encoder, context: &'a ContextVector) -> Self {
        RelevanceScorer { encoder, context }
    }

    pub fn score(&self, text: &str) -> Result<f32, EncodeError> {
        let embedding = self.encoder.encode(text)?;
        Ok(cosine_similarity(self.context.as_slice(), &embedding))
    }
}

/// Attach a relevance score to every section, in place and in order.
pub fn score_sections(sections: &mut [Section], scorer: &RelevanceScorer) -> Result<(), EncodeError> {
    for section in sections.iter_mut() {
        section.relevance = Some(scorer.score(&section.scoring_text())?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::encoder::HashEncoder;

    /// Records every text it is asked to encode.
    #[derive(Default)]
    struct RecordingEncoder {
        seen: Mutex<Vec<String>>,
    }

    impl Encoder for RecordingEncoder {
        fn name(&self) -> &str {
            "recording"
        }

        fn encode(&self, text: &str) -> Result<Vec<f32>, EncodeError> {
            self.seen.lock().unwrap().push(text.to_string());
            Ok(vec![1.0, 0.0])
        }
    }

    struct FailingEncoder;

    impl Encoder for FailingEncoder {
        fn name(&self) -> &str {
            "failing"
        }

        fn encode(&self, _text: &str) -> Result<Vec<f32>, EncodeError> {
            Err(EncodeError::Embed("boom".to_string()))
        }
    }

    fn section(title: &str, body: &str) -> Section {
        Section {
            document: "guide.pdf".to_string(),
            page: 1,
            title: title.to_string(),
            body: body.to_string(),
            relevance: None,
        }
    }

    #[test]
    fn context_joins_persona_and_job() {
        assert_eq!(
            context_text("Travel Planner", "Plan a trip of 4 days"),
            "Travel Planner. Plan a trip of 4 days"
        );
    }

    #[test]
    fn sections_scored_on_title_and_body() {
        let encoder = RecordingEncoder::default();
        let context = ContextVector::encode(&encoder, "Chef", "Cook dinner").unwrap();
        let scorer = RelevanceScorer::new(&encoder, &context);
        let mut sections = vec![section("Knife Skills", "Use a pinch grip.")];
        score_sections(&mut sections, &scorer).unwrap();

        let seen = encoder.seen.lock().unwrap();
        assert_eq!(*seen, vec!["Chef. Cook dinner", "Knife Skills Use a pinch grip."]);
        assert_eq!(sections[0].relevance, Some(1.0));
    }

    #[test]
    fn no_caching_between_calls() {
        let encoder = RecordingEncoder::default();
        let context = ContextVector::encode(&encoder, "p", "j").unwrap();
        let scorer = RelevanceScorer::new(&encoder, &context);
        scorer.score("same text").unwrap();
        scorer.score("same text").unwrap();
        assert_eq!(encoder.seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn related_text_scores_higher() {
        let encoder = HashEncoder::default();
        let context =
            ContextVector::encode(&encoder, "HR professional", "Create fillable forms for onboarding")
                .unwrap();
        let scorer = RelevanceScorer::new(&encoder, &context);
        let related = scorer.score("Create fillable forms for employee onboarding").unwrap();
        let unrelated = scorer.score("Roast the peppers until the skin blisters").unwrap();
        assert!(related > unrelated);
        assert!((-1.0..=1.0).contains(&related));
    }

    #[test]
    fn encoder_failure_propagates() {
        let context = ContextVector(vec![1.0]);
        let scorer = RelevanceScorer::new(&FailingEncoder, &context);
        let mut sections = vec![section("Title Here", "body")];
        assert!(score_sections(&mut sections, &scorer).is_err());
        assert!(sections[0].relevance.is_none());
    }
}
