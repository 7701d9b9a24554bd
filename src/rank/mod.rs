// Select/refine stages run after segmentation:
// score sections → rank documents → pick 2/2/1 sections → rank their paragraphs.

pub mod documents;
pub mod scorer;
pub mod selector;
pub mod subsections;

pub use documents::{rank_documents, DocumentSections, RankedDocument};
pub use scorer::{score_sections, ContextVector, RelevanceScorer};
pub use selector::{select_sections, SelectedSection};
pub use subsections::{extract_subsections, Subsection};
