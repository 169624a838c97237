mod candidate_list;
mod chunk;
mod entity_run;
mod pos_tag;
mod search_budget;

pub use candidate_list::CandidateList;
pub use chunk::{Chunk, Chunking};
pub use entity_run::{EntityClass, EntityRun};
pub use pos_tag::PosTag;
pub use search_budget::SearchBudget;
