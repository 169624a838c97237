//! Entity-run segmentation.

use tracing::debug;

use crate::models::{EntityClass, EntityRun};
use crate::oracle::{EntityTagger, OracleError};

/// Splits `tokens` into alternating runs of entity and non-entity tokens.
///
/// The tagger is called once for the whole token list. Runs partition the
/// input exactly and keep query order. Empty input yields no runs and makes
/// no oracle call.
///
/// # Errors
///
/// Propagates tagger failures, and returns `OracleError::Misaligned` if the
/// tagger answers with a different number of tags than tokens.
pub fn segment_entity_runs(
    tokens: &[String],
    tagger: &dyn EntityTagger,
) -> Result<Vec<EntityRun>, OracleError> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let tagged = tagger.tag_entities(tokens)?;
    if tagged.len() != tokens.len() {
        return Err(OracleError::Misaligned {
            expected: tokens.len(),
            actual: tagged.len(),
        });
    }

    let runs = group_runs(tagged);
    debug!(tokens = tokens.len(), runs = runs.len(), "segmented entity runs");
    Ok(runs)
}

/// Groups already-tagged tokens into runs.
///
/// Walks the tokens with an "inside an entity run" flag that starts cleared;
/// a token whose class disagrees with the flag closes the current run and
/// flips the flag.
pub fn group_runs(tagged: Vec<(String, EntityClass)>) -> Vec<EntityRun> {
    let mut runs = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut in_entity = false;
    let mut start = 0;

    for (position, (token, class)) in tagged.into_iter().enumerate() {
        if class.is_entity() == in_entity {
            current.push(token);
            continue;
        }

        if !current.is_empty() {
            runs.push(EntityRun::new(std::mem::take(&mut current), run_class(in_entity), start));
        }
        current.push(token);
        start = position;
        in_entity = !in_entity;
    }

    if !current.is_empty() {
        runs.push(EntityRun::new(current, run_class(in_entity), start));
    }

    runs
}

fn run_class(in_entity: bool) -> EntityClass {
    if in_entity {
        EntityClass::Entity
    } else {
        EntityClass::NonEntity
    }
}
