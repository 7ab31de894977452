use crate::services::error::EngineError;
use crate::store::LearnerDirectory;
use crate::types::Learner;

pub async fn ensure_learner_access(
    directory: &dyn LearnerDirectory,
    parent_id: &str,
    learner_id: &str,
) -> Result<Learner, EngineError> {
    let Some(learner) = directory.find_learner(learner_id).await? else {
        return Err(EngineError::NotFound("Profile not found".to_string()));
    };

    if learner.parent_id != parent_id {
        tracing::warn!(
            target: "security",
            parent_id,
            learner_id,
            "parent attempted to act on a profile it does not own"
        );
        return Err(EngineError::Forbidden(
            "You do not have access to this profile".to_string(),
        ));
    }

    Ok(learner)
}
