use crate::types::DbId;

/// Domain errors shared by every layer.
///
/// The API crate maps each variant to an HTTP status; repositories return
/// plain `sqlx::Error` and never construct these.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced row (mission, user, progress row) does not exist.
    /// Mascots never produce this: they are created on first access.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A concurrent write lost a race and the single retry also failed.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = CoreError::NotFound {
            entity: "Mission",
            id: 7,
        };
        assert_eq!(err.to_string(), "Entity not found: Mission with id 7");
    }
}
