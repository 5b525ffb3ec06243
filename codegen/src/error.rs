use blocks::BlockId;
use thiserror::Error;

/// A fault that aborts a generation pass. Missing connections are not
/// faults: they render their slot's default literal instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("block '{block}' has unknown type '{type_id}'")]
    UnknownType { block: BlockId, type_id: String },

    #[error("block '{block}' of type '{type_id}' has no code generator")]
    MissingRule { block: BlockId, type_id: String },

    #[error("block '{block}' field {field}: {reason}")]
    MalformedField {
        block: BlockId,
        field: String,
        reason: String,
    },

    #[error("block '{block}' is reachable from itself")]
    CyclicGraph { block: BlockId },

    #[error("block '{block}' is connected to more than one parent")]
    SharedBlock { block: BlockId },

    #[error("link to missing block '{id}'")]
    MissingBlock { id: BlockId },

    #[error("block '{block}' is not a {expected} block")]
    ShapeMismatch {
        block: BlockId,
        expected: &'static str,
    },
}

impl GenerationError {
    /// The block the fault is about.
    pub fn block(&self) -> &BlockId {
        match self {
            GenerationError::UnknownType { block, .. }
            | GenerationError::MissingRule { block, .. }
            | GenerationError::MalformedField { block, .. }
            | GenerationError::CyclicGraph { block }
            | GenerationError::SharedBlock { block }
            | GenerationError::ShapeMismatch { block, .. } => block,
            GenerationError::MissingBlock { id } => id,
        }
    }
}
