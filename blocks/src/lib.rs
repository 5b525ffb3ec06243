pub mod block;
pub mod loader;
pub mod registry;
pub mod reserved;
pub mod workspace;

pub use block::field::FieldValue;
pub use block::{Block, BlockId, Mutation, Position};
pub use loader::{LoadError, load_workspace};
pub use registry::{BlockShape, FieldKind, FieldSpec, Output, Registry};
pub use reserved::{IdentifierError, ReservedWords};
pub use workspace::{IdentifierWarning, Workspace, WorkspaceError};
