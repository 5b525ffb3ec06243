pub mod definitions;
pub mod driver;
pub mod error;
pub mod generator;
pub mod precedence;
pub mod request;
pub mod rules;

pub use definitions::Definitions;
pub use driver::{CodeSink, Driver, Published};
pub use error::GenerationError;
pub use generator::{Generator, Rendered, generate};
pub use precedence::Order;
pub use request::{Board, CompileRequest, CompileResponse};
pub use rules::{Rule, RuleTable};
