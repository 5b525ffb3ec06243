pub mod field;

use std::fmt;

use indexmap::IndexMap;

use crate::block::field::FieldValue;

/// Editor-assigned identifier of a block. Stable across edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        BlockId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        BlockId(s.to_string())
    }
}

/// Workspace coordinates of a block. Only top-level positions matter:
/// they decide the scan order of stray top blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Variable-arity state of an if / else-if / else block.
/// Stored on the block itself so regeneration depends on the graph alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mutation {
    pub else_if_count: usize,
    pub has_else: bool,
}

/// A node of the program graph.
///
/// Links to other blocks are ids into the owning [`Workspace`](crate::workspace::Workspace);
/// the block never owns its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// Selects the shape in the registry and the emission rule in the generator.
    pub type_id: String,
    pub fields: IndexMap<String, FieldValue>,
    /// Statement slot name -> first block of the chain plugged into it.
    pub statements: IndexMap<String, BlockId>,
    /// Value slot name -> the single value block plugged into it.
    pub values: IndexMap<String, BlockId>,
    /// The following block in this block's own chain.
    pub next: Option<BlockId>,
    pub mutation: Mutation,
    /// Disabled blocks emit nothing; their `next` chain still renders.
    pub enabled: bool,
    pub position: Position,
}

impl Block {
    pub fn new(id: impl Into<BlockId>, type_id: impl Into<String>) -> Self {
        Block {
            id: id.into(),
            type_id: type_id.into(),
            fields: IndexMap::new(),
            statements: IndexMap::new(),
            values: IndexMap::new(),
            next: None,
            mutation: Mutation::default(),
            enabled: true,
            position: Position::default(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_mutation(mut self, else_if_count: usize, has_else: bool) -> Self {
        self.mutation = Mutation {
            else_if_count,
            has_else,
        };
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn statement(&self, slot: &str) -> Option<&BlockId> {
        self.statements.get(slot)
    }

    pub fn value(&self, slot: &str) -> Option<&BlockId> {
        self.values.get(slot)
    }

    /// Every id this block links to: statement chains, value inputs, then `next`.
    pub fn children(&self) -> impl Iterator<Item = &BlockId> {
        self.statements
            .values()
            .chain(self.values.values())
            .chain(self.next.iter())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        BlockId(s)
    }
}
