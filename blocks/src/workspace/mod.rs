use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::block::field::FieldValue;
use crate::block::{Block, BlockId, Mutation};
use crate::registry::Registry;
use crate::reserved::{IdentifierError, ReservedWords};

/// Angle (degrees) of the line along which top-level blocks are scanned.
const SCAN_ANGLE: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    DuplicateId(BlockId),
    NoSuchBlock(BlockId),
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceError::DuplicateId(id) => write!(f, "duplicate block id '{}'", id),
            WorkspaceError::NoSuchBlock(id) => write!(f, "no block with id '{}'", id),
        }
    }
}

impl std::error::Error for WorkspaceError {}

/// An identifier field whose value the reserved-word guard rejects.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierWarning {
    pub block: BlockId,
    pub field: String,
    pub error: IdentifierError,
}

impl fmt::Display for IdentifierWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block '{}' field {}: {}", self.block, self.field, self.error)
    }
}

/// Arena of every block on the editor surface, in insertion order.
///
/// The workspace is the graph the editor mutates; generation only reads it.
/// Mutations check that the blocks they name exist, nothing more: shape
/// and tree checks happen at load and generation time.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    blocks: IndexMap<BlockId, Block>,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace::default()
    }

    pub fn insert(&mut self, block: Block) -> Result<BlockId, WorkspaceError> {
        if self.blocks.contains_key(&block.id) {
            return Err(WorkspaceError::DuplicateId(block.id));
        }
        let id = block.id.clone();
        self.blocks.insert(id.clone(), block);
        Ok(id)
    }

    /// Remove a block and detach every link that pointed at it.
    /// Its own children stay in the workspace as new top-level blocks.
    pub fn remove(&mut self, id: &BlockId) -> Result<Block, WorkspaceError> {
        let removed = self
            .blocks
            .shift_remove(id)
            .ok_or_else(|| WorkspaceError::NoSuchBlock(id.clone()))?;
        for block in self.blocks.values_mut() {
            block.statements.retain(|_, child| child != id);
            block.values.retain(|_, child| child != id);
            if block.next.as_ref() == Some(id) {
                block.next = None;
            }
        }
        Ok(removed)
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.blocks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    pub(crate) fn block_mut(&mut self, id: &BlockId) -> Result<&mut Block, WorkspaceError> {
        self.blocks
            .get_mut(id)
            .ok_or_else(|| WorkspaceError::NoSuchBlock(id.clone()))
    }

    fn require(&self, id: &BlockId) -> Result<(), WorkspaceError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(WorkspaceError::NoSuchBlock(id.clone()))
        }
    }

    pub fn set_field(
        &mut self,
        id: &BlockId,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), WorkspaceError> {
        self.block_mut(id)?
            .fields
            .insert(name.to_string(), value.into());
        Ok(())
    }

    pub fn set_mutation(&mut self, id: &BlockId, mutation: Mutation) -> Result<(), WorkspaceError> {
        self.block_mut(id)?.mutation = mutation;
        Ok(())
    }

    pub fn set_enabled(&mut self, id: &BlockId, enabled: bool) -> Result<(), WorkspaceError> {
        self.block_mut(id)?.enabled = enabled;
        Ok(())
    }

    /// Link `child` as the block following `parent`. Returns the previous follower.
    pub fn connect_next(
        &mut self,
        parent: &BlockId,
        child: &BlockId,
    ) -> Result<Option<BlockId>, WorkspaceError> {
        self.require(child)?;
        Ok(self.block_mut(parent)?.next.replace(child.clone()))
    }

    pub fn connect_statement(
        &mut self,
        parent: &BlockId,
        slot: &str,
        child: &BlockId,
    ) -> Result<Option<BlockId>, WorkspaceError> {
        self.require(child)?;
        Ok(self
            .block_mut(parent)?
            .statements
            .insert(slot.to_string(), child.clone()))
    }

    pub fn connect_value(
        &mut self,
        parent: &BlockId,
        slot: &str,
        child: &BlockId,
    ) -> Result<Option<BlockId>, WorkspaceError> {
        self.require(child)?;
        Ok(self
            .block_mut(parent)?
            .values
            .insert(slot.to_string(), child.clone()))
    }

    pub fn disconnect_next(&mut self, parent: &BlockId) -> Result<Option<BlockId>, WorkspaceError> {
        Ok(self.block_mut(parent)?.next.take())
    }

    pub fn disconnect_statement(
        &mut self,
        parent: &BlockId,
        slot: &str,
    ) -> Result<Option<BlockId>, WorkspaceError> {
        Ok(self.block_mut(parent)?.statements.shift_remove(slot))
    }

    pub fn disconnect_value(
        &mut self,
        parent: &BlockId,
        slot: &str,
    ) -> Result<Option<BlockId>, WorkspaceError> {
        Ok(self.block_mut(parent)?.values.shift_remove(slot))
    }

    /// Blocks no other block links to, in scan order: top to bottom along a
    /// line tilted slightly so that blocks further right come later.
    pub fn top_blocks(&self) -> Vec<&Block> {
        let linked: HashSet<&BlockId> = self.blocks.values().flat_map(|b| b.children()).collect();
        let offset = SCAN_ANGLE.to_radians().sin();
        let mut tops: Vec<&Block> = self
            .blocks
            .values()
            .filter(|b| !linked.contains(&b.id))
            .collect();
        tops.sort_by(|a, b| {
            let ka = a.position.y + offset * a.position.x;
            let kb = b.position.y + offset * b.position.x;
            ka.total_cmp(&kb)
        });
        tops
    }

    /// The root order a generation pass uses: program entry blocks by rank
    /// (setup before loop), then every other top block in scan order.
    pub fn program_roots(&self, registry: &Registry) -> Vec<BlockId> {
        let mut roots: Vec<(u16, &Block)> = self
            .top_blocks()
            .into_iter()
            .map(|block| {
                let rank = registry
                    .get(&block.type_id)
                    .and_then(|shape| shape.entry_rank)
                    .map(u16::from)
                    .unwrap_or(u16::MAX);
                (rank, block)
            })
            .collect();
        roots.sort_by_key(|(rank, _)| *rank);
        roots.into_iter().map(|(_, block)| block.id.clone()).collect()
    }

    /// Identifier fields holding a reserved word or a malformed name.
    pub fn identifier_warnings(
        &self,
        registry: &Registry,
        reserved: &ReservedWords,
    ) -> Vec<IdentifierWarning> {
        let mut warnings = Vec::new();
        for block in self.blocks.values() {
            let Some(shape) = registry.get(&block.type_id) else {
                continue;
            };
            for spec in shape.fields.iter().filter(|spec| spec.identifier) {
                let value = block.field(&spec.name).unwrap_or(&spec.default);
                let name = value.to_string();
                if let Err(error) = reserved.check_identifier(&name) {
                    warnings.push(IdentifierWarning {
                        block: block.id.clone(),
                        field: spec.name.clone(),
                        error,
                    });
                }
            }
        }
        warnings
    }
}
