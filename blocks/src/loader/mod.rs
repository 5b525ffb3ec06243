//! Reads a workspace from the block editor's JSON serialization.
//!
//! ```json
//! { "blocks": { "languageVersion": 0, "blocks": [
//!     { "type": "arduino_loop", "id": "L", "x": 20, "y": 120,
//!       "inputs": { "LOOP": { "block": {
//!         "type": "arduino_digitalWrite", "fields": { "PIN": 13, "STATE": "HIGH" },
//!         "next": { "block": { "type": "arduino_delay", "fields": { "DELAY": 500 } } }
//!       } } } }
//! ] } }
//! ```
//!
//! Nested blocks are flattened into the [`Workspace`] arena. Shapes are
//! checked against the registry where the type is known; unknown types load
//! fine and fail later, at generation.

pub mod error;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::block::field::FieldValue;
use crate::block::{Block, BlockId, Mutation, Position};
use crate::registry::{BlockShape, Registry};
use crate::workspace::Workspace;

pub use error::LoadError;

#[derive(Debug, Deserialize)]
struct SerializedWorkspace {
    #[serde(default)]
    blocks: Option<SerializedBlocks>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerializedBlocks {
    #[serde(default)]
    blocks: Vec<SerializedBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerializedBlock {
    #[serde(rename = "type")]
    type_id: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    #[serde(default)]
    fields: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    inputs: IndexMap<String, SerializedConnection>,
    #[serde(default)]
    next: Option<SerializedConnection>,
    #[serde(default)]
    extra_state: Option<ExtraState>,
}

fn enabled_by_default() -> bool {
    true
}

/// What is plugged into a connection. A real block wins over a shadow.
#[derive(Debug, Deserialize)]
struct SerializedConnection {
    #[serde(default)]
    block: Option<Box<SerializedBlock>>,
    #[serde(default)]
    shadow: Option<Box<SerializedBlock>>,
}

impl SerializedConnection {
    fn into_block(self) -> Option<SerializedBlock> {
        self.block.or(self.shadow).map(|b| *b)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtraState {
    #[serde(default)]
    else_if_count: usize,
    #[serde(default)]
    has_else: bool,
}

/// Where a serialized block is being attached.
#[derive(Debug, Clone, Copy)]
enum Placement<'a> {
    TopLevel,
    Next { parent: &'a BlockId },
    Statement { parent: &'a BlockId, slot: &'a str },
    Value { parent: &'a BlockId, slot: &'a str },
}

/// Parse a serialized workspace. Reports every structural problem found,
/// not just the first.
pub fn load_workspace(
    source: &str,
    file_id: usize,
    registry: &Registry,
) -> Result<Workspace, Vec<LoadError>> {
    let document = parse_document(source).map_err(|e| {
        let start = error::offset_of(source, e.line(), e.column());
        let end = (start + 1).min(source.len());
        vec![LoadError::at(format!("invalid workspace JSON: {}", e), start..end, file_id)]
    })?;

    let mut flattener = Flattener {
        registry,
        file_id,
        workspace: Workspace::new(),
        errors: Vec::new(),
        generated: 0,
    };

    let top_blocks = document.blocks.map(|b| b.blocks).unwrap_or_default();
    for block in top_blocks {
        flattener.flatten(block, Placement::TopLevel);
    }

    if flattener.errors.is_empty() {
        tracing::debug!(blocks = flattener.workspace.len(), "loaded workspace");
        Ok(flattener.workspace)
    } else {
        Err(flattener.errors)
    }
}

/// Every `next` link nests the following block two objects deeper, so a
/// long chain goes far past serde_json's default depth limit. The limit is
/// lifted and the stack grows on demand instead.
fn parse_document(source: &str) -> Result<SerializedWorkspace, serde_json::Error> {
    let mut json = serde_json::Deserializer::from_str(source);
    json.disable_recursion_limit();
    let document = SerializedWorkspace::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(document)
}

struct Flattener<'r> {
    registry: &'r Registry,
    file_id: usize,
    workspace: Workspace,
    errors: Vec<LoadError>,
    generated: usize,
}

impl Flattener<'_> {
    fn fail(&mut self, message: String, block: &BlockId) {
        self.errors.push(
            LoadError::error(message, self.file_id).with_note(format!("in block '{}'", block)),
        );
    }

    fn next_id(&mut self) -> BlockId {
        self.generated += 1;
        BlockId(format!("b{}", self.generated))
    }

    /// Insert `serialized`, everything nested under it and the chain that
    /// follows it. Returns the id when the block itself was accepted.
    fn flatten(&mut self, serialized: SerializedBlock, placement: Placement<'_>) -> Option<BlockId> {
        let (head, mut pending) = self.place(serialized, placement)?;
        let mut parent = head.clone();
        while let Some(child) = pending {
            let placement = Placement::Next { parent: &parent };
            let Some((child_id, following)) = self.place(child, placement) else {
                break;
            };
            self.link(&parent, placement, child_id.clone());
            parent = child_id;
            pending = following;
        }
        Some(head)
    }

    /// Insert one block and its inputs. Hands back the block chained after
    /// it, if any, for the caller to place.
    fn place(
        &mut self,
        serialized: SerializedBlock,
        placement: Placement<'_>,
    ) -> Option<(BlockId, Option<SerializedBlock>)> {
        let id = match serialized.id.clone() {
            Some(id) => BlockId(id),
            None => self.next_id(),
        };
        let registry = self.registry;
        let shape = registry.get(&serialized.type_id);

        if let Some(shape) = shape {
            if let Some(reason) = misplacement(shape, placement) {
                self.fail(format!("'{}' {}", serialized.type_id, reason), &id);
                return None;
            }
        }

        let mut block = Block::new(id.clone(), serialized.type_id.clone());
        block.position = Position {
            x: serialized.x,
            y: serialized.y,
        };
        block.enabled = serialized.enabled;
        if let Some(extra) = &serialized.extra_state {
            block.mutation = Mutation {
                else_if_count: extra.else_if_count,
                has_else: extra.has_else,
            };
        }
        for (name, value) in &serialized.fields {
            match field_value(value) {
                Some(value) => {
                    block.fields.insert(name.clone(), value);
                }
                None => self.fail(
                    format!("field {} has unsupported value {}", name, value),
                    &id,
                ),
            }
        }
        let mutation = block.mutation;

        if let Err(e) = self.workspace.insert(block) {
            self.fail(e.to_string(), &id);
            return None;
        }

        for (slot, connection) in serialized.inputs {
            let Some(child) = connection.into_block() else {
                continue;
            };
            let as_value = match shape {
                Some(shape) if shape.accepts_value_slot(&slot, &mutation) => true,
                Some(shape) if shape.accepts_statement_slot(&slot, &mutation) => false,
                Some(_) => {
                    self.fail(
                        format!("'{}' has no input named {}", serialized.type_id, slot),
                        &id,
                    );
                    continue;
                }
                // Unknown parent type: trust the child's own shape.
                None => registry
                    .get(&child.type_id)
                    .is_some_and(BlockShape::is_value),
            };
            let placement = if as_value {
                Placement::Value {
                    parent: &id,
                    slot: &slot,
                }
            } else {
                Placement::Statement {
                    parent: &id,
                    slot: &slot,
                }
            };
            if let Some(child_id) = self.flatten(child, placement) {
                self.link(&id, placement, child_id);
            }
        }

        let mut next = serialized.next.and_then(SerializedConnection::into_block);
        if next.is_some() && shape.is_some_and(|s| !s.is_chainable()) {
            self.fail(
                format!("'{}' cannot be followed by another block", serialized.type_id),
                &id,
            );
            next = None;
        }

        Some((id, next))
    }

    fn link(&mut self, parent: &BlockId, placement: Placement<'_>, child: BlockId) {
        let Ok(block) = self.workspace.block_mut(parent) else {
            return;
        };
        match placement {
            Placement::TopLevel => {}
            Placement::Next { .. } => block.next = Some(child),
            Placement::Statement { slot, .. } => {
                block.statements.insert(slot.to_string(), child);
            }
            Placement::Value { slot, .. } => {
                block.values.insert(slot.to_string(), child);
            }
        }
    }
}

/// Why `shape` cannot sit at `placement`, if it cannot.
fn misplacement(shape: &BlockShape, placement: Placement<'_>) -> Option<String> {
    match placement {
        Placement::TopLevel => None,
        _ if shape.is_entry() => Some("is a program entry and must stay top-level".to_string()),
        Placement::Next { parent } if shape.is_value() => {
            Some(format!("is a value block and cannot follow '{}'", parent))
        }
        Placement::Statement { parent, slot } if shape.is_value() => Some(format!(
            "is a value block and cannot go in statement input {} of '{}'",
            slot, parent
        )),
        Placement::Value { parent, slot } if shape.is_statement() => Some(format!(
            "is a statement block and cannot go in value input {} of '{}'",
            slot, parent
        )),
        _ => None,
    }
}

fn field_value(value: &serde_json::Value) -> Option<FieldValue> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().map(FieldValue::Number),
        serde_json::Value::String(s) => Some(FieldValue::Text(s.clone())),
        serde_json::Value::Bool(b) => Some(FieldValue::Text(b.to_string())),
        _ => None,
    }
}
