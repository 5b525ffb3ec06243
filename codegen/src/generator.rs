use std::collections::HashSet;
use std::sync::LazyLock;

use blocks::block::field::format_number;
use blocks::{Block, BlockId, BlockShape, FieldKind, FieldValue, Registry, Workspace};
use regex::Regex;

use crate::definitions::Definitions;
use crate::error::GenerationError;
use crate::precedence::Order;
use crate::rules::RuleTable;

pub type Result<T> = std::result::Result<T, GenerationError>;

/// Indent applied to every line of a statement slot's chain.
pub const INDENT: &str = "  ";

/// Output of a single block's rule, before its `next` chain is appended.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Statement(String),
    Value(String, Order),
}

impl Rendered {
    pub fn atomic(code: impl Into<String>) -> Self {
        Rendered::Value(code.into(), Order::ATOMIC)
    }
}

/// Per-pass generation context.
///
/// Holds the definition accumulator and the walk guards. A new generator
/// is built for every pass, so nothing carries over between passes.
pub struct Generator<'a> {
    registry: &'a Registry,
    rules: &'a RuleTable,
    workspace: &'a Workspace,
    definitions: Definitions,
    /// Blocks whose rendering is in progress.
    on_path: HashSet<BlockId>,
    /// Blocks rendered so far in this pass.
    visited: HashSet<BlockId>,
}

impl<'a> Generator<'a> {
    pub fn new(registry: &'a Registry, rules: &'a RuleTable, workspace: &'a Workspace) -> Self {
        Generator {
            registry,
            rules,
            workspace,
            definitions: Definitions::new(),
            on_path: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    /// Render `roots` in order into one program text.
    pub fn generate(mut self, roots: &[BlockId]) -> Result<String> {
        tracing::debug!(roots = roots.len(), "generation pass started");

        let mut lines = Vec::new();
        for root in roots {
            let code = self.root_to_code(root)?;
            if !code.is_empty() {
                lines.push(code);
            }
        }

        // Only the body is tidied; definitions go in front afterwards.
        let body = tidy(&lines.join("\n"));
        let text = if self.definitions.is_empty() {
            body
        } else {
            format!("{}\n\n{}", self.definitions.joined(), body)
        };

        tracing::debug!(
            definitions = self.definitions.len(),
            blocks = self.visited.len(),
            "generation pass finished"
        );
        Ok(text)
    }

    fn root_to_code(&mut self, id: &BlockId) -> Result<String> {
        let block = self.lookup(id)?;
        if block.enabled && self.shape(block)?.is_value() {
            // A loose expression renders as its bare text.
            return Ok(self
                .expression(id)?
                .map(|(code, _)| code)
                .unwrap_or_default());
        }
        self.render_chain(id, true)
    }

    /// Render a statement chain starting at `first`, following `next` links.
    /// The chain sits inside another block, so program entries are refused.
    pub fn chain_to_code(&mut self, first: &BlockId) -> Result<String> {
        self.render_chain(first, false)
    }

    fn render_chain(&mut self, first: &BlockId, top_level: bool) -> Result<String> {
        let mut code = String::new();
        let mut chain = Vec::new();
        let mut cursor = Some(first.clone());

        while let Some(id) = cursor {
            let block = self.enter(&id)?;
            let may_be_entry = top_level && chain.is_empty();
            chain.push(id);

            if block.enabled {
                let shape = self.shape(block)?;
                if !shape.is_statement() {
                    return Err(GenerationError::ShapeMismatch {
                        block: block.id.clone(),
                        expected: "statement",
                    });
                }
                if !may_be_entry && !shape.is_chainable() {
                    return Err(GenerationError::ShapeMismatch {
                        block: block.id.clone(),
                        expected: "nestable",
                    });
                }
                match self.apply(block)? {
                    Rendered::Statement(text) => code.push_str(&text),
                    Rendered::Value(..) => {
                        return Err(GenerationError::ShapeMismatch {
                            block: block.id.clone(),
                            expected: "statement",
                        });
                    }
                }
            } else {
                tracing::trace!(block = %block.id, "skipping disabled block");
            }
            cursor = block.next.clone();
        }

        for id in &chain {
            self.on_path.remove(id);
        }
        Ok(code)
    }

    /// Render the chain plugged into a statement slot, indented.
    /// An empty slot renders as nothing.
    pub fn statement_to_code(&mut self, block: &Block, slot: &str) -> Result<String> {
        let Some(first) = block.statement(slot) else {
            return Ok(String::new());
        };
        let code = self.chain_to_code(first)?;
        if code.is_empty() {
            Ok(code)
        } else {
            Ok(prefix_lines(&code, INDENT))
        }
    }

    /// Render the expression plugged into a value slot for a context that
    /// requires `outer`. `None` when the slot is empty or renders nothing.
    pub fn value_to_code(
        &mut self,
        block: &Block,
        slot: &str,
        outer: Order,
    ) -> Result<Option<String>> {
        let Some(child) = block.value(slot) else {
            return Ok(None);
        };
        Ok(self
            .expression(child)?
            .map(|(code, inner)| outer.wrap(code, inner)))
    }

    /// Like [`value_to_code`](Self::value_to_code), falling back to the
    /// slot's declared default literal.
    pub fn value_or_default(&mut self, block: &Block, slot: &str, outer: Order) -> Result<String> {
        if let Some(code) = self.value_to_code(block, slot, outer)? {
            return Ok(code);
        }
        let shape = self.shape(block)?;
        Ok(shape.value_default(slot).unwrap_or_default().to_string())
    }

    /// Field text as it appears in generated code, validated against the
    /// field's declared kind. Absent fields take their declared default.
    pub fn field(&self, block: &Block, name: &str) -> Result<String> {
        let malformed = |reason: String| GenerationError::MalformedField {
            block: block.id.clone(),
            field: name.to_string(),
            reason,
        };

        let shape = self.shape(block)?;
        let Some(spec) = shape.field_spec(name) else {
            return Err(malformed("not declared by the block type".to_string()));
        };
        let value = block.field(name).unwrap_or(&spec.default);

        match &spec.kind {
            FieldKind::Number { min } => {
                let n = value
                    .as_number()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| malformed(format!("'{}' is not a number", value)))?;
                if let Some(min) = min {
                    if n < *min {
                        return Err(malformed(format!(
                            "{} is below the minimum {}",
                            format_number(n),
                            format_number(*min)
                        )));
                    }
                }
                Ok(format_number(n))
            }
            FieldKind::Text => Ok(value.to_string()),
            FieldKind::Enum { options } => match value {
                FieldValue::Text(text) if options.iter().any(|(_, v)| v == text) => {
                    Ok(text.clone())
                }
                _ => Err(malformed(format!("'{}' is not one of the choices", value))),
            },
        }
    }

    /// Hoist a keyed declaration to the top of the output.
    pub fn define(&mut self, key: &str, text: impl Into<String>) {
        self.definitions.define(key, text);
    }

    fn expression(&mut self, id: &BlockId) -> Result<Option<(String, Order)>> {
        let block = self.enter(id)?;
        let result = if block.enabled {
            if !self.shape(block)?.is_value() {
                return Err(GenerationError::ShapeMismatch {
                    block: block.id.clone(),
                    expected: "value",
                });
            }
            match self.apply(block)? {
                Rendered::Value(code, order) if !code.is_empty() => Some((code, order)),
                Rendered::Value(..) => None,
                Rendered::Statement(_) => {
                    return Err(GenerationError::ShapeMismatch {
                        block: block.id.clone(),
                        expected: "value",
                    });
                }
            }
        } else {
            None
        };
        self.on_path.remove(id);
        Ok(result)
    }

    fn apply(&mut self, block: &'a Block) -> Result<Rendered> {
        let rule = self
            .rules
            .get(&block.type_id)
            .ok_or_else(|| GenerationError::MissingRule {
                block: block.id.clone(),
                type_id: block.type_id.clone(),
            })?;
        tracing::trace!(block = %block.id, type_id = %block.type_id, "rendering");
        rule(self, block)
    }

    /// Mark `id` as being rendered. Fails on a cycle back into the current
    /// path or on a block already rendered through another parent.
    fn enter(&mut self, id: &BlockId) -> Result<&'a Block> {
        if self.on_path.contains(id) {
            return Err(GenerationError::CyclicGraph { block: id.clone() });
        }
        if !self.visited.insert(id.clone()) {
            return Err(GenerationError::SharedBlock { block: id.clone() });
        }
        let block = self.lookup(id)?;
        self.on_path.insert(id.clone());
        Ok(block)
    }

    fn lookup(&self, id: &BlockId) -> Result<&'a Block> {
        self.workspace
            .get(id)
            .ok_or_else(|| GenerationError::MissingBlock { id: id.clone() })
    }

    fn shape(&self, block: &Block) -> Result<&'a BlockShape> {
        self.registry
            .get(&block.type_id)
            .ok_or_else(|| GenerationError::UnknownType {
                block: block.id.clone(),
                type_id: block.type_id.clone(),
            })
    }
}

/// Prefix the first line and every line after a newline, except after a
/// trailing newline.
pub fn prefix_lines(code: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(code.len() + prefix.len());
    out.push_str(prefix);
    let mut rest = code;
    while let Some(at) = rest.find('\n') {
        out.push_str(&rest[..=at]);
        rest = &rest[at + 1..];
        if !rest.is_empty() {
            out.push_str(prefix);
        }
    }
    out.push_str(rest);
    out
}

static LEADING_BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+\n").expect("leading blank pattern"));
static TRAILING_BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s+$").expect("trailing blank pattern"));
static LINE_END_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("line end pattern"));

/// Final whitespace cleanup of a program text.
pub fn tidy(code: &str) -> String {
    let code = LEADING_BLANK.replace(code, "");
    let code = TRAILING_BLANK.replace(&code, "\n");
    LINE_END_SPACE.replace_all(&code, "\n").into_owned()
}

/// Run one pass with the built-in rules.
pub fn generate(registry: &Registry, workspace: &Workspace, roots: &[BlockId]) -> Result<String> {
    Generator::new(registry, RuleTable::builtin(), workspace).generate(roots)
}
