pub mod arduino;
pub mod toolbox;

use indexmap::IndexMap;

use crate::block::Mutation;
use crate::block::field::FieldValue;

/// Declared kind of a block field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Number { min: Option<f64> },
    Text,
    /// Dropdown with a closed set of `(label, value)` choices.
    Enum { options: Vec<(String, String)> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub default: FieldValue,
    /// Text fields holding a user-chosen C identifier (checked against reserved words).
    pub identifier: bool,
}

impl FieldSpec {
    pub fn number(name: &str, default: f64) -> Self {
        FieldSpec {
            name: name.to_string(),
            kind: FieldKind::Number { min: None },
            default: FieldValue::Number(default),
            identifier: false,
        }
    }

    pub fn number_min(name: &str, default: f64, min: f64) -> Self {
        FieldSpec {
            kind: FieldKind::Number { min: Some(min) },
            ..FieldSpec::number(name, default)
        }
    }

    pub fn text(name: &str, default: &str) -> Self {
        FieldSpec {
            name: name.to_string(),
            kind: FieldKind::Text,
            default: FieldValue::Text(default.to_string()),
            identifier: false,
        }
    }

    pub fn identifier(name: &str, default: &str) -> Self {
        FieldSpec {
            identifier: true,
            ..FieldSpec::text(name, default)
        }
    }

    /// Dropdown whose labels equal their values. The first choice is the default.
    pub fn choice(name: &str, values: &[&str]) -> Self {
        let options: Vec<(String, String)> = values
            .iter()
            .map(|v| (v.to_string(), v.to_string()))
            .collect();
        FieldSpec::choice_labelled(name, options)
    }

    pub fn choice_labelled(name: &str, options: Vec<(String, String)>) -> Self {
        let default = options
            .first()
            .map(|(_, value)| value.clone())
            .unwrap_or_default();
        FieldSpec {
            name: name.to_string(),
            kind: FieldKind::Enum { options },
            default: FieldValue::Text(default),
            identifier: false,
        }
    }
}

/// Whether instances chain as statements or plug into value slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Statement,
    Value,
}

/// A value slot and the literal rendered when nothing is plugged into it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSlot {
    pub name: String,
    pub default: String,
}

/// Slot naming for if / else-if / else blocks: conditions `IF0..=IFn`,
/// bodies `DO0..=DOn`, plus the else body when present.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableArity {
    pub condition_prefix: String,
    pub body_prefix: String,
    pub else_slot: String,
    pub condition_default: String,
}

impl VariableArity {
    pub fn condition_slot(&self, index: usize) -> String {
        format!("{}{}", self.condition_prefix, index)
    }

    pub fn body_slot(&self, index: usize) -> String {
        format!("{}{}", self.body_prefix, index)
    }

    /// Only the canonical spelling counts: `IF1`, never `IF01` or `IF+1`.
    fn indexed(prefix: &str, name: &str, mutation: &Mutation) -> bool {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.parse::<usize>().ok().map(|index| (rest, index)))
            .is_some_and(|(rest, index)| {
                index <= mutation.else_if_count && rest == index.to_string()
            })
    }
}

/// Human-facing presentation of a block type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Presentation {
    pub label: String,
    pub colour: u16,
    pub tooltip: Option<String>,
    pub category: Option<String>,
}

/// The registered shape of a block type.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockShape {
    pub output: Output,
    pub fields: Vec<FieldSpec>,
    pub statement_slots: Vec<String>,
    pub value_slots: Vec<ValueSlot>,
    /// Program-level routines (setup, loop) carry their rank in the root order.
    /// They have no previous/next connection.
    pub entry_rank: Option<u8>,
    pub arity: Option<VariableArity>,
    pub presentation: Presentation,
}

impl BlockShape {
    pub fn statement(label: &str) -> Self {
        BlockShape {
            output: Output::Statement,
            fields: Vec::new(),
            statement_slots: Vec::new(),
            value_slots: Vec::new(),
            entry_rank: None,
            arity: None,
            presentation: Presentation {
                label: label.to_string(),
                ..Presentation::default()
            },
        }
    }

    pub fn value(label: &str) -> Self {
        BlockShape {
            output: Output::Value,
            ..BlockShape::statement(label)
        }
    }

    pub fn entry(label: &str, rank: u8) -> Self {
        BlockShape {
            entry_rank: Some(rank),
            ..BlockShape::statement(label)
        }
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn statement_slot(mut self, name: &str) -> Self {
        self.statement_slots.push(name.to_string());
        self
    }

    pub fn value_slot(mut self, name: &str, default: &str) -> Self {
        self.value_slots.push(ValueSlot {
            name: name.to_string(),
            default: default.to_string(),
        });
        self
    }

    pub fn variable_arity(mut self, arity: VariableArity) -> Self {
        self.arity = Some(arity);
        self
    }

    pub fn colour(mut self, colour: u16) -> Self {
        self.presentation.colour = colour;
        self
    }

    pub fn tooltip(mut self, tooltip: &str) -> Self {
        self.presentation.tooltip = Some(tooltip.to_string());
        self
    }

    pub fn in_category(mut self, category: &str) -> Self {
        self.presentation.category = Some(category.to_string());
        self
    }

    pub fn is_statement(&self) -> bool {
        self.output == Output::Statement
    }

    pub fn is_value(&self) -> bool {
        self.output == Output::Value
    }

    pub fn is_entry(&self) -> bool {
        self.entry_rank.is_some()
    }

    /// Entry blocks stand alone; every other statement block chains.
    pub fn is_chainable(&self) -> bool {
        self.is_statement() && !self.is_entry()
    }

    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Default literal for a value slot, including variable-arity conditions.
    pub fn value_default(&self, slot: &str) -> Option<&str> {
        if let Some(declared) = self.value_slots.iter().find(|s| s.name == slot) {
            return Some(&declared.default);
        }
        self.arity
            .as_ref()
            .filter(|arity| slot.starts_with(arity.condition_prefix.as_str()))
            .map(|arity| arity.condition_default.as_str())
    }

    pub fn accepts_value_slot(&self, name: &str, mutation: &Mutation) -> bool {
        if self.value_slots.iter().any(|s| s.name == name) {
            return true;
        }
        match &self.arity {
            Some(arity) => VariableArity::indexed(&arity.condition_prefix, name, mutation),
            None => false,
        }
    }

    pub fn accepts_statement_slot(&self, name: &str, mutation: &Mutation) -> bool {
        if self.statement_slots.iter().any(|s| s == name) {
            return true;
        }
        match &self.arity {
            Some(arity) => {
                (mutation.has_else && name == arity.else_slot)
                    || VariableArity::indexed(&arity.body_prefix, name, mutation)
            }
            None => false,
        }
    }
}

/// A toolbox category: display colour plus the types listed under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub colour: u16,
}

/// Registry of block shapes, keyed by type id.
/// Built once before any generation pass and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: IndexMap<String, BlockShape>,
    categories: IndexMap<String, Category>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Register a shape. Re-registering a type id replaces its shape in place.
    pub fn define_type(&mut self, type_id: &str, shape: BlockShape) {
        if self.types.insert(type_id.to_string(), shape).is_some() {
            tracing::debug!(type_id, "replaced block shape");
        }
    }

    pub fn define_category(&mut self, name: &str, colour: u16) {
        self.categories.insert(
            name.to_string(),
            Category {
                name: name.to_string(),
                colour,
            },
        );
    }

    pub fn get(&self, type_id: &str) -> Option<&BlockShape> {
        self.types.get(type_id)
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.types.contains_key(type_id)
    }

    /// Type ids in registration order.
    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(|k| k.as_str())
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// Types listed under a category, in registration order.
    pub fn types_in(&self, category: &str) -> Vec<&str> {
        self.types
            .iter()
            .filter(|(_, shape)| shape.presentation.category.as_deref() == Some(category))
            .map(|(id, _)| id.as_str())
            .collect()
    }
}
