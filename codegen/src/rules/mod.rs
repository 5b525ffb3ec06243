//! Emission rules: one function per block type, looked up by type id.

mod basics;
mod control;
mod io;
mod math;
mod neopixel;
mod serial;
mod servo;

use std::collections::HashMap;
use std::sync::OnceLock;

use blocks::Block;

use crate::error::GenerationError;
use crate::generator::{Generator, Rendered};

/// Renders one block. Child slots are rendered through the generator.
pub type Rule = fn(&mut Generator<'_>, &Block) -> Result<Rendered, GenerationError>;

#[derive(Clone, Default)]
pub struct RuleTable {
    rules: HashMap<String, Rule>,
}

impl RuleTable {
    pub fn new() -> Self {
        RuleTable::default()
    }

    /// The rules for every built-in block type. Built on first use and
    /// shared read-only afterwards.
    pub fn builtin() -> &'static RuleTable {
        static BUILTIN: OnceLock<RuleTable> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut table = RuleTable::new();
            basics::register(&mut table);
            io::register(&mut table);
            serial::register(&mut table);
            control::register(&mut table);
            math::register(&mut table);
            servo::register(&mut table);
            neopixel::register(&mut table);
            table
        })
    }

    /// Add or replace the rule for `type_id`.
    pub fn insert(&mut self, type_id: &str, rule: Rule) {
        self.rules.insert(type_id.to_string(), rule);
    }

    pub fn get(&self, type_id: &str) -> Option<Rule> {
        self.rules.get(type_id).copied()
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.rules.contains_key(type_id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<&str> = self.rules.keys().map(|k| k.as_str()).collect();
        types.sort_unstable();
        f.debug_struct("RuleTable").field("types", &types).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocks::Registry;

    #[test]
    fn every_registered_type_has_a_rule() {
        let registry = Registry::arduino();
        let rules = RuleTable::builtin();
        for type_id in registry.type_ids() {
            assert!(rules.contains(type_id), "no rule for {}", type_id);
        }
        assert_eq!(rules.len(), registry.type_ids().count());
    }
}
