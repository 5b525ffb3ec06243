use indexmap::IndexMap;

/// Top-of-file declarations collected during one generation pass.
///
/// Keys keep the position of their first insertion. Writing the same key
/// again replaces the text in place, so a declaration appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definitions {
    entries: IndexMap<String, String>,
}

impl Definitions {
    pub fn new() -> Self {
        Definitions::default()
    }

    pub fn define(&mut self, key: &str, text: impl Into<String>) {
        let text = text.into();
        match self.entries.get_mut(key) {
            Some(existing) if *existing == text => {}
            Some(existing) => {
                tracing::warn!(key, old = %existing, new = %text, "conflicting definition replaced");
                *existing = text;
            }
            None => {
                tracing::trace!(key, "definition added");
                self.entries.insert(key.to_string(), text);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Declaration texts in first-insertion order, one per line.
    pub fn joined(&self) -> String {
        self.entries
            .values()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_is_kept_once() {
        let mut defs = Definitions::new();
        defs.define("include_servo", "#include <Servo.h>");
        defs.define("include_servo", "#include <Servo.h>");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs.joined(), "#include <Servo.h>");
    }

    #[test]
    fn last_writer_keeps_first_position() {
        let mut defs = Definitions::new();
        defs.define("a", "first");
        defs.define("b", "second");
        defs.define("a", "replaced");
        assert_eq!(defs.joined(), "replaced\nsecond");
        assert_eq!(defs.get("a"), Some("replaced"));
    }
}
