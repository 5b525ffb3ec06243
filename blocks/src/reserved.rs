use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

/// Identifiers a user must never pick as a variable name: C keywords,
/// the sketch entry points, and the Arduino core API.
pub const RESERVED_WORDS: &[&str] = &[
    "setup", "loop", "if", "else", "for", "switch", "case", "while", "do", "break", "continue",
    "return", "goto", "define", "include", "HIGH", "LOW", "INPUT", "OUTPUT", "INPUT_PULLUP",
    "true", "false", "integer", "constants", "floating", "point", "void", "boolean", "char",
    "unsigned", "byte", "int", "word", "long", "float", "double", "string", "String", "array",
    "static", "volatile", "const", "sizeof", "pinMode", "digitalWrite", "digitalRead",
    "analogReference", "analogRead", "analogWrite", "tone", "noTone", "millis", "micros", "delay",
    "delayMicroseconds", "min", "max", "abs", "constrain", "map", "pow", "sqrt", "sin", "cos",
    "tan", "randomSeed", "random", "attachInterrupt", "detachInterrupt", "interrupts",
    "noInterrupts",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    Empty,
    Reserved(String),
    Invalid(String),
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierError::Empty => write!(f, "identifier is empty"),
            IdentifierError::Reserved(name) => write!(f, "'{}' is a reserved word", name),
            IdentifierError::Invalid(name) => {
                write!(f, "'{}' is not a valid C identifier", name)
            }
        }
    }
}

impl std::error::Error for IdentifierError {}

/// The closed reserved-word set. Consulted by the editor when accepting
/// identifiers; the generator trusts what it is given.
#[derive(Debug)]
pub struct ReservedWords {
    words: HashSet<&'static str>,
}

impl ReservedWords {
    /// The process-wide instance.
    pub fn get() -> &'static ReservedWords {
        static WORDS: OnceLock<ReservedWords> = OnceLock::new();
        WORDS.get_or_init(|| ReservedWords {
            words: RESERVED_WORDS.iter().copied().collect(),
        })
    }

    /// Case-sensitive, like the C identifiers it guards.
    pub fn contains(&self, name: &str) -> bool {
        self.words.contains(name)
    }

    /// Reserved words in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> {
        RESERVED_WORDS.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn check_identifier(&self, name: &str) -> Result<(), IdentifierError> {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return Err(IdentifierError::Empty);
        };
        let well_formed = (first.is_ascii_alphabetic() || first == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !well_formed {
            return Err(IdentifierError::Invalid(name.to_string()));
        }
        if self.contains(name) {
            return Err(IdentifierError::Reserved(name.to_string()));
        }
        Ok(())
    }
}
