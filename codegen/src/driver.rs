use blocks::{Registry, Workspace};

use crate::error::GenerationError;
use crate::generator::Generator;
use crate::rules::RuleTable;

/// Receiver of each pass's outcome: the program text or the fault.
pub trait CodeSink {
    fn publish(&mut self, code: &str);
    fn fault(&mut self, error: &GenerationError);
}

/// One published outcome, as recorded by the `Vec` sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Published {
    Code(String),
    Fault(GenerationError),
}

impl CodeSink for Vec<Published> {
    fn publish(&mut self, code: &str) {
        self.push(Published::Code(code.to_string()));
    }

    fn fault(&mut self, error: &GenerationError) {
        self.push(Published::Fault(error.clone()));
    }
}

/// Regenerates the program whenever the host reports a graph change.
///
/// Every call runs one full pass over the workspace's program roots.
/// Calls are never merged or deferred.
pub struct Driver<'r, S> {
    registry: &'r Registry,
    rules: &'r RuleTable,
    sink: S,
    passes: u64,
}

impl<'r, S: CodeSink> Driver<'r, S> {
    pub fn new(registry: &'r Registry, sink: S) -> Self {
        Driver::with_rules(registry, RuleTable::builtin(), sink)
    }

    pub fn with_rules(registry: &'r Registry, rules: &'r RuleTable, sink: S) -> Self {
        Driver {
            registry,
            rules,
            sink,
            passes: 0,
        }
    }

    /// Run a pass, hand the outcome to the sink, and return it.
    pub fn on_graph_changed(&mut self, workspace: &Workspace) -> Result<String, GenerationError> {
        self.passes += 1;
        let roots = workspace.program_roots(self.registry);
        tracing::debug!(pass = self.passes, roots = roots.len(), "graph changed");

        let outcome = Generator::new(self.registry, self.rules, workspace).generate(&roots);
        match &outcome {
            Ok(code) => self.sink.publish(code),
            Err(error) => {
                tracing::debug!(pass = self.passes, %error, "generation failed");
                self.sink.fault(error);
            }
        }
        outcome
    }

    /// Number of passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
