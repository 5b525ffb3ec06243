use blocks::Block;

use crate::error::GenerationError;
use crate::generator::{Generator, Rendered};
use crate::rules::RuleTable;

pub(super) fn register(table: &mut RuleTable) {
    table.insert("arduino_setup", setup);
    table.insert("arduino_loop", main_loop);
    table.insert("arduino_delay", delay);
}

fn setup(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let body = g.statement_to_code(block, "SETUP")?;
    Ok(Rendered::Statement(format!("void setup() {{\n{}}}\n\n", body)))
}

fn main_loop(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let body = g.statement_to_code(block, "LOOP")?;
    Ok(Rendered::Statement(format!("void loop() {{\n{}}}\n", body)))
}

fn delay(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let ms = g.field(block, "DELAY")?;
    Ok(Rendered::Statement(format!("delay({});\n", ms)))
}
