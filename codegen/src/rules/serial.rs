use blocks::Block;

use crate::error::GenerationError;
use crate::generator::{Generator, Rendered};
use crate::rules::RuleTable;

pub(super) fn register(table: &mut RuleTable) {
    table.insert("arduino_serial_begin", begin);
    table.insert("arduino_serial_print", print);
    table.insert("arduino_serial_println", println);
}

fn begin(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let baud = g.field(block, "BAUD_RATE")?;
    Ok(Rendered::Statement(format!("Serial.begin({});\n", baud)))
}

// Text goes between the quotes as typed, without escaping.
fn print(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let text = g.field(block, "TEXT")?;
    Ok(Rendered::Statement(format!("Serial.print(\"{}\");\n", text)))
}

fn println(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let text = g.field(block, "TEXT")?;
    Ok(Rendered::Statement(format!("Serial.println(\"{}\");\n", text)))
}
