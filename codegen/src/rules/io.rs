use blocks::Block;

use crate::error::GenerationError;
use crate::generator::{Generator, Rendered};
use crate::rules::RuleTable;

pub(super) fn register(table: &mut RuleTable) {
    table.insert("arduino_pinMode", pin_mode);
    table.insert("arduino_digitalWrite", digital_write);
    table.insert("arduino_digital_read", digital_read);
    table.insert("arduino_analogWrite", analog_write);
    table.insert("arduino_analog_read", analog_read);
}

fn pin_mode(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let pin = g.field(block, "PIN")?;
    let mode = g.field(block, "MODE")?;
    Ok(Rendered::Statement(format!("pinMode({}, {});\n", pin, mode)))
}

fn digital_write(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let pin = g.field(block, "PIN")?;
    let state = g.field(block, "STATE")?;
    Ok(Rendered::Statement(format!("digitalWrite({}, {});\n", pin, state)))
}

fn digital_read(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let pin = g.field(block, "PIN")?;
    Ok(Rendered::atomic(format!("digitalRead({})", pin)))
}

fn analog_write(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let pin = g.field(block, "PIN")?;
    let value = g.field(block, "VALUE")?;
    Ok(Rendered::Statement(format!("analogWrite({}, {});\n", pin, value)))
}

fn analog_read(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let pin = g.field(block, "PIN")?;
    Ok(Rendered::atomic(format!("analogRead({})", pin)))
}
