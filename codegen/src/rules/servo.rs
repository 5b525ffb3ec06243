use blocks::Block;

use crate::error::GenerationError;
use crate::generator::{Generator, Rendered};
use crate::rules::RuleTable;

pub(super) fn register(table: &mut RuleTable) {
    table.insert("arduino_servo_define", define);
    table.insert("arduino_servo_setup", attach);
    table.insert("arduino_servo_loop", sweep);
}

/// Declares the shared servo instance and sweep position. Emits no statement.
fn define(g: &mut Generator<'_>, _block: &Block) -> Result<Rendered, GenerationError> {
    g.define("include_servo", "#include <Servo.h>");
    g.define("define_servo", "Servo myservo;\nint pos = 0;");
    Ok(Rendered::Statement(String::new()))
}

fn attach(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let pin = g.field(block, "PIN")?;
    Ok(Rendered::Statement(format!("myservo.attach({});\n", pin)))
}

fn sweep(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let start = g.field(block, "IDEGREE")?;
    let end = g.field(block, "FDEGREE")?;
    let delay = g.field(block, "DELAY")?;
    Ok(Rendered::Statement(format!(
        "for(pos = {s}; pos <= {e}; pos += 1) {{ myservo.write(pos); delay({d}); }}\n\
         for(pos = {e}; pos >= {s}; pos -= 1) {{ myservo.write(pos); delay({d}); }}\n",
        s = start,
        e = end,
        d = delay
    )))
}
