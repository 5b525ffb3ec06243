use blocks::Block;

use crate::error::GenerationError;
use crate::generator::{Generator, Rendered};
use crate::precedence::Order;
use crate::rules::RuleTable;

pub(super) fn register(table: &mut RuleTable) {
    table.insert("arduino_if_else", if_else);
    table.insert("arduino_for", counted_loop);
    table.insert("arduino_while", while_loop);
}

/// `if` followed by one `else if` per extra branch the mutation declares,
/// then `else` when it has one.
fn if_else(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let condition = g.value_or_default(block, "IF0", Order::NONE)?;
    let branch = g.statement_to_code(block, "DO0")?;
    let mut code = format!("if ({}) {{\n{}}}\n", condition, branch);

    for i in 1..=block.mutation.else_if_count {
        let condition = g.value_or_default(block, &format!("IF{}", i), Order::NONE)?;
        let branch = g.statement_to_code(block, &format!("DO{}", i))?;
        code.push_str(&format!("else if ({}) {{\n{}}}\n", condition, branch));
    }

    if block.mutation.has_else {
        let branch = g.statement_to_code(block, "ELSE")?;
        code.push_str(&format!("else {{\n{}}}\n", branch));
    }
    Ok(Rendered::Statement(code))
}

fn counted_loop(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let var = g.field(block, "VAR")?;
    let from = g.field(block, "FROM")?;
    let to = g.field(block, "TO")?;
    let step = g.field(block, "INCREMENT")?;
    let branch = g.statement_to_code(block, "DO0")?;
    Ok(Rendered::Statement(format!(
        "for (int {v} = {}; {v} <= {}; {v} += {}) {{\n{}}}\n",
        from,
        to,
        step,
        branch,
        v = var
    )))
}

fn while_loop(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let condition = g.value_or_default(block, "WHILE0", Order::NONE)?;
    let branch = g.statement_to_code(block, "DO0")?;
    Ok(Rendered::Statement(format!(
        "while ({}) {{\n{}}}\n",
        condition, branch
    )))
}
