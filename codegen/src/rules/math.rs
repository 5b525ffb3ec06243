use blocks::Block;

use crate::error::GenerationError;
use crate::generator::{Generator, Rendered};
use crate::precedence::Order;
use crate::rules::RuleTable;

pub(super) fn register(table: &mut RuleTable) {
    table.insert("arduino_number", number);
    table.insert("arduino_text", text);
    table.insert("arduino_boolean", boolean);
    table.insert("arduino_compare", compare);
    table.insert("arduino_arithmetic", arithmetic);
    table.insert("arduino_logic_operation", logic);
}

fn number(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    Ok(Rendered::atomic(g.field(block, "NUMBER")?))
}

fn text(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    Ok(Rendered::atomic(format!("\"{}\"", g.field(block, "TEXT")?)))
}

fn boolean(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    Ok(Rendered::atomic(g.field(block, "BOOL")?))
}

/// C operator and precedence for an `OP` dropdown value.
fn operator(op: &str) -> Option<(&'static str, Order)> {
    let entry = match op {
        "EQ" => ("==", Order::EQUALITY),
        "NEQ" => ("!=", Order::EQUALITY),
        "LT" => ("<", Order::RELATIONAL),
        "LTE" => ("<=", Order::RELATIONAL),
        "GT" => (">", Order::RELATIONAL),
        "GTE" => (">=", Order::RELATIONAL),
        "ADD" => ("+", Order::ADDITIVE),
        "MINUS" => ("-", Order::ADDITIVE),
        "MULTIPLY" => ("*", Order::MULTIPLICATIVE),
        "DIVIDE" => ("/", Order::MULTIPLICATIVE),
        "MODULO" => ("%", Order::MULTIPLICATIVE),
        "AND" => ("&&", Order::LOGICAL_AND),
        "OR" => ("||", Order::LOGICAL_OR),
        _ => return None,
    };
    Some(entry)
}

/// `A op B`, with both operands requested at the operator's own order.
fn binary(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let op = g.field(block, "OP")?;
    let (symbol, order) = operator(&op).ok_or_else(|| GenerationError::MalformedField {
        block: block.id.clone(),
        field: "OP".to_string(),
        reason: format!("'{}' is not an operator", op),
    })?;
    let a = g.value_or_default(block, "A", order)?;
    let b = g.value_or_default(block, "B", order)?;
    Ok(Rendered::Value(format!("{} {} {}", a, symbol, b), order))
}

fn compare(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    binary(g, block)
}

fn arithmetic(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    binary(g, block)
}

fn logic(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    binary(g, block)
}
