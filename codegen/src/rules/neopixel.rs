use blocks::Block;

use crate::error::GenerationError;
use crate::generator::{Generator, Rendered};
use crate::rules::RuleTable;

pub(super) fn register(table: &mut RuleTable) {
    table.insert("neopixel_init", init);
    table.insert("neopixel_set_color", set_color);
}

fn init(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let pin = g.field(block, "PIN")?;
    let count = g.field(block, "NUM_LEDS")?;
    g.define("include_neopixel", "#include <Adafruit_NeoPixel.h>");
    g.define(
        "define_strip",
        format!("Adafruit_NeoPixel strip({}, {}, NEO_GRB + NEO_KHZ800);", count, pin),
    );
    Ok(Rendered::Statement("strip.begin();\nstrip.show();\n".to_string()))
}

fn set_color(g: &mut Generator<'_>, block: &Block) -> Result<Rendered, GenerationError> {
    let index = g.field(block, "LED_INDEX")?;
    let r = g.field(block, "RED")?;
    let gr = g.field(block, "GREEN")?;
    let b = g.field(block, "BLUE")?;
    Ok(Rendered::Statement(format!(
        "strip.setPixelColor({}, strip.Color({}, {}, {}));\nstrip.show();\n",
        index, r, gr, b
    )))
}
