//! The built-in Arduino block catalogue.

use crate::registry::{BlockShape, FieldSpec, Registry, VariableArity};

pub const BASICS: &str = "Basics";
pub const IO: &str = "I/O";
pub const SERIAL: &str = "Serial";
pub const CONTROL: &str = "Control";
pub const MATH: &str = "Math";
pub const SERVO: &str = "Servo";
pub const NEOPIXEL: &str = "NeoPixel";

impl Registry {
    /// A registry holding every built-in block type.
    pub fn arduino() -> Self {
        let mut registry = Registry::new();
        define_arduino_blocks(&mut registry);
        registry
    }
}

/// Register (or re-register) the built-in catalogue into `registry`.
pub fn define_arduino_blocks(registry: &mut Registry) {
    registry.define_category(BASICS, 230);
    registry.define_category(IO, 160);
    registry.define_category(SERIAL, 60);
    registry.define_category(CONTROL, 210);
    registry.define_category(MATH, 230);
    registry.define_category(SERVO, 290);
    registry.define_category(NEOPIXEL, 300);

    define_basics(registry);
    define_io(registry);
    define_serial(registry);
    define_control(registry);
    define_math(registry);
    define_servo(registry);
    define_neopixel(registry);
}

fn define_basics(registry: &mut Registry) {
    registry.define_type(
        "arduino_setup",
        BlockShape::entry("Setup", 0)
            .statement_slot("SETUP")
            .colour(230)
            .tooltip("Run once at startup")
            .in_category(BASICS),
    );
    registry.define_type(
        "arduino_loop",
        BlockShape::entry("Loop", 1)
            .statement_slot("LOOP")
            .colour(230)
            .tooltip("Run repeatedly")
            .in_category(BASICS),
    );
    registry.define_type(
        "arduino_delay",
        BlockShape::statement("Delay %1 ms")
            .field(FieldSpec::number_min("DELAY", 1000.0, 0.0))
            .colour(160)
            .in_category(BASICS),
    );
}

fn define_io(registry: &mut Registry) {
    registry.define_type(
        "arduino_pinMode",
        BlockShape::statement("pinMode %1 %2")
            .field(FieldSpec::number("PIN", 13.0))
            .field(FieldSpec::choice("MODE", &["OUTPUT", "INPUT"]))
            .colour(160)
            .in_category(IO),
    );
    registry.define_type(
        "arduino_digitalWrite",
        BlockShape::statement("digitalWrite %1 %2")
            .field(FieldSpec::number("PIN", 13.0))
            .field(FieldSpec::choice("STATE", &["HIGH", "LOW"]))
            .colour(160)
            .in_category(IO),
    );
    registry.define_type(
        "arduino_digital_read",
        BlockShape::value("digitalRead %1")
            .field(FieldSpec::number("PIN", 2.0))
            .colour(160)
            .in_category(IO),
    );
    registry.define_type(
        "arduino_analogWrite",
        BlockShape::statement("analogWrite %1 Value %2")
            .field(FieldSpec::number("PIN", 3.0))
            .field(FieldSpec::number("VALUE", 255.0))
            .colour(160)
            .in_category(IO),
    );
    registry.define_type(
        "arduino_analog_read",
        BlockShape::value("analogRead %1")
            .field(FieldSpec::number("PIN", 0.0))
            .colour(160)
            .in_category(IO),
    );
}

fn define_serial(registry: &mut Registry) {
    registry.define_type(
        "arduino_serial_begin",
        BlockShape::statement("Serial.begin %1")
            .field(FieldSpec::number("BAUD_RATE", 9600.0))
            .colour(60)
            .in_category(SERIAL),
    );
    registry.define_type(
        "arduino_serial_print",
        BlockShape::statement("Serial.print %1")
            .field(FieldSpec::text("TEXT", "Hello"))
            .colour(60)
            .in_category(SERIAL),
    );
    registry.define_type(
        "arduino_serial_println",
        BlockShape::statement("Serial.println %1")
            .field(FieldSpec::text("TEXT", "Hello"))
            .colour(60)
            .in_category(SERIAL),
    );
}

fn define_control(registry: &mut Registry) {
    registry.define_type(
        "arduino_if_else",
        BlockShape::statement("if %1")
            .value_slot("IF0", "false")
            .statement_slot("DO0")
            .variable_arity(VariableArity {
                condition_prefix: "IF".to_string(),
                body_prefix: "DO".to_string(),
                else_slot: "ELSE".to_string(),
                condition_default: "false".to_string(),
            })
            .colour(210)
            .in_category(CONTROL),
    );
    registry.define_type(
        "arduino_for",
        BlockShape::statement("for int %1 = %2 to %3 step %4")
            .field(FieldSpec::identifier("VAR", "i"))
            .field(FieldSpec::number("FROM", 0.0))
            .field(FieldSpec::number("TO", 10.0))
            .field(FieldSpec::number("INCREMENT", 1.0))
            .statement_slot("DO0")
            .colour(210)
            .in_category(CONTROL),
    );
    registry.define_type(
        "arduino_while",
        BlockShape::statement("while %1")
            .value_slot("WHILE0", "false")
            .statement_slot("DO0")
            .colour(210)
            .in_category(CONTROL),
    );
}

fn define_math(registry: &mut Registry) {
    registry.define_type(
        "arduino_number",
        BlockShape::value("%1")
            .field(FieldSpec::number("NUMBER", 0.0))
            .colour(230)
            .in_category(MATH),
    );
    registry.define_type(
        "arduino_text",
        BlockShape::value("\"%1\"")
            .field(FieldSpec::text("TEXT", ""))
            .colour(160)
            .in_category(MATH),
    );
    registry.define_type(
        "arduino_boolean",
        BlockShape::value("%1")
            .field(FieldSpec::choice("BOOL", &["true", "false"]))
            .colour(210)
            .in_category(MATH),
    );
    registry.define_type(
        "arduino_compare",
        BlockShape::value("%1 %2 %3")
            .field(FieldSpec::choice_labelled(
                "OP",
                labelled(&[
                    ("=", "EQ"),
                    ("\u{2260}", "NEQ"),
                    ("<", "LT"),
                    ("\u{2264}", "LTE"),
                    (">", "GT"),
                    ("\u{2265}", "GTE"),
                ]),
            ))
            .value_slot("A", "0")
            .value_slot("B", "0")
            .colour(210)
            .in_category(MATH),
    );
    registry.define_type(
        "arduino_arithmetic",
        BlockShape::value("%1 %2 %3")
            .field(FieldSpec::choice_labelled(
                "OP",
                labelled(&[
                    ("+", "ADD"),
                    ("-", "MINUS"),
                    ("\u{d7}", "MULTIPLY"),
                    ("\u{f7}", "DIVIDE"),
                    ("%", "MODULO"),
                ]),
            ))
            .value_slot("A", "0")
            .value_slot("B", "0")
            .colour(230)
            .in_category(MATH),
    );
    registry.define_type(
        "arduino_logic_operation",
        BlockShape::value("%1 %2 %3")
            .field(FieldSpec::choice_labelled(
                "OP",
                labelled(&[("and", "AND"), ("or", "OR")]),
            ))
            .value_slot("A", "false")
            .value_slot("B", "false")
            .colour(210)
            .in_category(MATH),
    );
}

fn define_servo(registry: &mut Registry) {
    registry.define_type(
        "arduino_servo_define",
        BlockShape::statement("Servo Define (Pos 0)")
            .colour(290)
            .in_category(SERVO),
    );
    registry.define_type(
        "arduino_servo_setup",
        BlockShape::statement("Servo Attach Pin %1")
            .field(FieldSpec::number("PIN", 9.0))
            .colour(290)
            .in_category(SERVO),
    );
    registry.define_type(
        "arduino_servo_loop",
        BlockShape::statement("Servo Sweep Start %1 End %2 Speed %3")
            .field(FieldSpec::number("IDEGREE", 0.0))
            .field(FieldSpec::number("FDEGREE", 180.0))
            .field(FieldSpec::number("DELAY", 15.0))
            .colour(290)
            .in_category(SERVO),
    );
}

fn define_neopixel(registry: &mut Registry) {
    registry.define_type(
        "neopixel_init",
        BlockShape::statement("NeoPixel Init Pin %1 LEDs %2")
            .field(FieldSpec::number("PIN", 6.0))
            .field(FieldSpec::number("NUM_LEDS", 16.0))
            .colour(300)
            .in_category(NEOPIXEL),
    );
    registry.define_type(
        "neopixel_set_color",
        BlockShape::statement("Set Pixel %1 R %2 G %3 B %4")
            .field(FieldSpec::number("LED_INDEX", 0.0))
            .field(FieldSpec::number("RED", 255.0))
            .field(FieldSpec::number("GREEN", 255.0))
            .field(FieldSpec::number("BLUE", 255.0))
            .colour(300)
            .in_category(NEOPIXEL),
    );
}

fn labelled(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(label, value)| (label.to_string(), value.to_string()))
        .collect()
}
