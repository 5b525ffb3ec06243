use blocks::{Registry, load_workspace};
use codegen::generate;

fn run(json: &str) -> String {
    let registry = Registry::arduino();
    let workspace = load_workspace(json, 0, &registry).expect("workspace failed to load");
    let roots = workspace.program_roots(&registry);
    generate(&registry, &workspace, &roots).expect("generation failed")
}

fn doc(blocks: &str) -> String {
    format!(r#"{{"blocks": {{"languageVersion": 0, "blocks": [{}]}}}}"#, blocks)
}

#[test]
fn setup_and_loop_with_digital_write() {
    let out = run(&doc(
        r#"{"type": "arduino_setup", "x": 20, "y": 20},
           {"type": "arduino_loop", "x": 20, "y": 200, "inputs": {"LOOP": {"block":
               {"type": "arduino_digitalWrite", "fields": {"PIN": 13, "STATE": "HIGH"}}}}}"#,
    ));
    assert_eq!(
        out,
        "void setup() {\n}\n\n\nvoid loop() {\n  digitalWrite(13, HIGH);\n}\n"
    );
}

#[test]
fn neopixel_init_hoists_declarations() {
    let out = run(&doc(
        r#"{"type": "arduino_setup", "inputs": {"SETUP": {"block":
               {"type": "neopixel_init", "fields": {"PIN": 6, "NUM_LEDS": 16}}}}}"#,
    ));
    assert_eq!(
        out,
        "#include <Adafruit_NeoPixel.h>\n\
         Adafruit_NeoPixel strip(16, 6, NEO_GRB + NEO_KHZ800);\n\
         \n\
         void setup() {\n  strip.begin();\n  strip.show();\n}\n"
    );
}

#[test]
fn counted_loop_wraps_its_body() {
    let out = run(&doc(
        r#"{"type": "arduino_for",
            "fields": {"VAR": "i", "FROM": 0, "TO": 9, "INCREMENT": 1},
            "inputs": {"DO0": {"block": {"type": "arduino_delay", "fields": {"DELAY": 500}}}}}"#,
    ));
    assert_eq!(out, "for (int i = 0; i <= 9; i += 1) {\n  delay(500);\n}\n");
    assert_eq!(out.matches("delay(500);").count(), 1);
}

#[test]
fn sibling_declarations_appear_once() {
    let out = run(&doc(
        r#"{"type": "neopixel_init", "y": 0, "fields": {"PIN": 6, "NUM_LEDS": 16}},
           {"type": "neopixel_init", "y": 100, "fields": {"PIN": 6, "NUM_LEDS": 16}}"#,
    ));
    assert_eq!(out.matches("#include <Adafruit_NeoPixel.h>").count(), 1);
    assert_eq!(out.matches("Adafruit_NeoPixel strip(").count(), 1);
    assert_eq!(out.matches("strip.begin();").count(), 2);
}

#[test]
fn bare_if_has_no_trailing_branches() {
    let out = run(&doc(
        r#"{"type": "arduino_if_else", "inputs": {
               "IF0": {"block": {"type": "arduino_digital_read", "fields": {"PIN": 2}}},
               "DO0": {"block": {"type": "arduino_delay", "fields": {"DELAY": 100}}}}}"#,
    ));
    assert_eq!(out, "if (digitalRead(2)) {\n  delay(100);\n}\n");
    assert!(!out.contains("else"));
}

#[test]
fn else_if_and_else_follow_in_order() {
    let out = run(&doc(
        r#"{"type": "arduino_if_else", "extraState": {"elseIfCount": 2, "hasElse": true},
            "inputs": {
               "IF1": {"block": {"type": "arduino_boolean", "fields": {"BOOL": "true"}}},
               "DO1": {"block": {"type": "arduino_delay", "fields": {"DELAY": 1}}},
               "ELSE": {"block": {"type": "arduino_delay", "fields": {"DELAY": 2}}}}}"#,
    ));
    assert_eq!(
        out,
        "if (false) {\n}\n\
         else if (true) {\n  delay(1);\n}\n\
         else if (false) {\n}\n\
         else {\n  delay(2);\n}\n"
    );
}

#[test]
fn chains_render_in_link_order() {
    let out = run(&doc(
        r#"{"type": "arduino_loop", "inputs": {"LOOP": {"block":
            {"type": "arduino_digitalWrite", "fields": {"PIN": 13, "STATE": "HIGH"},
             "next": {"block": {"type": "arduino_delay", "fields": {"DELAY": 500},
             "next": {"block": {"type": "arduino_digitalWrite", "fields": {"PIN": 13, "STATE": "LOW"},
             "next": {"block": {"type": "arduino_delay", "fields": {"DELAY": 500}}}}}}}}}}}"#,
    ));
    assert_eq!(
        out,
        "void loop() {\n  digitalWrite(13, HIGH);\n  delay(500);\n  digitalWrite(13, LOW);\n  delay(500);\n}\n"
    );
}

#[test]
fn nested_bodies_indent_per_level() {
    let out = run(&doc(
        r#"{"type": "arduino_loop", "inputs": {"LOOP": {"block":
            {"type": "arduino_while", "inputs": {"DO0": {"block":
                {"type": "arduino_serial_println", "fields": {"TEXT": "tick"}}}}}}}}"#,
    ));
    assert_eq!(
        out,
        "void loop() {\n  while (false) {\n    Serial.println(\"tick\");\n  }\n}\n"
    );
}

#[test]
fn missing_fields_use_declared_defaults() {
    let out = run(&doc(r#"{"type": "arduino_pinMode"}, {"type": "arduino_delay", "y": 50}"#));
    assert_eq!(out, "pinMode(13, OUTPUT);\n\ndelay(1000);\n");
}

#[test]
fn disabled_blocks_are_skipped_but_not_their_followers() {
    let out = run(&doc(
        r#"{"type": "arduino_loop", "inputs": {"LOOP": {"block":
            {"type": "arduino_digitalWrite", "enabled": false,
             "next": {"block": {"type": "arduino_delay", "fields": {"DELAY": 10}}}}}}}"#,
    ));
    assert_eq!(out, "void loop() {\n  delay(10);\n}\n");
}

#[test]
fn disabled_condition_falls_back_to_default() {
    let out = run(&doc(
        r#"{"type": "arduino_while", "inputs": {"WHILE0": {"block":
            {"type": "arduino_boolean", "enabled": false, "fields": {"BOOL": "true"}}}}}"#,
    ));
    assert_eq!(out, "while (false) {\n}\n");
}

#[test]
fn operands_are_parenthesised_by_precedence() {
    let out = run(&doc(
        r#"{"type": "arduino_arithmetic", "fields": {"OP": "MULTIPLY"}, "inputs": {
            "A": {"block": {"type": "arduino_arithmetic", "fields": {"OP": "ADD"}, "inputs": {
                "A": {"block": {"type": "arduino_number", "fields": {"NUMBER": 1}}},
                "B": {"block": {"type": "arduino_number", "fields": {"NUMBER": 2}}}}}},
            "B": {"block": {"type": "arduino_number", "fields": {"NUMBER": 3}}}}}"#,
    ));
    assert_eq!(out, "(1 + 2) * 3");
}

#[test]
fn tighter_operands_stay_bare() {
    let out = run(&doc(
        r#"{"type": "arduino_logic_operation", "fields": {"OP": "AND"}, "inputs": {
            "A": {"block": {"type": "arduino_compare", "fields": {"OP": "LT"}, "inputs": {
                "A": {"block": {"type": "arduino_analog_read", "fields": {"PIN": 0}}},
                "B": {"block": {"type": "arduino_number", "fields": {"NUMBER": 512}}}}}}}}"#,
    ));
    assert_eq!(out, "analogRead(0) < 512 && false");
}

#[test]
fn equal_precedence_nesting_is_wrapped() {
    let out = run(&doc(
        r#"{"type": "arduino_arithmetic", "fields": {"OP": "MINUS"}, "inputs": {
            "B": {"block": {"type": "arduino_arithmetic", "fields": {"OP": "ADD"}}}}}"#,
    ));
    assert_eq!(out, "0 - (0 + 0)");
}

#[test]
fn conditions_are_never_wrapped() {
    let out = run(&doc(
        r#"{"type": "arduino_if_else", "inputs": {"IF0": {"block":
            {"type": "arduino_logic_operation", "fields": {"OP": "OR"}}}}}"#,
    ));
    assert_eq!(out, "if (false || false) {\n}\n");
}

#[test]
fn declarations_alone_keep_their_blank_line() {
    let out = run(&doc(r#"{"type": "arduino_servo_define"}"#));
    assert_eq!(out, "#include <Servo.h>\nServo myservo;\nint pos = 0;\n\n");
}

#[test]
fn long_loop_body_loads_and_renders() {
    let mut chain = String::from(r#"{"type": "arduino_delay", "fields": {"DELAY": 199}}"#);
    for ms in (0..199).rev() {
        chain = format!(
            r#"{{"type": "arduino_delay", "fields": {{"DELAY": {}}}, "next": {{"block": {}}}}}"#,
            ms, chain
        );
    }
    let out = run(&doc(&format!(
        r#"{{"type": "arduino_loop", "inputs": {{"LOOP": {{"block": {}}}}}}}"#,
        chain
    )));

    assert_eq!(out.matches("  delay(").count(), 200);
    assert!(out.starts_with("void loop() {\n  delay(0);\n  delay(1);\n"));
    assert!(out.ends_with("  delay(199);\n}\n"));
}

#[test]
fn servo_define_only_declares() {
    let out = run(&doc(
        r#"{"type": "arduino_setup", "inputs": {"SETUP": {"block":
            {"type": "arduino_servo_define",
             "next": {"block": {"type": "arduino_servo_setup", "fields": {"PIN": 9}}}}}}},
           {"type": "arduino_loop", "y": 300, "inputs": {"LOOP": {"block":
            {"type": "arduino_servo_loop", "fields": {"IDEGREE": 0, "FDEGREE": 90, "DELAY": 15}}}}}"#,
    ));
    assert_eq!(
        out,
        "#include <Servo.h>\nServo myservo;\nint pos = 0;\n\n\
         void setup() {\n  myservo.attach(9);\n}\n\n\n\
         void loop() {\n\
         \x20 for(pos = 0; pos <= 90; pos += 1) { myservo.write(pos); delay(15); }\n\
         \x20 for(pos = 90; pos >= 0; pos -= 1) { myservo.write(pos); delay(15); }\n\
         }\n"
    );
}

#[test]
fn text_is_inserted_verbatim() {
    let out = run(&doc(
        r#"{"type": "arduino_serial_print", "fields": {"TEXT": "say \"hi\""}}"#,
    ));
    assert_eq!(out, "Serial.print(\"say \"hi\"\");\n");
}

#[test]
fn pixel_colour_uses_all_channels() {
    let out = run(&doc(
        r#"{"type": "neopixel_set_color",
            "fields": {"LED_INDEX": 3, "RED": 10, "GREEN": 20, "BLUE": 30}}"#,
    ));
    assert_eq!(
        out,
        "strip.setPixelColor(3, strip.Color(10, 20, 30));\nstrip.show();\n"
    );
}

#[test]
fn naked_values_render_their_expression() {
    let out = run(&doc(
        r#"{"type": "arduino_text", "fields": {"TEXT": "loose"}},
           {"type": "arduino_number", "y": 40, "fields": {"NUMBER": 2.5}}"#,
    ));
    assert_eq!(out, "\"loose\"\n2.5");
}

#[test]
fn empty_workspace_is_empty_text() {
    assert_eq!(run(r#"{}"#), "");
    assert_eq!(run(&doc("")), "");
}
