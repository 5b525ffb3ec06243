use blocks::{Block, BlockId, Registry, Workspace, load_workspace};
use codegen::{GenerationError, generate};

fn id(s: &str) -> BlockId {
    BlockId::new(s)
}

fn run_json(json: &str) -> Result<String, GenerationError> {
    let registry = Registry::arduino();
    let workspace = load_workspace(json, 0, &registry).expect("workspace failed to load");
    let roots = workspace.program_roots(&registry);
    generate(&registry, &workspace, &roots)
}

#[test]
fn unknown_type_names_the_block() {
    let err = run_json(
        r#"{"blocks": {"blocks": [{"type": "arduino_loop", "inputs": {"LOOP": {"block":
            {"type": "mystery_block", "id": "M"}}}}]}}"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        GenerationError::UnknownType {
            block: id("M"),
            type_id: "mystery_block".to_string(),
        }
    );
    assert_eq!(err.block(), &id("M"));
}

#[test]
fn non_numeric_number_field_aborts_the_pass() {
    let err = run_json(
        r#"{"blocks": {"blocks": [
            {"type": "arduino_setup", "inputs": {"SETUP": {"block":
                {"type": "neopixel_init", "fields": {"PIN": 6, "NUM_LEDS": 16}}}}},
            {"type": "arduino_delay", "id": "D", "y": 100, "fields": {"DELAY": "soon"}}
        ]}}"#,
    )
    .unwrap_err();
    match err {
        GenerationError::MalformedField { block, field, .. } => {
            assert_eq!(block, id("D"));
            assert_eq!(field, "DELAY");
        }
        other => panic!("expected MalformedField, got {:?}", other),
    }
}

#[test]
fn numbers_below_minimum_are_malformed() {
    let err = run_json(
        r#"{"blocks": {"blocks": [{"type": "arduino_delay", "fields": {"DELAY": -5}}]}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, GenerationError::MalformedField { ref field, .. } if field == "DELAY"));
    assert!(err.to_string().contains("below the minimum 0"));
}

#[test]
fn unknown_dropdown_choice_is_malformed() {
    let err = run_json(
        r#"{"blocks": {"blocks": [{"type": "arduino_digitalWrite", "id": "W",
            "fields": {"PIN": 13, "STATE": "MAYBE"}}]}}"#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "block 'W' field STATE: 'MAYBE' is not one of the choices"
    );
}

#[test]
fn numeric_text_is_accepted_in_number_fields() {
    let out = run_json(
        r#"{"blocks": {"blocks": [{"type": "arduino_delay", "fields": {"DELAY": "250"}}]}}"#,
    )
    .unwrap();
    assert_eq!(out, "delay(250);\n");
}

#[test]
fn next_cycle_is_detected() {
    let registry = Registry::arduino();
    let mut ws = Workspace::new();
    ws.insert(Block::new("a", "arduino_delay")).unwrap();
    ws.insert(Block::new("b", "arduino_delay")).unwrap();
    ws.connect_next(&id("a"), &id("b")).unwrap();
    ws.connect_next(&id("b"), &id("a")).unwrap();

    let err = generate(&registry, &ws, &[id("a")]).unwrap_err();
    assert_eq!(err, GenerationError::CyclicGraph { block: id("a") });
}

#[test]
fn block_inside_its_own_body_is_a_cycle() {
    let registry = Registry::arduino();
    let mut ws = Workspace::new();
    ws.insert(Block::new("w", "arduino_while")).unwrap();
    ws.connect_statement(&id("w"), "DO0", &id("w")).unwrap();

    let err = generate(&registry, &ws, &[id("w")]).unwrap_err();
    assert_eq!(err, GenerationError::CyclicGraph { block: id("w") });
}

#[test]
fn block_with_two_parents_is_shared() {
    let registry = Registry::arduino();
    let mut ws = Workspace::new();
    ws.insert(Block::new("setup", "arduino_setup")).unwrap();
    ws.insert(Block::new("loop", "arduino_loop")).unwrap();
    ws.insert(Block::new("d", "arduino_delay")).unwrap();
    ws.connect_statement(&id("setup"), "SETUP", &id("d")).unwrap();
    ws.connect_statement(&id("loop"), "LOOP", &id("d")).unwrap();

    let err = generate(&registry, &ws, &[id("setup"), id("loop")]).unwrap_err();
    assert_eq!(err, GenerationError::SharedBlock { block: id("d") });
}

#[test]
fn missing_root_is_reported() {
    let registry = Registry::arduino();
    let ws = Workspace::new();
    let err = generate(&registry, &ws, &[id("ghost")]).unwrap_err();
    assert_eq!(err, GenerationError::MissingBlock { id: id("ghost") });
}

#[test]
fn value_block_in_a_chain_is_a_shape_mismatch() {
    let registry = Registry::arduino();
    let mut ws = Workspace::new();
    ws.insert(Block::new("loop", "arduino_loop")).unwrap();
    ws.insert(Block::new("n", "arduino_number")).unwrap();
    ws.connect_statement(&id("loop"), "LOOP", &id("n")).unwrap();

    let err = generate(&registry, &ws, &[id("loop")]).unwrap_err();
    assert_eq!(
        err,
        GenerationError::ShapeMismatch {
            block: id("n"),
            expected: "statement",
        }
    );
}

#[test]
fn entry_block_inside_a_slot_is_a_shape_mismatch() {
    let registry = Registry::arduino();
    let mut ws = Workspace::new();
    ws.insert(Block::new("loop", "arduino_loop")).unwrap();
    ws.insert(Block::new("setup", "arduino_setup")).unwrap();
    ws.connect_statement(&id("loop"), "LOOP", &id("setup")).unwrap();

    let err = generate(&registry, &ws, &[id("loop")]).unwrap_err();
    assert_eq!(
        err,
        GenerationError::ShapeMismatch {
            block: id("setup"),
            expected: "nestable",
        }
    );
}

#[test]
fn entry_block_after_another_block_is_a_shape_mismatch() {
    let registry = Registry::arduino();
    let mut ws = Workspace::new();
    ws.insert(Block::new("d", "arduino_delay")).unwrap();
    ws.insert(Block::new("loop", "arduino_loop")).unwrap();
    ws.connect_next(&id("d"), &id("loop")).unwrap();

    let err = generate(&registry, &ws, &[id("d")]).unwrap_err();
    assert!(matches!(
        err,
        GenerationError::ShapeMismatch { ref block, expected: "nestable" } if *block == id("loop")
    ));
}

#[test]
fn statement_block_in_a_value_slot_is_a_shape_mismatch() {
    let registry = Registry::arduino();
    let mut ws = Workspace::new();
    ws.insert(Block::new("w", "arduino_while")).unwrap();
    ws.insert(Block::new("d", "arduino_delay")).unwrap();
    ws.connect_value(&id("w"), "WHILE0", &id("d")).unwrap();

    let err = generate(&registry, &ws, &[id("w")]).unwrap_err();
    assert_eq!(
        err,
        GenerationError::ShapeMismatch {
            block: id("d"),
            expected: "value",
        }
    );
}

#[test]
fn registered_type_without_rule_is_reported() {
    let mut registry = Registry::arduino();
    registry.define_type("custom_beep", blocks::BlockShape::statement("beep"));
    let mut ws = Workspace::new();
    ws.insert(Block::new("x", "custom_beep")).unwrap();

    let err = generate(&registry, &ws, &[id("x")]).unwrap_err();
    assert_eq!(
        err,
        GenerationError::MissingRule {
            block: id("x"),
            type_id: "custom_beep".to_string(),
        }
    );
}

#[test]
fn disabled_unknown_block_is_not_an_error() {
    let registry = Registry::arduino();
    let mut ws = Workspace::new();
    ws.insert(Block::new("x", "mystery").disabled()).unwrap();
    ws.insert(Block::new("d", "arduino_delay")).unwrap();
    ws.connect_next(&id("x"), &id("d")).unwrap();

    let out = generate(&registry, &ws, &[id("x")]).unwrap();
    assert_eq!(out, "delay(1000);\n");
}
