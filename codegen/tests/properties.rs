use blocks::{Block, BlockId, Registry, Workspace};
use codegen::generate;
use proptest::prelude::*;

/// A statement that can appear anywhere in a chain.
#[derive(Debug, Clone)]
enum Step {
    Delay(u32),
    Write(u8, bool),
    Print(String),
    Servo,
    Pixels(u8, u8),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0u32..5000).prop_map(Step::Delay),
        (0u8..20, any::<bool>()).prop_map(|(pin, high)| Step::Write(pin, high)),
        "[a-z ]{0,12}".prop_map(Step::Print),
        Just(Step::Servo),
        (0u8..14, 1u8..60).prop_map(|(pin, count)| Step::Pixels(pin, count)),
    ]
}

fn block_for(id: String, step: &Step) -> Block {
    match step {
        Step::Delay(ms) => Block::new(id, "arduino_delay").with_field("DELAY", *ms as i64),
        Step::Write(pin, high) => Block::new(id, "arduino_digitalWrite")
            .with_field("PIN", *pin as i64)
            .with_field("STATE", if *high { "HIGH" } else { "LOW" }),
        Step::Print(text) => Block::new(id, "arduino_serial_println").with_field("TEXT", text.as_str()),
        Step::Servo => Block::new(id, "arduino_servo_define"),
        Step::Pixels(pin, count) => Block::new(id, "neopixel_init")
            .with_field("PIN", *pin as i64)
            .with_field("NUM_LEDS", *count as i64),
    }
}

/// Setup and loop bodies built from the given steps.
fn program(setup: &[Step], main: &[Step]) -> Workspace {
    let mut ws = Workspace::new();
    for (entry, slot, steps) in [("setup", "SETUP", setup), ("loop", "LOOP", main)] {
        let entry_type = format!("arduino_{}", entry);
        ws.insert(Block::new(entry, entry_type)).unwrap();
        let mut prev: Option<BlockId> = None;
        for (i, step) in steps.iter().enumerate() {
            let id = ws.insert(block_for(format!("{}{}", entry, i), step)).unwrap();
            match &prev {
                None => ws.connect_statement(&BlockId::new(entry), slot, &id).unwrap(),
                Some(p) => ws.connect_next(p, &id).unwrap(),
            };
            prev = Some(id);
        }
    }
    ws
}

proptest! {
    #[test]
    fn generation_is_idempotent(
        setup in prop::collection::vec(step(), 0..6),
        main in prop::collection::vec(step(), 0..6),
    ) {
        let registry = Registry::arduino();
        let ws = program(&setup, &main);
        let roots = ws.program_roots(&registry);
        let first = generate(&registry, &ws, &roots).unwrap();
        let second = generate(&registry, &ws, &roots).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn declarations_are_unique(
        setup in prop::collection::vec(step(), 0..8),
        main in prop::collection::vec(step(), 0..8),
    ) {
        let registry = Registry::arduino();
        let ws = program(&setup, &main);
        let roots = ws.program_roots(&registry);
        let out = generate(&registry, &ws, &roots).unwrap();

        let servos = setup.iter().chain(&main).filter(|s| matches!(s, Step::Servo)).count();
        let pixels = setup.iter().chain(&main).filter(|s| matches!(s, Step::Pixels(..))).count();

        prop_assert_eq!(out.matches("#include <Servo.h>").count(), usize::from(servos > 0));
        prop_assert_eq!(out.matches("Servo myservo;").count(), usize::from(servos > 0));
        prop_assert_eq!(out.matches("#include <Adafruit_NeoPixel.h>").count(), usize::from(pixels > 0));
        prop_assert_eq!(out.matches("Adafruit_NeoPixel strip(").count(), usize::from(pixels > 0));
        prop_assert_eq!(out.matches("strip.begin();").count(), pixels);
    }

    #[test]
    fn output_has_no_trailing_spaces(
        main in prop::collection::vec(step(), 0..8),
    ) {
        let registry = Registry::arduino();
        let ws = program(&[], &main);
        let roots = ws.program_roots(&registry);
        let out = generate(&registry, &ws, &roots).unwrap();
        prop_assert!(!out.contains(" \n"));
        prop_assert!(!out.starts_with('\n'));
    }
}
