//! Property-based tests for the Luma translator
//!
//! These suites use proptest to drive the translator with generated event
//! streams and verify that:
//! 1. Type discipline holds for every operand-type combination
//! 2. Literal index bounds-checking is exact over arbitrary lengths
//! 3. The translator never panics, whatever the driver feeds it

use luma::{Error, Event, EventKind, PrimitiveType, Translator};
use proptest::prelude::*;

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// The four numeric primitive types
fn numeric_type() -> impl Strategy<Value = PrimitiveType> {
    prop_oneof![
        Just(PrimitiveType::Int),
        Just(PrimitiveType::Long),
        Just(PrimitiveType::Float),
        Just(PrimitiveType::Double),
    ]
}

/// A literal event of the given numeric type
fn literal_for(ty: PrimitiveType, text: String) -> EventKind {
    match ty {
        PrimitiveType::Int => EventKind::Int(text),
        PrimitiveType::Long => EventKind::Long(text),
        PrimitiveType::Float => EventKind::Float(format!("{text}.0")),
        PrimitiveType::Double => EventKind::Double(format!("{text}.0")),
        _ => unreachable!("strategy only yields numeric types"),
    }
}

/// One of the four arithmetic operator events
fn arith_op() -> impl Strategy<Value = EventKind> {
    prop_oneof![
        Just(EventKind::Add),
        Just(EventKind::Sub),
        Just(EventKind::Mul),
        Just(EventKind::Div),
    ]
}

/// Tokens that look like literal texts but may be arbitrary junk
fn arbitrary_literal_text() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[ -~]{0,24}").unwrap()
}

fn run(events: Vec<EventKind>) -> luma::Result<String> {
    let mut translator = Translator::new();
    for kind in events {
        translator.handle(Event::at(1, kind))?;
    }
    translator.finish()
}

// =============================================================================
// TYPE DISCIPLINE
// =============================================================================

proptest! {
    #[test]
    fn unequal_numeric_operands_always_mismatch(
        lhs in numeric_type(),
        rhs in numeric_type(),
        op in arith_op(),
        value in 0i32..1000,
    ) {
        prop_assume!(lhs != rhs);
        let err = run(vec![
            literal_for(lhs, value.to_string()),
            literal_for(rhs, value.to_string()),
            op,
        ])
        .unwrap_err();
        let is_match = matches!(err, Error::TypeMismatch { .. });
        prop_assert!(is_match);
    }

    #[test]
    fn equal_numeric_operands_succeed_and_keep_the_type(
        ty in numeric_type(),
        op in arith_op(),
        value in 0i32..1000,
    ) {
        let text = run(vec![
            literal_for(ty, value.to_string()),
            literal_for(ty, value.to_string()),
            op,
            EventKind::Assign("result".into()),
        ])
        .unwrap();
        // The declared storage carries the operand type through.
        let declared = format!("@result = global {} ", ty.storage_type());
        prop_assert!(text.contains(&declared));
    }

    #[test]
    fn cast_to_own_type_emits_no_conversion(
        ty in numeric_type(),
        value in 0i32..1000,
    ) {
        let cast = match ty {
            PrimitiveType::Int => EventKind::CastInt,
            PrimitiveType::Long => EventKind::CastLong,
            PrimitiveType::Float => EventKind::CastFloat,
            _ => EventKind::CastDouble,
        };
        let text = run(vec![
            literal_for(ty, value.to_string()),
            cast,
            EventKind::Assign("x".into()),
        ])
        .unwrap();
        for mnemonic in ["sext", "trunc", "fpext", "fptrunc", "sitofp", "fptosi"] {
            prop_assert!(!text.contains(mnemonic));
        }
    }
}

// =============================================================================
// INDEX BOUNDS
// =============================================================================

/// Events declaring `a` as an int array literal of the given length
fn int_array_events(length: usize) -> Vec<EventKind> {
    let mut events = vec![EventKind::ArrayBegin];
    for i in 0..length {
        events.push(EventKind::Int(i.to_string()));
        events.push(EventKind::ArrayElem);
    }
    events.push(EventKind::ArrayEnd);
    events.push(EventKind::ArrayBind("a".into()));
    events
}

proptest! {
    #[test]
    fn literal_index_fails_iff_out_of_range(
        length in 1usize..16,
        index in -24i64..24,
    ) {
        let mut events = int_array_events(length);
        events.push(EventKind::Int(index.to_string()));
        events.push(EventKind::ArrayGet("a".into()));
        events.push(EventKind::Assign("x".into()));
        let result = run(events);

        if index < 0 || index >= length as i64 {
            let is_match = matches!(
                result,
                Err(Error::IndexOutOfRange { index: i, length: l, .. })
                    if i == index && l == length
            );
            prop_assert!(is_match);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn element_store_type_is_checked_for_any_index(
        length in 1usize..8,
        index in -8i64..8,
    ) {
        let mut events = int_array_events(length);
        events.push(EventKind::Int(index.to_string()));
        events.push(EventKind::Double("1.0".into()));
        events.push(EventKind::ArraySet("a".into()));
        // The element type check fires before index validation.
        let err = run(events).unwrap_err();
        let is_match = matches!(err, Error::TypeMismatch { .. });
        prop_assert!(is_match);
    }
}

// =============================================================================
// ROBUSTNESS
// =============================================================================

proptest! {
    #[test]
    fn arbitrary_literal_texts_never_panic(
        text in arbitrary_literal_text(),
        ty in numeric_type(),
    ) {
        // Literal texts arrive pre-resolved from the driver; junk texts flow
        // into the output or fail, but must never panic.
        let mut translator = Translator::new();
        let _ = translator.handle(Event::at(1, literal_for(ty, text)));
        let _ = translator.handle(Event::at(1, EventKind::Assign("x".into())));
        let _ = translator.finish();
    }

    #[test]
    fn unknown_names_error_instead_of_panicking(
        name in prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,12}").unwrap(),
    ) {
        let err = run(vec![EventKind::Ident(name.clone())]).unwrap_err();
        prop_assert_eq!(err, Error::UnknownSymbol { line: 1, name });
    }

    #[test]
    fn operator_events_on_an_empty_stack_never_panic(
        op in prop_oneof![
            Just(EventKind::Add),
            Just(EventKind::And),
            Just(EventKind::Not),
            Just(EventKind::Return),
            Just(EventKind::ArrayElem),
            Just(EventKind::CastInt),
        ],
    ) {
        let err = run(vec![op]).unwrap_err();
        let is_match = matches!(err, Error::MalformedWalk { .. });
        prop_assert!(is_match);
    }
}
