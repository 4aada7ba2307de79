use super::*;
use crate::errors::ScenErrorKind;
use pretty_assertions::assert_eq;
use std::cmp::Ordering;

fn num(text: &str) -> Value {
    match Decimal::parse(text) {
        Ok(d) => Value::number(d),
        Err(err) => panic!("parse {text}: {err}"),
    }
}

fn precise(text: &str, figs: u32) -> Value {
    match Decimal::parse(text) {
        Ok(d) => Value::precise(d, figs),
        Err(err) => panic!("parse {text}: {err}"),
    }
}

fn eq(a: &Value, b: &Value) -> bool {
    match a.compare_to(b) {
        Ok(result) => result,
        Err(err) => panic!("compare {a} with {b}: {err}"),
    }
}

fn incomparable(a: &Value, b: &Value) {
    match a.compare_to(b) {
        Ok(result) => panic!("compared {a} with {b}: {result}"),
        Err(err) => assert!(
            matches!(err.kind, ScenErrorKind::Incomparable { .. }),
            "unexpected error comparing {a} with {b}: {err}"
        ),
    }
}

#[test]
fn truthiness_table() {
    assert!(Value::Bool(true).truthy());
    assert!(!Value::Bool(false).truthy());
    assert!(Value::string("x").truthy());
    assert!(!Value::string("").truthy());
    assert!(num("5").truthy());
    assert!(!num("0").truthy());
    assert!(!precise("0", 3).truthy());
    assert!(Value::address("0xA16081F360e3847006dB660bae1c6d1b2e17eC2A").truthy());
    assert!(!Value::address("0x0000000000000000000000000000000000000000").truthy());
    assert!(Value::Map(vec![("k".to_string(), num("1"))]).truthy());
    assert!(!Value::Map(vec![]).truthy());
    assert!(Value::List(vec![num("1")]).truthy());
    assert!(!Value::Array(vec![]).truthy());
    assert!(Value::Event(scen_expr::Expr::atom("x")).truthy());
    assert!(!Value::Event(scen_expr::Expr::list(vec![])).truthy());
    assert!(Value::Anything.truthy());
    assert!(!Value::Nothing.truthy());
}

#[test]
fn number_comparisons_are_exact() {
    assert!(eq(&num("5.0"), &num("5")));
    assert!(!eq(&num("5.0001"), &num("5")));
    let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
    assert!(eq(&num(max), &num(max)));
    assert!(!eq(&num(max), &num("115792089237316195423570985008687907853269984665640564039457584007913129639934")));
}

#[test]
fn number_precise_rounds_to_sig_figs() {
    assert!(eq(&num("5.1004"), &precise("5.1", 2)));
    assert!(!eq(&num("5.16"), &precise("5.1", 2)));
    assert!(eq(&precise("5.1", 2), &num("5.1004")));
    // Precise↔Precise uses the smaller precision.
    assert!(eq(&precise("5.1004", 5), &precise("5.1", 2)));
}

#[test]
fn number_string_parses_the_string() {
    assert!(eq(&num("100000000000000000000"), &Value::string("1e20")));
    assert!(eq(&Value::string("5.5"), &num("5.5")));
    incomparable(&num("5"), &Value::string("five"));
}

#[test]
fn bool_number_uses_status_code_mapping() {
    // 0 is success, i.e. true; 1 is failure, i.e. false.
    assert!(eq(&Value::Bool(true), &num("0")));
    assert!(eq(&num("0"), &Value::Bool(true)));
    assert!(eq(&Value::Bool(false), &num("1")));
    assert!(!eq(&Value::Bool(true), &num("1")));
    incomparable(&Value::Bool(true), &num("2"));
}

#[test]
fn bool_string_accepts_only_literals() {
    assert!(eq(&Value::Bool(true), &Value::string("true")));
    assert!(eq(&Value::string("False"), &Value::Bool(false)));
    incomparable(&Value::Bool(true), &Value::string("yes"));
}

#[test]
fn address_comparison_is_case_insensitive() {
    let checksummed = Value::address("0xA16081F360e3847006dB660bae1c6d1b2e17eC2A");
    let lower = Value::address("0xa16081f360e3847006db660bae1c6d1b2e17ec2a");
    assert!(eq(&checksummed, &lower));
    assert!(eq(&checksummed, &Value::string("0xa16081f360e3847006db660bae1c6d1b2e17ec2a")));
    assert!(eq(&Value::string("0xA16081F360E3847006DB660BAE1C6D1B2E17EC2A"), &lower));
    assert!(!eq(&lower, &Value::address("0x0000000000000000000000000000000000000000")));
}

#[test]
fn list_array_compare_elementwise_with_nothing_padding() {
    let list = Value::List(vec![num("1"), num("2")]);
    let array = Value::Array(vec![num("1"), num("2")]);
    assert!(eq(&list, &array));
    assert!(eq(&array, &list));
    // The shorter side pads with Nothing, which matches nothing...
    let longer = Value::Array(vec![num("1"), num("2"), num("3")]);
    assert!(!eq(&list, &longer));
    // ...unless the trailing element is itself nothing-equal.
    let padded = Value::Array(vec![num("1"), num("2"), Value::Anything]);
    assert!(eq(&list, &padded));
}

#[test]
fn anything_matches_everything_nothing_matches_nothing() {
    assert!(eq(&Value::Anything, &num("5")));
    assert!(eq(&Value::Map(vec![]), &Value::Anything));
    assert!(eq(&Value::Anything, &Value::Nothing));
    assert!(!eq(&Value::Nothing, &num("5")));
    assert!(!eq(&Value::Nothing, &Value::Nothing));
}

#[test]
fn pairs_outside_the_matrix_are_incomparable() {
    let map = Value::Map(vec![]);
    incomparable(&map, &map.clone());
    let event = Value::Event(scen_expr::Expr::atom("x"));
    incomparable(&event, &event.clone());
    incomparable(&Value::Bool(true), &Value::address("0x00"));
    incomparable(&num("1"), &Value::List(vec![]));
    incomparable(&Value::string("x"), &Value::Map(vec![]));
}

#[test]
fn ordering_is_strictly_numeric() {
    let less = num("1").compare_order(&num("2"));
    assert_eq!(less, Ok(Ordering::Less));
    assert_eq!(num("2").compare_order(&num("2")), Ok(Ordering::Equal));
    assert_eq!(num("3").compare_order(&precise("2.9", 2)), Ok(Ordering::Greater));
    assert_eq!(num("5.1004").compare_order(&precise("5.1", 2)), Ok(Ordering::Equal));
    assert!(Value::string("1").compare_order(&num("2")).is_err());
    assert!(Value::Bool(true).compare_order(&Value::Bool(false)).is_err());
    assert!(Value::Anything.compare_order(&num("1")).is_err());
}

#[test]
fn uint256_max_round_trips_through_number() {
    let text = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
    let value = num(text);
    assert_eq!(value.to_string(), text);
    match value.as_number() {
        Some(d) => assert_eq!(d.to_string(), text),
        None => panic!("not a number"),
    }
}

#[test]
fn kind_reporting() {
    assert_eq!(num("1").kind(), ValueKind::Number);
    assert_eq!(Value::exp_number(Decimal::pow10(18)).kind(), ValueKind::Number);
    assert_eq!(Value::percent(Decimal::pow10(17)).kind(), ValueKind::Number);
    assert_eq!(precise("1", 1).kind(), ValueKind::Precise);
    assert_eq!(Value::Nothing.kind(), ValueKind::Nothing);
    assert_eq!(ValueKind::Str.to_string(), "String");
}
