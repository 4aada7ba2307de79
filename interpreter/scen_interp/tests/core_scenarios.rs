//! End-to-end tests: a world with the core fetcher registry, driven
//! through expressions the way a scenario script would produce them.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests can panic")]

use pretty_assertions::assert_eq;
use scen_interp::assertions::assertion_commands;
use scen_interp::core_values::{
    get_address_v, get_array_v, get_bool_v, get_map_v, get_number_v, get_percent_v,
};
use scen_interp::{
    core_fetchers, dispatch_command, get_core_value, Decimal, Expr, FetcherRegistry, ScenErrorKind,
    ScenarioWorld, Value,
};

const UINT256_MAX: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639935";

struct TestWorld {
    registry: FetcherRegistry<TestWorld>,
}

impl ScenarioWorld for TestWorld {
    fn fetcher_registry(&self) -> &FetcherRegistry<Self> {
        &self.registry
    }
}

fn world() -> TestWorld {
    TestWorld {
        registry: FetcherRegistry::new(core_fetchers()),
    }
}

fn a(text: &str) -> Expr {
    Expr::atom(text)
}

fn l(items: Vec<Expr>) -> Expr {
    Expr::list(items)
}

fn num(text: &str) -> Value {
    Value::number(Decimal::parse(text).unwrap())
}

#[test]
fn exactly_resolves_a_strict_number() {
    let w = world();
    let value = get_core_value(&w, &l(vec![a("Exactly"), a("5.0")])).unwrap();
    assert_eq!(value, num("5"));
}

#[test]
fn uint256_max_round_trips_through_the_registry() {
    let w = world();
    let value = get_core_value(&w, &a("UInt256Max")).unwrap();
    assert_eq!(value.to_string(), UINT256_MAX);
}

#[test]
fn over_bracketed_fetch_resolves_identically() {
    let w = world();
    let flat = get_core_value(&w, &l(vec![a("Exactly"), a("7")])).unwrap();
    let wrapped = get_core_value(&w, &l(vec![l(vec![a("Exactly"), a("7")])])).unwrap();
    assert_eq!(flat, wrapped);
}

#[test]
fn list_resolves_elements_in_order() {
    let w = world();
    let expr = l(vec![
        a("List"),
        l(vec![a("Exactly"), a("1")]),
        l(vec![a("Exactly"), a("2")]),
        l(vec![a("Exactly"), a("3")]),
    ]);
    let value = get_core_value(&w, &expr).unwrap();
    assert_eq!(value, Value::List(vec![num("1"), num("2"), num("3")]));
}

#[test]
fn equal_compares_through_the_value_algebra() {
    let w = world();
    let eq = l(vec![a("Equal"), l(vec![a("Exactly"), a("0")]), a("Zero")]);
    assert_eq!(get_core_value(&w, &eq), Ok(Value::Bool(true)));
    let ne = l(vec![a("Equal"), a("Zero"), l(vec![a("Exactly"), a("1")])]);
    assert_eq!(get_core_value(&w, &ne), Ok(Value::Bool(false)));
}

#[test]
fn precisely_rounds_to_the_literal_significant_figures() {
    let w = world();
    let expr = l(vec![
        a("Equal"),
        l(vec![a("Exactly"), a("5.1004")]),
        l(vec![a("Precisely"), a("5.1")]),
    ]);
    assert_eq!(get_core_value(&w, &expr), Ok(Value::Bool(true)));
}

#[test]
fn anything_and_nothing_behave_asymmetrically() {
    let w = world();
    let anything = l(vec![a("Equal"), a("Anything"), l(vec![a("Exactly"), a("7")])]);
    assert_eq!(get_core_value(&w, &anything), Ok(Value::Bool(true)));
    let nothing = l(vec![a("Equal"), a("Nothing"), a("Nothing")]);
    assert_eq!(get_core_value(&w, &nothing), Ok(Value::Bool(false)));
}

#[test]
fn exp_scales_by_the_mantissa() {
    let w = world();
    let expr = l(vec![
        a("Equal"),
        l(vec![a("Exp"), a("1")]),
        l(vec![a("Exactly"), a("1000000000000000000")]),
    ]);
    assert_eq!(get_core_value(&w, &expr), Ok(Value::Bool(true)));
    let neg = l(vec![
        a("Equal"),
        l(vec![a("Neg"), a("5")]),
        l(vec![a("Exactly"), a("-5")]),
    ]);
    assert_eq!(get_core_value(&w, &neg), Ok(Value::Bool(true)));
}

#[test]
fn some_and_little_are_scaled_constants() {
    let w = world();
    assert_eq!(
        get_core_value(&w, &a("Some")),
        Ok(num("100000000000000000000"))
    );
    assert_eq!(get_core_value(&w, &a("Little")), Ok(num("1000000000000")));
}

#[test]
fn time_converters_scale_to_seconds() {
    let w = world();
    let cases = [
        ("Minutes", "2", "120"),
        ("Hours", "1.5", "5400"),
        ("Days", "2", "172800"),
        ("Weeks", "1", "604800"),
        ("Years", "1", "31536000"),
    ];
    for (name, amount, seconds) in cases {
        let expr = l(vec![a(name), a(amount)]);
        assert_eq!(get_core_value(&w, &expr), Ok(num(seconds)), "{name}");
    }
}

#[test]
fn hex_returns_the_literal_as_a_string() {
    let w = world();
    let expr = l(vec![a("Hex"), a("0xffff")]);
    assert_eq!(get_core_value(&w, &expr), Ok(Value::string("0xffff")));
}

#[test]
fn address_fetcher_validates_its_argument() {
    let w = world();
    let addr = "0xA16081F360e3847006dB660bae1c6d1b2e17eC2A";
    let expr = l(vec![a("Address"), a(addr)]);
    assert_eq!(get_core_value(&w, &expr), Ok(Value::address(addr)));
    let bad = l(vec![a("Address"), a("0x123")]);
    assert!(get_core_value(&w, &bad).is_err());
}

#[test]
fn default_short_circuits_on_truthy_values() {
    let w = world();
    let falsy = l(vec![a("Default"), a("Zero"), l(vec![a("Exactly"), a("5")])]);
    assert_eq!(get_core_value(&w, &falsy), Ok(num("5")));
    let truthy = l(vec![
        a("Default"),
        l(vec![a("Exactly"), a("2")]),
        l(vec![a("Exactly"), a("5")]),
    ]);
    assert_eq!(get_core_value(&w, &truthy), Ok(num("2")));
}

#[test]
fn unknown_fetcher_reports_the_registry_kind() {
    let w = world();
    match get_core_value(&w, &a("Bogus")) {
        Ok(value) => panic!("resolved {value}"),
        Err(err) => match err.kind {
            ScenErrorKind::UnknownDescriptor { kind, .. } => assert_eq!(kind, "Core"),
            other => panic!("unexpected error: {other}"),
        },
    }
}

#[test]
fn number_literal_failure_beats_the_dispatch_failure() {
    // "5x" is not a number and not a fetcher; the local parse error wins.
    let w = world();
    match get_number_v(&w, &a("5x")) {
        Ok(value) => panic!("resolved {value}"),
        Err(err) => assert!(matches!(err.kind, ScenErrorKind::NotANumber { .. })),
    }
}

#[test]
fn bool_literals_and_fetchers_both_resolve() {
    let w = world();
    assert_eq!(get_bool_v(&w, &a("t")), Ok(Value::Bool(true)));
    assert_eq!(get_bool_v(&w, &a("0")), Ok(Value::Bool(false)));
    assert_eq!(get_bool_v(&w, &l(vec![a("True")])), Ok(Value::Bool(true)));
}

#[test]
fn address_coerces_from_string_values() {
    let w = world();
    let addr = "0xA16081F360e3847006dB660bae1c6d1b2e17eC2A";
    assert_eq!(get_address_v(&w, &a(addr)), Ok(Value::address(addr)));
    let via_string = l(vec![a("String"), a(addr)]);
    assert_eq!(get_address_v(&w, &via_string), Ok(Value::address(addr)));
}

#[test]
fn maps_keep_entry_order_and_resolve_nested_values() {
    let w = world();
    let expr = l(vec![
        l(vec![a("name"), a("alice")]),
        l(vec![a("balance"), l(vec![a("Exactly"), a("5")])]),
    ]);
    let value = get_map_v(&w, &expr).unwrap();
    assert_eq!(
        value,
        Value::Map(vec![
            ("name".to_string(), Value::string("alice")),
            ("balance".to_string(), num("5")),
        ])
    );
}

#[test]
fn arrays_resolve_elementwise_and_skip_the_list_marker() {
    let w = world();
    let expr = l(vec![a("List"), a("1"), a("2"), a("3")]);
    let value = get_array_v(&w, &expr, get_number_v).unwrap();
    assert_eq!(value, Value::Array(vec![num("1"), num("2"), num("3")]));
}

#[test]
fn percent_is_a_scaled_number() {
    let w = world();
    let value = get_percent_v(&w, &a("1")).unwrap();
    assert_eq!(value, Value::percent(Decimal::pow10(18)));
    assert!(value.compare_to(&num("1000000000000000000")).unwrap());
}

#[test]
fn assertion_views_run_without_an_actor() {
    let commands = assertion_commands::<TestWorld>();
    let pass = l(vec![
        a("Equal"),
        l(vec![a("Exactly"), a("5")]),
        l(vec![a("Exactly"), a("5")]),
    ]);
    assert!(dispatch_command("Assertion", &commands, world(), &pass, None).is_ok());

    let fail = l(vec![
        a("Equal"),
        l(vec![a("Exactly"), a("5")]),
        l(vec![a("Exactly"), a("6")]),
    ]);
    match dispatch_command("Assertion", &commands, world(), &fail, None) {
        Ok(_) => panic!("assertion passed"),
        Err(err) => assert!(matches!(err.kind, ScenErrorKind::AssertionFailed { .. })),
    }

    let truthy = l(vec![a("True"), l(vec![a("True")])]);
    assert!(dispatch_command("Assertion", &commands, world(), &truthy, None).is_ok());
    let falsy = l(vec![a("False"), l(vec![a("False")])]);
    assert!(dispatch_command("Assertion", &commands, world(), &falsy, None).is_ok());
}

#[test]
fn boolean_views_follow_the_status_code_mapping() {
    let commands = assertion_commands::<TestWorld>();
    // A zero status code reads as success, a one as failure.
    let zero_is_true = l(vec![a("True"), l(vec![a("Exactly"), a("0")])]);
    assert!(dispatch_command("Assertion", &commands, world(), &zero_is_true, None).is_ok());
    let one_is_false = l(vec![a("False"), l(vec![a("Exactly"), a("1")])]);
    assert!(dispatch_command("Assertion", &commands, world(), &one_is_false, None).is_ok());

    let one_as_true = l(vec![a("True"), l(vec![a("Exactly"), a("1")])]);
    match dispatch_command("Assertion", &commands, world(), &one_as_true, None) {
        Ok(_) => panic!("status code 1 read as true"),
        Err(err) => assert!(matches!(err.kind, ScenErrorKind::AssertionFailed { .. })),
    }
    let zero_as_false = l(vec![a("False"), a("Zero")]);
    match dispatch_command("Assertion", &commands, world(), &zero_as_false, None) {
        Ok(_) => panic!("status code 0 read as false"),
        Err(err) => assert!(matches!(err.kind, ScenErrorKind::AssertionFailed { .. })),
    }
}

#[test]
fn infix_comparison_views_dispatch_on_the_second_token() {
    let commands = assertion_commands::<TestWorld>();
    let less = l(vec![
        l(vec![a("Exactly"), a("1")]),
        a("LessThan"),
        l(vec![a("Exactly"), a("2")]),
    ]);
    assert!(dispatch_command("Assertion", &commands, world(), &less, None).is_ok());

    let not_less = l(vec![
        l(vec![a("Exactly"), a("2")]),
        a("LessThan"),
        l(vec![a("Exactly"), a("2")]),
    ]);
    match dispatch_command("Assertion", &commands, world(), &not_less, None) {
        Ok(_) => panic!("2 less than 2 passed"),
        Err(err) => assert!(matches!(err.kind, ScenErrorKind::AssertionFailed { .. })),
    }

    let greater = l(vec![
        l(vec![a("Exactly"), a("3")]),
        a("GreaterThan"),
        l(vec![a("Exactly"), a("2")]),
    ]);
    assert!(dispatch_command("Assertion", &commands, world(), &greater, None).is_ok());
}

#[test]
fn approx_checks_relative_tolerance() {
    let commands = assertion_commands::<TestWorld>();
    let close = l(vec![
        a("Approx"),
        l(vec![a("Exactly"), a("1000")]),
        l(vec![a("Exactly"), a("1000.5")]),
    ]);
    assert!(dispatch_command("Assertion", &commands, world(), &close, None).is_ok());

    let far = l(vec![
        a("Approx"),
        l(vec![a("Exactly"), a("1000")]),
        l(vec![a("Exactly"), a("1002")]),
    ]);
    match dispatch_command("Assertion", &commands, world(), &far, None) {
        Ok(_) => panic!("outside the default tolerance passed"),
        Err(err) => assert!(matches!(err.kind, ScenErrorKind::AssertionFailed { .. })),
    }

    let loose = l(vec![
        a("Approx"),
        l(vec![a("Exactly"), a("1000")]),
        l(vec![a("Exactly"), a("1002")]),
        l(vec![a("Exactly"), a("0.01")]),
    ]);
    assert!(dispatch_command("Assertion", &commands, world(), &loose, None).is_ok());

    let both_zero = l(vec![a("Approx"), l(vec![a("Exactly"), a("0")]), a("Zero")]);
    assert!(dispatch_command("Assertion", &commands, world(), &both_zero, None).is_ok());
}
