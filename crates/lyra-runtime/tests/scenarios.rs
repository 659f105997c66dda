use lyra_runtime::{BufferSink, Interpreter};
use lyra_source::DiagnosticSink;

fn run(source: &str) -> (String, DiagnosticSink) {
    let mut diagnostics = DiagnosticSink::new();
    let program = lyra_parser::parse(source, &mut diagnostics);
    lyra_analyzer::check(&program, &mut diagnostics);
    assert!(!diagnostics.had_error(), "unexpected diagnostics: {diagnostics:?}");

    let mut sink = BufferSink::default();
    if let Err(err) = Interpreter::interpret(&program, &mut sink) {
        diagnostics.report(err.into());
    }
    (sink.0, diagnostics)
}

#[test]
fn scenario_one_operator_precedence() {
    let (output, diagnostics) = run("print(1 + 2 * 3);");
    assert_eq!(output, "7");
    assert!(diagnostics.is_empty());
}

#[test]
fn scenario_two_variable_declarations() {
    let (output, _) = run("let x = 10;\nlet y = 20;\nprintln(x + y);");
    assert_eq!(output, "30\n");
}

#[test]
fn scenario_three_recursive_factorial() {
    let (output, _) = run(
        "fun factorial(n) { if n <= 1 { return 1; } return n * factorial(n - 1); } \
         println(factorial(5));",
    );
    assert_eq!(output, "120\n");
}

#[test]
fn scenario_four_while_loop_accumulation() {
    let (output, _) =
        run("let i = 0; let sum = 0; while i < 3 { sum = sum + i; i = i + 1; } println(sum);");
    assert_eq!(output, "3\n");
}

#[test]
fn scenario_five_short_circuit_avoids_division_by_zero() {
    let (output, diagnostics) = run("println(false and (5 / 0));");
    assert_eq!(output, "False\n");
    assert!(diagnostics.is_empty());
}

#[test]
fn floating_point_division_by_zero_is_a_runtime_error() {
    let mut diagnostics = DiagnosticSink::new();
    let program = lyra_parser::parse("println(1.0 / 0.0);", &mut diagnostics);
    lyra_analyzer::check(&program, &mut diagnostics);
    assert!(!diagnostics.had_error());

    let mut sink = BufferSink::default();
    let err = Interpreter::interpret(&program, &mut sink).unwrap_err();
    assert_eq!(err.to_string(), "Division by zero");
}

#[test]
fn zero_is_truthy_unlike_false_and_null() {
    let (output, _) = run("if 0 { println(\"zero is truthy\"); } else { println(\"unreachable\"); }");
    assert_eq!(output, "zero is truthy\n");
}

#[test]
fn scenario_six_assignment_to_undeclared_name_is_caught_before_it_runs() {
    let mut diagnostics = DiagnosticSink::new();
    let program = lyra_parser::parse("y = 42;", &mut diagnostics);
    lyra_analyzer::check(&program, &mut diagnostics);
    assert!(diagnostics.had_error());
}

#[test]
fn undeclared_variable_read_is_a_runtime_error_when_unchecked() {
    let mut diagnostics = DiagnosticSink::new();
    let program = lyra_parser::parse("println(y);", &mut diagnostics);
    // Interpreting without running the checker first: `y` is read, not
    // assigned, so nothing catches it statically here, and the
    // interpreter reports the missing binding itself.
    let mut sink = BufferSink::default();
    let err = Interpreter::interpret(&program, &mut sink).unwrap_err();
    assert_eq!(err.to_string(), "Undefined variable 'y'");
}

#[test]
fn scenario_seven_forward_reference_and_string_conversion() {
    let (output, _) = run(
        "fun a() -> Int { return b(); } fun b() -> Int { return 1; } println(string(a()));",
    );
    assert_eq!(output, "1\n");
}

#[test]
fn user_defined_function_shadowed_name_does_not_collide_with_builtins() {
    let (output, _) = run("let string = 5; println(string);");
    assert_eq!(output, "5\n");
}
