use lyra_ast::Stmt;
use lyra_parser::parse;
use lyra_source::DiagnosticSink;

#[test]
fn seed_scenario_while_loop_parses_to_a_single_while_statement() {
    let source = "let i = 0; let sum = 0; while i < 3 { sum = sum + i; i = i + 1; } println(sum);";
    let mut diagnostics = DiagnosticSink::new();
    let program = parse(source, &mut diagnostics);

    assert!(diagnostics.is_empty());
    assert_eq!(program.len(), 4);
    match &program[2] {
        Stmt::While { body, .. } => match body.as_ref() {
            Stmt::Block { stmts, .. } => assert_eq!(stmts.len(), 2),
            other => panic!("expected Block body, got {other:?}"),
        },
        other => panic!("expected While, got {other:?}"),
    }
}

#[test]
fn unterminated_block_does_not_infinite_loop() {
    let mut diagnostics = DiagnosticSink::new();
    let program = parse("fun f() { let x = 1;", &mut diagnostics);
    assert!(diagnostics.had_error());
    let _ = program;
}

#[test]
fn short_circuit_source_parses_without_evaluating_anything() {
    let mut diagnostics = DiagnosticSink::new();
    let program = parse("println(false and (5 / 0));", &mut diagnostics);
    assert!(diagnostics.is_empty());
    assert_eq!(program.len(), 1);
}

#[test]
fn every_statement_span_covers_its_expression_span() {
    let mut diagnostics = DiagnosticSink::new();
    let program = parse("let x = 1 + 2;", &mut diagnostics);
    match &program[0] {
        Stmt::LetDecl { init, span, .. } => {
            assert!(span.start.offset <= init.span().start.offset);
            assert!(span.end.offset >= init.span().end.offset);
        }
        other => panic!("expected LetDecl, got {other:?}"),
    }
}
