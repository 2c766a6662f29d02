//! End-to-end tests driving the Opal front end through the public facade.

use opal::ast::{BinaryOp, Expr, LiteralKind, Stmt, TypeSuffix};
use opal::{Bump, DiagCode, Lexer, Parser, Severity, TokenKind};

// =============================================================================
// Lexer
// =============================================================================

#[test]
fn token_stream_always_ends_with_eof() {
    let arena = Bump::new();
    for source in ["", "nop;", "var x", "0x", "\"unterminated"] {
        let (tokens, _) = Lexer::tokenize(source, &arena);
        assert_eq!(
            tokens.last().map(|t| t.kind),
            Some(TokenKind::Eof),
            "{source:?}"
        );
    }
}

#[test]
fn greedy_left_angle_family() {
    let arena = Bump::new();
    let (tokens, errors) = Lexer::tokenize("< << <<< <<<< <<<<=", &arena);
    assert!(errors.is_empty());

    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Less,
            TokenKind::LessLess,
            TokenKind::LessLessLess,
            TokenKind::LessLessLessLess,
            TokenKind::LessLessLessLessEqual,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn literal_spans_cover_consumed_bytes() {
    // Single line, pure ASCII, so a token's byte offset is its column - 1.
    let source = r#"1_000 0xFF 2.5(25) "He" 'l' "lo" -42"#;
    let arena = Bump::new();
    let (tokens, errors) = Lexer::tokenize(source, &arena);
    assert!(errors.is_empty());

    let mut last_end = 0;
    for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
        let start = (token.span.col - 1) as usize;
        assert!(start >= last_end, "tokens must not overlap");
        assert!(token.span.len > 0);
        last_end = start + token.span.len as usize;
    }
    assert_eq!(last_end, source.len());
}

#[test]
fn rescan_of_decoded_numbers_is_identical() {
    let arena = Bump::new();
    let (first, _) = Lexer::tokenize("1_000 0xFF 2.5(25) -42", &arena);

    // The decoded text of every literal lexes back to the same text.
    for token in first.iter().filter(|t| t.kind.is_literal()) {
        let (again, errors) = Lexer::tokenize(token.text, &arena);
        assert!(errors.is_empty(), "{:?}", token.text);
        assert_eq!(again[0].kind, token.kind);
        assert_eq!(again[0].text, token.text);
    }
}

#[test]
fn malformed_number_reports_once_and_resumes() {
    let arena = Bump::new();
    let (tokens, errors) = Lexer::tokenize("0x nop;", &arena);

    assert_eq!(errors.len(), 1);
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Error,
            TokenKind::Identifier,
            TokenKind::Nop,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn string_concatenation_collapses_to_one_token() {
    let arena = Bump::new();
    let (tokens, errors) = Lexer::tokenize(r#""He" 'l' "lo""#, &arena);

    assert!(errors.is_empty());
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].text, "Hello");
}

// =============================================================================
// Parser
// =============================================================================

#[test]
fn multiplication_binds_tighter_than_addition() {
    let arena = Bump::new();
    let expr = Parser::expression("1 + 2 * 3", &arena).unwrap();

    let Expr::Binary(add) = expr else {
        panic!("expected binary, got {expr:?}");
    };
    assert_eq!(add.op, BinaryOp::Add);
    assert!(matches!(add.right, Expr::Binary(mul) if mul.op == BinaryOp::Mul));
}

#[test]
fn subtraction_associates_left() {
    let arena = Bump::new();
    let expr = Parser::expression("a - b - c", &arena).unwrap();

    let Expr::Binary(outer) = expr else {
        panic!("expected binary, got {expr:?}");
    };
    assert!(matches!(outer.left, Expr::Binary(inner) if inner.op == BinaryOp::Sub));
}

#[test]
fn cast_versus_parenthesized_expression() {
    let arena = Bump::new();
    assert!(matches!(
        Parser::expression("(int) x", &arena).unwrap(),
        Expr::Cast(_)
    ));
    assert!(matches!(
        Parser::expression("(x + 1)", &arena).unwrap(),
        Expr::Paren(_)
    ));
}

#[test]
fn indirection_prefixes_in_expressions_and_types() {
    let arena = Bump::new();

    let Expr::Ident(ptr) = Parser::expression("@@x", &arena).unwrap() else {
        panic!("expected ident");
    };
    assert_eq!(ptr.indirection.pointer_depth(), 2);

    let Expr::Ident(reference) = Parser::expression("&x", &arena).unwrap() else {
        panic!("expected ident");
    };
    assert_eq!(reference.indirection.reference_depth(), 1);

    let ty = Parser::type_expr("const @@Buffer<32>", &arena).unwrap();
    assert!(ty.is_const());
    assert_eq!(ty.pointer_depth(), 2);
    assert_eq!(ty.fixed_size(), Some(32));
}

#[test]
fn concatenated_string_parses_as_one_literal() {
    let arena = Bump::new();
    let expr = Parser::expression(r#""He" 'l' "lo""#, &arena).unwrap();
    assert!(matches!(
        expr,
        Expr::Literal(lit) if lit.kind == LiteralKind::Str("Hello")
    ));
}

#[test]
fn independent_errors_each_get_one_diagnostic() {
    let arena = Bump::new();
    let source = "nop;\nvar x: int = ;\nhalt;\nsignal;\npush 1;";
    let (program, diagnostics) = Parser::parse_lenient(source, &arena);

    assert_eq!(diagnostics.len(), 2, "{diagnostics}");
    // Every valid statement survives recovery.
    assert_eq!(program.stmts().len(), 3);
    assert!(matches!(program.stmts()[0], Stmt::Nop(_)));
    assert!(matches!(program.stmts()[1], Stmt::Halt(_)));
    assert!(matches!(program.stmts()[2], Stmt::Push(_)));
}

#[test]
fn lenient_mode_surfaces_lexer_and_parser_errors_together() {
    let arena = Bump::new();
    let source = "var x: int = 0x;\nvar y: int = ;";
    let (_, diagnostics) = Parser::parse_lenient(source, &arena);

    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == DiagCode::InvalidNumber)
    );
    assert!(
        diagnostics
            .iter()
            .any(|d| d.code == DiagCode::ExpectedExpression)
    );
}

#[test]
fn program_exercising_every_statement_form() {
    let arena = Bump::new();
    let source = r#"
        struct Pair {
            var first: int;
            var second: int;
        }

        class Machine {
            var state: (int, @byte);
            var slots[4]: List<n + 1>;
        }

        const limit: int = 255;

        func swap(p: @Pair): void {
            push p.first;
            p.first = p.second;
            pop p.second;
        }

        func main(): int {
            var p: Pair;
            {p.first, p.second} = init();
            .again:
            if (p.first < limit) {
                p.first++;
                jump again;
            } else {
                signal 1, p.first;
            }
            free p;
            return p.first, p.second;
        }

        nop;
        halt;
    "#;

    let program = match Parser::parse(source, &arena) {
        Ok(program) => program,
        Err(diagnostics) => panic!("{diagnostics}"),
    };
    assert_eq!(program.stmts().len(), 7);
}

#[test]
fn type_generic_arguments_are_expressions() {
    let arena = Bump::new();
    let ty = Parser::type_expr("List<n + 1, m>", &arena).unwrap();
    assert!(matches!(ty.suffix, Some(TypeSuffix::Args(args)) if args.len() == 2));
}

#[test]
fn errors_carry_severity_and_render_with_source() {
    let arena = Bump::new();
    let source = "var x: int = ;";
    let diagnostics = Parser::parse(source, &arena).unwrap_err();

    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.severity, Severity::Error);

    let rendered = diag.display_with_source(source);
    assert!(rendered.contains('^'), "{rendered}");
    assert!(rendered.contains(source.trim()), "{rendered}");
}
