//! Integration tests for the FitLang pipeline.

use fitlang::codegen::Target;
use fitlang::prelude::*;
use fitlang::utils::SourceMap;
use fitlang::{compile, parse, parse_and_analyze};

const PROGRAM: &str = r#"
    ClientProfile Daniel;
    ClientProfile Maria;

    assign legs to Daniel {
        Monday {
            exercise: "squats" | sets: 3 | rest: 1;
            exercise: "lunges" | rest: 2 | sets: 4;
        }
        Thursday { }
    };

    assign upper to Maria {
        Tuesday { exercise: "bench press" | sets: 5 | rest: 3 }
    };

    showPlans(Daniel);
    showPlans(Maria);
"#;

#[test]
fn test_full_pipeline() {
    let program = parse(PROGRAM).expect("Failed to parse");
    assert_eq!(program.statements.len(), 6);
    assert_eq!(program.clients().count(), 2);
    assert_eq!(program.assignments().count(), 2);

    let plans: Vec<&str> = program.plans_for("Daniel").map(|p| p.name.as_str()).collect();
    assert_eq!(plans, vec!["legs"]);

    let legs = program.plans_for("Daniel").next().unwrap();
    assert_eq!(legs.days.len(), 2);
    assert_eq!(legs.days[0].name, Weekday::Monday);
    assert_eq!(legs.days[1].name, Weekday::Thursday);
    assert!(legs.days[1].exercises.is_empty());
    assert_eq!(legs.exercise_count(), 2);

    let lunges = &legs.days[0].exercises[1];
    assert_eq!((lunges.sets, lunges.rest), (4, 2));
}

#[test]
fn test_symbol_table_after_analysis() {
    let analyzed = parse_and_analyze(PROGRAM).expect("Failed to analyze");
    let symbols = analyzed.symbols();

    assert_eq!(symbols.lookup("Daniel").map(|s| s.kind), Some(SymbolKind::Client));
    assert_eq!(symbols.lookup("legs").map(|s| s.kind), Some(SymbolKind::Plan));
    assert_eq!(symbols.of_kind(SymbolKind::Client).count(), 2);
    assert_eq!(symbols.of_kind(SymbolKind::Plan).count(), 2);
    assert!(!symbols.contains("Monday"));
}

#[test]
fn test_generated_call_script() {
    let code = compile(PROGRAM, &CompileConfig::default()).expect("Failed to compile");
    let expected = "\
CreateClientProfile('Daniel');
CreateClientProfile('Maria');
CreatePlan('legs');
    AddDay('Monday');
        AddExercise('squats', 3, 1);
        AddExercise('lunges', 4, 2);
    AddDay('Thursday');
AssignPlan('Daniel', 'legs');
CreatePlan('upper');
    AddDay('Tuesday');
        AddExercise('bench press', 5, 3);
AssignPlan('Maria', 'upper');
ShowPlans('Daniel');
ShowPlans('Maria');
";
    assert_eq!(code, expected);
}

#[test]
fn test_custom_indentation() {
    let config = CompileConfig {
        indent_width: 2,
        ..CompileConfig::default()
    };
    let code = compile(PROGRAM, &config).unwrap();
    assert!(code.contains("\n  AddDay('Monday');\n"));
    assert!(code.contains("\n    AddExercise('squats', 3, 1);\n"));
}

#[test]
fn test_canonical_source_reparses() {
    let config = CompileConfig {
        target: Target::Source,
        ..CompileConfig::default()
    };
    let formatted = compile(PROGRAM, &config).unwrap();
    assert!(formatted.starts_with("ClientProfile Daniel;\n"));

    // Formatting is a fixed point and preserves the program.
    let again = compile(&formatted, &config).unwrap();
    assert_eq!(formatted, again);

    let direct = compile(PROGRAM, &CompileConfig::default()).unwrap();
    let reformatted = compile(&formatted, &CompileConfig::default()).unwrap();
    assert_eq!(direct, reformatted);
}

#[test]
fn test_json_round_trip() {
    let program = parse(PROGRAM).unwrap();
    let json = serde_json::to_string(&program).unwrap();
    let back: Program = serde_json::from_str(&json).unwrap();
    assert_eq!(program, back);
}

#[test]
fn test_syntax_error_reaches_caller() {
    let err = parse("ClientProfile Daniel").unwrap_err();
    let parse_err = err.downcast_ref::<ParseError>().expect("expected a ParseError");
    assert_eq!(parse_err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(parse_err.expected, vec![TokenKind::Semicolon]);
    assert!(parse_err.found.is_end());
}

#[test]
fn test_unterminated_plan() {
    let err = parse("ClientProfile D; assign p to D { Monday { }").unwrap_err();
    let parse_err = err.downcast_ref::<ParseError>().unwrap();
    assert_eq!(parse_err.kind, ParseErrorKind::UnterminatedBlock);
}

#[test]
fn test_lexer_error_reaches_caller() {
    let err = parse("ClientProfile Daniel = 3;").unwrap_err();
    let lex_err = err.downcast_ref::<LexerError>().expect("expected a LexerError");
    assert_eq!(lex_err.kind, LexerErrorKind::UnexpectedChar);
}

#[test]
fn test_semantic_errors() {
    let cases = [
        (
            "ClientProfile A; ClientProfile A;",
            SemanticErrorKind::RedeclarationOfSymbol,
            "A",
        ),
        (
            "assign p to Ghost { Monday { } };",
            SemanticErrorKind::UndefinedIdentifier,
            "Ghost",
        ),
        (
            r#"ClientProfile A; assign p to A { Monday { exercise: "row" | sets: 0 | rest: 1 } };"#,
            SemanticErrorKind::InvalidExerciseDefinition,
            "row",
        ),
        ("showPlans(Nobody);", SemanticErrorKind::UndefinedIdentifier, "Nobody"),
    ];

    for (source, kind, name) in cases {
        let err = parse_and_analyze(source).unwrap_err();
        let sem = err
            .downcast_ref::<SemanticError>()
            .unwrap_or_else(|| panic!("expected a SemanticError for {:?}", source));
        assert_eq!(sem.kind, kind, "source: {}", source);
        assert_eq!(sem.name, name, "source: {}", source);
    }
}

#[test]
fn test_first_semantic_error_stops_compilation() {
    let source = "showPlans(X); ClientProfile A; ClientProfile A;";
    let err = compile(source, &CompileConfig::default()).unwrap_err();
    let sem = err.downcast_ref::<SemanticError>().unwrap();
    assert_eq!(sem.kind, SemanticErrorKind::UndefinedIdentifier);
    assert_eq!(sem.name, "X");
}

#[test]
fn test_escaped_names_in_output() {
    let source = r#"
        ClientProfile A;
        assign p to A { Friday { exercise: "farmer's walk" | sets: 2 | rest: 1 } };
    "#;
    let code = compile(source, &CompileConfig::default()).unwrap();
    assert!(code.contains("AddExercise('farmer\\'s walk', 2, 1);"));
}

#[test]
fn test_error_span_points_into_source() {
    let source = "ClientProfile A;\nshowPlans(B);";
    let err = parse_and_analyze(source).unwrap_err();
    let sem = err.downcast_ref::<SemanticError>().unwrap();
    assert_eq!(sem.span.start_line, 2);

    let snippet = SourceMap::new(source).snippet(&sem.span).unwrap();
    assert!(snippet.contains("showPlans(B);"));
    assert!(snippet.contains('^'));
}

#[test]
fn test_unclosed_comment_stops_pipeline() {
    let source = "ClientProfile A; /* cut off here\nshowPlans(Ghost);";
    let err = compile(source, &CompileConfig::default()).unwrap_err();
    let lex_err = err.downcast_ref::<LexerError>().expect("expected a LexerError");
    assert_eq!(lex_err.kind, LexerErrorKind::UnterminatedComment);
}
