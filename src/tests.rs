/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Crate end-to-end tests over the public API.

use super::*;
use std::thread;

/// Tests opt into stage logging with `RUST_LOG=debug`.
fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn value_of(result: SolveResult) -> f64 {
    match result {
        SolveResult::Value(SolvedValue::Number(v)) => v,
        other => panic!("expected numeric value, got {other:?}"),
    }
}

fn failure_kind(result: SolveResult) -> ErrorKind {
    match result {
        SolveResult::Failure(failure) => failure.kind,
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn evaluates_arithmetic_expression() {
    init_logs();
    assert_eq!(value_of(solve_expression("2+3*4")), 14.0);
}

#[test]
fn solves_single_equation_to_assignment() {
    match solve_expression("x+2=5") {
        SolveResult::Assignments(assignments) => {
            assert_eq!(assignments.len(), 1);
            assert_eq!(assignments.get("x"), Some(&3.0));
        }
        other => panic!("expected assignments, got {other:?}"),
    }
}

#[test]
fn question_round_trip_matches_direct_expression() {
    assert_eq!(
        value_of(solve_question("What is 2+3?")),
        value_of(solve_expression("2+3"))
    );
}

#[test]
fn validator_failures_carry_stable_kinds() {
    assert_eq!(
        failure_kind(solve_expression("(2+3")),
        ErrorKind::UnbalancedParentheses
    );
    assert_eq!(
        failure_kind(solve_expression("2++3")),
        ErrorKind::MalformedOperatorSequence
    );
    assert_eq!(failure_kind(solve_expression("()")), ErrorKind::EmptyGroup);
    assert_eq!(
        failure_kind(solve_expression("2 @ 3")),
        ErrorKind::InvalidCharacter
    );
}

#[test]
fn validated_text_validates_idempotently() {
    // Anything the pipeline accepts must keep validating.
    let table = CorrectionTable::standard();
    for raw in ["2 × 3", "What", "(1+2)*3", "x²+1"] {
        let normalized = table.normalize(raw);
        if validate(&normalized).is_ok() {
            validate(&normalized).expect("validation must be idempotent");
        }
    }
}

#[test]
fn substitution_respects_token_boundaries_end_to_end() {
    // `a` must substitute standalone but not inside `max`.
    let request = SolveRequest::expression("max(a, 1) + a")
        .with_labels(vec![Label::new("a", 4.0)]);
    assert_eq!(value_of(solve(&request)), 8.0);
}

#[test]
fn negative_label_values_keep_precedence() {
    // 5 - b with b = -2 must be 7, not 3.
    let request = SolveRequest::expression("5 - b").with_labels(vec![Label::new("b", -2.0)]);
    assert_eq!(value_of(solve(&request)), 7.0);
}

#[test]
fn free_variables_stay_symbolic_in_equations() {
    // Only `x` is labeled; `y` remains the unknown to solve for.
    let request =
        SolveRequest::expression("y = x + 1").with_labels(vec![Label::new("x", 2.0)]);
    match solve(&request) {
        SolveResult::Assignments(assignments) => {
            assert_eq!(assignments.get("y"), Some(&3.0));
        }
        other => panic!("expected assignments, got {other:?}"),
    }
}

#[test]
fn system_of_equations_solves_both_unknowns() {
    match solve_expression("x+y=10, x-y=2") {
        SolveResult::Assignments(assignments) => {
            assert_eq!(assignments.keys().collect::<Vec<_>>(), ["x", "y"]);
            assert!((assignments["x"] - 6.0).abs() < 1e-9);
            assert!((assignments["y"] - 4.0).abs() < 1e-9);
        }
        other => panic!("expected assignments, got {other:?}"),
    }
}

#[test]
fn degree_mode_trig_evaluates_sin_thirty() {
    assert!((value_of(solve_expression("sin(30)")) - 0.5).abs() < 1e-9);
}

#[test]
fn ocr_noise_path_end_to_end() {
    // Unicode operators, bracket variants, superscripts, digit misreads.
    assert_eq!(value_of(solve_expression("[2l ÷ 3] × 3")), 21.0);
    assert_eq!(value_of(solve_expression("2² + 1")), 5.0);
}

#[test]
fn rectangle_area_and_circle_validation_match_registry_contract() {
    let rectangle = CalcRequest::new("Rectangle", "area", &[("l", 5.0), ("w", 3.0)]);
    assert_eq!(calculate(&rectangle).expect("area"), 15.0);

    let circle = CalcRequest::new("Circle", "area", &[("r", -1.0)]);
    assert_eq!(
        calculate(&circle).expect_err("negative radius").kind,
        ErrorKind::InvalidParameter
    );

    let hexagon = CalcRequest::new("Hexagon", "area", &[("s", 2.0)]);
    assert_eq!(
        calculate(&hexagon).expect_err("unknown shape").kind,
        ErrorKind::UnknownShape
    );
}

#[test]
fn shape_catalog_listing_is_stable() {
    let first = shape_listing();
    let second = shape_listing();
    assert_eq!(first, second);
    assert_eq!(
        list_shapes().iter().map(|s| s.kind.name()).collect::<Vec<_>>(),
        [
            "Rectangle",
            "Square",
            "Circle",
            "Triangle",
            "Trapezoid",
            "Parallelogram",
            "Ellipse",
            "RegularPolygon",
            "Cylinder",
            "Sphere",
            "Cone",
            "Pyramid",
        ]
    );
}

#[test]
fn concurrent_solves_do_not_interfere() {
    init_logs();
    let solver = Solver::new();
    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let solver = &solver;
                scope.spawn(move || {
                    let expr = format!("{i} + 1");
                    let value = value_of(solver.solve(&SolveRequest::expression(&expr)));
                    assert_eq!(value, (i + 1) as f64);

                    let eq = format!("x + {i} = {}", i * 2);
                    match solver.solve(&SolveRequest::expression(&eq)) {
                        SolveResult::Assignments(assignments) => {
                            assert_eq!(assignments.get("x"), Some(&(i as f64)));
                        }
                        other => panic!("expected assignments, got {other:?}"),
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker thread should not panic");
        }
    });
}

#[test]
fn request_and_response_wire_shapes() {
    let request: SolveRequest = serde_json::from_str(
        r#"{"question": "What is 2+3?", "labels": [{"name": "a", "value": 2.0}]}"#,
    )
    .expect("request deserializes");
    assert_eq!(request.question.as_deref(), Some("What is 2+3?"));
    assert_eq!(request.labels.len(), 1);

    let response = solve(&request).into_response();
    let json = serde_json::to_value(&response).expect("response serializes");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["result"], 5.0);

    let calc: CalcRequest = serde_json::from_str(
        r#"{"shape": "Cylinder", "calcType": "surfaceArea", "params": {"r": 1.0, "h": 2.0}}"#,
    )
    .expect("calc request deserializes");
    let calc_json =
        serde_json::to_value(CalcResponse::from_result(calculate(&calc))).expect("serializes");
    assert_eq!(calc_json["status"], "ok");
}

#[test]
fn backend_unavailable_surfaces_budget_exhaustion() {
    let backend = NumericBackend {
        op_budget: 2,
        ..NumericBackend::default()
    };
    let solver = Solver::with_backend(PipelineConfig::default(), backend);
    let result = solver.solve(&SolveRequest::expression("1+2+3+4+5"));
    assert_eq!(failure_kind(result), ErrorKind::BackendUnavailable);
}

#[test]
fn custom_correction_entries_extend_the_table() {
    let mut config = PipelineConfig::default();
    config
        .corrections
        .push(Correction::always("Z", "2"));
    let solver = Solver::with_backend(config, NumericBackend::default());
    assert_eq!(value_of(solver.solve(&SolveRequest::expression("Z+1"))), 3.0);
}

#[test]
fn failure_messages_are_never_empty() {
    let cases = [
        solve_expression(""),
        solve_expression("()"),
        solve_expression("x+1"),
        solve_expression("foo(2)"),
        solve(&SolveRequest::expression("a").with_labels(vec![
            Label::new("a", 1.0),
            Label::new("a", 2.0),
        ])),
    ];
    for result in cases {
        match result {
            SolveResult::Failure(failure) => {
                assert!(!failure.message.is_empty(), "empty message for {failure:?}");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
