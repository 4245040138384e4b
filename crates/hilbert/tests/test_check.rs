//! Integration tests for line-by-line proof checking

use hilbert::{check_proof, parse_proof, AxiomSet, CheckReport, Justification, VerificationFailure};

fn check(input: &str) -> CheckReport {
    let axioms = AxiomSet::standard().unwrap();
    let proof = parse_proof(input).unwrap();
    check_proof(&proof, &axioms).unwrap()
}

fn labels(report: &CheckReport) -> Vec<String> {
    report.lines.iter().map(|line| line.label()).collect()
}

#[test]
fn test_identity_proof() {
    let report = check(
        "|-A->A
         A->A->A
         (A->A->A)->(A->(A->A)->A)->(A->A)
         (A->(A->A)->A)->(A->A)
         A->(A->A)->A
         A->A",
    );
    assert!(report.is_correct());
    assert_eq!(
        report.render(),
        "|-A->A\n\
         (1) A->A->A (Ax. sch. 1)\n\
         (2) (A->A->A)->(A->(A->A)->A)->(A->A) (Ax. sch. 2)\n\
         (3) (A->(A->A)->A)->(A->A) (M.P. 1, 2)\n\
         (4) A->(A->A)->A (Ax. sch. 1)\n\
         (5) A->A (M.P. 4, 3)\n"
    );
}

#[test]
fn test_failures_do_not_stop_the_pass() {
    let report = check("P|-Q\nQ\nP\n(P\nP->Q->P\n");
    assert_eq!(
        labels(&report),
        vec!["Not proved", "Hyp. 1", "Not proved", "Ax. sch. 1"]
    );
    assert_eq!(report.failure_count(), 2);
    assert!(matches!(
        report.lines[2].outcome,
        Err(VerificationFailure::Parse(_))
    ));
    assert!(!report.goal_reached());

    let diagnostics = report.diagnostics();
    assert_eq!(diagnostics.len(), 4);
    assert_eq!(diagnostics[0], "Proof is incorrect starting from formula 1: not proved");
    assert!(diagnostics[1].starts_with("Proof is incorrect starting from formula 3: "));
    assert_eq!(diagnostics[2], "2 of 4 lines not proved");
    assert_eq!(diagnostics[3], "The proof does not prove Q");
}

#[test]
fn test_goal_counts_from_last_verified_line() {
    let report = check("P|-P
P
Q
");
    assert!(report.goal_reached());
    assert!(!report.is_correct());
    assert_eq!(
        report.diagnostics(),
        vec![
            "Proof is incorrect starting from formula 2: not proved".to_string(),
            "1 of 2 lines not proved".to_string(),
        ]
    );
}

#[test]
fn test_modus_ponens_uses_earliest_lines() {
    let report = check("P,P->Q|-Q\nP->Q\nP\nP\nP->Q\nQ\n");
    assert_eq!(
        report.lines[4].outcome,
        Ok(Justification::ModusPonens {
            antecedent: 1,
            implication: 0
        })
    );
    assert_eq!(report.lines[4].label(), "M.P. 2, 1");
}

#[test]
fn test_line_never_justifies_itself() {
    let report = check("|-P\nP\n");
    assert_eq!(report.lines[0].outcome, Err(VerificationFailure::Unproved));
}

#[test]
fn test_quantifier_rules_and_axioms() {
    let report = check(
        "Q->P(x),P(y)->Q|-?yP(y)->@xP(x)
         Q->P(x)
         Q->@xP(x)
         P(y)->Q
         ?yP(y)->Q
         @xP(x)->P(f(z))
         P(0')->?xP(x)",
    );
    assert_eq!(
        labels(&report),
        vec![
            "Hyp. 1",
            "Inf. rule @ from 1",
            "Hyp. 2",
            "Inf. rule ? from 3",
            "Ax. sch. 11",
            "Ax. sch. 12",
        ]
    );
}

#[test]
fn test_quantifier_rule_from_hypothesis() {
    let report = check("Q->P(x),P(y)->Q|-Q->@xP(x)\n?yP(y)->Q\nQ->@xP(x)\n");
    assert_eq!(
        labels(&report),
        vec!["Inf. rule ? from hypothesis 2", "Inf. rule @ from hypothesis 1"]
    );
    assert!(report.is_correct());
}

#[test]
fn test_generalizing_over_free_variable_is_rejected() {
    let report = check("P(x)->Q(x)|-P(x)->@xQ(x)\nP(x)->Q(x)\nP(x)->@xQ(x)\n");
    assert_eq!(
        report.lines[1].outcome,
        Err(VerificationFailure::VariableFree {
            variable: "x".to_string(),
            line: 1
        })
    );
    assert_eq!(
        report.diagnostics()[0],
        "Proof is incorrect starting from formula 2: variable x occurs free in formula 1"
    );
}

#[test]
fn test_capturing_substitution_is_rejected() {
    let report = check("|-@x?yx=y->?yy=y\n@x?yx=y->?yy=y\n");
    match &report.lines[0].outcome {
        Err(VerificationFailure::NotFreeForSubstitution {
            term,
            formula,
            variable,
        }) => {
            assert_eq!(term, "y");
            assert_eq!(formula, "?yx=y");
            assert_eq!(variable, "x");
        }
        other => panic!("expected a substitution failure, got {:?}", other),
    }
}

#[test]
fn test_arithmetic_axioms_and_induction() {
    let report = check(
        "|-0+x=x
         a+0=a
         a=b->a=c->b=c
         !0'=0
         x*0''=x*0'+x
         0+0=0&@x(0+x=x->0+x'=x')->0+x=x",
    );
    assert_eq!(
        labels(&report),
        vec!["Ax. sch. A6", "Ax. sch. A2", "Ax. sch. A4", "Ax. sch. A8", "Ax. sch. A9"]
    );
}

#[test]
fn test_equal_texts_share_identity() {
    // whitespace and redundant parentheses do not matter
    let report = check("(P)->(Q)|-Q\n( P -> Q )\nP->((Q))\n");
    assert_eq!(labels(&report), vec!["Hyp. 1", "Hyp. 1"]);
}
