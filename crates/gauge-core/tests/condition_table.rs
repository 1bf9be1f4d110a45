use gauge_core::catalog::{Answer, ChainCondition, Condition, Example, SubQuestion};
use gauge_core::engine::{evaluate, Outcome, Verdict};
use gauge_core::EvaluationError;
use proptest::prelude::*;
use Answer::{No, Yes};

fn questions(tags: &[Example]) -> Vec<SubQuestion> {
    tags.iter()
        .enumerate()
        .map(|(i, e)| SubQuestion {
            title: format!("q{i}"),
            example: *e,
        })
        .collect()
}

fn pass_questions(n: usize) -> Vec<SubQuestion> {
    questions(&vec![Example::Pass; n])
}

fn eval(c: Condition, chain: Option<ChainCondition>, answers: &[Answer]) -> Outcome {
    evaluate(c, chain, answers, &pass_questions(answers.len())).unwrap()
}

const PASS: Outcome = Outcome::Verdict(Verdict::Pass);
const FAIL: Outcome = Outcome::Verdict(Verdict::Fail);

#[test]
fn test_counting_conditions_guard_empty_answers() {
    for c in Condition::ALL.into_iter().filter(|c| !c.is_direct()) {
        assert_eq!(
            evaluate(c, None, &[], &[]),
            Err(EvaluationError::EmptyAnswers { condition: c }),
            "{c}"
        );
    }
}

#[test]
fn test_all_yes_table() {
    assert_eq!(eval(Condition::AllYes, None, &[Yes, Yes, Yes]), PASS);
    assert_eq!(eval(Condition::AllYes, None, &[Yes, No, Yes]), FAIL);
    // next-layer only fires when the primary test already passed
    assert_eq!(
        eval(Condition::AllYes, Some(ChainCondition::NextLayer), &[Yes, No]),
        FAIL
    );
    assert_eq!(
        eval(Condition::AllYes, Some(ChainCondition::AnyYes), &[Yes, No]),
        Outcome::AdvanceToNextLayer
    );
}

#[test]
fn test_yes_to_one_or_less_table() {
    assert_eq!(eval(Condition::YesToOneOrLess, None, &[Yes]), PASS);
    assert_eq!(
        eval(
            Condition::YesToOneOrLess,
            Some(ChainCondition::YesToTwoOrMore),
            &[Yes, Yes]
        ),
        Outcome::AdvanceToNextLayer
    );
    assert_eq!(eval(Condition::YesToOneOrLess, None, &[Yes, Yes]), FAIL);
}

#[test]
fn test_remaining_count_conditions() {
    let cases = [
        (Condition::AllNo, vec![No, No], PASS),
        (Condition::AllNo, vec![No, Yes], FAIL),
        (Condition::AnyYes, vec![No, Yes], PASS),
        (Condition::AnyYes, vec![No, No], FAIL),
        (Condition::AnyNo, vec![Yes, No], PASS),
        (Condition::AnyNo, vec![Yes, Yes], FAIL),
        (Condition::MaxYes, vec![Yes, No], PASS),
        (Condition::MaxYes, vec![No, No, Yes], FAIL),
        (Condition::MaxNo, vec![Yes, No], PASS),
        (Condition::MaxNo, vec![Yes, Yes, No], FAIL),
        (Condition::YesToTwoOrMore, vec![Yes, No, Yes], PASS),
        (Condition::YesToTwoOrMore, vec![Yes, No, No], FAIL),
    ];
    for (c, answers, expected) in cases {
        assert_eq!(eval(c, None, &answers), expected, "{c} on {answers:?}");
    }
}

#[test]
fn test_yes_to_only_pass_fail_by_example() {
    let qs = questions(&[Example::Pass, Example::Fail]);
    let by_example = |answers: &[Answer]| {
        evaluate(Condition::YesToOnlyPassFail, None, answers, &qs).unwrap()
    };
    assert_eq!(by_example(&[Yes, Yes]), Outcome::Verdict(Verdict::Ambiguous));
    assert_eq!(by_example(&[Yes, No]), PASS);
    assert_eq!(by_example(&[No, Yes]), FAIL);
    assert_eq!(by_example(&[No, No]), Outcome::Verdict(Verdict::Ambiguous));
}

fn answers() -> impl Strategy<Value = Vec<Answer>> {
    prop::collection::vec(any::<bool>().prop_map(|b| if b { Yes } else { No }), 0..8)
}

fn condition() -> impl Strategy<Value = Condition> {
    prop::sample::select(Condition::ALL.to_vec())
}

fn chain() -> impl Strategy<Value = Option<ChainCondition>> {
    prop::option::of(prop::sample::select(ChainCondition::ALL.to_vec()))
}

proptest! {
    #[test]
    fn test_direct_conditions_ignore_answers(answers in answers(), chain in chain()) {
        let qs = pass_questions(answers.len());
        prop_assert_eq!(evaluate(Condition::PassDirect, chain, &answers, &qs), Ok(PASS));
        prop_assert_eq!(evaluate(Condition::FailDirect, chain, &answers, &qs), Ok(FAIL));
    }

    #[test]
    fn test_evaluation_is_deterministic(c in condition(), chain in chain(), answers in answers()) {
        let qs = pass_questions(answers.len());
        prop_assert_eq!(
            evaluate(c, chain, &answers, &qs),
            evaluate(c, chain, &answers, &qs)
        );
    }

    #[test]
    fn test_passing_primary_never_advances(c in condition(), chain in chain(), answers in answers()) {
        let qs = pass_questions(answers.len());
        let bare = evaluate(c, None, &answers, &qs);
        let chained = evaluate(c, chain, &answers, &qs);
        if bare == Ok(PASS) {
            prop_assert_eq!(chained, Ok(PASS));
        }
    }

    #[test]
    fn test_next_layer_chain_never_changes_the_outcome(c in condition(), answers in answers()) {
        let qs = pass_questions(answers.len());
        prop_assert_eq!(
            evaluate(c, Some(ChainCondition::NextLayer), &answers, &qs),
            evaluate(c, None, &answers, &qs)
        );
    }
}
