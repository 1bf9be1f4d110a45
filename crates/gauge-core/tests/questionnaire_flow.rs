use gauge_core::catalog::{load_catalog, Answer};
use gauge_core::engine::{FinalVerdict, Verdict};
use gauge_core::script::{parse_script, replay};
use gauge_core::session::{Prompt, Questionnaire};
use gauge_core::SessionError;
use Answer::{No, Yes};

fn home_safety() -> Questionnaire {
    let loaded = load_catalog("builtin:home-safety").unwrap();
    Questionnaire::new(loaded.catalog)
}

fn answer_all(q: &mut Questionnaire, item: usize, depth: usize, answers: &[Answer]) -> Verdict {
    let mut verdict = Verdict::Pending;
    for (i, a) in answers.iter().enumerate() {
        verdict = q.select_sub_answer(item, depth, i, *a).unwrap().verdict;
    }
    verdict
}

#[test]
fn test_direct_branch_resolves_without_sub_prompt() {
    let mut q = home_safety();
    let t = q.select_main_answer(0, Yes).unwrap();
    assert_eq!(t.verdict, Verdict::Pass);
    assert_eq!(
        t.prompt,
        Prompt::Done {
            verdict: FinalVerdict::Pass
        }
    );
    assert_eq!(
        q.select_sub_answer(0, 0, 0, Yes),
        Err(SessionError::NoActiveLayer { item: 0 })
    );
}

#[test]
fn test_full_walk_through_builtin_catalog() {
    let mut q = home_safety();

    // smoke-alarms: both follow-ups yes
    q.select_main_answer(0, No).unwrap();
    assert_eq!(answer_all(&mut q, 0, 0, &[Yes, Yes]), Verdict::Pass);
    q.advance().unwrap();

    // gas-appliances: chain any-yes leads to the second layer
    q.select_main_answer(1, Yes).unwrap();
    let t = q.select_sub_answer(1, 0, 0, Yes).unwrap();
    assert_eq!(t.verdict, Verdict::Pending);
    let t = q.select_sub_answer(1, 0, 1, No).unwrap();
    assert_eq!(t.verdict, Verdict::Pending);
    assert!(matches!(
        t.prompt,
        Prompt::SubQuestion {
            depth: 1,
            sub_index: 0,
            of: 2,
            ..
        }
    ));
    assert_eq!(answer_all(&mut q, 1, 1, &[Yes, Yes]), Verdict::Pass);
    q.advance().unwrap();

    // electrical: two hazards, escalates, then one remedy missing
    q.select_main_answer(2, Yes).unwrap();
    assert_eq!(answer_all(&mut q, 2, 0, &[Yes, Yes, No]), Verdict::Pending);
    assert_eq!(answer_all(&mut q, 2, 1, &[No, Yes]), Verdict::Fail);
    q.advance().unwrap();

    // escape-routes: mixed pass/fail examples need a selection
    q.select_main_answer(3, No).unwrap();
    assert_eq!(answer_all(&mut q, 3, 0, &[Yes, No, Yes]), Verdict::Ambiguous);
    match q.prompt().unwrap() {
        Prompt::Disambiguation { choices, running } => {
            let offered: Vec<usize> = choices.iter().map(|c| c.sub_index).collect();
            assert_eq!(offered, vec![0, 2]);
            assert_eq!(running, Verdict::Pending);
        }
        other => panic!("expected disambiguation, got {other:?}"),
    }
    assert!(q.advance().is_err());
    assert_eq!(
        q.toggle_disambiguation_choice(3, 0, true).unwrap().verdict,
        Verdict::Pass
    );
    assert!(q.store().contains(3));
    assert_eq!(
        q.toggle_disambiguation_choice(3, 2, true).unwrap().verdict,
        Verdict::Ambiguous
    );
    assert!(!q.store().contains(3));
    assert_eq!(
        q.toggle_disambiguation_choice(3, 0, false).unwrap().verdict,
        Verdict::Fail
    );
    q.advance().unwrap();

    // portable-heaters: max-yes with 2 of 3
    q.select_main_answer(4, Yes).unwrap();
    assert_eq!(answer_all(&mut q, 4, 0, &[Yes, No, Yes]), Verdict::Pass);
    q.advance().unwrap();

    // flammable-storage: all-no broken by one yes
    q.select_main_answer(5, Yes).unwrap();
    assert_eq!(answer_all(&mut q, 5, 0, &[No, Yes]), Verdict::Fail);
    q.advance().unwrap();

    let t = q.select_main_answer(6, No).unwrap();
    assert_eq!(t.verdict, Verdict::Fail);
    assert_eq!(q.advance(), Err(SessionError::EndOfCatalog { item: 6 }));

    let report = t.completion.expect("all items answered");
    assert_eq!(report.summary.total, 7);
    assert_eq!(report.summary.passed, 3);
    assert_eq!(report.summary.failed, 4);
    assert_eq!(report.results[1].trail, vec![vec![Yes, No], vec![Yes, Yes]]);
    assert_eq!(report.results[2].trail, vec![vec![Yes, Yes, No], vec![No, Yes]]);
}

#[test]
fn test_revising_an_answered_item_updates_the_report() {
    let mut q = home_safety();
    for item in 0..7 {
        let main = if item == 0 || item == 3 || item == 6 {
            Yes
        } else {
            No
        };
        q.select_main_answer(item, main).unwrap();
        if item < 6 {
            q.advance().unwrap();
        }
    }
    assert!(q.completion().unwrap().summary.all_passed());

    q.navigate(5).unwrap();
    q.select_main_answer(5, Yes).unwrap();
    assert!(q.completion().is_none());
    let t = q.select_sub_answer(5, 0, 0, Yes).unwrap();
    assert!(t.completion.is_none());
    let t = q.select_sub_answer(5, 0, 1, No).unwrap();
    assert_eq!(t.verdict, Verdict::Fail);
    let report = t.completion.expect("complete again");
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.results[5].verdict, Verdict::Fail);
}

#[test]
fn test_unanswered_items_ahead_are_unreachable() {
    let mut q = home_safety();
    q.select_main_answer(0, Yes).unwrap();
    q.advance().unwrap();
    assert!(q.navigate(2).is_err());
    assert!(q.navigate(1).is_ok());
    assert!(q.navigate(0).is_ok());
    // item 1 has no verdict, so the way back is advancing past item 0
    assert!(!q.can_navigate(1));
    assert_eq!(q.advance().unwrap().item, 1);
    assert!(!q.can_navigate(99));
}

#[test]
fn test_repeated_sub_answer_is_idempotent() {
    let mut q = home_safety();
    q.select_main_answer(0, No).unwrap();
    let first = q.select_sub_answer(0, 0, 0, Yes).unwrap();
    let trail = q.session(0).unwrap().trail().clone();
    let second = q.select_sub_answer(0, 0, 0, Yes).unwrap();
    assert_eq!(first, second);
    assert_eq!(q.session(0).unwrap().trail(), &trail);
}

#[test]
fn test_repeated_sub_answer_after_chain_transition_is_idempotent() {
    let mut q = home_safety();
    q.select_main_answer(0, Yes).unwrap();
    q.advance().unwrap();

    // gas-appliances: the second answer escalates to the next layer
    q.select_main_answer(1, Yes).unwrap();
    q.select_sub_answer(1, 0, 0, Yes).unwrap();
    let first = q.select_sub_answer(1, 0, 1, No).unwrap();
    let trail = q.session(1).unwrap().trail().clone();
    assert_eq!(trail.full_trail(), vec![vec![Yes, No]]);

    let second = q.select_sub_answer(1, 0, 1, No).unwrap();
    assert_eq!(first, second);
    assert_eq!(q.session(1).unwrap().trail(), &trail);

    assert_eq!(
        q.select_sub_answer(1, 0, 1, Yes),
        Err(SessionError::InactiveLayer {
            item: 1,
            depth: 0,
            active: 1
        })
    );
    assert_eq!(q.session(1).unwrap().trail(), &trail);

    assert_eq!(answer_all(&mut q, 1, 1, &[Yes, Yes]), Verdict::Pass);
    assert_eq!(
        q.session(1).unwrap().trail().full_trail(),
        vec![vec![Yes, No], vec![Yes, Yes]]
    );
}

#[test]
fn test_replayed_script_matches_interactive_run() {
    let script = parse_script(
        r#"
version: 1
events:
  - main: { item: 0, answer: "no" }
  - sub: { item: 0, index: 0, answer: "yes" }
  - sub: { item: 0, depth: 0, index: 1, answer: "no" }
  - advance
  - main: { item: 1, answer: "no" }
"#,
    )
    .unwrap();
    let mut q = home_safety();
    let outcome = replay(&mut q, &script.events).unwrap();
    assert_eq!(outcome.applied, 5);
    assert_eq!(q.current(), 1);

    let rows = q.results();
    assert_eq!(rows[0].verdict, Verdict::Fail);
    assert_eq!(rows[1].verdict, Verdict::Pass);
    assert_eq!(rows[2].verdict, Verdict::Pending);
}
