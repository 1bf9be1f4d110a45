use dialoguer::{theme::ColorfulTheme, MultiSelect, Select};

use gauge_core::catalog::{load_catalog, Answer};
use gauge_core::engine::Verdict;
use gauge_core::report::RunReport;
use gauge_core::session::{Choice, Prompt, Questionnaire};

use super::{decide_exit, emit_report, resolve_settings};
use crate::cli::args::RunArgs;
use crate::exit_codes;

/// What the user picked on a menu, beyond answering the question itself.
enum Action {
    Answer(Answer),
    Next,
    Revise,
    Jump,
    Finish,
}

pub fn run(args: RunArgs) -> anyhow::Result<i32> {
    let cfg = match resolve_settings(&args.session) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };
    let loaded = match load_catalog(&cfg.catalog) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let theme = ColorfulTheme::default();
    let mut q = Questionnaire::new(loaded.catalog.clone());
    eprintln!(
        "{} v{}: {} items",
        loaded.catalog.name,
        loaded.catalog.version,
        loaded.catalog.len()
    );

    loop {
        let item = q.current();
        match q.prompt()? {
            Prompt::MainQuestion {
                title,
                description,
                yes_hint,
                no_hint,
            } => {
                eprintln!();
                eprintln!("[{}/{}] {}", item + 1, q.catalog().len(), title);
                if let Some(d) = description {
                    eprintln!("    {}", d.trim());
                }
                let menu = vec![
                    (with_hint("Yes", yes_hint.as_deref()), Action::Answer(Answer::Yes)),
                    (with_hint("No", no_hint.as_deref()), Action::Answer(Answer::No)),
                ];
                match pick(&theme, &q, "Answer", menu)? {
                    Action::Answer(a) => {
                        q.select_main_answer(item, a)?;
                    }
                    Action::Jump => jump(&theme, &mut q)?,
                    Action::Finish => break,
                    Action::Next | Action::Revise => {}
                }
            }
            Prompt::SubQuestion {
                depth,
                sub_index,
                of,
                title,
            } => {
                let label = format!("  [{}.{}/{}] {}", depth + 1, sub_index + 1, of, title);
                let menu = vec![
                    ("Yes".to_string(), Action::Answer(Answer::Yes)),
                    ("No".to_string(), Action::Answer(Answer::No)),
                ];
                match pick(&theme, &q, &label, menu)? {
                    Action::Answer(a) => {
                        q.select_sub_answer(item, depth, sub_index, a)?;
                    }
                    Action::Jump => jump(&theme, &mut q)?,
                    Action::Finish => break,
                    Action::Next | Action::Revise => {}
                }
            }
            Prompt::Disambiguation { choices, running } => {
                eprintln!("  Answers point both ways. Select the statements that apply.");
                if running != Verdict::Pending {
                    eprintln!("  Current selection: {}", running);
                }
                select_choices(&theme, &mut q, &choices)?;
                if q.session(item).map(|s| s.verdict()) == Some(Verdict::Ambiguous) {
                    let menu = vec![("Select again".to_string(), Action::Revise)];
                    match pick(&theme, &q, "Still undecided", menu)? {
                        Action::Jump => jump(&theme, &mut q)?,
                        Action::Finish => break,
                        _ => {}
                    }
                }
            }
            Prompt::Done { verdict } => {
                eprintln!("  => {}", verdict.to_string().to_uppercase());
                let last = item + 1 == q.catalog().len();
                if last && q.is_complete() {
                    break;
                }
                let mut menu = Vec::new();
                if !last {
                    menu.push(("Next item".to_string(), Action::Next));
                }
                menu.push(("Revise this item".to_string(), Action::Revise));
                let action = pick(&theme, &q, "Continue", menu)?;
                match action {
                    Action::Next => {
                        q.advance()?;
                    }
                    Action::Revise => revise(&theme, &mut q)?,
                    Action::Jump => jump(&theme, &mut q)?,
                    Action::Finish => break,
                    Action::Answer(_) => {}
                }
            }
        }
    }

    let report = RunReport::new(&loaded, &q);
    emit_report(&report, &cfg)?;
    Ok(decide_exit(&report))
}

fn with_hint(label: &str, hint: Option<&str>) -> String {
    match hint {
        Some(h) => format!("{label}  ({h})"),
        None => label.to_string(),
    }
}

/// Menu of `entries` followed by the navigation entries that apply.
fn pick(
    theme: &ColorfulTheme,
    q: &Questionnaire,
    prompt: &str,
    mut entries: Vec<(String, Action)>,
) -> anyhow::Result<Action> {
    if (0..q.catalog().len()).any(|i| i != q.current() && q.can_navigate(i)) {
        entries.push(("Go to an answered item".to_string(), Action::Jump));
    }
    entries.push(("Finish".to_string(), Action::Finish));

    let labels: Vec<&str> = entries.iter().map(|(l, _)| l.as_str()).collect();
    let picked = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(entries.swap_remove(picked).1)
}

/// Multi-select over the offered choices, applied as individual toggles.
fn select_choices(
    theme: &ColorfulTheme,
    q: &mut Questionnaire,
    choices: &[Choice],
) -> anyhow::Result<()> {
    let item = q.current();
    let labels: Vec<String> = choices.iter().map(|c| c.title.clone()).collect();
    let defaults: Vec<bool> = choices.iter().map(|c| c.selected).collect();
    let picked = MultiSelect::with_theme(theme)
        .with_prompt("Which apply? (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    for (i, choice) in choices.iter().enumerate() {
        let included = picked.contains(&i);
        if included != choice.selected {
            q.toggle_disambiguation_choice(item, choice.sub_index, included)?;
        }
    }
    Ok(())
}

/// Change the main answer or one answer of the active layer. Layers already
/// left through a chain are reopened by changing the main answer.
fn revise(theme: &ColorfulTheme, q: &mut Questionnaire) -> anyhow::Result<()> {
    let item = q.current();
    let Some(session) = q.session(item) else {
        return Ok(());
    };
    let trail = session.trail().clone();
    let Some(def) = q.catalog().item(item) else {
        return Ok(());
    };

    let mut labels = vec![format!(
        "{}  [{}]",
        def.title,
        trail.main_answer().map(|a| a.as_str()).unwrap_or("-")
    )];
    let layer = trail.current_layer().and_then(|at| at.resolve(def));
    if let Some(layer) = layer {
        for (q_def, a) in layer.questions.iter().zip(trail.sub_answers()) {
            labels.push(format!("  {}  [{}]", q_def.title, a));
        }
    }
    let reselect = session
        .state()
        .disambiguation()
        .map(|d| !d.candidates().is_empty())
        .unwrap_or(false);
    if reselect {
        labels.push("Revise selection".to_string());
    }

    let picked = Select::with_theme(theme)
        .with_prompt("Which answer?")
        .items(&labels)
        .default(0)
        .interact()?;

    if reselect && picked == labels.len() - 1 {
        let choices = current_choices(q);
        return select_choices(theme, q, &choices);
    }

    let answer = match Select::with_theme(theme)
        .with_prompt("New answer")
        .items(&["Yes", "No"])
        .default(0)
        .interact()?
    {
        0 => Answer::Yes,
        _ => Answer::No,
    };
    if picked == 0 {
        q.select_main_answer(item, answer)?;
    } else {
        let depth = trail.current_layer().map_or(0, |at| at.depth);
        q.select_sub_answer(item, depth, picked - 1, answer)?;
    }
    Ok(())
}

/// Choices of a resolved item's kept selection.
fn current_choices(q: &Questionnaire) -> Vec<Choice> {
    let item = q.current();
    let (Some(session), Some(def)) = (q.session(item), q.catalog().item(item)) else {
        return Vec::new();
    };
    let layer = session
        .trail()
        .current_layer()
        .and_then(|at| at.resolve(def));
    let Some(d) = session.state().disambiguation() else {
        return Vec::new();
    };
    d.candidates()
        .iter()
        .map(|c| Choice {
            sub_index: c.sub_index,
            title: layer
                .and_then(|l| l.questions.get(c.sub_index))
                .map(|sq| sq.title.clone())
                .unwrap_or_default(),
            example: c.example,
            selected: d.is_selected(c.sub_index),
        })
        .collect()
}

fn jump(theme: &ColorfulTheme, q: &mut Questionnaire) -> anyhow::Result<()> {
    let rows = q.results();
    let targets: Vec<usize> = (0..rows.len())
        .filter(|i| *i != q.current() && q.can_navigate(*i))
        .collect();
    if targets.is_empty() {
        return Ok(());
    }
    let labels: Vec<String> = targets
        .iter()
        .map(|i| format!("{}. {}  [{}]", i + 1, rows[*i].title, rows[*i].verdict))
        .collect();
    let picked = Select::with_theme(theme)
        .with_prompt("Go to")
        .items(&labels)
        .default(0)
        .interact()?;
    q.navigate(targets[picked])?;
    Ok(())
}
