use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::catalog::{self, VOICE_SAMPLES};
use crate::config::BuddiesConfig;
use crate::error::FlowError;
use crate::source::{
    Activation, LoadingScreen, PreferenceList, StdRandom, TokioClock, VoiceInput, bubbles,
    scatter,
};
use crate::state_machine::{
    AnswerDigest, Decision, Item, Modality, Quiz, Rating, Response, Selection, Shortlist, Step,
    Summary, SwipeDeck, View,
};
use crate::ui::{self, ListeningView, LoadingView, QuizView};

/// Bubbles drawn behind the loading screen.
const LOADING_BUBBLES: usize = 6;

/// One line of keyboard input while the quiz is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizInput {
    Next,
    Back,
    Quit,
    /// Drop every answer and start over from the first question.
    Restart,
    Answer(Response),
    /// Flip one option of a multi-select question.
    Toggle(String),
}

/// Interpret a line typed for `item`: `n`/empty = next, `b` = back, `r` = restart,
/// `q` = quit, a number picks an option (or a rating on scale questions).
pub fn parse_quiz_input(item: &Item, line: &str) -> Result<QuizInput, String> {
    let line = line.trim();
    match line {
        "" | "n" => return Ok(QuizInput::Next),
        "b" => return Ok(QuizInput::Back),
        "q" => return Ok(QuizInput::Quit),
        "r" => return Ok(QuizInput::Restart),
        _ => {}
    }

    let number: usize = line
        .parse()
        .map_err(|_| format!("'{line}' is not a number, n, b or q"))?;

    match item.modality {
        Modality::Scale => u8::try_from(number)
            .ok()
            .and_then(|n| Rating::new(n).ok())
            .map(|rating| QuizInput::Answer(Response::Scale(rating)))
            .ok_or_else(|| format!("rating must be between {} and {}", Rating::MIN, Rating::MAX)),
        Modality::SingleSelect | Modality::MultiSelect => {
            let option = number
                .checked_sub(1)
                .and_then(|i| item.options().get(i))
                .ok_or_else(|| format!("pick an option from 1 to {}", item.options().len()))?;
            if item.modality == Modality::MultiSelect {
                Ok(QuizInput::Toggle(option.clone()))
            } else {
                Ok(QuizInput::Answer(Response::Choice(option.clone())))
            }
        }
        Modality::Decision => Err("profiles are answered in the swipe deck".to_string()),
    }
}

/// Next line from `reader`, or `None` once input is exhausted.
fn next_line(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).context("failed to read input")?;
    Ok((read > 0).then_some(line))
}

/// Interactive quiz on the terminal.
pub fn run_quiz_interactive() -> Result<()> {
    let mut quiz = Quiz::new(catalog::questions());
    drive_quiz(&mut quiz, &mut std::io::stdin().lock())?;
    Ok(())
}

/// Run the quiz from line input. Returns the summary when the quiz completes,
/// `None` when the user quits or input runs out first.
pub fn drive_quiz(quiz: &mut Quiz, reader: &mut impl BufRead) -> Result<Option<Summary>> {
    let view = QuizView::start(quiz.catalog().len());

    loop {
        let item = match quiz.view(&AnswerDigest) {
            View::Complete(summary) => {
                view.complete(&summary);
                return Ok(Some(summary));
            }
            View::InProgress { item, index, .. } => {
                view.show(item, index, quiz.state().responses.get(item.id.as_str()));
                item.clone()
            }
        };

        let Some(line) = next_line(reader)? else {
            info!("input closed, leaving quiz");
            return Ok(None);
        };
        let input = match parse_quiz_input(&item, &line) {
            Ok(input) => input,
            Err(reason) => {
                view.rejected(&reason);
                continue;
            }
        };

        match input {
            QuizInput::Quit => {
                info!("quiz abandoned");
                return Ok(None);
            }
            QuizInput::Back => {
                quiz.retreat();
            }
            QuizInput::Restart => {
                quiz.reset();
            }
            QuizInput::Next => {
                if quiz.advance() == Step::Blocked {
                    view.blocked();
                }
            }
            QuizInput::Answer(response) => {
                if let Err(e) = quiz.answer(response) {
                    view.rejected(&e.to_string());
                }
            }
            QuizInput::Toggle(option) => {
                let selected = matches!(
                    quiz.state().responses.get(item.id.as_str()),
                    Some(Response::Choices(set)) if set.contains(&option)
                );
                let selection = if selected {
                    Selection::Remove
                } else {
                    Selection::Add
                };
                if let Err(e) = quiz.select(&option, selection) {
                    view.rejected(&e.to_string());
                }
            }
        }
    }
}

/// Read an answers file: a JSON or TOML map of question id to value.
pub fn load_answers(path: &Path) -> Result<BTreeMap<String, Response>, FlowError> {
    let contents = std::fs::read_to_string(path)?;
    let is_toml = path.extension().and_then(|e| e.to_str()) == Some("toml");
    let answers = if is_toml {
        toml::from_str(&contents)?
    } else {
        serde_json::from_str(&contents)?
    };
    Ok(answers)
}

/// Walk the quiz in order, answering each item from `answers`, until complete.
pub fn replay_answers(quiz: &mut Quiz, answers: &BTreeMap<String, Response>) -> Result<Summary> {
    for id in answers.keys() {
        if quiz.catalog().get(id).is_none() {
            return Err(FlowError::UnknownItem(id.as_str().into()).into());
        }
    }

    loop {
        let item = quiz.current().clone();
        match (item.modality, answers.get(item.id.as_str())) {
            (Modality::MultiSelect, Some(Response::Choices(values))) => {
                for value in values {
                    quiz.select(value, Selection::Add)?;
                }
            }
            (Modality::MultiSelect, Some(Response::Choice(value))) => {
                quiz.select(value, Selection::Add)?;
            }
            (_, Some(response)) => quiz
                .answer_item(item.id.as_str(), response.clone())
                .with_context(|| format!("invalid answer for {}", item.id))?,
            (_, None) => {}
        }

        match quiz.advance() {
            Step::Completed => break,
            Step::Blocked => bail!("question '{}' has no answer", item.id),
            Step::Moved(index) => debug!(index, "replayed answer"),
            Step::Ignored => break,
        }
    }

    match quiz.view(&AnswerDigest) {
        View::Complete(summary) => Ok(summary),
        View::InProgress { .. } => bail!("quiz did not complete"),
    }
}

pub fn run_quiz_from_file(path: &Path) -> Result<()> {
    let answers = load_answers(path)
        .with_context(|| format!("failed to load answers from {}", path.display()))?;
    let mut quiz = Quiz::new(catalog::questions());
    let summary = replay_answers(&mut quiz, &answers)?;
    ui::print_summary(&summary);
    Ok(())
}

/// Parse `y`/`n` characters into decisions; whitespace is ignored.
pub fn parse_decisions(script: &str) -> Result<Vec<Decision>> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_ascii_lowercase() {
            'y' => Ok(Decision::Accept),
            'n' => Ok(Decision::Reject),
            other => bail!("unknown decision '{other}', use y or n"),
        })
        .collect()
}

pub fn run_swipe(script: Option<&str>) -> Result<()> {
    let mut deck = SwipeDeck::new(catalog::roommates());

    if let Some(script) = script {
        for decision in parse_decisions(script)? {
            ui::print_profile(deck.current(), &deck.markers(), deck.match_count());
            let outcome = deck.decide(decision);
            println!("  → {:?}", outcome.decision);
        }
    } else {
        drive_swipe(&mut deck, &mut std::io::stdin().lock())?;
    }

    println!();
    println!(
        "{} matches after {} passes over the deck",
        deck.match_count(),
        deck.wraps()
    );
    let roommates = catalog::roommates();
    for id in deck.log().entries() {
        if let Some(profile) = roommates.get(id.as_str()) {
            let still = deck.last_decision(id.as_str()) == Some(true);
            let note = if still { "" } else { " (passed on later)" };
            println!("  ♥ {}{note}", profile.label());
        }
    }
    Ok(())
}

/// Prompt for decisions line by line until `q` or end of input.
pub fn drive_swipe(deck: &mut SwipeDeck, reader: &mut impl BufRead) -> Result<()> {
    loop {
        ui::print_profile(deck.current(), &deck.markers(), deck.match_count());
        println!("  [y] connect  [n] pass  [q] quit");
        let Some(line) = next_line(reader)? else {
            info!("input closed, leaving swipe deck");
            return Ok(());
        };
        match line.trim() {
            "q" => return Ok(()),
            other => match parse_decisions(other) {
                Ok(decisions) => {
                    for decision in decisions {
                        deck.decide(decision);
                    }
                }
                Err(e) => println!("  {e}"),
            },
        }
    }
}

pub async fn run_voice(config: &BuddiesConfig, takes: usize) -> Result<()> {
    let mut voice = VoiceInput::new(
        TokioClock,
        StdRandom::new(config.seed),
        config.voice_delay(),
        &VOICE_SAMPLES,
    );
    let mut prefs = PreferenceList::new(config.min_preferences);

    println!("Or try these examples:");
    for suggestion in PreferenceList::suggestions(&VOICE_SAMPLES) {
        println!("  \"{suggestion}\"");
    }

    for _ in 0..takes {
        let (tx, rx) = oneshot::channel();
        let activation = voice.activate(move |transcript| {
            let _ = tx.send(transcript);
        });
        if activation == Activation::AlreadyPending {
            warn!("previous voice capture still pending");
            bail!("voice capture did not settle before the next take");
        }

        let spinner = ListeningView::start();
        let transcript = tokio::select! {
            heard = rx => heard.context("voice capture was cancelled")?,
            _ = tokio::signal::ctrl_c() => {
                voice.cancel();
                spinner.cancelled();
                break;
            }
        };
        prefs.set_transcript(transcript.clone());
        let added = prefs.commit();
        spinner.heard(&transcript, added);
    }

    println!();
    println!("Your Preferences:");
    for pref in prefs.items() {
        println!("  ✓ {pref}");
    }
    if prefs.is_ready() {
        println!("Ready: Find My Perfect Roommates");
    }
    Ok(())
}

pub async fn run_loading(config: &BuddiesConfig) -> Result<()> {
    let view = LoadingView::start();
    let mut screen = LoadingScreen::new(TokioClock, config.loading_timing());
    let (tx, rx) = oneshot::channel();

    let progress_view = view.clone();
    screen.start(
        move |snapshot| progress_view.update(snapshot),
        move || {
            let _ = tx.send(());
        },
    );

    tokio::select! {
        done = rx => {
            done.context("loading screen was torn down")?;
            view.finish();
        }
        _ = tokio::signal::ctrl_c() => {
            screen.stop();
            view.abandon();
        }
    }
    Ok(())
}

pub fn run_hostels(save: &[String]) -> Result<()> {
    let hostels = catalog::hostels();
    let mut shortlist = Shortlist::new(&hostels);
    for id in save {
        shortlist.toggle(id)?;
    }

    for hostel in &hostels {
        ui::print_hostel(hostel, shortlist.is_saved(&hostel.id));
    }
    println!();
    println!("{} saved", shortlist.saved().len());
    Ok(())
}

pub fn run_decor(config: &BuddiesConfig, count: Option<usize>) -> Result<()> {
    let mut rng = StdRandom::new(config.seed);
    let layout = serde_json::json!({
        "floating": scatter(count.unwrap_or(config.floating_elements), &mut rng),
        "bubbles": bubbles(LOADING_BUBBLES, &mut rng),
    });
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn question(id: &str) -> Item {
        catalog::questions().get(id).cloned().unwrap()
    }

    #[test]
    fn navigation_keys() {
        let item = question("sleep-schedule");
        assert_eq!(parse_quiz_input(&item, ""), Ok(QuizInput::Next));
        assert_eq!(parse_quiz_input(&item, " n "), Ok(QuizInput::Next));
        assert_eq!(parse_quiz_input(&item, "b"), Ok(QuizInput::Back));
        assert_eq!(parse_quiz_input(&item, "q"), Ok(QuizInput::Quit));
        assert_eq!(parse_quiz_input(&item, "r"), Ok(QuizInput::Restart));
    }

    #[test]
    fn single_select_picks_option_by_number() {
        let item = question("sleep-schedule");
        assert_eq!(
            parse_quiz_input(&item, "3"),
            Ok(QuizInput::Answer(Response::Choice("Night owl (1 AM - 9 AM)".into())))
        );
        assert!(parse_quiz_input(&item, "0").is_err());
        assert!(parse_quiz_input(&item, "5").is_err());
        assert!(parse_quiz_input(&item, "abc").is_err());
    }

    #[test]
    fn scale_accepts_one_to_five() {
        let item = question("cleanliness");
        assert_eq!(
            parse_quiz_input(&item, "4"),
            Ok(QuizInput::Answer(Response::Scale(Rating::new(4).unwrap())))
        );
        assert!(parse_quiz_input(&item, "6").is_err());
        assert!(parse_quiz_input(&item, "300").is_err());
    }

    #[test]
    fn multi_select_toggles() {
        let item = question("sharing-preferences");
        assert_eq!(
            parse_quiz_input(&item, "1"),
            Ok(QuizInput::Toggle("Kitchen utensils".into()))
        );
    }

    fn full_answers() -> BTreeMap<String, Response> {
        let json = r#"{
            "sleep-schedule": "Regular (11 PM - 7 AM)",
            "cleanliness": 4,
            "social-level": "Occasional hangouts",
            "cooking-habits": "Cook for myself mostly",
            "noise-tolerance": "Moderate tolerance",
            "sharing-preferences": ["Kitchen utensils", "Cleaning supplies"],
            "work-style": "9-5 office job",
            "guests-policy": "Guests are fine with notice"
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn replay_completes_quiz() {
        let mut quiz = Quiz::new(catalog::questions());
        let summary = replay_answers(&mut quiz, &full_answers()).unwrap();
        assert!(summary.complete);
        assert_eq!(summary.answered, 8);
        assert_eq!(summary.total, 8);
        assert_eq!(summary.answers[1].value, "4");
        assert_eq!(summary.answers[5].value, "Cleaning supplies, Kitchen utensils");
    }

    #[test]
    fn replay_stops_at_missing_answer() {
        let mut answers = full_answers();
        answers.remove("noise-tolerance");
        let mut quiz = Quiz::new(catalog::questions());
        let err = replay_answers(&mut quiz, &answers).unwrap_err();
        assert!(err.to_string().contains("noise-tolerance"));
        assert!(!quiz.state().complete);
        assert_eq!(quiz.current().id.as_str(), "noise-tolerance");
    }

    #[test]
    fn replay_rejects_unknown_ids() {
        let mut answers = full_answers();
        answers.insert("pets".into(), Response::Choice("Cat".into()));
        let mut quiz = Quiz::new(catalog::questions());
        let err = replay_answers(&mut quiz, &answers).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FlowError>(),
            Some(FlowError::UnknownItem(_))
        ));
        assert_eq!(quiz.state().responses.answered_count(), 0);
    }

    #[test]
    fn replay_rejects_wrong_shape() {
        let mut answers = full_answers();
        answers.insert("cleanliness".into(), Response::Choice("very".into()));
        let mut quiz = Quiz::new(catalog::questions());
        assert!(replay_answers(&mut quiz, &answers).is_err());
    }

    #[test]
    fn load_answers_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "sleep-schedule = \"Irregular/Shift work\"\ncleanliness = 2\nsharing-preferences = [\"Food items\"]"
        )
        .unwrap();

        let answers = load_answers(file.path()).unwrap();
        assert_eq!(answers.len(), 3);
        assert_eq!(
            answers.get("cleanliness"),
            Some(&Response::Scale(Rating::new(2).unwrap()))
        );
    }

    #[test]
    fn load_answers_reports_bad_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, "{{ not json").unwrap();
        assert!(matches!(load_answers(file.path()), Err(FlowError::Json(_))));
    }

    #[test]
    fn quiz_stops_when_input_is_exhausted() {
        let mut quiz = Quiz::new(catalog::questions());
        let summary = drive_quiz(&mut quiz, &mut Cursor::new(&b""[..])).unwrap();
        assert!(summary.is_none());
        assert!(!quiz.state().complete);
    }

    #[test]
    fn quiz_blocked_on_empty_lines_still_ends_at_eof() {
        let mut quiz = Quiz::new(catalog::questions());
        let summary = drive_quiz(&mut quiz, &mut Cursor::new(&b"\n\n\n"[..])).unwrap();
        assert!(summary.is_none());
        assert_eq!(quiz.state().cursor, 0);
    }

    #[test]
    fn quiz_completes_from_line_input() {
        let script = "2\nn\n4\nn\n2\nn\n2\nn\n2\nn\n1\n2\nn\n2\nn\n2\nn\n";
        let mut quiz = Quiz::new(catalog::questions());
        let summary = drive_quiz(&mut quiz, &mut Cursor::new(script.as_bytes()))
            .unwrap()
            .expect("quiz should complete");
        assert_eq!(summary.answered, 8);
        assert_eq!(summary.answers[0].value, "Regular (11 PM - 7 AM)");
        assert_eq!(summary.answers[5].value, "Cleaning supplies, Kitchen utensils");
    }

    #[test]
    fn swipe_prompt_stops_at_eof() {
        let mut deck = SwipeDeck::new(catalog::roommates());
        drive_swipe(&mut deck, &mut Cursor::new(&b"y\nn\n"[..])).unwrap();
        assert_eq!(deck.match_count(), 1);
        assert_eq!(deck.cursor(), 2);

        let mut deck = SwipeDeck::new(catalog::roommates());
        drive_swipe(&mut deck, &mut Cursor::new(&b""[..])).unwrap();
        assert_eq!(deck.match_count(), 0);
    }

    #[test]
    fn swipe_prompt_quits_on_q() {
        let mut deck = SwipeDeck::new(catalog::roommates());
        drive_swipe(&mut deck, &mut Cursor::new(&b"y\nq\ny\n"[..])).unwrap();
        assert_eq!(deck.match_count(), 1);
    }

    #[test]
    fn replay_refuses_values_outside_the_options() {
        let mut answers = full_answers();
        answers.insert("sleep-schedule".into(), Response::Choice("Banana".into()));
        let mut quiz = Quiz::new(catalog::questions());
        let err = replay_answers(&mut quiz, &answers).unwrap_err();
        assert!(err.chain().any(|cause| matches!(
            cause.downcast_ref::<FlowError>(),
            Some(FlowError::UnknownOption { .. })
        )));

        let mut answers = full_answers();
        let odd: std::collections::BTreeSet<String> = ["Not an option".to_string()].into();
        answers.insert("sharing-preferences".into(), Response::Choices(odd));
        let mut quiz = Quiz::new(catalog::questions());
        assert!(replay_answers(&mut quiz, &answers).is_err());
        assert!(!quiz.state().complete);
    }

    #[test]
    fn decisions_script() {
        let decisions = parse_decisions("y n Y").unwrap();
        assert_eq!(
            decisions,
            vec![Decision::Accept, Decision::Reject, Decision::Accept]
        );
        assert!(parse_decisions("yx").is_err());
    }
}
