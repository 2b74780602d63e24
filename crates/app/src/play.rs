use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use quiz_core::model::{PlayerName, QuestionOptions, ScoreRecord};
use services::{PresentationPort, QuizLoop, QuizLoopError, SessionState};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The game ran to the end and the score was saved.
    Finished(ScoreRecord),
    /// The player left early; nothing was saved.
    Quit,
}

/// Wall-clock seconds between successive laps.
#[derive(Debug)]
pub struct Stopwatch(Instant);

impl Stopwatch {
    #[must_use]
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn lap(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.0);
        self.0 = now;
        elapsed.as_secs_f32()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Answer(usize),
    Replay,
    Invalid,
}

/// `None` when the player asked to quit.
fn parse_command(line: &str, option_count: usize) -> Option<Command> {
    let command = match line.trim() {
        "q" | "quit" => return None,
        "p" | "play" => Command::Replay,
        raw => match raw.parse::<usize>() {
            Ok(n) if (1..=option_count).contains(&n) => Command::Answer(n - 1),
            _ => Command::Invalid,
        },
    };
    Some(command)
}

/// Run one game reading answers line by line from `input`.
///
/// `elapsed` reports the seconds since its previous call. Time spent typing
/// is fed to the countdown before the answer is submitted, so a late answer
/// counts as a timeout and is ignored.
pub fn run_play<P, R, W>(
    quiz: &mut QuizLoop<P>,
    player: PlayerName,
    input: R,
    out: &mut W,
    mut elapsed: impl FnMut() -> f32,
) -> Result<PlayOutcome>
where
    P: PresentationPort,
    R: BufRead,
    W: Write,
{
    quiz.start(player).context("could not start the quiz")?;
    elapsed();

    let mut lines = input.lines();
    let mut played = None;

    while quiz.session().state() == SessionState::Running {
        let Some(asked) = quiz.session().current_question().cloned() else {
            break;
        };
        if played != Some(asked.number()) {
            quiz.play_current_clip()?;
            played = Some(asked.number());
        }
        write!(out, "answer 1-{} (p replays, q quits): ", asked.len())?;
        out.flush()?;

        let Some(line) = lines.next() else {
            return Ok(PlayOutcome::Quit);
        };
        let line = line.context("failed to read answer")?;
        let Some(command) = parse_command(&line, asked.len()) else {
            return Ok(PlayOutcome::Quit);
        };

        let ticked = quiz.advance(elapsed());
        if !matches!(settle(quiz, ticked)?, Some(None)) {
            writeln!(out, "time's up! it was {}", asked.correct_clip().name())?;
            continue;
        }

        match command {
            Command::Replay => quiz.play_current_clip()?,
            Command::Invalid => writeln!(out, "enter a number from 1 to {}", asked.len())?,
            Command::Answer(index) => {
                let submitted = quiz.submit_answer_to(asked.number(), index);
                match settle(quiz, submitted)? {
                    Some(None) => writeln!(out, "too late for that one")?,
                    _ => feedback(out, &asked, index)?,
                }
            }
        }
    }

    Ok(match quiz.session().report() {
        Some(report) => PlayOutcome::Finished(report.score_record()),
        None => PlayOutcome::Quit,
    })
}

/// Unwrap a loop result, retrying the score save once if it failed.
///
/// `None` means the call succeeded but its value was lost to the failed save.
fn settle<P: PresentationPort, T>(
    quiz: &mut QuizLoop<P>,
    result: Result<T, QuizLoopError>,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(QuizLoopError::Leaderboard(err)) => {
            warn!(error = %err, "saving the score failed, retrying");
            quiz.finalize_score().context("could not save the score")?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn feedback<W: Write>(out: &mut W, asked: &QuestionOptions, index: usize) -> Result<()> {
    if asked.is_correct(index) {
        writeln!(out, "correct!")?;
    } else {
        writeln!(out, "wrong, it was {}", asked.correct_clip().name())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use super::*;
    use crate::catalog::build_pool;
    use crate::terminal::TerminalPresentation;
    use services::{LeaderboardService, NullPresentation, QuizSession};
    use storage::{InMemoryStore, LeaderboardStore};

    const SEED: u64 = 9;
    const QUESTIONS: u32 = 3;

    fn pool() -> quiz_core::ClipPool {
        build_pool(["Heroes", "Airbag", "Teardrop", "Hyperballad"].map(String::from)).unwrap()
    }

    fn quiz(store: Arc<InMemoryStore>) -> QuizLoop<TerminalPresentation<Vec<u8>>> {
        let session = QuizSession::for_pool(
            10.0,
            QUESTIONS,
            3,
            pool(),
            TerminalPresentation::new(Vec::new()),
        )
        .unwrap()
        .with_seed(SEED);
        QuizLoop::new(session, LeaderboardService::load(store))
    }

    /// Correct option numbers (1-based) for the seeded game.
    fn answer_key() -> Vec<usize> {
        let mut twin = QuizSession::for_pool(10.0, QUESTIONS, 3, pool(), NullPresentation)
            .unwrap()
            .with_seed(SEED);
        twin.start(PlayerName::new("twin").unwrap()).unwrap();
        let mut key = Vec::new();
        while let Some(q) = twin.current_question() {
            let index = q.correct_index();
            key.push(index + 1);
            twin.submit_answer(index).unwrap();
        }
        key
    }

    fn play(
        quiz: &mut QuizLoop<TerminalPresentation<Vec<u8>>>,
        input: &str,
        laps: &[f32],
    ) -> (PlayOutcome, String) {
        let mut laps = laps.iter().copied();
        let mut out = Vec::new();
        let outcome = run_play(
            quiz,
            PlayerName::new("Ada").unwrap(),
            Cursor::new(input.to_owned()),
            &mut out,
            || laps.next().unwrap_or(0.0),
        )
        .unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn perfect_game_is_saved() {
        let store = Arc::new(InMemoryStore::new());
        let mut quiz = quiz(store.clone());
        let input: String = answer_key().iter().map(|n| format!("{n}\n")).collect();

        let (outcome, text) = play(&mut quiz, &input, &[]);

        assert_eq!(
            outcome,
            PlayOutcome::Finished(ScoreRecord::new(PlayerName::new("Ada").unwrap(), 3))
        );
        assert_eq!(text.matches("correct!").count(), 3);
        assert_eq!(store.load_records().unwrap()[0].score(), 3);
        let screen = String::from_utf8_lossy(quiz.session().presentation().get_ref());
        assert!(screen.contains("Final score: 3"));
    }

    #[test]
    fn slow_answers_become_timeouts() {
        let store = Arc::new(InMemoryStore::new());
        let mut quiz = quiz(store.clone());
        let input: String = answer_key().iter().map(|n| format!("{n}\n")).collect();

        // First lap resets the stopwatch; every answer then takes 12 seconds.
        let (outcome, text) = play(&mut quiz, &input, &[0.0, 12.0, 12.0, 12.0]);

        assert!(matches!(outcome, PlayOutcome::Finished(ref r) if r.score() == 0));
        assert_eq!(text.matches("time's up!").count(), 3);
        assert_eq!(quiz.session().current_stats().timeout_count, 3);
    }

    #[test]
    fn replay_and_invalid_input_do_not_use_up_a_question() {
        let store = Arc::new(InMemoryStore::new());
        let mut quiz = quiz(store.clone());
        let key = answer_key();
        let input = format!("p\n7\nbanana\n{}\nq\n", key[0]);

        let (outcome, text) = play(&mut quiz, &input, &[]);

        assert_eq!(outcome, PlayOutcome::Quit);
        assert_eq!(text.matches("enter a number from 1 to 3").count(), 2);
        assert_eq!(quiz.session().current_stats().correct_count, 1);
        assert_eq!(quiz.session().state(), SessionState::Running);
        assert!(store.load_records().is_err());
    }

    #[test]
    fn end_of_input_quits() {
        let mut quiz = quiz(Arc::new(InMemoryStore::new()));
        let (outcome, _) = play(&mut quiz, "", &[]);
        assert_eq!(outcome, PlayOutcome::Quit);
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command(" 2 ", 4), Some(Command::Answer(1)));
        assert_eq!(parse_command("0", 4), Some(Command::Invalid));
        assert_eq!(parse_command("5", 4), Some(Command::Invalid));
        assert_eq!(parse_command("p", 4), Some(Command::Replay));
        assert_eq!(parse_command("quit", 4), None);
    }
}
