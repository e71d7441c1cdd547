#[macro_use]
extern crate assert_matches;

use rand::rngs::StdRng;
use rand::RngCore;
use rand::SeedableRng;
use wordle_autopilot::*;

fn word(literal: &str) -> Word {
    Word::new(literal).unwrap()
}

/// Plays from a fixed script, then falls back to the first remaining
/// candidate.
struct ScriptedGuesser {
    script: Vec<Word>,
}

impl Guesser for ScriptedGuesser {
    fn select_guess(
        &self,
        _rng: &mut dyn RngCore,
        state: &SolveState,
        attempt: u32,
        _remaining_attempts: u32,
    ) -> Option<Word> {
        match self.script.get((attempt - 1) as usize) {
            Some(&scripted) => Some(scripted),
            None => state.candidates().first().copied(),
        }
    }
}

/// Claims every letter is absent, whatever the guess.
struct AllAbsentFeedback;

impl FeedbackProvider for AllAbsentFeedback {
    fn feedback_for(&mut self, _guess: Word, _num_remaining: usize) -> Option<GuessFeedback> {
        Some("nnnnn".parse().unwrap())
    }
}

/// Never answers.
struct UnavailableFeedback;

impl FeedbackProvider for UnavailableFeedback {
    fn feedback_for(&mut self, _guess: Word, _num_remaining: usize) -> Option<GuessFeedback> {
        None
    }
}

#[test]
fn solves_grain_in_exactly_three_guesses() -> Result<(), SolverError> {
    let corpus = ["grain", "track", "brain", "baker", "cramp", "mambo", "probe"];
    let bank = WordBank::from_words(&corpus, &corpus)?;
    let guesser = ScriptedGuesser {
        script: vec![word("baker"), word("cramp")],
    };
    let mut solver = Solver::new(
        &bank,
        guesser,
        SimulatedFeedbackProvider::new(word("grain")),
        (),
    );

    let outcome = solver.solve(&mut StdRng::seed_from_u64(1));

    assert_eq!(
        outcome,
        SolveOutcome::Solved {
            solution: word("grain"),
            guesses: vec![word("baker"), word("cramp"), word("grain")],
        }
    );
    Ok(())
}

#[test]
fn solves_a_simulated_game_end_to_end() -> Result<(), SolverError> {
    let corpus = ["grain", "track", "cramp", "probe", "mambo"];
    let bank = WordBank::from_words(&corpus, &corpus)?;

    let outcome = play_game(
        word("grain"),
        DEFAULT_MAX_ATTEMPTS,
        &bank,
        &mut StdRng::seed_from_u64(42),
    );

    assert_eq!(outcome.solution(), Some(word("grain")));
    assert!(outcome.guesses().len() <= DEFAULT_MAX_ATTEMPTS as usize);
    Ok(())
}

#[test]
fn contradictory_feedback_fails_once_the_pool_empties() -> Result<(), SolverError> {
    let corpus = ["grain", "track", "probe"];
    let bank = WordBank::from_words(&corpus, &corpus)?;
    let guesser = MaxScoreGuesser::new(&bank);
    let mut solver = Solver::new(&bank, guesser, AllAbsentFeedback, ());

    let outcome = solver.solve(&mut StdRng::seed_from_u64(3));

    assert_matches!(
        outcome,
        SolveOutcome::Failed {
            reason: FailureReason::NoCandidatesLeft,
            ..
        }
    );
    // Every word in this corpus shares a letter with every other, so one
    // all-absent round wipes the pool.
    assert_eq!(outcome.guesses().len(), 1);
    Ok(())
}

#[test]
fn missing_feedback_fails_after_a_single_guess() -> Result<(), SolverError> {
    let corpus = ["grain", "track", "probe"];
    let bank = WordBank::from_words(&corpus, &corpus)?;
    let guesser = MaxScoreGuesser::new(&bank);
    let mut solver = Solver::new(&bank, guesser, UnavailableFeedback, ());

    let outcome = solver.solve(&mut StdRng::seed_from_u64(3));

    assert_matches!(
        outcome,
        SolveOutcome::Failed {
            reason: FailureReason::FeedbackUnavailable,
            ..
        }
    );
    assert_eq!(outcome.guesses().len(), 1);
    Ok(())
}

#[test]
fn attempt_ceiling_ends_an_unsolved_game() -> Result<(), SolverError> {
    // Three words with no letters in common: an all-absent round removes
    // only the guessed one and the pool survives.
    let corpus = ["abcde", "fghij", "klmno"];
    let bank = WordBank::from_words(&corpus, &corpus)?;
    let guesser = MaxScoreGuesser::new(&bank);
    let mut solver = Solver::new(&bank, guesser, AllAbsentFeedback, ()).with_max_attempts(1);

    let outcome = solver.solve(&mut StdRng::seed_from_u64(3));

    assert_matches!(
        outcome,
        SolveOutcome::Failed {
            reason: FailureReason::AttemptsExhausted,
            ..
        }
    );
    assert_eq!(outcome.guesses().len(), 1);
    Ok(())
}

#[test]
fn empty_corpus_fails_without_guessing() -> Result<(), SolverError> {
    let bank = WordBank::from_words::<&str, &str>(&[], &[])?;
    let guesser = MaxScoreGuesser::new(&bank);
    let mut solver = Solver::new(&bank, guesser, AllAbsentFeedback, ());

    let outcome = solver.solve(&mut StdRng::seed_from_u64(3));

    assert_matches!(
        outcome,
        SolveOutcome::Failed {
            reason: FailureReason::NoCandidatesLeft,
            ..
        }
    );
    assert!(outcome.guesses().is_empty());
    Ok(())
}

#[test]
fn same_seed_reproduces_the_guess_sequence() -> Result<(), SolverError> {
    let corpus = [
        "grain", "track", "probe", "mambo", "cramp", "brain", "drain",
    ];
    let bank = WordBank::from_words(&corpus, &corpus)?;

    let run = |seed: u64| {
        play_game(
            word("drain"),
            DEFAULT_MAX_ATTEMPTS,
            &bank,
            &mut StdRng::seed_from_u64(seed),
        )
    };

    assert_eq!(run(9), run(9));
    Ok(())
}

#[test]
fn reporter_sees_every_round_and_the_outcome() -> Result<(), SolverError> {
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        rounds: Vec<(u32, Word, usize)>,
        outcomes: usize,
    }

    struct Recording(Rc<RefCell<Log>>);

    impl Reporter for Recording {
        fn on_guess(&mut self, attempt: u32, guess: Word, num_remaining: usize) {
            self.0.borrow_mut().rounds.push((attempt, guess, num_remaining));
        }

        fn on_outcome(&mut self, _outcome: &SolveOutcome) {
            self.0.borrow_mut().outcomes += 1;
        }
    }

    let corpus = ["grain", "track", "brain", "baker", "cramp", "mambo", "probe"];
    let bank = WordBank::from_words(&corpus, &corpus)?;
    let guesser = ScriptedGuesser {
        script: vec![word("baker"), word("cramp")],
    };
    let log = Rc::new(RefCell::new(Log::default()));
    let mut solver = Solver::new(
        &bank,
        guesser,
        SimulatedFeedbackProvider::new(word("grain")),
        Recording(Rc::clone(&log)),
    );

    solver.solve(&mut StdRng::seed_from_u64(1));

    let log = log.borrow();
    assert_eq!(log.rounds.len(), 3);
    assert_eq!(log.rounds[0], (1, word("baker"), 7));
    assert_eq!(log.rounds[1], (2, word("cramp"), 2));
    assert_eq!(log.rounds[2], (3, word("grain"), 1));
    assert_eq!(log.outcomes, 1);
    Ok(())
}
