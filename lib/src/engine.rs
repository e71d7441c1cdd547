use crate::results::{FailureReason, FeedbackProvider, SimulatedFeedbackProvider, SolveOutcome};
use crate::selector::{Guesser, MaxScoreGuesser};
use crate::state::SolveState;
use crate::words::{Word, WordBank};
use rand::RngCore;

/// Attempt ceiling used when the caller does not pick one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;

/// Receives progress notices from the solve loop.
pub trait Reporter {
    /// A guess is about to be submitted for feedback.
    fn on_guess(&mut self, attempt: u32, guess: Word, num_remaining: usize);

    /// The solve reached a terminal state.
    fn on_outcome(&mut self, outcome: &SolveOutcome);
}

/// No-op reporting for callers that only want the outcome.
impl Reporter for () {
    fn on_guess(&mut self, _attempt: u32, _guess: Word, _num_remaining: usize) {}

    fn on_outcome(&mut self, _outcome: &SolveOutcome) {}
}

/// Drives guess/feedback rounds until the word is found or a terminal
/// failure is reached. One round completes fully before the next begins;
/// the feedback call is the only point where control leaves the solver.
pub struct Solver<'a, G, F, R> {
    bank: &'a WordBank,
    guesser: G,
    feedback: F,
    reporter: R,
    max_attempts: u32,
}

impl<'a, G: Guesser, F: FeedbackProvider, R: Reporter> Solver<'a, G, F, R> {
    pub fn new(bank: &'a WordBank, guesser: G, feedback: F, reporter: R) -> Solver<'a, G, F, R> {
        Solver {
            bank,
            guesser,
            feedback,
            reporter,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Replaces the attempt ceiling.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Solver<'a, G, F, R> {
        self.max_attempts = max_attempts;
        self
    }

    /// Runs one full solve. The caller owns the random source, so a fixed
    /// seed reproduces the same guess sequence against the same feedback.
    pub fn solve(&mut self, rng: &mut dyn RngCore) -> SolveOutcome {
        let outcome = self.run_rounds(rng);
        self.reporter.on_outcome(&outcome);
        outcome
    }

    fn run_rounds(&mut self, rng: &mut dyn RngCore) -> SolveOutcome {
        let mut state = SolveState::new(self.bank.solutions());
        let mut guesses: Vec<Word> = Vec::new();
        for attempt in 1..=self.max_attempts {
            let remaining_attempts = self.max_attempts - attempt + 1;
            let guess = match self
                .guesser
                .select_guess(rng, &state, attempt, remaining_attempts)
            {
                Some(guess) => guess,
                None => {
                    return SolveOutcome::Failed {
                        reason: FailureReason::NoCandidatesLeft,
                        guesses,
                    }
                }
            };
            guesses.push(guess);
            self.reporter
                .on_guess(attempt, guess, state.candidates().len());

            let feedback = match self.feedback.feedback_for(guess, state.candidates().len()) {
                Some(feedback) => feedback,
                None => {
                    return SolveOutcome::Failed {
                        reason: FailureReason::FeedbackUnavailable,
                        guesses,
                    }
                }
            };
            if feedback.is_solved() {
                return SolveOutcome::Solved {
                    solution: guess,
                    guesses,
                };
            }

            state.apply_feedback(guess, feedback);
            if state.candidates().is_empty() {
                return SolveOutcome::Failed {
                    reason: FailureReason::NoCandidatesLeft,
                    guesses,
                };
            }
        }
        SolveOutcome::Failed {
            reason: FailureReason::AttemptsExhausted,
            guesses,
        }
    }
}

/// Plays one simulated game against a known solution with the default
/// guesser, reporting nothing.
pub fn play_game(
    solution: Word,
    max_attempts: u32,
    bank: &WordBank,
    rng: &mut dyn RngCore,
) -> SolveOutcome {
    let guesser = MaxScoreGuesser::new(bank);
    let mut solver = Solver::new(bank, guesser, SimulatedFeedbackProvider::new(solution), ())
        .with_max_attempts(max_attempts);
    solver.solve(rng)
}
