use crate::charset::NUM_CODES;
use crate::words::{Word, WORD_LEN};
use std::error::Error;
use std::fmt;
use std::io;
use std::str::FromStr;

/// The per-letter feedback categories. The derived order is the order the
/// categories must be processed in when interpreting a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feedback {
    /// The letter occupies this exact slot.
    Correct,
    /// The letter is in the word, but somewhere else.
    Misplaced,
    /// No more occurrences of the letter beyond those already marked.
    Absent,
}

impl Feedback {
    pub fn from_char(c: char) -> Option<Feedback> {
        match c {
            'c' => Some(Feedback::Correct),
            'm' => Some(Feedback::Misplaced),
            'n' => Some(Feedback::Absent),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Feedback::Correct => 'c',
            Feedback::Misplaced => 'm',
            Feedback::Absent => 'n',
        }
    }
}

/// Feedback for one whole guess, one category per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessFeedback([Feedback; WORD_LEN]);

impl GuessFeedback {
    /// The all-correct pattern that ends a game.
    pub const SOLVED: GuessFeedback = GuessFeedback([Feedback::Correct; WORD_LEN]);

    pub fn at(self, slot: usize) -> Feedback {
        self.0[slot]
    }

    pub fn is_solved(self) -> bool {
        self.0.iter().all(|category| *category == Feedback::Correct)
    }
}

impl FromStr for GuessFeedback {
    type Err = SolverError;

    fn from_str(line: &str) -> Result<GuessFeedback, SolverError> {
        let length = line.chars().count();
        if length != WORD_LEN {
            return Err(SolverError::MalformedFeedback(format!(
                "expected {} characters, got {}",
                WORD_LEN, length
            )));
        }
        let mut categories = [Feedback::Absent; WORD_LEN];
        for (slot, c) in line.chars().enumerate() {
            categories[slot] = Feedback::from_char(c).ok_or_else(|| {
                SolverError::MalformedFeedback(format!(
                    "invalid character '{}' at position {}; use only c, m or n",
                    c,
                    slot + 1
                ))
            })?;
        }
        Ok(GuessFeedback(categories))
    }
}

impl fmt::Display for GuessFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in self.0 {
            write!(f, "{}", category.as_char())?;
        }
        Ok(())
    }
}

/// Derives the feedback the game would give for `guess` against a known
/// `solution`. Exact matches are marked first and consume their letter
/// from a per-letter count sieve; a second pass marks leftover occurrences
/// misplaced while the sieve still holds a count, and absent after that.
/// Duplicate guess letters therefore earn at most as many non-absent marks
/// as the solution has occurrences.
pub fn feedback_for_guess(solution: Word, guess: Word) -> GuessFeedback {
    let mut sieve = [0u8; NUM_CODES];
    for slot in 0..WORD_LEN {
        sieve[solution.at(slot) as usize] += 1;
    }
    let mut categories = [Feedback::Absent; WORD_LEN];
    for slot in 0..WORD_LEN {
        let code = guess.at(slot);
        if solution.at(slot) == code {
            categories[slot] = Feedback::Correct;
            sieve[code as usize] -= 1;
        }
    }
    for slot in 0..WORD_LEN {
        if categories[slot] == Feedback::Correct {
            continue;
        }
        let code = guess.at(slot) as usize;
        if sieve[code] > 0 {
            categories[slot] = Feedback::Misplaced;
            sieve[code] -= 1;
        }
    }
    GuessFeedback(categories)
}

/// Source of feedback for each guess. `None` means no feedback could be
/// obtained and the solve must stop.
pub trait FeedbackProvider {
    fn feedback_for(&mut self, guess: Word, num_remaining: usize) -> Option<GuessFeedback>;
}

/// Derives feedback from a known solution. Used for simulated games,
/// benchmarks and tests.
pub struct SimulatedFeedbackProvider {
    solution: Word,
}

impl SimulatedFeedbackProvider {
    pub fn new(solution: Word) -> SimulatedFeedbackProvider {
        SimulatedFeedbackProvider { solution }
    }
}

impl FeedbackProvider for SimulatedFeedbackProvider {
    fn feedback_for(&mut self, guess: Word, _num_remaining: usize) -> Option<GuessFeedback> {
        Some(feedback_for_guess(self.solution, guess))
    }
}

/// Why a solve ended without finding the solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The feedback provider returned no answer.
    FeedbackUnavailable,
    /// Every candidate was eliminated; the corpus has a gap or the
    /// feedback contradicted itself.
    NoCandidatesLeft,
    /// The attempt ceiling was reached without an all-correct round.
    AttemptsExhausted,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            FailureReason::FeedbackUnavailable => "failed to acquire feedback for guess",
            FailureReason::NoCandidatesLeft => "algorithm failure, no remaining words available",
            FailureReason::AttemptsExhausted => "maximum attempts reached without solution",
        };
        f.write_str(reason)
    }
}

/// Terminal result of one solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The word was found; the guesses include the winning one.
    Solved { solution: Word, guesses: Vec<Word> },
    /// The solve ended early; the guesses show how far it got.
    Failed {
        reason: FailureReason,
        guesses: Vec<Word>,
    },
}

impl SolveOutcome {
    pub fn guesses(&self) -> &[Word] {
        match self {
            SolveOutcome::Solved { guesses, .. } => guesses,
            SolveOutcome::Failed { guesses, .. } => guesses,
        }
    }

    pub fn solution(&self) -> Option<Word> {
        match self {
            SolveOutcome::Solved { solution, .. } => Some(*solution),
            SolveOutcome::Failed { .. } => None,
        }
    }
}

/// Errors surfaced while building words or parsing feedback.
#[derive(Debug)]
pub enum SolverError {
    /// A word literal with the wrong number of characters.
    WordLength { expected: usize, actual: usize },
    /// A character outside the supported alphabet.
    UnsupportedCharacter(char),
    /// A feedback line that is not [`WORD_LEN`] of `c`/`m`/`n`.
    MalformedFeedback(String),
    /// Reading a word list failed.
    Io(io::Error),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::WordLength { expected, actual } => {
                write!(
                    f,
                    "expected a {expected}-letter word, got {actual} characters"
                )
            }
            SolverError::UnsupportedCharacter(c) => {
                write!(f, "unsupported character {c:?}")
            }
            SolverError::MalformedFeedback(detail) => {
                write!(f, "malformed feedback line: {detail}")
            }
            SolverError::Io(err) => write!(f, "failed to read word list: {err}"),
        }
    }
}

impl Error for SolverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SolverError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SolverError {
    fn from(err: io::Error) -> SolverError {
        SolverError::Io(err)
    }
}
