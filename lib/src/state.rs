use crate::charset::CharSet;
use crate::knowledge::{FeedbackEvent, Knowledge};
use crate::results::{Feedback, GuessFeedback};
use crate::words::{Word, BLANK, WORD_LEN};

/// Round-scoped solving state: the partial solution, the accumulated
/// knowledge and the candidate pool. The pool starts as the whole solution
/// corpus and only ever shrinks.
#[derive(Debug, Clone)]
pub struct SolveState {
    partial: Word,
    knowledge: Knowledge,
    candidates: Vec<Word>,
}

impl SolveState {
    pub fn new(solutions: &[Word]) -> SolveState {
        SolveState {
            partial: Word::EMPTY,
            knowledge: Knowledge::new(),
            candidates: solutions.to_vec(),
        }
    }

    /// The word so far: a letter per confirmed slot, blanks elsewhere.
    pub fn partial_solution(&self) -> Word {
        self.partial
    }

    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    /// The words still consistent with every piece of feedback seen.
    pub fn candidates(&self) -> &[Word] {
        &self.candidates
    }

    /// Folds one guess's feedback into the state.
    ///
    /// Slots already confirmed with the guessed letter are skipped, then
    /// the remaining events run grouped by category, correct before
    /// misplaced before absent, because an absent mark on a letter that
    /// also earned a correct or misplaced mark in the same guess must not
    /// erase the letter everywhere. An emptied pool is left empty for the
    /// caller to report.
    pub fn apply_feedback(&mut self, guess: Word, feedback: GuessFeedback) {
        let mut events: Vec<FeedbackEvent> = (0..WORD_LEN)
            .map(|slot| (slot, guess.at(slot), feedback.at(slot)))
            .filter(|&(slot, code, _)| self.partial.at(slot) != code)
            .collect();
        events.sort_by_key(|&(_, _, category)| category);

        let before = self.candidates.len();

        for &(slot, code, category) in &events {
            if category == Feedback::Correct && self.partial.at(slot) == BLANK {
                self.partial = self.partial.with_letter_at(slot, code);
            }
        }
        self.knowledge = self.knowledge.apply(&events, self.partial);

        let unsolved = self.partial.unsolved_slots();
        let mut misplaced_here = CharSet::EMPTY;
        for &(slot, code, category) in &events {
            if self.candidates.len() <= 1 {
                // Solved or conflicted; nothing left to narrow.
                break;
            }
            match category {
                Feedback::Correct => {
                    self.candidates.retain(|word| word.at(slot) == code);
                }
                Feedback::Misplaced => {
                    misplaced_here = misplaced_here.set(code);
                    self.candidates.retain(|word| {
                        word.at(slot) != code
                            && unsolved
                                .iter()
                                .any(|other| other as usize != slot && word.at(other as usize) == code)
                    });
                }
                Feedback::Absent => {
                    if misplaced_here.contains(code) {
                        self.candidates.retain(|word| word.at(slot) != code);
                    } else {
                        self.candidates.retain(|word| {
                            unsolved.iter().all(|other| word.at(other as usize) != code)
                        });
                    }
                }
            }
        }

        if self.candidates.len() == 1 && before > 1 {
            self.promote_shared_letters();
        }
    }

    /// Letters every remaining candidate agrees on can be claimed without
    /// spending a guess.
    fn promote_shared_letters(&mut self) {
        for slot in 0..WORD_LEN {
            if self.partial.at(slot) != BLANK {
                continue;
            }
            let first = self.candidates[0].at(slot);
            if first != BLANK && self.candidates.iter().all(|word| word.at(slot) == first) {
                self.partial = self.partial.with_letter_at(slot, first);
            }
        }
    }
}
