use crate::charset::{CharSet, NUM_CODES};
use crate::state::SolveState;
use crate::words::{Word, WordBank, BLANK, WORD_LEN};
use rand::{Rng, RngCore};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

// a, e, i, o, u
const VOWELS: CharSet = CharSet::EMPTY.set(1).set(5).set(9).set(15).set(21);

/// Picks the next guess for the current state of a game.
pub trait Guesser {
    /// Returns the next guess, or `None` when no candidate remains.
    fn select_guess(
        &self,
        rng: &mut dyn RngCore,
        state: &SolveState,
        attempt: u32,
        remaining_attempts: u32,
    ) -> Option<Word>;
}

/// Tuning weights for the scoring path. The defaults keep the intended
/// ordering intact: a letter plausible at its slot outranks a fresh
/// letter, which outranks a letter the partial solution already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    /// Letter previously seen misplaced and allowed at this slot.
    pub plausible_here: i64,
    /// Letter not yet part of the partial solution.
    pub fresh: i64,
    /// Letter known to sit somewhere else in the solution.
    pub in_solution: i64,
    /// Letter is the most common candidate letter at this slot.
    pub slot_frequency: i64,
    /// Mild bias toward consonants.
    pub consonant: i64,
    /// The whole word is a member of the solution corpus.
    pub solution_member: i64,
}

impl Default for ScoreWeights {
    fn default() -> ScoreWeights {
        ScoreWeights {
            plausible_here: 5,
            fresh: 3,
            in_solution: 1,
            slot_frequency: 2,
            consonant: 1,
            solution_member: 1,
        }
    }
}

/// Scores every legal guess and plays the highest-value one, with a probe
/// tactic for the endgame where a single slot stays open against a deep
/// candidate pool.
pub struct MaxScoreGuesser {
    guess_words: Vec<Word>,
    solution_set: HashSet<Word>,
    single_occurrence: HashMap<u8, Vec<Word>>,
    weights: ScoreWeights,
}

impl MaxScoreGuesser {
    pub fn new(bank: &WordBank) -> MaxScoreGuesser {
        MaxScoreGuesser::with_weights(bank, ScoreWeights::default())
    }

    pub fn with_weights(bank: &WordBank, weights: ScoreWeights) -> MaxScoreGuesser {
        let guess_words = bank.guesses().to_vec();
        let mut single_occurrence: HashMap<u8, Vec<Word>> = HashMap::new();
        for &word in &guess_words {
            for code in word.unique_letters().iter() {
                if code != BLANK && word.contains_exactly_once(code).is_some() {
                    single_occurrence.entry(code).or_default().push(word);
                }
            }
        }
        MaxScoreGuesser {
            guess_words,
            solution_set: bank.solutions().iter().copied().collect(),
            single_occurrence,
            weights,
        }
    }

    fn score_word(&self, word: Word, state: &SolveState, commonest: &[u8; WORD_LEN]) -> i64 {
        let partial = state.partial_solution();
        let knowledge = state.knowledge();
        let mut scored = CharSet::EMPTY;
        let mut score = 0;
        for slot in 0..WORD_LEN {
            let code = word.at(slot);
            if partial.at(slot) == code {
                continue; // slot already settled, nothing to learn
            }
            if scored.contains(code) {
                continue; // repeats add no information
            }
            scored = scored.set(code);
            if knowledge.absent().contains(code) || knowledge.forbidden_at(slot).contains(code) {
                continue;
            }
            if knowledge.plausible_at(slot).contains(code) {
                score += self.weights.plausible_here;
            } else if !partial.contains(code) {
                score += self.weights.fresh;
            } else {
                score += self.weights.in_solution;
            }
            if commonest[slot] == code {
                score += self.weights.slot_frequency;
            }
            if !VOWELS.contains(code) {
                score += self.weights.consonant;
            }
        }
        if self.solution_set.contains(&word) {
            score += self.weights.solution_member;
        }
        score
    }

    /// Endgame probe: with one slot open and several candidate letters for
    /// it, spend a guess on a word packing as many of those letters as
    /// possible, each as a single occurrence so its feedback is
    /// attributable to exactly one candidate.
    fn probe_final_slot(
        &self,
        rng: &mut dyn RngCore,
        state: &SolveState,
        open_slot: usize,
    ) -> Option<Word> {
        let partial = state.partial_solution();
        let mut admitted = CharSet::EMPTY;
        for word in state.candidates() {
            let code = word.at(open_slot);
            if !partial.contains(code) {
                admitted = admitted.set(code);
            }
        }
        if admitted.is_empty() {
            return None;
        }

        let mut pool: Vec<Word> = Vec::new();
        let mut dedup: HashSet<Word> = HashSet::new();
        for code in admitted.iter() {
            if let Some(probes) = self.single_occurrence.get(&code) {
                for &probe in probes {
                    if dedup.insert(probe) {
                        pool.push(probe);
                    }
                }
            }
        }

        let coverage: Vec<(Word, u32)> = pool
            .iter()
            .map(|&probe| (probe, admitted.count_where(|code| probe.contains(code))))
            .collect();
        let best = coverage.iter().map(|&(_, covered)| covered).max()?;
        reservoir_sample(
            coverage
                .iter()
                .filter(|&&(_, covered)| covered == best)
                .map(|&(probe, _)| probe),
            rng,
        )
    }
}

impl Guesser for MaxScoreGuesser {
    fn select_guess(
        &self,
        rng: &mut dyn RngCore,
        state: &SolveState,
        _attempt: u32,
        remaining_attempts: u32,
    ) -> Option<Word> {
        let candidates = state.candidates();
        match candidates.len() {
            0 => return None,
            1 => return Some(candidates[0]),
            _ => {}
        }

        // With one open slot, a deep pool, and enough attempts left to
        // afford a probe, a wasted guess that splits the candidate letters
        // beats testing them one word at a time.
        if remaining_attempts > 1 && candidates.len() > 2 {
            if let Some(open_slot) = state.partial_solution().contains_exactly_once(BLANK) {
                if let Some(probe) = self.probe_final_slot(rng, state, open_slot) {
                    return Some(probe);
                }
            }
        }

        let commonest = commonest_by_slot(candidates);
        let scored: Vec<(Word, i64)> = self
            .guess_words
            .par_iter()
            .map(|&word| (word, self.score_word(word, state, &commonest)))
            .collect();
        let top_score = scored.iter().map(|&(_, score)| score).max()?;
        let top: Vec<Word> = scored
            .iter()
            .filter(|&&(_, score)| score == top_score)
            .map(|&(word, _)| word)
            .collect();
        if top.len() == 1 {
            return Some(top[0]);
        }

        let unsolved = state.partial_solution().unsolved_slots();
        let powers: Vec<(Word, usize)> = top
            .iter()
            .map(|&word| (word, elimination_power(word, candidates, unsolved)))
            .collect();
        let max_power = powers.iter().map(|&(_, power)| power).max()?;
        reservoir_sample(
            powers
                .iter()
                .filter(|&&(_, power)| power == max_power)
                .map(|&(word, _)| word),
            rng,
        )
    }
}

/// The most common candidate letter for each slot; ties go to the lower
/// letter code so the result is stable.
fn commonest_by_slot(candidates: &[Word]) -> [u8; WORD_LEN] {
    let mut counts = [[0u32; NUM_CODES]; WORD_LEN];
    for word in candidates {
        for slot in 0..WORD_LEN {
            counts[slot][word.at(slot) as usize] += 1;
        }
    }
    let mut commonest = [BLANK; WORD_LEN];
    for slot in 0..WORD_LEN {
        let mut best = 0;
        for code in 1..NUM_CODES as u8 {
            let count = counts[slot][code as usize];
            if count > best {
                best = count;
                commonest[slot] = code;
            }
        }
    }
    commonest
}

/// Candidates that share no letter with the guess at any unsolved slot are
/// ruled out whatever category each of those slots comes back as.
fn elimination_power(guess: Word, candidates: &[Word], unsolved: CharSet) -> usize {
    candidates
        .iter()
        .filter(|word| {
            unsolved
                .iter()
                .all(|slot| word.at(slot as usize) != guess.at(slot as usize))
        })
        .count()
}

/// Uniform single-pass choice: the i-th item replaces the current pick
/// with probability 1/i, so a fixed seed always lands on the same element.
fn reservoir_sample<I: IntoIterator<Item = Word>>(items: I, rng: &mut dyn RngCore) -> Option<Word> {
    let mut pick = None;
    for (index, item) in items.into_iter().enumerate() {
        if rng.gen_range(0..=index) == 0 {
            pick = Some(item);
        }
    }
    pick
}
