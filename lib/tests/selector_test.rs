#[macro_use]
extern crate assert_matches;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wordle_autopilot::*;

fn word(literal: &str) -> Word {
    Word::new(literal).unwrap()
}

/// Builds the endgame where only slot 3 is open: 'shale' was guessed
/// against a 'sha_e' family and came back correct everywhere but slot 3.
fn final_slot_state(solutions: &[&str]) -> (WordBank, SolveState) {
    let mut guess_corpus: Vec<&str> = solutions.to_vec();
    guess_corpus.extend(["shale", "plume"]);
    let bank = WordBank::from_words(solutions, &guess_corpus).unwrap();
    let mut state = SolveState::new(bank.solutions());
    state.apply_feedback(word("shale"), "cccnc".parse().unwrap());
    (bank, state)
}

#[test]
fn final_slot_probe_covers_the_most_candidate_letters() {
    let (bank, state) = final_slot_state(&["shame", "shape", "share", "shave"]);
    assert_eq!(state.partial_solution().to_string(), "sha e");
    assert_eq!(state.candidates().len(), 4);

    let guesser = MaxScoreGuesser::new(&bank);
    let guess = guesser.select_guess(&mut StdRng::seed_from_u64(2), &state, 2, 5);

    // 'plume' carries both 'm' and 'p' as single occurrences; every other
    // qualifying word covers only one of the candidate letters.
    assert_eq!(guess, Some(word("plume")));
}

#[test]
fn final_slot_probe_needs_spare_attempts() {
    let (bank, state) = final_slot_state(&["shame", "shape", "share", "shave"]);
    let guesser = MaxScoreGuesser::new(&bank);

    // With one attempt left there is no room for a throwaway probe; the
    // guesser must take its chance on a scored guess instead.
    let guess = guesser
        .select_guess(&mut StdRng::seed_from_u64(2), &state, 5, 1)
        .unwrap();

    assert!(bank.guesses().contains(&guess));
}

#[test]
fn shallow_pool_skips_the_probe() {
    // Two candidates left: guessing one of them outright risks nothing.
    let (bank, state) = final_slot_state(&["shame", "shape"]);
    assert_eq!(state.candidates().len(), 2);

    let guesser = MaxScoreGuesser::new(&bank);
    let guess = guesser.select_guess(&mut StdRng::seed_from_u64(2), &state, 2, 5);

    assert_matches!(guess, Some(_));
}

#[test]
fn lone_candidate_wins_immediately() {
    let (bank, mut state) = final_slot_state(&["shame", "shape", "share", "shave"]);
    state.apply_feedback(word("plume"), "nnncc".parse().unwrap());

    // The correct 'm' pins the open slot, leaving a single candidate.
    assert_eq!(state.candidates(), &[word("shame")]);

    let guesser = MaxScoreGuesser::new(&bank);
    let guess = guesser.select_guess(&mut StdRng::seed_from_u64(2), &state, 3, 4);

    assert_eq!(guess, Some(word("shame")));
}

#[test]
fn selection_is_deterministic_for_a_fixed_seed() {
    let corpus = ["grain", "track", "probe", "mambo", "cramp"];
    let bank = WordBank::from_words(&corpus, &corpus).unwrap();
    let state = SolveState::new(bank.solutions());
    let guesser = MaxScoreGuesser::new(&bank);

    let picks: Vec<Option<Word>> = (0..3)
        .map(|_| guesser.select_guess(&mut StdRng::seed_from_u64(11), &state, 1, 6))
        .collect();

    assert_eq!(picks[0], picks[1]);
    assert_eq!(picks[1], picks[2]);
}

#[test]
fn custom_weights_change_the_ranking() {
    let corpus = ["grain", "track"];
    let guess_corpus = ["grain", "track", "mucky"];
    let bank = WordBank::from_words(&corpus, &guess_corpus).unwrap();
    let state = SolveState::new(bank.solutions());

    // Reward solution membership overwhelmingly: the pick must then be a
    // word that could still be the answer.
    let weights = ScoreWeights {
        solution_member: 1000,
        ..ScoreWeights::default()
    };
    let guesser = MaxScoreGuesser::with_weights(&bank, weights);
    let guess = guesser
        .select_guess(&mut StdRng::seed_from_u64(8), &state, 1, 6)
        .unwrap();

    assert!(bank.is_solution(guess));
}
