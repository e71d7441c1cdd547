use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Write};
use wordle_autopilot::*;

/// Plays a Wordle-style game in reverse: the computer proposes guesses and
/// narrows down the answer from the feedback it gets back.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the solution word list, one word per line.
    #[arg(short = 's', long)]
    solutions: String,

    /// Path to the legal-guess word list; defaults to the solution list.
    #[arg(short = 'g', long)]
    guesses: Option<String>,

    /// Seed for the tie-breaking RNG; a fixed seed reproduces a run.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Maximum number of guesses per game.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Guess a word you have in mind, taking feedback from the keyboard.
    Interactive,
    /// Simulate a single game against a known solution.
    Single { word: String },
    /// Solve every word in the solution list and print statistics.
    Benchmark,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let bank = load_bank(&args)?;
    println!("There are {} possible solution words.", bank.len());
    let mut rng = StdRng::seed_from_u64(args.seed);

    match args.command {
        Command::Interactive => run_interactive(&bank, args.max_attempts, &mut rng),
        Command::Single { word } => run_single(&word, &bank, args.max_attempts, &mut rng),
        Command::Benchmark => {
            run_benchmark(&bank, args.max_attempts, &mut rng);
            Ok(())
        }
    }
}

fn load_bank(args: &Args) -> Result<WordBank> {
    let solutions = BufReader::new(
        File::open(&args.solutions).with_context(|| format!("opening {}", args.solutions))?,
    );
    match &args.guesses {
        Some(path) => {
            let guesses =
                BufReader::new(File::open(path).with_context(|| format!("opening {path}"))?);
            WordBank::from_readers(solutions, guesses).context("reading word lists")
        }
        None => WordBank::from_reader(solutions).context("reading word list"),
    }
}

fn run_interactive(bank: &WordBank, max_attempts: u32, rng: &mut StdRng) -> Result<()> {
    println!("Think of a word from the solution list; I will try to guess it.");
    println!(
        "Answer each guess with five of: {} (correct), {} (misplaced), {} (no more occurrences).",
        "c".yellow(),
        "m".yellow(),
        "n".yellow()
    );

    let guesser = MaxScoreGuesser::new(bank);
    let mut solver = Solver::new(bank, guesser, ConsoleFeedbackProvider, ConsoleReporter)
        .with_max_attempts(max_attempts);
    solver.solve(rng);
    Ok(())
}

fn run_single(word: &str, bank: &WordBank, max_attempts: u32, rng: &mut StdRng) -> Result<()> {
    let solution = Word::new(&word.to_lowercase()).context("parsing the solution word")?;
    if !bank.is_solution(solution) {
        bail!("'{word}' is not in the solution list");
    }

    let guesser = MaxScoreGuesser::new(bank);
    let mut solver = Solver::new(
        bank,
        guesser,
        SimulatedFeedbackProvider::new(solution),
        ConsoleReporter,
    )
    .with_max_attempts(max_attempts);
    solver.solve(rng);
    Ok(())
}

fn run_benchmark(bank: &WordBank, max_attempts: u32, rng: &mut StdRng) {
    let mut num_guesses_per_game: Vec<u32> = Vec::new();
    let mut failures: Vec<(Word, FailureReason)> = Vec::new();
    for &solution in bank.solutions() {
        match play_game(solution, max_attempts, bank, rng) {
            SolveOutcome::Solved { guesses, .. } => {
                num_guesses_per_game.push(guesses.len() as u32);
            }
            SolveOutcome::Failed { reason, .. } => failures.push((solution, reason)),
        }
    }

    println!(
        "Solved {} of {} words. Results:",
        num_guesses_per_game.len(),
        bank.len()
    );

    let mut num_games_per_round: HashMap<u32, u32> = HashMap::new();
    for num_guesses in num_guesses_per_game.iter() {
        *(num_games_per_round.entry(*num_guesses).or_insert(0)) += 1;
    }

    println!("|Num guesses|Num games|");
    println!("|-----------|---------|");
    let mut num_rounds: Vec<u32> = num_games_per_round.keys().copied().collect();
    num_rounds.sort_unstable();
    for num_round in num_rounds.iter() {
        println!(
            "|{}|{}|",
            num_round,
            num_games_per_round.get(num_round).unwrap()
        );
    }

    if !num_guesses_per_game.is_empty() {
        let average: f64 = num_guesses_per_game.iter().sum::<u32>() as f64
            / num_guesses_per_game.len() as f64;
        let std_dev: f64 = (num_guesses_per_game
            .iter()
            .map(|num_guesses| (*num_guesses as f64 - average).powi(2))
            .sum::<f64>()
            / num_guesses_per_game.len() as f64)
            .sqrt();
        println!(
            "\n**Average number of guesses:** {:.2} +/- {:.2}",
            average, std_dev
        );
    }

    for (solution, reason) in failures {
        println!(
            "{} {}: {}",
            "Failed on".red(),
            solution.to_string().to_uppercase().red().bold(),
            reason
        );
    }
}

/// Renders round progress and the final outcome to the terminal.
struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn on_guess(&mut self, attempt: u32, guess: Word, num_remaining: usize) {
        println!(
            "Suggestion {}: {} - out of {} possibilities",
            attempt.to_string().magenta(),
            guess.to_string().to_uppercase().green().bold(),
            num_remaining.to_string().magenta(),
        );
    }

    fn on_outcome(&mut self, outcome: &SolveOutcome) {
        match outcome {
            SolveOutcome::Solved { solution, guesses } => println!(
                "{} {} after {} guesses",
                "Solved:".green().bold(),
                solution.to_string().to_uppercase().green().bold(),
                guesses.len()
            ),
            SolveOutcome::Failed { reason, guesses } => println!(
                "{} {} (after {} guesses)",
                "No solution found:".red().bold(),
                reason,
                guesses.len()
            ),
        }
    }
}

/// Reads `c`/`m`/`n` feedback lines from stdin, re-prompting until a line
/// parses. EOF or a blank line stops the solve.
struct ConsoleFeedbackProvider;

impl FeedbackProvider for ConsoleFeedbackProvider {
    fn feedback_for(&mut self, _guess: Word, num_remaining: usize) -> Option<GuessFeedback> {
        if num_remaining == 1 {
            // A lone candidate needs no confirmation from the operator.
            return Some(GuessFeedback::SOLVED);
        }
        loop {
            print!(
                "Feedback - [{}]orrect [{}]isplaced [{}]o more occurrences? ",
                "C".yellow(),
                "M".yellow(),
                "N".yellow()
            );
            io::stdout().flush().ok()?;
            let mut line = String::new();
            if io::stdin().read_line(&mut line).ok()? == 0 {
                return None; // EOF
            }
            let line = line.trim().to_lowercase();
            if line.is_empty() {
                return None;
            }
            match line.parse::<GuessFeedback>() {
                Ok(feedback) => return Some(feedback),
                Err(err) => println!("{} {}", "Invalid feedback:".red(), err),
            }
        }
    }
}
