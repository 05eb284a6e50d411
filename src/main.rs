use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::io::Write;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use r7cal::search::{
    DEFAULT_PROGRESS_INTERVAL, Problem, SearchConfig, SearchOutcome, SearchRange,
    SearchStatistics, run_parallel_search,
};
use r7cal::{CalibrationError, DEFAULT_MODULUS, Modulus};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "r7cal")]
#[command(about = "r7cal - calibration search for the eighth register")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// The fixed problem instance shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
struct ProblemArgs {
    /// Domain bound M; every value is reduced modulo M
    #[arg(long, default_value_t = DEFAULT_MODULUS)]
    modulus: u32,
    /// First argument of the top-level call
    #[arg(long, default_value_t = 4)]
    r0: u32,
    /// Second argument of the top-level call
    #[arg(long, default_value_t = 1)]
    r1: u32,
    /// Output the top-level call must produce
    #[arg(long, default_value_t = 6)]
    target: u32,
}

impl ProblemArgs {
    fn problem(&self) -> Result<Problem, CalibrationError> {
        Problem::new(Modulus::new(self.modulus)?, self.r0, self.r1, self.target)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search the whole r7 domain in parallel and print the first solution
    Search {
        #[command(flatten)]
        problem: ProblemArgs,
        /// Number of worker threads (defaults to the number of CPUs)
        #[arg(long, short = 'j')]
        workers: Option<usize>,
        /// Log progress every N candidates per worker (0 disables)
        #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
        progress_interval: u32,
        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Evaluate a single trial for one r7
    Eval {
        #[command(flatten)]
        problem: ProblemArgs,
        /// Candidate calibration constant
        #[arg(long)]
        r7: u32,
    },
    /// Check r7 on one thread and scan every smaller candidate for earlier solutions
    Verify {
        #[command(flatten)]
        problem: ProblemArgs,
        /// Candidate calibration constant
        #[arg(long)]
        r7: u32,
        /// First candidate of the scan
        #[arg(long, default_value_t = 0)]
        from: u32,
    },
}

/// Exit status when the search ends without a (verified) solution.
const EXIT_NO_SOLUTION: u8 = 2;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

// --- Subcommands ---

fn run_search(
    problem: &ProblemArgs,
    workers: Option<usize>,
    progress_interval: u32,
    timeout: Option<u64>,
) -> Result<bool, CalibrationError> {
    let config = SearchConfig::default()
        .with_modulus(Modulus::new(problem.modulus)?)
        .with_initial(problem.r0, problem.r1)
        .with_target(problem.target)
        .with_workers(workers.unwrap_or_else(num_cpus::get))
        .with_progress_interval(progress_interval)
        .with_timeout_option(timeout.map(Duration::from_secs));

    println!("Searching for r7 such that {}", config);
    let result = run_parallel_search(&config)?;

    let found = match result.outcome {
        SearchOutcome::Found { r7, worker_id } => {
            println!("\nr7 = {}", r7);
            println!("  Reported by worker {}", worker_id);
            true
        }
        SearchOutcome::NotFound => {
            println!("\nNo solution found in [0, {}).", config.modulus);
            false
        }
        SearchOutcome::Cancelled => {
            println!("\nSearch cancelled before a solution was found.");
            false
        }
    };

    print_search_statistics(&result.total_statistics);
    Ok(found)
}

fn run_eval(problem: &ProblemArgs, r7: u32) -> Result<bool, CalibrationError> {
    let problem = problem.problem()?;
    let r7 = problem.modulus.word("r7", r7)?;

    let start = Instant::now();
    let trial = problem.run_trial(r7);
    let elapsed = start.elapsed();

    println!(
        "f({}, {}) with r7 = {} -> {}",
        problem.r0, problem.r1, r7, trial.value
    );
    println!(
        "  Target {}: {}",
        problem.target,
        if trial.matched { "match" } else { "no match" }
    );
    println!("  Elapsed time: {:?}", elapsed);
    println!("  Calls: {}", trial.stats.calls());
    println!("  Pairs computed: {}", trial.stats.pairs_computed);
    println!("  Memo hits: {}", trial.stats.memo_hits);
    println!("  Max stack depth: {}", trial.stats.max_depth);
    Ok(trial.matched)
}

fn run_verify(problem: &ProblemArgs, r7: u32, from: u32) -> Result<bool, CalibrationError> {
    let problem = problem.problem()?;
    let candidate = problem.modulus.word("r7", r7)?;
    problem.modulus.word("from", from)?;

    let matches = problem.is_solution(candidate);
    println!(
        "r7 = {} {} the target {}",
        candidate,
        if matches { "produces" } else { "does not produce" },
        problem.target
    );

    let prefix = SearchRange::new(from, u32::from(candidate));
    println!("Scanning {} on one thread...", prefix);
    let earlier = problem.solutions_in(prefix);
    if earlier.is_empty() {
        println!("No earlier solution in {}.", prefix);
    } else {
        println!("Earlier solutions in {}: {:?}", prefix, earlier);
    }

    Ok(matches && earlier.is_empty())
}

/// Print search statistics
fn print_search_statistics(stats: &SearchStatistics) {
    println!("\nSearch Statistics:");
    for line in stats.to_string().lines() {
        println!("  {}", line);
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match &args.command {
        Commands::Search {
            problem,
            workers,
            progress_interval,
            timeout,
        } => run_search(problem, *workers, *progress_interval, *timeout),
        Commands::Eval { problem, r7 } => run_eval(problem, *r7),
        Commands::Verify { problem, r7, from } => run_verify(problem, *r7, *from),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_NO_SOLUTION),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
