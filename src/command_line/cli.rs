use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use itertools::Itertools;
use puzzle_solvers::dial::solver::{
    self as dial, CountingMode, EXAMPLE, EXAMPLE_ENDPOINT_ONLY, EXAMPLE_PASS_THROUGH, Instruction,
};
use puzzle_solvers::error::PuzzleError;
use puzzle_solvers::gift_shop::solver::{
    self as gift_shop, EXAMPLE_ANY_REPEAT, EXAMPLE_ANY_REPEAT_SUM, EXAMPLE_EXACT_DOUBLE,
    EXAMPLE_EXACT_DOUBLE_SUM, RepeatMode, U256,
};
use std::fmt::Display;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Input file read by `dial input` unless `--path` is given.
pub(crate) const DIAL_INPUT: &str = "input-day1.txt";

/// Input file read by `gift-shop input` unless `--path` is given.
pub(crate) const GIFT_SHOP_INPUT: &str = "input-day2.txt";

/// Defines the command-line interface for the puzzle solvers.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "puzzle-solvers",
    version,
    about = "Solvers for the dial-safe and gift-shop puzzles"
)]
pub(crate) struct Cli {
    /// Specifies the puzzle to solve.
    #[clap(subcommand)]
    pub command: Commands,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Count how often the safe dial reads zero.
    ///
    /// Part 1 counts zeros at the end of rotations only.
    /// Part 2 counts every click that lands on zero during rotations.
    Dial {
        /// Run the built-in example or read the puzzle input file.
        #[arg(value_enum, default_value_t = Mode::Example)]
        mode: Mode,

        /// Which counting rule to apply.
        #[arg(value_enum, default_value_t = Part::One)]
        part: Part,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Sum the invalid product IDs in a list of ranges.
    ///
    /// Part 1 treats IDs made of a digit block repeated exactly twice as invalid.
    /// Part 2 treats any block repeated at least twice as invalid.
    GiftShop {
        /// Run the built-in example or read the puzzle input file.
        #[arg(value_enum, default_value_t = Mode::Example)]
        mode: Mode,

        /// Which repetition rule to apply.
        #[arg(value_enum, default_value_t = Part::One)]
        part: Part,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Where the puzzle input comes from.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Run with the example from the puzzle and check the published answer.
    Example,
    /// Run with the puzzle input file.
    Input,
}

/// Which half of the puzzle to solve.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Part {
    /// The first rule.
    #[value(name = "1")]
    One,
    /// The second rule.
    #[value(name = "2")]
    Two,
}

impl Part {
    pub(crate) const fn counting_mode(self) -> CountingMode {
        match self {
            Self::One => CountingMode::EndpointOnly,
            Self::Two => CountingMode::PassThrough,
        }
    }

    pub(crate) const fn repeat_mode(self) -> RepeatMode {
        match self {
            Self::One => RepeatMode::ExactDouble,
            Self::Two => RepeatMode::AnyRepeat,
        }
    }
}

impl Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "1"),
            Self::Two => write!(f, "2"),
        }
    }
}

/// Defines common command-line options shared by both puzzles.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Print the step-by-step trace. Always on in example mode.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Print timing and memory statistics after solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Puzzle input file used in `input` mode.
    #[arg(long)]
    pub(crate) path: Option<PathBuf>,
}

impl CommonOptions {
    /// The input file to read, falling back to `default`.
    pub(crate) fn input_path(&self, default: &str) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from(default))
    }
}

/// Builds the console subscriber. Events print as bare messages, without a
/// level tag or timestamp, so the trace reads as plain program output.
pub(crate) fn console_subscriber<W>(
    trace: bool,
    ansi: bool,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let level = if trace { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_level(false)
        .with_ansi(ansi)
        .without_time()
        .with_writer(writer)
        .finish()
}

/// Installs the `tracing` subscriber on stdout. Debug events make up the
/// trace, so they are only shown when a trace was asked for. Colour is only
/// used on a terminal.
pub(crate) fn init_logging(trace: bool) {
    let subscriber = console_subscriber(trace, std::io::stdout().is_terminal(), std::io::stdout);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: could not install logger: {e}");
    }
}

/// Text printed for a rejected command line: clap's error followed by the
/// usage line.
pub(crate) fn usage_error(error: &clap::Error) -> String {
    let rendered = error.render().to_string();
    if rendered.contains("Usage:") {
        return rendered;
    }
    format!("{}\n\n{}", rendered.trim_end(), Cli::command().render_usage())
}

/// Writes a completion script for `shell` to stdout.
pub(crate) fn print_completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}

/// Solves the dial puzzle.
///
/// # Errors
///
/// If the input file cannot be read, or the example disagrees with its
/// published answer.
pub(crate) fn solve_dial(
    mode: Mode,
    part: Part,
    common: &CommonOptions,
) -> Result<(), PuzzleError> {
    let time = Instant::now();
    let instructions = match mode {
        Mode::Example => {
            println!("--- Example Trace (Part {part}) ---");
            EXAMPLE.iter().copied().map(Instruction::parse).collect_vec()
        }
        Mode::Input => {
            let path = common.input_path(DIAL_INPUT);
            let instructions = dial::parse_file(&path)?;
            println!(
                "--- Solving with {} ({} instructions) ---",
                path.display(),
                instructions.len()
            );
            instructions
        }
    };
    let parse_time = time.elapsed();

    if common.debug {
        tracing::info!(?mode, %part, instructions = instructions.len(), "solving dial");
    }
    let time = Instant::now();
    let password = dial::run(&instructions, part.counting_mode());
    let elapsed = time.elapsed();

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &[
                ("Instructions", instructions.len() as u64),
                ("Zeros counted", password),
            ],
        );
    }

    match mode {
        Mode::Example => {
            let expected = match part {
                Part::One => EXAMPLE_ENDPOINT_ONLY,
                Part::Two => EXAMPLE_PASS_THROUGH,
            };
            check_example(password, expected)
        }
        Mode::Input => {
            println!("\nPart {part}: The password is {password}");
            Ok(())
        }
    }
}

/// Solves the gift-shop puzzle.
///
/// # Errors
///
/// If the input file cannot be read, or the example disagrees with its
/// published answer.
pub(crate) fn solve_gift_shop(
    mode: Mode,
    part: Part,
    common: &CommonOptions,
) -> Result<(), PuzzleError> {
    let time = Instant::now();
    let ranges = match mode {
        Mode::Example => {
            println!("--- Example (Day 2 Part {part}) ---");
            let example = match part {
                Part::One => EXAMPLE_EXACT_DOUBLE,
                Part::Two => EXAMPLE_ANY_REPEAT,
            };
            gift_shop::parse_ranges(example)
        }
        Mode::Input => {
            let path = common.input_path(GIFT_SHOP_INPUT);
            let ranges = gift_shop::parse_file(&path)?;
            println!("--- Solving with {} (Part {part}) ---", path.display());
            ranges
        }
    };
    let parse_time = time.elapsed();

    if common.debug {
        tracing::info!(?mode, %part, ranges = ranges.len(), "scanning gift shop ranges");
    }
    let time = Instant::now();
    let report = gift_shop::scan(&ranges, part.repeat_mode());
    let elapsed = time.elapsed();

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &[
                ("Ranges", ranges.len() as u64),
                ("IDs examined", report.candidates),
                ("Invalid IDs", report.count() as u64),
            ],
        );
    }

    match mode {
        Mode::Example => {
            let expected = match part {
                Part::One => EXAMPLE_EXACT_DOUBLE_SUM,
                Part::Two => EXAMPLE_ANY_REPEAT_SUM,
            };
            check_example(report.total, U256::from(expected))
        }
        Mode::Input => {
            println!("\nPart {part}: The sum is {}", report.total);
            Ok(())
        }
    }
}

/// Prints the example comparison and fails when the answers differ.
///
/// # Errors
///
/// [`PuzzleError::ExampleMismatch`] if `result != expected`.
pub(crate) fn check_example<T: Display + PartialEq>(
    result: T,
    expected: T,
) -> Result<(), PuzzleError> {
    println!("\nExample result: {result} (expected: {expected})");
    if result == expected {
        println!("✓ Example passed!");
        Ok(())
    } else {
        println!("✗ Example failed!");
        Err(PuzzleError::ExampleMismatch {
            expected: expected.to_string(),
            actual: result.to_string(),
        })
    }
}

/// Allocated and resident memory in MiB, if jemalloc can report them.
pub(crate) fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated_bytes = stats::allocated::mib().ok()?.read().ok()?;
    let resident_bytes = stats::resident::mib().ok()?.read().ok()?;
    #[allow(clippy::cast_precision_loss)]
    let to_mib = |bytes: usize| bytes as f64 / (1024.0 * 1024.0);
    Some((to_mib(allocated_bytes), to_mib(resident_bytes)))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    #[allow(clippy::cast_precision_loss)]
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints timings, the solver's counters and memory usage.
pub(crate) fn print_stats(parse_time: Duration, elapsed: Duration, counters: &[(&str, u64)]) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    println!("========================[ Search Statistics ]========================");
    for &(label, value) in counters {
        stat_line_with_rate(label, value, elapsed_secs);
    }
    if let Some((allocated, resident)) = memory_usage() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("puzzle-solvers").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_defaults_to_example_part_one() {
        let cli = parse(&["dial"]).unwrap();
        match cli.command {
            Commands::Dial { mode, part, common } => {
                assert_eq!(mode, Mode::Example);
                assert_eq!(part, Part::One);
                assert!(!common.debug);
                assert!(!common.stats);
                assert_eq!(common.input_path(DIAL_INPUT), PathBuf::from(DIAL_INPUT));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_mode_part_and_options() {
        let cli = parse(&["gift-shop", "input", "2", "--stats", "--path", "ranges.txt"]).unwrap();
        match cli.command {
            Commands::GiftShop { mode, part, common } => {
                assert_eq!(mode, Mode::Input);
                assert_eq!(part, Part::Two);
                assert!(common.stats);
                assert_eq!(
                    common.input_path(GIFT_SHOP_INPUT),
                    PathBuf::from("ranges.txt")
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_mode_and_part() {
        assert!(parse(&["dial", "sample"]).is_err());
        assert!(parse(&["dial", "example", "3"]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_rejected_value_prints_usage() {
        let error = parse(&["dial", "bogus"]).unwrap_err();
        let text = usage_error(&error);
        assert!(text.contains("invalid value 'bogus'"));
        assert!(text.contains("Usage: puzzle-solvers"));

        let error = parse(&["gift-shop", "example", "3"]).unwrap_err();
        assert!(usage_error(&error).contains("Usage:"));
    }

    #[test]
    fn test_missing_subcommand_prints_usage_once() {
        let error = parse(&[]).unwrap_err();
        assert_eq!(usage_error(&error).matches("Usage:").count(), 1);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_trace_is_plain_text() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = console_subscriber(true, false, move || writer.clone());
        tracing::subscriber::with_default(subscriber, || {
            let instructions = EXAMPLE.iter().copied().map(Instruction::parse).collect_vec();
            dial::run(&instructions, CountingMode::EndpointOnly);
        });

        let text = captured.text();
        assert!(text.contains("1. L68 -> position 82"));
        assert!(!text.contains('\u{1b}'));
        assert!(!text.contains("DEBUG"));
        assert!(!text.contains("INFO"));
    }

    #[test]
    fn test_quiet_logging_hides_the_trace() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = console_subscriber(false, false, move || writer.clone());
        tracing::subscriber::with_default(subscriber, || {
            dial::run(&[Instruction::parse("L50")], CountingMode::EndpointOnly);
        });
        assert!(captured.text().is_empty());
    }

    #[test]
    fn test_parts_map_to_solver_modes() {
        assert_eq!(Part::One.counting_mode(), CountingMode::EndpointOnly);
        assert_eq!(Part::Two.counting_mode(), CountingMode::PassThrough);
        assert_eq!(Part::One.repeat_mode(), RepeatMode::ExactDouble);
        assert_eq!(Part::Two.repeat_mode(), RepeatMode::AnyRepeat);
        assert_eq!(Part::Two.to_string(), "2");
    }

    #[test]
    fn test_examples_pass_their_self_check() {
        let common = CommonOptions::default();
        for part in [Part::One, Part::Two] {
            assert!(solve_dial(Mode::Example, part, &common).is_ok());
            assert!(solve_gift_shop(Mode::Example, part, &common).is_ok());
        }
    }

    #[test]
    fn test_check_example_mismatch() {
        assert!(check_example(3, 3).is_ok());
        assert!(matches!(
            check_example(4, 3),
            Err(PuzzleError::ExampleMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_input_file_is_fatal() {
        let common = CommonOptions {
            path: Some(PathBuf::from("definitely/not/here.txt")),
            ..CommonOptions::default()
        };
        assert!(matches!(
            solve_dial(Mode::Input, Part::One, &common),
            Err(PuzzleError::Io { .. })
        ));
        assert!(matches!(
            solve_gift_shop(Mode::Input, Part::Two, &common),
            Err(PuzzleError::Io { .. })
        ));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
