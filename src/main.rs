//! # puzzle-solvers
//!
//! `puzzle-solvers` is a command-line front end for two small number puzzles:
//!
//! 1.  **Dial**: a safe dial with positions 0-99 starts at 50 and is turned by a
//!     list of `L`/`R` rotations. The password is how often the dial reads 0,
//!     counted either where rotations stop (part 1) or on every click (part 2).
//! 2.  **Gift shop**: a list of `start-end` product ID ranges. Invalid IDs are
//!     digit blocks repeated exactly twice (part 1) or at least twice (part 2);
//!     the answer is their sum.
//!
//! ## Usage
//!
//! ```sh
//! puzzle-solvers <SUBCOMMAND> [example|input] [1|2] [OPTIONS]
//! ```
//!
//! -   `example` runs the dataset from the puzzle statement, prints a trace and
//!     checks the published answer.
//! -   `input` reads `input-day1.txt` (dial) or `input-day2.txt` (gift shop)
//!     from the working directory, or the file given with `--path`.
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Print the step-by-step trace in `input` mode too.
//! -   `-s, --stats`: Print timing and memory statistics.
//! -   `--path <PATH>`: Read the puzzle input from `PATH`.
//!
//! ## Example Invocations
//!
//! ```sh
//! # Dial example, counting every click through zero
//! puzzle-solvers dial example 2
//!
//! # Gift-shop puzzle input with statistics
//! puzzle-solvers gift-shop input 1 --stats
//!
//! # Bash completions
//! puzzle-solvers completions bash > puzzle-solvers.bash
//! ```
//!
//! An unknown mode or part prints the usage and exits with status 1, as does a
//! missing input file or an example that misses its published answer.

use crate::command_line::cli::{
    Cli, Commands, Mode, init_logging, print_completions, solve_dial, solve_gift_shop,
    usage_error,
};
use clap::Parser;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// figures printed by `--stats`.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Main entry point of the puzzle-solvers application.
///
/// Parses command-line arguments, dispatches to the selected puzzle and maps
/// any failure to exit status 1.
fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            println!("{}", usage_error(&e));
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    let result = match cli.command {
        Commands::Dial { mode, part, common } => {
            init_logging(common.debug || mode == Mode::Example);
            solve_dial(mode, part, &common)
        }
        Commands::GiftShop { mode, part, common } => {
            init_logging(common.debug || mode == Mode::Example);
            solve_gift_shop(mode, part, &common)
        }
        Commands::Completions { shell } => {
            print_completions(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
