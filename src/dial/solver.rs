use crate::error::PuzzleError;
use crate::lenient::number_or_zero;
use itertools::Itertools;
use std::fmt::Display;
use std::io::{self, BufRead};
use std::path::Path;

/// Number of positions on the dial.
pub const DIAL_SIZE: u32 = 100;

/// Position the dial points at before the first instruction.
pub const START_POSITION: u32 = 50;

/// The rotations from the puzzle statement.
pub const EXAMPLE: [&str; 10] = [
    "L68", "L30", "R48", "L5", "R60", "L55", "L1", "L99", "R14", "L82",
];

/// Published answer for [`EXAMPLE`] when only stopping positions count.
pub const EXAMPLE_ENDPOINT_ONLY: u64 = 3;

/// Published answer for [`EXAMPLE`] when every click through zero counts.
pub const EXAMPLE_PASS_THROUGH: u64 = 6;

/// Direction of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards lower numbers.
    Left,
    /// Towards higher numbers.
    Right,
}

impl Direction {
    /// Reads a direction symbol. `R` is right; every other symbol turns left.
    #[must_use]
    pub fn from_symbol(symbol: Option<char>) -> Self {
        match symbol {
            Some('R') => Self::Right,
            Some('L') => Self::Left,
            other => {
                tracing::warn!("unknown direction {other:?}, turning left");
                Self::Left
            }
        }
    }

    /// The symbol used for this direction in puzzle input.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }
}

/// A single rotation of the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Which way the dial turns.
    pub direction: Direction,
    /// Number of clicks to turn.
    pub distance: u64,
}

impl Instruction {
    /// Creates an instruction.
    #[must_use]
    pub const fn new(direction: Direction, distance: u64) -> Self {
        Self {
            direction,
            distance,
        }
    }

    /// Parses a token such as `R48`.
    ///
    /// The first character selects the direction and the rest is read as a
    /// number. Malformed tokens are not rejected: an unknown direction turns
    /// left and a non-numeric distance reads as zero.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        let mut chars = token.chars();
        let direction = Direction::from_symbol(chars.next());
        let distance = number_or_zero(chars.as_str(), "distance");
        Self::new(direction, distance)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.direction.symbol(), self.distance)
    }
}

impl From<&str> for Instruction {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

/// Which dial readings count towards the password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CountingMode {
    /// Count only positions where a rotation ends.
    #[default]
    EndpointOnly,
    /// Count every click that lands on zero, including mid-rotation.
    PassThrough,
}

/// Parses one instruction per line.
///
/// Every line is an instruction, so a blank line reads as a zero-distance
/// left turn. A final newline does not start an extra line.
#[must_use]
pub fn parse_instructions(input: &str) -> Vec<Instruction> {
    input.lines().map(Instruction::parse).collect_vec()
}

/// Parses instructions from a `BufRead` source, one per line.
///
/// # Errors
///
/// Returns the I/O error if a line cannot be read.
pub fn parse_reader<R: BufRead>(reader: R) -> io::Result<Vec<Instruction>> {
    reader
        .lines()
        .map(|line| line.map(|line| Instruction::parse(&line)))
        .collect()
}

/// Parses an instruction file.
///
/// # Errors
///
/// Returns [`PuzzleError::Io`] if the file cannot be opened or read.
pub fn parse_file(path: &Path) -> Result<Vec<Instruction>, PuzzleError> {
    let file = std::fs::File::open(path).map_err(|e| PuzzleError::io(path, e))?;
    parse_reader(io::BufReader::new(file)).map_err(|e| PuzzleError::io(path, e))
}

/// Number of clicks during `instruction` that land on zero, starting from
/// `position`. The starting position itself is not counted.
///
/// `position` is read modulo [`DIAL_SIZE`].
#[must_use]
pub fn zeros_passed(position: u32, instruction: Instruction) -> u64 {
    if instruction.distance == 0 {
        return 0;
    }

    let position = position % DIAL_SIZE;

    let first_zero_at = match (position, instruction.direction) {
        (0, _) => u64::from(DIAL_SIZE),
        (_, Direction::Right) => u64::from(DIAL_SIZE - position),
        (_, Direction::Left) => u64::from(position),
    };

    if first_zero_at > instruction.distance {
        return 0;
    }

    1 + (instruction.distance - first_zero_at) / u64::from(DIAL_SIZE)
}

/// Position after applying `instruction` at `position`, always in
/// `0..DIAL_SIZE`. `position` is read modulo [`DIAL_SIZE`].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn rotate(position: u32, instruction: Instruction) -> u32 {
    let position = position % DIAL_SIZE;
    let offset = (instruction.distance % u64::from(DIAL_SIZE)) as u32;
    match instruction.direction {
        Direction::Right => (position + offset) % DIAL_SIZE,
        Direction::Left => (position + DIAL_SIZE - offset) % DIAL_SIZE,
    }
}

/// The outcome of one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Zero-based index of the instruction in its sequence.
    pub index: usize,
    /// The instruction that was applied.
    pub instruction: Instruction,
    /// Dial position after the rotation.
    pub position: u32,
    /// Zeros counted for this instruction.
    pub zeros: u64,
    /// Running total including this instruction.
    pub total: u64,
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}. {} -> position {}",
            self.index + 1,
            self.instruction,
            self.position
        )
    }
}

/// The dial and its running zero count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dial {
    position: u32,
    zero_count: u64,
}

impl Default for Dial {
    fn default() -> Self {
        Self::new()
    }
}

impl Dial {
    /// A fresh dial at [`START_POSITION`] with nothing counted.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: START_POSITION,
            zero_count: 0,
        }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Zeros counted so far.
    #[must_use]
    pub const fn zero_count(&self) -> u64 {
        self.zero_count
    }

    /// Applies one instruction and returns how many zeros it contributed.
    pub fn apply(&mut self, instruction: Instruction, mode: CountingMode) -> u64 {
        let next = rotate(self.position, instruction);
        let zeros = match mode {
            CountingMode::EndpointOnly => u64::from(next == 0),
            CountingMode::PassThrough => zeros_passed(self.position, instruction),
        };

        self.position = next;
        self.zero_count += zeros;
        zeros
    }

    /// Applies `instructions` in order, yielding a [`Step`] for each.
    pub fn steps<'a>(
        &'a mut self,
        instructions: &'a [Instruction],
        mode: CountingMode,
    ) -> impl Iterator<Item = Step> + 'a {
        instructions
            .iter()
            .enumerate()
            .map(move |(index, &instruction)| {
                let zeros = self.apply(instruction, mode);
                Step {
                    index,
                    instruction,
                    position: self.position,
                    zeros,
                    total: self.zero_count,
                }
            })
    }
}

/// Runs `instructions` on a fresh dial and returns the zero count.
///
/// Every step is reported at `debug` level, which is what the command line's
/// trace output is made of.
#[must_use]
pub fn run(instructions: &[Instruction], mode: CountingMode) -> u64 {
    let mut dial = Dial::new();
    tracing::debug!("Starting position: {}", dial.position());

    for step in dial.steps(instructions, mode) {
        match (mode, step.zeros) {
            (_, 0) => tracing::debug!("{step}"),
            (CountingMode::EndpointOnly, _) => {
                tracing::debug!("{step}");
                tracing::debug!("   *** Landed on 0! Count: {}", step.total);
            }
            (CountingMode::PassThrough, zeros) => {
                tracing::debug!("{step} (passed through 0: {zeros} times)");
                tracing::debug!("   *** Total count: {}", step.total);
            }
        }
    }

    dial.zero_count()
}
