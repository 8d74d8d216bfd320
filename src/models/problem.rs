use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

use clap::ValueEnum;
use regex::Regex;

pub const MAX_PROBLEM: u32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProblemId(u32);

impl ProblemId {
    pub fn new(number: u32) -> Option<Self> {
        (number <= MAX_PROBLEM).then_some(Self(number))
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    pub fn dir_name(&self) -> String {
        format!("{:04}", self.0)
    }

    /// Accepts exactly four decimal digits, nothing else.
    pub fn from_dir_name(name: &str) -> Option<Self> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| Regex::new(r"^\d{4}$").expect("valid regex"));

        if !pattern.is_match(name) {
            return None;
        }
        name.parse().ok().map(Self)
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProblemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("'{}' is not a problem number", s))?;
        ProblemId::new(number).ok_or_else(|| format!("Problem number must be at most {}", MAX_PROBLEM))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pool {
    New,
    Done,
}

impl Pool {
    /// Search order used when locating a problem.
    pub const ALL: [Pool; 2] = [Pool::New, Pool::Done];

    pub fn dir_name(&self) -> &'static str {
        match self {
            Pool::New => "new",
            Pool::Done => "done",
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PoolSelection {
    New,
    Done,
    #[default]
    All,
}

impl PoolSelection {
    pub fn pools(&self) -> &'static [Pool] {
        match self {
            PoolSelection::New => &[Pool::New],
            PoolSelection::Done => &[Pool::Done],
            PoolSelection::All => &Pool::ALL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemLocation {
    pub id: ProblemId,
    pub path: PathBuf,
    pub pool: Pool,
}
