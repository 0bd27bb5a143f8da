// Tower of Hanoi state and move rules. The interactive loop lives in `ui`;
// this module only knows about towers, discs and whether a move is legal.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TowerId {
    A,
    B,
    C,
}

impl TowerId {
    pub const ALL: [TowerId; 3] = [TowerId::A, TowerId::B, TowerId::C];

    fn index(self) -> usize {
        match self {
            TowerId::A => 0,
            TowerId::B => 1,
            TowerId::C => 2,
        }
    }
}

impl fmt::Display for TowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            TowerId::A => "A",
            TowerId::B => "B",
            TowerId::C => "C",
        };
        f.write_str(letter)
    }
}

impl FromStr for TowerId {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(TowerId::A),
            "B" => Ok(TowerId::B),
            "C" => Ok(TowerId::C),
            _ => Err(MoveError::InvalidTower(s.trim().to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Invalid input '{0}'. Use A, B or C.")]
    InvalidTower(String),

    #[error("There are no discs on {0}")]
    EmptySource(TowerId),

    #[error("Invalid move: disc {disc} cannot go on top of the smaller disc {onto}")]
    LargerOnSmaller { disc: u32, onto: u32 },

    #[error("Invalid move: source and destination are both {0}")]
    SameTower(TowerId),
}

/// Three towers holding discs numbered `1..=n`, larger number = larger disc.
/// Each tower is stored bottom to top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Towers {
    towers: [Vec<u32>; 3],
    discs: u32,
    moves: u32,
}

impl Towers {
    /// All `discs` stacked on tower A, largest at the bottom.
    pub fn new(discs: u32) -> Self {
        Self {
            towers: [(1..=discs).rev().collect(), Vec::new(), Vec::new()],
            discs,
            moves: 0,
        }
    }

    pub fn discs(&self) -> u32 {
        self.discs
    }

    /// Accepted moves so far.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Fewest moves that solve the puzzle: `2^n - 1`, saturating at
    /// `u64::MAX` for 64 or more discs.
    pub fn optimal_moves(&self) -> u64 {
        1u64.checked_shl(self.discs).map_or(u64::MAX, |n| n - 1)
    }

    pub fn tower(&self, id: TowerId) -> &[u32] {
        &self.towers[id.index()]
    }

    pub fn top(&self, id: TowerId) -> Option<u32> {
        self.tower(id).last().copied()
    }

    /// Check a move without applying it. Returns the disc that would move.
    pub fn check_move(&self, from: TowerId, to: TowerId) -> Result<u32, MoveError> {
        let disc = self.top(from).ok_or(MoveError::EmptySource(from))?;
        if from == to {
            return Err(MoveError::SameTower(from));
        }
        match self.top(to) {
            Some(onto) if onto < disc => Err(MoveError::LargerOnSmaller { disc, onto }),
            _ => Ok(disc),
        }
    }

    /// Move the top disc of `from` onto `to` if the move is legal.
    pub fn move_disc(&mut self, from: TowerId, to: TowerId) -> Result<u32, MoveError> {
        let disc = self.check_move(from, to)?;
        self.towers[from.index()].pop();
        self.towers[to.index()].push(disc);
        self.moves += 1;
        tracing::debug!(%from, %to, disc, moves = self.moves, "disc moved");
        Ok(disc)
    }

    /// Solved once tower C holds every disc.
    pub fn is_solved(&self) -> bool {
        self.tower(TowerId::C).len() == self.discs as usize
    }
}

impl fmt::Display for Towers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for id in TowerId::ALL {
            writeln!(f, "{id}: {:?}", self.tower(id))?;
        }
        write!(f, "{}", "-".repeat(20))
    }
}
