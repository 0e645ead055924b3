use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use std::fmt;

use super::{COLUMNS, ROWS, TOTAL_BET_LINES};

/// Row on a reel, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Row {
    High = 0,
    Mid = 1,
    Low = 2,
}

impl Row {
    pub const ALL: [Row; ROWS] = [Row::High, Row::Mid, Row::Low];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Row {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Row::ALL.get(value as usize).copied().ok_or(value)
    }
}

impl Write for Row {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for Row {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        Row::try_from(value).map_err(Error::InvalidEnum)
    }
}

impl FixedSize for Row {
    const SIZE: usize = 1;
}

/// One row per reel, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Payline([Row; COLUMNS]);

impl Payline {
    pub const fn new(rows: [Row; COLUMNS]) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[Row; COLUMNS] {
        &self.0
    }

    /// Row picked on `reel`.
    pub fn row(&self, reel: usize) -> Row {
        self.0[reel]
    }
}

impl fmt::Display for Payline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0 {
            let c = match row {
                Row::High => 'H',
                Row::Mid => 'M',
                Row::Low => 'L',
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl Write for Payline {
    fn write(&self, writer: &mut impl BufMut) {
        for row in &self.0 {
            row.write(writer);
        }
    }
}

impl Read for Payline {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let mut rows = [Row::Mid; COLUMNS];
        for row in rows.iter_mut() {
            *row = Row::read(reader)?;
        }
        Ok(Self(rows))
    }
}

impl FixedSize for Payline {
    const SIZE: usize = Row::SIZE * COLUMNS;
}

const H: Row = Row::High;
const M: Row = Row::Mid;
const L: Row = Row::Low;

/// Visually coherent lines (straights, V shapes, zig-zags), in play order.
const CURATED: [Payline; 35] = [
    Payline::new([M, M, M, M, M]),
    Payline::new([H, H, H, H, H]),
    Payline::new([L, L, L, L, L]),
    Payline::new([M, M, H, M, M]),
    Payline::new([M, M, L, M, M]),
    Payline::new([H, H, M, H, H]),
    Payline::new([L, L, M, L, L]),
    Payline::new([M, H, M, H, M]),
    Payline::new([M, L, M, L, M]),
    Payline::new([H, M, H, M, H]),
    Payline::new([L, M, L, M, L]),
    Payline::new([M, H, H, H, M]),
    Payline::new([M, L, L, L, M]),
    Payline::new([H, M, M, M, H]),
    Payline::new([L, M, M, M, L]),
    Payline::new([M, H, M, L, M]),
    Payline::new([M, L, M, H, M]),
    Payline::new([H, M, L, M, H]),
    Payline::new([L, M, H, M, L]),
    Payline::new([H, H, M, L, L]),
    Payline::new([L, L, M, H, H]),
    Payline::new([H, M, M, M, L]),
    Payline::new([L, M, M, M, H]),
    Payline::new([H, H, L, H, H]),
    Payline::new([L, L, H, L, L]),
    Payline::new([H, L, M, L, H]),
    Payline::new([L, H, M, H, L]),
    Payline::new([H, L, H, L, H]),
    Payline::new([L, H, L, H, L]),
    Payline::new([H, L, L, L, H]),
    Payline::new([L, H, H, H, L]),
    Payline::new([H, L, M, H, L]),
    Payline::new([L, H, M, L, H]),
    Payline::new([M, H, L, H, M]),
    Payline::new([M, L, H, L, M]),
];

/// Ordered, immutable catalog of paylines. A wager on `n` lines plays the
/// first `n` entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaylineTable {
    lines: Vec<Payline>,
}

impl PaylineTable {
    /// The 35 curated lines.
    pub fn curated() -> Self {
        Self {
            lines: CURATED.to_vec(),
        }
    }

    /// All `ROWS ^ COLUMNS` lines, lexicographic by row index with the first
    /// reel most significant.
    pub fn full() -> Self {
        let lines = (0..TOTAL_BET_LINES)
            .map(|mut n| {
                let mut rows = [Row::High; COLUMNS];
                for reel in (0..COLUMNS).rev() {
                    rows[reel] = Row::ALL[n % ROWS];
                    n /= ROWS;
                }
                Payline::new(rows)
            })
            .collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Payline> {
        self.lines.get(index)
    }

    /// The first `bet_lines` entries (all of them if `bet_lines` exceeds the
    /// table).
    pub fn active(&self, bet_lines: usize) -> &[Payline] {
        &self.lines[..bet_lines.min(self.lines.len())]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Payline> {
        self.lines.iter()
    }
}

impl Default for PaylineTable {
    fn default() -> Self {
        Self::curated()
    }
}
