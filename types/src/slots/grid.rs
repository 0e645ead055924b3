use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use std::fmt;

use super::{Card, Payline, Row, COLUMNS, GRID_SIZE, HAND_SIZE, ROWS};

/// The cards showing after one spin, indexed `[reel][row]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    reels: [[Card; ROWS]; COLUMNS],
}

impl Grid {
    /// Lay out dealt cards column-major: the first `ROWS` cards fill reel 0 top
    /// to bottom, the next `ROWS` fill reel 1, and so on.
    pub fn from_dealt(cards: [Card; GRID_SIZE]) -> Self {
        let mut reels = [[Card::wildcard(); ROWS]; COLUMNS];
        for (i, card) in cards.into_iter().enumerate() {
            reels[i / ROWS][i % ROWS] = card;
        }
        Self { reels }
    }

    pub fn cell(&self, reel: usize, row: Row) -> Card {
        self.reels[reel][row.index()]
    }

    pub fn reel(&self, reel: usize) -> &[Card; ROWS] {
        &self.reels[reel]
    }

    /// The hand picked out by `line`, in reel order.
    pub fn hand(&self, line: &Payline) -> [Card; HAND_SIZE] {
        let mut hand = [Card::wildcard(); HAND_SIZE];
        for (reel, card) in hand.iter_mut().enumerate() {
            *card = self.cell(reel, line.row(reel));
        }
        hand
    }

    /// Cards in deal order (column-major).
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.reels.iter().flat_map(|reel| reel.iter().copied())
    }
}

impl fmt::Display for Grid {
    /// One line per row, reels separated by spaces, each cell padded to the
    /// widest card text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in Row::ALL.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line = (0..COLUMNS)
                .map(|reel| format!("{:<3}", self.cell(reel, *row).to_string()))
                .collect::<Vec<_>>()
                .join(" ");
            f.write_str(line.trim_end())?;
        }
        Ok(())
    }
}

impl Write for Grid {
    fn write(&self, writer: &mut impl BufMut) {
        for card in self.cards() {
            card.write(writer);
        }
    }
}

impl Read for Grid {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let mut cards = [Card::wildcard(); GRID_SIZE];
        for card in cards.iter_mut() {
            *card = Card::read(reader)?;
        }
        Ok(Self::from_dealt(cards))
    }
}

impl FixedSize for Grid {
    const SIZE: usize = Card::SIZE * GRID_SIZE;
}
