use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{MAX_RANK, MIN_RANK};

/// Poker hand categories, ordered from worst to best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum HandCategory {
    NoWin = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    /// Every category, worst first.
    pub const ALL: [HandCategory; 10] = [
        HandCategory::NoWin,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
    ];

    /// Whether the payout for this category scales with a matched rank.
    pub fn has_tie_break(self) -> bool {
        matches!(
            self,
            HandCategory::OnePair
                | HandCategory::TwoPair
                | HandCategory::ThreeOfAKind
                | HandCategory::FullHouse
                | HandCategory::FourOfAKind
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::NoWin => "no win",
            HandCategory::OnePair => "one pair",
            HandCategory::TwoPair => "two pair",
            HandCategory::ThreeOfAKind => "three of a kind",
            HandCategory::Straight => "straight",
            HandCategory::Flush => "flush",
            HandCategory::FullHouse => "full house",
            HandCategory::FourOfAKind => "four of a kind",
            HandCategory::StraightFlush => "straight flush",
            HandCategory::RoyalFlush => "royal flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for HandCategory {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        HandCategory::ALL
            .get(value as usize)
            .copied()
            .ok_or(value)
    }
}

impl Write for HandCategory {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for HandCategory {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        HandCategory::try_from(value).map_err(Error::InvalidEnum)
    }
}

impl FixedSize for HandCategory {
    const SIZE: usize = 1;
}

/// Outcome of evaluating one five-card hand.
///
/// `rank` is present exactly when [`HandCategory::has_tie_break`] holds for
/// `category`, and is then a standard rank in `2..=14`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandResult {
    category: HandCategory,
    rank: Option<u8>,
}

impl HandResult {
    pub const NO_WIN: HandResult = HandResult {
        category: HandCategory::NoWin,
        rank: None,
    };

    /// Result for a category paid at a fixed amount.
    ///
    /// Panics if `category` scales with a tie-break rank.
    pub fn fixed(category: HandCategory) -> Self {
        assert!(
            !category.has_tie_break(),
            "{category} requires a tie-break rank"
        );
        Self {
            category,
            rank: None,
        }
    }

    /// Result for a category whose payout scales with `rank`.
    ///
    /// Panics if `category` is paid at a fixed amount or `rank` is not a
    /// standard rank.
    pub fn ranked(category: HandCategory, rank: u8) -> Self {
        assert!(category.has_tie_break(), "{category} has no tie-break rank");
        assert!(
            (MIN_RANK..=MAX_RANK).contains(&rank),
            "tie-break rank out of range: {rank}"
        );
        Self {
            category,
            rank: Some(rank),
        }
    }

    /// Build a result from untrusted parts, `None` if they are inconsistent.
    pub fn from_parts(category: HandCategory, rank: Option<u8>) -> Option<Self> {
        match (category.has_tie_break(), rank) {
            (true, Some(r)) if (MIN_RANK..=MAX_RANK).contains(&r) => Some(Self {
                category,
                rank: Some(r),
            }),
            (false, None) => Some(Self {
                category,
                rank: None,
            }),
            _ => None,
        }
    }

    pub fn category(&self) -> HandCategory {
        self.category
    }

    pub fn rank(&self) -> Option<u8> {
        self.rank
    }

    pub fn is_win(&self) -> bool {
        self.category != HandCategory::NoWin
    }
}

impl fmt::Display for HandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            Some(rank) => write!(f, "{} ({})", self.category, rank),
            None => write!(f, "{}", self.category),
        }
    }
}

impl Write for HandResult {
    fn write(&self, writer: &mut impl BufMut) {
        self.category.write(writer);
        self.rank.write(writer);
    }
}

impl Read for HandResult {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let category = HandCategory::read(reader)?;
        let rank = Option::<u8>::read(reader)?;
        HandResult::from_parts(category, rank)
            .ok_or(Error::Invalid("HandResult", "tie-break does not match category"))
    }
}

impl EncodeSize for HandResult {
    fn encode_size(&self) -> usize {
        self.category.encode_size() + self.rank.encode_size()
    }
}
