use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use rand::Rng;
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

use super::{ACE, JACK, KING, MAX_RANK, MIN_RANK, QUEEN, WILDCARD_RANK};

#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum CardError {
    #[error("unknown suit (got={0})")]
    InvalidSuit(u8),
    #[error("rank {rank} is not valid for {suit:?}")]
    InvalidRank { rank: u8, suit: Suit },
    #[error("cannot parse card: {0:?}")]
    Unparseable(String),
}

/// Card suits. `Wildcard` marks a joker that may stand in for any card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
    Wildcard = 4,
}

impl Suit {
    /// The four suits of a standard deck, in deck-construction order.
    pub const STANDARD: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Single-letter form used in card text.
    pub fn letter(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Wildcard => 'J',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'S' => Some(Suit::Spades),
            'H' => Some(Suit::Hearts),
            'D' => Some(Suit::Diamonds),
            'C' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Suit {
    type Error = CardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Suit::Spades),
            1 => Ok(Suit::Hearts),
            2 => Ok(Suit::Diamonds),
            3 => Ok(Suit::Clubs),
            4 => Ok(Suit::Wildcard),
            other => Err(CardError::InvalidSuit(other)),
        }
    }
}

/// A single playing card.
///
/// Standard cards carry a rank in `2..=14` (ace high). Wildcards always carry
/// [`WILDCARD_RANK`]; use [`Card::standard_rank`] when comparing ranks so a
/// wildcard can never be mistaken for a real one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    suit: Suit,
    rank: u8,
}

impl Card {
    /// Create a card, rejecting rank/suit combinations that cannot exist.
    pub fn new(rank: u8, suit: Suit) -> Result<Self, CardError> {
        let valid = match suit {
            Suit::Wildcard => rank == WILDCARD_RANK,
            _ => (MIN_RANK..=MAX_RANK).contains(&rank),
        };
        if !valid {
            return Err(CardError::InvalidRank { rank, suit });
        }
        Ok(Self { suit, rank })
    }

    pub const fn wildcard() -> Self {
        Self {
            suit: Suit::Wildcard,
            rank: WILDCARD_RANK,
        }
    }

    /// Draw an arbitrary card: one of the five suits uniformly, then a uniform
    /// rank for standard suits.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let suit = match rng.gen_range(0..5u8) {
            0 => Suit::Spades,
            1 => Suit::Hearts,
            2 => Suit::Diamonds,
            3 => Suit::Clubs,
            _ => return Self::wildcard(),
        };
        Self {
            suit,
            rank: rng.gen_range(MIN_RANK..=MAX_RANK),
        }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Raw rank, including the wildcard sentinel.
    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn is_wildcard(&self) -> bool {
        self.suit == Suit::Wildcard
    }

    /// Rank of a standard card, `None` for a wildcard.
    pub fn standard_rank(&self) -> Option<u8> {
        (!self.is_wildcard()).then_some(self.rank)
    }

    fn rank_text(&self) -> &'static str {
        match self.rank {
            2 => "2",
            3 => "3",
            4 => "4",
            5 => "5",
            6 => "6",
            7 => "7",
            8 => "8",
            9 => "9",
            10 => "10",
            JACK => "J",
            QUEEN => "Q",
            KING => "K",
            _ => "A",
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wildcard() {
            return f.write_str("J");
        }
        write!(f, "{}{}", self.rank_text(), self.suit.letter())
    }
}

impl FromStr for Card {
    type Err = CardError;

    /// Parses the text produced by `Display` (`"10S"`, `"QH"`, `"J"` for a
    /// wildcard). Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_uppercase();
        if text == "J" {
            return Ok(Self::wildcard());
        }
        let unparseable = || CardError::Unparseable(s.to_string());
        let mut chars = text.chars();
        let suit = chars
            .next_back()
            .and_then(Suit::from_letter)
            .ok_or_else(unparseable)?;
        let rank = match chars.as_str() {
            "J" => JACK,
            "Q" => QUEEN,
            "K" => KING,
            "A" => ACE,
            digits => digits.parse::<u8>().map_err(|_| unparseable())?,
        };
        Self::new(rank, suit)
    }
}

impl Write for Suit {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for Suit {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        Suit::try_from(value).map_err(|_| Error::InvalidEnum(value))
    }
}

impl FixedSize for Suit {
    const SIZE: usize = 1;
}

impl Write for Card {
    fn write(&self, writer: &mut impl BufMut) {
        self.suit.write(writer);
        self.rank.write(writer);
    }
}

impl Read for Card {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let suit = Suit::read(reader)?;
        let rank = u8::read(reader)?;
        Card::new(rank, suit).map_err(|_| Error::Invalid("Card", "invalid rank for suit"))
    }
}

impl FixedSize for Card {
    const SIZE: usize = Suit::SIZE + u8::SIZE;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_ranks() {
        assert!(Card::new(1, Suit::Spades).is_err());
        assert!(Card::new(15, Suit::Hearts).is_err());
        assert!(Card::new(2, Suit::Clubs).is_ok());
        assert!(Card::new(ACE, Suit::Diamonds).is_ok());
    }

    #[test]
    fn wildcard_only_accepts_sentinel_rank() {
        assert_eq!(
            Card::new(ACE, Suit::Wildcard),
            Err(CardError::InvalidRank {
                rank: ACE,
                suit: Suit::Wildcard
            })
        );
        let wild = Card::new(WILDCARD_RANK, Suit::Wildcard).expect("sentinel is valid");
        assert_eq!(wild, Card::wildcard());
        assert_eq!(wild.standard_rank(), None);
    }

    #[test]
    fn text_matches_display_convention() {
        let ten = Card::new(10, Suit::Spades).unwrap();
        assert_eq!(ten.to_string(), "10S");
        assert_eq!(Card::new(QUEEN, Suit::Hearts).unwrap().to_string(), "QH");
        assert_eq!(Card::wildcard().to_string(), "J");
        assert_eq!("10s".parse::<Card>().unwrap(), ten);
        assert_eq!("JD".parse::<Card>().unwrap().standard_rank(), Some(JACK));
        assert!("J".parse::<Card>().unwrap().is_wildcard());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!("ZZ".parse::<Card>(), Err(CardError::Unparseable(_))));
        assert!(matches!("1X".parse::<Card>(), Err(CardError::Unparseable(_))));
        assert!(matches!("1S".parse::<Card>(), Err(CardError::InvalidRank { .. })));
        assert!(matches!("".parse::<Card>(), Err(CardError::Unparseable(_))));
    }

    #[test]
    fn random_cards_are_valid() {
        use rand::{rngs::StdRng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let card = Card::random(&mut rng);
            assert_eq!(Card::new(card.rank(), card.suit()), Ok(card));
        }
    }
}
