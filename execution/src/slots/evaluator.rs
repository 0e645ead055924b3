//! Five-card hand evaluation with wildcards.
//!
//! A hand is reduced to a multiset of concrete ranks, a multiset of concrete
//! suits and a wildcard count. Each category is then a predicate over that
//! profile, so the result never depends on the order the cards were dealt in.
//! Wildcards are assigned optimistically: a hand scores the best category any
//! substitution of the wildcards could make.
//!
//! Tie-break ranks follow the winning group: the highest concrete rank that
//! belongs to it (the whole hand for a full house), or an ace when the group is
//! made of wildcards alone.

use pokerslots_types::slots::{Card, HandCategory, HandResult, ACE, HAND_SIZE, MAX_RANK, MIN_RANK};

/// Rank that an ace plays in the wheel (A-2-3-4-5).
const ACE_LOW: u8 = 1;

/// Lowest card of the highest straight (10-J-Q-K-A).
const BROADWAY_LOW: u8 = 10;

/// Wildcards that alone guarantee a royal flush.
const ROYAL_WILDCARDS: u8 = 4;

const SUITS: usize = 4;

/// Rank and suit multiplicities of a hand.
struct Profile {
    wildcards: u8,
    ranks: [u8; MAX_RANK as usize + 1],
    suits: [u8; SUITS],
}

impl Profile {
    fn new(hand: &[Card; HAND_SIZE]) -> Self {
        let mut profile = Self {
            wildcards: 0,
            ranks: [0; MAX_RANK as usize + 1],
            suits: [0; SUITS],
        };
        for card in hand {
            match card.standard_rank() {
                Some(rank) => {
                    profile.ranks[rank as usize] += 1;
                    profile.suits[card.suit() as usize] += 1;
                }
                None => profile.wildcards += 1,
            }
        }
        profile
    }

    fn count(&self, rank: u8) -> u8 {
        self.ranks[rank as usize]
    }

    /// Concrete ranks present, highest first.
    fn present(&self) -> impl Iterator<Item = u8> + '_ {
        (MIN_RANK..=MAX_RANK).rev().filter(|&r| self.count(r) > 0)
    }

    fn highest(&self) -> Option<u8> {
        self.present().next()
    }

    fn single_suit(&self) -> bool {
        self.suits.iter().filter(|&&n| n > 0).count() <= 1
    }

    fn distinct(&self) -> bool {
        self.ranks.iter().all(|&n| n <= 1)
    }

    /// Every concrete rank fits one five-rank window, the ace playing low in
    /// the wheel.
    fn fits_window(&self) -> bool {
        (ACE_LOW..=BROADWAY_LOW).any(|low| {
            let high = low + HAND_SIZE as u8 - 1;
            self.present()
                .all(|r| (low..=high).contains(&r) || (r == ACE && low == ACE_LOW))
        })
    }

    /// Highest rank whose group of `size` can be completed with wildcards.
    fn best_of_a_kind(&self, size: u8) -> Option<u8> {
        if self.wildcards >= size {
            return Some(self.highest().unwrap_or(ACE));
        }
        self.present().find(|&r| self.count(r) + self.wildcards >= size)
    }

    /// Wildcards needed to grow `rank` to `size` cards.
    fn deficit(&self, rank: u8, size: u8) -> u8 {
        size.saturating_sub(self.count(rank))
    }

    fn is_royal_flush(&self) -> bool {
        if self.wildcards >= ROYAL_WILDCARDS {
            return true;
        }
        self.single_suit() && self.distinct() && self.present().all(|r| r >= BROADWAY_LOW)
    }

    fn is_straight_flush(&self) -> bool {
        self.single_suit() && self.is_straight()
    }

    fn is_straight(&self) -> bool {
        self.distinct() && self.fits_window()
    }

    fn is_full_house(&self) -> bool {
        self.present().any(|three| {
            self.present().any(|two| {
                three != two
                    && self.deficit(three, 3) + self.deficit(two, 2) <= self.wildcards
            })
        })
    }

    /// Higher rank of the best completable two pair.
    fn best_two_pair(&self) -> Option<u8> {
        let mut best = None;
        for high in self.present() {
            for low in self.present().filter(|&r| r < high) {
                let (dh, dl) = (self.deficit(high, 2), self.deficit(low, 2));
                if dh <= 1 && dl <= 1 && dh + dl <= self.wildcards {
                    best = best.max(Some(high));
                }
            }
        }
        best
    }
}

/// Best category and tie-break rank for a five-card hand.
pub fn evaluate(hand: &[Card; HAND_SIZE]) -> HandResult {
    let profile = Profile::new(hand);
    let highest = || profile.highest().unwrap_or(ACE);

    if profile.is_royal_flush() {
        return HandResult::fixed(HandCategory::RoyalFlush);
    }
    if profile.is_straight_flush() {
        return HandResult::fixed(HandCategory::StraightFlush);
    }
    if let Some(rank) = profile.best_of_a_kind(4) {
        return HandResult::ranked(HandCategory::FourOfAKind, rank);
    }
    if profile.is_full_house() {
        return HandResult::ranked(HandCategory::FullHouse, highest());
    }
    if profile.single_suit() {
        return HandResult::fixed(HandCategory::Flush);
    }
    if profile.is_straight() {
        return HandResult::fixed(HandCategory::Straight);
    }
    if let Some(rank) = profile.best_of_a_kind(3) {
        return HandResult::ranked(HandCategory::ThreeOfAKind, rank);
    }
    if let Some(rank) = profile.best_two_pair() {
        return HandResult::ranked(HandCategory::TwoPair, rank);
    }
    if let Some(rank) = profile.best_of_a_kind(2) {
        return HandResult::ranked(HandCategory::OnePair, rank);
    }
    HandResult::NO_WIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::hand;
    use pokerslots_types::slots::{Suit, JACK, KING, QUEEN};
    use proptest::prelude::*;

    fn category(text: &str) -> HandCategory {
        evaluate(&hand(text)).category()
    }

    #[test]
    fn test_evaluate_royal_flush() {
        let result = evaluate(&hand("10S JS QS KS AS"));
        assert_eq!(result, HandResult::fixed(HandCategory::RoyalFlush));
        assert_eq!(category("AH KH J QH 10H"), HandCategory::RoyalFlush);
    }

    #[test]
    fn test_evaluate_all_wildcards() {
        assert_eq!(category("J J J J J"), HandCategory::RoyalFlush);
    }

    #[test]
    fn test_evaluate_four_wildcards_always_royal() {
        assert_eq!(category("2C J J J J"), HandCategory::RoyalFlush);
        assert_eq!(category("J J 7D J J"), HandCategory::RoyalFlush);
    }

    #[test]
    fn test_evaluate_straight_flush() {
        assert_eq!(category("2S J 4S 5S 6S"), HandCategory::StraightFlush);
        assert_eq!(category("9D 10D JD QD KD"), HandCategory::StraightFlush);
        // Wheel.
        assert_eq!(category("AC 2C 3C 4C 5C"), HandCategory::StraightFlush);
        assert_eq!(category("AC 2C J 4C 5C"), HandCategory::StraightFlush);
    }

    #[test]
    fn test_evaluate_four_of_a_kind() {
        assert_eq!(
            evaluate(&hand("9S 9H 9D 9C 2S")),
            HandResult::ranked(HandCategory::FourOfAKind, 9)
        );
        // Three wildcards join the higher single.
        assert_eq!(
            evaluate(&hand("J 3S J KD J")),
            HandResult::ranked(HandCategory::FourOfAKind, KING)
        );
        assert_eq!(
            evaluate(&hand("QS QH J J 2C")),
            HandResult::ranked(HandCategory::FourOfAKind, QUEEN)
        );
    }

    #[test]
    fn test_evaluate_full_house() {
        assert_eq!(
            evaluate(&hand("2S 2H 3D 3C 3S")),
            HandResult::ranked(HandCategory::FullHouse, 3)
        );
        // Tie-break is the highest concrete rank in the hand.
        assert_eq!(
            evaluate(&hand("KS KH 4D 4C 4S")),
            HandResult::ranked(HandCategory::FullHouse, KING)
        );
        assert_eq!(
            evaluate(&hand("5S 5H 8D 8C J")),
            HandResult::ranked(HandCategory::FullHouse, 8)
        );
    }

    #[test]
    fn test_evaluate_flush() {
        assert_eq!(category("2H 7H 9H JH KH"), HandCategory::Flush);
        assert_eq!(category("2H 7H J JH KH"), HandCategory::Flush);
    }

    #[test]
    fn test_evaluate_straight() {
        assert_eq!(category("5S 6H 7D 8C 9S"), HandCategory::Straight);
        assert_eq!(category("10S JH QD KC AS"), HandCategory::Straight);
        assert_eq!(category("AS 2H 3D 4C 5S"), HandCategory::Straight);
        assert_eq!(category("AS 2H J 4C 5S"), HandCategory::Straight);
        assert_eq!(category("5S 6H J 8C 9S"), HandCategory::Straight);
        // No wrap-around.
        assert_eq!(category("QS KH AD 2C 3S"), HandCategory::NoWin);
    }

    #[test]
    fn test_evaluate_three_of_a_kind() {
        assert_eq!(
            evaluate(&hand("7S 7H 7D 2C KS")),
            HandResult::ranked(HandCategory::ThreeOfAKind, 7)
        );
        assert_eq!(
            evaluate(&hand("J J 2D 9C KS")),
            HandResult::ranked(HandCategory::ThreeOfAKind, KING)
        );
        assert_eq!(
            evaluate(&hand("JS JH J 2C 5D")),
            HandResult::ranked(HandCategory::ThreeOfAKind, JACK)
        );
    }

    #[test]
    fn test_evaluate_two_pair() {
        assert_eq!(
            evaluate(&hand("4S 4H 9D 9C KS")),
            HandResult::ranked(HandCategory::TwoPair, 9)
        );
    }

    #[test]
    fn test_evaluate_one_pair() {
        assert_eq!(
            evaluate(&hand("4S 4H 9D 10C KS")),
            HandResult::ranked(HandCategory::OnePair, 4)
        );
        // A single wildcard pairs the highest card.
        assert_eq!(
            evaluate(&hand("2S 4H 9D J KC")),
            HandResult::ranked(HandCategory::OnePair, KING)
        );
    }

    #[test]
    fn test_evaluate_no_win() {
        assert_eq!(evaluate(&hand("2S 4H 9D 10C KS")), HandResult::NO_WIN);
    }

    #[test]
    fn test_category_order() {
        let ladder = [
            "10S JS QS KS AS",
            "9S 10S JS QS KS",
            "9S 9H 9D 9C 2S",
            "2S 2H 3D 3C 3S",
            "2H 7H 9H JH KH",
            "5S 6H 7D 8C 9S",
            "7S 7H 7D 2C KS",
            "4S 4H 9D 9C KS",
            "4S 4H 9D 10C KS",
            "2S 4H 9D 10C KS",
        ];
        let categories: Vec<HandCategory> = ladder.iter().map(|h| category(h)).collect();
        for pair in categories.windows(2) {
            assert!(pair[0] > pair[1], "{:?} should beat {:?}", pair[0], pair[1]);
        }
    }

    fn arb_card() -> impl Strategy<Value = Card> {
        prop_oneof![
            1 => Just(Card::wildcard()),
            4 => (MIN_RANK..=MAX_RANK, 0usize..4)
                .prop_map(|(rank, suit)| Card::new(rank, Suit::STANDARD[suit]).unwrap()),
        ]
    }

    fn arb_hand() -> impl Strategy<Value = [Card; HAND_SIZE]> {
        prop::array::uniform5(arb_card())
    }

    proptest! {
        #[test]
        fn prop_order_independent(cards in arb_hand(), swaps in prop::collection::vec((0usize..5, 0usize..5), 0..8)) {
            let base = evaluate(&cards);
            let mut shuffled = cards;
            for (i, j) in swaps {
                shuffled.swap(i, j);
            }
            prop_assert_eq!(evaluate(&shuffled), base);
        }

        #[test]
        fn prop_tie_break_matches_category(cards in arb_hand()) {
            let result = evaluate(&cards);
            prop_assert_eq!(result.rank().is_some(), result.category().has_tie_break());
        }

        #[test]
        fn prop_wildcard_never_hurts(cards in arb_hand(), slot in 0usize..5) {
            let base = evaluate(&cards).category();
            let mut wilder = cards;
            wilder[slot] = Card::wildcard();
            prop_assert!(evaluate(&wilder).category() >= base);
        }
    }
}
