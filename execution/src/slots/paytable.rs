//! Credits paid per unit bet on a single payline.

use pokerslots_types::slots::{HandCategory, HandResult};

/// Base payouts. Ranked categories add `RANK_STEP * rank` on top.
mod payouts {
    pub const ONE_PAIR: u64 = 2;
    pub const TWO_PAIR: u64 = 20;
    pub const THREE_OF_A_KIND: u64 = 50;
    pub const STRAIGHT: u64 = 250;
    pub const FLUSH: u64 = 500;
    pub const FULL_HOUSE: u64 = 700;
    pub const FOUR_OF_A_KIND: u64 = 4_200;
    pub const STRAIGHT_FLUSH: u64 = 72_000;
    pub const ROYAL_FLUSH: u64 = 650_000;

    pub const FULL_HOUSE_RANK_STEP: u64 = 10;
    pub const FOUR_OF_A_KIND_RANK_STEP: u64 = 100;
}

/// Credits for one unit bet.
pub fn payout(result: &HandResult) -> u64 {
    let rank = result.rank().map(u64::from).unwrap_or(0);
    match result.category() {
        HandCategory::NoWin => 0,
        HandCategory::OnePair => payouts::ONE_PAIR + rank,
        HandCategory::TwoPair => payouts::TWO_PAIR + rank,
        HandCategory::ThreeOfAKind => payouts::THREE_OF_A_KIND + rank,
        HandCategory::Straight => payouts::STRAIGHT,
        HandCategory::Flush => payouts::FLUSH,
        HandCategory::FullHouse => payouts::FULL_HOUSE + payouts::FULL_HOUSE_RANK_STEP * rank,
        HandCategory::FourOfAKind => {
            payouts::FOUR_OF_A_KIND + payouts::FOUR_OF_A_KIND_RANK_STEP * rank
        }
        HandCategory::StraightFlush => payouts::STRAIGHT_FLUSH,
        HandCategory::RoyalFlush => payouts::ROYAL_FLUSH,
    }
}

/// Credits won on one line at `bet` per line.
pub fn line_win(result: &HandResult, bet: u64) -> u64 {
    payout(result).saturating_mul(bet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokerslots_types::slots::{ACE, MAX_RANK, MIN_RANK};

    fn results(category: HandCategory) -> Vec<HandResult> {
        if category.has_tie_break() {
            (MIN_RANK..=MAX_RANK)
                .map(|rank| HandResult::ranked(category, rank))
                .collect()
        } else {
            vec![HandResult::from_parts(category, None).unwrap()]
        }
    }

    #[test]
    fn test_payout_values() {
        assert_eq!(payout(&HandResult::NO_WIN), 0);
        assert_eq!(payout(&HandResult::ranked(HandCategory::OnePair, 2)), 4);
        assert_eq!(payout(&HandResult::ranked(HandCategory::TwoPair, ACE)), 34);
        assert_eq!(payout(&HandResult::ranked(HandCategory::ThreeOfAKind, 7)), 57);
        assert_eq!(payout(&HandResult::fixed(HandCategory::Straight)), 250);
        assert_eq!(payout(&HandResult::fixed(HandCategory::Flush)), 500);
        assert_eq!(payout(&HandResult::ranked(HandCategory::FullHouse, 3)), 730);
        assert_eq!(payout(&HandResult::ranked(HandCategory::FourOfAKind, ACE)), 5_600);
        assert_eq!(payout(&HandResult::fixed(HandCategory::StraightFlush)), 72_000);
        assert_eq!(payout(&HandResult::fixed(HandCategory::RoyalFlush)), 650_000);
    }

    #[test]
    fn test_higher_category_always_pays_more() {
        for pair in HandCategory::ALL.windows(2) {
            let lower_max = results(pair[0]).iter().map(payout).max().unwrap();
            let higher_min = results(pair[1]).iter().map(payout).min().unwrap();
            assert!(
                higher_min > lower_max,
                "{} ({higher_min}) must outpay {} ({lower_max})",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn test_payout_non_decreasing_in_rank() {
        for category in HandCategory::ALL {
            let pays: Vec<u64> = results(category).iter().map(payout).collect();
            assert!(pays.windows(2).all(|w| w[0] <= w[1]), "{category}");
        }
    }

    #[test]
    fn test_line_win_scales_and_saturates() {
        let flush = HandResult::fixed(HandCategory::Flush);
        assert_eq!(line_win(&flush, 3), 1_500);
        assert_eq!(line_win(&HandResult::NO_WIN, 100), 0);
        assert_eq!(line_win(&flush, u64::MAX), u64::MAX);
    }
}
