//! Spin execution.

use pokerslots_types::slots::{
    Card, Grid, HandResult, Payline, PaylineTable, GRID_SIZE, HAND_SIZE, INITIAL_BET,
    INITIAL_BET_LINES, MAX_SHUFFLES, SHUFFLES,
};

use super::{evaluate, line_win, logging, Deck, Ledger, RandomSource, SlotsError};

/// What to do when the deck runs low.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeckPolicy {
    /// Never refill. Once fewer than a grid of cards remain every spin fails
    /// with [`SlotsError::DeckExhausted`].
    #[default]
    Deplete,
    /// Rebuild the full deck before shuffling whenever fewer than a grid of
    /// cards remain.
    Replenish,
}

/// Evaluation of one active payline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineResult {
    /// Position in the payline table.
    pub index: usize,
    pub payline: Payline,
    pub hand: [Card; HAND_SIZE],
    pub result: HandResult,
    /// Credits paid on this line (`payout * bet`).
    pub won: u64,
}

/// Everything a host needs to present a completed spin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpinOutcome {
    pub grid: Grid,
    /// One entry per active payline, in table order.
    pub lines: Vec<LineResult>,
    pub total_won: u64,
    pub wagered: u64,
    /// Ledger balance after the win was credited.
    pub balance: u64,
}

impl SpinOutcome {
    pub fn winning_lines(&self) -> impl Iterator<Item = &LineResult> {
        self.lines.iter().filter(|line| line.won > 0)
    }
}

/// Result of a run of automatic spins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoSpin {
    pub outcomes: Vec<SpinOutcome>,
    /// The error that ended the run early, if any.
    pub stopped: Option<SlotsError>,
}

/// Machine state owned by one game.
#[derive(Clone, Debug)]
pub struct SlotsState {
    deck: Deck,
    grid: Option<Grid>,
    paylines: PaylineTable,
    bet: u64,
    bet_lines: usize,
    shuffles: u8,
    policy: DeckPolicy,
    spins: u64,
}

impl SlotsState {
    pub fn new(deck: Deck, paylines: PaylineTable) -> Self {
        Self {
            deck,
            grid: None,
            paylines,
            bet: INITIAL_BET,
            bet_lines: INITIAL_BET_LINES,
            shuffles: SHUFFLES,
            policy: DeckPolicy::default(),
            spins: 0,
        }
    }

    pub fn with_policy(mut self, policy: DeckPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Grid from the last successful spin.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn paylines(&self) -> &PaylineTable {
        &self.paylines
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn bet_lines(&self) -> usize {
        self.bet_lines
    }

    pub fn shuffles(&self) -> u8 {
        self.shuffles
    }

    pub fn policy(&self) -> DeckPolicy {
        self.policy
    }

    /// Completed spins.
    pub fn spins(&self) -> u64 {
        self.spins
    }

    /// Total debited per spin.
    pub fn wager(&self) -> Option<u64> {
        self.bet.checked_mul(self.bet_lines as u64)
    }

    pub fn set_bet(&mut self, bet: u64) -> Result<(), SlotsError> {
        if bet == 0 {
            return Err(self.invalid_wager(bet, self.bet_lines));
        }
        self.bet = bet;
        Ok(())
    }

    pub fn set_bet_lines(&mut self, bet_lines: usize) -> Result<(), SlotsError> {
        if bet_lines == 0 || bet_lines > self.paylines.len() {
            return Err(self.invalid_wager(self.bet, bet_lines));
        }
        self.bet_lines = bet_lines;
        Ok(())
    }

    pub fn set_shuffles(&mut self, shuffles: u8) -> Result<(), SlotsError> {
        if shuffles == 0 || shuffles > MAX_SHUFFLES {
            return Err(SlotsError::InvalidShuffleCount(shuffles));
        }
        self.shuffles = shuffles;
        Ok(())
    }

    fn invalid_wager(&self, bet: u64, bet_lines: usize) -> SlotsError {
        SlotsError::InvalidWager {
            bet,
            bet_lines,
            max_lines: self.paylines.len(),
        }
    }

    /// Refill if the policy asks for it, shuffle, then deal a grid.
    fn deal<R: RandomSource>(&mut self, rng: &mut R) -> Result<Grid, SlotsError> {
        if self.policy == DeckPolicy::Replenish && self.deck.len() < GRID_SIZE {
            tracing::debug!(remaining = self.deck.len(), "deck replenished");
            self.deck.reset();
        }
        self.deck.shuffle(rng, self.shuffles)?;
        self.deck.deal_grid()
    }
}

impl Default for SlotsState {
    fn default() -> Self {
        Self::new(Deck::default(), PaylineTable::default())
    }
}

/// Play one spin.
///
/// On error the ledger ends where it started: a rejected wager debits nothing
/// and a failed deal refunds the debit.
pub fn spin<L: Ledger, R: RandomSource>(
    state: &mut SlotsState,
    ledger: &mut L,
    rng: &mut R,
) -> Result<SpinOutcome, SlotsError> {
    let result = execute(state, ledger, rng);
    if let Err(err) = &result {
        tracing::warn!(
            bet = state.bet,
            bet_lines = state.bet_lines,
            balance = ledger.balance(),
            remaining = state.deck.len(),
            ?err,
            "spin rejected"
        );
    }
    result
}

fn execute<L: Ledger, R: RandomSource>(
    state: &mut SlotsState,
    ledger: &mut L,
    rng: &mut R,
) -> Result<SpinOutcome, SlotsError> {
    let available = ledger.balance();
    if state.bet == 0 || state.bet_lines == 0 {
        return Err(SlotsError::InsufficientFunds {
            required: 0,
            available,
        });
    }
    if state.bet_lines > state.paylines.len() {
        return Err(state.invalid_wager(state.bet, state.bet_lines));
    }
    let wagered = state.wager().ok_or(SlotsError::InsufficientFunds {
        required: u64::MAX,
        available,
    })?;
    if !ledger.debit(wagered) {
        return Err(SlotsError::InsufficientFunds {
            required: wagered,
            available,
        });
    }

    let grid = match state.deal(rng) {
        Ok(grid) => grid,
        Err(err) => {
            ledger.credit(wagered);
            return Err(err);
        }
    };

    let bet = state.bet;
    let lines: Vec<LineResult> = state
        .paylines
        .active(state.bet_lines)
        .iter()
        .enumerate()
        .map(|(index, payline)| {
            let hand = grid.hand(payline);
            let result = evaluate(&hand);
            LineResult {
                index,
                payline: *payline,
                hand,
                result,
                won: line_win(&result, bet),
            }
        })
        .collect();
    let total_won = lines
        .iter()
        .fold(0u64, |total, line| total.saturating_add(line.won));
    ledger.credit(total_won);

    state.grid = Some(grid);
    state.spins += 1;

    tracing::debug!(
        spin = state.spins,
        grid = %logging::format_grid(&grid),
        wins = %logging::format_winning_lines(&lines),
        "spin dealt"
    );
    tracing::info!(
        spin = state.spins,
        bet = state.bet,
        bet_lines = state.bet_lines,
        wagered,
        total_won,
        balance = ledger.balance(),
        remaining = state.deck.len(),
        "spin completed"
    );

    Ok(SpinOutcome {
        grid,
        lines,
        total_won,
        wagered,
        balance: ledger.balance(),
    })
}

/// Play up to `count` spins with the current wager, stopping at the first
/// error.
pub fn auto_spin<L: Ledger, R: RandomSource>(
    state: &mut SlotsState,
    ledger: &mut L,
    rng: &mut R,
    count: u32,
) -> AutoSpin {
    let mut outcomes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        match spin(state, ledger, rng) {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => {
                return AutoSpin {
                    outcomes,
                    stopped: Some(err),
                }
            }
        }
    }
    AutoSpin {
        outcomes,
        stopped: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{create_rng, create_state, stacked_deck};
    use crate::slots::{payout, Balance, GameRng};
    use pokerslots_types::slots::{HandCategory, Row, STANDARD_DECK_SIZE};

    #[test]
    fn test_spin_debits_and_credits() {
        let mut state = create_state(3, 5);
        let mut ledger = Balance::new(1_000);
        let mut rng = create_rng(1);

        let outcome = spin(&mut state, &mut ledger, &mut rng).expect("spin succeeds");
        assert_eq!(outcome.wagered, 15);
        assert_eq!(outcome.lines.len(), 5);
        let expected: u64 = outcome
            .lines
            .iter()
            .map(|line| payout(&line.result) * 3)
            .sum();
        assert_eq!(outcome.total_won, expected);
        assert_eq!(outcome.balance, 1_000 - 15 + expected);
        assert_eq!(ledger.balance(), outcome.balance);
        assert_eq!(state.spins(), 1);
        assert_eq!(state.grid(), Some(&outcome.grid));
        assert_eq!(state.deck().len(), 72 - GRID_SIZE);
    }

    #[test]
    fn test_spin_lines_follow_table_order() {
        let mut state = create_state(1, 35);
        let mut ledger = Balance::new(1_000);
        let outcome = spin(&mut state, &mut ledger, &mut create_rng(2)).unwrap();
        for (i, line) in outcome.lines.iter().enumerate() {
            assert_eq!(line.index, i);
            assert_eq!(&line.payline, state.paylines().get(i).unwrap());
            assert_eq!(line.hand, outcome.grid.hand(&line.payline));
            assert_eq!(line.result, evaluate(&line.hand));
        }
    }

    #[test]
    fn test_spin_insufficient_funds_mutates_nothing() {
        let mut state = create_state(10, 5);
        let mut ledger = Balance::new(49);
        let before = state.deck().clone();

        let err = spin(&mut state, &mut ledger, &mut create_rng(3)).unwrap_err();
        assert_eq!(
            err,
            SlotsError::InsufficientFunds {
                required: 50,
                available: 49
            }
        );
        assert_eq!(ledger.balance(), 49);
        assert_eq!(state.deck(), &before);
        assert_eq!(state.spins(), 0);
        assert!(state.grid().is_none());
    }

    #[test]
    fn test_spin_exact_balance_is_enough() {
        let mut state = create_state(2, 5);
        let mut ledger = Balance::new(10);
        assert!(spin(&mut state, &mut ledger, &mut create_rng(4)).is_ok());
    }

    #[test]
    fn test_spin_deck_exhausted_refunds() {
        let mut state = SlotsState::new(Deck::new(0), PaylineTable::curated());
        let mut ledger = Balance::new(1_000);
        let mut rng = create_rng(5);
        for _ in 0..3 {
            spin(&mut state, &mut ledger, &mut rng).expect("cards remain");
        }
        let balance = ledger.balance();
        let err = spin(&mut state, &mut ledger, &mut rng).unwrap_err();
        assert_eq!(
            err,
            SlotsError::DeckExhausted {
                needed: GRID_SIZE,
                remaining: STANDARD_DECK_SIZE - 3 * GRID_SIZE
            }
        );
        assert_eq!(ledger.balance(), balance);
        assert_eq!(state.deck().len(), STANDARD_DECK_SIZE - 3 * GRID_SIZE);
        assert_eq!(state.spins(), 3);
    }

    #[test]
    fn test_replenish_policy_refills() {
        let mut state = SlotsState::new(Deck::new(0), PaylineTable::curated())
            .with_policy(DeckPolicy::Replenish);
        let mut ledger = Balance::new(1_000);
        let mut rng = create_rng(6);
        for _ in 0..10 {
            spin(&mut state, &mut ledger, &mut rng).expect("deck refills");
        }
        assert_eq!(state.spins(), 10);
    }

    #[test]
    fn test_wager_setters_validate() {
        let mut state = SlotsState::default();
        assert_eq!(state.bet(), INITIAL_BET);
        assert_eq!(state.bet_lines(), INITIAL_BET_LINES);
        assert_eq!(state.shuffles(), SHUFFLES);

        assert_eq!(
            state.set_bet(0),
            Err(SlotsError::InvalidWager {
                bet: 0,
                bet_lines: 1,
                max_lines: 35
            })
        );
        assert_eq!(
            state.set_bet_lines(36),
            Err(SlotsError::InvalidWager {
                bet: 1,
                bet_lines: 36,
                max_lines: 35
            })
        );
        assert!(state.set_bet_lines(0).is_err());
        assert_eq!(state.set_shuffles(11), Err(SlotsError::InvalidShuffleCount(11)));
        assert!(state.set_bet_lines(35).is_ok());
        assert!(state.set_bet(5).is_ok());
        assert_eq!(state.wager(), Some(175));
    }

    #[test]
    fn test_full_table_accepts_every_line() {
        let mut state = SlotsState::new(Deck::default(), PaylineTable::full());
        state.set_bet_lines(243).expect("full table");
        let mut ledger = Balance::new(1_000);
        let outcome = spin(&mut state, &mut ledger, &mut create_rng(7)).unwrap();
        assert_eq!(outcome.lines.len(), 243);
    }

    #[test]
    fn test_spin_is_reproducible() {
        let play = || {
            let mut state = create_state(1, 35);
            let mut ledger = Balance::new(1_000);
            let mut rng = GameRng::new(99, 1, 0);
            spin(&mut state, &mut ledger, &mut rng).unwrap()
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn test_stacked_grid_pays_royal() {
        // Reel r row Mid holds the royal; everything else is junk.
        let mut state = SlotsState::new(stacked_deck(), PaylineTable::curated());
        let mut ledger = Balance::new(1_000);
        let mut rng = crate::mocks::IdentityRng;
        state.set_shuffles(1).unwrap();
        let outcome = spin(&mut state, &mut ledger, &mut rng).unwrap();
        assert_eq!(outcome.grid.cell(0, Row::Mid).to_string(), "10S");
        assert_eq!(
            outcome.lines[0].result.category(),
            HandCategory::RoyalFlush
        );
        assert_eq!(outcome.total_won, 650_000);
        assert_eq!(ledger.balance(), 1_000 - 1 + 650_000);
    }

    #[test]
    fn test_auto_spin_stops_at_first_error() {
        let mut state = create_state(100, 5);
        let mut ledger = Balance::new(1_000);
        let run = auto_spin(&mut state, &mut ledger, &mut create_rng(8), 50);
        assert!(run.outcomes.len() < 50);
        assert!(matches!(
            run.stopped,
            Some(SlotsError::InsufficientFunds { .. }) | Some(SlotsError::DeckExhausted { .. })
        ));
        assert_eq!(run.outcomes.len() as u64, state.spins());
    }

    #[test]
    fn test_auto_spin_zero_count() {
        let mut state = SlotsState::default();
        let mut ledger = Balance::default();
        let run = auto_spin(&mut state, &mut ledger, &mut create_rng(9), 0);
        assert!(run.outcomes.is_empty());
        assert!(run.stopped.is_none());
    }
}
