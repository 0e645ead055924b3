use pokerslots_execution::slots::{auto_spin, Balance, GameRng, Ledger, SlotsError};

use crate::{Stats, Summary, ValidatedConfig};

/// Why a session ended before its spin budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    Busted,
    DeckExhausted,
    Rejected(SlotsError),
}

impl From<SlotsError> for StopReason {
    fn from(err: SlotsError) -> Self {
        match err {
            SlotsError::InsufficientFunds { .. } => StopReason::Busted,
            SlotsError::DeckExhausted { .. } => StopReason::DeckExhausted,
            other => StopReason::Rejected(other),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionReport {
    pub session: u64,
    pub stats: Stats,
    pub final_balance: u64,
    pub stopped: Option<StopReason>,
}

/// Play one session to its spin budget or until the machine refuses a spin.
pub fn run_session(config: &ValidatedConfig, session: u64) -> Result<SessionReport, SlotsError> {
    let mut state = config.new_state()?;
    let mut ledger = Balance::new(config.initial_balance);
    let mut rng = GameRng::new(config.seed, session, 0);

    let run = auto_spin(&mut state, &mut ledger, &mut rng, config.spins_per_session);
    let mut stats = Stats::default();
    for outcome in &run.outcomes {
        stats.add(outcome);
    }
    let stopped = run.stopped.map(StopReason::from);

    tracing::info!(
        session,
        spins = stats.spins(),
        wagered = stats.total_wagered(),
        won = stats.total_won(),
        balance = ledger.balance(),
        stopped = ?stopped,
        "session finished"
    );

    Ok(SessionReport {
        session,
        stats,
        final_balance: ledger.balance(),
        stopped,
    })
}

/// Play every configured session and summarize.
pub fn run(config: &ValidatedConfig) -> Result<Summary, SlotsError> {
    let mut total = Stats::default();
    let mut busted = 0;
    let mut exhausted = 0;
    for session in 0..config.sessions as u64 {
        let report = run_session(config, session)?;
        match report.stopped {
            Some(StopReason::Busted) => busted += 1,
            Some(StopReason::DeckExhausted) => exhausted += 1,
            Some(StopReason::Rejected(err)) => return Err(err),
            None => {}
        }
        total.merge(&report.stats);
    }
    Ok(Summary::new(&total, config.sessions, busted, exhausted))
}
