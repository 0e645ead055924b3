use pokerslots_execution::slots::SpinOutcome;
use pokerslots_types::slots::HandCategory;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Running totals over spins.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    spins: u64,
    total_wagered: u64,
    total_won: u64,
    total_net: f64,
    total_net_sq: f64,
    biggest_win: u64,
    hits: BTreeMap<HandCategory, u64>,
}

impl Stats {
    pub fn add(&mut self, outcome: &SpinOutcome) {
        let net = outcome.total_won as f64 - outcome.wagered as f64;
        self.spins += 1;
        self.total_wagered = self.total_wagered.saturating_add(outcome.wagered);
        self.total_won = self.total_won.saturating_add(outcome.total_won);
        self.total_net += net;
        self.total_net_sq += net * net;
        self.biggest_win = self.biggest_win.max(outcome.total_won);
        for line in outcome.winning_lines() {
            *self.hits.entry(line.result.category()).or_default() += 1;
        }
    }

    pub fn merge(&mut self, other: &Stats) {
        self.spins += other.spins;
        self.total_wagered = self.total_wagered.saturating_add(other.total_wagered);
        self.total_won = self.total_won.saturating_add(other.total_won);
        self.total_net += other.total_net;
        self.total_net_sq += other.total_net_sq;
        self.biggest_win = self.biggest_win.max(other.biggest_win);
        for (category, count) in &other.hits {
            *self.hits.entry(*category).or_default() += count;
        }
    }

    pub fn spins(&self) -> u64 {
        self.spins
    }

    pub fn total_wagered(&self) -> u64 {
        self.total_wagered
    }

    pub fn total_won(&self) -> u64 {
        self.total_won
    }

    /// Fraction of wagered credits paid back.
    pub fn return_to_player(&self) -> f64 {
        if self.total_wagered == 0 {
            0.0
        } else {
            self.total_won as f64 / self.total_wagered as f64
        }
    }

    fn mean_net(&self) -> f64 {
        if self.spins == 0 {
            0.0
        } else {
            self.total_net / self.spins as f64
        }
    }

    /// Standard error of the mean net result per spin.
    pub fn stderr(&self) -> f64 {
        if self.spins <= 1 {
            return 0.0;
        }
        let mean = self.mean_net();
        let var = (self.total_net_sq / self.spins as f64) - mean * mean;
        let var = if var < 0.0 { 0.0 } else { var };
        (var / self.spins as f64).sqrt()
    }

    pub fn hits(&self) -> &BTreeMap<HandCategory, u64> {
        &self.hits
    }
}

/// Report over every simulated session.
#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub sessions: usize,
    pub spins: u64,
    pub total_wagered: u64,
    pub total_won: u64,
    pub return_to_player: f64,
    pub house_edge: f64,
    pub stderr_per_spin: f64,
    pub biggest_win: u64,
    pub sessions_busted: usize,
    pub sessions_exhausted: usize,
    pub hits: BTreeMap<HandCategory, u64>,
}

impl Summary {
    pub fn new(stats: &Stats, sessions: usize, busted: usize, exhausted: usize) -> Self {
        let rtp = stats.return_to_player();
        Self {
            sessions,
            spins: stats.spins,
            total_wagered: stats.total_wagered,
            total_won: stats.total_won,
            return_to_player: rtp,
            house_edge: if stats.total_wagered == 0 { 0.0 } else { 1.0 - rtp },
            stderr_per_spin: stats.stderr(),
            biggest_win: stats.biggest_win,
            sessions_busted: busted,
            sessions_exhausted: exhausted,
            hits: stats.hits.clone(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sessions:        {}", self.sessions)?;
        writeln!(f, "spins:           {}", self.spins)?;
        writeln!(f, "wagered:         {}", self.total_wagered)?;
        writeln!(f, "won:             {}", self.total_won)?;
        writeln!(f, "return/player:   {:.4}", self.return_to_player)?;
        writeln!(f, "house edge:      {:.4}", self.house_edge)?;
        writeln!(f, "stderr/spin:     {:.2}", self.stderr_per_spin)?;
        writeln!(f, "biggest win:     {}", self.biggest_win)?;
        writeln!(
            f,
            "stopped early:   {} busted, {} deck exhausted",
            self.sessions_busted, self.sessions_exhausted
        )?;
        write!(f, "line hits:")?;
        for category in HandCategory::ALL.iter().rev() {
            if let Some(count) = self.hits.get(category) {
                write!(f, "\n  {:<16} {}", category.name(), count)?;
            }
        }
        Ok(())
    }
}
