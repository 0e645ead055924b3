use pokerslots_types::slots::{Card, Grid, Row, COLUMNS};
use std::fmt::Write;

use super::LineResult;

pub fn format_card_list(cards: &[Card]) -> String {
    let mut out = String::with_capacity(cards.len().saturating_mul(4));
    for (idx, card) in cards.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", card);
    }
    out
}

/// Single-line grid for log fields: rows top to bottom separated by `/`.
pub fn format_grid(grid: &Grid) -> String {
    let mut out = String::with_capacity(64);
    for (idx, row) in Row::ALL.iter().enumerate() {
        if idx > 0 {
            out.push('/');
        }
        let cards: Vec<Card> = (0..COLUMNS).map(|reel| grid.cell(reel, *row)).collect();
        out.push_str(&format_card_list(&cards));
    }
    out
}

pub fn push_line_entry(out: &mut String, line: &LineResult) {
    if !out.is_empty() {
        out.push(',');
    }
    let _ = write!(
        out,
        r#"{{"line":{},"payline":"{}","hand":"{}","won":{}}}"#,
        line.index, line.payline, line.result, line.won
    );
}

/// Winning lines only, as a JSON array.
pub fn format_winning_lines(lines: &[LineResult]) -> String {
    let mut out = String::new();
    for line in lines.iter().filter(|l| l.won > 0) {
        push_line_entry(&mut out, line);
    }
    format!("[{out}]")
}
