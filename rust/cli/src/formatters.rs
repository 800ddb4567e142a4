//! Card, hand and report formatters for terminal display.
//!
//! Cards print with Unicode suit glyphs where the terminal is known to render
//! them and fall back to ASCII letters otherwise.
//!
//! ```rust
//! use hilo_engine::cards::{Card, Rank, Suit};
//! use hilo_cli::formatters::{format_card, nice_number};
//!
//! let ace = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace) == "A♠" || format_card(&ace) == "As");
//! assert_eq!(nice_number(2000), "2.0k");
//! ```

use hilo_engine::cards::Card;
use hilo_engine::session::Tally;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_card(card: &Card) -> String {
    if supports_unicode() {
        format!("{}", card)
    } else {
        format!("{:#}", card)
    }
}

/// Abbreviate a count with a `k`/`M` suffix and one decimal:
/// `20` → `20.0`, `2000` → `2.0k`, `2500000` → `2.5M`.
pub fn nice_number(n: u64) -> String {
    const SUFFIXES: [&str; 3] = ["", "k", "M"];
    let digits = n.to_string().len();
    let order = ((digits - 1) / 3).min(SUFFIXES.len() - 1);
    let scaled = n as f64 / 10f64.powi(3 * order as i32);
    format!("{:.1}{}", scaled, SUFFIXES[order])
}

/// Render the outcome tally as a plain table: one row per settlement value,
/// ordered by value, with its count and share of all rounds.
///
/// ```text
/// Key  | Wins/2.0k | Win%
/// -----+-----------+--------
/// -1   | 850       | 42.5000
/// ```
pub fn render_report_table(tally: &Tally) -> String {
    let total = tally.rounds();
    let mut rows: Vec<[String; 3]> = vec![[
        "Key".to_string(),
        format!("Wins/{}", nice_number(total)),
        "Win%".to_string(),
    ]];
    for (key, count) in tally.iter() {
        let pct = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        rows.push([key.to_string(), count.to_string(), format!("{:.4}", pct)]);
    }

    let mut widths = [0usize; 3];
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut table = String::new();
    for (i, row) in rows.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect();
        table.push_str(line.join(" | ").trim_end());
        table.push('\n');
        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            table.push_str(&rule.join("-+-"));
            table.push('\n');
        }
    }
    table
}
