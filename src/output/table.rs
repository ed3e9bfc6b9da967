//! Console table rendering for search results

use crate::matcher::{MatchResult, MatchScore};

const BORDER: &str =
    "+-----------------------------------------------------------------------------+";
const SEPARATOR: &str = "--   --   --   --   --   --   --";

/// Column padding beyond the widest cell.
const COLUMN_PAD: usize = 4;

/// Renders a match table for the console
///
/// Columns are right-aligned and sized to their widest cell. The
/// availability and rating columns only appear when at least one record
/// carries them. An empty match list renders the query line followed by
/// "No matches found.".
pub fn render_matches(query: &str, matches: &[MatchResult]) -> String {
    let mut out = String::new();
    out.push_str(BORDER);
    out.push('\n');
    out.push_str(&format!("Input query: {query}\n"));

    if matches.is_empty() {
        out.push_str("No matches found.\n");
        return out;
    }

    out.push_str(SEPARATOR);
    out.push('\n');

    let extended = matches
        .iter()
        .any(|m| m.record.availability.is_some() || m.record.rating.is_some());
    let headers: &[&str] = if extended {
        &["Score", "Name", "Price", "Avail.", "Rating"]
    } else {
        &["Score", "Name", "Price"]
    };

    let rows: Vec<Vec<String>> = matches.iter().map(|m| format_row(m, extended)).collect();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
                + COLUMN_PAD
        })
        .collect();

    push_row(&mut out, headers.iter().map(|h| h.to_string()), &widths);
    for row in rows {
        push_row(&mut out, row.into_iter(), &widths);
    }

    out.push_str(BORDER);
    out.push('\n');
    out
}

/// Prints a match table to stdout
pub fn print_matches(query: &str, matches: &[MatchResult]) {
    print!("{}", render_matches(query, matches));
}

fn push_row(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    for (cell, width) in cells.zip(widths) {
        out.push_str(&format!("{cell:>width$}"));
    }
    out.push('\n');
}

fn format_row(result: &MatchResult, extended: bool) -> Vec<String> {
    let record = &result.record;
    let mut row = vec![
        format_score(&result.score),
        record.name.clone(),
        format!("{:.2}", record.price),
    ];
    if extended {
        row.push(match record.availability {
            Some(available) => available.to_string(),
            None => "-".to_string(),
        });
        row.push(match record.rating {
            Some(rating) => rating.to_string(),
            None => "-".to_string(),
        });
    }
    row
}

fn format_score(score: &MatchScore) -> String {
    match score {
        MatchScore::Tokens(tokens) => tokens.join(" "),
        MatchScore::Similarity(similarity) => format!("{similarity:.3}"),
    }
}
