//! Pulls the Keep / Sell / Buy lists out of the model's markdown.
//!
//! Models lay the table out two ways. Either each action is a row
//! (`| **Keep** | AAPL, MSFT |`) or each action is a column with the
//! tickers in the rows below the header. Both are handled; anything else
//! leaves the sections empty and the caller falls back to the raw markdown.

use analysis_core::RecommendationSections;

const KEEP_MARKER: &str = "| **Keep**";
const SELL_MARKER: &str = "| **Sell**";
const BUY_MARKER: &str = "| **Buy**";

#[derive(Clone, Copy, Debug, PartialEq)]
enum Action {
    Keep,
    Sell,
    Buy,
}

impl Action {
    /// Reads a header cell such as `**Keep**`, `Stocks to Sell` or `Buy (Qty)`.
    /// A cell naming two different actions is ambiguous and maps to none.
    fn from_cell(cell: &str) -> Option<Self> {
        let mut found = None;
        for word in cell.split(|c: char| !c.is_ascii_alphabetic()) {
            let action = if word.eq_ignore_ascii_case("keep") {
                Action::Keep
            } else if word.eq_ignore_ascii_case("sell") {
                Action::Sell
            } else if word.eq_ignore_ascii_case("buy") {
                Action::Buy
            } else {
                continue;
            };
            match found {
                None => found = Some(action),
                Some(existing) if existing == action => {}
                Some(_) => return None,
            }
        }
        found
    }
}

pub fn parse_sections(markdown: &str) -> RecommendationSections {
    parse_column_layout(markdown).unwrap_or_else(|| parse_row_layout(markdown))
}

/// Row layout: each marker starts a section that runs to the next marker or
/// to the end of its table, whichever comes first.
fn parse_row_layout(markdown: &str) -> RecommendationSections {
    let starts = [
        markdown.find(KEEP_MARKER),
        markdown.find(SELL_MARKER),
        markdown.find(BUY_MARKER),
    ];
    let markers = [KEEP_MARKER, SELL_MARKER, BUY_MARKER];

    let mut bodies: [Option<Vec<String>>; 3] = [None, None, None];
    for (i, start) in starts.iter().enumerate() {
        let Some(start) = *start else { continue };

        let next_marker = starts
            .iter()
            .flatten()
            .copied()
            .filter(|&other| other > start)
            .min()
            .unwrap_or(markdown.len());
        let end = next_marker.min(table_end(markdown, start));

        let mut body_start = start + markers[i].len();
        let rest = &markdown[body_start..end.max(body_start)];
        if rest.starts_with(" |") {
            body_start += 2;
        }
        let body = &markdown[body_start.min(end)..end];

        bodies[i] = Some(split_items(body));
    }

    let [keep, sell, buy] = bodies;
    RecommendationSections { keep, sell, buy }
}

/// Offset of the first line after the row at `start` that is not a table row.
fn table_end(markdown: &str, start: usize) -> usize {
    let Some(newline) = markdown[start..].find('\n') else {
        return markdown.len();
    };

    let mut offset = start + newline + 1;
    for line in markdown[offset..].split_inclusive('\n') {
        if !line.trim_start().starts_with('|') {
            return offset;
        }
        offset += line.len();
    }
    markdown.len()
}

/// Column layout: a header row names two or more actions and is followed by
/// a separator row; the body rows below fill the named columns.
fn parse_column_layout(markdown: &str) -> Option<RecommendationSections> {
    let lines: Vec<&str> = markdown.lines().map(str::trim).collect();

    for (i, pair) in lines.windows(2).enumerate() {
        let (header, separator) = (pair[0], pair[1]);
        if !header.starts_with('|') || !separator.starts_with('|') || !is_separator_row(separator) {
            continue;
        }

        let columns: Vec<Option<Action>> = table_cells(header).map(Action::from_cell).collect();
        let mut named: Vec<Action> = Vec::new();
        for action in columns.iter().flatten() {
            if !named.contains(action) {
                named.push(*action);
            }
        }
        if named.len() < 2 {
            continue;
        }

        let mut sections = RecommendationSections::default();
        for action in &named {
            *slot(&mut sections, *action) = Some(Vec::new());
        }

        for row in lines[i + 2..].iter().take_while(|row| row.starts_with('|')) {
            if is_separator_row(row) {
                continue;
            }
            for (cell, action) in table_cells(row).zip(columns.iter()) {
                let Some(action) = action else { continue };
                let item = clean_item(cell);
                if item.is_empty() || item == "-" {
                    continue;
                }
                if let Some(items) = slot(&mut sections, *action) {
                    items.push(item.to_string());
                }
            }
        }

        return Some(sections);
    }

    None
}

fn slot(sections: &mut RecommendationSections, action: Action) -> &mut Option<Vec<String>> {
    match action {
        Action::Keep => &mut sections.keep,
        Action::Sell => &mut sections.sell,
        Action::Buy => &mut sections.buy,
    }
}

/// Cells of a `| a | b |` row, without the outer pipes.
fn table_cells(row: &str) -> impl Iterator<Item = &str> {
    let inner = row.trim().trim_start_matches('|');
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|')
}

fn is_separator_row(row: &str) -> bool {
    table_cells(row).all(|cell| {
        let cell = cell.trim();
        !cell.is_empty() && cell.chars().all(|c| c == '-' || c == ':')
    })
}

fn clean_item(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '|')
}

fn split_items(body: &str) -> Vec<String> {
    body.trim()
        .split(',')
        .map(clean_item)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
