// src/table.rs
//
// Plain column tables for stdout. Widths are measured with `console` so
// styled headers still line up.

use console::{Alignment, measure_text_width, pad_str, style};

use crate::model::{Offers, ShaperSettings};
use crate::shaper::ShaperCommit;

pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(measure_text_width(cell));
            }
        }
    }

    let line = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad_str(c, *w, Alignment::Left, None).into_owned())
            .collect();
        s!(padded.join("  ").trim_end())
    };

    let mut out = line(headers.iter().map(|h| style(h).bold().to_string()).collect());
    out.push('\n');
    out.push_str(&line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.clone()));
        out.push('\n');
    }
    out
}

/// Offers cheapest first; `*` marks the current plan. The NTD column only
/// appears when at least one offer declares it.
pub fn plans(offers: &Offers, current: &str) -> String {
    let with_ntd = offers.any_ntd_flag();
    let mut headers = vec!["", "PSID", "Plan", "$/day"];
    if with_ntd {
        headers.push("NTD upgrade");
    }
    let rows: Vec<Vec<String>> = offers
        .sorted_by_spend()
        .into_iter()
        .map(|p| {
            let mut row = vec![
                s!(if p.psid == current { "*" } else { "" }),
                p.psid.clone(),
                p.display_name.clone(),
                p.daily_spend(),
            ];
            if with_ntd {
                row.push(match p.ntd_upgrade_required {
                    Some(true) => s!("yes"),
                    Some(false) => s!("no"),
                    None => s!("-"),
                });
            }
            row
        })
        .collect();
    render(&headers, &rows)
}

/// Current shaper state and, when computed, the values that would be sent.
pub fn shaper(settings: &ShaperSettings, pending: Option<ShaperCommit>) -> String {
    let opt = |v: Option<u32>| v.map_or_else(|| s!("-"), |n| n.to_string());
    let row = |dir: &str, l: &crate::model::ShaperLimit, commit: Option<u32>| {
        vec![
            s!(dir),
            l.control.to_string(),
            l.min.to_string(),
            l.max.to_string(),
            opt(l.current),
            opt(commit),
        ]
    };
    let rows = vec![
        row("down", &settings.down, pending.map(|c| c.down)),
        row("up", &settings.up, pending.map(|c| c.up)),
    ];
    let mut out = format!("Queue type: {}\n", settings.queue_type);
    out.push_str(&render(&["Direction", "Control", "Min", "Max", "Current", "Commit"], &rows));
    out
}
