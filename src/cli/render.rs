//! Text views of the planner state. Each function returns the full screen as a string.

use std::fmt::Write;

use chrono::{Datelike, NaiveDate};
use colored::Colorize;

use crate::cli::output::{amount_text, section_text, signed_amount_text};
use crate::core::time::{days_in_month, long_date_label, month_label};
use crate::core::Snapshot;
use crate::currency::format_eur;
use crate::domain::{Inputs, RecurringItem};

const NAME_WIDTH: usize = 18;

pub fn overview(snapshot: &Snapshot, today: NaiveDate) -> String {
    let result = snapshot.project(today);
    let mut out = String::new();

    let _ = writeln!(out, "{}", long_date_label(today).dimmed());
    let _ = writeln!(out, "{}", section_text("Finanzplaner"));
    let _ = writeln!(
        out,
        "Verfügbar bis Monatsende:  {}",
        amount_text(result.verfuegbar_bis_monatsende).bold()
    );
    let _ = writeln!(
        out,
        "Verbleibende Einnahmen:    {}",
        format_eur(result.remaining_income).green()
    );
    let _ = writeln!(
        out,
        "Verbleibende Ausgaben:     {}",
        format_eur(result.remaining_expense).red()
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", section_text("Anstehende Posten"));
    let upcoming = snapshot.pending(today);
    if upcoming.is_empty() {
        let _ = writeln!(out, "Keine anstehenden Posten in diesem Monat.");
    }
    for item in upcoming {
        let _ = writeln!(out, "{}", item_line(item));
    }
    out
}

pub fn details(snapshot: &Snapshot, today: NaiveDate) -> String {
    let result = snapshot.project(today);
    let inputs = &snapshot.inputs;
    let mut out = String::new();

    let _ = writeln!(out, "{}", section_text(format!("Details {}", month_label(today))));
    let _ = writeln!(out, "Kontostand:                {}", format_eur(inputs.kontostand));
    let _ = writeln!(out, "Bargeld:                   {}", format_eur(inputs.bargeld));
    let _ = writeln!(out, "Bekomme:                   {}", format_eur(inputs.bekomme));
    let _ = writeln!(
        out,
        "Sofort verfügbar:          {}",
        amount_text(result.sofort_verfuegbar)
    );
    let _ = writeln!(
        out,
        "+ Verbleibende Einnahmen:  {}",
        format_eur(result.remaining_income)
    );
    let _ = writeln!(
        out,
        "- Verbleibende Ausgaben:   {}",
        format_eur(result.remaining_expense)
    );
    let _ = writeln!(
        out,
        "= Verfügbar bis Monatsende: {}",
        amount_text(result.verfuegbar_bis_monatsende).bold()
    );

    let _ = writeln!(out);
    let remaining_days = days_in_month(today).saturating_sub(today.day()) + 1;
    let _ = writeln!(
        out,
        "{}",
        section_text(format!("Tagesübersicht (noch {remaining_days} Tage)"))
    );
    let breakdown = snapshot.day_breakdown(today);
    if breakdown.is_empty() {
        let _ = writeln!(out, "Keine anstehenden Posten in diesem Monat.");
    }
    for day in breakdown {
        let _ = writeln!(
            out,
            "{} des Monats  {}",
            day.day,
            signed_amount_text(day.net_change)
        );
        for item in day.items {
            let _ = writeln!(
                out,
                "    {:<width$} {}",
                item.name,
                signed_amount_text(item.signed_amount()),
                width = NAME_WIDTH
            );
        }
    }
    out
}

/// All stored items, including inactive ones, ordered by day.
pub fn items(items: &[RecurringItem]) -> String {
    let mut sorted: Vec<&RecurringItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.day_of_month);

    let mut out = String::new();
    let _ = writeln!(out, "{}", section_text("Wiederkehrende Posten"));
    if sorted.is_empty() {
        let _ = writeln!(out, "Keine Posten vorhanden.");
    }
    for item in sorted {
        let status = if item.active {
            "aktiv".normal()
        } else {
            "inaktiv".dimmed()
        };
        let _ = writeln!(out, "{}  [{}]  {}", item_line(item), status, item.id.as_str().dimmed());
    }
    out
}

pub fn inputs(inputs: &Inputs) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", section_text("Eingaben"));
    let _ = writeln!(out, "Kontostand:        {}", format_eur(inputs.kontostand));
    let _ = writeln!(out, "Bargeld:           {}", format_eur(inputs.bargeld));
    let _ = writeln!(out, "Bekomme:           {}", format_eur(inputs.bekomme));
    let _ = writeln!(
        out,
        "Sofort verfügbar:  {}",
        amount_text(inputs.sofort_verfuegbar())
    );
    out
}

fn item_line(item: &RecurringItem) -> String {
    format!(
        "{:>4} des Monats  {:<width$} {}",
        item.day_of_month.to_string(),
        item.name,
        signed_amount_text(item.signed_amount()),
        width = NAME_WIDTH
    )
}
