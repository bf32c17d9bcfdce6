use colored::{ColoredString, Colorize};
use rust_decimal::Decimal;
use std::fmt;

use crate::currency::{format_eur, format_signed_eur};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

fn build_label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "",
        MessageKind::Success => "[✓]",
        MessageKind::Warning => "[!]",
        MessageKind::Error => "[x]",
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let label = build_label(kind);
    let formatted = if label.is_empty() {
        text
    } else {
        format!("{label} {text}")
    };
    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Error | MessageKind::Warning => eprintln!("{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

/// `=== Title ===`, bold.
pub fn section_text(title: impl fmt::Display) -> String {
    format!("=== {} ===", title.to_string().trim()).bold().to_string()
}

/// Amount colored by sign: green for zero and above, red below.
pub fn amount_text(amount: Decimal) -> ColoredString {
    let text = format_eur(amount);
    if amount.is_sign_negative() && !amount.is_zero() {
        text.red()
    } else {
        text.green()
    }
}

/// Signed amount (`+12,00 €` / `-12,00 €`) colored by sign.
pub fn signed_amount_text(amount: Decimal) -> ColoredString {
    let text = format_signed_eur(amount);
    if amount.is_sign_negative() && !amount.is_zero() {
        text.red()
    } else {
        text.green()
    }
}
