use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Dollars with thousands separators and cents. Negatives get a leading `-$`:
/// `-1234.5` → `"-$1,234.50"`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let cents = format!("{:.2}", val.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if val < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}

/// Table date, e.g. `Apr 5, 2025`.
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Cut `s` to at most `max` chars, the last one becoming `…` when anything was dropped.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.char_indices().nth(max).is_none() {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let cut = s.char_indices().nth(max - 1).map_or(s.len(), |(i, _)| i);
    format!("{}…", &s[..cut])
}

/// `[████░░░░]` bar filled to `ratio`, clamped to 0..=1.
pub(crate) fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled = ((ratio * width as f64) as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

// ── List cursors ─────────────────────────────────────────────
// `index` is the highlighted row, `scroll` the first row drawn, `page` the rows that fit.

fn keep_in_view(index: usize, scroll: &mut usize, page: usize) {
    let page = page.max(1);
    if index < *scroll {
        *scroll = index;
    } else if index >= *scroll + page {
        *scroll = index + 1 - page;
    }
}

pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
    }
    keep_in_view(*index, scroll, page);
}

pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    *scroll = (*scroll).min(*index);
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len == 0 {
        return;
    }
    *index = len - 1;
    keep_in_view(*index, scroll, page);
}
