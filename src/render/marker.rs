//! List markers for the numbered styles.

use crate::config::NavStyle;

/// Marker for an entry.
///
/// `path` holds the 1-based position of the entry in each enclosing list,
/// outermost first, ending with the entry's own position.
pub fn list_marker(style: NavStyle, bullet_symbol: &str, path: &[u32]) -> String {
    let position = path.last().copied().unwrap_or(1);
    let depth = path.len().saturating_sub(1);

    match style {
        NavStyle::Bullet | NavStyle::Inline => {
            if bullet_symbol.is_empty() {
                "•".to_string()
            } else {
                bullet_symbol.to_string()
            }
        }
        NavStyle::Number => format!("{}.", position),
        NavStyle::Decimal => path
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("."),
        NavStyle::Outline => match depth {
            0 => format!("{}.", to_roman(position)),
            1 => format!("{}.", to_alpha(position)),
            2 => format!("{}.", position),
            3 => format!("{}.", to_alpha(position).to_lowercase()),
            _ => format!("{}.", to_roman(position).to_lowercase()),
        },
    }
}

/// Whether a style numbers its entries.
pub fn is_numbered(style: NavStyle) -> bool {
    matches!(
        style,
        NavStyle::Number | NavStyle::Decimal | NavStyle::Outline
    )
}

/// Convert number to Roman numerals.
fn to_roman(mut num: u32) -> String {
    let numerals = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut result = String::new();
    for (value, symbol) in numerals {
        while num >= value {
            result.push_str(symbol);
            num -= value;
        }
    }
    result
}

/// Convert number to spreadsheet-style letters (A..Z, AA, AB, ...).
fn to_alpha(mut num: u32) -> String {
    let mut letters = Vec::new();
    while num > 0 {
        let rem = (num - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        num = (num - 1) / 26;
    }
    letters.iter().rev().collect()
}
