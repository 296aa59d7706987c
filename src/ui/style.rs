use crate::domain::entities::dataset::{Scalar, StockRecord};
use crate::domain::entities::tag::TagColor;

pub fn root_container_style() -> &'static str {
    "font-family: 'Noto Sans TC', sans-serif; padding: 12px; background: #fff; height: 100vh; display: flex; flex-direction: column; overflow: hidden; box-sizing: border-box;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; z-index: 10; background: #f5f5f5; border: 1px solid #bbb; padding: 4px 8px; white-space: nowrap; cursor: pointer; user-select: none;"
}

pub fn filter_cell_style() -> &'static str {
    "position: sticky; top: 29px; z-index: 9; background: #fafafa; border: 1px solid #bbb; padding: 2px;"
}

pub fn modal_backdrop_style() -> &'static str {
    "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1200;"
}

pub fn tag_chip_style(color: TagColor, selected: bool) -> String {
    let border = if selected { color.foreground } else { "transparent" };
    format!(
        "display: inline-block; padding: 2px 8px; margin: 2px; border-radius: 10px; font-size: 12px; background: {}; color: {}; border: 1px solid {border}; cursor: pointer;",
        color.background, color.foreground
    )
}

pub fn page_button_style(active: bool) -> &'static str {
    if active {
        "min-width: 32px; padding: 4px 8px; border: 1px solid #1f77b4; background: #1f77b4; color: #fff; border-radius: 4px;"
    } else {
        "min-width: 32px; padding: 4px 8px; border: 1px solid #bbb; background: #fff; border-radius: 4px; cursor: pointer;"
    }
}

pub fn format_number_with_commas(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Display form only; filtering and export always use the raw string form.
pub fn format_cell_value(value: Option<&Scalar>) -> String {
    match value {
        Some(Scalar::Number { value: number, .. }) if number.abs() >= 1000.0 => {
            let decimals = if number.fract() == 0.0 { 0 } else { 2 };
            format_number_with_commas(*number, decimals)
        }
        Some(Scalar::Number { value: number, .. }) if number.fract() != 0.0 => {
            let rounded = format!("{number:.4}");
            rounded
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        }
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Right-align a column when most of its non-blank cells on the page are numbers.
pub fn column_alignment(column: &str, rows: &[StockRecord]) -> &'static str {
    let (numeric, filled) = rows
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|value| !value.is_null())
        .fold((0_usize, 0_usize), |(numeric, filled), value| {
            let is_number = value.as_number().is_some();
            (numeric + usize::from(is_number), filled + 1)
        });
    if filled > 0 && numeric * 2 > filled {
        "right"
    } else {
        "left"
    }
}
