//! Cell highlighting by case-insensitive substring match.

/// (pattern, background). First match wins, so order matters.
const RULES: &[(&str, &str)] = &[
    ("player-assists", "#ece1db"),
    ("player-shots", "#d6e5ee"),
    ("total-shots", "#f2e1e9"),
    ("circus", "#fbe3de"),
    ("bet365", "#fbeccc"),
    ("betcity", "#d6e5ee"),
];

const CHIP_STYLE: &str = "padding: 0px 5px; width: fit-content; border-radius: 3px;";

pub fn background_for(value: &str) -> Option<&'static str> {
    let lowered = value.to_lowercase();
    RULES
        .iter()
        .find(|(pattern, _)| lowered.contains(pattern))
        .map(|(_, color)| *color)
}

/// Inline style for the chip wrapping a cell's text.
pub fn cell_style(value: &str) -> String {
    match background_for(value) {
        Some(color) => format!("{CHIP_STYLE} background: {color};"),
        None => CHIP_STYLE.to_string(),
    }
}
