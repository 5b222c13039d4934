// Language badge colors, following GitHub's linguist palette.

/// Color for languages missing from the table.
pub const DEFAULT_LANGUAGE_COLOR: &str = "#8b8b8b";

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("Java", "#b07219"),
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("PHP", "#4F5D95"),
    ("C++", "#f34b7d"),
    ("C", "#555555"),
    ("C#", "#178600"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("Shell", "#89e051"),
    ("Kotlin", "#A97BFF"),
    ("Vue", "#41b883"),
];

/// Badge color for a language name (exact, case-sensitive match).
pub fn language_color(language: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_LANGUAGE_COLOR)
}
