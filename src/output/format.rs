use std::time::Duration;

use comfy_table::{
    Attribute, Cell, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::core::{Recency, RowStatus};

pub(crate) fn styled_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
pub(crate) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

pub(super) fn status_color(status: &RowStatus, use_color: bool) -> Option<Color> {
    if !use_color {
        return None;
    }
    match status {
        RowStatus::Indexed => Some(Color::Green),
        RowStatus::NotIndexed => None,
        RowStatus::Blocked => Some(Color::Yellow),
        RowStatus::Failed(_) => Some(Color::Red),
    }
}

pub(super) fn recency_color(recency: Recency, use_color: bool) -> Option<Color> {
    if !use_color {
        return None;
    }
    match recency {
        Recency::Yes => Some(Color::Green),
        Recency::No => None,
        Recency::Unknown => Some(Color::Yellow),
    }
}

/// "33m 20s", "1h 05m", "12s"
pub(crate) fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}h {m:02}m")
    } else if m > 0 {
        format!("{m}m {s:02}s")
    } else {
        format!("{s}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_seconds_only() {
        assert_eq!(format_duration(Duration::from_secs(12)), "12s");
    }

    #[test]
    fn duration_minutes() {
        assert_eq!(format_duration(Duration::from_secs(2000)), "33m 20s");
    }

    #[test]
    fn duration_hours() {
        assert_eq!(format_duration(Duration::from_secs(3900)), "1h 05m");
    }

    #[test]
    fn colors_disabled_without_color() {
        assert_eq!(status_color(&RowStatus::Blocked, false), None);
        assert_eq!(recency_color(Recency::Yes, false), None);
    }

    #[test]
    fn error_rows_are_red() {
        assert_eq!(
            status_color(&RowStatus::Failed("x".to_string()), true),
            Some(Color::Red)
        );
    }
}
