// src/ui/widgets/expandable.rs

use ratatui::prelude::*;

/// Lines for a list that shows only its first item until expanded.
///
/// Collapsed lists with more than one item end with a dim `+N more` line.
pub fn expandable_lines(items: &[String], expanded: bool) -> Vec<Line<'static>> {
    if expanded || items.len() <= 1 {
        return items.iter().map(|item| Line::from(item.clone())).collect();
    }
    vec![
        Line::from(items[0].clone()),
        Line::from(Span::styled(format!("+{} more", items.len() - 1), Style::default().fg(Color::DarkGray))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect()).collect()
    }

    #[test]
    fn collapsed_list_shows_first_item_and_remaining_count() {
        let items = vec!["app:a".to_string(), "app:b".to_string(), "app:c".to_string()];
        assert_eq!(texts(&expandable_lines(&items, false)), vec!["app:a", "+2 more"]);
        assert_eq!(texts(&expandable_lines(&items, true)), vec!["app:a", "app:b", "app:c"]);
    }

    #[test]
    fn short_lists_are_never_truncated() {
        assert!(expandable_lines(&[], false).is_empty());
        assert_eq!(texts(&expandable_lines(&["x".to_string()], false)), vec!["x"]);
    }
}
