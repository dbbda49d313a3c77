use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub main_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Width: 44 columns fits the four table columns plus borders
    /// Height: 9 lines (2 outer borders + 3 form/table lines + 1 status + buffer)
    pub const MIN_WIDTH: u16 = 44;
    pub const MIN_HEIGHT: u16 = 9;

    pub fn calculate(size: Rect) -> Self {
        // Ensure minimum terminal size (accounting for outer border)
        let width = size.width.max(Self::MIN_WIDTH + 2);
        let height = size.height.max(Self::MIN_HEIGHT + 2);
        let size = Rect::new(size.x, size.y, width, height);

        // Inner area accounts for the outer border: 1 char on each side
        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        // Split vertically: content, status (1 line)
        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner_area);

        Self {
            inner_area,
            main_area: vertical[0],
            status_area: vertical[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_splits_off_one_status_line() {
        let layout = Layout::calculate(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.inner_area.height, 22);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.main_area.height, 21);
    }

    #[test]
    fn layout_clamps_tiny_terminals_to_minimum() {
        let layout = Layout::calculate(Rect::new(0, 0, 10, 4));
        assert!(layout.inner_area.width >= Layout::MIN_WIDTH);
        assert!(layout.inner_area.height >= Layout::MIN_HEIGHT);
    }
}
