pub mod auth_form;
pub mod color;
pub mod help;
pub mod input;
pub mod status_bar;
pub mod task_form;
pub mod task_table;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Create a centered rect using a percentage of the available rect.
/// Based on the ratatui popup example: https://ratatui.rs/examples/apps/popup/
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
