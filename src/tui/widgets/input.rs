use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Single-line text input with a character cursor. Cursor positions are in
/// characters, not bytes, so multi-byte input behaves correctly.
#[derive(Debug, Clone, Default)]
pub struct Input {
    value: String,
    cursor: usize,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    /// Remove the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
    }

    /// Remove the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor >= self.char_count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

impl From<String> for Input {
    fn from(value: String) -> Self {
        let cursor = value.chars().count();
        Self { value, cursor }
    }
}

/// Render the input as a bordered one-line field. Masked fields (passwords)
/// show a bullet per character. When focused, the terminal cursor is placed
/// at the edit position.
pub fn render_input(
    f: &mut Frame,
    area: Rect,
    input: &Input,
    title: &str,
    style: Style,
    focused: bool,
    masked: bool,
) {
    let display = if masked {
        "•".repeat(input.char_count())
    } else {
        input.value().to_string()
    };

    let paragraph = Paragraph::new(display)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .style(style);
    f.render_widget(paragraph, area);

    if focused {
        // +1 on each axis for the field border
        let x = area.x + 1 + input.cursor().min(area.width.saturating_sub(3) as usize) as u16;
        f.set_cursor_position((x, area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_moves_the_cursor_with_the_text() {
        let mut input = Input::new();
        for ch in "milk".chars() {
            input.insert_char(ch);
        }
        assert_eq!(input.value(), "milk");
        assert_eq!(input.cursor(), 4);

        input.move_left();
        input.move_left();
        input.insert_char('e');
        assert_eq!(input.value(), "mielk");

        input.backspace();
        assert_eq!(input.value(), "milk");
        assert_eq!(input.cursor(), 2);

        input.delete();
        assert_eq!(input.value(), "mik");
    }

    #[test]
    fn editing_is_character_based_not_byte_based() {
        let mut input = Input::from("héllo".to_string());
        input.move_home();
        input.move_right();
        input.delete();
        assert_eq!(input.value(), "hllo");
    }

    #[test]
    fn backspace_at_start_and_delete_at_end_are_noops() {
        let mut input = Input::from("a".to_string());
        input.delete();
        assert_eq!(input.value(), "a");
        input.move_home();
        input.backspace();
        assert_eq!(input.value(), "a");
    }
}
