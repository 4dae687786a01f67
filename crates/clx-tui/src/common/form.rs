//! Single-line text field used by the login, register, and entry forms.

/// A single-line editable text value.
///
/// Masked fields (passwords) render bullets instead of their content but
/// keep the real value for submission.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            value: String::new(),
            masked: true,
        }
    }

    /// Field pre-filled with a value (e.g. today's date).
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            masked: false,
        }
    }

    pub fn push(&mut self, ch: char) {
        // Control characters come through crossterm as key events too.
        if !ch.is_control() {
            self.value.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// What the renderer shows: the value, or one bullet per character for
    /// masked fields.
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_field_hides_value_but_keeps_it() {
        let mut field = TextField::masked();
        field.push('a');
        field.push('b');
        field.push('c');
        assert_eq!(field.display(), "•••");
        assert_eq!(field.value(), "abc");

        field.backspace();
        assert_eq!(field.value(), "ab");
    }

    #[test]
    fn test_control_characters_ignored() {
        let mut field = TextField::new();
        field.push('x');
        field.push('\n');
        field.push('\t');
        assert_eq!(field.value(), "x");
    }
}
