//! Keyboard-driven form state shared by the input screens.

use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Secret,
    /// Cycled with increase/decrease rather than typed.
    Choice,
}

pub trait FormField: Copy + Eq + std::fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn kind(self) -> FieldKind {
        FieldKind::Text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form<F: FormField> {
    values: Vec<String>,
    focus: usize,
    _fields: PhantomData<F>,
}

impl<F: FormField> Default for Form<F> {
    fn default() -> Self {
        Self {
            values: vec![String::new(); F::ALL.len()],
            focus: 0,
            _fields: PhantomData,
        }
    }
}

impl<F: FormField> Form<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: F, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    fn index_of(field: F) -> usize {
        F::ALL
            .iter()
            .position(|candidate| *candidate == field)
            .unwrap_or(0)
    }

    pub fn value(&self, field: F) -> &str {
        self.values
            .get(Self::index_of(field))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set(&mut self, field: F, value: impl Into<String>) {
        if let Some(slot) = self.values.get_mut(Self::index_of(field)) {
            *slot = value.into();
        }
    }

    pub fn focused(&self) -> F {
        F::ALL[self.focus.min(F::ALL.len().saturating_sub(1))]
    }

    pub fn focus(&mut self, field: F) {
        self.focus = Self::index_of(field);
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % F::ALL.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = (self.focus + F::ALL.len() - 1) % F::ALL.len();
    }

    pub fn accepts_text(&self) -> bool {
        self.focused().kind() != FieldKind::Choice
    }

    /// Appends to the focused field. Choice fields ignore typing.
    pub fn insert(&mut self, ch: char) -> bool {
        if !self.accepts_text() || ch.is_control() {
            return false;
        }
        let index = self.focus;
        match self.values.get_mut(index) {
            Some(value) => {
                value.push(ch);
                true
            }
            None => false,
        }
    }

    pub fn backspace(&mut self) -> bool {
        if !self.accepts_text() {
            return false;
        }
        let index = self.focus;
        self.values
            .get_mut(index)
            .and_then(|value| value.pop())
            .is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = (F, &str)> + '_ {
        F::ALL
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }
}

/// Single-line text input outside a form, such as a search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn insert(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value.push(ch);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.value.pop().is_some()
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Email,
        Password,
        Unit,
    }

    impl FormField for Field {
        const ALL: &'static [Self] = &[Self::Email, Self::Password, Self::Unit];

        fn label(self) -> &'static str {
            match self {
                Self::Email => "Email",
                Self::Password => "Password",
                Self::Unit => "Unit",
            }
        }

        fn kind(self) -> FieldKind {
            match self {
                Self::Email => FieldKind::Text,
                Self::Password => FieldKind::Secret,
                Self::Unit => FieldKind::Choice,
            }
        }
    }

    #[test]
    fn typing_goes_to_the_focused_field() {
        let mut form = Form::<Field>::new();
        assert!(form.insert('a'));
        form.focus_next();
        assert!(form.insert('x'));
        assert!(form.backspace());
        assert!(!form.backspace());
        assert_eq!(form.value(Field::Email), "a");
        assert_eq!(form.value(Field::Password), "");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = Form::<Field>::new();
        form.focus_previous();
        assert_eq!(form.focused(), Field::Unit);
        form.focus_next();
        assert_eq!(form.focused(), Field::Email);
    }

    #[test]
    fn choice_fields_ignore_typing() {
        let mut form = Form::<Field>::new().with(Field::Unit, "kg");
        form.focus(Field::Unit);
        assert!(!form.accepts_text());
        assert!(!form.insert('z'));
        assert_eq!(form.value(Field::Unit), "kg");
    }

    #[test]
    fn text_input_take_clears_the_value() {
        let mut input = TextInput::default();
        input.insert('h');
        input.insert('i');
        assert_eq!(input.take(), "hi");
        assert_eq!(input.value(), "");
    }
}
