use std::ops::Deref;

use ratatui::{
    style::Modifier,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

use crate::content::ContentDocument;
use crate::editor::{EditorSession, FieldId, ProjectField, ProjectForms};
use crate::theme::Theme;

const VALUE_INDENT: &str = "  ";

/// A single editable text field on the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FieldId),
    Project { index: usize, field: ProjectField },
}

impl FocusTarget {
    pub fn is_multiline(self) -> bool {
        match self {
            FocusTarget::Field(id) => id.is_multiline(),
            FocusTarget::Project { field, .. } => field.is_multiline(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FocusTarget::Field(id) => id.label(),
            FocusTarget::Project { field, .. } => field.label(),
        }
    }

    pub fn project_index(self) -> Option<usize> {
        match self {
            FocusTarget::Field(_) => None,
            FocusTarget::Project { index, .. } => Some(index),
        }
    }
}

/// Where the cursor landed in the last rendered form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorVisual {
    pub line: usize,
    pub column: u16,
}

#[derive(Debug)]
pub struct FormRender {
    pub lines: Vec<Line<'static>>,
    pub total_lines: usize,
    pub cursor: Option<CursorVisual>,
}

/// FormDisplay wraps an EditorSession and owns everything the terminal needs
/// to edit it: which field has focus, the cursor inside that field, and the
/// layout of the form as wrapped lines.
#[derive(Debug)]
pub struct FormDisplay {
    session: EditorSession,
    focus: usize,
    /// Cursor as a char offset into the focused field.
    cursor: usize,
    preferred_column: Option<usize>,
    last_cursor_visual: Option<CursorVisual>,
    last_view_height: usize,
    last_total_lines: usize,
}

impl Deref for FormDisplay {
    type Target = EditorSession;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl FormDisplay {
    pub fn new(session: EditorSession) -> Self {
        let mut display = Self {
            session,
            focus: 0,
            cursor: 0,
            preferred_column: None,
            last_cursor_visual: None,
            last_view_height: 1,
            last_total_lines: 0,
        };
        display.cursor_to_end();
        display
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    /// Mutable access for operations that do not change the field layout
    /// (collect, export).
    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }

    pub fn load(&mut self, document: ContentDocument, source: impl Into<String>) {
        self.session.load(document, source);
        self.focus = 0;
        self.cursor_to_end();
    }

    pub fn revert(&mut self) {
        self.session.revert();
        self.clamp_focus();
    }

    /// Every field in tab order: scalar fields, then each project's fields.
    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        let projects = self.session.fields().projects.len();
        FieldId::ALL
            .into_iter()
            .map(FocusTarget::Field)
            .chain((0..projects).flat_map(|index| {
                ProjectField::ALL
                    .into_iter()
                    .map(move |field| FocusTarget::Project { index, field })
            }))
            .collect()
    }

    pub fn focused(&self) -> FocusTarget {
        self.focus_targets()
            .get(self.focus)
            .copied()
            .unwrap_or(FocusTarget::Field(FieldId::Name))
    }

    pub fn focus(&mut self, target: FocusTarget) -> bool {
        match self.focus_targets().iter().position(|item| *item == target) {
            Some(index) => {
                self.focus = index;
                self.cursor_to_end();
                true
            }
            None => false,
        }
    }

    pub fn focus_next(&mut self) {
        let count = self.focus_targets().len();
        self.focus = (self.focus + 1) % count;
        self.cursor_to_end();
    }

    pub fn focus_prev(&mut self) {
        let count = self.focus_targets().len();
        self.focus = (self.focus + count - 1) % count;
        self.cursor_to_end();
    }

    pub fn text(&self) -> &str {
        let fields = self.session.fields();
        match self.focused() {
            FocusTarget::Field(id) => fields.field(id),
            FocusTarget::Project { index, field } => fields
                .projects
                .get(index)
                .map(|project| project.field(field))
                .unwrap_or_default(),
        }
    }

    /// Cursor as a char offset into [`Self::text`].
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn last_cursor_visual(&self) -> Option<CursorVisual> {
        self.last_cursor_visual
    }

    pub fn last_view_height(&self) -> usize {
        self.last_view_height
    }

    pub fn last_total_lines(&self) -> usize {
        self.last_total_lines
    }

    pub fn update_after_render(&mut self, view_height: usize, total_lines: usize) {
        self.last_view_height = view_height.max(1);
        self.last_total_lines = total_lines;
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        let cursor = self.cursor;
        if let Some(text) = self.focused_text_mut() {
            let at = byte_offset(text, cursor);
            text.insert(at, ch);
            self.cursor += 1;
            self.preferred_column = None;
        }
    }

    /// Insert a line break. Single-line fields refuse it.
    pub fn insert_newline(&mut self) -> bool {
        if !self.focused().is_multiline() {
            return false;
        }
        let cursor = self.cursor;
        if let Some(text) = self.focused_text_mut() {
            let at = byte_offset(text, cursor);
            text.insert(at, '\n');
            self.cursor += 1;
            self.preferred_column = None;
            return true;
        }
        false
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let cursor = self.cursor;
        if let Some(text) = self.focused_text_mut() {
            let at = byte_offset(text, cursor - 1);
            text.remove(at);
            self.cursor -= 1;
            self.preferred_column = None;
            return true;
        }
        false
    }

    pub fn delete(&mut self) -> bool {
        let cursor = self.cursor;
        if cursor >= self.text().chars().count() {
            return false;
        }
        if let Some(text) = self.focused_text_mut() {
            let at = byte_offset(text, cursor);
            text.remove(at);
            self.preferred_column = None;
            return true;
        }
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.preferred_column = None;
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        self.preferred_column = None;
        if self.cursor >= self.text().chars().count() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Start of the current line within the field.
    pub fn move_home(&mut self) {
        self.preferred_column = None;
        let (line, _) = self.logical_position();
        self.cursor = line_start(self.text(), line);
    }

    /// End of the current line within the field.
    pub fn move_end(&mut self) {
        self.preferred_column = None;
        let (line, _) = self.logical_position();
        let start = line_start(self.text(), line);
        self.cursor = start + line_len(self.text(), line);
    }

    /// Move between lines of a multi-line field, leaving the field when the
    /// cursor is already on its first or last line.
    pub fn move_vertical(&mut self, delta: i32) {
        let (line, column) = self.logical_position();
        let line_count = self.text().split('\n').count();
        let target = line as i64 + i64::from(delta);

        if target < 0 {
            self.focus_prev();
            return;
        }
        if target as usize >= line_count {
            self.focus_next();
            return;
        }

        let desired = *self.preferred_column.get_or_insert(column);
        let target = target as usize;
        let start = line_start(self.text(), target);
        self.cursor = start + desired.min(line_len(self.text(), target));
    }

    /// Append a project and move focus to its title.
    pub fn add_project(&mut self) -> usize {
        let index = self.session.add_project();
        self.focus(FocusTarget::Project {
            index,
            field: ProjectField::Title,
        });
        index
    }

    /// Remove the project that has focus. Focus moves to the same position
    /// in the following project, or the previous one when the last project
    /// was removed.
    pub fn remove_focused_project(&mut self) -> Option<usize> {
        let FocusTarget::Project { index, field } = self.focused() else {
            return None;
        };
        self.session.remove_project(index)?;

        let remaining = self.session.fields().projects.len();
        if remaining == 0 {
            self.focus(FocusTarget::Field(*FieldId::ALL.last()?));
        } else {
            self.focus(FocusTarget::Project {
                index: index.min(remaining - 1),
                field,
            });
        }
        Some(index)
    }

    pub fn render_form(&mut self, width: usize, theme: &Theme) -> FormRender {
        let width = width.max(VALUE_INDENT.len() + 1);
        let focused = self.focused();
        let fields = self.session.fields();
        let mut builder = FormBuilder::new(width, theme);

        let mut section = "";
        for id in FieldId::ALL {
            if id.section() != section {
                section = id.section();
                builder.heading(section);
            }
            let target = FocusTarget::Field(id);
            let cursor = (target == focused).then_some(self.cursor);
            builder.field(id.label(), fields.field(id), target == focused, cursor);
        }

        builder.heading("Projects");
        if fields.projects.is_empty() {
            builder.hint("No projects. Press Ctrl+N to add one.");
        }
        for (index, project) in fields.projects.iter().enumerate() {
            builder.subheading(&ProjectForms::label(index));
            for field in ProjectField::ALL {
                let target = FocusTarget::Project { index, field };
                let cursor = (target == focused).then_some(self.cursor);
                builder.field(field.label(), project.field(field), target == focused, cursor);
            }
        }

        let render = builder.finish();
        self.last_cursor_visual = render.cursor;
        render
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        let target = self.focused();
        let fields = self.session.fields_mut();
        match target {
            FocusTarget::Field(id) => Some(fields.field_mut(id)),
            FocusTarget::Project { index, field } => fields
                .projects
                .get_mut(index)
                .map(|project| project.field_mut(field)),
        }
    }

    fn cursor_to_end(&mut self) {
        self.cursor = self.text().chars().count();
        self.preferred_column = None;
    }

    fn clamp_focus(&mut self) {
        let count = self.focus_targets().len();
        if self.focus >= count {
            self.focus = count.saturating_sub(1);
        }
        self.cursor_to_end();
    }

    /// (line, column) of the cursor within the focused text, in chars.
    fn logical_position(&self) -> (usize, usize) {
        let mut line = 0;
        let mut column = 0;
        for ch in self.text().chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (line, column)
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Char offset of the first char on `line`.
fn line_start(text: &str, line: usize) -> usize {
    text.split('\n')
        .take(line)
        .map(|segment| segment.chars().count() + 1)
        .sum()
}

fn line_len(text: &str, line: usize) -> usize {
    text.split('\n')
        .nth(line)
        .map(|segment| segment.chars().count())
        .unwrap_or(0)
}

struct FormBuilder<'a> {
    lines: Vec<Line<'static>>,
    cursor: Option<CursorVisual>,
    width: usize,
    theme: &'a Theme,
}

impl<'a> FormBuilder<'a> {
    fn new(width: usize, theme: &'a Theme) -> Self {
        Self {
            lines: Vec::new(),
            cursor: None,
            width,
            theme,
        }
    }

    fn heading(&mut self, title: &str) {
        if !self.lines.is_empty() {
            self.lines.push(Line::from(""));
        }
        self.lines.push(Line::from(Span::styled(
            title.to_string(),
            self.theme.heading_style(),
        )));
    }

    fn subheading(&mut self, title: &str) {
        self.lines.push(Line::from(Span::styled(
            format!("{title}:"),
            self.theme.label_style().add_modifier(Modifier::BOLD),
        )));
    }

    fn hint(&mut self, text: &str) {
        self.lines.push(Line::from(Span::styled(
            format!("{VALUE_INDENT}{text}"),
            self.theme.muted_style(),
        )));
    }

    /// Label line followed by the value hard-wrapped under it.
    fn field(&mut self, label: &str, value: &str, focused: bool, cursor: Option<usize>) {
        let style = if focused {
            self.theme.focus_style()
        } else {
            self.theme.label_style()
        };
        self.lines
            .push(Line::from(Span::styled(label.to_string(), style)));

        if value.is_empty() && cursor.is_none() {
            self.hint("(empty)");
            return;
        }

        let limit = self.width - VALUE_INDENT.len();
        let mut current = String::new();
        let mut current_width = 0usize;
        let mut char_index = 0usize;

        for ch in value.chars() {
            if cursor == Some(char_index) {
                self.mark_cursor(current_width);
            }
            if ch == '\n' {
                self.push_value(std::mem::take(&mut current));
                current_width = 0;
            } else {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > limit && !current.is_empty() {
                    self.push_value(std::mem::take(&mut current));
                    current_width = 0;
                    if cursor == Some(char_index) {
                        self.mark_cursor(0);
                    }
                }
                current.push(ch);
                current_width += ch_width;
            }
            char_index += 1;
        }
        if cursor == Some(char_index) {
            self.mark_cursor(current_width);
        }
        self.push_value(current);
    }

    fn mark_cursor(&mut self, column: usize) {
        self.cursor = Some(CursorVisual {
            line: self.lines.len(),
            column: (VALUE_INDENT.len() + column).min(u16::MAX as usize) as u16,
        });
    }

    fn push_value(&mut self, text: String) {
        self.lines.push(Line::from(format!("{VALUE_INDENT}{text}")));
    }

    fn finish(self) -> FormRender {
        let total_lines = self.lines.len();
        FormRender {
            lines: self.lines,
            total_lines,
            cursor: self.cursor,
        }
    }
}
