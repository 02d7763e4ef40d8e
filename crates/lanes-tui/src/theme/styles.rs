use super::colors::*;
use ratatui::style::{Modifier, Style};

pub fn focused_border() -> Style {
    Style::default().fg(FOCUSED_BORDER)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(UNFOCUSED_BORDER)
}

pub fn drop_target_border() -> Style {
    Style::default()
        .fg(DROP_TARGET_BORDER)
        .add_modifier(Modifier::BOLD)
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn highlight_text() -> Style {
    Style::default().fg(HIGHLIGHT_TEXT)
}

pub fn dragged_text() -> Style {
    Style::default()
        .fg(DRAGGED_TEXT)
        .add_modifier(Modifier::DIM)
}

pub fn drop_indicator() -> Style {
    Style::default().fg(INDICATOR).add_modifier(Modifier::BOLD)
}

pub fn ghost() -> Style {
    Style::default()
        .bg(GHOST_BG)
        .fg(NORMAL_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_COLOR)
}

pub fn popup_bg() -> Style {
    Style::default().bg(POPUP_BG)
}
