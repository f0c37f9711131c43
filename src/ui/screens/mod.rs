pub(crate) mod analytics;
pub(crate) mod budgets;
pub(crate) mod dashboard;
pub(crate) mod transactions;

use ratatui::{
    text::Span,
    widgets::{Block, Borders},
};

use crate::ui::theme;

/// Bordered panel with a dim bold title, shared by every screen.
pub(crate) fn panel(title: impl std::fmt::Display) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}
