use crate::types::pagination::{ButtonKind, PageButton};

/// First/previous, one button per page in `window`, then next/last.
pub fn build_buttons(current_page: u64, total_pages: u64, window: &[u64]) -> Vec<PageButton> {
    let last_page = total_pages.max(1);
    let at_start = current_page <= 1;
    let at_end = current_page >= last_page;

    let nav = |kind, page_number, is_disabled| PageButton {
        kind,
        page_number,
        is_current: false,
        is_disabled,
    };

    let mut buttons = Vec::with_capacity(window.len() + 4);
    buttons.push(nav(ButtonKind::First, 1, at_start));
    buttons.push(nav(
        ButtonKind::Prev,
        current_page.saturating_sub(1).max(1),
        at_start,
    ));
    buttons.extend(window.iter().map(|&page_number| PageButton {
        kind: ButtonKind::Page,
        page_number,
        is_current: page_number == current_page,
        is_disabled: false,
    }));
    buttons.push(nav(
        ButtonKind::Next,
        current_page.saturating_add(1).min(last_page),
        at_end,
    ));
    buttons.push(nav(ButtonKind::Last, last_page, at_end));
    buttons
}
