use serde::{Deserialize, Serialize};

/// Position inside a paginated listing, as held by the owning view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub total_items: u64,
    pub items_per_page: u64,
    pub current_page: u64,
}

impl PageRequest {
    pub fn new(total_items: u64, items_per_page: u64, current_page: u64) -> Self {
        Self {
            total_items,
            items_per_page,
            current_page,
        }
    }
}

/// Maximum number of numbered page buttons shown at once. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct WindowBudget(usize);

impl WindowBudget {
    pub const fn new(budget: usize) -> Self {
        Self(if budget == 0 { 1 } else { budget })
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for WindowBudget {
    fn from(budget: usize) -> Self {
        Self::new(budget)
    }
}

impl From<WindowBudget> for usize {
    fn from(budget: WindowBudget) -> Self {
        budget.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    First,
    Prev,
    Page,
    Next,
    Last,
}

/// A rendering-ready navigation button. `page_number` is the page the
/// button navigates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageButton {
    pub kind: ButtonKind,
    pub page_number: u64,
    pub is_current: bool,
    pub is_disabled: bool,
}

impl PageButton {
    pub fn aria_label(&self) -> String {
        match self.kind {
            ButtonKind::First => "First page".to_string(),
            ButtonKind::Prev => "Previous page".to_string(),
            ButtonKind::Page => format!("Page {}", self.page_number),
            ButtonKind::Next => "Next page".to_string(),
            ButtonKind::Last => "Last page".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationView {
    pub total_pages: u64,
    pub current_page: u64,
    pub window: Vec<u64>,
    pub buttons: Vec<PageButton>,
}

/// Query accepted by the pagination endpoint. Every field is optional so
/// that hosting views can send whatever state they currently hold.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PaginationQuery {
    pub total_items: Option<i64>,
    pub items_per_page: Option<i64>,
    pub current_page: Option<i64>,
    pub budget: Option<usize>,
    pub viewport_width: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GotoQuery {
    pub total_items: Option<i64>,
    pub items_per_page: Option<i64>,
    pub current_page: Option<i64>,
    pub requested_page: i64,
}
