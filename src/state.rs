use std::num::NonZeroU64;

use once_cell::sync::Lazy;

use crate::{config::Config, config::CONFIG, viewport::BudgetPolicy};

pub static STATE: Lazy<State> = Lazy::new(|| State::from(&*CONFIG));

#[derive(Debug, Clone)]
pub struct State {
    pub budgets: BudgetPolicy,
    pub default_page_size: NonZeroU64,
}

impl From<&Config> for State {
    fn from(config: &Config) -> Self {
        Self {
            budgets: config.budget_policy(),
            default_page_size: config.pager.default_page_size,
        }
    }
}
