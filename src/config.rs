use std::{fmt::Debug, num::NonZeroU64, str::FromStr};

use dotenvy::var;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use structstruck::strike;

use crate::{
    types::pagination::WindowBudget,
    viewport::{
        BudgetPolicy, DEFAULT_BREAKPOINT, DEFAULT_NARROW_BUDGET, DEFAULT_SIDEBAR_BREAKPOINT,
        DEFAULT_WIDE_BUDGET,
    },
};

pub static CONFIG: Lazy<Config> = Lazy::new(Config::new);

const DEFAULT_PAGE_SIZE: NonZeroU64 = match NonZeroU64::new(15) {
    Some(size) => size,
    None => panic!("default page size must be positive"),
};

strike! {
    #[strikethrough[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]]
    pub struct Config {
        pub pager:
            pub struct {
                pub breakpoint: u32,
                pub wide_budget: usize,
                pub narrow_budget: usize,
                pub default_page_size: NonZeroU64,
            }
        ,
        pub sidebar_breakpoint: u32,
        pub port: u16,
        pub is_dev: bool,
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pager: Pager {
                breakpoint: DEFAULT_BREAKPOINT,
                wide_budget: DEFAULT_WIDE_BUDGET.get(),
                narrow_budget: DEFAULT_NARROW_BUDGET.get(),
                default_page_size: DEFAULT_PAGE_SIZE,
            },
            sidebar_breakpoint: DEFAULT_SIDEBAR_BREAKPOINT,
            port: 8080,
            is_dev: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let defaults = Self::default();
        Config {
            pager: Pager {
                breakpoint: parsed("PAGER_BREAKPOINT", defaults.pager.breakpoint),
                wide_budget: parsed("PAGER_WIDE_BUDGET", defaults.pager.wide_budget),
                narrow_budget: parsed("PAGER_NARROW_BUDGET", defaults.pager.narrow_budget),
                default_page_size: parsed(
                    "PAGER_DEFAULT_PAGE_SIZE",
                    defaults.pager.default_page_size,
                ),
            },
            sidebar_breakpoint: parsed("SIDEBAR_BREAKPOINT", defaults.sidebar_breakpoint),
            port: parsed("PORT", defaults.port),
            is_dev: var("MODE").map(|m| m == "dev").unwrap_or_default(),
        }
    }

    pub fn budget_policy(&self) -> BudgetPolicy {
        self.into()
    }
}

impl From<&Config> for BudgetPolicy {
    fn from(val: &Config) -> Self {
        BudgetPolicy {
            breakpoint: val.pager.breakpoint,
            wide: WindowBudget::new(val.pager.wide_budget),
            narrow: WindowBudget::new(val.pager.narrow_budget),
        }
    }
}

fn parsed<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    parse_setting(key, var(key).ok(), default)
}

fn parse_setting<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    match raw {
        Some(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{} must be a valid number: {:?}", key, e)),
        None => default,
    }
}
