//! Viewport width tracking and the layout decisions derived from it.
//!
//! The pagination engine never looks at the display. A view owns a
//! [`PaginationControl`] that holds a subscription to a [`ViewportObserver`]
//! and turns the latest width into a [`WindowBudget`].

use std::sync::Arc;

use log::debug;
use tokio::sync::watch;

use crate::{
    error::PaginationError,
    pagination::Paginator,
    types::pagination::{PageButton, PageRequest, PaginationView, WindowBudget},
};

pub const DEFAULT_BREAKPOINT: u32 = 1024;
pub const DEFAULT_WIDE_BUDGET: WindowBudget = WindowBudget::new(10);
pub const DEFAULT_NARROW_BUDGET: WindowBudget = WindowBudget::new(5);
pub const DEFAULT_SIDEBAR_BREAKPOINT: u32 = 768;

/// Picks the number of page buttons for a viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetPolicy {
    pub breakpoint: u32,
    pub wide: WindowBudget,
    pub narrow: WindowBudget,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_BREAKPOINT,
            wide: DEFAULT_WIDE_BUDGET,
            narrow: DEFAULT_NARROW_BUDGET,
        }
    }
}

impl BudgetPolicy {
    pub fn budget_for(&self, width: u32) -> WindowBudget {
        if width >= self.breakpoint {
            self.wide
        } else {
            self.narrow
        }
    }
}

/// Dashboard sidebar: open on wide screens, collapsed on narrow ones, and
/// toggled by hand between resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sidebar {
    breakpoint: u32,
    open: bool,
}

impl Sidebar {
    pub fn new(breakpoint: u32, width: u32) -> Self {
        Self {
            breakpoint,
            open: width >= breakpoint,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// A resize discards any manual toggle.
    pub fn on_resize(&mut self, width: u32) {
        self.open = width >= self.breakpoint;
    }
}

/// Source of viewport widths.
pub trait ViewportObserver {
    type Subscription: ViewportSubscription;

    fn current_width(&self) -> u32;

    /// Register a listener. Dropping the subscription deregisters it.
    fn subscribe(&self) -> Self::Subscription;
}

pub trait ViewportSubscription {
    /// The latest width if it changed since the previous poll.
    fn poll_width(&mut self) -> Option<u32>;
}

/// Observer fed by resize events pushed through [`WatchViewport::resize`].
#[derive(Debug, Clone)]
pub struct WatchViewport {
    tx: Arc<watch::Sender<u32>>,
}

impl WatchViewport {
    pub fn new(width: u32) -> Self {
        let (tx, _) = watch::channel(width);
        Self { tx: Arc::new(tx) }
    }

    /// Publish a new width. Re-publishing the same width wakes nobody.
    pub fn resize(&self, width: u32) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == width {
                return false;
            }
            *current = width;
            true
        })
    }

    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl ViewportObserver for WatchViewport {
    type Subscription = WatchSubscription;

    fn current_width(&self) -> u32 {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> WatchSubscription {
        WatchSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

#[derive(Debug)]
pub struct WatchSubscription {
    rx: watch::Receiver<u32>,
}

impl WatchSubscription {
    /// Wait for the next width. `None` once the observer is gone.
    pub async fn changed(&mut self) -> Option<u32> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

impl ViewportSubscription for WatchSubscription {
    fn poll_width(&mut self) -> Option<u32> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }
}

/// Pagination state of one mounted view, adapting its window to the
/// viewport.
#[derive(Debug)]
pub struct PaginationControl<S, F> {
    paginator: Paginator<F>,
    policy: BudgetPolicy,
    width: u32,
    subscription: S,
}

impl<S, F> PaginationControl<S, F>
where
    S: ViewportSubscription,
    F: FnMut(u64),
{
    pub fn mount<O>(
        observer: &O,
        policy: BudgetPolicy,
        request: PageRequest,
        on_page_change: F,
    ) -> Result<Self, PaginationError>
    where
        O: ViewportObserver<Subscription = S>,
    {
        let subscription = observer.subscribe();
        Ok(Self {
            paginator: Paginator::new(request, on_page_change)?,
            policy,
            width: observer.current_width(),
            subscription,
        })
    }

    pub fn budget(&self) -> WindowBudget {
        self.policy.budget_for(self.width)
    }

    pub fn current_page(&self) -> u64 {
        self.paginator.current_page()
    }

    /// Pick up a pending resize. Returns whether the budget changed; the
    /// current page is never touched.
    pub fn poll_resize(&mut self) -> bool {
        let Some(width) = self.subscription.poll_width() else {
            return false;
        };
        let before = self.budget();
        self.width = width;
        let after = self.budget();
        if before != after {
            debug!(
                "viewport {}px, page budget {} -> {}",
                width,
                before.get(),
                after.get()
            );
        }
        before != after
    }

    pub fn go_to_page(&mut self, requested: i64) -> bool {
        self.paginator.go_to_page(requested)
    }

    pub fn activate(&mut self, button: &PageButton) -> bool {
        self.paginator.activate(button)
    }

    pub fn set_total_items(&mut self, total_items: u64) -> bool {
        self.paginator.set_total_items(total_items)
    }

    /// Render with the latest viewport width, taking any pending resize
    /// into account first.
    pub fn view(&mut self) -> Option<PaginationView> {
        self.poll_resize();
        self.paginator.render(self.budget())
    }

    /// Tear down the view, releasing the viewport listener.
    pub fn unmount(self) -> PageRequest {
        self.paginator.request()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_follows_breakpoint() {
        let policy = BudgetPolicy::default();
        assert_eq!(policy.budget_for(1280), WindowBudget::new(10));
        assert_eq!(policy.budget_for(1024), WindowBudget::new(10));
        assert_eq!(policy.budget_for(1023), WindowBudget::new(5));
        assert_eq!(policy.budget_for(0), WindowBudget::new(5));
    }

    #[test]
    fn sidebar_collapses_on_narrow_screens() {
        let mut sidebar = Sidebar::new(DEFAULT_SIDEBAR_BREAKPOINT, 1200);
        assert!(sidebar.is_open());

        sidebar.on_resize(600);
        assert!(!sidebar.is_open());

        sidebar.toggle();
        sidebar.on_resize(700);
        assert!(!sidebar.is_open());

        sidebar.on_resize(800);
        assert!(sidebar.is_open());
        sidebar.toggle();
        assert!(!sidebar.is_open());
    }

    #[test]
    fn resize_recomputes_window_without_moving_page() {
        let viewport = WatchViewport::new(1280);
        let mut control = PaginationControl::mount(
            &viewport,
            BudgetPolicy::default(),
            PageRequest::new(500, 20, 13),
            |_| panic!("resizing must not change the page"),
        )
        .unwrap();
        assert_eq!(control.view().unwrap().window, (8..18u64).collect::<Vec<_>>());

        assert!(viewport.resize(800));
        assert!(control.poll_resize());
        assert_eq!(control.current_page(), 13);
        assert_eq!(control.view().unwrap().window, vec![11, 12, 13, 14, 15]);

        assert!(!viewport.resize(800));
        assert!(!control.poll_resize());

        assert!(viewport.resize(900));
        assert!(!control.poll_resize());
    }

    #[test]
    fn view_picks_up_resize_without_explicit_poll() {
        let viewport = WatchViewport::new(1440);
        let mut control = PaginationControl::mount(
            &viewport,
            BudgetPolicy::default(),
            PageRequest::new(500, 20, 25),
            |_| panic!("resizing must not change the page"),
        )
        .unwrap();
        assert_eq!(control.view().unwrap().window.len(), 10);

        viewport.resize(600);
        let view = control.view().unwrap();
        assert_eq!(view.window, vec![21, 22, 23, 24, 25]);
        assert_eq!(view.current_page, 25);
        assert_eq!(control.budget(), WindowBudget::new(5));
        assert!(!control.poll_resize());
    }

    #[test]
    fn dropping_the_control_deregisters() {
        let viewport = WatchViewport::new(500);
        let control = PaginationControl::mount(
            &viewport,
            BudgetPolicy::default(),
            PageRequest::new(50, 10, 2),
            |_| {},
        )
        .unwrap();
        assert_eq!(viewport.listener_count(), 1);

        let request = control.unmount();
        assert_eq!(request.current_page, 2);
        assert_eq!(viewport.listener_count(), 0);
    }

    #[tokio::test]
    async fn subscription_waits_for_resize() {
        let viewport = WatchViewport::new(1024);
        let mut subscription = viewport.subscribe();

        let resizer = viewport.clone();
        tokio::spawn(async move {
            resizer.resize(640);
        });

        assert_eq!(subscription.changed().await, Some(640));
        assert_eq!(subscription.poll_width(), None);

        drop(viewport);
        assert_eq!(subscription.changed().await, None);
    }
}
