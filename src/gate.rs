//! Concurrency Gate
//!
//! Wraps each user mutation in a blocking window. The surface is marked
//! blocked on entry; if the mutation is still pending after the lower limit
//! the visible indicator goes up, and once shown it stays until the upper
//! limit (measured from block start) has passed. Requests are never aborted.

use std::cell::Cell;
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, Either, LocalBoxFuture};

use crate::config::BoardConfig;
use crate::surface::{BlockIndicator, BlockState};

/// Time source for the gate's delays
pub trait Clock {
    /// Monotonic time since an arbitrary origin
    fn now(&self) -> Duration;
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// An open blocking window; hand it back to [`ConcurrencyGate::unblock`].
#[derive(Debug)]
#[must_use = "a blocking window must be closed with ConcurrencyGate::unblock"]
pub struct BlockWindow {
    started: Duration,
    indicated: bool,
}

impl BlockWindow {
    pub fn indicated(&self) -> bool {
        self.indicated
    }
}

pub struct ConcurrencyGate {
    clock: Rc<dyn Clock>,
    lower_limit: Duration,
    upper_limit: Duration,
    active: Cell<bool>,
}

impl ConcurrencyGate {
    pub fn new(clock: Rc<dyn Clock>, lower_limit: Duration, upper_limit: Duration) -> Self {
        Self {
            clock,
            lower_limit,
            upper_limit,
            active: Cell::new(false),
        }
    }

    pub fn from_config(clock: Rc<dyn Clock>, config: &BoardConfig) -> Self {
        Self::new(clock, config.lower_limit(), config.upper_limit())
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Opens the blocking window.
    ///
    /// # Panics
    /// If a window is already open: mutations must be issued one at a time.
    pub fn block(&self, indicator: &mut dyn BlockIndicator) -> BlockWindow {
        if self.active.replace(true) {
            log::error!("[GATE] Blocking window opened while another is active");
            panic!("concurrency gate entered twice");
        }
        indicator.set_block_state(BlockState::Blocked);
        BlockWindow {
            started: self.clock.now(),
            indicated: false,
        }
    }

    /// Drives `op` to completion, raising the indicator if it outlives the
    /// lower limit.
    pub async fn wait<F: Future>(
        &self,
        window: &mut BlockWindow,
        indicator: &mut dyn BlockIndicator,
        op: F,
    ) -> F::Output {
        let op = pin!(op);
        let delay = self.clock.sleep(self.lower_limit);
        match future::select(op, delay).await {
            Either::Left((output, _)) => output,
            Either::Right(((), op)) => {
                log::debug!("[GATE] Mutation pending past {:?}, showing indicator", self.lower_limit);
                window.indicated = true;
                indicator.set_block_state(BlockState::Indicated);
                op.await
            }
        }
    }

    /// Closes the window. A shown indicator is held until the upper limit.
    pub async fn unblock(&self, window: BlockWindow, indicator: &mut dyn BlockIndicator) {
        if window.indicated {
            let elapsed = self.clock.now().saturating_sub(window.started);
            if elapsed < self.upper_limit {
                self.clock.sleep(self.upper_limit - elapsed).await;
            }
        }
        indicator.set_block_state(BlockState::Unblocked);
        self.active.set(false);
    }
}
