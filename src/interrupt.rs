use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{HarnessError, Result};

/// Set once the user hits Ctrl-C. Children share the terminal's process
/// group, so they get the signal themselves; the harness only has to notice
/// once the blocking call returns.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn install() -> Result<Self> {
        let interrupt = Self::default();
        let flag = Arc::clone(&interrupt.0);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;
        Ok(interrupt)
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_set() {
            Err(HarnessError::Interrupted)
        } else {
            Ok(())
        }
    }
}
