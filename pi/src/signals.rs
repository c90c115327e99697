//! SIGINT and SIGTERM handling.
//!
//! The first signal raises the shutdown flag and the loop stops at the next
//! tick boundary. A second one while the flag is up exits at once with status
//! 1, for a loop stuck in a blocking I2C or `statvfs` call.

use std::io;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;

/// Register the handlers for SIGINT and SIGTERM on `shutdown`.
pub fn install(shutdown: &Arc<AtomicBool>) -> io::Result<()> {
    for signal in [SIGINT, SIGTERM] {
        // Must come first so the exit only fires when the flag was already set
        flag::register_conditional_shutdown(signal, 1, Arc::clone(shutdown))?;
        flag::register(signal, Arc::clone(shutdown))?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use signal_hook::low_level::raise;

    use super::*;

    #[test]
    fn test_first_signal_only_raises_flag() {
        let shutdown = Arc::new(AtomicBool::new(false));
        install(&shutdown).unwrap();
        assert!(!shutdown.load(Ordering::Relaxed));

        // The process survives: the flag was down when the signal arrived
        raise(SIGTERM).unwrap();
        assert!(shutdown.load(Ordering::Relaxed));
    }
}
