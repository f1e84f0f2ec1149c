//! Polling loops behind `wait` and `wait_vanish`.
//!
//! Both loops attempt first and check the deadline afterwards, so a zero
//! timeout still performs exactly one uncached search and never sleeps.
//! Elapsed time comes from the desktop clock, so slow captures count against
//! the timeout.

use crate::region::Match;
use crate::search::ImageMatch;
use crate::template::Target;
use crate::trace::{trace_event, trace_span};
use crate::util::{VisautoError, VisautoResult};
use std::time::Duration;

pub(super) fn wait<S: ImageMatch + ?Sized>(
    region: &mut S,
    target: Target<'_>,
    timeout: Duration,
    similarity: f32,
) -> VisautoResult<Match> {
    let desktop = region.desktop().clone();
    let clock = desktop.clock();
    let _span = trace_span!("wait", timeout_ms = timeout.as_millis() as u64).entered();

    let start = clock.now();
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        match region.find(target, similarity, false) {
            Ok(found) => {
                trace_event!("wait_found", attempts = attempts);
                return Ok(found);
            }
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }

        let waited = clock.now().saturating_sub(start);
        if waited >= timeout {
            trace_event!("wait_timeout", attempts = attempts);
            return Err(VisautoError::TimeoutNotFound {
                target: target.name(),
                waited,
            });
        }
        clock.sleep(desktop.settings().scan_rate);
    }
}

pub(super) fn wait_vanish<S: ImageMatch + ?Sized>(
    region: &mut S,
    target: Target<'_>,
    timeout: Duration,
    similarity: f32,
) -> VisautoResult<bool> {
    let desktop = region.desktop().clone();
    let clock = desktop.clock();
    let _span = trace_span!("wait_vanish", timeout_ms = timeout.as_millis() as u64).entered();

    let start = clock.now();
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        if !region.exists(target, similarity, false)? {
            trace_event!("vanished", attempts = attempts);
            return Ok(true);
        }

        let waited = clock.now().saturating_sub(start);
        if waited >= timeout {
            trace_event!("vanish_timeout", attempts = attempts);
            return Err(VisautoError::TimeoutStillPresent {
                target: target.name(),
                waited,
            });
        }
        clock.sleep(desktop.settings().scan_rate);
    }
}
