//! Debounced crossing-request input.
//!
//! ## Hardware
//!
//! Momentary push-button.  The poll loop samples the raw level once per
//! cycle and feeds it to [`DebouncedInput::sample`], which detects rising
//! edges and accepts at most one edge per debounce window.  An accepted
//! edge raises the sticky `pending` flag; only [`DebouncedInput::acknowledge`]
//! (or [`DebouncedInput::reset`]) clears it.
//!
//! ## Interrupt delivery
//!
//! Platforms that deliver the button as a GPIO interrupt use an
//! [`EdgeLatch`].  The ISR calls [`EdgeLatch::record_edge`], which runs the
//! debounce rule and bumps an accepted-edge counter using atomics only.
//! The poll thread folds new accepted edges into `pending` through
//! [`DebouncedInput::absorb_latched`], so `pending` is never written from
//! interrupt context.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::{DEBOUNCE_MS, Millis};

/// Poll-driven debounced input with a sticky pending flag.
#[derive(Debug, Clone)]
pub struct DebouncedInput {
    window_ms: Millis,
    /// Raw level seen on the previous `sample` call.
    last_level: bool,
    /// Time of the last accepted edge.  `None` until the first one.
    last_event_ms: Option<Millis>,
    pending: bool,
    /// Accepted-edge count last absorbed from an [`EdgeLatch`].
    latched_seen: u32,
}

impl DebouncedInput {
    pub fn new(window_ms: Millis) -> Self {
        Self {
            window_ms,
            last_level: false,
            last_event_ms: None,
            pending: false,
            latched_seen: 0,
        }
    }

    /// Feed one raw sample.  Call once per poll with a monotonic `now_ms`.
    /// Returns `true` if this sample produced an accepted edge.
    pub fn sample(&mut self, now_ms: Millis, raw_level: bool) -> bool {
        let rising = raw_level && !self.last_level;
        self.last_level = raw_level;
        rising && self.accept_edge(now_ms)
    }

    /// Register an edge that did not come from a sampled level (software
    /// request).  Subject to the same debounce window.
    pub fn register_edge(&mut self, now_ms: Millis) -> bool {
        self.accept_edge(now_ms)
    }

    /// Fold edges accepted by an ISR-side latch into `pending`.
    pub fn absorb_latched(&mut self, latch: &EdgeLatch) -> bool {
        let count = latch.accepted_count();
        if count == self.latched_seen {
            return false;
        }
        self.latched_seen = count;
        self.pending = true;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clear `pending` unconditionally.
    pub fn acknowledge(&mut self) {
        self.pending = false;
    }

    /// Clear `pending` and forget the edge history.
    pub fn reset(&mut self) {
        self.pending = false;
        self.last_event_ms = None;
    }

    fn accept_edge(&mut self, now_ms: Millis) -> bool {
        if let Some(last) = self.last_event_ms {
            if now_ms.saturating_sub(last) < self.window_ms {
                return false;
            }
        }
        self.last_event_ms = Some(now_ms);
        self.pending = true;
        true
    }
}

impl Default for DebouncedInput {
    fn default() -> Self {
        Self::new(DEBOUNCE_MS)
    }
}

/// ISR-safe accepted-edge bookkeeping.
///
/// Single writer (the ISR), single reader (the poll thread).  Timestamps
/// are truncated to `u32` milliseconds and compared with wrapping
/// arithmetic.
pub struct EdgeLatch {
    last_accepted_ms: AtomicU32,
    /// Number of accepted edges.  0 means none yet.
    accepted: AtomicU32,
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self {
            last_accepted_ms: AtomicU32::new(0),
            accepted: AtomicU32::new(0),
        }
    }

    /// ISR handler body: register a rising edge at `now_ms`.
    /// Returns `true` if the edge was accepted.
    pub fn record_edge(&self, now_ms: u32) -> bool {
        let count = self.accepted.load(Ordering::Acquire);
        if count != 0 {
            let last = self.last_accepted_ms.load(Ordering::Relaxed);
            if Millis::from(now_ms.wrapping_sub(last)) < DEBOUNCE_MS {
                return false;
            }
        }
        self.last_accepted_ms.store(now_ms, Ordering::Relaxed);
        self.accepted
            .store(count.wrapping_add(1).max(1), Ordering::Release);
        true
    }

    pub fn accepted_count(&self) -> u32 {
        self.accepted.load(Ordering::Acquire)
    }
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::new()
    }
}
