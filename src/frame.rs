//! Animation-frame bookkeeping.
//!
//! Each animation loop runs in its own [`Lane`]. A lane has at most one
//! outstanding [`FrameToken`]; scheduling a new frame first invalidates the
//! previous token, and a callback arriving with an invalidated token is
//! ignored. This keeps two instances of the same loop from ever interleaving.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

/// Which animation loop a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    /// Momentum continuation after input stops.
    Momentum,
    /// Eased `scroll_to` animation.
    Tween,
}

/// Identifies one scheduled frame of one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken {
    pub lane: Lane,
    seq: u64,
}

/// Single-outstanding-frame slot for one lane.
#[derive(Debug, Clone)]
pub struct FrameSlot {
    lane: Lane,
    next_seq: u64,
    pending: Option<FrameToken>,
}

impl FrameSlot {
    #[must_use]
    pub fn new(lane: Lane) -> Self {
        Self { lane, next_seq: 0, pending: None }
    }

    /// Issue a fresh token. Any previous token must already be invalidated.
    pub fn schedule(&mut self) -> FrameToken {
        self.next_seq += 1;
        let token = FrameToken { lane: self.lane, seq: self.next_seq };
        self.pending = Some(token);
        token
    }

    /// Drop the outstanding token, returning it so the host can cancel it.
    pub fn invalidate(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }

    /// Consume `token` if it is the outstanding one.
    ///
    /// Returns `false` for stale or foreign tokens.
    pub fn fire(&mut self, token: FrameToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
