use crate::error::GameError;
use crate::game::session::GameSession;
use crate::game::types::{Collision, SessionSnapshot};

/// Whatever draws a frame. A failed present is reported, never fatal to the session.
pub trait FrameSink {
    fn present(&mut self, snapshot: &SessionSnapshot) -> Result<(), GameError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub collision: Collision,
    /// Set when the frame could not be shown; the client should offer a reload.
    pub reload_prompt: bool,
}

/// Exactly one update and one present.
pub fn run_frame<S: FrameSink + ?Sized>(
    session: &mut GameSession,
    sink: &mut S,
    now: i64,
) -> FrameReport {
    let collision = session.tick(now);
    let snapshot = session.snapshot(now);
    let reload_prompt = match sink.present(&snapshot) {
        Ok(()) => false,
        Err(error) => {
            tracing::error!(%error, "frame present failed");
            true
        }
    };
    FrameReport {
        collision,
        reload_prompt,
    }
}
