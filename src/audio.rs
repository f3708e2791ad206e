//! Sound cue sink
//!
//! The sim records named cues in the session state; a sink turns them into
//! playback. Playback is fire-and-forget - a sink that cannot play must not
//! affect game state, so the trait has no way to report failure.

use crate::sim::{GameState, SoundCue};

/// Anything that can play a named cue
pub trait CueSink {
    fn play(&mut self, cue: SoundCue);
}

/// The headless default: logs cues instead of playing them
#[derive(Debug, Default)]
pub struct LogSink;

impl CueSink for LogSink {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("cue: {:?}", cue);
    }
}

/// Drain the session's pending cues into a sink
pub fn drain_into(state: &mut GameState, sink: &mut dyn CueSink) {
    for cue in state.drain_cues() {
        sink.play(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<SoundCue>);

    impl CueSink for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.0.push(cue);
        }
    }

    #[test]
    fn test_cues_drain_in_order_and_once() {
        let mut state = GameState::new(1, 0);
        state.cues.push(SoundCue::PowerUp);

        let mut recorder = Recorder::default();
        drain_into(&mut state, &mut recorder);

        // New sessions announce themselves before anything else
        assert_eq!(recorder.0, vec![SoundCue::Start, SoundCue::PowerUp]);

        drain_into(&mut state, &mut recorder);
        assert_eq!(recorder.0.len(), 2);
    }
}
