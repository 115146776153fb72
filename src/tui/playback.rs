//! # Simulated Playback
//!
//! A terminal cannot play video, so `PlaybackClock` stands in for the media
//! element. It advances the position with wall-clock time multiplied by the
//! playback rate and queues the notifications a real element would emit.
//! The event loop drains them into `Action::MediaEvent`.

use std::time::Instant;

use log::debug;

use crate::core::modules::{MediaBackend, MediaNotification};

#[derive(Debug)]
pub struct PlaybackClock {
    duration: f64,
    position: f64,
    rate: f64,
    playing: bool,
    loaded: bool,
    last_tick: Option<Instant>,
    pending: Vec<MediaNotification>,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self {
            duration: 0.0,
            position: 0.0,
            rate: 1.0,
            playing: false,
            loaded: false,
            last_tick: None,
            pending: Vec::new(),
        }
    }
}

impl PlaybackClock {
    /// Resets to a new track of `duration_secs`. The duration is reported
    /// on the next drain.
    pub fn load(&mut self, duration_secs: f64) {
        *self = Self {
            duration: duration_secs.max(1.0),
            loaded: true,
            ..Self::default()
        };
        self.pending.push(MediaNotification::BufferingStarted);
        self.pending.push(MediaNotification::DurationKnown(self.duration));
        self.pending.push(MediaNotification::PositionChanged(0.0));
        debug!("Playback loaded: {:.0}s", self.duration);
    }

    pub fn unload(&mut self) {
        *self = Self::default();
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advances by wall-clock time since the previous tick.
    pub fn tick(&mut self, now: Instant) -> Vec<MediaNotification> {
        let elapsed = self
            .last_tick
            .map(|t| now.saturating_duration_since(t).as_secs_f64())
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        self.advance_by(elapsed)
    }

    /// Advances by `secs` of wall-clock time and drains queued notifications.
    pub fn advance_by(&mut self, secs: f64) -> Vec<MediaNotification> {
        if self.loaded && self.playing && secs > 0.0 {
            self.position = (self.position + secs * self.rate).min(self.duration);
            self.pending
                .push(MediaNotification::PositionChanged(self.position));
            if self.position >= self.duration {
                self.playing = false;
                self.pending.push(MediaNotification::Ended);
            }
        }
        std::mem::take(&mut self.pending)
    }
}

impl MediaBackend for PlaybackClock {
    fn play(&mut self) {
        if self.loaded {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, secs: f64) {
        if !self.loaded {
            return;
        }
        self.position = secs.clamp(0.0, self.duration);
        self.pending
            .push(MediaNotification::PositionChanged(self.position));
    }

    fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::modules::MediaCommand;

    #[test]
    fn test_load_reports_duration() {
        let mut clock = PlaybackClock::default();
        clock.load(90.0);
        let events = clock.advance_by(0.0);
        assert!(events.contains(&MediaNotification::DurationKnown(90.0)));
        assert!(clock.advance_by(0.0).is_empty());
    }

    #[test]
    fn test_paused_clock_does_not_move() {
        let mut clock = PlaybackClock::default();
        clock.load(10.0);
        clock.advance_by(0.0);
        assert!(clock.advance_by(5.0).is_empty());
    }

    #[test]
    fn test_rate_scales_progress_and_end_fires_once() {
        let mut clock = PlaybackClock::default();
        clock.load(10.0);
        clock.advance_by(0.0);
        MediaCommand::Play.apply_to(&mut clock);
        MediaCommand::SetRate(2.0).apply_to(&mut clock);

        assert_eq!(
            clock.advance_by(2.0),
            vec![MediaNotification::PositionChanged(4.0)]
        );
        assert_eq!(
            clock.advance_by(10.0),
            vec![
                MediaNotification::PositionChanged(10.0),
                MediaNotification::Ended
            ]
        );
        assert!(!clock.is_playing());
        assert!(clock.advance_by(1.0).is_empty());
    }

    #[test]
    fn test_seek_is_clamped_and_reported() {
        let mut clock = PlaybackClock::default();
        clock.load(30.0);
        clock.advance_by(0.0);
        clock.seek(-3.0);
        assert_eq!(
            clock.advance_by(0.0),
            vec![MediaNotification::PositionChanged(0.0)]
        );
    }

    #[test]
    fn test_unloaded_clock_ignores_commands() {
        let mut clock = PlaybackClock::default();
        clock.play();
        clock.seek(5.0);
        assert!(!clock.is_playing());
        assert!(clock.advance_by(3.0).is_empty());
    }
}
