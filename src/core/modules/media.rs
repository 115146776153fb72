//! # Video / Podcast Player
//!
//! The player never keeps time itself. Position, duration and buffering
//! come from the media backend as `MediaNotification`s; transitions that
//! need the backend (play, pause, seek, rate) are returned as
//! `ModuleSignal::Media(MediaCommand)` for the adapter to forward.
//!
//! ```text
//! backend ──notify()──► MediaPlayer ──handle()──► MediaCommand ──► backend
//!   PositionChanged        position                Play / Pause
//!   DurationKnown          duration                Seek(secs)
//!   Buffering*             buffering               SetRate(x)
//!   Ended ───────────────► Completed(Xp)
//! ```

use log::{debug, info};

use super::{ModuleKind, ModuleSignal, Reward, Runner};

/// XP for finishing a video or podcast.
pub const MEDIA_XP: u32 = 20;

/// Elapsed fraction after which manual completion is accepted.
pub const WATCHED_ENOUGH: f64 = 0.90;

/// Seconds skipped by one rewind press.
pub const REWIND_SECS: f64 = 5.0;

/// Playback speed in quarter steps, 1.0x through 2.0x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackRate(u8);

impl Default for PlaybackRate {
    fn default() -> Self {
        PlaybackRate(4)
    }
}

impl PlaybackRate {
    /// Steps up by 0.25x, wrapping from 2.0x back to 1.0x.
    pub fn next(self) -> PlaybackRate {
        if self.0 >= 8 {
            PlaybackRate(4)
        } else {
            PlaybackRate(self.0 + 1)
        }
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 4.0
    }

    pub fn label(self) -> String {
        format!("{}x", self.as_f64())
    }
}

/// Operations the player asks of the playback backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaCommand {
    Play,
    Pause,
    Seek(f64),
    SetRate(f64),
}

impl MediaCommand {
    pub fn apply_to(self, backend: &mut dyn MediaBackend) {
        match self {
            MediaCommand::Play => backend.play(),
            MediaCommand::Pause => backend.pause(),
            MediaCommand::Seek(secs) => backend.seek(secs),
            MediaCommand::SetRate(rate) => backend.set_rate(rate),
        }
    }
}

/// A video/audio element, real or simulated.
pub trait MediaBackend {
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, secs: f64);
    fn set_rate(&mut self, rate: f64);
}

/// Change notifications pushed by the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaNotification {
    PositionChanged(f64),
    DurationKnown(f64),
    BufferingStarted,
    BufferingEnded,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaInput {
    Toggle,
    SeekBack,
    CycleRate,
    /// Explicit "mark complete" once enough has been watched.
    Confirm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaPlayer {
    kind: ModuleKind,
    url: Option<String>,
    position: f64,
    duration: Option<f64>,
    playing: bool,
    buffering: bool,
    rate: PlaybackRate,
    finished: bool,
}

impl MediaPlayer {
    pub fn new(kind: ModuleKind, url: Option<String>) -> Self {
        Self {
            kind,
            url,
            position: 0.0,
            duration: None,
            playing: false,
            buffering: true,
            rate: PlaybackRate::default(),
            finished: false,
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_buffering(&self) -> bool {
        self.buffering
    }

    pub fn rate(&self) -> PlaybackRate {
        self.rate
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Position over duration in `[0, 1]`; zero until the duration is known.
    pub fn elapsed_fraction(&self) -> f64 {
        match self.duration {
            Some(d) if d > 0.0 => (self.position / d).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    pub fn watched_enough(&self) -> bool {
        self.elapsed_fraction() >= WATCHED_ENOUGH
    }

    /// Applies a backend notification.
    pub fn notify(&mut self, notification: MediaNotification) -> ModuleSignal {
        if self.finished {
            return ModuleSignal::Idle;
        }
        match notification {
            MediaNotification::PositionChanged(secs) => {
                if secs.is_finite() {
                    self.position = secs.max(0.0);
                }
                ModuleSignal::Idle
            }
            MediaNotification::DurationKnown(secs) => {
                if secs.is_finite() && secs > 0.0 {
                    self.duration = Some(secs);
                }
                self.buffering = false;
                ModuleSignal::Idle
            }
            MediaNotification::BufferingStarted => {
                self.buffering = true;
                ModuleSignal::Idle
            }
            MediaNotification::BufferingEnded => {
                self.buffering = false;
                ModuleSignal::Idle
            }
            MediaNotification::Ended => {
                info!("{:?} playback ended", self.kind);
                self.finish()
            }
        }
    }

    fn finish(&mut self) -> ModuleSignal {
        self.finished = true;
        self.playing = false;
        ModuleSignal::Completed(Reward::Xp(MEDIA_XP))
    }
}

impl Runner for MediaPlayer {
    type Input = MediaInput;

    fn kind(&self) -> ModuleKind {
        self.kind
    }

    fn handle(&mut self, input: MediaInput) -> ModuleSignal {
        if self.finished || self.url.is_none() {
            return ModuleSignal::Idle;
        }
        match input {
            MediaInput::Toggle => {
                self.playing = !self.playing;
                debug!("{:?} playing={}", self.kind, self.playing);
                ModuleSignal::Media(if self.playing {
                    MediaCommand::Play
                } else {
                    MediaCommand::Pause
                })
            }
            MediaInput::SeekBack => {
                ModuleSignal::Media(MediaCommand::Seek((self.position - REWIND_SECS).max(0.0)))
            }
            MediaInput::CycleRate => {
                self.rate = self.rate.next();
                ModuleSignal::Media(MediaCommand::SetRate(self.rate.as_f64()))
            }
            MediaInput::Confirm => {
                if self.watched_enough() {
                    self.finish()
                } else {
                    debug!(
                        "Confirm ignored at {:.0}% watched",
                        self.elapsed_fraction() * 100.0
                    );
                    ModuleSignal::Idle
                }
            }
        }
    }
}
