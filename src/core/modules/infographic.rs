//! Infographic viewer with a downloadable study sheet.
//!
//! Free learners sit through a five second ad before the download starts;
//! premium learners download immediately. The viewer only tracks state:
//! the one-second ticks come from an adapter timer, and the transfer itself
//! is requested with `ModuleSignal::Download`.

use log::{debug, info};

use super::{ModuleKind, ModuleSignal, Runner};

/// Length of the ad shown before a free download.
pub const AD_SECONDS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfographicInput {
    RequestDownload { premium: bool },
    AdTick,
    DownloadFinished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfographicViewer {
    url: Option<String>,
    downloading: bool,
    ad_seconds_remaining: Option<u8>,
}

impl InfographicViewer {
    pub fn new(url: Option<String>) -> Self {
        Self {
            url,
            downloading: false,
            ad_seconds_remaining: None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_downloading(&self) -> bool {
        self.downloading
    }

    pub fn ad_in_progress(&self) -> bool {
        self.ad_seconds_remaining.is_some()
    }

    pub fn ad_seconds_remaining(&self) -> u8 {
        self.ad_seconds_remaining.unwrap_or(0)
    }

    /// A new request would be accepted.
    pub fn can_download(&self) -> bool {
        self.url.is_some() && !self.downloading && !self.ad_in_progress()
    }

    fn begin_download(&mut self) -> ModuleSignal {
        match &self.url {
            Some(url) => {
                self.downloading = true;
                info!("Starting material download: {}", url);
                ModuleSignal::Download(url.clone())
            }
            None => ModuleSignal::Idle,
        }
    }
}

impl Runner for InfographicViewer {
    type Input = InfographicInput;

    fn kind(&self) -> ModuleKind {
        ModuleKind::Infographic
    }

    fn handle(&mut self, input: InfographicInput) -> ModuleSignal {
        match input {
            InfographicInput::RequestDownload { premium } => {
                if !self.can_download() {
                    debug!("Download request refused");
                    return ModuleSignal::Idle;
                }
                if premium {
                    self.begin_download()
                } else {
                    self.ad_seconds_remaining = Some(AD_SECONDS);
                    ModuleSignal::StartAdCountdown
                }
            }
            InfographicInput::AdTick => match self.ad_seconds_remaining {
                // A tick with no ad running comes from a stale timer.
                None => ModuleSignal::StopAdCountdown,
                Some(remaining) if remaining > 1 => {
                    self.ad_seconds_remaining = Some(remaining - 1);
                    ModuleSignal::Idle
                }
                Some(_) => {
                    self.ad_seconds_remaining = None;
                    self.begin_download()
                }
            },
            InfographicInput::DownloadFinished => {
                self.downloading = false;
                ModuleSignal::Idle
            }
        }
    }
}
