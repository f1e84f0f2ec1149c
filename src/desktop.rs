//! The collaborator and configuration bundle regions are created from.
//!
//! A [`Desktop`] is shared by reference (`Arc`) between every region and
//! match derived from it. Its [`Settings`] are read at call time, so an
//! update through [`Desktop::update_settings`] is seen by all of them on
//! their next operation.

use crate::backend::{Actuator, CaptureProvider, TesseractRecognizer, TextRecognizer};
use crate::clock::{Clock, SystemClock};
use crate::geometry::{Pad, Rect};
use crate::util::VisautoResult;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Snapshot of the region or match an action is performed on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionTarget<'a> {
    pub rect: Rect,
    /// Asset name when acting on a match.
    pub name: Option<&'a str>,
    /// Similarity when acting on a match.
    pub similarity: Option<f32>,
}

/// Replaces the default pointer move of `hover`.
pub type HoverOverride = Arc<dyn Fn(&ActionTarget<'_>, i32, i32) -> VisautoResult<()> + Send + Sync>;
/// Replaces the default move-and-click of `click`; also receives the padding.
pub type ClickOverride =
    Arc<dyn Fn(&ActionTarget<'_>, i32, i32, Pad) -> VisautoResult<()> + Send + Sync>;
/// Observes a completed hover or click.
pub type ActionCallback = Arc<dyn Fn(&ActionTarget<'_>, i32, i32) + Send + Sync>;

/// Tunables shared by every region of a desktop.
#[derive(Clone)]
pub struct Settings {
    /// Duration of each pointer move.
    pub mouse_move_speed: Duration,
    /// Delay between attempts in `wait` and `wait_vanish`.
    pub scan_rate: Duration,
    /// Text recognizer executable.
    pub tesseract_cmd: PathBuf,
    /// Use the row-parallel kernel. Defaults to on when the `rayon` feature
    /// is enabled and is ignored without it.
    pub parallel: bool,
    pub override_hover: Option<HoverOverride>,
    pub hover_callback: Option<ActionCallback>,
    pub override_click: Option<ClickOverride>,
    pub click_callback: Option<ActionCallback>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_move_speed: Duration::from_millis(200),
            scan_rate: Duration::from_millis(50),
            tesseract_cmd: PathBuf::from("tesseract"),
            parallel: cfg!(feature = "rayon"),
            override_hover: None,
            hover_callback: None,
            override_click: None,
            click_callback: None,
        }
    }
}

impl Settings {
    /// Sets the duration of each pointer move.
    pub fn with_mouse_move_speed(mut self, speed: Duration) -> Self {
        self.mouse_move_speed = speed;
        self
    }

    /// Sets the delay between polling attempts.
    pub fn with_scan_rate(mut self, rate: Duration) -> Self {
        self.scan_rate = rate;
        self
    }

    /// Sets the text recognizer executable.
    pub fn with_tesseract_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.tesseract_cmd = cmd.into();
        self
    }

    /// Selects the row-parallel kernel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replaces the pointer move performed by `hover`.
    pub fn with_override_hover<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ActionTarget<'_>, i32, i32) -> VisautoResult<()> + Send + Sync + 'static,
    {
        self.override_hover = Some(Arc::new(hook));
        self
    }

    /// Registers an observer of completed hovers.
    pub fn with_hover_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ActionTarget<'_>, i32, i32) + Send + Sync + 'static,
    {
        self.hover_callback = Some(Arc::new(callback));
        self
    }

    /// Replaces the move-and-click performed by `click`.
    pub fn with_override_click<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ActionTarget<'_>, i32, i32, Pad) -> VisautoResult<()> + Send + Sync + 'static,
    {
        self.override_click = Some(Arc::new(hook));
        self
    }

    /// Registers an observer of completed clicks.
    pub fn with_click_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ActionTarget<'_>, i32, i32) + Send + Sync + 'static,
    {
        self.click_callback = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("mouse_move_speed", &self.mouse_move_speed)
            .field("scan_rate", &self.scan_rate)
            .field("tesseract_cmd", &self.tesseract_cmd)
            .field("parallel", &self.parallel)
            .field("override_hover", &self.override_hover.is_some())
            .field("hover_callback", &self.hover_callback.is_some())
            .field("override_click", &self.override_click.is_some())
            .field("click_callback", &self.click_callback.is_some())
            .finish()
    }
}

/// Capture, actuation and OCR backends plus the clock and settings.
pub struct Desktop {
    capture: Box<dyn CaptureProvider>,
    actuator: Box<dyn Actuator>,
    recognizer: Box<dyn TextRecognizer>,
    clock: Box<dyn Clock>,
    settings: RwLock<Settings>,
}

impl Desktop {
    /// Desktop with the tesseract recognizer, the system clock and default
    /// settings.
    pub fn new(capture: impl CaptureProvider + 'static, actuator: impl Actuator + 'static) -> Self {
        Self {
            capture: Box::new(capture),
            actuator: Box::new(actuator),
            recognizer: Box::new(TesseractRecognizer::new()),
            clock: Box::new(SystemClock::new()),
            settings: RwLock::new(Settings::default()),
        }
    }

    /// Live desktop: primary monitor capture and real pointer input.
    #[cfg(all(feature = "xcap", feature = "autogui"))]
    pub fn live() -> Self {
        Self::new(
            crate::backend::XcapScreen::new(),
            crate::backend::AutoGuiActuator::new(),
        )
    }

    /// Replaces the text recognizer.
    pub fn with_recognizer(mut self, recognizer: impl TextRecognizer + 'static) -> Self {
        self.recognizer = Box::new(recognizer);
        self
    }

    /// Replaces the clock used by the polling waits.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the initial settings.
    pub fn with_settings(self, settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
            ..self
        }
    }

    /// Wraps the desktop for sharing between regions.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Current settings.
    pub fn settings(&self) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Mutates the settings; every region sharing this desktop sees the
    /// change on its next call.
    pub fn update_settings(&self, update: impl FnOnce(&mut Settings)) {
        let mut guard = self.settings.write().unwrap_or_else(|p| p.into_inner());
        update(&mut guard);
    }

    /// Returns the capture backend.
    pub fn capture_provider(&self) -> &dyn CaptureProvider {
        self.capture.as_ref()
    }

    /// Returns the pointer backend.
    pub fn actuator(&self) -> &dyn Actuator {
        self.actuator.as_ref()
    }

    /// Returns the text recognizer.
    pub fn recognizer(&self) -> &dyn TextRecognizer {
        self.recognizer.as_ref()
    }

    /// Returns the clock used by the polling waits.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Size of the capturable surface.
    pub fn display_size(&self) -> VisautoResult<(u32, u32)> {
        self.capture.display_size()
    }
}

impl fmt::Debug for Desktop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Desktop")
            .field("settings", &self.settings())
            .finish_non_exhaustive()
    }
}
