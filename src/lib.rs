//! visauto is a vision-based GUI automation library.
//!
//! A [`Region`] is a rectangle on screen. Searching it for a template image
//! runs zero-mean normalized cross-correlation over a grayscale capture and
//! returns [`Match`] values in absolute screen coordinates; matches can be
//! searched, hovered, clicked and read with OCR exactly like regions.
//!
//! Capture, pointer input and OCR are pluggable through the traits in
//! [`backend`]; a [`Desktop`] bundles them with the shared [`Settings`].
//!
//! ```no_run
//! use std::time::Duration;
//! use visauto::backend::{RecordingActuator, StaticScreen};
//! use visauto::{Desktop, ImageMatch, Pad, Region};
//!
//! # fn main() -> visauto::VisautoResult<()> {
//! let desktop = Desktop::new(StaticScreen::open("screen.png")?, RecordingActuator::new()).shared();
//! let mut region = Region::full_screen(&desktop)?;
//! let button = region.wait("assets/ok.png", Duration::from_secs(5), 0.9)?;
//! button.click(Pad::default())?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod clock;
mod desktop;
pub mod geometry;
pub mod image;
pub mod kernel;
mod region;
pub mod score;
pub mod search;
pub mod template;
mod trace;
pub mod util;

pub use clock::{Clock, ManualClock, SystemClock};
pub use desktop::{
    ActionCallback, ActionTarget, ClickOverride, Desktop, HoverOverride, Settings,
};
pub use geometry::{Pad, Rect};
pub use crate::image::{ImageView, OwnedImage};
pub use region::{Match, Region};
pub use score::{Peak, ScoreMap};
pub use search::ImageMatch;
pub use template::{Target, Template, TemplatePlan};
pub use util::{VisautoError, VisautoResult};
