use crate::backend::Actuator;
use crate::util::{VisautoError, VisautoResult};
use rustautogui::RustAutoGui;
use std::time::Duration;

/// Live pointer control through `rustautogui`.
///
/// A backend handle is opened per action so the actuator stays `Send + Sync`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoGuiActuator;

impl AutoGuiActuator {
    pub fn new() -> Self {
        Self
    }

    fn gui() -> VisautoResult<RustAutoGui> {
        RustAutoGui::new(false).map_err(|err| VisautoError::Actuation {
            reason: err.to_string(),
        })
    }
}

impl Actuator for AutoGuiActuator {
    fn move_to(&self, x: i32, y: i32, duration: Duration) -> VisautoResult<()> {
        let (x, y) = match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => (x, y),
            _ => {
                return Err(VisautoError::Actuation {
                    reason: format!("({x}, {y}) is off screen"),
                })
            }
        };
        Self::gui()?
            .move_mouse_to_pos(x, y, duration.as_secs_f32())
            .map_err(|err| VisautoError::Actuation {
                reason: err.to_string(),
            })
    }

    fn click(&self) -> VisautoResult<()> {
        Self::gui()?
            .left_click()
            .map_err(|err| VisautoError::Actuation {
                reason: err.to_string(),
            })
    }
}
