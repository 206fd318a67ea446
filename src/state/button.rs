//! Primary button state, derived from the timer rather than tracked alongside it

use serde::{Deserialize, Serialize};

use super::TimerState;

/// What the primary control currently offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonState {
    Play,
    Pause,
    Resume,
}

impl ButtonState {
    /// Running timers offer Pause; stopped timers offer Play at the start and Resume otherwise
    pub fn from_timer(timer: &TimerState) -> Self {
        if timer.running {
            ButtonState::Pause
        } else if timer.is_at_start() {
            ButtonState::Play
        } else {
            ButtonState::Resume
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ButtonState::Play => "Start",
            ButtonState::Pause => "Pause",
            ButtonState::Resume => "Resume",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ButtonState::Pause => "pause",
            _ => "play_arrow",
        }
    }

    /// Colour scheme token for the button
    pub fn style(&self) -> &'static str {
        match self {
            ButtonState::Pause => "pause",
            _ => "play",
        }
    }

    /// The reset button is hidden while the timer sits at its start
    pub fn cancel_visible(&self) -> bool {
        *self != ButtonState::Play
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Threshold;

    #[test]
    fn derived_from_timer() {
        let mut timer = TimerState::new();
        assert_eq!(timer.button_state(), ButtonState::Play);

        timer.running = true;
        assert_eq!(timer.button_state(), ButtonState::Pause);

        timer.tick();
        timer.running = false;
        assert_eq!(timer.button_state(), ButtonState::Resume);

        timer.reset();
        assert_eq!(timer.button_state(), ButtonState::Play);
    }

    #[test]
    fn presentation_tokens() {
        assert_eq!(ButtonState::Play.label(), "Start");
        assert_eq!(ButtonState::Resume.icon(), "play_arrow");
        assert_eq!(ButtonState::Pause.style(), "pause");
        assert!(!ButtonState::Play.cancel_visible());
        assert!(ButtonState::Resume.cancel_visible());
    }

    #[test]
    fn running_at_start_still_offers_pause() {
        let timer = TimerState {
            countdown: crate::state::TIME_LIMIT,
            running: true,
            threshold: Threshold::None,
        };
        assert_eq!(timer.button_state(), ButtonState::Pause);
    }
}
