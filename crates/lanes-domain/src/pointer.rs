use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
}

/// One sample of the single logical pointer stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub buttons: ButtonState,
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, buttons: ButtonState, timestamp_ms: u64) -> Self {
        Self {
            x,
            y,
            buttons,
            timestamp_ms,
        }
    }

    pub fn pressed(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(x, y, ButtonState::Pressed, timestamp_ms)
    }

    pub fn released(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(x, y, ButtonState::Released, timestamp_ms)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// What a sample means relative to the previous button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTransition {
    Press,
    Move,
    Release,
    Hover,
}

impl PointerTransition {
    pub fn between(previous: ButtonState, current: ButtonState) -> Self {
        match (previous, current) {
            (ButtonState::Released, ButtonState::Pressed) => Self::Press,
            (ButtonState::Pressed, ButtonState::Pressed) => Self::Move,
            (ButtonState::Pressed, ButtonState::Released) => Self::Release,
            (ButtonState::Released, ButtonState::Released) => Self::Hover,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        use ButtonState::*;
        assert_eq!(PointerTransition::between(Released, Pressed), PointerTransition::Press);
        assert_eq!(PointerTransition::between(Pressed, Pressed), PointerTransition::Move);
        assert_eq!(PointerTransition::between(Pressed, Released), PointerTransition::Release);
        assert_eq!(PointerTransition::between(Released, Released), PointerTransition::Hover);
    }

    #[test]
    fn test_sample_json_shape() {
        let sample: PointerSample =
            serde_json::from_str(r#"{"x": 3.0, "y": 4.5, "buttons": "pressed"}"#).unwrap();
        assert_eq!(sample, PointerSample::pressed(3.0, 4.5, 0));
        assert!(!PointerSample::released(f64::NAN, 0.0, 0).is_finite());
    }
}
