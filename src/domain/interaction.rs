// Pointer interaction state machine for the rendered series
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

pub const DEFAULT_SUPPRESSION: Duration = Duration::from_secs(1);

/// A point on the chart as reported by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Hover { point: ChartPoint },
    Click { point: ChartPoint },
}

#[derive(Debug, Error, PartialEq)]
pub enum PointerEventError {
    #[error("pointer value {0} is not a valid UV index")]
    InvalidValue(f64),
}

impl PointerEvent {
    pub fn point(&self) -> ChartPoint {
        match *self {
            PointerEvent::Hover { point } | PointerEvent::Click { point } => point,
        }
    }

    /// Reject payloads that could never have come from a rendered reading.
    pub fn validate(self) -> Result<Self, PointerEventError> {
        let value = self.point().value;
        if !value.is_finite() || value < 0.0 {
            return Err(PointerEventError::InvalidValue(value));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InteractionState {
    Idle,
    Hovering {
        point: ChartPoint,
    },
    Selected {
        point: ChartPoint,
        #[serde(skip)]
        suppressed_until: Instant,
    },
}

impl InteractionState {
    pub fn point(&self) -> Option<ChartPoint> {
        match *self {
            InteractionState::Idle => None,
            InteractionState::Hovering { point } | InteractionState::Selected { point, .. } => {
                Some(point)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    suppression: Duration,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(DEFAULT_SUPPRESSION)
    }
}

impl InteractionController {
    pub fn new(suppression: Duration) -> Self {
        Self {
            state: InteractionState::Idle,
            suppression,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Apply a pointer event observed at `now`. Returns whether the state changed.
    pub fn handle(&mut self, event: PointerEvent, now: Instant) -> bool {
        let next = match event {
            PointerEvent::Click { point } => InteractionState::Selected {
                point,
                suppressed_until: now + self.suppression,
            },
            PointerEvent::Hover { point } => {
                if self.is_suppressed(now) {
                    tracing::debug!("Hover swallowed during post-click suppression");
                    return false;
                }
                InteractionState::Hovering { point }
            }
        };

        let changed = next != self.state;
        self.state = next;
        changed
    }

    /// Hover ended on the rendering surface. A selection is kept.
    pub fn hover_ended(&mut self) {
        if matches!(self.state, InteractionState::Hovering { .. }) {
            self.state = InteractionState::Idle;
        }
    }

    /// External reset, e.g. after the series is replaced.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }

    fn is_suppressed(&self, now: Instant) -> bool {
        match self.state {
            InteractionState::Selected {
                suppressed_until, ..
            } => now < suppressed_until,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(hour: u32, value: f64) -> ChartPoint {
        ChartPoint {
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap(),
            value,
        }
    }

    #[test]
    fn test_hover_from_idle() {
        let mut controller = InteractionController::default();
        let now = Instant::now();

        assert!(controller.handle(PointerEvent::Hover { point: point(10, 3.0) }, now));
        assert_eq!(
            controller.state(),
            InteractionState::Hovering { point: point(10, 3.0) }
        );
    }

    #[test]
    fn test_hover_end_returns_to_idle() {
        let mut controller = InteractionController::default();
        controller.handle(PointerEvent::Hover { point: point(10, 3.0) }, Instant::now());

        controller.hover_ended();

        assert_eq!(controller.state(), InteractionState::Idle);
    }

    #[test]
    fn test_hover_swallowed_right_after_click() {
        let mut controller = InteractionController::default();
        let now = Instant::now();

        controller.handle(PointerEvent::Click { point: point(10, 3.0) }, now);
        let changed = controller.handle(
            PointerEvent::Hover { point: point(11, 6.0) },
            now + Duration::from_millis(200),
        );

        assert!(!changed);
        assert!(matches!(
            controller.state(),
            InteractionState::Selected { point: p, .. } if p == point(10, 3.0)
        ));
    }

    #[test]
    fn test_hover_accepted_after_suppression() {
        let mut controller = InteractionController::default();
        let now = Instant::now();

        controller.handle(PointerEvent::Click { point: point(10, 3.0) }, now);
        controller.handle(
            PointerEvent::Hover { point: point(11, 6.0) },
            now + DEFAULT_SUPPRESSION,
        );

        assert_eq!(
            controller.state(),
            InteractionState::Hovering { point: point(11, 6.0) }
        );
    }

    #[test]
    fn test_new_click_rearms_suppression() {
        let mut controller = InteractionController::default();
        let now = Instant::now();

        controller.handle(PointerEvent::Click { point: point(10, 3.0) }, now);
        let second_click = now + Duration::from_millis(900);
        controller.handle(PointerEvent::Click { point: point(12, 8.0) }, second_click);
        controller.handle(
            PointerEvent::Hover { point: point(13, 5.0) },
            now + Duration::from_millis(1500),
        );

        assert_eq!(controller.state().point(), Some(point(12, 8.0)));
        assert!(matches!(controller.state(), InteractionState::Selected { .. }));
    }

    #[test]
    fn test_hover_end_keeps_selection() {
        let mut controller = InteractionController::default();
        let now = Instant::now();

        controller.handle(PointerEvent::Click { point: point(10, 3.0) }, now);
        controller.hover_ended();
        assert!(matches!(controller.state(), InteractionState::Selected { .. }));

        controller.reset();
        assert_eq!(controller.state(), InteractionState::Idle);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut bad = point(10, -1.0);
        assert!(PointerEvent::Hover { point: bad }.validate().is_err());

        bad.value = f64::NAN;
        assert!(PointerEvent::Click { point: bad }.validate().is_err());

        assert!(PointerEvent::Click { point: point(10, 4.0) }.validate().is_ok());
    }

    #[test]
    fn test_deserialize_event() {
        let event: PointerEvent = serde_json::from_str(
            r#"{"type":"click","point":{"timestamp":"2025-06-01T10:00:00Z","value":4.0}}"#,
        )
        .unwrap();

        assert_eq!(event, PointerEvent::Click { point: point(10, 4.0) });
    }
}
