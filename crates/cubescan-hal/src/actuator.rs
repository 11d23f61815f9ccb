//! Generic `TurnActuator` trait – the "rotate face and confirm" primitive.

use std::time::Duration;

use cubescan_types::{CubeError, FaceTurn};

/// The mechanism that grips and rotates cube faces.
///
/// Every call blocks until the firmware acknowledges completion, reports a
/// failure, or the timeout budget is exhausted.  There is no cancellation:
/// once a rotation is commanded, the only outcomes are acknowledgment or a
/// fatal [`CubeError::HardwareIo`].
pub trait TurnActuator: Send + Sync {
    /// Stable identifier for this actuator, e.g. `"turner"`.
    fn id(&self) -> &str;

    /// Block until the firmware reports itself ready to accept commands.
    ///
    /// Issued once at startup, before the first rotation.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::HardwareIo`] if readiness is not reported within
    /// `timeout`.
    fn wait_ready(&mut self, timeout: Duration) -> Result<(), CubeError>;

    /// Execute `turn` and block until the firmware confirms it.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::HardwareIo`] if the firmware reports a failure
    /// or does not confirm within `timeout`.
    fn rotate(&mut self, turn: FaceTurn, timeout: Duration) -> Result<(), CubeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubescan_types::Face;

    struct MockActuator {
        id: String,
        executed: Vec<FaceTurn>,
    }

    impl TurnActuator for MockActuator {
        fn id(&self) -> &str {
            &self.id
        }

        fn wait_ready(&mut self, _timeout: Duration) -> Result<(), CubeError> {
            Ok(())
        }

        fn rotate(&mut self, turn: FaceTurn, _timeout: Duration) -> Result<(), CubeError> {
            self.executed.push(turn);
            Ok(())
        }
    }

    #[test]
    fn mock_actuator_records_turns() {
        let mut act = MockActuator {
            id: "turner".to_string(),
            executed: Vec::new(),
        };
        act.wait_ready(Duration::from_secs(1)).unwrap();
        act.rotate(FaceTurn::half(Face::Front), Duration::from_secs(1))
            .unwrap();
        act.rotate(FaceTurn::half(Face::Front).invert(), Duration::from_secs(1))
            .unwrap();
        assert_eq!(act.executed.len(), 2);
        assert_eq!(act.executed[0].to_string(), "F2");
        assert_eq!(act.executed[1].to_string(), "F2'");
    }
}
