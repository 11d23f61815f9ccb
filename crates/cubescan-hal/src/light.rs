//! Generic `LightBank` trait for the per-position illumination switches.

use cubescan_types::{CubeError, Position};

/// The rig's illumination relays, one per camera mount position.
///
/// Facelet sampling is only reliable under controlled light, so the
/// [`CaptureAdapter`][crate::adapter::CaptureAdapter] switches the matching
/// light on for the duration of every capture.
pub trait LightBank: Send + Sync {
    /// Stable identifier for this bank, e.g. `"lights"`.
    fn id(&self) -> &str;

    /// Drive the light at `position` (`true` = lit).
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::HardwareIo`] if the command cannot be applied.
    fn set_lit(&mut self, position: Position, lit: bool) -> Result<(), CubeError>;

    /// Current state of the light at `position`.
    fn is_lit(&self, position: Position) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockLightBank {
        id: String,
        upper: bool,
        lower: bool,
    }

    impl LightBank for MockLightBank {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_lit(&mut self, position: Position, lit: bool) -> Result<(), CubeError> {
            match position {
                Position::Upper => self.upper = lit,
                Position::Lower => self.lower = lit,
            }
            Ok(())
        }

        fn is_lit(&self, position: Position) -> bool {
            match position {
                Position::Upper => self.upper,
                Position::Lower => self.lower,
            }
        }
    }

    #[test]
    fn mock_light_bank_toggle() {
        let mut bank = MockLightBank {
            id: "lights".to_string(),
            upper: false,
            lower: false,
        };
        assert!(!bank.is_lit(Position::Lower));

        bank.set_lit(Position::Lower, true).unwrap();
        assert!(bank.is_lit(Position::Lower));
        assert!(!bank.is_lit(Position::Upper));

        bank.set_lit(Position::Lower, false).unwrap();
        assert!(!bank.is_lit(Position::Lower));
    }
}
