//! Two-level (on/off) control of the heater, synchronized to the mains zero-crossing.
//!
//! Once per half-cycle, the firmware converts the tip sensor and passes the result to
//! [`regulate`]. The heater heats while the measured temperature is at or below the set point,
//! without hysteresis.

use crate::Shared;
use crate::segment::FAULT_SENTINEL;

/// The full-scale conversion result (12 bit).
///
/// The thermocouple amplifier saturates at full scale when the sensor path is open.
pub const RAW_FULL_SCALE: u16 = 0x0fff;

/// Right shift that scales a conversion result to °C.
const RAW_SHIFT: u32 = 3;

/// Offset in °C, subtracted after scaling.
const RAW_OFFSET_C: i16 = 20;

/// Faults of the temperature measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// The conversion did not complete in time.
    ConversionStall,
    /// The conversion saturated, the sensor path is open.
    SensorOpen,
}

/// The outcome of a control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Regulation {
    /// The tip is at or below the set point, the heater is on.
    Heat,
    /// The tip is above the set point, the heater is off.
    Cool,
    /// The measurement failed, the heater is off.
    Fault(Fault),
}

impl Regulation {
    /// The heater output for this outcome.
    pub fn heater_on(self) -> bool {
        matches!(self, Regulation::Heat)
    }
}

/// Convert a raw conversion result to a temperature in °C.
pub fn measured_from_raw(raw: u16) -> i16 {
    (raw >> RAW_SHIFT) as i16 - RAW_OFFSET_C
}

/// Run one control cycle with the result of the tip conversion.
///
/// Updates the measured temperature, the heater state and the heater indicator on the display.
/// During a fault, the measured temperature is replaced by the fault sentinel, so that the
/// display shows the fault glyph.
pub fn regulate(shared: &mut Shared, sample: Result<u16, Fault>) -> Regulation {
    let regulation = match sample {
        Ok(raw) => {
            shared.raw_sample = raw;

            if raw >= RAW_FULL_SCALE {
                shared.measured = FAULT_SENTINEL;
                Regulation::Fault(Fault::SensorOpen)
            } else {
                shared.measured = measured_from_raw(raw);

                if shared.measured > shared.setpoint {
                    Regulation::Cool
                } else {
                    Regulation::Heat
                }
            }
        }
        Err(fault) => {
            shared.measured = FAULT_SENTINEL;
            Regulation::Fault(fault)
        }
    };

    shared.heater_on = regulation.heater_on();
    shared.display.set_heater_indicator(shared.heater_on);

    regulation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::HEATER_INDICATOR;

    /// The raw sample that yields a temperature.
    fn raw_for(measured: i16) -> u16 {
        ((measured + RAW_OFFSET_C) as u16) << RAW_SHIFT
    }

    fn shared_at(setpoint: i16) -> Shared {
        Shared {
            setpoint,
            ..Shared::new()
        }
    }

    #[test]
    fn linear_transform() {
        assert_eq!(measured_from_raw(0), -20);
        assert_eq!(measured_from_raw(7), -20);
        assert_eq!(measured_from_raw(8), -19);
        assert_eq!(measured_from_raw(2560), 300);
        assert_eq!(measured_from_raw(4094), 491);
    }

    #[test]
    fn cools_strictly_above_set_point() {
        let mut shared = shared_at(300);

        assert_eq!(regulate(&mut shared, Ok(raw_for(301))), Regulation::Cool);
        assert_eq!(shared.measured, 301);
        assert!(!shared.heater_on);
        assert_eq!(shared.display.row(0) & HEATER_INDICATOR, 0);
    }

    #[test]
    fn heats_at_set_point() {
        let mut shared = shared_at(300);

        assert_eq!(regulate(&mut shared, Ok(raw_for(300))), Regulation::Heat);
        assert_eq!(shared.measured, 300);
        assert!(shared.heater_on);
        assert_eq!(shared.display.row(0) & HEATER_INDICATOR, HEATER_INDICATOR);
    }

    #[test]
    fn stall_switches_heater_off() {
        let mut shared = shared_at(300);
        regulate(&mut shared, Ok(raw_for(250)));
        assert!(shared.heater_on);

        let regulation = regulate(&mut shared, Err(Fault::ConversionStall));
        assert_eq!(regulation, Regulation::Fault(Fault::ConversionStall));
        assert!(!shared.heater_on);
        assert_eq!(shared.measured, FAULT_SENTINEL);
        assert_eq!(shared.raw_sample, raw_for(250));
        assert_eq!(shared.display.row(0) & HEATER_INDICATOR, 0);
    }

    #[test]
    fn open_sensor_is_a_fault_even_below_set_point() {
        let mut shared = shared_at(999);

        let regulation = regulate(&mut shared, Ok(RAW_FULL_SCALE));
        assert_eq!(regulation, Regulation::Fault(Fault::SensorOpen));
        assert!(!shared.heater_on);
        assert_eq!(shared.raw_sample, RAW_FULL_SCALE);
    }

    #[test]
    fn recovers_after_fault() {
        let mut shared = shared_at(300);
        regulate(&mut shared, Err(Fault::ConversionStall));

        assert_eq!(regulate(&mut shared, Ok(raw_for(290))), Regulation::Heat);
        assert_eq!(shared.measured, 290);
    }
}
