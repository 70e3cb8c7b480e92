//! Measure the tip temperature (using ADC).

use defmt::trace;
use embassy_stm32::gpio::Output;
use embassy_stm32::{Peri, adc, peripherals};
use embassy_time::{Duration, with_timeout};
use tcsd_core::heater::Fault;

/// ADC sample time for the tip temperature in cycles.
pub const ADC_SAMPLE_TIME_TEMP: adc::SampleTime = adc::SampleTime::CYCLES92_5;

/// The longest time a conversion may take, before it is considered stalled.
///
/// Well below a mains half-cycle (8.3 ms at 60 Hz).
pub const CONVERSION_TIMEOUT: Duration = Duration::from_millis(2);

/// Resources for measuring the tip temperature.
pub struct TipSensor {
    /// The ADC.
    pub adc: adc::Adc<'static, peripherals::ADC1>,
    /// The ADC tip temperature input pin.
    pub pin_temperature: adc::AnyAdcChannel<peripherals::ADC1>,
    /// The DMA for the ADC.
    pub adc_dma: Peri<'static, peripherals::DMA1_CH1>,
    /// Connects the thermocouple amplifier to the ADC input while high.
    pub pin_sense_enable: Output<'static>,
}

impl TipSensor {
    /// Take a raw (12 bit) measurement of the tip temperature.
    ///
    /// The sense path is enabled only for the duration of the conversion. A conversion that does
    /// not complete within [`CONVERSION_TIMEOUT`] is reported as stalled.
    pub async fn measure(&mut self) -> Result<u16, Fault> {
        let mut adc_buffer = [0u16; 1];

        self.pin_sense_enable.set_high();
        let conversion = with_timeout(
            CONVERSION_TIMEOUT,
            self.adc.read(
                self.adc_dma.reborrow(),
                [(&mut self.pin_temperature, ADC_SAMPLE_TIME_TEMP)].into_iter(),
                &mut adc_buffer,
            ),
        )
        .await;
        self.pin_sense_enable.set_low();

        if conversion.is_err() {
            return Err(Fault::ConversionStall);
        }

        trace!("Measured tip, ADC value: {}", adc_buffer[0]);
        Ok(adc_buffer[0])
    }
}
