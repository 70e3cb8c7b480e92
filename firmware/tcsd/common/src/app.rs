//! Brings up the hardware and spawns all tasks.
use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::adc::{Adc, AdcChannel};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::{Config, bind_interrupts, i2c, peripherals};
use tcsd_core::persist::SetpointStore;

use crate::SHARED_MUTEX;
use crate::control::{HeaterResources, heater_task, sensors::TipSensor};
use crate::eeprom::{EepromSlot, eeprom_task, load_setpoint};
use crate::ticks::slow_tick_task;
use crate::ui::{
    display::{DisplayResources, display_task},
    panel_task,
};

bind_interrupts!(struct Irqs {
    I2C1_EV => i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => i2c::ErrorInterruptHandler<peripherals::I2C1>;
});

/// The main application.
///
/// Loads the set point before any task runs, so that the heater never regulates towards a
/// placeholder.
#[embassy_executor::task]
pub async fn app(spawner: Spawner) {
    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hsi = true;
        config.rcc.hse = None;
        config.rcc.pll = Some(Pll {
            source: PllSource::HSI,
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL85,
            divp: Some(PllPDiv::DIV20), // 17 MHz ADC clock
            divq: None,
            divr: Some(PllRDiv::DIV2), // 170 MHz system clock
        });
        config.rcc.mux.adc12sel = mux::Adcsel::PLL1_P;
        config.rcc.sys = Sysclk::PLL1_R;
        config.enable_debug_during_sleep = true;
    }
    let p = embassy_stm32::init(config);

    let i2c = i2c::I2c::new(
        p.I2C1,
        p.PA15,
        p.PB7,
        Irqs,
        p.DMA1_CH2,
        p.DMA1_CH3,
        i2c::Config::default(),
    );
    let eeprom = eeprom24x::Eeprom24x::new_24x32(i2c, eeprom24x::SlaveAddr::default());
    let mut store = SetpointStore::new(EepromSlot::new(eeprom));

    let setpoint = load_setpoint(&mut store).await;
    SHARED_MUTEX.lock(|x| {
        let mut shared = x.borrow_mut();
        shared.setpoint = setpoint;
        shared.display.show(setpoint);
    });
    info!(
        "tcsd {} starting, set point {} °C",
        env!("FIRMWARE_REVISION"),
        setpoint
    );

    let heater_resources = HeaterResources {
        sensor: TipSensor {
            adc: Adc::new(p.ADC1),
            pin_temperature: p.PA1.degrade_adc(),
            adc_dma: p.DMA1_CH1,
            pin_sense_enable: Output::new(p.PB0, Level::Low, Speed::Low),
        },
        exti_zero_crossing: ExtiInput::new(p.PA0, p.EXTI0, Pull::None),
        pin_heater: Output::new(p.PA8, Level::Low, Speed::Low),
    };

    let display_resources = DisplayResources {
        pins_row: [
            Output::new(p.PB12, Level::High, Speed::Low),
            Output::new(p.PB13, Level::High, Speed::Low),
            Output::new(p.PB14, Level::High, Speed::Low),
        ],
        pins_segment: [
            Output::new(p.PA2, Level::High, Speed::Low),
            Output::new(p.PA3, Level::High, Speed::Low),
            Output::new(p.PA4, Level::High, Speed::Low),
            Output::new(p.PA5, Level::High, Speed::Low),
            Output::new(p.PA6, Level::High, Speed::Low),
            Output::new(p.PA7, Level::High, Speed::Low),
            Output::new(p.PB10, Level::High, Speed::Low),
            Output::new(p.PB11, Level::High, Speed::Low),
        ],
        pin_keypad: Input::new(p.PB15, Pull::Down),
    };

    spawner.must_spawn(heater_task(heater_resources));
    spawner.must_spawn(display_task(display_resources));
    spawner.must_spawn(slow_tick_task());
    spawner.must_spawn(panel_task());
    spawner.must_spawn(eeprom_task(store));
}
