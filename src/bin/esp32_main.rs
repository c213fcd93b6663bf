//! ESP32-C3 SuperMini relay and dimmer controller.
//!
//! This is the main entry point for the physical hardware controller.
//! It runs a 50Hz control loop that:
//! - Steps a demo pattern through the desired-state buffer
//! - Pushes the state to every output group
//! - Reports and clears latched hardware faults
//!
//! # Channel Layout
//!
//! | Channels | Group   | Pins      | Mode                |
//! |----------|---------|-----------|---------------------|
//! | 0-1      | relays  | GPIO3, 4  | digital, active low |
//! | 2-3      | dimmers | GPIO5, 6  | PWM, active high    |
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_main
//! espflash flash --monitor target/riscv32imc-esp-espidf/release/esp32_main
//! ```

use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver};
use esp_idf_hal::peripherals::Peripherals;
use rs_relays::hal::esp32::{pins, pwm_timer_config, Esp32Board};
use rs_relays::{ChannelId, ControllerConfig, OutputController, PinGroupConfig, RelayMode};
use std::thread;
use std::time::Duration;

/// Total channels across both groups
const CHANNELS: usize = 4;

/// Ticks between relay toggles (50 ticks = 1s at 50Hz)
const RELAY_TOGGLE_TICKS: u32 = 50;

/// Dimmer ramp step per tick
const DIMMER_STEP: u8 = 5;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = ControllerConfig::default().with_name("relay-board");

    println!();
    println!("================================");
    println!("  {} SuperMini Controller", config.name);
    println!("================================");
    println!();

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Relay module (channels 0-1, GPIO3/4, active low)
    // =========================================================================
    let mut relay_board = Esp32Board::new();
    // Idle high keeps active-low relays released until the first update
    relay_board.add_gpio(peripherals.pins.gpio3.downgrade_output(), true)?;
    relay_board.add_gpio(peripherals.pins.gpio4.downgrade_output(), true)?;

    let mut relays = PinGroupConfig::new(0)
        .with_pins(&[pins::RELAY_1, pins::RELAY_2])
        .with_relay_mode(RelayMode::ActiveLow)
        .with_label("relays")
        .build(relay_board)?;
    println!("[OK] Relays on GPIO{}/{}", pins::RELAY_1, pins::RELAY_2);

    // =========================================================================
    // MOSFET dimmers (channels 2-3, GPIO5/6, LEDC PWM)
    // =========================================================================
    let timer = LedcTimerDriver::new(peripherals.ledc.timer0, &pwm_timer_config())?;
    let mut dimmer_board = Esp32Board::new();
    dimmer_board.add_ledc(
        pins::DIMMER_1,
        LedcDriver::new(peripherals.ledc.channel0, &timer, peripherals.pins.gpio5)?,
    )?;
    dimmer_board.add_ledc(
        pins::DIMMER_2,
        LedcDriver::new(peripherals.ledc.channel1, &timer, peripherals.pins.gpio6)?,
    )?;

    let mut dimmers = PinGroupConfig::new(2)
        .with_pins(&[pins::DIMMER_1, pins::DIMMER_2])
        .with_pwm(true)
        .with_label("dimmers")
        .build(dimmer_board)?;
    println!("[OK] Dimmers on GPIO{}/{}", pins::DIMMER_1, pins::DIMMER_2);

    // =========================================================================
    // Controller
    // =========================================================================
    let mut controller = OutputController::<CHANNELS>::new();
    controller.add(&mut relays)?;
    controller.add(&mut dimmers)?;
    controller.start_all()?;

    if controller.has_fault() {
        for (index, fault) in controller.faults() {
            log::error!("group {index} failed to start: {fault:?}");
        }
    }

    println!();
    println!("Starting control loop ({}Hz)...", config.update_rate_hz());
    println!();

    let mut tick: u32 = 0;
    let mut relay_on: ChannelId = 0;
    let mut brightness: u8 = 0;
    let mut rising = true;

    // =========================================================================
    // Main Control Loop (50Hz)
    // =========================================================================
    loop {
        // ---------------------------------------------------------------------
        // Demo pattern: alternate relays, ramp dimmers in opposite directions
        // ---------------------------------------------------------------------
        if tick % RELAY_TOGGLE_TICKS == 0 {
            relay_on = 1 - relay_on;
            let state = controller.state_mut();
            state.set_off(1 - relay_on)?;
            state.set_on(relay_on)?;
            log::info!("relay {relay_on} on");
        }

        brightness = match (rising, brightness.checked_add(DIMMER_STEP)) {
            (true, Some(next)) => next,
            (true, None) => {
                rising = false;
                u8::MAX
            }
            (false, _) => match brightness.checked_sub(DIMMER_STEP) {
                Some(next) => next,
                None => {
                    rising = true;
                    0
                }
            },
        };
        controller.state_mut().set(2, brightness)?;
        controller.state_mut().set(3, u8::MAX - brightness)?;

        // ---------------------------------------------------------------------
        // Push state to hardware
        // ---------------------------------------------------------------------
        controller.update_all()?;

        // ---------------------------------------------------------------------
        // Fault reporting
        // ---------------------------------------------------------------------
        if controller.has_fault() {
            for (index, fault) in controller.faults() {
                log::warn!("group {index}: {fault:?}");
            }
            controller.clear_faults();
        }

        tick = tick.wrapping_add(1);

        // Sleep until next tick
        thread::sleep(Duration::from_millis(u64::from(config.update_interval_ms)));
    }
}
