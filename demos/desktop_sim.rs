//! Desktop simulation of a relay board with mock hardware.
//!
//! Builds the same channel layout as the ESP32 binary (two active-low relays
//! and two PWM dimmers) on [`MockBoard`]s, runs a few control cycles and
//! prints what each pin was driven to. A third group is added with an
//! overlapping range to show the error the controller reports.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example desktop_sim
//! ```

use rs_relays::hal::MockBoard;
use rs_relays::{ControllerConfig, Group, OutputController, PinGroup, PinGroupConfig, RelayMode};

fn print_pins(label: &str, group: &PinGroup<MockBoard>) {
    for (channel, &pin) in group.channels().iter().zip(group.pins()) {
        println!(
            "  {label:<8} ch{channel} -> pin {pin:>2}: {:?}",
            group.board().output(pin)
        );
    }
}

fn main() {
    println!("=================================");
    println!("  rs-relays Desktop Simulation");
    println!("=================================");
    println!();

    let config = ControllerConfig::default().with_name("desktop-sim");

    let relay_config = PinGroupConfig::new(0)
        .with_pins(&[3, 4])
        .with_relay_mode(RelayMode::ActiveLow)
        .with_label("relays");
    let dimmer_config = PinGroupConfig::new(2)
        .with_pins(&[5, 6])
        .with_pwm(true)
        .with_label("dimmers");

    let (mut relays, mut dimmers) = match (
        relay_config.build(MockBoard::new()),
        dimmer_config.build(MockBoard::new().with_pwm_pins(&[5, 6])),
    ) {
        (Ok(r), Ok(d)) => (r, d),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Invalid group config: {e}");
            return;
        }
    };
    // Claims channel 1, already owned by the relays
    let mut stray = PinGroup::new(2, 1, false, &[7, 8], RelayMode::ActiveHigh, MockBoard::new())
        .expect("static config is valid");

    let patterns: [[u8; 4]; 3] = [[1, 0, 0, 255], [0, 1, 128, 128], [1, 1, 255, 0]];

    {
        let mut controller = OutputController::<4>::new();
        controller.add(&mut relays).expect("relays fit");
        controller.add(&mut dimmers).expect("dimmers fit");
        if let Err(e) = controller.add(&mut stray) {
            println!("[EXPECTED] third group rejected: {e}");
        }

        controller.start_all().expect("first start");
        println!(
            "[OK] {} groups started ({}Hz loop on hardware)",
            controller.group_count(),
            config.update_rate_hz()
        );
        println!();

        for (cycle, pattern) in patterns.iter().enumerate() {
            for (channel, &level) in pattern.iter().enumerate() {
                controller
                    .state_mut()
                    .set(channel as u16, level)
                    .expect("channel in range");
            }
            controller.update_all().expect("started");
            println!("cycle {cycle}: desired {:?}", controller.state().as_slice());
        }
    }

    println!();
    println!("Final pin outputs:");
    print_pins("relays", &relays);
    print_pins("dimmers", &dimmers);
}
