use padbind::backends::virtual_input::VirtualDevice;
use padbind::{AssignmentManager, Input, SetupSettings, KEYCODE_BACK};

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let manager = AssignmentManager::new(SetupSettings::default());
    let (_, assigned) = manager.subscribe();

    // Create a virtual device with a custom ID and name
    let mut pad = VirtualDevice::new("virtual:demo", "Demo Virtual Pad").with_platform_id(1);

    // A: key press. Up: stick pushed up, after some resting noise.
    manager.start_assignment(Input::A);
    pad.tap_key(96);
    manager.pump(&mut pad);

    manager.start_assignment(Input::Up);
    pad.set_axis(1, 0.02);
    pad.set_axis(1, -0.95);
    manager.pump(&mut pad);

    // Start: user backs out.
    manager.start_assignment(Input::Start);
    pad.press_key(KEYCODE_BACK);
    manager.pump(&mut pad);

    for event in assigned.try_iter() {
        println!("assigned {} (v{})", event.input.display_name(), event.version);
    }
    for config in manager.query() {
        println!("{:<14} {}", config.input.display_name(), config.assignment.describe());
    }
}
