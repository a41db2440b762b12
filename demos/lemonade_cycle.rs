//! Lemonade Cycle
//!
//! Drives a seeded machine through two glasses of lemonade, taking a
//! checkpoint mid-squeeze and resuming from it.
//!
//! Run with: RUST_LOG=debug cargo run --example lemonade_cycle

use lemonade::checkpoint::Checkpoint;
use lemonade::core::{LemonadeState, RandomLemonTree};
use lemonade::{LemonadeConfig, LemonadeMachine};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn tap<T: lemonade::LemonTree>(machine: &mut LemonadeMachine<T>) -> Result<(), Box<dyn Error>> {
    machine.advance()?;
    let scene = machine.scene();
    match machine.squeeze_message() {
        Some(message) => println!("  [{}] {} ({})", scene.image, scene.text, message),
        None => println!("  [{}] {}", scene.image, scene.text),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Lemonade Cycle Example ===\n");

    let config = LemonadeConfig::from_json(r#"{ "min_lemon_size": 2, "max_lemon_size": 4 }"#)?;
    let mut machine = LemonadeMachine::from_config(config, Some(2021))?;
    println!("  [{}] {}", machine.scene().image, machine.scene().text);

    // Pick a lemon and give it one squeeze before backgrounding.
    tap(&mut machine)?;
    tap(&mut machine)?;

    let json = Checkpoint::capture(&machine).to_json()?;
    println!("\nCheckpoint:\n{json}\n");

    let mut resumed = LemonadeMachine::new(RandomLemonTree::seeded(2021));
    Checkpoint::from_json(&json)?.resume(&mut resumed)?;

    while resumed.state() != LemonadeState::Select {
        tap(&mut resumed)?;
    }

    println!("\nSecond glass:");
    loop {
        tap(&mut resumed)?;
        if resumed.state() == LemonadeState::Select {
            break;
        }
    }

    println!(
        "\nGlasses drunk: {}, taps recorded: {}",
        resumed.history().glasses_drunk(),
        resumed.history().len()
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
