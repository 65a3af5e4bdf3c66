//! Ping example: checks that the configured Chronos server is alive

use chronos_client::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let defaults = ClientDefaults::from_env()?;
    println!("Pinging {}:{} (secure: {})", defaults.host, defaults.port, defaults.secure);

    let mut ping = chronos::global()?.debug.ping(&defaults.host, defaults.port, defaults.secure)?;
    match ping.retrieve(defaults.step_timeout).await {
        Ok(true) => println!("Server is alive"),
        Ok(false) => println!("Server answered, but not with pong"),
        Err(e) if e.is_timeout() => println!("No answer within {:?}", defaults.step_timeout),
        Err(e) => eprintln!("Ping failed: {}", e),
    }

    Ok(())
}
