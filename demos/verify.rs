//! Verify example: submits, starts and removes a throwaway job in order

use chronos_client::prelude::*;
use chronos_client::HarnessError;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let defaults = ClientDefaults::from_env()?;
    let client = chronos::global()?;
    let (host, port, secure) = (defaults.host.clone(), defaults.port, defaults.secure);

    let job = Job::scheduled("chronos-client-demo", "echo demo", "R0/2030-01-01T00:00:00Z/PT1H");
    let name = job.name.clone();

    let steps: Vec<Step<AnyResponse>> = vec![
        {
            let host = host.clone();
            Step::check(move || client.debug.ping(&host, port, secure).map(Deferred::erased))
        },
        {
            let (host, name) = (host.clone(), name.clone());
            // Leftovers from an earlier run may or may not exist
            Step::do_not_check(move || client.scheduler.jobs.delete(&host, port, secure, &name).map(Deferred::erased))
        },
        {
            let host = host.clone();
            Step::check(move || client.scheduler.jobs.submit(&host, port, secure, &job).map(Deferred::erased))
        },
        {
            let (host, name) = (host.clone(), name.clone());
            Step::check(move || client.scheduler.jobs.start(&host, port, secure, &name).map(Deferred::erased))
        },
        Step::check(move || client.scheduler.jobs.delete(&host, port, secure, &name).map(Deferred::erased)),
    ];

    match Harness::from_defaults(&defaults).run_and_evaluate(steps).await {
        Ok(results) => {
            for (i, result) in results.iter().enumerate() {
                println!("{}. {} -> {}", i + 1, result.operation, result.value.describe());
            }
            println!("All steps succeeded");
        }
        Err(HarnessError::Aborted(aborted)) => eprintln!("{}", aborted),
        Err(HarnessError::Evaluation { error, .. }) => eprintln!("{}", error),
    }

    Ok(())
}
