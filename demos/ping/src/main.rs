mod app;

use std::{process, thread};

use log::{error, info};

use ucef_federate::{Federate, FederateConfig, FederateHooks, UcefError};
use ucef_shared::SharingPolicy;
use ucef_test::{ping_model, LocalRtiConfig, LocalRtiHub};

use app::{Pinger, Ponger};

const STEPS: i32 = 5;

fn main() {
    env_logger::init();
    info!("Ucef Ping Demo started");

    let hub = LocalRtiHub::with_config(
        &ping_model(SharingPolicy::PublishSubscribe),
        LocalRtiConfig {
            expected_federates: 2,
            journal: None,
        },
    );

    let pinger = spawn_federate(&hub, app::pinger_config(), Pinger::new(STEPS));
    let ponger = spawn_federate(&hub, app::ponger_config(), Ponger::new(STEPS));

    let mut failed = false;
    for (name, handle) in [("pinger", pinger), ("ponger", ponger)] {
        match handle.join() {
            Ok(Ok(())) => info!("{} expired", name),
            Ok(Err(error)) => {
                error!("{} failed: {}", name, error);
                failed = true;
            }
            Err(_) => {
                error!("{} panicked", name);
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}

fn spawn_federate<H: FederateHooks + Send + 'static>(
    hub: &LocalRtiHub,
    config: FederateConfig,
    hooks: H,
) -> thread::JoinHandle<Result<(), UcefError>> {
    let rti = hub.create_rti(&config.federate_name);
    let name = config.federate_name.clone();
    let spawned = thread::Builder::new().name(name).spawn(move || {
        let mut federate = Federate::new(config, rti, hooks);
        federate.run_federate_or_exit()
    });
    match spawned {
        Ok(handle) => handle,
        Err(error) => {
            error!("Could not start federate thread: {}", error);
            process::exit(1);
        }
    }
}
