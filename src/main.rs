//! Countdown - run an event-emitting countdown timer from the terminal
//! 
//! This is the main entry point for the countdown binary.

use tokio::sync::mpsc;
use tracing::{error, info};

use countdown::{
    config::Config,
    report::EventReport,
    timer::{Timer, TimerEvent},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown v1.0.0");
    info!("Configuration: duration={}s, events={:?}, json={}",
          config.duration, config.reported_events(), config.json);

    let timer = Timer::new();

    // Forward every reported event to the printer below
    let (report_tx, mut report_rx) = mpsc::unbounded_channel();
    for event in config.reported_events() {
        let report_tx = report_tx.clone();
        timer.on(event, move |timer, _| {
            let _ = report_tx.send(EventReport::new(event, timer.snapshot()));
        });
    }

    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    timer.on(TimerEvent::Stop, move |_, _| {
        let _ = done_tx.send(());
    });

    timer.start_with(config.duration)?;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(report) = report_rx.recv() => {
                print_report(&report, config.json)?;
            }
            _ = done_rx.recv() => {
                info!("Countdown complete");
                break;
            }
            result = &mut shutdown => {
                if let Err(e) = result {
                    error!("Failed to listen for shutdown signals: {}", e);
                }
                info!("Shutdown signal received, stopping timer");
                timer.stop();
                break;
            }
        }
    }

    // Listeners own the remaining senders, dropping the timer closes the channel
    drop(report_tx);
    drop(timer);

    while let Some(report) = report_rx.recv().await {
        print_report(&report, config.json)?;
    }

    Ok(())
}

fn print_report(report: &EventReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", report.to_json_line()?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
