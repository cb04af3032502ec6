// SPDX-License-Identifier: MPL-2.0
//! Scripted walkthrough of the notification lifecycle.
//!
//! Plays the part of a form handler reporting outcomes, then prints what a
//! rendering layer would see as time passes.

use std::time::Duration;
use toast_relay::config;
use toast_relay::notifications::{
    ConfirmSpec, Notification, NotificationCenter, NotificationMessage, NotificationSpec,
};
use toast_relay::paths;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
toast_relay demo

USAGE:
  toast_relay [OPTIONS]

OPTIONS:
  --config-dir <DIR>   Read notifications.toml from DIR
  -h, --help           Print this help
";

fn print_snapshot(label: &str, list: &[Notification]) {
    println!("-- {label} ({} live)", list.len());
    for n in list {
        println!(
            "   [{:<7}] {:?} {}{}",
            n.kind(),
            n.state(),
            n.title().map(|t| format!("{t}: ")).unwrap_or_default(),
            n.message()
        );
    }
}

#[tokio::main]
async fn main() -> toast_relay::error::Result<()> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }
    let config_dir: Option<String> = args
        .opt_value_from_str("--config-dir")
        .unwrap_or_else(|err| {
            eprintln!("ignoring --config-dir: {err}");
            None
        });
    paths::init_cli_override(config_dir);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (config, warning) = config::load();
    if let Some(warning) = warning {
        tracing::warn!(%warning, "using fallback notification config");
    }
    let removal_delay = config.removal_delay();
    let center = NotificationCenter::new(config)?;

    center.add(NotificationSpec::success("Invoice saved").with_title("Billing"));
    center.add(NotificationSpec::error("Could not reach the server"));
    let stale = center.add(NotificationSpec::info("Sync paused"));
    let delete = center.confirm(
        ConfirmSpec::new("Delete invoice #42?")
            .confirm_text("Delete")
            .on_confirm(|| println!(">> invoice deleted"))
            .on_cancel(|| println!(">> deletion cancelled")),
    );
    print_snapshot("after collaborator calls", &center.list());

    center.handle_message(&NotificationMessage::Dismiss(stale));
    center.handle_message(&NotificationMessage::Confirm(delete.clone()));
    // Second click on the same request is ignored.
    center.handle_message(&NotificationMessage::Cancel(delete));
    print_snapshot("after user input", &center.list());

    tokio::time::sleep(removal_delay + Duration::from_millis(10)).await;
    print_snapshot("after exit transitions", &center.list());

    while !center.is_empty() {
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    print_snapshot("after auto-close", &center.list());
    Ok(())
}
