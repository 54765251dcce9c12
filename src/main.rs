//! vrcmute — Main Entry Point
//!
//! Hexagonal architecture with a single synchronous driver loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  UdpTransport      CommandMute     LogEventSink              │
//! │  (DatagramTransport) (MutePort)    (EventSink)               │
//! │  ConfigWatcher                                               │
//! │  (TOML + notify)                                             │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ──────────────────     │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │            BridgeService (pure logic)              │      │
//! │  │  OSC codec · Observation filter · Stabilizer       │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each 50 ms iteration: drain all pending datagrams, tick the
//! stabilizer once, then apply any pending config reload.
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use vrcmute::adapters::actuator::CommandMute;
use vrcmute::adapters::config_file::{self, ConfigWatcher};
use vrcmute::adapters::log_sink::LogEventSink;
use vrcmute::app::service::BridgeService;
use vrcmute::config::Config;
use vrcmute::transport::UdpTransport;

/// Driver loop cadence. Debounce precision is bounded by this.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(version, about = "VRChat OSC mute bridge")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "vrcmute.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("vrcmute v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Load config (or defaults) ──────────────────────────
    let config = match config_file::load(&cli.config) {
        Ok(c) => {
            info!("config loaded from {}", cli.config.display());
            c
        }
        Err(e) => {
            warn!("config load failed ({e:#}), using defaults");
            Config::default()
        }
    };

    // ── 2. Construct adapters ─────────────────────────────────
    let mut transport = bind_transport(&config);
    let mut actuator = CommandMute::from_config(&config);
    if !actuator.is_configured() {
        warn!("no actuator command configured; observations will be logged only");
    }
    let mut sink = LogEventSink::new(config.debug || cli.verbose > 0);

    // ── 3. Construct the bridge service ───────────────────────
    let mut service = BridgeService::new(config);
    service.start(&mut sink);

    // ── 4. Config hot-reload watcher ──────────────────────────
    let watcher = match ConfigWatcher::watch(&cli.config) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!("config watching disabled ({e:#})");
            None
        }
    };

    info!("bridge ready, entering driver loop");

    // ── 5. Driver loop ────────────────────────────────────────
    loop {
        let now = Instant::now();

        if let Some(t) = transport.as_mut() {
            service.pump(t, now, &mut sink);
        }
        service.tick(now, &mut actuator, &mut sink);

        if watcher.as_ref().is_some_and(ConfigWatcher::take_change) {
            match config_file::load(&cli.config) {
                Ok(new_config) => {
                    if transport.is_none()
                        || new_config.listen_addr() != service.config().listen_addr()
                    {
                        transport = bind_transport(&new_config);
                    }
                    if new_config.actuator_differs(service.config()) {
                        actuator = CommandMute::from_config(&new_config);
                    }
                    sink.set_verbose(new_config.debug);
                    service.replace_config(new_config, &mut sink);
                }
                Err(e) => warn!("config reload rejected ({e:#}), keeping previous"),
            }
        }

        std::thread::sleep(TICK_INTERVAL);
    }
}

/// Bind the UDP transport. Bind failure is fatal to the transport only:
/// the bridge keeps ticking inert, and a config change retries here.
fn bind_transport(config: &Config) -> Option<UdpTransport> {
    match UdpTransport::bind(config.listen_addr()) {
        Ok(t) => {
            info!("listening on UDP {}", config.listen_addr());
            Some(t)
        }
        Err(e) => {
            log::error!("UDP bind {} failed: {e}", config.listen_addr());
            None
        }
    }
}

fn init_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .init();
}
