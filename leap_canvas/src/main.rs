//! leap_canvas: interactive entry point.

use leap_canvas::app::{exit_status, run, AppConfig};
use std::io::{self, Write};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leap_canvas=info,shape_pool=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Leap Canvas — Finger & Palm Visualizer              ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Simulated hands  (use --features leap for hardware)");
    println!();

    let cfg = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: 800×600, 60 fps redraw, dumps every 200 ms\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };

    info!(?cfg, "starting Leap Canvas v{}", env!("CARGO_PKG_VERSION"));
    println!("  Opening canvas window…  (Q or Esc to quit)");
    println!();

    std::process::exit(exit_status(&run(cfg)));
}

fn configure_interactively() -> AppConfig {
    let defaults = AppConfig::default();

    let width: usize = read_line("  Canvas width (default 800): ")
        .trim().parse::<usize>().unwrap_or(defaults.width).clamp(100, 3840);
    let height: usize = read_line("  Canvas height (default 600): ")
        .trim().parse::<usize>().unwrap_or(defaults.height).clamp(100, 2160);

    let fps: u64 = read_line("  Max redraws per second, 0 = every frame (default 60): ")
        .trim().parse::<u64>().unwrap_or(60).min(1000);
    let render_interval = if fps == 0 {
        Duration::ZERO
    } else {
        Duration::from_millis(1000 / fps)
    };

    let max_shapes = match read_line("  Shape cap, 0 = unlimited (default 0): ").trim().parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => None,
    };

    let dump_interval = match read_line("  Dump raw frames as JSON? [Y/n]: ").trim() {
        "n" | "N" | "no" => None,
        _ => defaults.dump_interval,
    };

    AppConfig {
        width,
        height,
        max_shapes,
        render_interval,
        dump_interval,
        ..defaults
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
