use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use soltrack_core::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "soltrack")]
#[command(about = "Sun exposure and vitamin D tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current UV estimate, sun window and vitamin D progress (default)
    Status,

    /// Show the 8-hour UV forecast
    Forecast,

    /// Run an exposure session and bank the vitamin D gain
    Session {
        /// Simulate a fixed-length session instead of running live
        #[arg(long)]
        duration: Option<u32>,
    },

    /// Edit tracked settings
    Set {
        /// Location used for UV estimation
        #[arg(long)]
        location: Option<String>,

        /// Clothing preset (minimal, light, moderate, covered)
        #[arg(long)]
        clothing: Option<ClothingPreset>,

        /// Sunscreen preset (none, spf15, spf30, spf50)
        #[arg(long)]
        sunscreen: Option<SunscreenPreset>,

        /// Daily vitamin D goal in IU
        #[arg(long)]
        goal: Option<String>,
    },

    /// Adjust accumulated vitamin D progress
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },

    /// List recent exposure sessions from the journal
    Log {
        /// Maximum number of sessions to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Export the session journal to CSV
    Export {
        /// Output CSV path
        #[arg(long)]
        output: PathBuf,
    },

    /// Show the clothing and sunscreen attenuation guide
    Presets,
}

#[derive(Subcommand)]
enum ProgressAction {
    /// Add IU to progress
    Add {
        #[arg(default_value_t = 100.0)]
        amount: f64,
    },
    /// Subtract IU from progress (floors at 0)
    Sub {
        #[arg(default_value_t = 100.0)]
        amount: f64,
    },
    /// Reset progress to 0
    Reset,
}

fn main() -> Result<()> {
    // Initialize logging
    soltrack_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::Status) | None => cmd_status(&data_dir, &config),
        Some(Commands::Forecast) => cmd_forecast(&data_dir, &config),
        Some(Commands::Session { duration }) => cmd_session(&data_dir, &config, duration),
        Some(Commands::Set {
            location,
            clothing,
            sunscreen,
            goal,
        }) => cmd_set(&data_dir, &config, location, clothing, sunscreen, goal),
        Some(Commands::Progress { action }) => cmd_progress(&data_dir, &config, action),
        Some(Commands::Log { limit }) => cmd_log(&data_dir, limit),
        Some(Commands::Export { output }) => cmd_export(&data_dir, &output),
        Some(Commands::Presets) => cmd_presets(),
    }
}

/// The one startup load of the durable slot. Nothing is rendered before
/// this returns, so defaults never flash ahead of real state.
fn load_state(data_dir: &Path, config: &Config) -> Result<TrackerState> {
    let slot = state_path(data_dir);
    let first_run = !slot.exists();
    let mut state = TrackerState::load(&slot)?;
    if first_run {
        state.location = config.tracker.default_location.clone();
    }
    Ok(state)
}

fn cmd_status(data_dir: &Path, config: &Config) -> Result<()> {
    let state = load_state(data_dir, config)?;
    let now = Local::now().naive_local();

    let base_uv = derive_base_uv(&state.location, now);
    let risk = risk_level(base_uv);
    let window = derive_sun_window(&state.location);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  SOLTRACK — {}", state.location);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  UV index:  {:.1} ({})", base_uv, risk);
    println!("  Sunrise:   {}", window.sunrise);
    println!("  Sunset:    {}", window.sunset);
    println!();
    println!(
        "  Clothing:  {}   Sunscreen: {}",
        state.clothing.label(),
        state.sunscreen.label()
    );
    println!();
    println!(
        "  Vitamin D: {:.0} / {:.0} IU",
        state.vitamin_progress, state.vitamin_goal
    );
    println!(
        "  [{}] {:.0}%",
        progress_bar(state.goal_fraction(), 24),
        state.goal_fraction() * 100.0
    );
    println!();

    Ok(())
}

fn cmd_forecast(data_dir: &Path, config: &Config) -> Result<()> {
    let state = load_state(data_dir, config)?;
    let now = Local::now().naive_local();

    let base_uv = derive_base_uv(&state.location, now);
    let entries = generate_forecast(base_uv, now);

    println!("\n  8-hour UV forecast for {}:\n", state.location);
    for entry in &entries {
        println!(
            "  {:>4}  {:>4.1}  {}",
            entry.hour_label,
            entry.uv_index,
            risk_level(entry.uv_index)
        );
    }
    println!();

    Ok(())
}

fn cmd_session(data_dir: &Path, config: &Config, duration: Option<u32>) -> Result<()> {
    let slot = state_path(data_dir);
    let mut state = load_state(data_dir, config)?;
    let now = Local::now().naive_local();

    let base_uv = derive_base_uv(&state.location, now);
    println!(
        "\n  Starting exposure session in {} (UV {:.1}, {}, {})",
        state.location,
        base_uv,
        state.clothing.label(),
        state.sunscreen.label()
    );

    let started_at = Utc::now();
    let mut timer = SessionTimer::new();
    timer.start();

    match duration {
        Some(seconds) => {
            // Simulated session for scripting: no real-time waiting
            for _ in 0..seconds {
                timer.tick();
            }
        }
        None => run_live(&mut timer)?,
    }

    let Some(elapsed) = timer.stop() else {
        // Timer already stopped; nothing to commit
        return Ok(());
    };

    // A session that never ticked commits nothing: no state write, no
    // journal entry
    if elapsed == 0 {
        println!("\n  Session stopped at 0s, nothing to log.");
        return Ok(());
    }

    let gain = calculate_exposure_gain(elapsed, base_uv, state.clothing, state.sunscreen);

    state.add_progress(gain.vitamin_gain);
    state.store(&slot);

    let session = ExposureSession {
        id: uuid::Uuid::new_v4(),
        location: state.location.clone(),
        started_at,
        completed_at: Utc::now(),
        elapsed_seconds: elapsed,
        base_uv,
        effective_uv: gain.effective_uv,
        clothing: state.clothing,
        sunscreen: state.sunscreen,
        vitamin_gain: gain.vitamin_gain,
    };

    let mut sink = JsonlSink::new(journal::journal_path(data_dir));
    sink.append(&session)?;

    println!(
        "\n✓ Session logged: {}s, effective UV {:.2}, +{:.1} IU",
        elapsed, gain.effective_uv, gain.vitamin_gain
    );
    println!(
        "  Vitamin D: {:.0} / {:.0} IU ({:.0}%)",
        state.vitamin_progress,
        state.vitamin_goal,
        state.goal_fraction() * 100.0
    );

    Ok(())
}

/// Drive the timer at ~1 Hz until the user presses Enter.
///
/// The tick schedule lives only inside this function: the moment the stop
/// signal arrives the loop exits, so no tick can land after the session
/// leaves its running phase.
fn run_live(timer: &mut SessionTimer) -> Result<()> {
    println!("  Press Enter to stop.\n");

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut input = String::new();
        let _ = io::stdin().read_line(&mut input);
        let _ = tx.send(());
    });

    while timer.is_running() {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Err(mpsc::RecvTimeoutError::Timeout) => {
                timer.tick();
                print!("\r  {}s elapsed", timer.elapsed_seconds());
                io::stdout().flush()?;
            }
            // Enter pressed or stdin closed: stop ticking immediately
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
    println!();

    Ok(())
}

fn cmd_set(
    data_dir: &Path,
    config: &Config,
    location: Option<String>,
    clothing: Option<ClothingPreset>,
    sunscreen: Option<SunscreenPreset>,
    goal: Option<String>,
) -> Result<()> {
    let slot = state_path(data_dir);
    let mut state = load_state(data_dir, config)?;

    if let Some(location) = location {
        state.location = location;
    }
    if let Some(clothing) = clothing {
        state.clothing = clothing;
    }
    if let Some(sunscreen) = sunscreen {
        state.sunscreen = sunscreen;
    }
    if let Some(goal) = goal {
        // Non-numeric input coerces to 0, it is not rejected
        state.vitamin_goal = goal.parse::<f64>().unwrap_or(0.0);
    }

    state.store(&slot);

    println!(
        "✓ Settings saved: {} / {} / {} / goal {:.0} IU",
        state.location, state.clothing, state.sunscreen, state.vitamin_goal
    );

    Ok(())
}

fn cmd_progress(data_dir: &Path, config: &Config, action: ProgressAction) -> Result<()> {
    let slot = state_path(data_dir);
    let mut state = load_state(data_dir, config)?;

    match action {
        ProgressAction::Add { amount } => state.add_progress(amount),
        ProgressAction::Sub { amount } => state.add_progress(-amount),
        ProgressAction::Reset => state.vitamin_progress = 0.0,
    }

    state.store(&slot);

    println!(
        "✓ Vitamin D: {:.0} / {:.0} IU ({:.0}%)",
        state.vitamin_progress,
        state.vitamin_goal,
        state.goal_fraction() * 100.0
    );

    Ok(())
}

fn cmd_log(data_dir: &Path, limit: usize) -> Result<()> {
    let sessions = journal::read_sessions(&journal::journal_path(data_dir))?;

    if sessions.is_empty() {
        println!("No sessions logged yet.");
        return Ok(());
    }

    println!("\n  Recent exposure sessions:\n");
    for session in sessions.iter().rev().take(limit) {
        println!(
            "  {}  {:>5}s  UV {:>4.1} → {:>4.2}  +{:>6.1} IU  {}",
            session.completed_at.format("%Y-%m-%d %H:%M"),
            session.elapsed_seconds,
            session.base_uv,
            session.effective_uv,
            session.vitamin_gain,
            session.location
        );
    }
    println!();

    Ok(())
}

fn cmd_export(data_dir: &Path, output: &Path) -> Result<()> {
    let count = journal::export_csv(&journal::journal_path(data_dir), output)?;

    if count == 0 {
        println!("No sessions to export.");
    } else {
        println!("✓ Exported {} sessions to {}", count, output.display());
    }

    Ok(())
}

fn cmd_presets() -> Result<()> {
    println!("\n  Clothing presets:\n");
    for row in presets::CLOTHING_GUIDE.iter() {
        println!("  {:<10} ×{:.1}  {}", row.id, row.attenuation, row.label);
    }

    println!("\n  Sunscreen presets:\n");
    for row in presets::SUNSCREEN_GUIDE.iter() {
        println!("  {:<10} ×{:.1}  {}", row.id, row.attenuation, row.label);
    }
    println!();

    Ok(())
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
