use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Shift-floor helper for the packaging line.
///
/// Picks the extra sample, keeps the test timers, and works out the
/// production day, lot code and label for the current shift.
#[derive(Parser, Debug)]
#[command(name = "opsfloor", version, about = "Shift-floor helper for the packaging line")]
pub struct CliArgs {
    /// Config profile (overrides OPSFLOOR_PROFILE)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Evaluate as if the local clock read this time ("YYYY-MM-DD HH:MM")
    #[arg(long, global = true)]
    pub at: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extra-sample rotation
    #[command(subcommand)]
    Rotation(RotationCommand),

    /// Shift test timers
    #[command(subcommand)]
    Timer(TimerCommand),

    /// 12-hour clock arithmetic
    #[command(subcommand)]
    Time(TimeCommand),

    /// Production day, labels and the peanut-test shift
    #[command(subcommand)]
    Production(ProductionCommand),

    /// Finished-product catalog
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// Take a sample: commit the next extra and print the sample record
    Sample(SampleArgs),
}

/// Active product list as shown on the floor.
#[derive(Args, Debug, Clone)]
pub struct ActiveArgs {
    /// Active product ids in display order
    #[arg(long, value_delimiter = ',')]
    pub active: Vec<String>,

    /// Active ids that are currently unavailable
    #[arg(long, value_delimiter = ',')]
    pub unavailable: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum RotationCommand {
    /// Pick the next extra and commit it
    Pick(ActiveArgs),
    /// Show what the next pick would be without committing
    Preview(ActiveArgs),
    /// Re-sequence progress after the active list changed
    Sync(ActiveArgs),
    /// Drag one product onto another's position, then sync
    Move {
        #[command(flatten)]
        list: ActiveArgs,
        #[arg(long)]
        dragged: String,
        #[arg(long)]
        target: String,
    },
    /// The extra to highlight when a session starts
    Restore(ActiveArgs),
    /// Print the stored rotation state
    Show,
    /// Forget all cycle progress
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum TimerCommand {
    /// Set a slot to a clock time
    Set { slot: String, time: String },
    /// Push a slot forward by its test interval (or --minutes)
    Advance {
        slot: String,
        #[arg(long, allow_negative_numbers = true)]
        minutes: Option<i64>,
    },
    /// Print every slot, what is due and what is next
    Status,
    /// Check for due timers until interrupted
    Watch {
        /// Seconds between checks (defaults to TIMER_CHECK_INTERVAL_SECS)
        #[arg(long)]
        interval: Option<u64>,
        /// Plan no chimes
        #[arg(long)]
        mute: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TimeCommand {
    /// Normalize raw input to HH:MM on a 12-hour face
    Normalize { raw: String },
    /// Which half of the day the next occurrence falls in
    Infer { time: String },
    /// Minutes past midnight
    Minutes { time: String, phase: String },
    /// Minutes until the next occurrence
    Until { time: String, phase: String },
    /// Add minutes, carrying AM/PM across noon and midnight
    Advance {
        time: String,
        phase: String,
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },
    /// Current clock face
    Face {
        #[arg(long)]
        seconds: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductionCommand {
    /// Production day, lot code, best-by and shift id
    Day {
        /// Also print the sampled-at timestamp for this hour (0-23)
        #[arg(long)]
        hour: Option<u32>,
    },
    /// Render the print label
    Label {
        /// HTML template (defaults to LABEL_TEMPLATE_FILE)
        #[arg(long)]
        template: Option<PathBuf>,
        #[arg(long)]
        lot_code: Option<String>,
        #[arg(long)]
        best_by: Option<String>,
    },
    /// This week's peanut-test shift
    Shift {
        /// Schedule JSON (defaults to SCHEDULE_FILE)
        #[arg(long)]
        schedule: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Replace the cached product rows with a JSON array export
    Import { path: PathBuf },
    /// Type-ahead search over the cached products
    Search { query: String },
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    #[command(flatten)]
    pub list: ActiveArgs,

    /// Hour code of the sample (defaults to the current hour)
    #[arg(long)]
    pub hour: Option<u32>,

    /// The active order was dragged since the last sample
    #[arg(long)]
    pub drag_reorder: bool,

    /// The extra was set by hand since the last sample
    #[arg(long)]
    pub manual_extra: bool,
}
