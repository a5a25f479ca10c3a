//! Clap derive structures for the `huectl` CLI.
//!
//! Also compiled by `build.rs` for man page generation, so this file may
//! only depend on clap, clap_complete and humantime.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// huectl -- control Philips Hue lights over the CLIP v2 API
#[derive(Debug, Parser)]
#[command(
    name = "huectl",
    version,
    about = "Control Philips Hue lights from the command line",
    long_about = "A thin client for the Philips Hue bridge CLIP v2 API.\n\n\
        Looks up devices by name, switches and dims lights, sets color and\n\
        color temperature, toggles entertainment streaming and runs small\n\
        demo animations.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the YAML config file
    #[arg(long, short = 'C', env = "HUECTL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Bridge address, host or host:port (overrides the config file)
    #[arg(long, short = 'a', env = "HUECTL_ADDRESS", global = true)]
    pub address: Option<String>,

    /// Hue application key (overrides the config file)
    #[arg(long, env = "HUECTL_APP_KEY", global = true, hide_env_values = true)]
    pub app_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HUECTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, env = "HUECTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect devices known to the bridge
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Read light state
    Lights(LightsArgs),

    /// Change the state of one light
    #[command(alias = "l")]
    Light(LightArgs),

    /// Start or stop entertainment streaming
    #[command(alias = "ent")]
    Entertainment(EntertainmentArgs),

    /// Run demo animations
    Demo(DemoArgs),

    /// Bridge information
    #[command(alias = "sys")]
    System(SystemArgs),

    /// Show the effective configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List catalogued devices
    #[command(alias = "ls")]
    List {
        /// Only show devices of this archetype
        #[arg(long, short = 't')]
        archetype: Option<String>,
    },

    /// Show one device by name
    Get {
        /// Device name
        name: String,
    },

    /// List device names of one archetype
    Names {
        /// Archetype to match
        #[arg(default_value = "sultan_bulb")]
        archetype: String,
    },

    /// Look up the id of a device's service
    Rid {
        /// Device name
        name: String,

        /// Service type
        #[arg(long, short = 't', default_value = "light")]
        rtype: String,
    },
}

// ── Lights ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LightsArgs {
    #[command(subcommand)]
    pub command: LightsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LightsCommand {
    /// List all light services with their state
    #[command(alias = "ls")]
    List,

    /// Show one light
    Get(LightTargetArgs),
}

/// Which light to address: a device name or a light service id.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct LightTargetArgs {
    /// Device name
    pub name: Option<String>,

    /// Light service id
    #[arg(long)]
    pub rid: Option<String>,
}

#[derive(Debug, Args)]
pub struct LightArgs {
    #[command(subcommand)]
    pub command: LightCommand,
}

#[derive(Debug, Subcommand)]
pub enum LightCommand {
    /// Switch a light on
    On(LightTargetArgs),

    /// Switch a light off
    Off(LightTargetArgs),

    /// Set brightness, clamped to 0-100
    Dim {
        #[command(flatten)]
        target: LightTargetArgs,

        /// Brightness in percent
        #[arg(long, short = 'b', allow_negative_numbers = true)]
        brightness: f64,
    },

    /// Set color temperature, clamped to 153-500 mirek
    Temp {
        #[command(flatten)]
        target: LightTargetArgs,

        /// Color temperature in mirek
        #[arg(long, short = 'm', allow_negative_numbers = true)]
        mirek: i64,
    },

    /// Set xy color; coordinates above 1 are capped
    Color {
        #[command(flatten)]
        target: LightTargetArgs,

        #[command(flatten)]
        xy: XyArgs,
    },

    /// Send a raw JSON body unchanged
    Set {
        #[command(flatten)]
        target: LightTargetArgs,

        #[command(flatten)]
        body: BodyArgs,
    },
}

/// CIE xy chromaticity. Both coordinates or neither.
#[derive(Debug, Args)]
pub struct XyArgs {
    /// x coordinate
    #[arg(long, requires = "y", allow_negative_numbers = true)]
    pub x: Option<f64>,

    /// y coordinate
    #[arg(long, requires = "x", allow_negative_numbers = true)]
    pub y: Option<f64>,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct BodyArgs {
    /// JSON body inline
    #[arg(long)]
    pub body: Option<String>,

    /// Read the JSON body from a file
    #[arg(long = "from-file", short = 'F')]
    pub from_file: Option<PathBuf>,
}

// ── Entertainment ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EntertainmentArgs {
    #[command(subcommand)]
    pub command: EntertainmentCommand,
}

#[derive(Debug, Subcommand)]
pub enum EntertainmentCommand {
    /// List entertainment configurations
    #[command(alias = "ls")]
    List,

    /// Start streaming
    Start(EntertainmentTargetArgs),

    /// Stop streaming
    Stop(EntertainmentTargetArgs),
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct EntertainmentTargetArgs {
    /// Configuration name
    pub name: Option<String>,

    /// Configuration id
    #[arg(long)]
    pub id: Option<String>,
}

// ── Demo ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DemoArgs {
    #[command(subcommand)]
    pub command: DemoCommand,
}

#[derive(Debug, Subcommand)]
pub enum DemoCommand {
    /// Same random state on every light, once per iteration
    RandomSync(RandomArgs),

    /// A different random state per light, addressed by name
    RandomLights(RandomArgs),

    /// A different random state per light, addressed by light id
    RandomByRid(RandomArgs),

    /// Ramp brightness up and down
    Bounce(BounceArgs),
}

#[derive(Debug, Args)]
pub struct AnimationArgs {
    /// Number of iterations
    #[arg(long, short = 'n', default_value_t = 10)]
    pub iterations: u32,

    /// Pause between iterations, e.g. `500ms` or `2s`
    #[arg(long, short = 's', value_parser = humantime::parse_duration)]
    pub sleep: Option<Duration>,

    /// Archetype of the participating lights
    #[arg(long, short = 't', default_value = "sultan_bulb")]
    pub archetype: String,

    /// Explicit device names (repeatable); overrides --archetype
    #[arg(long = "name", short = 'N')]
    pub names: Vec<String>,
}

#[derive(Debug, Args)]
pub struct RandomArgs {
    #[command(flatten)]
    pub animation: AnimationArgs,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct BounceArgs {
    #[command(flatten)]
    pub animation: AnimationArgs,

    /// Brightness step per iteration
    #[arg(long, short = 'i', default_value_t = 1.0)]
    pub increment: f64,

    // fixed color sent with every step
    #[command(flatten)]
    pub xy: XyArgs,
}

// ── System ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SystemArgs {
    #[command(subcommand)]
    pub command: SystemCommand,
}

#[derive(Debug, Subcommand)]
pub enum SystemCommand {
    /// Bridge name, model and software versions
    Version,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged settings (application key redacted)
    Show,

    /// Print the config file location
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
