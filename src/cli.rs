use clap::Parser;
use std::path::PathBuf;

// Build version with engine info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Engine: null (simulated clock)\n",
    "Target: ",
    std::env::consts::ARCH,
    "-",
    std::env::consts::OS
);

/// Desktop media player
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Media file or URL to open on startup - optional, can also drag-and-drop
    #[arg(value_name = "MEDIA")]
    pub media: Option<String>,

    /// Additional files appended to the playlist (can be specified multiple times)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Start in fullscreen mode
    #[arg(short = 'F', long = "fullscreen")]
    pub fullscreen: bool,

    /// Start playback immediately after opening
    #[arg(short = 'a', long = "autoplay")]
    pub autoplay: bool,

    /// Initial volume, 0-100
    #[arg(long = "volume", value_name = "PERCENT")]
    pub volume: Option<i32>,

    /// Simulated media length in seconds for sources without a real stream
    #[arg(long = "media-length", value_name = "SECONDS", hide = true)]
    pub media_length: Option<u64>,

    /// Enable debug logging to file (default: vidra.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}
