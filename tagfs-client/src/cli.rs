use clap::{Args, Parser};

const VERSION: &str = concat!("(TagFS) v", env!("CARGO_PKG_VERSION"));
const LONG_VERSION: &str = concat!(
    "(TagFS) v",
    env!("CARGO_PKG_VERSION"),
    "\nCopyright (C) 2010 The TagFS authors"
);

/// Command line client of the tag-based distributed filesystem.
#[derive(Parser, Debug)]
#[command(author, version = VERSION, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub client: ClientArgs,
}

/// Raw client options as typed by the operator.
///
/// Address and data directory are optional here so the validation chain in
/// [`crate::config`] can report them with its own messages.
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// IP address of the interface used to reach the TagFS servers and to
    /// serve this client's own TagFS server.
    #[arg(short = 'i', long = "ip", value_name = "IP")]
    pub address: Option<String>,

    /// Directory used to keep the files stored by the TagFS server run by
    /// this client.
    #[arg(short = 'd', long = "data-dir", value_name = "DIRECTORY")]
    pub data_dir: Option<String>,

    /// Storage capacity of the TagFS server run by this client, in bytes,
    /// optionally followed by a K, M or G suffix.
    #[arg(
        short,
        long,
        value_name = "CAPACITY",
        default_value = "1G",
        allow_hyphen_values = true
    )]
    pub capacity: String,

    /// Replication percentage used during this session.
    #[arg(
        short,
        long,
        value_name = "PERCENTAGE",
        default_value_t = 25,
        value_parser = parse_percentage,
        allow_negative_numbers = true
    )]
    pub replication: i64,

    /// Time server used during synchronization (not required).
    #[arg(short = 't', long = "time-server", value_name = "SERVER")]
    pub time_server: Option<String>,
}

/// Reads any integer, saturating values beyond `i64` so the range check in
/// [`crate::config`] reports them instead of the parser.
fn parse_percentage(raw: &str) -> Result<i64, String> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{raw}' is not an integer"));
    }

    let saturated = if negative { i64::MIN } else { i64::MAX };
    Ok(trimmed.parse::<i64>().unwrap_or(saturated))
}
