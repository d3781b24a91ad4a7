pub const USAGE: &str = "usage: font-sync [FONT_ID ...]

Downloads woff2 files for the given font ids, or for the configured font
list when none are given.

environment:
  FONT_SYNC_CONFIG      config file path
  FONT_SYNC_OUTPUT_DIR  output directory
  FONT_SYNC_REPORT      write the JSON sync report here
  FONT_SYNC_LOG         log level (default info)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Empty list means the configured fonts.
    Sync(Vec<String>),
    Help,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown option {0:?}")]
pub struct UsageError(pub String);

pub fn parse_args<I>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let mut fonts = Vec::new();
    for arg in args {
        if arg == "-h" || arg == "--help" {
            return Ok(Command::Help);
        }
        if arg.starts_with('-') {
            return Err(UsageError(arg));
        }
        fonts.push(arg);
    }
    Ok(Command::Sync(fonts))
}
