use std::collections::HashMap;

use clap::{ArgAction, CommandFactory, Parser};

/// Define CLI arguments
///
/// The short flags mirror the classic single-letter surface of HLS
/// downloaders, so `-h` is the custom-header flag and the built-in help
/// short flag is disabled; `--help` stays available.
#[derive(Parser, Debug)]
#[command(
    name = "hlsget",
    version,
    author = "hlsget contributors",
    about = "HLS (HTTP Live Streaming) downloader",
    disable_help_flag = true,
    help_template = "{name} {version}\n{author-with-newline}{about-with-newline}\n{usage-heading} {usage}\n\n{all-args}"
)]
pub struct CliArgs {
    /// Media playlist or master playlist URL
    #[arg(value_name = "URL")]
    pub url: String,

    #[arg(short = 'b', long = "best", help = "Automatically choose the best quality")]
    pub use_best: bool,

    #[arg(
        short = 'W',
        long = "max-width",
        value_name = "WIDTH",
        default_value_t = 0,
        help = "Choose the largest width lower or equal than this"
    )]
    pub max_width: u32,

    #[arg(
        short = 'H',
        long = "max-height",
        value_name = "HEIGHT",
        default_value_t = 0,
        help = "Choose the largest height lower or equal than this"
    )]
    pub max_height: u32,

    #[arg(short = 'A', long = "audio-lang", value_name = "LANG", help = "Select audio language")]
    pub audio_language: Option<String>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help = "Print more information (repeatable)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        action = ArgAction::Count,
        help = "Print less to the console (repeatable)"
    )]
    pub quiet: u8,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Name of the output file (\"-\" is an alias for stdout)"
    )]
    pub output: Option<String>,

    #[arg(
        short = 'O',
        long = "keep-fragments",
        value_name = "NAME",
        help = "Keep fragment files instead of assembling a single output file"
    )]
    pub keep_fragments: Option<String>,

    #[arg(
        short = 'u',
        long = "user-agent",
        value_name = "AGENT",
        help = "Custom HTTP User-Agent header"
    )]
    pub user_agent: Option<String>,

    #[arg(
        short = 'h',
        long = "header",
        value_name = "HEADER",
        action = ArgAction::Append,
        help = "Custom HTTP header (repeatable, the first 256 are kept)"
    )]
    pub headers: Vec<String>,

    #[arg(short = 'p', long = "proxy", value_name = "URI", help = "Proxy uri")]
    pub proxy_uri: Option<String>,

    #[arg(
        short = 'k',
        long = "key-uri-old",
        value_name = "STR",
        help = "Replace this part of the AES key uri"
    )]
    pub key_uri_replace_old: Option<String>,

    #[arg(
        short = 'n',
        long = "key-uri-new",
        value_name = "STR",
        help = "Replacement for the part of the AES key uri selected with -k"
    )]
    pub key_uri_replace_new: Option<String>,

    #[arg(short = 'f', long = "force-overwrite", help = "Force overwriting the output file")]
    pub force_overwrite: bool,

    #[arg(short = 'F', long = "ignore-drm", help = "Force ignore detection of DRM")]
    pub force_ignore_drm: bool,

    #[arg(
        short = 'K',
        long = "key",
        value_name = "HEX",
        help = "Force the AES key value (32 character hexstring)"
    )]
    pub key_value: Option<String>,

    #[arg(
        short = 'd',
        long = "dump-dec-cmd",
        help = "Print the openssl decryption commands instead of processing files"
    )]
    pub dump_dec_cmd: bool,

    #[arg(short = 't', long = "dump-ts-urls", help = "Print the links to the .ts files")]
    pub dump_ts_urls: bool,

    #[arg(
        short = 's',
        long = "live-start-offset",
        value_name = "SEC",
        default_value_t = 0,
        help = "Live start offset in seconds"
    )]
    pub live_start_offset_sec: i64,

    #[arg(
        short = 'i',
        long = "live-duration",
        value_name = "SEC",
        default_value_t = 0,
        help = "Live stream download duration in seconds"
    )]
    pub live_duration_sec: u64,

    #[arg(
        short = 'I',
        long = "ignore-playlist-url",
        value_name = "NUM",
        default_value_t = 0,
        help = "Ignore the playlist url (for getting files from a local folder)"
    )]
    pub ignore_playlist_url: i32,

    #[arg(
        short = 'e',
        long = "refresh-delay",
        value_name = "SEC",
        default_value_t = 0,
        help = "Playlist refresh delay in seconds"
    )]
    pub refresh_delay_sec: u64,

    #[arg(
        short = 'r',
        long = "open-retries",
        value_name = "NUM",
        default_value_t = 0,
        help = "Max retries at open"
    )]
    pub open_max_retries: u32,

    #[arg(
        short = 'w',
        long = "segment-retries",
        value_name = "NUM",
        default_value_t = 0,
        help = "Max download retries per segment"
    )]
    pub segment_retries: u32,

    #[arg(
        short = 'a',
        long = "audio-url",
        value_name = "URL",
        help = "Additional url to the audio media playlist"
    )]
    pub audio_url: Option<String>,

    #[arg(
        short = 'c',
        long = "accept-partial",
        help = "Treat HTTP code 206 as 200 even if the request was made without a range header"
    )]
    pub accept_partial_content: bool,

    #[arg(
        short = 'C',
        long = "cookie-file",
        value_name = "FILE",
        help = "File holding cookie data in the Netscape/Mozilla format"
    )]
    pub cookie_file: Option<String>,

    #[arg(long, action = ArgAction::Help, help = "Print help")]
    pub help: Option<bool>,
}

impl CliArgs {
    /// Net log verbosity from repeated -v/-q flags.
    ///
    /// Each counter saturates at 255 repetitions of its flag, far past any
    /// level the log subscriber distinguishes.
    pub fn verbosity(&self) -> i32 {
        i32::from(self.verbose) - i32::from(self.quiet)
    }
}

/// All option tokens in `argv` (without the program name) that no declared
/// flag matches, in order.
///
/// getopt-style scan: every unknown option in the vector is collected, not
/// just the first one the parser trips over. Values of known value-taking
/// options are skipped, including an option-shaped next token, and short
/// flags are unpacked from clusters.
pub fn unknown_options<'a>(argv: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut cmd = CliArgs::command();
    // Materializes the auto-generated version flag before introspection.
    cmd.build();
    let mut shorts: HashMap<char, bool> = HashMap::new();
    let mut longs: HashMap<&str, bool> = HashMap::new();
    for arg in cmd.get_arguments() {
        if arg.is_positional() {
            continue;
        }
        let takes_value = arg.get_action().takes_values();
        if let Some(short) = arg.get_short() {
            shorts.insert(short, takes_value);
        }
        if let Some(long) = arg.get_long() {
            longs.insert(long, takes_value);
        }
    }

    let mut unknown = Vec::new();
    let mut iter = argv.into_iter();
    while let Some(token) = iter.next() {
        if token == "--" {
            break;
        }
        if let Some(rest) = token.strip_prefix("--") {
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            match longs.get(name) {
                Some(true) if !rest.contains('=') => {
                    iter.next();
                }
                Some(_) => {}
                None => unknown.push(token.to_string()),
            }
        } else if token.len() > 1 && token.starts_with('-') {
            let mut chars = token[1..].chars();
            while let Some(c) = chars.next() {
                match shorts.get(&c) {
                    Some(true) => {
                        // The rest of the cluster, or the next token, is
                        // this option's value.
                        if chars.as_str().is_empty() {
                            iter.next();
                        }
                        break;
                    }
                    Some(false) => {}
                    None => unknown.push(format!("-{c}")),
                }
            }
        }
    }
    unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_unknown_option_is_collected() {
        assert_eq!(
            unknown_options(["-Z", "-Y", "https://example.com/a.m3u8"]),
            vec!["-Z", "-Y"]
        );
    }

    #[test]
    fn known_options_and_their_values_are_skipped() {
        assert!(unknown_options(["-W", "640", "-b", "https://example.com/a.m3u8"]).is_empty());
        // -u consumes the option-shaped token after it as a value
        assert!(unknown_options(["-u", "-Z", "https://example.com/a.m3u8"]).is_empty());
        // value attached to the short flag
        assert!(unknown_options(["-W640", "https://example.com/a.m3u8"]).is_empty());
    }

    #[test]
    fn unknown_short_inside_a_cluster() {
        assert_eq!(unknown_options(["-bZ", "https://example.com/a.m3u8"]), vec!["-Z"]);
    }

    #[test]
    fn long_options_are_checked_too() {
        assert_eq!(
            unknown_options(["--bogus", "--best", "https://example.com/a.m3u8"]),
            vec!["--bogus"]
        );
        assert!(unknown_options(["--max-width", "640", "u"]).is_empty());
        assert!(unknown_options(["--max-width=640", "u"]).is_empty());
    }

    #[test]
    fn bare_dash_is_a_positional() {
        // "-o -" writes to stdout; "-" alone is never an option
        assert!(unknown_options(["-o", "-", "https://example.com/a.m3u8"]).is_empty());
        assert!(unknown_options(["-", "x"]).is_empty());
    }
}
