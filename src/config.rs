use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::error::{ConfigError, OptionError};
use crate::utils::{decode_hex, encode_hex, file_exists};

/// AES-128 key length in bytes.
pub const KEY_LEN: usize = 16;

/// Upper bound on user-supplied custom HTTP headers.
pub const MAX_CUSTOM_HEADERS: usize = 256;

/// The validated, immutable download configuration.
///
/// Built once from the argument vector and handed read-only to the
/// download and decryption stages. `cookie_file_lock` is only declared
/// here; the download workers use it to serialize cookie file access.
#[derive(Debug, Clone)]
pub struct HlsConfig {
    pub log_verbosity: i32,

    pub use_best: bool,
    pub max_width: u32,
    pub max_height: u32,
    pub audio_language: Option<String>,

    pub output_path: Option<String>,
    pub keep_fragments: bool,
    pub force_overwrite: bool,

    pub force_ignore_drm: bool,
    pub raw_key: Option<[u8; KEY_LEN]>,

    pub user_agent: Option<String>,
    pub proxy_uri: Option<String>,
    pub cookie_file: Option<String>,
    pub cookie_file_lock: Arc<Mutex<()>>,
    pub accept_partial_content: bool,
    pub custom_headers: Vec<String>,

    pub live_start_offset_sec: i64,
    pub live_duration_sec: u64,
    pub ignore_playlist_url: i32,
    pub refresh_delay_sec: u64,

    pub open_max_retries: u32,
    pub segment_retries: u32,

    pub key_uri_replace_old: Option<String>,
    pub key_uri_replace_new: Option<String>,

    pub dump_ts_urls: bool,
    pub dump_dec_cmd: bool,

    pub url: String,
    pub audio_url: Option<String>,
}

impl HlsConfig {
    /// Semantic validation pass over the parsed argument vector.
    ///
    /// Errors accumulate instead of aborting, so every bad option value is
    /// reported in one run. clap has already handled token-level problems
    /// (unknown flags, missing values, positional count) before this point.
    pub fn from_cli(args: CliArgs) -> Result<Self, ConfigError> {
        let mut errors = Vec::new();

        // Resolved before `headers` is moved out of `args` below.
        let log_verbosity = args.verbosity();

        let raw_key = match args.key_value.as_deref() {
            Some(hexstring) => match decode_hex(hexstring, KEY_LEN) {
                Ok(bytes) => {
                    let mut key = [0u8; KEY_LEN];
                    key.copy_from_slice(&bytes);
                    info!("AES key value: {}", encode_hex(&key));
                    Some(key)
                }
                Err(e) => {
                    errors.push(OptionError::Key(e));
                    None
                }
            },
            None => None,
        };

        let mut custom_headers = args.headers;
        if custom_headers.len() > MAX_CUSTOM_HEADERS {
            debug!(
                "keeping the first {} custom headers, dropping {}",
                MAX_CUSTOM_HEADERS,
                custom_headers.len() - MAX_CUSTOM_HEADERS
            );
            custom_headers.truncate(MAX_CUSTOM_HEADERS);
        }

        if let Some(cookie_file) = args.cookie_file.as_deref() {
            if !file_exists(cookie_file) {
                warn!("cookie file '{cookie_file}' does not exist");
            }
        }

        if !errors.is_empty() {
            return Err(ConfigError::InvalidOptions(errors));
        }

        Ok(Self {
            log_verbosity,
            use_best: args.use_best,
            max_width: args.max_width,
            max_height: args.max_height,
            audio_language: args.audio_language,
            output_path: args.output,
            keep_fragments: args.keep_fragments.is_some(),
            force_overwrite: args.force_overwrite,
            force_ignore_drm: args.force_ignore_drm,
            raw_key,
            user_agent: args.user_agent,
            proxy_uri: args.proxy_uri,
            cookie_file: args.cookie_file,
            cookie_file_lock: Arc::new(Mutex::new(())),
            accept_partial_content: args.accept_partial_content,
            custom_headers,
            live_start_offset_sec: args.live_start_offset_sec,
            live_duration_sec: args.live_duration_sec,
            ignore_playlist_url: args.ignore_playlist_url,
            refresh_delay_sec: args.refresh_delay_sec,
            open_max_retries: args.open_max_retries,
            segment_retries: args.segment_retries,
            key_uri_replace_old: args.key_uri_replace_old,
            key_uri_replace_new: args.key_uri_replace_new,
            dump_ts_urls: args.dump_ts_urls,
            dump_dec_cmd: args.dump_dec_cmd,
            url: args.url,
            audio_url: args.audio_url,
        })
    }

    /// True when `-o -` selected standard output.
    pub fn writes_to_stdout(&self) -> bool {
        self.output_path.as_deref() == Some("-")
    }
}
