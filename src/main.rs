use std::process::exit;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod config;
mod error;
mod utils;

use cli::CliArgs;
use config::HlsConfig;

fn log_level(verbosity: i32) -> Level {
    match verbosity {
        i32::MIN..=-2 => Level::ERROR,
        -1 => Level::WARN,
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Report every unknown option in the vector, getopt-style, not
            // just the first one clap stopped at.
            let argv: Vec<String> = std::env::args().skip(1).collect();
            let unknown = cli::unknown_options(argv.iter().map(String::as_str));
            if unknown.len() > 1 {
                for opt in &unknown {
                    eprintln!("error: unknown option '{opt}'");
                }
            } else {
                e.print().ok();
            }
            // Every fatal path ends in the full usage text.
            eprintln!();
            CliArgs::command().print_help().ok();
            exit(1);
        }
    };

    // Setup logging before the validation pass so its diagnostics are visible
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(args.verbosity()))
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let config = match HlsConfig::from_cli(args) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            CliArgs::command().print_help().ok();
            exit(1);
        }
    };

    info!("source playlist: {}", config.url);
    if !utils::ends_with(&config.url, ".m3u8") && !utils::ends_with(&config.url, ".m3u") {
        debug!("source url has no playlist suffix, relying on the response content type");
    }
    if let Some(audio_url) = &config.audio_url {
        info!("audio playlist: {audio_url}");
    }

    if config.use_best {
        info!("quality selection: best available");
    } else if config.max_width > 0 || config.max_height > 0 {
        info!(
            "quality selection: largest variant within {}x{}",
            config.max_width, config.max_height
        );
    }

    if config.writes_to_stdout() {
        info!("writing to stdout");
    } else if let Some(path) = config.output_path.as_deref() {
        if utils::file_exists(path) && !config.force_overwrite {
            warn!("output file '{path}' already exists, pass -f to overwrite");
        }
        info!("output file: {path}");
    }

    if let (Some(old), Some(new)) = (
        config.key_uri_replace_old.as_deref(),
        config.key_uri_replace_new.as_deref(),
    ) {
        debug!("AES key uri rewrite: '{old}' -> '{new}'");
        if config.url.contains(old) {
            debug!(
                "rewrite also matches the source url: '{}'",
                utils::replace_all(&config.url, old, new)
            );
        }
    }

    if config.dump_ts_urls {
        info!("dump mode: segment urls only, nothing will be downloaded");
    }
    if config.dump_dec_cmd {
        info!("dump mode: decryption commands only, files will not be processed");
    }

    debug!(?config, "resolved configuration");

    // The download pipeline takes over from here with a read-only view of
    // the configuration.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_usage_text_lists_the_flag_table() {
        let mut cmd = CliArgs::command();
        let help = cmd.render_help().to_string();
        // banner
        assert!(help.contains("hlsget"));
        for flag in [
            "--key",
            "--max-width",
            "--max-height",
            "--header",
            "--cookie-file",
            "--segment-retries",
            "--keep-fragments",
        ] {
            assert!(help.contains(flag), "usage text is missing {flag}");
        }
    }

    #[test]
    fn token_errors_are_not_mistaken_for_help_requests() {
        for argv in [
            vec!["hlsget"],
            vec!["hlsget", "a.m3u8", "b.m3u8"],
            vec!["hlsget", "-Z", "https://example.com/a.m3u8"],
        ] {
            let err = CliArgs::try_parse_from(argv).unwrap_err();
            assert!(!matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ));
        }
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(log_level(-3), Level::ERROR);
        assert_eq!(log_level(-1), Level::WARN);
        assert_eq!(log_level(0), Level::INFO);
        assert_eq!(log_level(1), Level::DEBUG);
        assert_eq!(log_level(4), Level::TRACE);
    }
}
