// SPDX-License-Identifier: MPL-2.0
use image_search_view::app::runtime::{self, RuntimeOptions};
use image_search_view::app::{paths, Flags, ImageSearchView, SystemClipboard};
use image_search_view::bridge::output;
use image_search_view::config::{self, Config};
use image_search_view::error::Result;
use image_search_view::i18n::fluent::I18n;
use image_search_view::metadata::HostResponder;
use image_search_view::ui::notice::NoticeKind;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
image-search-view

USAGE:
  image-search-view [OPTIONS] PAYLOAD

PAYLOAD is the gallery JSON (optionally marker-prefixed) or a file holding it.
Host messages are read from stdin and written to stdout, one JSON per line.

OPTIONS:
  --lang LOCALE        Interface language (e.g. en-US, fr)
  --config-dir DIR     Directory holding settings.toml
  --node-id ID         Host node receiving the selection
  --host URL           Answer metadata requests against this host
  --once               Print the initial render and exit
  --resolve FIELD      Print the files a stored selection points at and exit
  -h, --help           Print help
";

/// Log filter, taken from `IMAGE_SEARCH_VIEW_LOG` then `RUST_LOG`.
const LOG_ENV: &str = "IMAGE_SEARCH_VIEW_LOG";

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    Ok(Some(Flags {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        node_id: args.opt_value_from_str("--node-id")?,
        host: args.opt_value_from_str("--host")?,
        once: args.contains("--once"),
        resolve: args.opt_value_from_str("--resolve")?,
        payload: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    }))
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the host file of every item in a stored selection field.
fn resolve_selection(field: &str, config: &Config) -> Result<()> {
    let decoded = output::decode_output(field.trim())?;
    for path in decoded.resolve_selected(&config.host_folders()) {
        println!("{}", path.display());
    }
    Ok(())
}

/// Reads the payload argument, which is either inline JSON or a file path.
fn read_payload(arg: Option<String>) -> Result<String> {
    let Some(arg) = arg else {
        return Ok(String::new());
    };
    let path = Path::new(&arg);
    if path.is_file() {
        return Ok(std::fs::read_to_string(path)?);
    }
    Ok(arg)
}

fn main() -> Result<()> {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("Error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    init_logging();
    paths::init_cli_overrides(flags.config_dir);

    let (mut config, config_warning) = config::load();
    if let Some(host) = &flags.host {
        config.host.base_url = Some(host.clone());
    }
    if let Some(field) = flags.resolve {
        return resolve_selection(&read_payload(Some(field))?, &config);
    }

    let i18n = I18n::new(flags.lang, &config);
    let payload = read_payload(flags.payload)?;

    let mut view = ImageSearchView::new(&payload, &config, i18n);
    if config_warning.is_some() {
        view.push_notice(NoticeKind::ConfigLoadError);
    }

    if flags.once {
        println!("{}", runtime::render_once(&view)?);
        return Ok(());
    }

    let responder = flags
        .host
        .as_deref()
        .map(|host| HostResponder::new(host, config.metadata_endpoint()))
        .transpose()?;
    let options = RuntimeOptions {
        node_id: flags.node_id,
        metadata_timeout: config.metadata_timeout(),
        responder,
        clipboard: Arc::new(SystemClipboard),
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(runtime::run(
        view,
        options,
        tokio::io::BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    ))
}
