use std::io::Write;
use std::path::PathBuf;

use cmdset::cli::{self, output};
use cmdset::config::Settings;
use cmdset::errors::{DispatchError, FlagError};
use cmdset::flags::{ClapFlags, ErrorHandling, FlagSet};
use cmdset::util;
use cmdset::CommandSet;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Version injected at build time, falling back to the package version.
const BUILD_VERSION: Option<&str> = option_env!("CMDSET_VERSION");

/// Global flags; logging and colors are configured as soon as they are parsed.
struct GlobalFlags {
    inner: ClapFlags,
    settings: Settings,
}

impl GlobalFlags {
    fn colors_enabled(&self) -> bool {
        self.settings.color && !self.inner.get_flag("no-color")
    }
}

impl FlagSet for GlobalFlags {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn error_handling(&self) -> ErrorHandling {
        self.inner.error_handling()
    }

    fn parse(&mut self, arguments: &[String]) -> Result<Vec<String>, FlagError> {
        let rest = self.inner.parse(arguments)?;
        output::set_color(self.colors_enabled());
        setup_logging(self.settings.verbosity.max(self.inner.get_count("debug")));
        Ok(rest)
    }

    fn print_defaults(&self, out: &mut dyn Write) -> std::io::Result<()> {
        self.inner.print_defaults(out)
    }
}

fn main() {
    let explicit = util::env::lookup("CMDSET_CONFIG").ok().map(PathBuf::from);
    let settings = match Settings::load(explicit.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&e);
            std::process::exit(cmdset::exitcode::FAILURE);
        }
    };

    let mut version = BUILD_VERSION.unwrap_or_default().to_string();
    util::fix_version(&mut version, cmdset::build_version!());

    let mut commands = CommandSet::new().with_usage(cli::USAGE);
    cli::register(&mut commands, &settings, &version);

    let mut flags = GlobalFlags {
        inner: cli::global_flags(),
        settings,
    };
    let arguments: Vec<String> = std::env::args().skip(1).collect();
    // Flag errors and usage are already reported by dispatch.
    if let Err(e) = commands.parse(&mut flags, &arguments) {
        std::process::exit(DispatchError::from(e).exit_code());
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            output::warning("max verbosity is -ddd");
            LevelFilter::TRACE
        }
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    if let Err(e) = tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .try_init()
    {
        output::warning(&format!("cannot initialize logging: {e}"));
        return;
    }

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
