//! Two-phase command line handling.
//!
//! Phase one only looks at the mode tokens (`--feature` / `--list-features`)
//! so that an analysis's own options are not rejected before we know which
//! analysis they belong to. Phase two parses the whole argv strictly against
//! the global options plus the selected analysis's options.

use std::path::Path;

use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};

use crate::analysis::{Analysis, RunContext};
use crate::cli_context::CliContext;
use crate::config::Config;
use crate::constants::{APP_NAME, DATA_PATH_PARAM, DEFAULT_DATA_PATH};
use crate::error::{LensError, LensResult};
use crate::formatting::write_feature_listing;
use crate::logging::{log_debug, log_info};
use crate::registry::FeatureRegistry;

const ABOUT: &str = "Analyze exported issue tracker data and chart the results";

/// Which of the two top-level modes the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Run(u32),
}

/// Pick the tokens phase one cares about out of `argv`, program name first.
///
/// Help and version flags are kept only when no feature is selected; with a
/// feature they are left for phase two so the help shows that feature's
/// options.
pub fn split_mode_args(argv: &[String]) -> Vec<String> {
    let mut tokens = argv.iter();
    let mut mode: Vec<String> = tokens.next().cloned().into_iter().collect();
    let mut informational = Vec::new();
    let mut has_feature = false;

    while let Some(token) = tokens.next() {
        match token.as_str() {
            "--" => break,
            "--feature" | "-f" => {
                has_feature = true;
                mode.push(token.clone());
                if let Some(value) = tokens.next() {
                    mode.push(value.clone());
                }
            }
            "--list-features" | "-l" => mode.push(token.clone()),
            "-h" | "--help" | "-V" | "--version" => informational.push(token.clone()),
            other if other.starts_with("--feature=") || is_attached_short(other) => {
                has_feature = true;
                mode.push(token.clone());
            }
            _ => {}
        }
    }

    if !has_feature {
        mode.extend(informational);
    }
    mode
}

// `-f3`
fn is_attached_short(token: &str) -> bool {
    token.len() > 2 && token.starts_with("-f") && !token.starts_with("--")
}

fn feature_arg() -> Arg {
    Arg::new("feature")
        .short('f')
        .long("feature")
        .value_name("ID")
        .value_parser(value_parser!(u32))
        .help("Run the analysis with this feature id")
}

fn global_args() -> [Arg; 2] {
    [
        Arg::new(DATA_PATH_PARAM)
            .long("data-path")
            .value_name("PATH")
            .help(format!(
                "Issue export to analyze (default: {})",
                DEFAULT_DATA_PATH
            )),
        Arg::new("config")
            .long("config")
            .value_name("PATH")
            .help("JSON config file (default: ./config.json)"),
    ]
}

/// Phase one parser: exactly one of `--feature` and `--list-features`.
pub fn mode_command() -> Command {
    Command::new(APP_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about(ABOUT)
        .arg(feature_arg())
        .arg(
            Arg::new("list_features")
                .short('l')
                .long("list-features")
                .action(ArgAction::SetTrue)
                .help("List every available analysis and its options"),
        )
        .args(global_args())
        .group(
            ArgGroup::new("mode")
                .args(["feature", "list_features"])
                .required(true),
        )
}

/// Phase two parser for one analysis.
pub fn feature_command(analysis: &dyn Analysis) -> Command {
    let command = Command::new(APP_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about(analysis.description())
        .arg(feature_arg().required(true))
        .args(global_args());
    analysis.declare_arguments(command)
}

pub fn parse_mode(argv: &[String]) -> LensResult<Mode> {
    let matches = mode_command().try_get_matches_from(split_mode_args(argv))?;
    // the required group guarantees `--list-features` when no id was given
    Ok(match matches.get_one::<u32>("feature") {
        Some(id) => Mode::Run(*id),
        None => Mode::List,
    })
}

/// Parse `argv` and run whatever it asks for.
pub fn dispatch(registry: &FeatureRegistry, argv: &[String], ctx: &mut CliContext<'_>) -> LensResult<()> {
    let id = match parse_mode(argv)? {
        Mode::List => {
            write_feature_listing(ctx.out, registry)?;
            return Ok(());
        }
        Mode::Run(id) => id,
    };

    let analysis = registry.get(id).ok_or_else(|| LensError::UnknownFeature {
        id,
        valid: registry.ids(),
    })?;

    let mut command = feature_command(analysis);
    let matches = command.try_get_matches_from_mut(argv)?;
    let config = resolve_config(ctx, &command, &matches)?;

    log_info(&format!("Running feature {}: {}", id, analysis.name()));
    let mut run_ctx = RunContext {
        config: &config,
        loader: ctx.loader,
        renderer: &mut *ctx.renderer,
        out: &mut *ctx.out,
    };
    analysis.run(&mut run_ctx)
}

fn resolve_config(ctx: &CliContext<'_>, command: &Command, matches: &ArgMatches) -> LensResult<Config> {
    let mut config = match ctx.base_config() {
        Some(config) => config.clone(),
        None => Config::load(matches.get_one::<String>("config").map(Path::new))?,
    };
    if let Some(source) = config.source() {
        log_debug(&format!("Config source: {}", source.display()));
    }
    config.overwrite_from_matches(command, matches);
    Ok(config)
}
