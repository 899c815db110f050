// FILE: src/cli/mod.rs

mod config;
mod handlers;

use crate::error::Result;
use crate::escape::EscapeChar;
use crate::generator::GeneratorOptions;
use crate::variables::{parse_colon_mapping, UserVariables};
use crate::TemplateConfig;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub use config::{parse_option_lines, ConfigFile};

pub struct Cli {
    global_options: Option<PathBuf>,
}

impl Cli {
    pub fn new() -> Self {
        Self {
            global_options: config::global_options_path(),
        }
    }

    /// Run with the process arguments; returns the exit code
    pub fn run(&mut self) -> Result<i32> {
        let args: Vec<OsString> = std::env::args_os().collect();
        let matches = self.parse_with_option_files(args)?;

        self.setup_logging(matches.get_count("verbose"))?;

        let config = self.build_template_config(&matches)?;
        let files: Vec<PathBuf> = matches
            .get_many::<String>("files")
            .map(|files| files.map(PathBuf::from).collect())
            .unwrap_or_default();

        if matches.get_flag("extract-vars-json") {
            handlers::handle_extract_command(&config, &files)
        } else {
            let options = self.build_generator_options(&matches)?;
            handlers::handle_generate_command(&config, &options, &files)
        }
    }

    /// Parse the command line, then parse again with the global option file
    /// and the `--config` file spliced in front of the real arguments
    fn parse_with_option_files(&self, args: Vec<OsString>) -> Result<ArgMatches> {
        let first = self.build_cli().get_matches_from(args.clone());

        let mut extra: Vec<OsString> = Vec::new();
        if let Some(global) = self.global_options.as_deref().filter(|path| path.exists()) {
            extra.extend(config::load(global)?.into_iter().map(OsString::from));
        }
        if let Some(config_path) = first.get_one::<String>("config") {
            extra.extend(config::load(Path::new(config_path))?.into_iter().map(OsString::from));
        }

        if extra.is_empty() {
            return Ok(first);
        }

        let mut combined = Vec::with_capacity(args.len() + extra.len());
        let mut rest = args.into_iter();
        combined.extend(rest.next());
        combined.extend(extra);
        combined.extend(rest);
        Ok(self.build_cli().get_matches_from(combined))
    }

    fn build_cli(&self) -> Command {
        Command::new(crate::NAME)
            .version(crate::VERSION)
            .about(crate::DESCRIPTION)
            .args_override_self(true)
            .arg(Arg::new("files").help("Files to create (or templates to scan with -e)").required(true).num_args(1..).index(1))
            .arg(Arg::new("config").short('c').long("config").value_name("FILE").help("Read options from file (plain, .json or .toml)").action(ArgAction::Set))
            .arg(Arg::new("esc-char").long("esc-char").value_name("CHAR").help("Escape character for template variables").default_value("$").action(ArgAction::Set))
            .arg(Arg::new("map-ext").long("map-ext").value_name("EXT:TEMPLATE").help("Map a file extension to a template file").action(ArgAction::Append))
            .arg(Arg::new("search-dir").long("search-dir").value_name("DIR").help("Search directory for template files").action(ArgAction::Append))
            .arg(Arg::new("user-var").long("user-var").value_name("NAME:VALUE").help("User defined variable").action(ArgAction::Append))
            .arg(Arg::new("vars-json").long("vars-json").value_name("FILE").help("Load user defined variables from a JSON file").action(ArgAction::Set))
            .arg(Arg::new("force").short('f').long("force").help("Overwrite existing files").action(ArgAction::SetTrue))
            .arg(Arg::new("extract-vars-json").short('e').long("extract-vars-json").help("List variables used by the given template files as JSON").action(ArgAction::SetTrue))
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Increase verbosity (can be used multiple times)")
                    .action(ArgAction::Count),
            )
    }

    fn setup_logging(&self, verbose_count: u8) -> Result<()> {
        let log_level = match verbose_count {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        env_logger::Builder::from_default_env()
            .filter_level(log_level)
            .format_timestamp(None)
            .init();
        Ok(())
    }

    pub fn build_template_config(&self, matches: &ArgMatches) -> Result<TemplateConfig> {
        let escape = match matches.get_one::<String>("esc-char") {
            Some(esc) => EscapeChar::parse(esc)?,
            None => EscapeChar::default(),
        };

        let mut variables = UserVariables::from_pairs(
            matches
                .get_many::<String>("user-var")
                .into_iter()
                .flatten(),
        )?;
        if let Some(vars_json) = matches.get_one::<String>("vars-json") {
            variables.overlay_json_file(Path::new(vars_json))?;
        }

        Ok(TemplateConfig::new(escape, variables))
    }

    pub fn build_generator_options(&self, matches: &ArgMatches) -> Result<GeneratorOptions> {
        let extension_map = parse_colon_mapping(
            matches
                .get_many::<String>("map-ext")
                .into_iter()
                .flatten(),
        )?
        .into_iter()
        .collect();

        let search_dirs = matches
            .get_many::<String>("search-dir")
            .into_iter()
            .flatten()
            .map(PathBuf::from)
            .collect();

        Ok(GeneratorOptions {
            extension_map,
            search_dirs,
            force: matches.get_flag("force"),
        })
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}
