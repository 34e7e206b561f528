// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use paramform_app::ParameterEditor;
use paramform_catalog::Catalog;
use runtime::Repl;
use std::env;
use std::io;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `paramform --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    logging::init_logging(config.log_filter())?;

    let catalog_path = options.catalog_path.clone().or_else(|| config.catalog_path());
    let catalog = match &catalog_path {
        Some(path) => Catalog::load(path).with_context(|| {
            format!(
                "open catalog {} -- fix [recommend].catalog_path or pass --catalog",
                path.display()
            )
        })?,
        None => Catalog::builtin()?,
    };
    let mut catalog = catalog.with_max_results(config.max_results());
    info!(
        entries = catalog.len(),
        source = %catalog_path
            .as_ref()
            .map_or_else(|| "built-in".to_owned(), |path| path.display().to_string()),
        "standard name catalog ready"
    );
    if options.check_only {
        return Ok(());
    }

    let editor = ParameterEditor::new(config.editor_settings());
    let mut repl = Repl::new(editor, &mut catalog, config.metadata.clone());
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl.run(stdin.lock(), &mut stdout)?;
    info!(rows = repl.editor().rows().len(), "session closed");
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    catalog_path: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        catalog_path: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--catalog" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--catalog requires a file path"))?;
                options.catalog_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("paramform -- register platform parameters");
    println!("  --config <path>          Use a specific config path");
    println!("  --catalog <path>         Use a standard name catalog JSON file");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config + catalog and exit");
    println!("  --help                   Show this help");
}
