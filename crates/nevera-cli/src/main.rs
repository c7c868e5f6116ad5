// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod screen;

use anyhow::{Context, Result, bail};
use config::Config;
use nevera_app::model::{FilterOption, SortOption, ViewParameters};
use nevera_app::reminder::RefrigeratorMember;
use nevera_app::view::compute_view;
use std::env;
use std::path::PathBuf;
use time::OffsetDateTime;

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

    env_logger::init();

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `nevera --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let params = view_parameters(&config, &options);

    if options.demo {
        // Demo data is anchored to its own fixed date so the expired split
        // always looks the same.
        let today = nevera_testkit::sample_today();
        if options.remind {
            print!("{}", screen::render_reminders(&nevera_testkit::sample_stocks(), today));
            return Ok(());
        }
        let outcome = compute_view(&nevera_testkit::sample_inventory(), &params, today);
        print!("{}", screen::render_inventory(&outcome, &params, today));
        return Ok(());
    }

    let client = nevera_api::Client::new(config.api_base_url(), config.api_timeout()?)
        .with_context(|| {
            format!(
                "invalid [api] config in {}; fix base_url/timeout values",
                options.config_path.display()
            )
        })?
        .with_bearer_token(config.api_bearer_token());

    if options.check_only {
        return Ok(());
    }

    let refrigerator_id = match options
        .refrigerator
        .as_deref()
        .or_else(|| config.refrigerator_id())
    {
        Some(id) => id.to_owned(),
        None => bail!(
            "no refrigerator selected; pass --refrigerator <id> or set [api].refrigerator_id in {}",
            options.config_path.display()
        ),
    };

    let today = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date();

    if options.remind {
        if !config.reminders_enabled() {
            println!("reminders are disabled in {}", options.config_path.display());
            return Ok(());
        }
        let records = client.list_items(&refrigerator_id)?;
        let recipient = RefrigeratorMember {
            user_id: config.reminder_recipient_id().to_owned(),
            display_name: config.reminder_recipient_name().to_owned(),
        };
        let stocks = screen::stocks_for_recipient(records, &refrigerator_id, &recipient);
        print!("{}", screen::render_reminders(&stocks, today));
        return Ok(());
    }

    let outcome = screen::fetch_view(&client, &refrigerator_id, &params, today)?;
    print!("{}", screen::render_inventory(&outcome, &params, today));
    Ok(())
}

fn view_parameters(config: &Config, options: &CliOptions) -> ViewParameters {
    ViewParameters {
        search_text: options.search.clone().unwrap_or_default(),
        date_range_start: options.from.clone(),
        date_range_end: options.to.clone(),
        filter: options.filter.unwrap_or_else(|| config.default_filter()),
        sort: options.sort.unwrap_or_else(|| config.default_sort()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    demo: bool,
    remind: bool,
    refrigerator: Option<String>,
    search: Option<String>,
    filter: Option<FilterOption>,
    sort: Option<SortOption>,
    from: Option<String>,
    to: Option<String>,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        check_only: false,
        demo: false,
        remind: false,
        refrigerator: None,
        search: None,
        filter: None,
        sort: None,
        from: None,
        to: None,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = required_value(&mut iter, "--config")?;
                options.config_path = PathBuf::from(value);
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
            "--demo" => {
                options.demo = true;
            }
            "--remind" => {
                options.remind = true;
            }
            "--refrigerator" => {
                options.refrigerator = Some(required_value(&mut iter, "--refrigerator")?);
            }
            "--search" => {
                options.search = Some(required_value(&mut iter, "--search")?);
            }
            "--filter" => {
                let value = required_value(&mut iter, "--filter")?;
                options.filter = Some(FilterOption::parse(&value).ok_or_else(|| {
                    anyhow::anyhow!(
                        "unknown filter {value:?}; use one of: all, expired, unexpired"
                    )
                })?);
            }
            "--sort" => {
                let value = required_value(&mut iter, "--sort")?;
                options.sort = Some(SortOption::parse(&value).ok_or_else(|| {
                    anyhow::anyhow!(
                        "unknown sort {value:?}; use one of: expiry_ascending, created_descending, created_ascending, name_ascending"
                    )
                })?);
            }
            "--from" => {
                options.from = Some(required_value(&mut iter, "--from")?);
            }
            "--to" => {
                options.to = Some(required_value(&mut iter, "--to")?);
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

fn required_value<I, S>(iter: &mut I, flag: &str) -> Result<String>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    iter.next()
        .map(|value| value.as_ref().to_owned())
        .ok_or_else(|| anyhow::anyhow!("{flag} requires a value"))
}

fn print_help() {
    println!("nevera");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config + client setup");
    println!("  --demo                   Show the view over seeded demo data");
    println!("  --refrigerator <id>      Refrigerator to fetch (overrides config)");
    println!("  --search <text>          Case-insensitive name search");
    println!("  --filter <option>        all | expired | unexpired");
    println!("  --sort <option>          expiry_ascending | created_descending |");
    println!("                           created_ascending | name_ascending");
    println!("  --from <YYYY-MM-DD>      Expiry range start (inclusive)");
    println!("  --to <YYYY-MM-DD>        Expiry range end (inclusive)");
    println!("  --remind                 Print reminder digests for tomorrow");
    println!("  --help                   Show this help");
}
