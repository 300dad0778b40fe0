use chrono::Local;
use shelftalker::period::{self, PeriodStyle};
use shelftalker::{FieldKind, Options, Recovery, SuggestionFields, Vocabulary, extract_with};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let options = Options { recovery: config.recovery };
    let entries = extract_with(&config.input, Vocabulary::builtin(), &options);

    if config.json {
        match serde_json::to_string_pretty(&entries) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to encode entries: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    print_report(&config.period, &entries);
}

struct CliConfig {
    input: String,
    period: String,
    recovery: Recovery,
    json: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut period: Option<String> = None;
    let mut recovery = Recovery::AllOrNothing;
    let mut json = false;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("shelftalker {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--json" => json = true,
            "--best-effort" => recovery = Recovery::BestEffort,
            "--period" => {
                let value = args.next().ok_or_else(|| "error: --period expects a value".to_string())?;
                period = Some(parse_period(&value)?);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--period=") => {
                let value = arg.trim_start_matches("--period=");
                period = Some(parse_period(value)?);
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    let period = period
        .unwrap_or_else(|| period::next_period(PeriodStyle::MonthYear, Local::now().date_naive()));

    Ok(CliConfig { input, period, recovery, json })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_period(value: &str) -> Result<String, String> {
    period::resolve(PeriodStyle::MonthYear, value)
        .ok_or_else(|| format!("error: invalid --period '{value}' (expected MM/YY)"))
}

fn print_report(period: &str, entries: &[SuggestionFields]) {
    if entries.is_empty() {
        println!("no suggestions found");
        return;
    }

    println!("{} suggestion(s) for {period}", entries.len());
    for (index, entry) in entries.iter().enumerate() {
        println!();
        println!("#{}", index + 1);
        for kind in FieldKind::ALL {
            if let Some(value) = entry.get(kind) {
                println!("  {:<12} {value}", kind.as_str());
            }
        }
    }
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "shelftalker {version}

Extracts book-suggestion records from free-form text.

Usage:
  shelftalker [OPTIONS] [--] <message...>
  shelftalker [OPTIONS] --input <text>

Options:
  -i, --input <text>    Message text to scan. If omitted, reads remaining args
                        or stdin when no args are provided.
  --period <MM/YY>      Period the suggestions are collected under.
                        Default: next month.
  --best-effort         Keep well-formed entries when part of the message is
                        malformed, instead of rejecting the whole message.
  --json                Print the extracted entries as a JSON array.
  -h, --help            Show this help message.
  -V, --version         Print version information.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
