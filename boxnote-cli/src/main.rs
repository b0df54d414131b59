// Command-line interface for boxnote
//
// This binary converts BoxNote files (JSON exports of Box Notes) into HTML, or into a rich
// document model dumped as JSON, tags or a tree. The heavy lifting is done by the
// boxnote-babel library; this crate wires configuration, logging and file I/O around it.
//
// Usage:
//  boxnote <input> [--to <format>] [-o <file>]           - Convert (default command)
//  boxnote convert <input> [--to <format>] [-o <file>]   - Same as above (explicit)
//  boxnote inspect <input> [<transform>]                 - Show an intermediate stage
//  boxnote generate-css                                  - Print the base stylesheet
//
// Logging goes to stderr. The default level is warn; -v raises it to debug and RUST_LOG
// overrides both.

mod transforms;

use boxnote_babel::formats::html::base_stylesheet;
use boxnote_babel::{Credentials, Layout, SerializedDocument};
use boxnote_config::{BoxnoteConfig, Loader};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use transforms::Job;

fn build_cli() -> Command {
    Command::new("boxnote")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting BoxNote files")
        .long_about(
            "boxnote converts BoxNote documents into HTML and a rich document model.\n\n\
            Commands:\n  \
            - convert: Convert a BoxNote file (default command)\n  \
            - inspect: View intermediate stages (markup, tag stream, model)\n  \
            - generate-css: Print the stylesheet embedded in HTML output\n\n\
            Examples:\n  \
            boxnote notes.boxnote --to html -o notes.html   # Convert to an HTML file\n  \
            boxnote notes.boxnote                           # Model tree on stdout\n  \
            boxnote inspect notes.boxnote events            # View the tag stream"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a boxnote.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log conversion details (omitted images, skipped nodes) to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a BoxNote file (default command)")
                .long_about(
                    "Convert a BoxNote file.\n\n\
                    Output formats:\n  \
                    - html:    Complete HTML page\n  \
                    - json:    Rich document model as JSON\n  \
                    - tag:     Rich document model as XML-like tags\n  \
                    - treeviz: Rich document model as a tree\n\n\
                    Without --to, the format is detected from the -o file extension, then\n\
                    taken from the configuration (output.format).\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(input_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::OUTPUT_FORMATS,
                        ))
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .args(conversion_args()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect intermediate stages of a conversion")
                .long_about(
                    "View a conversion at different processing stages.\n\n\
                    Transforms:\n  \
                    - markup:        HTML page produced by the walker\n  \
                    - events:        Tag stream consumed by the parser\n  \
                    - model-json:    Rich document model as JSON\n  \
                    - model-tag:     Rich document model as XML-like tags\n  \
                    - model-treeviz: Rich document model as a tree (default)",
                )
                .arg(input_arg())
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'model-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .args(conversion_args()),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the stylesheet embedded in HTML output")
                .long_about(
                    "Outputs the baseline CSS embedded in every converted HTML page.\n\n\
                    Examples:\n  \
                    boxnote generate-css > boxnote.css",
                ),
        )
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input BoxNote file")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

/// Per-document options shared by convert and inspect.
fn conversion_args() -> Vec<Arg> {
    vec![
        Arg::new("workdir")
            .long("workdir")
            .value_name("DIR")
            .help("Directory images are resolved against (defaults to the input's directory)")
            .value_hint(ValueHint::DirPath),
        Arg::new("title")
            .long("title")
            .help("Document title (defaults to the input file stem)"),
        Arg::new("token")
            .long("token")
            .help("Access token for remote image lookups"),
        Arg::new("user")
            .long("user")
            .value_name("ID")
            .help("User id for remote image lookups"),
    ]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file argument means "convert"
            if args.len() > 1
                && !args[1].starts_with('-')
                && !["convert", "inspect", "generate-css", "help"].contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));
    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => handle_convert_command(sub_matches, &config),
        Some(("inspect", sub_matches)) => {
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("model-treeviz");
            handle_inspect_command(sub_matches, transform, &config);
        }
        Some(("generate-css", _)) => print!("{}", base_stylesheet()),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Inputs of one conversion, read from the command line and the configuration.
struct Inputs {
    source: String,
    options: boxnote_babel::ConvertOptions,
    layout: Layout,
    images: boxnote_babel::FsImageResolver,
}

fn read_inputs(matches: &ArgMatches, config: &BoxnoteConfig) -> Inputs {
    let Some(input) = matches.get_one::<String>("input") else {
        eprintln!("Error: no input file given");
        std::process::exit(1);
    };
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let input_path = Path::new(input);
    let stem = input_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let workdir = matches
        .get_one::<String>("workdir")
        .map(PathBuf::from)
        .or_else(|| input_path.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    let mut options = config.convert.options(&stem);
    if let Some(title) = matches.get_one::<String>("title") {
        options.title = title.clone();
    }
    options.workdir = workdir.clone();
    options.credentials = Credentials {
        token: matches.get_one::<String>("token").cloned(),
        user_id: matches.get_one::<String>("user").cloned(),
    };
    debug!("converting '{input}' as '{}' in {}", options.title, workdir.display());

    Inputs {
        source,
        options,
        layout: Layout::from(&config.layout),
        images: config.convert.resolver(&workdir),
    }
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches, config: &BoxnoteConfig) {
    let output = matches.get_one::<String>("output").map(|s| s.as_str());
    let format = matches
        .get_one::<String>("to")
        .cloned()
        .or_else(|| output.and_then(transforms::detect_format_from_filename))
        .unwrap_or_else(|| config.output.format.clone());

    let inputs = read_inputs(matches, config);
    let job = Job {
        source: &inputs.source,
        options: &inputs.options,
        layout: &inputs.layout,
        images: &inputs.images,
    };
    let result = transforms::convert(&job, &format).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    match (output, result) {
        (Some(path), data) => {
            fs::write(path, data.into_bytes()).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        (None, SerializedDocument::Text(text)) => print!("{text}"),
        (None, SerializedDocument::Binary(_)) => {
            eprintln!("Binary formats require an output file. Use -o <path>.");
            std::process::exit(1);
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches, transform: &str, config: &BoxnoteConfig) {
    let inputs = read_inputs(matches, config);
    let job = Job {
        source: &inputs.source,
        options: &inputs.options,
        layout: &inputs.layout,
        images: &inputs.images,
    };
    let output = transforms::execute_transform(&job, transform).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });
    print!("{output}");
}

fn load_cli_config(explicit_path: Option<&str>) -> BoxnoteConfig {
    let loader = Loader::new().with_optional_file("boxnote.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
