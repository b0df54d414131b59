use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the targets and transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const OUTPUT_FORMATS: &[&str] = &["html", "json", "tag", "treeviz"];
const AVAILABLE_TRANSFORMS: &[&str] =
    &["markup", "events", "model-json", "model-tag", "model-treeviz"];

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input BoxNote file")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn conversion_args() -> Vec<Arg> {
    vec![
        Arg::new("workdir")
            .long("workdir")
            .value_hint(ValueHint::DirPath),
        Arg::new("title").long("title"),
        Arg::new("token").long("token"),
        Arg::new("user").long("user"),
    ]
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("boxnote")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting BoxNote files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .arg(input_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(clap::builder::PossibleValuesParser::new(OUTPUT_FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .args(conversion_args()),
        )
        .subcommand(
            Command::new("inspect")
                .arg(input_arg())
                .arg(
                    Arg::new("transform")
                        .index(2)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        )),
                )
                .args(conversion_args()),
        )
        .subcommand(Command::new("generate-css"));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "boxnote", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "boxnote", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "boxnote", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
