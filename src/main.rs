use std::fs;
use std::process::exit;
use clap::{command, Arg, ArgMatches};
use tracing::info;
use tracing_subscriber::EnvFilter;
use obj2text::config::Options;
use obj2text::Error;

fn main() {
    let matches = command!()
        .about("obj2text - object file to TOML converter")
        .arg(Arg::new("input")
            .help("path to the object file")
            .required(true))
        .arg(Arg::new("output")
            .help("write the document here instead of stdout")
            .short('o')
            .long("output")
            .takes_value(true))
        .arg(Arg::new("config")
            .help("TOML file selecting what to emit")
            .long("config")
            .takes_value(true))
        .arg(Arg::new("no-sections").long("no-sections").help("omit the section list"))
        .arg(Arg::new("no-symbols").long("no-symbols").help("omit the symbol list"))
        .arg(Arg::new("no-checksums").long("no-checksums").help("omit section CRC-32s"))
        .arg(Arg::new("undefined").long("undefined").help("include undefined symbols"))
        .arg(Arg::new("verbose").short('v').long("verbose").help("log debug output to stderr"))
        .get_matches();

    let filter = if matches.is_present("verbose") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let input = matches.value_of("input").unwrap_or_default();
    if let Err(err) = run(input, &matches) {
        let message = match &err {
            Error::Code(code) => code.message().into_owned(),
            other => other.to_string(),
        };
        eprintln!("obj2text: {input}: {message}");
        exit(err.exit_code());
    }
}

fn run(input: &str, matches: &ArgMatches) -> obj2text::Result<()> {
    let mut options = match matches.value_of("config") {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if matches.is_present("no-sections") {
        options.sections = false;
    }
    if matches.is_present("no-symbols") {
        options.symbols = false;
    }
    if matches.is_present("no-checksums") {
        options.checksums = false;
    }
    if matches.is_present("undefined") {
        options.undefined_symbols = true;
    }

    let text = obj2text::convert(input, &options)?;
    match matches.value_of("output") {
        Some(path) => {
            fs::write(path, text).map_err(Error::IoError)?;
            info!(input, output = path, "wrote document");
        },
        None => print!("{text}"),
    }

    Ok(())
}
