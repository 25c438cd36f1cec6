use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::{error, LevelFilter};

use stripcodec::utils::logger::Logger;
use stripcodec::commands::{CommandFactory, StripcodecCommandFactory};

fn main() {
    let matches = ClapCommand::new("stripcodec")
        .version("0.1")
        .about("Compress and decompress TIFF strips")
        .arg(
            Arg::new("input")
                .help("Input file (raw rows, or a compressed strip)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file")
                .value_name("FILE")
                .required(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("decompress")
                .short('d')
                .long("decompress")
                .help("Decompress a strip into raw rows")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("convert")
                .short('c')
                .long("convert")
                .help("Re-encode a strip with a different compression method")
                .conflicts_with("decompress")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("method")
                .short('m')
                .long("method")
                .help("Compression by name (none, packbits, lzw, deflate, g3, mh)")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("compression")
                .long("compression")
                .help("Compression by TIFF code (1, 2, 3, 5, 8, 32773, 32946)")
                .value_name("CODE")
                .conflicts_with("method")
                .required(false),
        )
        .arg(
            Arg::new("target-method")
                .long("target-method")
                .help("Compression to convert to")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("width")
                .short('w')
                .long("width")
                .help("Pixels per row")
                .value_name("PIXELS")
                .required(false),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .help("Rows in the compressed image")
                .value_name("ROWS")
                .required(false),
        )
        .arg(
            Arg::new("bits")
                .long("bits")
                .help("Bits per sample")
                .value_name("BITS")
                .required(false),
        )
        .arg(
            Arg::new("samples-per-pixel")
                .long("samples-per-pixel")
                .help("Interleaved samples per pixel")
                .value_name("COUNT")
                .required(false),
        )
        .arg(
            Arg::new("predictor")
                .long("predictor")
                .help("Predictor (none, horizontal)")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .help("Deflate level (default, fastest, best, 0-9)")
                .value_name("LEVEL")
                .required(false),
        )
        .arg(
            Arg::new("byte-order")
                .long("byte-order")
                .help("Sample byte order for the predictor (little, big)")
                .value_name("ORDER")
                .required(false),
        )
        .arg(
            Arg::new("rows-per-strip")
                .long("rows-per-strip")
                .help("Start a new compression session every N rows")
                .value_name("ROWS")
                .required(false),
        )
        .arg(
            Arg::new("eol-aligned")
                .long("eol-aligned")
                .help("Pad Group 3 EOL codes to end on a byte boundary")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .help("Encode strips in parallel")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML settings file; command line values take precedence")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write the global log to this file instead of stderr")
                .value_name("FILE")
                .required(false),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };

    let log_file = "stripcodec.log";
    let logger = match Logger::new(log_file, level) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    let global_log = matches.get_one::<String>("log-file").map(String::as_str);
    if let Err(e) = Logger::init_global_logger(global_log, level) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = StripcodecCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
