#[macro_use]
extern crate clap;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{debug, error, info, LevelFilter};
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    filter::threshold::ThresholdFilter,
};

use torrent_fmt::{configure_units, global, peer, Configuration, PluralForms};

struct Arguments {
    settings_file: Option<String>,
    mode: String,
    value: Option<String>,
    word: String,
}

fn parse_value<T: FromStr>(arguments: &Arguments) -> Result<T, String> {
    match &arguments.value {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| format!("invalid value '{}' for mode {}", value, arguments.mode)),
        None => Err(format!("mode {} needs a value", arguments.mode)),
    }
}

fn run(arguments: Arguments) -> Result<Vec<String>, String> {
    if let Some(settings_file) = &arguments.settings_file {
        let configuration =
            Configuration::load(settings_file.as_str()).map_err(|why| why.to_string())?;
        configure_units(configuration);
    }

    let formatter = global();
    debug!("formatting in mode {}", arguments.mode);

    let output = match arguments.mode.as_str() {
        "size" => formatter.format_size(parse_value(&arguments)?),
        "memory" => formatter.format_memory(parse_value(&arguments)?),
        "speed" => formatter.format_speed_kbps(parse_value(&arguments)?),
        "speed-bps" => formatter.format_speed_bps(parse_value(&arguments)?),
        "ratio" => formatter.format_ratio(parse_value(&arguments)?),
        "percent" => formatter.format_percent(parse_value(&arguments)?),
        "interval" => formatter.format_time_interval(parse_value(&arguments)?),
        "timestamp" => formatter.format_timestamp(parse_value(&arguments)?),
        "count" => {
            let forms = PluralForms::english(
                arguments.word.as_str(),
                format!("{}s", arguments.word),
            );
            formatter.count_string(parse_value(&arguments)?, &forms)
        }
        "peer" => {
            let flags: String = parse_value(&arguments)?;
            return Ok(peer::describe(&flags));
        }
        "units" => {
            return Ok(formatter
                .configuration()
                .unit_dictionary()
                .into_iter()
                .map(|(kind, base, labels)| format!("{}: {} {}", kind, base, labels.join(" ")))
                .collect());
        }
        mode => {
            return Err(format!("invalid mode: {}", mode));
        }
    };

    Ok(vec![output])
}

fn main() {
    let matches = build_command().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("stderr", Box::new(stderr)),
        )
        .build(Root::builder().appender("stderr").build(level));
    match config {
        Ok(config) => {
            if let Err(why) = log4rs::init_config(config) {
                eprintln!("unable to initialize logging: {}", why);
            }
        }
        Err(why) => eprintln!("invalid logging configuration: {}", why),
    }

    let arguments = get_arguments(&matches);
    match run(arguments) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(why) => {
            error!("{}", why);
            process::exit(1);
        }
    }
}

fn build_command() -> Command {
    Command::new("torrent-fmt")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Formats torrent transfer statistics the way the client UI shows them.")
        .arg(
            Arg::new("settings-file")
                .short('s')
                .long("settings-file")
                .value_name("FILE")
                .help("XML file with unit tables and localized strings"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Specify a config file from where to read settings"),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("MODE")
                .help("size (default), memory, speed, speed-bps, ratio, percent, interval, timestamp, count, peer or units"),
        )
        .arg(
            Arg::new("word")
                .short('w')
                .long("word")
                .value_name("WORD")
                .default_value("torrent")
                .help("The counted noun for mode count"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log debug output"),
        )
        .arg(
            Arg::new("value")
                .value_name("VALUE")
                .allow_negative_numbers(true)
                .help("The raw number (or peer flags) to format"),
        )
}

fn get_arguments(matches: &ArgMatches) -> Arguments {
    let home_dir = dirs::home_dir()
        .unwrap_or(PathBuf::from("~"))
        .to_string_lossy()
        .into_owned();
    let config_file_name = match matches.get_one::<String>("config") {
        Some(file) => {
            let normalized_file = file.replace("~", &home_dir);
            if !Path::new(&normalized_file).exists() {
                error!("config file doesn't exists.");
                process::exit(1);
            };
            Some(normalized_file)
        }
        None => {
            let normalized = "~/torrent-fmt.conf".replace("~", &home_dir);
            if Path::new("torrent-fmt.conf").exists() {
                Some(String::from("torrent-fmt.conf"))
            } else if Path::new(normalized.as_str()).exists() {
                Some(normalized)
            } else if Path::new("/etc/torrent-fmt.conf").exists() {
                Some(String::from("/etc/torrent-fmt.conf"))
            } else {
                None
            }
        }
    };

    let mut settings_file = None;
    let mut mode = String::from("size");

    if let Some(file_name) = config_file_name {
        info!("read setting from {}", file_name);
        if let Ok(file) = File::open(file_name) {
            let buffer = BufReader::new(&file);
            for l in buffer.lines().map_while(Result::ok) {
                let position_of_equal_sign = match l.find('=') {
                    Some(position) => position,
                    None => continue,
                };
                let key = l[..position_of_equal_sign].trim();
                let value = l[(position_of_equal_sign + 1)..].trim().to_string();

                match key {
                    "settings_file" => {
                        settings_file = Some(value);
                    }
                    "mode" => {
                        mode = value;
                    }
                    _ => (),
                }
            }
        }
    }

    if let Some(file) = matches.get_one::<String>("settings-file") {
        settings_file = Some(file.to_string());
    }
    if let Some(value) = matches.get_one::<String>("mode") {
        mode = value.to_string();
    }

    Arguments {
        settings_file,
        mode,
        value: matches.get_one::<String>("value").cloned(),
        word: matches
            .get_one::<String>("word")
            .cloned()
            .unwrap_or_else(|| String::from("torrent")),
    }
}
