#[macro_use] extern crate clap;

use clap::{App, ArgMatches};
use env_logger::{from_env, Env};
use image_identity::{Id, ImageName, NameError};
use std::process;

fn main() {
    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml).get_matches();

    let log_level = matches.value_of("log_level").unwrap();
    from_env(Env::default().default_filter_or(log_level)).init();

    let result = match matches.subcommand() {
        ("normalize", Some(sub)) => normalize(sub),
        ("synonyms", Some(sub)) => synonyms(sub),
        ("inspect", Some(sub)) => inspect(sub),
        ("id-filename", Some(sub)) => {
            println!("{}", Id::new(sub.value_of("image_id").unwrap()).filename());
            Ok(())
        }
        _ => unreachable!("clap requires a subcommand"),
    };

    if let Err(err) = result {
        log::error!("{}", err);
        process::exit(1);
    }
}

fn image_name(matches: &ArgMatches) -> Result<ImageName, NameError> {
    let image_reference = matches.value_of("image_reference").unwrap();
    log::debug!("parsing image reference {:?}", image_reference);
    image_reference.parse()
}

fn normalize(matches: &ArgMatches) -> Result<(), NameError> {
    println!("{}", image_name(matches)?);
    Ok(())
}

fn synonyms(matches: &ArgMatches) -> Result<(), NameError> {
    for synonym in image_name(matches)?.synonyms() {
        println!("{}", synonym);
    }
    Ok(())
}

fn inspect(matches: &ArgMatches) -> Result<(), NameError> {
    let name = image_name(matches)?;
    println!("host: {}", name.host()?);
    println!("path: {}", name.path()?);
    println!("tag: {}", name.tag().unwrap_or(""));
    println!("digest: {}", name.digest());
    Ok(())
}
