#[macro_use]
extern crate clap;

use circle_lang::{from_brainfuck, interpret, Config};
use clap::Arg;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::process;

fn main() {
    // Parse command line arguments. Usage problems and --help both leave
    // through exit code 1.
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("SRC_FILE")
                .help("Sets the source file to interpret")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("Runs the program under the interactive step debugger"),
        )
        .arg(
            Arg::with_name("from-bf")
                .long("from-bf")
                .help("Treats the source file as Brainfuck, prints the transpiled circle-lang program and exits"),
        )
        .get_matches_safe();
    let matches = match matches {
        Ok(matches) => matches,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    };

    let path = match matches.value_of("SRC_FILE") {
        Some(path) => path,
        None => unreachable!(),
    };
    let src_code = match read_source(path) {
        Ok(src_code) => src_code,
        Err(error) => {
            eprintln!("Reading source file \"{}\" failed: {}", path, error);
            process::exit(1);
        }
    };

    if matches.is_present("from-bf") {
        print!("{}", from_brainfuck(&src_code));
        return;
    }

    let config = Config {
        debug: matches.is_present("debug"),
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    let mut err = stderr.lock();
    // Runtime errors are printed to standard error by the runtime itself;
    // the process still exits 0 in that case.
    interpret(&src_code, &mut input, &mut output, &mut err, &config);
    let _ = output.flush();
}

fn read_source(path: &str) -> std::io::Result<String> {
    let mut src_code = String::new();
    BufReader::new(File::open(path)?).read_to_string(&mut src_code)?;
    Ok(src_code)
}
