// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::io;
use std::process;
use std::time::Instant;

use clap::{App, Arg, ArgMatches, SubCommand};
use regent::{perft, Console, Game};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("perft")
                .about("Count the leaves of the legal move tree from the starting position")
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("d")
                        .long("depth")
                        .default_value("4")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a game on standard input and output")
                .arg(
                    Arg::with_name("json")
                        .help("Print a JSON snapshot of the game after every change")
                        .long("json"),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("perft") {
        run_perft(matches);
    }

    let json = matches
        .subcommand_matches("play")
        .map_or(false, |m| m.is_present("json"));
    run_play(json);
}

fn run_perft(matches: &ArgMatches) -> ! {
    let depth = value_t_or_exit!(matches, "depth", u32);
    let game = Game::new();

    println!("depth: {}", depth);
    println!();
    println!("{}", game.position());
    println!();
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&game, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_play(json: bool) -> ! {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new().json(json);
    if let Err(e) = console.run(stdin.lock(), stdout.lock()) {
        eprintln!("i/o error: {}", e);
        process::exit(1);
    }

    process::exit(0);
}
