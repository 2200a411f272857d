use std::{env, process};

use smartspend::{cli, init};

fn main() {
    init();

    if let Err(err) = cli::run(env::args().skip(1)) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
