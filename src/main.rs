mod cli;
mod error_handling;
mod grammar;
mod loader;
mod report;
mod sets;

use clap::Parser;

fn main() {
    let args = cli::Cli::parse();

    let loaded = match loader::load_file(&args.file) {
        Ok(loaded) => loaded,
        Err(failure) => {
            for skipped in &failure.skipped {
                eprintln!("{}", skipped);
            }
            eprintln!("{}", failure.error);
            std::process::exit(1);
        }
    };
    for skipped in &loaded.skipped {
        eprintln!("{}", skipped);
    }

    let grammar = loaded.grammar;
    let first = sets::compute_first(&grammar);
    let follow = sets::compute_follow(&grammar, &first);
    let predict = sets::compute_predict(&grammar, &first, &follow);

    report::print_tables(&grammar, &first, &follow, &predict);
}
