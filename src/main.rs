fn main() {
    if let Err(err) = multiverse::cli::main() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
