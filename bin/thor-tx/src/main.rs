fn main() {
    if let Err(err) = thor_tx::cli::run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
