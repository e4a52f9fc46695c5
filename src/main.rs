fn main() {
    if let Err(err) = chefbot::cli::main() {
        eprintln!("❌ Error: {err}");
        std::process::exit(1);
    }
}
