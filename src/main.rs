fn main() {
    if let Err(err) = contact_layout::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
