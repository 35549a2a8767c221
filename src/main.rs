fn main() {
    if let Err(err) = intuition_lab_lib::run() {
        eprintln!("intuition-lab: {err:#}");
        std::process::exit(1);
    }
}
