fn main() {
    dttable::init_logging();
    if let Err(err) = dttable::import::run(std::env::args_os()) {
        println!("❌ {err:#}");
        std::process::exit(1);
    }
}
