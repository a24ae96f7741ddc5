//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting Study Buddy");

    use clap::Parser;

    let config = studybuddy_app::AppConfig::parse();
    let result = pollster::block_on(studybuddy_app::run(&config)).and_then(|report| report.to_json());

    match result {
        Ok(json) => println!("{}", json),
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
