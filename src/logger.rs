const LOG_CONFIG_FILE: &str = "log4rs.yaml";

#[ctor::ctor]
fn init() {
    if let Err(error) = log4rs::init_file(LOG_CONFIG_FILE, Default::default()) {
        eprintln!(
            "Logging disabled, unable to load '{}': {}",
            LOG_CONFIG_FILE, error
        );
    }
}

pub fn log_dimensions(stage: &str, width: u32, height: u32) {
    let pixels = width as u64 * height as u64;
    log::info!("{} {}x{} ({} pixels)", stage, width, height, pixels);
}
