use log::{error, info};

use carepoint_frontend::config;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page effects");
    let started = carepoint_frontend::start_when_ready(|result| match result {
        // listeners and observers live as long as the page does
        Ok(page) => page.forget(),
        Err(e) => error!("page effects disabled: {}", e),
    });
    if let Err(e) = started {
        error!("page effects disabled: {}", e);
    }
}
