//! Converts outline fonts into bitmap fonts for e-paper displays.

use fontconvert::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}
