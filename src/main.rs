//! shelfmap main entrypoint.

use shelfmap::run;
use shelfmap::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
