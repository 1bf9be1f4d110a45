use gauge_core::catalog::load_catalog;
use gauge_core::report::console::format_catalog_tree;

use crate::cli::args::ShowArgs;
use crate::exit_codes;

pub fn run(args: ShowArgs) -> anyhow::Result<i32> {
    match load_catalog(&args.catalog) {
        Ok(loaded) => {
            print!("{}", format_catalog_tree(&loaded.catalog));
            Ok(exit_codes::OK)
        }
        Err(e) => {
            eprintln!("error: {e}");
            Ok(exit_codes::CONFIG_ERROR)
        }
    }
}
