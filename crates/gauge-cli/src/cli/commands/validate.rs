use gauge_core::catalog::load_catalog;
use serde_json::json;

use crate::cli::args::{ValidateArgs, ValidateOutputFormat};
use crate::exit_codes;

pub fn run(args: ValidateArgs) -> anyhow::Result<i32> {
    let loaded = match load_catalog(&args.catalog) {
        Ok(l) => l,
        Err(e) => {
            match args.format {
                ValidateOutputFormat::Text => eprintln!("error: {e}"),
                ValidateOutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "catalog": args.catalog,
                        "valid": false,
                        "error": e.to_string(),
                    }))?
                ),
            }
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let catalog = &loaded.catalog;
    let layers: usize = catalog
        .items
        .iter()
        .map(|i| i.on_yes.chain_len() + i.on_no.chain_len())
        .sum();

    match args.format {
        ValidateOutputFormat::Text => {
            println!(
                "✅ {} v{} is valid: {} items, {} layers",
                catalog.name,
                catalog.version,
                catalog.len(),
                layers
            );
            println!("   source: {}", loaded.source);
            println!("   digest: {}", loaded.digest);
        }
        ValidateOutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "catalog": catalog.name,
                "version": catalog.version,
                "valid": true,
                "items": catalog.len(),
                "layers": layers,
                "source": loaded.source.to_string(),
                "digest": loaded.digest,
            }))?
        ),
    }
    Ok(exit_codes::OK)
}
