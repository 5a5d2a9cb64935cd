use anyhow::Result;
use log::info;
use std::path::PathBuf;

use userdata_fixtures::schema::create_userdata_schema;
use userdata_fixtures::validator::validate_export;

/// Validate a fixture set written by `generate`
pub fn run(dir: PathBuf, base_name: String, count: Option<usize>) -> Result<()> {
    info!("Validating {}/{}.*", dir.display(), base_name);

    match validate_export(&dir, &base_name, &create_userdata_schema(), count) {
        Ok(report) => {
            // Use colorized output if available
            #[cfg(feature = "colorized_output")]
            {
                println!("{}", report.format_colored());
            }

            #[cfg(not(feature = "colorized_output"))]
            {
                println!("{}", report);
            }

            // Exit with error code if validation failed
            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
