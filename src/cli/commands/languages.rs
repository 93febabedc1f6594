use serde_json::json;

use crate::cli::utils::print_json;
use crate::cli::OutputFormat;
use crate::i18n::LocaleRegistry;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => print_json(&json!(LocaleRegistry::all())),
        OutputFormat::Text => {
            println!("{:<6} {:<10} {:<12} {:<4} DEFAULT", "CODE", "NAME", "NATIVE", "DIR");
            for locale in LocaleRegistry::all() {
                println!(
                    "{:<6} {:<10} {:<12} {:<4} {}",
                    locale.code,
                    locale.name,
                    locale.native_name,
                    locale.direction.as_str(),
                    if locale.is_default { "yes" } else { "" }
                );
            }
            Ok(())
        }
    }
}
