//! Configuration CLI commands

use clap::Subcommand;

use crate::config::{PocketPaths, Settings};
use crate::error::{PocketError, PocketResult};

use super::args::parse_kind;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and current settings
    Show,
    /// Change one setting
    ///
    /// Keys: currency, category-fallback, payment-fallback, audit (on/off),
    /// breakdown-type (income/expense/mixed)
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a config command; `None` shows the configuration
pub fn handle_config_command(
    paths: &PocketPaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> PocketResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("CloudPocket Configuration");
            println!("=========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency suffix:  {}", settings.currency_suffix);
            println!("  Category label:   {} (deleted categories)", settings.category_fallback_label);
            println!(
                "  Payment label:    {} (deleted payment methods)",
                settings.payment_method_fallback_label
            );
            println!(
                "  Audit log:        {}",
                if settings.audit_enabled { "on" } else { "off" }
            );
            println!(
                "  Breakdown type:   {}",
                settings
                    .default_breakdown_type
                    .map(|k| k.as_str())
                    .unwrap_or("mixed")
            );
        }

        ConfigCommands::Set { key, value } => {
            apply_setting(settings, &key, &value)?;
            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}

fn apply_setting(settings: &mut Settings, key: &str, value: &str) -> PocketResult<()> {
    match key {
        "currency" => settings.currency_suffix = value.to_string(),
        "category-fallback" => settings.category_fallback_label = fallback_label(value)?,
        "payment-fallback" => settings.payment_method_fallback_label = fallback_label(value)?,
        "audit" => {
            settings.audit_enabled = match value.to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                _ => {
                    return Err(PocketError::Parse(format!(
                        "Invalid audit value '{}'. Use 'on' or 'off'",
                        value
                    )))
                }
            }
        }
        "breakdown-type" => {
            settings.default_breakdown_type = match value.to_ascii_lowercase().as_str() {
                "mixed" | "all" => None,
                other => Some(parse_kind(other)?),
            }
        }
        _ => {
            return Err(PocketError::Config(format!(
                "Unknown setting '{}'. Known: currency, category-fallback, payment-fallback, audit, breakdown-type",
                key
            )))
        }
    }
    Ok(())
}

fn fallback_label(value: &str) -> PocketResult<String> {
    let label = value.trim();
    if label.is_empty() {
        return Err(PocketError::Validation(
            "Fallback label cannot be empty".into(),
        ));
    }
    Ok(label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    #[test]
    fn test_apply_setting() {
        let mut settings = Settings::default();

        apply_setting(&mut settings, "currency", "KRW").unwrap();
        assert_eq!(settings.currency_suffix, "KRW");

        apply_setting(&mut settings, "audit", "off").unwrap();
        assert!(!settings.audit_enabled);

        apply_setting(&mut settings, "breakdown-type", "income").unwrap();
        assert_eq!(settings.default_breakdown_type, Some(TransactionType::Income));

        apply_setting(&mut settings, "category-fallback", " 미분류 ").unwrap();
        apply_setting(&mut settings, "payment-fallback", "미지정").unwrap();
        assert_eq!(settings.category_fallback_label, "미분류");
        assert_eq!(settings.payment_method_fallback_label, "미지정");

        apply_setting(&mut settings, "breakdown-type", "mixed").unwrap();
        assert_eq!(settings.default_breakdown_type, None);
    }

    #[test]
    fn test_apply_setting_rejects_bad_input() {
        let mut settings = Settings::default();

        assert!(apply_setting(&mut settings, "audit", "maybe").is_err());
        assert!(apply_setting(&mut settings, "category-fallback", "  ").is_err());
        assert!(apply_setting(&mut settings, "payment-fallback", "").is_err());
        assert!(apply_setting(&mut settings, "colour", "red").is_err());
        assert_eq!(settings.category_fallback_label, "Uncategorized");
        assert_eq!(settings.payment_method_fallback_label, "Unassigned");
    }

    #[test]
    fn test_set_persists() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        handle_config_command(
            &paths,
            &mut settings,
            Some(ConfigCommands::Set {
                key: "payment-fallback".into(),
                value: "Misc".into(),
            }),
        )
        .unwrap();

        let reloaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(reloaded.payment_method_fallback_label, "Misc");
        assert_eq!(reloaded.category_fallback_label, "Uncategorized");
    }
}
