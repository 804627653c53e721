//! Validate command - Check a pricing document.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use roi_pricing::{ConfigFormat, ConfigLoader, ConfigValidator, PricingError, DEFAULT_PRICING};

#[derive(Args)]
pub struct ValidateArgs {
    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn execute(args: ValidateArgs, config_path: Option<&Path>, quiet: bool) -> Result<()> {
    // Parse without the loader's validation so every problem gets listed
    let (label, config) = match config_path {
        Some(path) => (
            path.display().to_string(),
            ConfigLoader::read_unchecked(path)
                .with_context(|| format!("Failed to read pricing config {}", path.display()))?,
        ),
        None => (
            "built-in pricing".to_string(),
            ConfigLoader::parse(DEFAULT_PRICING, ConfigFormat::Json)
                .context("Built-in pricing config does not parse")?,
        ),
    };
    info!("Validating {}", label);

    let result = ConfigValidator::validate(&config);

    if !quiet {
        println!("📋 Validating {}...", label);
        for error in &result.errors {
            println!("   ❌ {}", error);
        }
        for warning in &result.warnings {
            println!("   ⚠️  {}", warning);
        }
    }

    if !result.valid || (args.strict && !result.warnings.is_empty()) {
        let mut problems = result.errors;
        if args.strict {
            problems.extend(result.warnings);
        }
        return Err(PricingError::ValidationFailed(problems.join("; ")).into());
    }

    if !quiet {
        println!(
            "   ✅ {} plans valid (evaluated: {})",
            config.plans.len(),
            config.evaluated
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_config_validates() {
        assert!(execute(ValidateArgs { strict: true }, None, true).is_ok());
    }

    #[test]
    fn test_invalid_file_fails_with_validation_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("pricing.json");
        fs::write(
            &path,
            r#"{"evaluated": "ours", "plans": [{"slug": "ours", "name": "Ours", "automationRate": 0.9, "plans": []}]}"#,
        )
        .unwrap();

        let err = execute(ValidateArgs { strict: false }, Some(&path), true).unwrap_err();
        let pricing = err.downcast_ref::<PricingError>().unwrap();
        assert!(matches!(pricing, PricingError::ValidationFailed(_)));
        assert!(err.to_string().contains("no pricing tiers"));
    }

    #[test]
    fn test_strict_mode_fails_on_warnings() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("pricing.yaml");
        fs::write(
            &path,
            "evaluated: ours\nplans:\n  - slug: ours\n    name: Ours\n    automationRate: 0.9\n    plans:\n      - base: 10\n        includedChats: 100\n        overage: 0.1\n",
        )
        .unwrap();

        assert!(execute(ValidateArgs { strict: false }, Some(&path), true).is_ok());
        assert!(execute(ValidateArgs { strict: true }, Some(&path), true).is_err());
    }
}
