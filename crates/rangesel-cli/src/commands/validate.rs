//! Snapshot validation command.

use std::path::Path;

use anyhow::{Result, bail};
use comfy_table::{Cell, Color};
use serde::Serialize;

use super::{Settings, load_snapshot};
use crate::output::{self, Format};

/// Validation result output.
#[derive(Serialize)]
struct ValidationOutput {
    valid: bool,
    checked: usize,
    errors: Vec<ErrorOutput>,
}

/// One malformed attribute.
#[derive(Serialize)]
struct ErrorOutput {
    attribute: String,
    message: String,
}

fn validate(snapshot: &Path) -> Result<ValidationOutput> {
    let snapshot = load_snapshot(snapshot)?;
    let errors: Vec<_> = snapshot
        .attributes
        .iter()
        .filter_map(|entry| {
            entry
                .statistics
                .histogram
                .build()
                .err()
                .map(|e| ErrorOutput {
                    attribute: format!("{}.{}", entry.relation, entry.attribute),
                    message: e.to_string(),
                })
        })
        .collect();

    Ok(ValidationOutput {
        valid: errors.is_empty(),
        checked: snapshot.attributes.len(),
        errors,
    })
}

/// Run the validate command.
pub fn run(snapshot: &Path, settings: &Settings) -> Result<()> {
    let output = validate(snapshot)?;

    let fmt: Format = settings.format.into();
    match fmt {
        Format::Json => output::print_json(&output, settings.quiet)?,
        Format::Table => {
            if output.valid {
                output::success(
                    &format!("All {} histograms are well-formed", output.checked),
                    settings.quiet,
                );
            } else {
                let mut table = output::table(&["Attribute", "Error"]);
                for error in &output.errors {
                    table.add_row(vec![
                        Cell::new(&error.attribute),
                        Cell::new(&error.message).fg(Color::Red),
                    ]);
                }
                output::print_table(&table, settings.quiet);
            }
        }
    }

    if !output.valid {
        bail!("{} of {} histograms are malformed", output.errors.len(), output.checked);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{snapshot_file, write_temp};

    #[test]
    fn test_validate_reports_broken() {
        let file = snapshot_file();
        let output = validate(file.path()).unwrap();
        assert!(!output.valid);
        assert_eq!(output.checked, 5);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].attribute, "broken.during");
    }

    #[test]
    fn test_validate_clean() {
        let file = write_temp(
            r#"{"attributes": [{"relation": "r", "attribute": "a",
                "boundaries": [0, 1], "masses": [1]}]}"#,
        );
        assert!(validate(file.path()).unwrap().valid);
    }
}
