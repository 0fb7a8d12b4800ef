use anyhow::{Context as AnyhowContext, Result};

use crate::cli::OutputFormat;
use crate::discovery::{sort_units, Unit};

pub struct OutputFormatter;

impl OutputFormatter {
    /// Renders units sorted by type tag, then path.
    pub fn format(units: &[Unit], format: OutputFormat) -> Result<String> {
        let mut units = units.to_vec();
        sort_units(&mut units);

        match format {
            OutputFormat::Text => Ok(Self::text(&units)),
            OutputFormat::Json => serde_json::to_string_pretty(&units)
                .with_context(|| format!("Cannot render {} output", format.as_str())),
        }
    }

    fn text(units: &[Unit]) -> String {
        units
            .iter()
            .map(|unit| format!("{:<15} {}\n", unit.type_name(), unit.path()))
            .collect()
    }
}
