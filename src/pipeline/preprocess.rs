//! Raw-data cleanup applied before any analysis

use anyhow::Result;
use polars::prelude::*;

/// Convert blank and whitespace-only text cells to null across all String
/// columns. Surrounding whitespace on non-blank cells is trimmed.
///
/// # Returns
/// The cleaned DataFrame and the number of cells changed.
pub fn replace_blank(df: &DataFrame) -> Result<(DataFrame, usize)> {
    let mut cleaned = df.clone();
    let mut replaced = 0usize;

    let string_cols: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype() == &DataType::String)
        .map(|col| col.name().to_string())
        .collect();

    for name in string_cols {
        let col = cleaned.column(&name)?.str()?.clone();
        let mut changed = 0usize;
        let values: Vec<Option<&str>> = col
            .iter()
            .map(|val| match val {
                Some(s) => {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        changed += 1;
                        None
                    } else {
                        if trimmed.len() != s.len() {
                            changed += 1;
                        }
                        Some(trimmed)
                    }
                }
                None => None,
            })
            .collect();

        if changed > 0 {
            replaced += changed;
            cleaned.with_column(Series::new(name.as_str().into(), values))?;
        }
    }

    Ok((cleaned, replaced))
}
