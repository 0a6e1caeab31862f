//! Categorical encoding.
//!
//! Categories are the distinct present values of a column, in sorted order.
//!
//! - `OneHot`: the column is replaced by `<col>_<category>` indicator columns
//!   (0/1) for every category except the first; indicators are appended after
//!   the remaining columns. A missing cell gets 0 in every indicator.
//! - `Label`: each category is replaced in place by its index; missing cells
//!   stay missing.

use std::collections::BTreeSet;

use clap::ValueEnum;

use crate::domain::{Datum, Frame};
use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EncodeMethod {
    #[default]
    OneHot,
    Label,
}

pub fn encode_categorical(
    frame: &Frame,
    columns: Option<&[String]>,
    method: EncodeMethod,
) -> Result<Frame, ModelError> {
    let names: Vec<String> = match columns {
        Some(names) => {
            for n in names {
                frame.position(n)?;
            }
            names.to_vec()
        }
        None => frame
            .categorical_columns()
            .into_iter()
            .map(|i| frame.names()[i].clone())
            .collect(),
    };

    let mut out = frame.clone();
    match method {
        EncodeMethod::OneHot => {
            let mut dummies = Vec::new();
            for name in &names {
                let idx = out.position(name)?;
                let (name, values) = out.remove_column(idx);
                let cats = categories(&values);
                for cat in cats.iter().skip(1) {
                    let indicator = values
                        .iter()
                        .map(|d| Datum::Int(i64::from(!d.is_missing() && d.to_string() == *cat)))
                        .collect();
                    dummies.push((format!("{name}_{cat}"), indicator));
                }
            }
            for (name, values) in dummies {
                if out.position(&name).is_ok() {
                    return Err(ModelError::invalid_input(format!(
                        "encoded column '{name}' collides with an existing column"
                    )));
                }
                out.push_column(name, values);
            }
        }
        EncodeMethod::Label => {
            for name in &names {
                let idx = out.position(name)?;
                let cats = categories(out.column_at(idx));
                for cell in out.column_at_mut(idx).iter_mut() {
                    if cell.is_missing() {
                        continue;
                    }
                    let key = cell.to_string();
                    if let Some(code) = cats.iter().position(|c| *c == key) {
                        *cell = Datum::Int(code as i64);
                    }
                }
            }
        }
    }
    Ok(out)
}

fn categories(values: &[Datum]) -> Vec<String> {
    values
        .iter()
        .filter(|d| !d.is_missing())
        .map(Datum::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
