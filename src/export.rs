// 📤 Export - Dataset → CSV

use crate::dataset::Dataset;
use crate::error::Result;
use crate::monkey::Monkey;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Output row; field order is the column order
#[derive(Debug, Serialize)]
struct MonkeyRecord<'a> {
    species: &'a str,
    fur_color: &'a str,
    size: f64,
    weight: f64,
}

impl<'a> From<&'a Monkey> for MonkeyRecord<'a> {
    fn from(monkey: &'a Monkey) -> Self {
        MonkeyRecord {
            species: monkey.species(),
            fur_color: monkey.fur_color().as_str(),
            size: monkey.size(),
            weight: monkey.weight(),
        }
    }
}

/// Write `species,fur_color,size,weight`, one row per monkey in dataset order
pub fn write_monkeys<W: Write>(writer: W, dataset: &Dataset) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for monkey in dataset.monkeys() {
        wtr.serialize(MonkeyRecord::from(monkey))?;
    }
    // An empty dataset still gets a header
    if dataset.is_empty() {
        wtr.write_record(["species", "fur_color", "size", "weight"])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn save_monkeys<P: AsRef<Path>>(csv_path: P, dataset: &Dataset) -> Result<()> {
    let file = File::create(csv_path.as_ref())?;
    write_monkeys(file, dataset)?;
    info!("Saved {} monkeys to {:?}", dataset.len(), csv_path.as_ref());
    Ok(())
}
