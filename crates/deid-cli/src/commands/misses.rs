use std::path::Path;

use anyhow::Result;
use deid_storage::AnnotationStore;

pub fn handle(results: &Path) -> Result<()> {
    let set = AnnotationStore::new(results).load()?;

    if set.possible_misses.is_empty() {
        println!("No possible misses.");
        return Ok(());
    }

    // Stored descending; show them in reading order
    println!("Possible misses:");
    for miss in set.possible_misses.iter().rev() {
        println!("  {:>6}  {}", miss.start, miss.text);
    }

    Ok(())
}
