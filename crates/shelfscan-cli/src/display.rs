use shelfscan_store::CsvStore;

/// Prints every persisted record for `query`, one field per line with a
/// dashed rule after each record.
///
/// # Errors
///
/// Propagates store read errors; a missing resource is not one (it prints
/// the no-data message instead).
pub fn display_products(store: &CsvStore, query: &str) -> anyhow::Result<()> {
    let records = store.read_all(query)?;
    if records.is_empty() {
        println!("No data found for {query}");
        return Ok(());
    }
    for record in records {
        println!("{record}");
        println!("{}", "-".repeat(40));
    }
    Ok(())
}
