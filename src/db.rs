//! Sets up the application's SQLite database.

use rusqlite::Connection;

use crate::persistence::create_key_value_table;

/// Create the tables used by the application.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an error if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = connection.unchecked_transaction()?;

    create_key_value_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
