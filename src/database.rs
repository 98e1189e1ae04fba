//! Database initialization, table definitions and the mapping store
//!
//! This module owns the embedded redb database. Every shortened URL lives in two
//! tables that are always written together, so the mapping can be walked in
//! both directions with a single key lookup.

use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;
use std::sync::Arc;

/// Forward table: short id to original URL
///
/// Key: sequential short id, starting at 0
/// Value: the original URL exactly as it was submitted
pub const TABLE_SHORT_IDS: TableDefinition<u64, &str> = TableDefinition::new("short_ids_v1");

/// Reverse index: original URL to short id
///
/// Guarantees that one original URL owns exactly one short id.
pub const TABLE_ORIGINAL_URLS: TableDefinition<&str, u64> =
    TableDefinition::new("original_urls_v1");

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: UrlStore,
}

impl AppState {
    pub fn new(store: UrlStore) -> Self {
        Self { store }
    }
}

/// Initializes the embedded database and creates required tables
///
/// # Arguments
///
/// * `db_path` - File path where the database should be stored (e.g., "data.db")
///
/// # Example
///
/// ```no_run
/// # use shorturl::database::init_db;
/// let db = init_db("data.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: impl AsRef<Path>) -> Result<Database, redb::Error> {
    let db = Database::create(db_path)?;

    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_SHORT_IDS)?;
        write_txn.open_table(TABLE_ORIGINAL_URLS)?;
    }
    write_txn.commit()?;

    Ok(db)
}

/// Largest integer an `f64` holds exactly (2^53)
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// Coerces a short id taken from a request path into the stored numeric key.
///
/// Follows numeric string conversion: surrounding whitespace is ignored, and
/// plain integers (`"7"`, `"007"`), integral decimals (`"1.0"`, `"1e0"`) and
/// hex/octal/binary literals (`"0x1"`, `"0o1"`, `"0b1"`) are accepted.
/// Negative, fractional, empty or non-numeric input matches no record.
///
/// # Returns
///
/// * `Some(id)` - The numeric key to look up
/// * `None` - The input cannot name any record
pub fn parse_short_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(id) = raw.parse::<u64>() {
        return Some(id);
    }

    // Radix literals take no sign.
    let radix = match raw.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&raw[2..], radix).ok();
    }

    // "inf" and "nan" parse as f64 but are not ids.
    let number: f64 = raw.parse().ok()?;
    let integral = number.is_finite() && number.fract() == 0.0;
    if integral && (0.0..=MAX_EXACT_FLOAT_INT).contains(&number) {
        Some(number as u64)
    } else {
        None
    }
}

/// Persistent bidirectional mapping between original URLs and short ids
///
/// Cloning is cheap: all clones share the same database handle, which is
/// closed once the last clone is dropped.
#[derive(Clone)]
pub struct UrlStore {
    db: Arc<Database>,
}

impl UrlStore {
    /// Wraps an already initialized database (see [`init_db`]).
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }

    /// Opens (or creates) the database file and wraps it in a store.
    ///
    /// # Arguments
    ///
    /// * `db_path` - File path of the redb database (e.g., "data.db")
    ///
    /// # Returns
    ///
    /// * `Ok(UrlStore)` - Store with both tables present
    /// * `Err(redb::Error)` - The file could not be opened or initialized
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, redb::Error> {
        init_db(db_path).map(Self::new)
    }

    /// Checks whether `original_url` has already been shortened.
    ///
    /// # Arguments
    ///
    /// * `original_url` - The URL exactly as it was submitted
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A record with this original URL exists
    /// * `Ok(false)` - The URL has never been shortened
    pub fn exists_by_original(&self, original_url: &str) -> Result<bool, redb::Error> {
        Ok(self.lookup_short_by_original(original_url)?.is_some())
    }

    /// Checks whether a record with the given short id exists.
    ///
    /// # Arguments
    ///
    /// * `short_id` - The raw path segment, coerced with [`parse_short_id`]
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A record is stored under this id
    /// * `Ok(false)` - No record, including ids that do not coerce to a number
    pub fn exists_by_short(&self, short_id: &str) -> Result<bool, redb::Error> {
        Ok(self.lookup_original_by_short(short_id)?.is_some())
    }

    /// Stores `original_url` under the next sequential short id and returns it.
    ///
    /// The next id is the number of records at insertion time. The count and
    /// both inserts happen in one write transaction and redb admits a single
    /// writer at a time, so concurrent callers always receive distinct ids.
    /// If the URL is already present when the transaction starts, its existing
    /// id is returned and nothing is written.
    ///
    /// # Arguments
    ///
    /// * `original_url` - A URL that already passed validation
    ///
    /// # Returns
    ///
    /// * `Ok(id)` - The newly assigned id, or the existing one for a known URL
    /// * `Err(redb::Error)` - The transaction failed; nothing was written
    pub fn insert_new(&self, original_url: &str) -> Result<u64, redb::Error> {
        let write_txn = self.db.begin_write()?;

        let existing = {
            let originals = write_txn.open_table(TABLE_ORIGINAL_URLS)?;
            let short_id = originals.get(original_url)?.map(|guard| guard.value());
            short_id
        };
        if let Some(short_id) = existing {
            write_txn.abort()?;
            tracing::debug!(original_url, short_id, "url already shortened");
            return Ok(short_id);
        }

        let short_id = {
            let mut short_ids = write_txn.open_table(TABLE_SHORT_IDS)?;
            let short_id = short_ids.len()?;
            short_ids.insert(short_id, original_url)?;

            let mut originals = write_txn.open_table(TABLE_ORIGINAL_URLS)?;
            originals.insert(original_url, short_id)?;
            short_id
        };
        write_txn.commit()?;

        tracing::info!(original_url, short_id, "created short url");
        Ok(short_id)
    }

    /// Looks up the short id assigned to `original_url`.
    ///
    /// # Arguments
    ///
    /// * `original_url` - The URL exactly as it was submitted
    ///
    /// # Returns
    ///
    /// * `Ok(Some(id))` - The id the URL was shortened to
    /// * `Ok(None)` - The URL has never been shortened
    pub fn lookup_short_by_original(&self, original_url: &str) -> Result<Option<u64>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let originals = read_txn.open_table(TABLE_ORIGINAL_URLS)?;
        let short_id = originals.get(original_url)?.map(|guard| guard.value());
        Ok(short_id)
    }

    /// Looks up the original URL stored under `short_id`.
    ///
    /// # Arguments
    ///
    /// * `short_id` - The raw path segment, coerced with [`parse_short_id`]
    ///
    /// # Returns
    ///
    /// * `Ok(Some(url))` - The original URL to redirect to
    /// * `Ok(None)` - No record under this id
    pub fn lookup_original_by_short(&self, short_id: &str) -> Result<Option<String>, redb::Error> {
        let Some(key) = parse_short_id(short_id) else {
            return Ok(None);
        };

        let read_txn = self.db.begin_read()?;
        let short_ids = read_txn.open_table(TABLE_SHORT_IDS)?;
        let original_url = short_ids.get(key)?.map(|guard| guard.value().to_string());
        Ok(original_url)
    }

    /// Total number of stored records.
    pub fn len(&self) -> Result<u64, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let short_ids = read_txn.open_table(TABLE_SHORT_IDS)?;
        Ok(short_ids.len()?)
    }

    pub fn is_empty(&self) -> Result<bool, redb::Error> {
        Ok(self.len()? == 0)
    }
}
