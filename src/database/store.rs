//! Fast-path reads against the content index.
//!
//! The index is a pre-existing SQLite database owned by the media provider;
//! this module only ever reads it. The connection is opened once at
//! construction and closed when the store drops. Any prepare/execute
//! failure is treated as store corruption or unavailability: the connection
//! is dropped on the spot and the fast path stays disabled for the rest of
//! the session. Empty results are not failures and never disable anything.

use std::path::PathBuf;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags, OptionalExtension, params, params_from_iter};

use super::columns::{self, column_for};
use super::{PathInfo, PropertyEntry};
use crate::protocol::{self, packet::Value};

/// Well-known location of the content index.
pub const DEFAULT_STORE_PATH: &str =
    "/data/data/com.android.providers.media/databases/external.db";

/// How long a contended query waits before it counts as failed.
const QUERY_BUSY_TIMEOUT_MS: u64 = 200;

// ── Configuration ────────────────────────────────────────────────────

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub path: PathBuf,
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
            busy_timeout: Duration::from_millis(QUERY_BUSY_TIMEOUT_MS),
        }
    }
}

// ── Query outcome ────────────────────────────────────────────────────

/// Result of a fast-path query.
///
/// `NotFound` means the query ran and matched nothing; `Unavailable` means
/// the store could not be queried at all. Only `Unavailable` (or, for
/// direct-handle lookups, `NotFound`, since the index may be stale) makes
/// the caller retry through the delegate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome<T> {
    Found(T),
    NotFound,
    Unavailable,
}

// ── Row filters ──────────────────────────────────────────────────────

/// Which `files` rows a property query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowFilter {
    All,
    Object(u32),
    ChildrenOf(u32),
    AllWithFormat(u16),
    ObjectWithFormat(u32, u16),
    ChildrenWithFormat(u32, u16),
}

impl RowFilter {
    fn where_clause(self) -> (&'static str, Vec<i64>) {
        match self {
            RowFilter::All => ("", Vec::new()),
            RowFilter::Object(handle) => (" WHERE _id = ?1", vec![i64::from(handle)]),
            RowFilter::ChildrenOf(handle) => (" WHERE parent = ?1", vec![i64::from(handle)]),
            RowFilter::AllWithFormat(format) => (" WHERE format = ?1", vec![i64::from(format)]),
            RowFilter::ObjectWithFormat(handle, format) => (
                " WHERE _id = ?1 AND format = ?2",
                vec![i64::from(handle), i64::from(format)],
            ),
            RowFilter::ChildrenWithFormat(handle, format) => (
                " WHERE parent = ?1 AND format = ?2",
                vec![i64::from(handle), i64::from(format)],
            ),
        }
    }

    /// True for lookups addressing exactly one object by handle.
    fn is_single_object(self) -> bool {
        matches!(self, RowFilter::Object(_) | RowFilter::ObjectWithFormat(..))
    }
}

// ── Row shapes ───────────────────────────────────────────────────────

/// Object metadata as stored in the index, before thumbnail extraction.
#[derive(Debug, Clone)]
pub(crate) struct ObjectInfoRow {
    pub storage_id: u32,
    pub format: u16,
    pub parent: u32,
    pub date_created: i64,
    pub date_modified: i64,
    pub path: String,
}

// ── IndexStore ───────────────────────────────────────────────────────

/// Read handle to the content index with a one-way liveness flag.
///
/// `conn == None` means the fast path is dead: either the open failed or a
/// query did. There is no reconnect; a dead store stays dead until the
/// adapter is torn down.
pub struct IndexStore {
    conn: Option<Connection>,
}

impl IndexStore {
    /// Opens the index read-write without creating it. A failed open is not
    /// an error: it leaves the store dead and every query short-circuits.
    pub fn open(config: &StoreConfig) -> Self {
        match Self::try_open(config) {
            Ok(conn) => {
                log::debug!("content index open at {}", config.path.display());
                Self { conn: Some(conn) }
            }
            Err(e) => {
                log::error!(
                    "cannot open content index at {}: {e}; fast path disabled",
                    config.path.display()
                );
                Self { conn: None }
            }
        }
    }

    fn try_open(config: &StoreConfig) -> rusqlite::Result<Connection> {
        let conn = Connection::open_with_flags(
            &config.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        // retry automatically on contention before giving up
        conn.busy_timeout(config.busy_timeout)?;
        Ok(conn)
    }

    pub fn is_alive(&self) -> bool {
        self.conn.is_some()
    }

    /// One-way transition: drops the connection for the rest of the session.
    fn fail(&mut self, operation: &str, err: &rusqlite::Error) {
        log::error!("index query failed in {operation}: {err}; disabling fast path");
        self.conn = None;
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Path, format, and on-disk length for a handle. The length comes from
    /// a filesystem stat of the stored path; the index's size column is not
    /// trusted for this field.
    pub(crate) fn file_entry(&mut self, handle: u32) -> QueryOutcome<PathInfo> {
        let Some(conn) = self.conn.as_ref() else {
            return QueryOutcome::Unavailable;
        };
        match Self::file_entry_inner(conn, handle) {
            Ok(Some(info)) => QueryOutcome::Found(info),
            Ok(None) => QueryOutcome::NotFound,
            Err(e) => {
                self.fail("file_entry", &e);
                QueryOutcome::Unavailable
            }
        }
    }

    fn file_entry_inner(conn: &Connection, handle: u32) -> rusqlite::Result<Option<PathInfo>> {
        let mut stmt = conn.prepare_cached("SELECT _data, format FROM files WHERE _id = ?1")?;
        let row = stmt
            .query_row(params![handle], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<i64>>(1)?,
                ))
            })
            .optional()?;
        Ok(row.map(|(path, format)| {
            let path = path.unwrap_or_default();
            let length = match std::fs::metadata(&path) {
                Ok(meta) => meta.len(),
                Err(e) => {
                    log::debug!("stat failed for {path}: {e}");
                    0
                }
            };
            PathInfo {
                path,
                format: format.unwrap_or(i64::from(protocol::FORMAT_UNDEFINED)) as u16,
                length,
            }
        }))
    }

    /// The object's format code.
    pub(crate) fn object_format(&mut self, handle: u32) -> QueryOutcome<u16> {
        let Some(conn) = self.conn.as_ref() else {
            return QueryOutcome::Unavailable;
        };
        let result = conn
            .prepare_cached("SELECT format FROM files WHERE _id = ?1")
            .and_then(|mut stmt| {
                stmt.query_row(params![handle], |row| row.get::<_, Option<i64>>(0))
                    .optional()
            });
        match result {
            Ok(Some(format)) => {
                QueryOutcome::Found(format.unwrap_or(i64::from(protocol::FORMAT_UNDEFINED)) as u16)
            }
            Ok(None) => QueryOutcome::NotFound,
            Err(e) => {
                self.fail("object_format", &e);
                QueryOutcome::Unavailable
            }
        }
    }

    /// The stored metadata row for one object.
    pub(crate) fn object_info_row(&mut self, handle: u32) -> QueryOutcome<ObjectInfoRow> {
        let Some(conn) = self.conn.as_ref() else {
            return QueryOutcome::Unavailable;
        };
        match Self::object_info_inner(conn, handle) {
            Ok(Some(row)) => QueryOutcome::Found(row),
            Ok(None) => QueryOutcome::NotFound,
            Err(e) => {
                self.fail("object_info", &e);
                QueryOutcome::Unavailable
            }
        }
    }

    fn object_info_inner(conn: &Connection, handle: u32) -> rusqlite::Result<Option<ObjectInfoRow>> {
        let mut stmt = conn.prepare_cached(
            "SELECT storage_id, format, parent, date_added, date_modified, _data
             FROM files WHERE _id = ?1",
        )?;
        stmt.query_row(params![handle], |row| {
            let date_added = row.get::<_, Option<i64>>(3)?.unwrap_or(0);
            let date_modified = row.get::<_, Option<i64>>(4)?.unwrap_or(0);
            Ok(ObjectInfoRow {
                storage_id: row.get::<_, Option<i64>>(0)?.unwrap_or(0) as u32,
                format: row.get::<_, Option<i64>>(1)?.unwrap_or(0) as u16,
                parent: row.get::<_, Option<i64>>(2)?.unwrap_or(0) as u32,
                // use the modification date as creation date when the index
                // never recorded one
                date_created: if date_added == 0 { date_modified } else { date_added },
                date_modified,
                path: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            })
        })
        .optional()
    }

    /// Ordered member handles of a playlist object.
    ///
    /// Non-playlist objects (and unknown handles) structurally have no
    /// references, so they report an empty list, not a failure.
    pub(crate) fn object_references(&mut self, handle: u32) -> QueryOutcome<Vec<u32>> {
        let Some(conn) = self.conn.as_ref() else {
            return QueryOutcome::Unavailable;
        };
        match Self::references_inner(conn, handle) {
            Ok(list) => QueryOutcome::Found(list),
            Err(e) => {
                self.fail("object_references", &e);
                QueryOutcome::Unavailable
            }
        }
    }

    fn references_inner(conn: &Connection, handle: u32) -> rusqlite::Result<Vec<u32>> {
        let media_type = conn
            .prepare_cached("SELECT media_type FROM files WHERE _id = ?1")?
            .query_row(params![handle], |row| row.get::<_, Option<i64>>(0))
            .optional()?
            .flatten()
            .unwrap_or(protocol::MEDIA_TYPE_NONE);
        if media_type != protocol::MEDIA_TYPE_PLAYLIST {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare_cached(
            "SELECT audio_id FROM audio_playlists_map WHERE playlist_id = ?1 ORDER BY play_order",
        )?;
        let rows = stmt.query_map(params![handle], |row| row.get::<_, i64>(0))?;
        rows.map(|row| row.map(|id| id as u32)).collect()
    }

    /// Property entries for every row the filter matches, one entry per
    /// requested property per row, in request order.
    ///
    /// Zero rows on a direct-handle lookup report `NotFound`; zero rows on
    /// a children/format scan are a legitimate empty dataset.
    pub(crate) fn property_entries(
        &mut self,
        filter: RowFilter,
        properties: &[u16],
    ) -> QueryOutcome<Vec<PropertyEntry>> {
        let Some(conn) = self.conn.as_ref() else {
            return QueryOutcome::Unavailable;
        };

        // Resolve columns up front, keeping one slot per property so row
        // materialization stays positionally unambiguous even when a
        // property contributes no column. The row id always rides along in
        // column 0: multi-row scans stamp each entry with its own handle.
        let mut select_columns: Vec<&'static str> = vec![columns::COLUMN_ID];
        let mut column_index: Vec<Option<usize>> = Vec::with_capacity(properties.len());
        for &code in properties {
            match column_for(code) {
                Some(name) => {
                    column_index.push(Some(select_columns.len()));
                    select_columns.push(name);
                }
                None => column_index.push(None),
            }
        }

        let (where_sql, where_params) = filter.where_clause();
        let sql = format!("SELECT {} FROM files{}", select_columns.join(", "), where_sql);
        log::debug!("property query: {sql}");

        match Self::property_entries_inner(conn, &sql, &where_params, properties, &column_index) {
            Ok(entries) => {
                if entries.is_empty() && filter.is_single_object() {
                    QueryOutcome::NotFound
                } else {
                    QueryOutcome::Found(entries)
                }
            }
            Err(e) => {
                self.fail("property_entries", &e);
                QueryOutcome::Unavailable
            }
        }
    }

    fn property_entries_inner(
        conn: &Connection,
        sql: &str,
        where_params: &[i64],
        properties: &[u16],
        column_index: &[Option<usize>],
    ) -> rusqlite::Result<Vec<PropertyEntry>> {
        // dynamic column list, so no statement caching here
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(where_params.iter()))?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let handle = row.get::<_, i64>(0)? as u32;
            for (&code, &column) in properties.iter().zip(column_index) {
                entries.push(PropertyEntry {
                    handle,
                    code,
                    value: materialize_value(row, code, column, handle)?,
                });
            }
        }
        Ok(entries)
    }
}

// ── Value materialization ────────────────────────────────────────────

/// Builds the typed value for one property from the current row, applying
/// the per-property derivations: date formatting, path-leaf file names, the
/// synthesized persistent UID, track reduction, and zero fill for fields
/// the index does not track.
fn materialize_value(
    row: &rusqlite::Row<'_>,
    code: u16,
    column: Option<usize>,
    handle: u32,
) -> rusqlite::Result<Value> {
    let int = |idx: Option<usize>| -> rusqlite::Result<i64> {
        match idx {
            Some(i) => Ok(row.get::<_, Option<i64>>(i)?.unwrap_or(0)),
            None => Ok(0),
        }
    };
    let text = |idx: Option<usize>| -> rusqlite::Result<Option<String>> {
        match idx {
            Some(i) => row.get(i),
            None => Ok(None),
        }
    };

    Ok(match code {
        protocol::PROP_STORAGE_ID | protocol::PROP_PARENT_OBJECT | protocol::PROP_DURATION => {
            Value::Uint32(int(column)? as u32)
        }
        protocol::PROP_OBJECT_FORMAT => Value::Uint16(int(column)? as u16),
        // track numbers are stored as disc*1000 + track
        protocol::PROP_TRACK => Value::Uint16((int(column)? % 1000) as u16),
        protocol::PROP_PROTECTION_STATUS => Value::Uint16(0),
        protocol::PROP_OBJECT_SIZE => Value::Uint64(int(column)? as u64),
        protocol::PROP_DATE_MODIFIED | protocol::PROP_DATE_ADDED => {
            Value::Str(Some(format_date_time(int(column)?)))
        }
        protocol::PROP_OBJECT_FILE_NAME => {
            Value::Str(text(column)?.map(|path| path_leaf(&path).to_string()))
        }
        protocol::PROP_PERSISTENT_UID => {
            let storage_id = int(column)? as u64;
            Value::Uint128((u128::from(storage_id) << 32) | u128::from(handle))
        }
        // stored as a bare year; reported as January 1st of it
        protocol::PROP_ORIGINAL_RELEASE_DATE => {
            Value::Str(Some(format!("{:04}0101T000000", int(column)?)))
        }
        protocol::PROP_NAME
        | protocol::PROP_DISPLAY_NAME
        | protocol::PROP_ARTIST
        | protocol::PROP_ALBUM_NAME
        | protocol::PROP_ALBUM_ARTIST
        | protocol::PROP_GENRE
        | protocol::PROP_COMPOSER
        | protocol::PROP_DESCRIPTION => Value::Str(text(column)?),
        protocol::PROP_AUDIO_WAVE_CODEC
        | protocol::PROP_AUDIO_BITRATE
        | protocol::PROP_SAMPLE_RATE => Value::Uint32(0),
        protocol::PROP_BITRATE_TYPE | protocol::PROP_NUMBER_OF_CHANNELS => Value::Uint16(0),
        other => {
            log::error!("property {other:#06x} has no fast-path materializer");
            Value::Uint32(0)
        }
    })
}

/// Unix seconds → MTP datetime string ("YYYYMMDDThhmmss", UTC).
pub(crate) fn format_date_time(seconds: i64) -> String {
    match chrono::DateTime::from_timestamp(seconds, 0) {
        Some(dt) => dt.format("%Y%m%dT%H%M%S").to_string(),
        None => String::from("19700101T000000"),
    }
}

/// Last component of a stored data path.
pub(crate) fn path_leaf(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

// ── Test support ─────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;

    pub(crate) const FIXTURE_SCHEMA: &str = "
        CREATE TABLE IF NOT EXISTS files (
            _id           INTEGER PRIMARY KEY,
            storage_id    INTEGER,
            format        INTEGER,
            parent        INTEGER,
            _data         TEXT,
            _size         INTEGER,
            _display_name TEXT,
            title         TEXT,
            date_added    INTEGER,
            date_modified INTEGER,
            artist        TEXT,
            album         TEXT,
            album_artist  TEXT,
            composer      TEXT,
            description   TEXT,
            track         INTEGER,
            duration      INTEGER,
            year          INTEGER,
            media_type    INTEGER
        );
        CREATE TABLE IF NOT EXISTS audio_playlists_map (
            playlist_id INTEGER,
            audio_id    INTEGER,
            play_order  INTEGER
        );
    ";

    /// Config pointing at a fresh index database with the expected schema.
    /// The returned writer connection stays usable for inserts and for
    /// breaking the schema mid-test.
    pub(crate) fn fixture_config() -> (StoreConfig, Connection, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = dir.path().join("external.db");
        let writer = Connection::open(&db_path).expect("failed to create fixture db");
        writer.execute_batch(FIXTURE_SCHEMA).expect("failed to create schema");
        let config = StoreConfig {
            path: db_path,
            busy_timeout: Duration::from_millis(200),
        };
        (config, writer, dir)
    }

    /// Fixture plus an already-opened store on it.
    pub(crate) fn open_fixture() -> (IndexStore, Connection, tempfile::TempDir) {
        let (config, writer, dir) = fixture_config();
        let store = IndexStore::open(&config);
        assert!(store.is_alive());
        (store, writer, dir)
    }

    pub(crate) fn insert_file(writer: &Connection, id: u32, format: u16, parent: u32, data: &str) {
        writer
            .execute(
                "INSERT INTO files (_id, storage_id, format, parent, _data, media_type)
                 VALUES (?1, 1, ?2, ?3, ?4, 0)",
                params![id, format, parent, data],
            )
            .expect("insert failed");
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::testutil::{FIXTURE_SCHEMA, insert_file, open_fixture};
    use super::*;
    use crate::protocol::{
        FORMAT_MP3, MEDIA_TYPE_AUDIO, MEDIA_TYPE_PLAYLIST, PROP_AUDIO_WAVE_CODEC, PROP_NAME,
        PROP_OBJECT_FILE_NAME, PROP_OBJECT_FORMAT, PROP_ORIGINAL_RELEASE_DATE,
        PROP_PERSISTENT_UID, PROP_PROTECTION_STATUS, PROP_TRACK,
    };

    #[test]
    fn missing_index_file_disables_fast_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = IndexStore::open(&StoreConfig {
            path: dir.path().join("does-not-exist.db"),
            busy_timeout: Duration::from_millis(200),
        });
        assert!(!store.is_alive());
        assert_eq!(store.file_entry(1), QueryOutcome::Unavailable);
    }

    #[test]
    fn file_entry_stats_the_real_file() {
        let (mut store, writer, dir) = open_fixture();
        let media = dir.path().join("song.mp3");
        std::fs::write(&media, b"0123456789abcdef").unwrap();
        insert_file(&writer, 7, FORMAT_MP3, 0, media.to_str().unwrap());

        match store.file_entry(7) {
            QueryOutcome::Found(info) => {
                assert_eq!(info.format, FORMAT_MP3);
                assert_eq!(info.length, 16);
                assert!(info.path.ends_with("song.mp3"));
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn file_entry_unknown_handle_is_not_found() {
        let (mut store, _writer, _dir) = open_fixture();
        assert_eq!(store.file_entry(404), QueryOutcome::NotFound);
        assert!(store.is_alive(), "a miss must not disable the fast path");
    }

    #[test]
    fn object_info_row_substitutes_missing_creation_date() {
        let (mut store, writer, _dir) = open_fixture();
        writer
            .execute(
                "INSERT INTO files (_id, storage_id, format, parent, _data, date_added, date_modified)
                 VALUES (42, 3, ?1, 9, '/music/a.mp3', 0, 1609459200)",
                params![FORMAT_MP3],
            )
            .unwrap();

        match store.object_info_row(42) {
            QueryOutcome::Found(row) => {
                assert_eq!(row.date_created, 1_609_459_200);
                assert_eq!(row.date_modified, 1_609_459_200);
                assert_eq!(row.storage_id, 3);
                assert_eq!(row.parent, 9);
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn references_of_non_playlist_are_empty_ok() {
        let (mut store, writer, _dir) = open_fixture();
        writer
            .execute(
                "INSERT INTO files (_id, storage_id, format, parent, _data, media_type)
                 VALUES (5, 1, ?1, 0, '/music/a.mp3', ?2)",
                params![FORMAT_MP3, MEDIA_TYPE_AUDIO],
            )
            .unwrap();

        assert_eq!(store.object_references(5), QueryOutcome::Found(Vec::new()));
        // an unknown handle has no references either; also not a failure
        assert_eq!(store.object_references(999), QueryOutcome::Found(Vec::new()));
    }

    #[test]
    fn references_of_playlist_follow_play_order() {
        let (mut store, writer, _dir) = open_fixture();
        writer
            .execute(
                "INSERT INTO files (_id, storage_id, format, parent, _data, media_type)
                 VALUES (20, 1, 0, 0, '/playlists/p.pla', ?1)",
                params![MEDIA_TYPE_PLAYLIST],
            )
            .unwrap();
        for (audio_id, play_order) in [(103, 3), (101, 1), (102, 2)] {
            writer
                .execute(
                    "INSERT INTO audio_playlists_map (playlist_id, audio_id, play_order)
                     VALUES (20, ?1, ?2)",
                    params![audio_id, play_order],
                )
                .unwrap();
        }

        assert_eq!(
            store.object_references(20),
            QueryOutcome::Found(vec![101, 102, 103])
        );
    }

    #[test]
    fn query_failure_permanently_disables_the_store() {
        let (mut store, writer, _dir) = open_fixture();
        insert_file(&writer, 1, FORMAT_MP3, 0, "/music/a.mp3");
        writer.execute_batch("DROP TABLE files").unwrap();

        assert_eq!(store.file_entry(1), QueryOutcome::Unavailable);
        assert!(!store.is_alive());

        // even with the schema restored, the dead store never reconnects
        writer.execute_batch(FIXTURE_SCHEMA).unwrap();
        insert_file(&writer, 1, FORMAT_MP3, 0, "/music/a.mp3");
        assert_eq!(store.file_entry(1), QueryOutcome::Unavailable);
        assert_eq!(store.object_references(1), QueryOutcome::Unavailable);
    }

    #[test]
    fn property_entries_apply_value_derivations() {
        let (mut store, writer, _dir) = open_fixture();
        writer
            .execute(
                "INSERT INTO files (_id, storage_id, format, parent, _data, _size, title,
                                    date_added, date_modified, track, year, media_type)
                 VALUES (42, 3, ?1, 0, '/music/artist/song.mp3', 4096, 'Song',
                         0, 1609459200, 1005, 2020, ?2)",
                params![FORMAT_MP3, MEDIA_TYPE_AUDIO],
            )
            .unwrap();

        let properties = [
            PROP_TRACK,
            PROP_PERSISTENT_UID,
            PROP_ORIGINAL_RELEASE_DATE,
            PROP_OBJECT_FILE_NAME,
            PROP_PROTECTION_STATUS,
            PROP_AUDIO_WAVE_CODEC,
        ];
        let entries = match store.property_entries(RowFilter::Object(42), &properties) {
            QueryOutcome::Found(entries) => entries,
            other => panic!("expected Found, got {other:?}"),
        };
        assert_eq!(entries.len(), properties.len());
        assert!(entries.iter().all(|e| e.handle == 42));

        assert_eq!(entries[0].value, Value::Uint16(5)); // 1005 % 1000
        assert_eq!(entries[1].value, Value::Uint128((3u128 << 32) | 42));
        assert_eq!(entries[2].value, Value::string("20200101T000000"));
        assert_eq!(entries[3].value, Value::string("song.mp3"));
        assert_eq!(entries[4].value, Value::Uint16(0));
        assert_eq!(entries[5].value, Value::Uint32(0));
    }

    #[test]
    fn property_entries_format_dates_from_the_index() {
        let (mut store, writer, _dir) = open_fixture();
        writer
            .execute(
                "INSERT INTO files (_id, storage_id, format, parent, _data, date_modified)
                 VALUES (8, 1, ?1, 0, '/music/b.mp3', 1609459200)",
                params![FORMAT_MP3],
            )
            .unwrap();

        let entries = match store
            .property_entries(RowFilter::Object(8), &[protocol::PROP_DATE_MODIFIED])
        {
            QueryOutcome::Found(entries) => entries,
            other => panic!("expected Found, got {other:?}"),
        };
        assert_eq!(entries[0].value, Value::string("20210101T000000"));
    }

    #[test]
    fn single_object_scope_with_no_row_is_not_found() {
        let (mut store, _writer, _dir) = open_fixture();
        assert_eq!(
            store.property_entries(RowFilter::Object(404), &[PROP_NAME]),
            QueryOutcome::NotFound
        );
    }

    #[test]
    fn children_scope_with_no_rows_is_a_legitimate_empty_result() {
        let (mut store, _writer, _dir) = open_fixture();
        assert_eq!(
            store.property_entries(RowFilter::ChildrenOf(404), &[PROP_NAME]),
            QueryOutcome::Found(Vec::new())
        );
    }

    #[test]
    fn children_scope_stamps_each_row_with_its_own_handle() {
        let (mut store, writer, _dir) = open_fixture();
        insert_file(&writer, 31, FORMAT_MP3, 10, "/music/a.mp3");
        insert_file(&writer, 32, FORMAT_MP3, 10, "/music/b.mp3");

        let entries = match store.property_entries(RowFilter::ChildrenOf(10), &[PROP_OBJECT_FORMAT])
        {
            QueryOutcome::Found(entries) => entries,
            other => panic!("expected Found, got {other:?}"),
        };
        let mut handles: Vec<u32> = entries.iter().map(|e| e.handle).collect();
        handles.sort_unstable();
        assert_eq!(handles, vec![31, 32]);
        assert!(entries.iter().all(|e| e.value == Value::Uint16(FORMAT_MP3)));
    }

    #[test]
    fn null_text_columns_become_the_no_string_marker() {
        let (mut store, writer, _dir) = open_fixture();
        insert_file(&writer, 2, FORMAT_MP3, 0, "/music/untitled.mp3");

        let entries = match store.property_entries(RowFilter::Object(2), &[PROP_NAME]) {
            QueryOutcome::Found(entries) => entries,
            other => panic!("expected Found, got {other:?}"),
        };
        assert_eq!(entries[0].value, Value::Str(None));
    }

    #[test]
    fn format_date_time_is_utc_compact() {
        assert_eq!(format_date_time(1_609_459_200), "20210101T000000");
        assert_eq!(format_date_time(0), "19700101T000000");
    }

    #[test]
    fn path_leaf_takes_the_last_component() {
        assert_eq!(path_leaf("/music/artist/song.mp3"), "song.mp3");
        assert_eq!(path_leaf("song.mp3"), "song.mp3");
        assert_eq!(path_leaf(""), "");
    }
}
