//! Durable file-backed ticket storage
//!
//! Each ticket lives in its own JSON file under a data directory. The file
//! name is the hex encoding of the ticket id, so any id string maps to a safe
//! path and distinct ids never share a file. An id whose file name would
//! exceed the file system's name limit cannot have been stored, so lookups
//! for it report a missing record without touching the disk.
//!
//! # Write Safety
//!
//! `put` writes to a uniquely named temporary file in the same directory and
//! renames it over the target. A failed `put` leaves any previous record for
//! the key intact and never exposes a half-written file.
//!
//! # Conditional Close
//!
//! `close_if_open` holds a per-ticket async mutex across its read, check and
//! write, so concurrent settles within this process close a ticket exactly
//! once. Separate processes sharing a directory are not serialized.

use crate::core::traits::TicketStore;
use crate::store::record;
use crate::types::{ParkingError, Settlement, Ticket, TicketId};
use dashmap::DashMap;
use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

const RECORD_EXTENSION: &str = "json";

/// Longest file name accepted by common file systems, in bytes
const MAX_FILE_NAME_LEN: usize = 255;

/// Ticket store persisting one JSON file per ticket
#[derive(Debug)]
pub struct FileTicketStore {
    dir: PathBuf,
    /// Per-ticket locks for `close_if_open`
    close_locks: DashMap<TicketId, Arc<Mutex<()>>>,
}

impl FileTicketStore {
    /// Open (creating if needed) a store rooted at `dir`
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, ParkingError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            ParkingError::persistence("open", format!("{}: {}", dir.display(), e))
        })?;

        Ok(FileTicketStore {
            dir,
            close_locks: DashMap::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record file for `id`, or `None` if the id is too long to
    /// name a file
    pub fn record_path(&self, id: &TicketId) -> Option<PathBuf> {
        let name = format!("{}.{}", hex_encode(id.as_str()), RECORD_EXTENSION);
        (name.len() <= MAX_FILE_NAME_LEN).then(|| self.dir.join(name))
    }

    async fn write_record(&self, ticket: &Ticket) -> Result<(), ParkingError> {
        let target = self.record_path(&ticket.id).ok_or_else(|| {
            ParkingError::persistence("put", format!("ticket id too long: {}", ticket.id))
        })?;
        let bytes = record::encode(ticket)?;
        let staging = self.dir.join(format!(".{}.tmp", Uuid::new_v4().simple()));

        if let Err(e) = tokio::fs::write(&staging, &bytes).await {
            discard(&staging).await;
            return Err(ParkingError::persistence("put", e));
        }
        if let Err(e) = tokio::fs::rename(&staging, &target).await {
            discard(&staging).await;
            return Err(ParkingError::persistence("put", e));
        }
        Ok(())
    }

    async fn read_record(&self, id: &TicketId) -> Result<Option<Ticket>, ParkingError> {
        let Some(path) = self.record_path(id) else {
            return Ok(None);
        };
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ParkingError::persistence("get", e)),
        };
        record::decode(id, &bytes).map(Some)
    }

    /// Read, close and write back `id`; the caller holds the ticket's lock
    async fn close_locked(
        &self,
        id: &TicketId,
        settlement: Settlement,
    ) -> Result<Option<Ticket>, ParkingError> {
        let Some(mut ticket) = self.read_record(id).await? else {
            return Ok(None);
        };

        if ticket.close(settlement) {
            self.write_record(&ticket).await?;
        }

        Ok(Some(ticket))
    }
}

impl TicketStore for FileTicketStore {
    async fn put(&self, ticket: &Ticket) -> Result<(), ParkingError> {
        self.write_record(ticket).await
    }

    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>, ParkingError> {
        self.read_record(id).await
    }

    async fn close_if_open(
        &self,
        id: &TicketId,
        settlement: Settlement,
    ) -> Result<Option<Ticket>, ParkingError> {
        if self.record_path(id).is_none() {
            return Ok(None);
        }

        let lock = Arc::clone(self.close_locks.entry(id.clone()).or_default().value());
        let result = {
            let _guard = lock.lock().await;
            self.close_locked(id, settlement).await
        };

        // Evict once no other call holds or awaits this lock.
        self.close_locks.remove_if(id, |_, held| {
            Arc::ptr_eq(held, &lock) && Arc::strong_count(held) == 2
        });

        result
    }
}

/// Best-effort removal of a staging file
async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove staging file");
        }
    }
}

fn hex_encode(id: &str) -> String {
    id.bytes().fold(String::with_capacity(id.len() * 2), |mut out, b| {
        let _ = write!(out, "{:02x}", b);
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::time::Duration;
    use tempfile::TempDir;

    fn ticket(id: &str) -> Ticket {
        let entry = Utc.with_ymd_and_hms(2024, 7, 14, 6, 15, 0).unwrap();
        Ticket::open(TicketId::from(id), "LIC-1".to_string(), 9, entry)
    }

    fn settlement(minutes: u64, cents: i64) -> Settlement {
        Settlement {
            parked_duration: Duration::from_secs(minutes * 60),
            charge: Decimal::new(cents, 2),
        }
    }

    async fn open_store() -> (FileTicketStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FileTicketStore::open(dir.path().join("tickets")).await.unwrap();
        (store, dir)
    }

    #[test]
    fn test_hex_encode() {
        assert_eq!(hex_encode(""), "");
        assert_eq!(hex_encode("ab/.."), "61622f2e2e");
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (store, _dir) = open_store().await;
        store.put(&ticket("t-1")).await.unwrap();

        let stored = store.get(&TicketId::from("t-1")).await.unwrap();
        assert_eq!(stored, Some(ticket("t-1")));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let (store, _dir) = open_store().await;
        assert_eq!(store.get(&TicketId::from("missing")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_path_like_ids_stay_inside_the_directory() {
        let (store, _dir) = open_store().await;
        let id = TicketId::from("../../etc/passwd");

        let path = store.record_path(&id).unwrap();
        assert_eq!(path.parent(), Some(store.dir()));
        assert_eq!(store.get(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileTicketStore::open(dir.path()).await.unwrap();
            store.put(&ticket("t-1")).await.unwrap();
            store
                .close_if_open(&TicketId::from("t-1"), settlement(16, 500))
                .await
                .unwrap();
        }

        let reopened = FileTicketStore::open(dir.path()).await.unwrap();
        let stored = reopened.get(&TicketId::from("t-1")).await.unwrap().unwrap();
        assert!(stored.closed);
        assert_eq!(stored.parked_duration, Duration::from_secs(16 * 60));
        assert_eq!(stored.charge, Decimal::new(500, 2));
    }

    #[tokio::test]
    async fn test_close_if_open_keeps_first_settlement() {
        let (store, _dir) = open_store().await;
        store.put(&ticket("t-1")).await.unwrap();
        let id = TicketId::from("t-1");

        let first = store.close_if_open(&id, settlement(31, 750)).await.unwrap();
        let second = store.close_if_open(&id, settlement(95, 1750)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.unwrap().charge, Decimal::new(750, 2));
    }

    #[tokio::test]
    async fn test_close_if_open_missing_is_none() {
        let (store, _dir) = open_store().await;
        let result = store
            .close_if_open(&TicketId::from("missing"), settlement(1, 250))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_record_is_internal_format() {
        let (store, _dir) = open_store().await;
        let id = TicketId::from("t-1");
        tokio::fs::write(store.record_path(&id).unwrap(), b"garbage")
            .await
            .unwrap();

        let result = store.get(&id).await;
        assert!(matches!(result, Err(ParkingError::InternalFormat { .. })));
    }

    #[tokio::test]
    async fn test_failed_put_keeps_previous_record() {
        let (store, _dir) = open_store().await;
        store.put(&ticket("t-1")).await.unwrap();

        // A directory in the way of the target path makes the rename fail.
        let blocked = ticket("t-2");
        tokio::fs::create_dir(store.record_path(&blocked.id).unwrap())
            .await
            .unwrap();
        let result = store.put(&blocked).await;
        assert!(matches!(result, Err(ParkingError::PersistenceFailure { .. })));

        assert_eq!(
            store.get(&TicketId::from("t-1")).await.unwrap(),
            Some(ticket("t-1"))
        );

        let mut leftovers = tokio::fs::read_dir(store.dir()).await.unwrap();
        while let Some(entry) = leftovers.next_entry().await.unwrap() {
            let name = entry.file_name();
            assert!(!name.to_string_lossy().ends_with(".tmp"));
        }
    }

    #[tokio::test]
    async fn test_overlong_id_is_missing() {
        let (store, _dir) = open_store().await;
        let id = TicketId::from("x".repeat(200));

        assert_eq!(store.record_path(&id), None);
        assert_eq!(store.get(&id).await.unwrap(), None);
        assert_eq!(
            store.close_if_open(&id, settlement(1, 250)).await.unwrap(),
            None
        );

        let result = store.put(&ticket(&"x".repeat(200))).await;
        assert!(matches!(result, Err(ParkingError::PersistenceFailure { .. })));
    }

    #[tokio::test]
    async fn test_longest_id_that_fits_round_trips() {
        let (store, _dir) = open_store().await;
        // Two hex digits per byte plus ".json" fills the 255 byte limit.
        let id = "y".repeat(125);
        store.put(&ticket(&id)).await.unwrap();

        assert_eq!(
            store.get(&TicketId::from(id.as_str())).await.unwrap(),
            Some(ticket(&id))
        );
    }

    #[tokio::test]
    async fn test_close_locks_are_released() {
        let (store, _dir) = open_store().await;
        store.put(&ticket("t-1")).await.unwrap();
        let id = TicketId::from("t-1");

        store.close_if_open(&id, settlement(5, 250)).await.unwrap();
        assert!(store.close_locks.is_empty());

        store.close_if_open(&id, settlement(9, 250)).await.unwrap();
        assert!(store.close_locks.is_empty());

        store
            .close_if_open(&TicketId::from("missing"), settlement(1, 250))
            .await
            .unwrap();
        assert!(store.close_locks.is_empty());
    }

    #[test]
    fn test_concurrent_closes_have_one_winner() {
        let dir = TempDir::new().unwrap();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .build()
            .unwrap();
        let store = Arc::new(runtime.block_on(FileTicketStore::open(dir.path())).unwrap());
        runtime.block_on(store.put(&ticket("t-1"))).unwrap();

        let handles: Vec<_> = (1..=8u64)
            .map(|i| {
                let store = Arc::clone(&store);
                runtime.spawn(async move {
                    store
                        .close_if_open(&TicketId::from("t-1"), settlement(i, i as i64 * 100))
                        .await
                        .unwrap()
                        .unwrap()
                })
            })
            .collect();

        let results: Vec<Ticket> = runtime
            .block_on(futures::future::join_all(handles))
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();

        let stored = runtime
            .block_on(store.get(&TicketId::from("t-1")))
            .unwrap()
            .unwrap();
        for result in results {
            assert_eq!(result, stored);
        }
        assert!(store.close_locks.is_empty());
    }
}
