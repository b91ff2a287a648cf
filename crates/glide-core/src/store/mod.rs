//! JSON document store shared by independent processes.
//!
//! All collections live in a single `db.json` file. Every operation, reads
//! included, runs under an exclusive marker-file lock (`db.json.lock`),
//! loads the whole file, and mutations write the full snapshot back through
//! a temp file and atomic rename. Typed helpers for each collection live in
//! the `*_queries` submodules.

use std::path::{Path, PathBuf};

use log::debug;
use uuid::Uuid;

use crate::{
    error::{GlideError, Result},
    models::Filter,
    paths::{lock_path, GlidePaths},
};

pub mod atomic;
pub mod document;
pub mod goal_queries;
pub mod lock;
pub mod session_queries;
pub mod thought_queries;

pub use document::{Collection, Document, Snapshot};
pub use goal_queries::GoalUpdate;
pub use lock::{LockGuard, LockPolicy};

/// Handle to a store file. Cheap to clone; holds no open resources.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    lock_path: PathBuf,
    policy: LockPolicy,
}

impl Store {
    /// Store at `db_path`, locking with `policy`.
    pub fn new(db_path: impl Into<PathBuf>, policy: LockPolicy) -> Self {
        let path = db_path.into();
        Self {
            lock_path: lock_path(&path),
            path,
            policy,
        }
    }

    /// Store inside a data directory, creating the directory if needed.
    pub fn open(paths: &GlidePaths, policy: LockPolicy) -> Result<Self> {
        paths.ensure_dir()?;
        Ok(Self::new(paths.db_file(), policy))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_policy(&self) -> &LockPolicy {
        &self.policy
    }

    fn lock(&self) -> Result<LockGuard> {
        lock::acquire(&self.lock_path, &self.policy)
    }

    fn load(&self) -> Result<Snapshot> {
        match atomic::read_optional(&self.path)? {
            Some(content) => Snapshot::parse(&self.path, &content),
            None => Ok(Snapshot::empty(&self.path)),
        }
    }

    /// Runs `f` against a consistent snapshot taken under the lock.
    pub fn read<T>(&self, f: impl FnOnce(&Snapshot) -> Result<T>) -> Result<T> {
        let _guard = self.lock()?;
        let snapshot = self.load()?;
        f(&snapshot)
    }

    /// Runs `f` under the lock and persists the snapshot if `f` succeeds.
    /// Nothing is written when `f` fails.
    pub fn transact<T>(&self, f: impl FnOnce(&mut Snapshot) -> Result<T>) -> Result<T> {
        let _guard = self.lock()?;
        let mut snapshot = self.load()?;
        let value = f(&mut snapshot)?;
        atomic::write_atomic(&self.path, &snapshot.to_bytes()?)?;
        debug!("Committed snapshot to {}", self.path.display());
        Ok(value)
    }

    /// Inserts a new document under a fresh id and returns it.
    ///
    /// Field validation runs before the lock is taken.
    pub fn create<D: Document>(&self, doc: D) -> Result<D> {
        doc.validate()?;
        self.transact(|snapshot| insert(snapshot, doc))
    }

    pub fn get<D: Document>(&self, id: &str) -> Result<D> {
        self.read(|snapshot| snapshot.require(id))
    }

    /// Documents matching `filter`, in insertion order.
    pub fn list<D, F>(&self, filter: F) -> Result<Documents<D, F>>
    where
        D: Document,
        F: Filter<D>,
    {
        let docs = self.read(|snapshot| snapshot.documents::<D>())?;
        Ok(Documents {
            inner: docs.into_iter(),
            filter,
        })
    }

    /// Applies `mutator` to a stored document and writes it back.
    ///
    /// The result is validated again; if the mutator or validation fails
    /// nothing is written. The id cannot be changed.
    pub fn update<D, M>(&self, id: &str, mutator: M) -> Result<D>
    where
        D: Document,
        M: FnOnce(&mut D) -> Result<()>,
    {
        self.transact(|snapshot| {
            let mut doc: D = snapshot.require(id)?;
            mutator(&mut doc)?;
            doc.set_id(id.to_string());
            doc.validate()?;
            let others: Vec<D> = snapshot
                .documents::<D>()?
                .into_iter()
                .filter(|d| d.id() != id)
                .collect();
            doc.check_conflicts(&others)?;
            snapshot.put(&doc)?;
            Ok(doc)
        })
    }

    pub fn delete<D: Document>(&self, id: &str) -> Result<()> {
        self.transact(|snapshot| {
            if snapshot.remove(D::COLLECTION, id) {
                Ok(())
            } else {
                Err(GlideError::NotFound {
                    kind: D::COLLECTION.kind(),
                    id: id.to_string(),
                })
            }
        })
    }
}

/// Checks cross-document rules, assigns a fresh id and stores `doc`.
fn insert<D: Document>(snapshot: &mut Snapshot, mut doc: D) -> Result<D> {
    doc.check_conflicts(&snapshot.documents::<D>()?)?;
    doc.set_id(Uuid::new_v4().to_string());
    snapshot.put(&doc)?;
    Ok(doc)
}

/// Lazily filtered documents from one snapshot.
#[derive(Debug)]
pub struct Documents<D, F> {
    inner: std::vec::IntoIter<D>,
    filter: F,
}

impl<D, F: Filter<D>> Iterator for Documents<D, F> {
    type Item = D;

    fn next(&mut self) -> Option<D> {
        let filter = &self.filter;
        self.inner.by_ref().find(|doc| filter.matches(doc))
    }
}
