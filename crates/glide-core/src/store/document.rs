//! Document trait and the in-memory snapshot of `db.json`.

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{GlideError, Result},
    models::{Goal, Session, Thought},
};

/// Named collections inside the store file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Goals,
    Sessions,
    Thoughts,
}

impl Collection {
    /// Key of the collection in `db.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Goals => "goals",
            Collection::Sessions => "sessions",
            Collection::Thoughts => "thoughts",
        }
    }

    /// Entity name used in not-found errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Collection::Goals => "Goal",
            Collection::Sessions => "Session",
            Collection::Thoughts => "Thought",
        }
    }
}

/// A type persisted in one store collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Field-level checks run before any write.
    fn validate(&self) -> Result<()>;

    /// Checks against the other documents of the collection, run under the
    /// lock. `others` never contains `self`.
    fn check_conflicts(&self, _others: &[Self]) -> Result<()> {
        Ok(())
    }
}

impl Document for Goal {
    const COLLECTION: Collection = Collection::Goals;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        Goal::validate(self)
    }
}

impl Document for Session {
    const COLLECTION: Collection = Collection::Sessions;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        Session::validate(self)
    }

    fn check_conflicts(&self, others: &[Self]) -> Result<()> {
        if !self.is_open() {
            return Ok(());
        }
        match others.iter().find(|s| s.is_open()) {
            Some(open) => Err(GlideError::AlreadyRunning {
                started_at: open.start_time,
            }),
            None => Ok(()),
        }
    }
}

impl Document for Thought {
    const COLLECTION: Collection = Collection::Thoughts;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        Thought::validate(self)
    }
}

/// On-disk layout of `db.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    goals: Map<String, Value>,
    #[serde(default)]
    sessions: Map<String, Value>,
    #[serde(default)]
    thoughts: Map<String, Value>,
}

/// Parsed contents of the store file.
///
/// Collections keep insertion order, so documents are listed in the order
/// they were created.
#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
    file: StoreFile,
}

impl Snapshot {
    /// An empty store.
    pub(crate) fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            file: StoreFile::default(),
        }
    }

    /// Parses `content`; structural problems are [`GlideError::CorruptStore`].
    pub(crate) fn parse(path: &Path, content: &str) -> Result<Self> {
        let file: StoreFile = serde_json::from_str(content)
            .map_err(|e| GlideError::corrupt(path, format!("invalid store file: {e}")))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub(crate) fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.file)?)
    }

    fn collection(&self, collection: Collection) -> &Map<String, Value> {
        match collection {
            Collection::Goals => &self.file.goals,
            Collection::Sessions => &self.file.sessions,
            Collection::Thoughts => &self.file.thoughts,
        }
    }

    fn collection_mut(&mut self, collection: Collection) -> &mut Map<String, Value> {
        match collection {
            Collection::Goals => &mut self.file.goals,
            Collection::Sessions => &mut self.file.sessions,
            Collection::Thoughts => &mut self.file.thoughts,
        }
    }

    fn decode<D: Document>(&self, id: &str, value: &Value) -> Result<D> {
        let mut doc: D = serde_json::from_value(value.clone()).map_err(|e| {
            GlideError::corrupt(
                &self.path,
                format!("{} '{id}' is malformed: {e}", D::COLLECTION.kind()),
            )
        })?;
        doc.set_id(id.to_string());
        Ok(doc)
    }

    /// All documents of one type, in insertion order.
    pub fn documents<D: Document>(&self) -> Result<Vec<D>> {
        self.collection(D::COLLECTION)
            .iter()
            .map(|(id, value)| self.decode(id, value))
            .collect()
    }

    pub fn get<D: Document>(&self, id: &str) -> Result<Option<D>> {
        self.collection(D::COLLECTION)
            .get(id)
            .map(|value| self.decode(id, value))
            .transpose()
    }

    /// Like [`Snapshot::get`] but a missing id is [`GlideError::NotFound`].
    pub fn require<D: Document>(&self, id: &str) -> Result<D> {
        self.get(id)?.ok_or_else(|| GlideError::NotFound {
            kind: D::COLLECTION.kind(),
            id: id.to_string(),
        })
    }

    /// Inserts or replaces a document under its id. Replacing keeps its
    /// position.
    pub(crate) fn put<D: Document>(&mut self, doc: &D) -> Result<()> {
        let value = serde_json::to_value(doc)?;
        self.collection_mut(D::COLLECTION)
            .insert(doc.id().to_string(), value);
        Ok(())
    }

    /// Removes a document, keeping the order of the rest.
    pub(crate) fn remove(&mut self, collection: Collection, id: &str) -> bool {
        self.collection_mut(collection).shift_remove(id).is_some()
    }
}
