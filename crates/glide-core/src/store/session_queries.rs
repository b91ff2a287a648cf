//! Session operations and queries.

use jiff::Timestamp;

use crate::{
    error::Result,
    models::{Filter, Session, SessionFilter},
};

impl super::Store {
    /// Appends a session.
    pub fn record_session(&self, session: Session) -> Result<Session> {
        self.create(session)
    }

    /// Appends a session unless one with the same start time and goal is
    /// already stored. Returns the stored session and whether it was new.
    pub fn record_session_once(&self, session: Session) -> Result<(Session, bool)> {
        session.validate()?;
        self.transact(|snapshot| {
            let existing = snapshot
                .documents::<Session>()?
                .into_iter()
                .find(|s| s.start_time == session.start_time && s.goal_id == session.goal_id);
            match existing {
                Some(found) => Ok((found, false)),
                None => super::insert(snapshot, session).map(|s| (s, true)),
            }
        })
    }

    /// Sessions matching `filter`, oldest first.
    pub fn list_sessions(&self, filter: &SessionFilter) -> Result<Vec<Session>> {
        let mut sessions: Vec<Session> = self
            .read(|snapshot| snapshot.documents::<Session>())?
            .into_iter()
            .filter(|s| filter.matches(s))
            .collect();
        sessions.sort_by_key(|s| s.start_time);
        Ok(sessions)
    }

    /// The session that started at `start` for `goal_id`, if recorded.
    pub fn find_session_by_start(
        &self,
        start: Timestamp,
        goal_id: Option<&str>,
    ) -> Result<Option<Session>> {
        let filter = SessionFilter {
            start_time: Some(start),
            ..Default::default()
        };
        Ok(self
            .list::<Session, _>(filter)?
            .find(|s| s.goal_id.as_deref() == goal_id))
    }
}
