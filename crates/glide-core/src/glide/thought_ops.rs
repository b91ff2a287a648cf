//! Thought operations for Glide.

use super::Glide;
use crate::{
    error::Result,
    models::{Thought, ThoughtFilter},
    params::{Id, JotThought, ListThoughts},
};

impl Glide {
    pub async fn jot_thought(&self, params: &JotThought) -> Result<Thought> {
        let params = params.clone();
        self.with_store(move |store| store.jot_thought(&params.text, params.goal_id.as_deref()))
            .await
    }

    /// Newest thoughts first.
    pub async fn list_thoughts(&self, params: &ListThoughts) -> Result<Vec<Thought>> {
        let filter = ThoughtFilter::from(params);
        let limit = params.limit;
        self.with_store(move |store| store.list_thoughts(&filter, limit))
            .await
    }

    pub async fn remove_thought(&self, params: &Id) -> Result<Thought> {
        let id = params.id.clone();
        self.with_store(move |store| store.remove_thought(&id)).await
    }
}
