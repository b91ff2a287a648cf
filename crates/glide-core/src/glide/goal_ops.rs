//! Goal operations for Glide.

use jiff::Zoned;

use super::Glide;
use crate::{
    error::Result,
    models::Goal,
    params::{AddGoal, Id, ListGoals, TagGoal, UntagGoal, UpdateGoal},
    store::GoalUpdate,
};

impl Glide {
    /// Creates a new goal.
    pub async fn add_goal(&self, params: &AddGoal) -> Result<Goal> {
        let params = params.clone();
        self.with_store(move |store| {
            store.add_goal(&params.title, params.priority, params.deadline, &params.tags)
        })
        .await
    }

    /// Retrieves a goal by its ID.
    pub async fn get_goal(&self, params: &Id) -> Result<Goal> {
        let id = params.id.clone();
        self.with_store(move |store| store.get::<Goal>(&id)).await
    }

    /// Changes title, priority or deadline of a goal.
    pub async fn update_goal(&self, params: &UpdateGoal) -> Result<Goal> {
        let id = params.id.clone();
        let changes = GoalUpdate::from(params);
        self.with_store(move |store| store.update_goal(&id, changes))
            .await
    }

    /// Deletes a goal. Its sessions and thoughts are kept.
    pub async fn remove_goal(&self, params: &Id) -> Result<Goal> {
        let id = params.id.clone();
        self.with_store(move |store| store.remove_goal(&id)).await
    }

    pub async fn archive_goal(&self, params: &Id) -> Result<Goal> {
        let id = params.id.clone();
        self.with_store(move |store| store.archive_goal(&id)).await
    }

    pub async fn restore_goal(&self, params: &Id) -> Result<Goal> {
        let id = params.id.clone();
        self.with_store(move |store| store.restore_goal(&id)).await
    }

    pub async fn add_tags(&self, params: &TagGoal) -> Result<Goal> {
        let params = params.clone();
        self.with_store(move |store| store.add_tags(&params.id, &params.tags))
            .await
    }

    pub async fn remove_tag(&self, params: &UntagGoal) -> Result<Goal> {
        let params = params.clone();
        self.with_store(move |store| store.remove_tag(&params.id, &params.tag))
            .await
    }

    /// Lists goals; due-soon and overdue are evaluated against the local
    /// date.
    pub async fn list_goals(&self, params: &ListGoals) -> Result<Vec<Goal>> {
        let filter = params.to_filter(Zoned::now().date());
        self.with_store(move |store| store.list_goals(&filter)).await
    }

    /// Every tag in use with its goal count.
    pub async fn all_tags(&self) -> Result<Vec<(String, usize)>> {
        self.with_store(|store| store.all_tags()).await
    }
}
