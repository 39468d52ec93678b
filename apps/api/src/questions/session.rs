//! Last-submitted requirement per session, so "regenerate" can replay it.
//!
//! This state belongs to the HTTP layer. The generator itself stays stateless.
//! The store holds at most `capacity` sessions; the oldest are evicted first.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::questions::models::JobRequirement;

pub const DEFAULT_SESSION_CAPACITY: usize = 1024;

#[derive(Default)]
struct Sessions {
    requirements: HashMap<Uuid, JobRequirement>,
    /// Session ids in creation order, oldest first.
    order: VecDeque<Uuid>,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Sessions>>,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SESSION_CAPACITY)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Sessions::default())),
            capacity: capacity.max(1),
        }
    }

    /// Records a submitted requirement under a fresh session id.
    pub async fn create(&self, requirement: JobRequirement) -> Uuid {
        let session_id = Uuid::new_v4();
        let mut sessions = self.inner.write().await;

        while sessions.order.len() >= self.capacity {
            if let Some(evicted) = sessions.order.pop_front() {
                sessions.requirements.remove(&evicted);
                debug!("Session {evicted} evicted");
            }
        }

        sessions.requirements.insert(session_id, requirement);
        sessions.order.push_back(session_id);
        session_id
    }

    pub async fn get(&self, session_id: Uuid) -> Option<JobRequirement> {
        self.inner
            .read()
            .await
            .requirements
            .get(&session_id)
            .cloned()
    }

    #[cfg(test)]
    async fn session_count(&self) -> usize {
        self.inner.read().await.requirements.len()
    }
}
