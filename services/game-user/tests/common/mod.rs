//! 测试用内存仓储

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use game_errors::{AppError, AppResult};
use game_user::domain::{User, UserId, UserRepository, UserSummary};

#[derive(Default)]
struct State {
    users: Vec<User>,
    edges: BTreeSet<(UserId, UserId)>,
}

/// 与 PostgreSQL 实现语义一致的内存仓储，并记录各方法的调用次数
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<State>,
    fail_storage: AtomicBool,
    pub find_calls: AtomicUsize,
    pub update_state_calls: AtomicUsize,
    pub update_friends_calls: AtomicUsize,
    pub list_friends_calls: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 之后的所有调用都返回存储错误
    pub fn fail_storage(&self) {
        self.fail_storage.store(true, Ordering::SeqCst);
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        Self::calls(&self.find_calls)
            + Self::calls(&self.update_state_calls)
            + Self::calls(&self.update_friends_calls)
            + Self::calls(&self.list_friends_calls)
    }

    pub fn edge_count(&self) -> usize {
        self.state.lock().unwrap().edges.len()
    }

    fn check(&self) -> AppResult<()> {
        if self.fail_storage.load(Ordering::SeqCst) {
            return Err(AppError::database("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, name: &str) -> AppResult<User> {
        self.check()?;
        let user = User::new(name);
        self.state.lock().unwrap().users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: &UserId) -> AppResult<Option<User>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn update_user_state(&self, id: &UserId, games_played: i32, score: i64) -> AppResult<()> {
        self.update_state_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if let Some(user) = state.users.iter_mut().find(|u| u.id == *id) {
            user.apply_state(games_played, score);
        }
        Ok(())
    }

    async fn update_friends(&self, id: &UserId, friends: &[UserId]) -> AppResult<u64> {
        self.update_friends_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let inserted = friends
            .iter()
            .filter(|friend| state.edges.insert((*id, **friend)))
            .count();
        Ok(inserted as u64)
    }

    async fn list_friends(&self, id: &UserId) -> AppResult<Vec<UserSummary>> {
        self.list_friends_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let state = self.state.lock().unwrap();
        let friends = state
            .edges
            .iter()
            .filter(|(user_id, _)| user_id == id)
            .filter_map(|(_, friend_id)| state.users.iter().find(|u| u.id == *friend_id))
            .map(UserSummary::from)
            .collect();
        Ok(friends)
    }

    async fn list(&self) -> AppResult<Vec<UserSummary>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().map(UserSummary::from).collect())
    }
}
