//! In-memory backend used by the view tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use storage::dto::{
    account::SessionResponse,
    athlete::{AthleteDetailResponse, AthleteProfileResponse, VerificationEntry},
    common::SearchPage,
    search::SearchFilters,
};
use storage::models::{AthleteProfile, Level, ProfileWithOwner};
use storage::search::SearchQuery;
use uuid::Uuid;

use crate::traits::DirectoryBackend;
use crate::{ClientError, Result};

pub fn profile(name: &str, age: i32, level: Level, sport: &str) -> AthleteProfile {
    let now = chrono::Utc::now().naive_utc();
    AthleteProfile {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: name.to_string(),
        age,
        city: "Austin".to_string(),
        country: "USA".to_string(),
        sport: sport.to_string(),
        position: None,
        level,
        height: None,
        weight: None,
        graduation_year: None,
        highlights_url: None,
        bio: None,
        photo_url: None,
        phone: None,
        is_verified: false,
        contact_email_visible: false,
        contact_phone_visible: false,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    profiles: Mutex<Vec<AthleteProfile>>,
    session: Option<SessionResponse>,
    fail_searches: AtomicBool,
    fail_toggles: AtomicBool,
    search_calls: AtomicUsize,
    signed_out: AtomicBool,
}

impl MemoryBackend {
    pub fn new(profiles: Vec<AthleteProfile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
            ..Default::default()
        }
    }

    pub fn with_session(mut self, session: SessionResponse) -> Self {
        self.session = Some(session);
        self
    }

    pub fn fail_searches(&self, fail: bool) {
        self.fail_searches.store(fail, Ordering::SeqCst);
    }

    pub fn fail_toggles(&self, fail: bool) {
        self.fail_toggles.store(fail, Ordering::SeqCst);
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn signed_out(&self) -> bool {
        self.signed_out.load(Ordering::SeqCst)
    }

    pub fn is_verified(&self, id: Uuid) -> Option<bool> {
        self.profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.is_verified)
    }
}

fn owner_email(profile: &AthleteProfile) -> String {
    format!("{}@example.com", profile.name.to_lowercase().replace(' ', "."))
}

#[async_trait]
impl DirectoryBackend for MemoryBackend {
    async fn search(&self, filters: &SearchFilters) -> Result<SearchPage<AthleteProfileResponse>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_searches.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: 500,
                message: "Search failed".to_string(),
            });
        }

        let profiles = self.profiles.lock().unwrap();
        let (rows, count) = SearchQuery::from_filters(filters).apply(&profiles);
        let data = rows
            .into_iter()
            .cloned()
            .map(AthleteProfileResponse::from)
            .collect();
        Ok(SearchPage::new(data, count, filters.page))
    }

    async fn profile(&self, id: Uuid) -> Result<AthleteDetailResponse> {
        let profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or(ClientError::NotFound)?;

        Ok(AthleteDetailResponse::from(ProfileWithOwner {
            owner_email: Some(owner_email(profile)),
            profile: profile.clone(),
        }))
    }

    async fn verification_queue(&self) -> Result<Vec<VerificationEntry>> {
        let mut profiles = self.profiles.lock().unwrap().clone();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(profiles.into_iter().map(VerificationEntry::from).collect())
    }

    async fn toggle_verification(&self, id: Uuid, current: bool) -> Result<VerificationEntry> {
        if self.fail_toggles.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: 500,
                message: "An internal error occurred".to_string(),
            });
        }

        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ClientError::NotFound)?;
        profile.is_verified = !current;
        Ok(VerificationEntry::from(profile.clone()))
    }

    async fn current_session(&self) -> Result<SessionResponse> {
        if self.signed_out() {
            return Err(ClientError::Unauthorized);
        }
        self.session.clone().ok_or(ClientError::Unauthorized)
    }

    async fn sign_out(&self) -> Result<()> {
        if self.session.is_none() || self.signed_out() {
            return Err(ClientError::Unauthorized);
        }
        self.signed_out.store(true, Ordering::SeqCst);
        Ok(())
    }
}
