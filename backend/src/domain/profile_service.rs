use anyhow::Result;
use shared::{AgeResponse, UpdateProfileRequest, UserProfile};
use std::sync::Arc;
use tracing::info;

use crate::domain::age::calculate_age;
use crate::domain::clock::Clock;
use crate::domain::error::parse_date;
use crate::domain::tracker_state::StateController;

#[derive(Clone)]
pub struct ProfileService {
    state: Arc<StateController>,
    clock: Arc<dyn Clock>,
}

impl ProfileService {
    pub fn new(state: Arc<StateController>, clock: Arc<dyn Clock>) -> Self {
        Self { state, clock }
    }

    pub async fn get_profile(&self) -> UserProfile {
        self.state.read(|s| s.profile.clone()).await
    }

    /// Replace names and birth date. Photos are only replaced when given.
    pub async fn update_profile(&self, request: UpdateProfileRequest) -> Result<UserProfile> {
        info!("Updating profile for baby: {}", request.baby_name);

        let birth_date = match request.birth_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_date(raw)?),
        };

        self.state
            .update(|profile: &mut UserProfile| {
                profile.mom_name = request.mom_name.trim().to_string();
                profile.baby_name = request.baby_name.trim().to_string();
                profile.birth_date = birth_date;
                if let Some(photo) = request.mom_photo {
                    profile.mom_photo = photo;
                }
                if let Some(photo) = request.baby_photo {
                    profile.baby_photo = photo;
                }
                Ok(profile.clone())
            })
            .await
    }

    pub async fn age(&self) -> AgeResponse {
        let birth_date = self.state.read(|s| s.profile.birth_date).await;

        AgeResponse {
            birth_date,
            age: calculate_age(birth_date, self.clock.today()),
        }
    }
}
