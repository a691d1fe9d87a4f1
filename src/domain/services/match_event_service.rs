// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use crate::domain::models::match_event::{EventType, MatchEvent, MAX_MINUTE_OF_MATCH};
use crate::domain::repositories::match_event_repository::MatchEventRepository;
use crate::domain::repositories::match_repository::MatchRepository;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 事件发生的比赛、球队与时间
#[derive(Debug, Clone, Deserialize)]
pub struct EventContext {
    #[serde(default)]
    pub match_id: String,
    pub team_id: Option<String>,
    /// 缺省为当前时间
    pub timestamp: Option<DateTime<Utc>>,
    pub minute_of_match: i32,
}

/// 比赛事件服务
pub struct MatchEventService {
    events: Arc<dyn MatchEventRepository>,
    matches: Arc<dyn MatchRepository>,
}

impl MatchEventService {
    pub fn new(events: Arc<dyn MatchEventRepository>, matches: Arc<dyn MatchRepository>) -> Self {
        Self { events, matches }
    }

    /// 记录进球；乌龙球不记录助攻
    pub async fn add_goal(
        &self,
        ctx: EventContext,
        scorer_id: &str,
        assister_id: Option<&str>,
        own_goal: bool,
    ) -> Result<MatchEvent, DomainError> {
        let (event_type, assister, description) = if own_goal {
            (EventType::OwnGoal, None, "Own Goal")
        } else if let Some(assister) = assister_id.filter(|a| !a.is_empty()) {
            (EventType::Goal, Some(assister.to_string()), "Goal with assist")
        } else {
            (EventType::Goal, None, "Goal")
        };

        self.record(event_from(
            ctx,
            event_type,
            Some(scorer_id.to_string()),
            assister,
            description,
        ))
        .await
    }

    /// 记录黄牌或红牌
    pub async fn add_card(
        &self,
        ctx: EventContext,
        player_id: &str,
        card_type: EventType,
    ) -> Result<MatchEvent, DomainError> {
        let description = match card_type {
            EventType::YellowCard => "Yellow Card",
            EventType::RedCard => "Red Card",
            other => {
                return Err(DomainError::validation(format!(
                    "{} is not a card type",
                    other
                )))
            }
        };

        self.record(event_from(
            ctx,
            card_type,
            Some(player_id.to_string()),
            None,
            description,
        ))
        .await
    }

    /// 记录换人：主球员为下场球员，次球员为上场球员
    pub async fn add_substitution(
        &self,
        ctx: EventContext,
        player_out_id: &str,
        player_in_id: &str,
    ) -> Result<MatchEvent, DomainError> {
        if player_out_id == player_in_id {
            return Err(DomainError::validation(
                "player in and player out must differ",
            ));
        }

        self.record(event_from(
            ctx,
            EventType::Substitution,
            Some(player_out_id.to_string()),
            Some(player_in_id.to_string()),
            "Substitution",
        ))
        .await
    }

    /// 校验并保存一条任意类型的事件
    pub async fn record(&self, event: MatchEvent) -> Result<MatchEvent, DomainError> {
        self.validate(&event).await?;
        let saved = self.events.create(&event).await?;
        info!(
            "Recorded {} at minute {} in match {}",
            saved.event_type, saved.minute_of_match, saved.match_id
        );
        Ok(saved)
    }

    pub async fn update(&self, event: MatchEvent) -> Result<MatchEvent, DomainError> {
        self.validate(&event).await?;
        Ok(self.events.update(&event).await?)
    }

    async fn validate(&self, event: &MatchEvent) -> Result<(), DomainError> {
        if !(0..=MAX_MINUTE_OF_MATCH).contains(&event.minute_of_match) {
            return Err(DomainError::validation(format!(
                "minute_of_match must be between 0 and {}",
                MAX_MINUTE_OF_MATCH
            )));
        }

        let m = self
            .matches
            .find_by_id(&event.match_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Match"))?;

        if let Some(team_id) = &event.team_id {
            if !m.involves(team_id) {
                return Err(DomainError::validation(format!(
                    "team {} does not play in match {}",
                    team_id, m.id
                )));
            }
        }
        Ok(())
    }
}

fn event_from(
    ctx: EventContext,
    event_type: EventType,
    player_id: Option<String>,
    secondary_player_id: Option<String>,
    description: &str,
) -> MatchEvent {
    MatchEvent {
        id: Uuid::new_v4().to_string(),
        match_id: ctx.match_id,
        event_type,
        timestamp: ctx.timestamp.unwrap_or_else(Utc::now),
        minute_of_match: ctx.minute_of_match,
        player_id,
        secondary_player_id,
        team_id: ctx.team_id,
        description: Some(description.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::test_support::{memory_db, seed_league, HOME_TEAM, MATCH_ID};
    use crate::infrastructure::repositories::match_event_repo_impl::MatchEventRepositoryImpl;
    use crate::infrastructure::repositories::match_repo_impl::MatchRepositoryImpl;

    async fn service() -> MatchEventService {
        let db = memory_db().await;
        seed_league(&db).await;
        MatchEventService::new(
            Arc::new(MatchEventRepositoryImpl::new(db.clone())),
            Arc::new(MatchRepositoryImpl::new(db)),
        )
    }

    fn ctx(minute: i32) -> EventContext {
        EventContext {
            match_id: MATCH_ID.to_string(),
            team_id: Some(HOME_TEAM.to_string()),
            timestamp: None,
            minute_of_match: minute,
        }
    }

    #[tokio::test]
    async fn test_goal_descriptions() {
        let service = service().await;

        let goal = service.add_goal(ctx(10), "p1", Some("p2"), false).await.unwrap();
        assert_eq!(goal.event_type, EventType::Goal);
        assert_eq!(goal.secondary_player_id.as_deref(), Some("p2"));
        assert_eq!(goal.description.as_deref(), Some("Goal with assist"));

        let solo = service.add_goal(ctx(20), "p1", None, false).await.unwrap();
        assert_eq!(solo.description.as_deref(), Some("Goal"));

        let own = service.add_goal(ctx(30), "p3", Some("p2"), true).await.unwrap();
        assert_eq!(own.event_type, EventType::OwnGoal);
        assert!(own.secondary_player_id.is_none());
        assert_eq!(own.description.as_deref(), Some("Own Goal"));
    }

    #[tokio::test]
    async fn test_cards_and_substitution() {
        let service = service().await;

        let yellow = service
            .add_card(ctx(44), "p2", EventType::YellowCard)
            .await
            .unwrap();
        assert_eq!(yellow.description.as_deref(), Some("Yellow Card"));

        let red = service.add_card(ctx(80), "p2", EventType::RedCard).await.unwrap();
        assert_eq!(red.description.as_deref(), Some("Red Card"));

        let not_card = service.add_card(ctx(80), "p2", EventType::Goal).await;
        assert!(matches!(not_card, Err(DomainError::Validation(_))));

        let sub = service.add_substitution(ctx(60), "p1", "p2").await.unwrap();
        assert_eq!(sub.player_id.as_deref(), Some("p1"));
        assert_eq!(sub.secondary_player_id.as_deref(), Some("p2"));
        assert_eq!(sub.description.as_deref(), Some("Substitution"));
    }

    #[tokio::test]
    async fn test_minute_bounds() {
        let service = service().await;

        assert!(service.add_goal(ctx(0), "p1", None, false).await.is_ok());
        assert!(service.add_goal(ctx(130), "p1", None, false).await.is_ok());
        assert!(matches!(
            service.add_goal(ctx(131), "p1", None, false).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            service.add_goal(ctx(-1), "p1", None, false).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_requires_existing_match_and_participating_team() {
        let service = service().await;

        let mut missing = ctx(5);
        missing.match_id = "nope".to_string();
        assert!(matches!(
            service.add_goal(missing, "p1", None, false).await,
            Err(DomainError::NotFound(_))
        ));

        let mut foreign = ctx(5);
        foreign.team_id = Some("99".to_string());
        assert!(matches!(
            service.add_goal(foreign, "p1", None, false).await,
            Err(DomainError::Validation(_))
        ));
    }
}
