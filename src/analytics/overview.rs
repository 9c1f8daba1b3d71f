//! Admin dashboard stat cards: form volume, submitter mix, user
//! verification backlog and follow-up outcomes.

use serde::Serialize;

use crate::models::enums::{FollowUpStatus, SubmitterRole, UserType};
use crate::models::User;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStats {
    pub lifestyle_count: i64,
    pub medical_count: i64,
    pub total_count: i64,
}

pub fn form_stats(lifestyle_count: i64, medical_count: i64) -> FormStats {
    FormStats {
        lifestyle_count,
        medical_count,
        total_count: lifestyle_count + medical_count,
    }
}

/// Form counts keyed by submitter role.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoleCounts {
    pub citizen: i64,
    pub health_worker: i64,
}

impl RoleCounts {
    pub fn from_counts(counts: &[(SubmitterRole, i64)]) -> Self {
        let mut out = Self::default();
        for (role, count) in counts {
            match role {
                SubmitterRole::Citizen => out.citizen += count,
                SubmitterRole::HealthWorker => out.health_worker += count,
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormBreakdown {
    pub lifestyle: RoleCounts,
    pub medical: RoleCounts,
}

pub fn form_breakdown(
    lifestyle: &[(SubmitterRole, i64)],
    medical: &[(SubmitterRole, i64)],
) -> FormBreakdown {
    FormBreakdown {
        lifestyle: RoleCounts::from_counts(lifestyle),
        medical: RoleCounts::from_counts(medical),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersByRole {
    pub citizens: usize,
    pub health_workers: usize,
    pub doctors: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: usize,
    pub verified_users: usize,
    pub pending_users: usize,
    pub by_role: UsersByRole,
}

pub fn user_stats(users: &[User]) -> UserStats {
    let mut by_role = UsersByRole::default();
    let mut verified_users = 0;

    for user in users {
        if user.is_verified {
            verified_users += 1;
        }
        match user.user_type {
            UserType::Citizen => by_role.citizens += 1,
            UserType::HealthWorker => by_role.health_workers += 1,
            UserType::Doctor => by_role.doctors += 1,
            UserType::Admin => {}
        }
    }

    UserStats {
        total_users: users.len(),
        verified_users,
        pending_users: users.len() - verified_users,
        by_role,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FollowUpStats {
    pub pending: usize,
    pub recovered: usize,
    pub referred: usize,
}

/// Tally follow-ups by status; unknown or missing status counts as pending.
pub fn follow_up_stats(statuses: &[Option<String>]) -> FollowUpStats {
    let mut stats = FollowUpStats::default();
    for status in statuses {
        match FollowUpStatus::from_loose(status.as_deref()) {
            FollowUpStatus::Pending => stats.pending += 1,
            FollowUpStatus::Recovered => stats.recovered += 1,
            FollowUpStatus::Referred => stats.referred += 1,
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(user_type: UserType, is_verified: bool) -> User {
        User {
            id: Uuid::new_v4(),
            full_name: None,
            email: format!("{}@example.org", Uuid::new_v4()),
            user_type,
            is_verified,
        }
    }

    #[test]
    fn form_stats_total() {
        assert_eq!(
            form_stats(12, 5),
            FormStats {
                lifestyle_count: 12,
                medical_count: 5,
                total_count: 17,
            }
        );
    }

    #[test]
    fn breakdown_fills_missing_roles_with_zero() {
        let breakdown = form_breakdown(&[(SubmitterRole::Citizen, 4)], &[]);
        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "lifestyle": { "citizen": 4, "health_worker": 0 },
                "medical": { "citizen": 0, "health_worker": 0 }
            })
        );
    }

    #[test]
    fn user_stats_split_by_role_and_verification() {
        let users = vec![
            user(UserType::Citizen, true),
            user(UserType::Citizen, false),
            user(UserType::HealthWorker, true),
            user(UserType::Doctor, false),
            user(UserType::Admin, true),
        ];
        let stats = user_stats(&users);
        assert_eq!(stats.total_users, 5);
        assert_eq!(stats.verified_users, 3);
        assert_eq!(stats.pending_users, 2);
        assert_eq!(
            stats.by_role,
            UsersByRole {
                citizens: 2,
                health_workers: 1,
                doctors: 1,
            }
        );

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["byRole"]["healthWorkers"], 1);
    }

    #[test]
    fn follow_up_unknown_status_is_pending() {
        let statuses = vec![
            Some("pending".to_string()),
            Some("Recovered".to_string()),
            Some("referred".to_string()),
            Some("escalated".to_string()),
            None,
        ];
        assert_eq!(
            follow_up_stats(&statuses),
            FollowUpStats {
                pending: 3,
                recovered: 1,
                referred: 1,
            }
        );
    }
}
