use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(SubmitterRole {
    Citizen => "citizen",
    HealthWorker => "health_worker",
});

str_enum!(UserType {
    Doctor => "doctor",
    HealthWorker => "health_worker",
    Citizen => "citizen",
    Admin => "admin",
});

str_enum!(FollowUpStatus {
    Pending => "pending",
    Recovered => "recovered",
    Referred => "referred",
});

str_enum!(RecordKind {
    Lifestyle => "Lifestyle",
    Medical => "Medical",
});

impl FollowUpStatus {
    /// Case-insensitive parse where anything unrecognised (or absent)
    /// counts as still pending. Whitespace is not stripped.
    pub fn from_loose(raw: Option<&str>) -> Self {
        raw.map(str::to_lowercase)
            .and_then(|s| s.parse().ok())
            .unwrap_or(Self::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn submitter_role_round_trip() {
        for (variant, s) in [
            (SubmitterRole::Citizen, "citizen"),
            (SubmitterRole::HealthWorker, "health_worker"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(SubmitterRole::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn user_type_round_trip() {
        for (variant, s) in [
            (UserType::Doctor, "doctor"),
            (UserType::HealthWorker, "health_worker"),
            (UserType::Citizen, "citizen"),
            (UserType::Admin, "admin"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(UserType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn follow_up_status_is_lenient() {
        assert_eq!(FollowUpStatus::from_loose(Some("Recovered")), FollowUpStatus::Recovered);
        assert_eq!(FollowUpStatus::from_loose(Some("REFERRED")), FollowUpStatus::Referred);
        assert_eq!(FollowUpStatus::from_loose(Some(" recovered")), FollowUpStatus::Pending);
        assert_eq!(FollowUpStatus::from_loose(Some("closed")), FollowUpStatus::Pending);
        assert_eq!(FollowUpStatus::from_loose(None), FollowUpStatus::Pending);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(SubmitterRole::from_str("doctor").is_err());
        assert!(UserType::from_str("").is_err());
        assert!(RecordKind::from_str("lifestyle").is_err());
    }
}
