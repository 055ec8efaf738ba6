use serde::{Deserialize, Serialize};

/// Role carried in the bearer token issued by the external identity provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_defaults_to_user() {
        assert_eq!(UserRole::default(), UserRole::User);
    }

    #[test]
    fn role_round_trips_through_json() {
        let json = serde_json::to_string(&UserRole::Admin).unwrap();
        assert_eq!(json, "\"Admin\"");
        assert_eq!(serde_json::from_str::<UserRole>(&json).unwrap(), UserRole::Admin);
    }
}
