//! Credential and exchange wire types

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// `expires_in` values above this are absolute unix timestamps, not lifetimes
const ABSOLUTE_EXPIRY_THRESHOLD: i64 = 1_000_000_000;

/// Fixed identity sent to the upstream `/register` endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationIdentity {
    pub email: String,
    pub name: String,
    pub mobile_no: String,
    pub github_username: String,
    pub roll_no: String,
    pub college_name: String,
    pub access_code: String,
}

/// Client identifier/secret pair handed out by `/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRegistration {
    #[serde(rename = "clientID")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// Bearer credential currently in use
///
/// `expires_at` is informational. The credential stays in use until the
/// upstream rejects it with an authorization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub client: ClientRegistration,
    pub identity: RegistrationIdentity,
}

/// Body of the `/auth` exchange: identity fields plus client pair
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest<'a> {
    #[serde(flatten)]
    pub identity: &'a RegistrationIdentity,
    #[serde(flatten)]
    pub client: &'a ClientRegistration,
}

/// Response of the `/auth` exchange
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(rename = "token_type", alias = "tokenType", default = "default_token_type")]
    pub token_type: String,
    #[serde(rename = "access_token", alias = "token")]
    pub access_token: String,
    #[serde(rename = "expires_in", alias = "expiresIn")]
    pub expires_in: i64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl AuthResponse {
    /// Resolve the declared lifetime into an instant relative to `now`
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        if self.expires_in > ABSOLUTE_EXPIRY_THRESHOLD {
            Utc.timestamp_opt(self.expires_in, 0)
                .single()
                .unwrap_or(now)
        } else {
            now + chrono::Duration::seconds(self.expires_in.max(0))
        }
    }

    pub fn into_credential(
        self,
        client: ClientRegistration,
        identity: RegistrationIdentity,
        now: DateTime<Utc>,
    ) -> Credential {
        let expires_at = self.expires_at(now);
        Credential {
            token: self.access_token,
            token_type: self.token_type,
            expires_at,
            client,
            identity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> RegistrationIdentity {
        RegistrationIdentity {
            email: "dev@example.com".to_string(),
            name: "Dev".to_string(),
            mobile_no: "9999999999".to_string(),
            github_username: "dev".to_string(),
            roll_no: "42".to_string(),
            college_name: "Example College".to_string(),
            access_code: "abc".to_string(),
        }
    }

    #[test]
    fn test_identity_uses_camel_case_keys() {
        let json = serde_json::to_value(identity()).unwrap();

        assert_eq!(json["mobileNo"], "9999999999");
        assert_eq!(json["githubUsername"], "dev");
        assert_eq!(json["rollNo"], "42");
        assert_eq!(json["collegeName"], "Example College");
        assert_eq!(json["accessCode"], "abc");
    }

    #[test]
    fn test_auth_request_flattens_identity_and_client() {
        let identity = identity();
        let client = ClientRegistration {
            client_id: "cid".to_string(),
            client_secret: "secret".to_string(),
        };

        let json = serde_json::to_value(AuthRequest { identity: &identity, client: &client }).unwrap();

        assert_eq!(json["clientID"], "cid");
        assert_eq!(json["clientSecret"], "secret");
        assert_eq!(json["email"], "dev@example.com");
    }

    #[test]
    fn test_auth_response_accepts_both_spellings() {
        let snake: AuthResponse = serde_json::from_str(
            r#"{"token_type":"Bearer","access_token":"abc","expires_in":300}"#,
        )
        .unwrap();
        let camel: AuthResponse =
            serde_json::from_str(r#"{"tokenType":"Bearer","token":"abc","expiresIn":300}"#).unwrap();

        assert_eq!(snake.access_token, camel.access_token);
        assert_eq!(snake.expires_in, camel.expires_in);
    }

    #[test]
    fn test_expiry_relative_and_absolute() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let relative = AuthResponse {
            token_type: "Bearer".to_string(),
            access_token: "t".to_string(),
            expires_in: 300,
        };
        let absolute = AuthResponse {
            expires_in: 1_700_000_900,
            ..relative.clone()
        };

        assert_eq!(relative.expires_at(now).timestamp(), 1_700_000_300);
        assert_eq!(absolute.expires_at(now).timestamp(), 1_700_000_900);
    }
}
