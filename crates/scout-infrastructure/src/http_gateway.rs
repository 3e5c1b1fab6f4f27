//! HTTP implementation of the school gateway.
//!
//! The remote service has accumulated two wire shapes for school records:
//! the catalog endpoint speaks snake_case while the recommender speaks
//! capitalized keys (including `Student-Teacher Ratio` and `Test Scores`).
//! Both are normalized to the canonical [`School`] here; nothing past this
//! module ever branches on wire shape.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use scout_core::config::ClientConfig;
use scout_core::gateway::{RegisterAck, SchoolGateway};
use scout_core::interaction::InteractionEvent;
use scout_core::school::{Location, RecommendedSchool, School};
use scout_core::session::Session;
use scout_core::{Result, ScoutError};

/// Typed HTTP client for the school-discovery service.
#[derive(Clone)]
pub struct HttpSchoolGateway {
    client: Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    user: Option<WireUser>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(default)]
    username: String,
}

/// School record as the catalog endpoint returns it (snake_case, flat
/// coordinates).
#[derive(Debug, Deserialize)]
struct WireSchool {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    curriculum: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    tuition: f64,
    #[serde(default)]
    focus: String,
    #[serde(default)]
    facilities: String,
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
    #[serde(default)]
    student_teacher_ratio: f64,
    #[serde(default)]
    test_scores: f64,
}

impl From<WireSchool> for School {
    fn from(wire: WireSchool) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            kind: wire.kind,
            curriculum: wire.curriculum,
            rating: wire.rating,
            tuition: wire.tuition,
            focus: wire.focus,
            facilities: wire.facilities,
            location: Location {
                latitude: wire.latitude,
                longitude: wire.longitude,
            },
            student_teacher_ratio: wire.student_teacher_ratio,
            test_scores: wire.test_scores,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecommendationsResponse {
    #[serde(default = "default_true")]
    success: bool,
    #[serde(default)]
    recommendations: Vec<WireRecommendedSchool>,
}

fn default_true() -> bool {
    true
}

/// School record as the recommender returns it (capitalized keys plus an
/// optional similarity score).
#[derive(Debug, Deserialize)]
struct WireRecommendedSchool {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Type", default)]
    kind: String,
    #[serde(rename = "Curriculum", default)]
    curriculum: String,
    #[serde(rename = "Rating", default)]
    rating: f64,
    #[serde(rename = "Tuition", default)]
    tuition: f64,
    #[serde(rename = "Focus", default)]
    focus: String,
    #[serde(rename = "Facilities", default)]
    facilities: String,
    #[serde(rename = "Latitude", default)]
    latitude: f64,
    #[serde(rename = "Longitude", default)]
    longitude: f64,
    #[serde(rename = "Student-Teacher Ratio", default)]
    student_teacher_ratio: f64,
    #[serde(rename = "Test Scores", default)]
    test_scores: f64,
    #[serde(default)]
    similarity_score: Option<f64>,
}

impl From<WireRecommendedSchool> for RecommendedSchool {
    fn from(wire: WireRecommendedSchool) -> Self {
        // Older recommender snapshots omit the id; the name is the stable
        // identifier the recommender itself keys on.
        let id = wire.id.unwrap_or_else(|| wire.name.clone());
        Self {
            school: School {
                id,
                name: wire.name,
                kind: wire.kind,
                curriculum: wire.curriculum,
                rating: wire.rating,
                tuition: wire.tuition,
                focus: wire.focus,
                facilities: wire.facilities,
                location: Location {
                    latitude: wire.latitude,
                    longitude: wire.longitude,
                },
                student_teacher_ratio: wire.student_teacher_ratio,
                test_scores: wire.test_scores,
            },
            similarity_score: wire.similarity_score,
        }
    }
}

#[derive(Debug, Serialize)]
struct InteractionRequest<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    school_name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

impl HttpSchoolGateway {
    /// Creates a gateway from the client configuration.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_base_url(&config.api_base_url, config.request_timeout())
    }

    /// Creates a gateway against an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn transport_error(context: &str, e: reqwest::Error) -> ScoutError {
        if e.is_timeout() {
            ScoutError::network(format!("{}: request timed out", context))
        } else {
            ScoutError::network(format!("{}: {}", context, e))
        }
    }

    /// Extracts the service's `message` field from an error body, falling
    /// back to the given default.
    async fn failure_message(response: reqwest::Response, fallback: &str) -> String {
        #[derive(Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            message: String,
        }

        match response.json::<ErrorBody>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => fallback.to_string(),
        }
    }
}

#[async_trait]
impl SchoolGateway for HttpSchoolGateway {
    async fn login(&self, username: &str, password: &str) -> Result<Session> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ScoutError::validation("Username and password are required"));
        }

        let response = self
            .client
            .post(self.url("auth/login"))
            .json(&LoginRequest { username, password })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Self::transport_error("Login request failed", e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let message = Self::failure_message(response, "Invalid credentials").await;
            return Err(ScoutError::auth(message));
        }
        if !status.is_success() {
            return Err(ScoutError::network(format!(
                "Login failed with status {}",
                status
            )));
        }

        let body: AuthResponse = response
            .json()
            .await
            .map_err(|e| Self::transport_error("Failed to parse login response", e))?;

        match body.user {
            Some(user) if body.success => Ok(Session {
                user_id: user.id,
                name: user.name,
                // Older user documents predate the username field
                username: if user.username.is_empty() {
                    username.to_string()
                } else {
                    user.username
                },
            }),
            _ => Err(ScoutError::auth(
                body.message
                    .unwrap_or_else(|| "Invalid credentials".to_string()),
            )),
        }
    }

    async fn register(&self, username: &str, password: &str, name: &str) -> Result<RegisterAck> {
        if username.trim().is_empty() || password.is_empty() || name.trim().is_empty() {
            return Err(ScoutError::validation(
                "Username, password and name are required",
            ));
        }

        let response = self
            .client
            .post(self.url("auth/register"))
            .json(&RegisterRequest {
                username,
                password,
                name,
            })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Self::transport_error("Register request failed", e))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let message = Self::failure_message(response, "Registration rejected").await;
            return Err(ScoutError::validation(message));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = Self::failure_message(response, "Registration not permitted").await;
            return Err(ScoutError::auth(message));
        }
        if !status.is_success() {
            return Err(ScoutError::network(format!(
                "Registration failed with status {}",
                status
            )));
        }

        #[derive(Deserialize)]
        struct RegisterResponse {
            #[serde(default)]
            success: bool,
            #[serde(default)]
            message: Option<String>,
        }

        let body: RegisterResponse = response
            .json()
            .await
            .map_err(|e| Self::transport_error("Failed to parse register response", e))?;

        if !body.success {
            return Err(ScoutError::validation(
                body.message
                    .unwrap_or_else(|| "Registration rejected".to_string()),
            ));
        }

        Ok(RegisterAck {
            message: body
                .message
                .unwrap_or_else(|| "User registered successfully".to_string()),
        })
    }

    async fn list_schools(&self) -> Result<Vec<School>> {
        let response = self
            .client
            .get(self.url("schools"))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Self::transport_error("Schools request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::network(format!(
                "Schools request failed with status {}",
                status
            )));
        }

        let schools: Vec<WireSchool> = response
            .json()
            .await
            .map_err(|e| Self::transport_error("Failed to parse schools response", e))?;

        Ok(schools.into_iter().map(School::from).collect())
    }

    async fn get_recommendations(&self, user_id: &str) -> Result<Vec<RecommendedSchool>> {
        let response = self
            .client
            .get(self.url(&format!("recommendations/{}", user_id)))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Self::transport_error("Recommendations request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::network(format!(
                "Recommendations request failed with status {}",
                status
            )));
        }

        let body: RecommendationsResponse = response
            .json()
            .await
            .map_err(|e| Self::transport_error("Failed to parse recommendations response", e))?;

        // success=false means "nothing for this user yet", not a failure
        if !body.success {
            tracing::debug!("No recommendations available for user {}", user_id);
            return Ok(Vec::new());
        }

        Ok(body
            .recommendations
            .into_iter()
            .map(RecommendedSchool::from)
            .collect())
    }

    async fn report_interaction(&self, event: &InteractionEvent) -> Result<()> {
        let response = self
            .client
            .post(self.url("user/interactions"))
            .json(&InteractionRequest {
                user_id: &event.user_id,
                school_name: &event.school_name,
                kind: event.kind.as_str(),
            })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Self::transport_error("Interaction report failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::network(format!(
                "Interaction report failed with status {}",
                status
            )));
        }

        Ok(())
    }
}
