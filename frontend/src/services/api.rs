use chrono::NaiveDate;
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    error_message_from_body, Activity, ActivityPayload, Behavior, BehaviorPayload, Choice, Client,
    ClientPayload, Goal, GoalPayload, Id, ListFilters, ListResponse, LoginRequest, Paginated,
    ReportFilters, ReportType, Schedule, SchedulePayload, ScheduleStatus, Shift, ShiftPayload,
    ShiftStatus, StatusPatch, TokenResponse, User, UserPayload,
};
use thiserror::Error;

use crate::services::logging::Logger;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,
    #[error("Unexpected response from server: {0}")]
    Parse(String),
    #[error("Could not encode request: {0}")]
    Serialize(String),
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// Map a non-success response to an error with a readable message.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        let message = error_message_from_body(body)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        ApiError::Server { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// A REST collection the dashboard reads and writes.
pub trait Resource: DeserializeOwned + 'static {
    /// Collection path below the API root, e.g. `clients`.
    const PATH: &'static str;
    type Payload: Serialize;
}

impl Resource for Client {
    const PATH: &'static str = "clients";
    type Payload = ClientPayload;
}

impl Resource for User {
    const PATH: &'static str = "users";
    type Payload = UserPayload;
}

impl Resource for Behavior {
    const PATH: &'static str = "behaviors";
    type Payload = BehaviorPayload;
}

impl Resource for Activity {
    const PATH: &'static str = "activities";
    type Payload = ActivityPayload;
}

impl Resource for Schedule {
    const PATH: &'static str = "schedules";
    type Payload = SchedulePayload;
}

impl Resource for Shift {
    const PATH: &'static str = "shifts";
    type Payload = ShiftPayload;
}

impl Resource for Goal {
    const PATH: &'static str = "goals";
    type Payload = GoalPayload;
}

/// API client for the CareConnect REST API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
        }
    }

    /// `{base}/{path}/`, with the trailing slash the API routes expect.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            path.trim_matches('/')
        )
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let method = request.method();
        let url = request.url();
        let response = request.send().await.map_err(|e| {
            Logger::error_with_component("api", &format!("{method:?} {url} failed: {e}"));
            ApiError::Network(e.to_string())
        })?;

        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_response(status, &body);
        Logger::warn_with_component("api", &format!("{method:?} {url} -> {status}: {error}"));
        Err(error)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let builder = Request::get(&self.url(path))
            .query(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        let request = self
            .authorize(builder)
            .build()
            .map_err(|e| ApiError::Serialize(e.to_string()))?;
        Self::decode(self.send(request).await?).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .authorize(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Serialize(e.to_string()))?;
        Self::decode(self.send(request).await?).await
    }

    async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .authorize(Request::patch(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Serialize(e.to_string()))?;
        Self::decode(self.send(request).await?).await
    }

    // Authentication

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.post_json("auth/login", &body).await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("auth/user", &[]).await
    }

    // Resources

    pub async fn list<R: Resource>(&self, filters: &ListFilters) -> Result<Paginated<R>, ApiError> {
        let response: ListResponse<R> = self.get_json(R::PATH, filters.params()).await?;
        Ok(response.into_page())
    }

    pub async fn get<R: Resource>(&self, id: Id) -> Result<R, ApiError> {
        self.get_json(&format!("{}/{id}", R::PATH), &[]).await
    }

    pub async fn create<R: Resource>(&self, payload: &R::Payload) -> Result<R, ApiError> {
        self.post_json(R::PATH, payload).await
    }

    /// Partial update; absent payload fields are left untouched server-side.
    pub async fn update<R: Resource>(&self, id: Id, payload: &R::Payload) -> Result<R, ApiError> {
        self.patch_json(&format!("{}/{id}", R::PATH), payload).await
    }

    /// Delete by collection name, for callers that only know the record kind at runtime.
    pub async fn delete_from(&self, resource: &str, id: Id) -> Result<(), ApiError> {
        let request = self
            .authorize(Request::delete(&self.url(&format!("{resource}/{id}"))))
            .build()
            .map_err(|e| ApiError::Serialize(e.to_string()))?;
        self.send(request).await?;
        Ok(())
    }

    pub async fn update_schedule_status(
        &self,
        id: Id,
        status: ScheduleStatus,
    ) -> Result<Schedule, ApiError> {
        self.patch_json(&format!("schedules/{id}"), &StatusPatch { status })
            .await
    }

    pub async fn update_shift_status(&self, id: Id, status: ShiftStatus) -> Result<Shift, ApiError> {
        self.patch_json(&format!("shifts/{id}"), &StatusPatch { status })
            .await
    }

    // Reports

    /// Export a report as raw bytes. Unsupported report types fail before any request is sent.
    pub async fn generate_report(
        &self,
        filters: &ReportFilters,
        today: NaiveDate,
    ) -> Result<Vec<u8>, ApiError> {
        let query = filters
            .to_query(today)
            .map_err(|e| ApiError::Rejected(e.to_string()))?;
        let builder = Request::get(&self.url(&report_path(filters.report_type)))
            .query(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        let request = self
            .authorize(builder)
            .build()
            .map_err(|e| ApiError::Serialize(e.to_string()))?;
        let response = self.send(request).await?;
        response
            .binary()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

fn report_path(report_type: ReportType) -> String {
    format!("reports/{}/export", report_type.value())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let api = ApiClient::new("/api/v1/", None);
        assert_eq!(api.url("clients"), "/api/v1/clients/");
        assert_eq!(api.url("clients/12"), "/api/v1/clients/12/");
        assert_eq!(api.url("/auth/login/"), "/api/v1/auth/login/");
        assert_eq!(
            api.url(&report_path(ReportType::Behavior)),
            "/api/v1/reports/behavior/export/"
        );
    }

    #[test]
    fn test_error_from_response() {
        assert_eq!(ApiError::from_response(401, ""), ApiError::Unauthorized);
        assert_eq!(
            ApiError::from_response(400, r#"{"detail": "Carer is already booked"}"#).to_string(),
            "Carer is already booked"
        );
        assert_eq!(
            ApiError::from_response(502, "<html>Bad gateway</html>").to_string(),
            "Request failed with status 502"
        );
    }

    #[test]
    fn test_resource_paths() {
        assert_eq!(<Client as Resource>::PATH, "clients");
        assert_eq!(<Schedule as Resource>::PATH, "schedules");
        assert_eq!(<Goal as Resource>::PATH, "goals");
    }
}
