use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use syllabus_core::{ContentRecord, ExamRecord, RecordId, RequestError};

use crate::config::{ApiConfig, ConfigError};
use crate::credentials::{CookieCredentials, CredentialProvider};
use crate::protocol::{
    exam_segments, ContentPayload, ExamPayload, CONTENTS_COLLECTION, CSRF_HEADER,
    EXAMS_COLLECTION,
};

/// The only way the rest of the client reaches the syllabus backend.
///
/// Every operation is a single round trip with no retry.
pub trait ApiGateway: Send + Sync {
    /// GET `examenes/`.
    fn fetch_exams(&self) -> impl Future<Output = Result<Vec<ExamRecord>, RequestError>> + Send;

    /// POST `contenidos/`.
    fn create_content(
        &self,
        title: &str,
        description: &str,
    ) -> impl Future<Output = Result<ContentRecord, RequestError>> + Send;

    /// POST `examenes/`.
    fn create_exam(
        &self,
        name: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<ExamRecord, RequestError>> + Send;

    /// PUT `examenes/{id}/`.
    fn update_exam(
        &self,
        id: &RecordId,
        name: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<ExamRecord, RequestError>> + Send;

    /// DELETE `examenes/{id}/`.
    fn delete_exam(&self, id: &RecordId) -> impl Future<Output = Result<(), RequestError>> + Send;
}

/// reqwest-backed gateway that speaks the Django REST contract.
pub struct HttpApiGateway {
    client: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpApiGateway {
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ConfigError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|_| ConfigError::Invalid("base_url", "must be a valid URL"))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(
                "base_url",
                "scheme must be http or https",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Gateway with a cookie jar seeded from `config.cookies`.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let jar = match &config.cookies {
            Some(cookies) => CookieCredentials::parse(cookies),
            None => CookieCredentials::new(),
        };
        Self::new(config, Arc::new(jar))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    /// Base URL followed by `segments`, each percent-encoded as a single
    /// segment, with the trailing slash Django routes expect.
    fn url<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        // Always Ok: `new` only accepts http(s) base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }
        url
    }

    /// Start a request with the session cookie and anti-forgery token attached.
    fn request<I>(&self, method: Method, segments: I) -> RequestBuilder
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let url = self.url(segments);
        tracing::debug!("{} {}", method, url);

        let mut builder = self.client.request(method, url);
        if let Some(cookie) = self.credentials.cookie_header() {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(token) = self.credentials.csrf_token() {
            builder = builder.header(CSRF_HEADER, token);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, RequestError> {
        let response = builder
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        for value in response.headers().get_all(SET_COOKIE) {
            if let Ok(set_cookie) = value.to_str() {
                self.credentials.store_set_cookie(set_cookie);
            }
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("API returned {}: {}", status, body);
            return Err(RequestError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, RequestError> {
        let response = self.send(builder).await?;
        let body = response
            .text()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| RequestError::Decode(e.to_string()))
    }
}

impl ApiGateway for HttpApiGateway {
    async fn fetch_exams(&self) -> Result<Vec<ExamRecord>, RequestError> {
        let builder = self.request(Method::GET, [EXAMS_COLLECTION]);
        self.send_json(builder).await
    }

    async fn create_content(
        &self,
        title: &str,
        description: &str,
    ) -> Result<ContentRecord, RequestError> {
        let builder = self
            .request(Method::POST, [CONTENTS_COLLECTION])
            .json(&ContentPayload::new(title, description));
        self.send_json(builder).await
    }

    async fn create_exam(&self, name: &str, date: NaiveDate) -> Result<ExamRecord, RequestError> {
        let builder = self
            .request(Method::POST, [EXAMS_COLLECTION])
            .json(&ExamPayload::new(name, date));
        self.send_json(builder).await
    }

    async fn update_exam(
        &self,
        id: &RecordId,
        name: &str,
        date: NaiveDate,
    ) -> Result<ExamRecord, RequestError> {
        let segments = exam_segments(id)?;
        let builder = self
            .request(Method::PUT, &segments)
            .json(&ExamPayload::new(name, date));
        self.send_json(builder).await
    }

    async fn delete_exam(&self, id: &RecordId) -> Result<(), RequestError> {
        let segments = exam_segments(id)?;
        let builder = self.request(Method::DELETE, &segments);
        self.send(builder).await?;
        Ok(())
    }
}
