//! FAIRDOM-SEEK API client.
//!
//! Low-level HTTP client that handles the session and raw requests.
//! The CRUD operations live in [`crate::operations`].

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ClientConfig;
use crate::credentials::{CredentialProvider, Credentials, PromptCredentials};
use crate::error::{Result, SeekError};
use crate::models::{Document, Resource};
use crate::registry::ResourceRegistry;

const USER_AGENT: &str = concat!("seekapi/", env!("CARGO_PKG_VERSION"));
const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";
const RESPONSE_ENCODING: &str = "ISO-8859-1";
const TOKEN_HEADER: &str = "Authentication";
const IDENTITY_PATH: &str = "people/current";

/// How requests of a session are authenticated.
#[derive(Clone)]
enum Auth {
    Token(String),
    Basic(Credentials),
}

impl Auth {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Auth::Token(token) => request.header(TOKEN_HEADER, token),
            Auth::Basic(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
        }
    }
}

/// An authenticated session, created by [`SeekClient::login`].
#[derive(Clone)]
struct Session {
    auth: Auth,
    current_user: Option<Resource>,
}

/// FAIRDOM-SEEK API client.
///
/// Holds the base URL, the connection pool and, after [`login`](Self::login),
/// the session attached to every request. All other operations fail with
/// [`SeekError::NotLoggedIn`] until a login succeeds.
///
/// # Example
///
/// ```no_run
/// use seekapi::SeekClient;
///
/// # async fn example() -> seekapi::Result<()> {
/// let mut client = SeekClient::new("https://fairdomhub.org", true)?;
/// client.login(Some("my-api-token")).await?;
///
/// let studies = client.list("studies").await?;
/// println!("{} studies", studies.len());
/// # Ok(())
/// # }
/// ```
pub struct SeekClient {
    http: Client,
    base_url: Arc<Url>,
    config: ClientConfig,
    credentials: Arc<dyn CredentialProvider>,
    session: Option<Session>,
}

impl std::fmt::Debug for SeekClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeekClient")
            .field("base_url", &self.base_url.as_str())
            .field("logged_in", &self.session.is_some())
            .finish_non_exhaustive()
    }
}

impl SeekClient {
    /// Create a client for `base_url`.
    ///
    /// With `prefer_ipv6` false, this client's connections are bound to an
    /// IPv4 local address. Other clients in the process are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str, prefer_ipv6: bool) -> Result<Self> {
        Self::with_config(ClientConfig::new(base_url).with_ipv6(prefer_ipv6))
    }

    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a client from a full configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let base_url = Url::parse(&base_url_str)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API_MEDIA_TYPE));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(RESPONSE_ENCODING));

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout);

        if !config.prefer_ipv6 {
            builder = builder.local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        }

        let http = builder.build().map_err(SeekError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            config,
            credentials: Arc::new(PromptCredentials),
            session: None,
        })
    }

    /// Use `provider` for logins without a token instead of the terminal prompt.
    pub fn with_credential_provider<P>(mut self, provider: P) -> Self
    where
        P: CredentialProvider + 'static,
    {
        self.credentials = Arc::new(provider);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.config.registry
    }

    /// The identity returned at login, if the server reported one.
    pub fn current_user(&self) -> Option<&Resource> {
        self.session.as_ref().and_then(|s| s.current_user.as_ref())
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Log in.
    ///
    /// A token is sent in the `Authentication` header. Without one, the
    /// credential provider is asked for a username and password, sent as
    /// basic auth. The identity endpoint decides the outcome:
    ///
    /// - 200: the session and the returned identity are stored.
    /// - 404 with a token: the session is stored without an identity.
    /// - anything else: [`SeekError::ApiError`], and any previous session is kept.
    #[tracing::instrument(skip(self, token), fields(token = token.is_some()))]
    pub async fn login(&mut self, token: Option<&str>) -> Result<()> {
        let auth = match token {
            Some(token) => Auth::Token(token.to_string()),
            None => Auth::Basic(self.credentials.credentials().await?),
        };

        let url = self.base_url.join(IDENTITY_PATH)?;
        let response = auth
            .apply(self.http.get(url))
            .send()
            .await
            .map_err(SeekError::HttpError)?;

        let status = response.status();
        if status == StatusCode::OK {
            let me: Resource = Self::decode_data(response).await?;
            tracing::info!(
                "You are logged in as: {}",
                me.title().unwrap_or(me.id.as_str())
            );
            self.session = Some(Session {
                auth,
                current_user: Some(me),
            });
            Ok(())
        } else if status == StatusCode::NOT_FOUND && token.is_some() {
            tracing::info!("No identity reported for this token, continuing with token session");
            self.session = Some(Session {
                auth,
                current_user: None,
            });
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Drop the session and the stored identity.
    pub fn logout(&mut self) {
        self.session = None;
    }

    /// Fail with [`SeekError::NotLoggedIn`] unless a session exists.
    pub fn ensure_logged_in(&self) -> Result<()> {
        self.session().map(|_| ())
    }

    fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(SeekError::NotLoggedIn)
    }

    /// Build an authenticated request for `path` relative to the base URL.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let session = self.session()?;
        let url = self.base_url.join(path)?;
        Ok(session.auth.apply(self.http.request(method, url)))
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub(crate) async fn get(&self, path: &str) -> Result<Response> {
        self.request(Method::GET, path)?
            .send()
            .await
            .map_err(SeekError::HttpError)
    }

    /// Make a POST request with a JSON body.
    #[tracing::instrument(skip(self, body))]
    pub(crate) async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        self.request(Method::POST, path)?
            .json(body)
            .send()
            .await
            .map_err(SeekError::HttpError)
    }

    /// Make a PATCH request with a JSON body.
    #[tracing::instrument(skip(self, body))]
    pub(crate) async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        self.request(Method::PATCH, path)?
            .json(body)
            .send()
            .await
            .map_err(SeekError::HttpError)
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub(crate) async fn delete_request(&self, path: &str) -> Result<Response> {
        self.request(Method::DELETE, path)?
            .send()
            .await
            .map_err(SeekError::HttpError)
    }

    /// Pass the response through if its status is one of `accepted`.
    pub(crate) async fn expect_status(
        response: Response,
        accepted: &[StatusCode],
    ) -> Result<Response> {
        if accepted.contains(&response.status()) {
            return Ok(response);
        }
        Err(Self::error_from_response(response).await)
    }

    /// Decode the `data` member of a success response.
    pub(crate) async fn decode_data<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.bytes().await.map_err(SeekError::HttpError)?;
        let document: Document<T> = serde_json::from_slice(&body)?;
        Ok(document.into_data())
    }

    /// Read the body of a failed response.
    pub(crate) async fn error_body(response: Response) -> (StatusCode, String) {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        (status, body)
    }

    /// Convert a failed response into [`SeekError::ApiError`].
    pub(crate) async fn error_from_response(response: Response) -> SeekError {
        let (status, body) = Self::error_body(response).await;
        SeekError::from_error_body(status, &body)
    }
}

/// Path of a resource collection, e.g. `studies`.
pub(crate) fn collection_path(resource_type: &str) -> String {
    resource_type.to_string()
}

/// Path of a single resource, e.g. `studies/12`. The id is encoded as one
/// path segment.
pub(crate) fn member_path(resource_type: &str, id: &str) -> String {
    format!("{}/{}", resource_type, urlencoding::encode(id))
}
