use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tonic::Code;

use storefront_proto::v1::user_directory_client::UserDirectoryClient;
use storefront_proto::v1::UserRequest;

use crate::error::{Result, StorefrontError};
use crate::user::User;

/// Default deadline for upstream user resolution.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(1);

/// Resolve a user by id from the directory service.
///
/// Object-safe so the order book stays transport-agnostic.
#[async_trait]
pub trait ResolveUser: Send + Sync {
    async fn resolve(&self, id: i32) -> Result<User>;
}

// ---------------------------------------------------------------------------
// HTTP transport
// ---------------------------------------------------------------------------

/// Point lookup against `{base}/user?id=<id>`.
///
/// Carries a bounded request timeout so a stalled directory cannot pin
/// order-creation workers indefinitely.
pub struct HttpUserResolver {
    base_url: String,
    client: reqwest::Client,
}

impl HttpUserResolver {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorefrontError::Upstream(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

#[async_trait]
impl ResolveUser for HttpUserResolver {
    async fn resolve(&self, id: i32) -> Result<User> {
        let url = format!("{}/user?id={id}", self.base_url.trim_end_matches('/'));
        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                StorefrontError::Timeout
            } else {
                StorefrontError::Upstream(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StorefrontError::UserNotFound(id));
        }
        if !status.is_success() {
            return Err(StorefrontError::Upstream(format!(
                "user service returned {status}"
            )));
        }

        response
            .json::<User>()
            .await
            .map_err(|e| StorefrontError::Decode(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// gRPC transport
// ---------------------------------------------------------------------------

/// `UserDirectory.GetUser` over a lazily-connected channel with a per-call
/// deadline.
#[derive(Debug)]
pub struct GrpcUserResolver {
    client: UserDirectoryClient<Channel>,
    deadline: Duration,
}

impl GrpcUserResolver {
    /// `addr` is a full URI, e.g. `http://localhost:50051`. The channel
    /// connects lazily, so a dead directory surfaces as `Upstream` on the
    /// first call rather than at construction.
    pub fn new(addr: impl Into<String>, deadline: Duration) -> Result<Self> {
        let endpoint = Endpoint::from_shared(addr.into())
            .map_err(|e| StorefrontError::Upstream(e.to_string()))?
            // Bounds the wait client-side even if the server ignores the
            // propagated grpc-timeout.
            .timeout(deadline);
        Ok(Self {
            client: UserDirectoryClient::new(endpoint.connect_lazy()),
            deadline,
        })
    }
}

#[async_trait]
impl ResolveUser for GrpcUserResolver {
    async fn resolve(&self, id: i32) -> Result<User> {
        let mut client = self.client.clone();
        let mut request = tonic::Request::new(UserRequest { id });
        request.set_timeout(self.deadline);

        match client.get_user(request).await {
            Ok(response) => {
                let user = response.into_inner();
                Ok(User::new(user.id, user.name))
            }
            Err(status) => Err(match status.code() {
                Code::NotFound => StorefrontError::UserNotFound(id),
                Code::DeadlineExceeded | Code::Cancelled => StorefrontError::Timeout,
                Code::Unavailable => StorefrontError::Upstream(status.message().to_string()),
                _ => StorefrontError::Upstream(status.to_string()),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
