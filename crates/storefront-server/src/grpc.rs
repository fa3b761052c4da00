use std::sync::Arc;

use tonic::{Request, Response, Status};

use storefront_core::user::UserDirectory;
use storefront_proto::v1::user_directory_server::UserDirectory as UserDirectoryRpc;
use storefront_proto::v1::user_directory_server::UserDirectoryServer;
use storefront_proto::v1::{UserRequest, UserResponse};

/// gRPC transport over the same in-memory directory the HTTP routes serve.
pub struct GrpcUserDirectory {
    directory: Arc<UserDirectory>,
}

impl GrpcUserDirectory {
    pub fn new(directory: Arc<UserDirectory>) -> Self {
        Self { directory }
    }

    pub fn into_service(self) -> UserDirectoryServer<Self> {
        UserDirectoryServer::new(self)
    }
}

#[tonic::async_trait]
impl UserDirectoryRpc for GrpcUserDirectory {
    async fn get_user(
        &self,
        request: Request<UserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let id = request.into_inner().id;
        match self.directory.lookup(id) {
            Some(user) => Ok(Response::new(UserResponse {
                id: user.id,
                name: user.name,
            })),
            None => Err(Status::not_found(format!("user not found: {id}"))),
        }
    }
}
