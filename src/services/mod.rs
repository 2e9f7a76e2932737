//! Services - the validation and business rules that sit between the HTTP
//! handlers and the entity store.

mod avatar;
mod comment;
mod profile;
mod user;

pub use avatar::{AvatarUrl, DEFAULT_AVATAR_BASE};
pub use comment::CommentService;
pub use profile::ProfileService;
pub use user::UserService;

use std::sync::Arc;

use crate::store::EntityStore;

/// All services, sharing one store handle.
#[derive(Clone)]
pub struct Services {
    pub profiles: ProfileService,
    pub users: UserService,
    pub comments: CommentService,
}

impl Services {
    pub fn new(store: Arc<dyn EntityStore>, avatars: AvatarUrl) -> Self {
        Self {
            profiles: ProfileService::new(Arc::clone(&store), avatars.clone()),
            users: UserService::new(Arc::clone(&store), avatars),
            comments: CommentService::new(store),
        }
    }
}
