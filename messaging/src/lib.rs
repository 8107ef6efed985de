//! Access-group messaging: sending DMs and group-chat messages, listing a
//! user's threads by their latest message, and paging through a thread.

mod models;
mod service;
pub mod validate;

pub use models::{
    AccessGroupInfo, DmMessageInfo, GetPaginatedMessagesForDmResponse,
    GetPaginatedMessagesForDmThreadRequest, GetPaginatedMessagesForGroupChatThreadRequest,
    GetPaginatedMessagesForGroupChatThreadResponse, GetUserDmResponse, GetUserGroupChatResponse,
    GetUserThreadsRequest, SendMessageRequest, SendMessageResponse, ThreadMessage,
};
pub use service::MessagingService;
pub use validate::{decode_and_validate_public_key, validate_access_group_public_key_and_name};
