//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument. Multi-statement units that
//! must commit together open their own transaction.

pub mod category_repo;
pub mod conversation_repo;
pub mod dispute_repo;
pub mod favorite_repo;
pub mod message_repo;
pub mod notification_repo;
pub mod provider_repo;
pub mod quote_request_repo;
pub mod report_repo;
pub mod review_repo;
pub mod service_repo;
pub mod subcategory_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use conversation_repo::ConversationRepo;
pub use dispute_repo::DisputeRepo;
pub use favorite_repo::FavoriteRepo;
pub use message_repo::MessageRepo;
pub use notification_repo::NotificationRepo;
pub use provider_repo::ProviderRepo;
pub use quote_request_repo::QuoteRequestRepo;
pub use report_repo::ReportRepo;
pub use review_repo::ReviewRepo;
pub use service_repo::ServiceRepo;
pub use subcategory_repo::SubcategoryRepo;
pub use user_repo::UserRepo;
