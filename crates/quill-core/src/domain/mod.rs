//! Domain entities - the core business objects.

mod group;
mod page;
mod post;
mod user;

pub use group::{Group, TITLE_MAX_LEN};
pub use page::{PAGE_SIZE, Page, num_pages};
pub use post::Post;
pub use user::User;
