//! Domain entities - the core business objects.

mod blog;
mod contact;
mod document;
mod work;

pub use blog::{BlogDraft, BlogPatch, BlogPost, DEFAULT_AUTHOR};
pub use contact::ContactMessage;
pub use document::{Document, Validate, advance_timestamp, timestamp_now};
pub use work::{WorkDraft, WorkItem, WorkPatch};
