//! Domain models with validation at construction
//!
//! Request bodies deserialize into `*Payload` types with every field optional.
//! `validate()` turns a payload into its insert type or a `ValidationErrors`
//! listing every bad field. Row types mirror the database columns.

pub mod validation;
pub mod email;
pub mod user;
pub mod contact;
pub mod newsletter;
pub mod region;

pub use validation::{FieldIssue, ValidationError, ValidationErrors};
pub use email::EmailAddress;
pub use user::{NewUser, User, UserPayload};
pub use contact::{ContactSubmission, ContactSubmissionPayload, NewContactSubmission};
pub use newsletter::{NewNewsletterSubscription, NewsletterPayload, NewsletterSubscription};
pub use region::{NewRegion, Region, RegionPayload, MAX_REGION_TITLE_LEN};
