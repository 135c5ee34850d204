//! Broadcast eligibility
//!
//! Pure decision logic for whether a broadcast may start: recipient
//! eligibility, template selection and monthly quota headroom.

pub mod evaluator;
pub mod plans;
pub mod quota;
pub mod selection;

pub use evaluator::{evaluate, eligible_contacts, BlockReason, BroadcastRequest, Evaluation};
pub use plans::PlanTable;
pub use quota::{check_quota, QuotaStatus};
pub use selection::{TemplateMode, TemplateSelection};
