pub mod audit;
pub mod leave;
pub mod notification;
pub mod user;
pub mod webhook;

pub use audit::AuditEntry;
pub use leave::{LeaveRequest, LeaveType};
pub use notification::Notification;
pub use user::User;
pub use webhook::{Webhook, WebhookDelivery};
