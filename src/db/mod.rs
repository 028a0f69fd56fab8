pub mod audit;
pub mod deliveries;
pub mod leave_types;
pub mod leaves;
pub mod notifications;
pub mod users;
pub mod webhooks;
