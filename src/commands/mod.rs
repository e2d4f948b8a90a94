pub mod audit;

pub use audit::AuditCommand;
