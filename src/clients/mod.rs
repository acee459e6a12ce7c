pub mod exam_client;
pub mod gateway;

pub use exam_client::HttpGateway;
pub use gateway::SubmissionGateway;
