pub mod agent;
pub mod random_agent;
