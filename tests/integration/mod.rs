//! Integration tests for agent-gateway

pub mod agent_tests;
pub mod config_tests;
pub mod resolver_tests;
pub mod route_tests;
