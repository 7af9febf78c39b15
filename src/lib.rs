pub mod constants;
pub mod node_cfg;
pub mod report;
pub mod rules;
