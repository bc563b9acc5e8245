pub mod commit;
pub mod config;
pub mod duration;
pub mod form;
pub mod log;
pub mod registry;
pub mod report;
pub mod shell;
pub mod view;
