pub mod descriptor;
pub mod field;
pub mod record;
