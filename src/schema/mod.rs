pub mod record;
pub mod selection;
