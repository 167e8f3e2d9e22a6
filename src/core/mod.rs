pub mod composer;
pub mod fallback;
pub mod formatter;
pub mod matcher;
pub mod mood;
pub mod parser;
pub mod phrasebook;
pub mod pipeline;
pub mod source;
pub mod store;
pub mod template;
pub mod validator;
pub mod variety;
