pub mod completion;
pub mod forwarder;
pub mod template;
