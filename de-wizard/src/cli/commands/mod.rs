pub mod connect;
pub mod decode;
pub mod serve;
pub mod template;
pub mod upload;
pub mod wizard;
