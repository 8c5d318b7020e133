mod media_endpoint;
mod static_endpoint;

pub use media_endpoint::MediaEndpoint;
pub use static_endpoint::StaticMediaEndpoint;
