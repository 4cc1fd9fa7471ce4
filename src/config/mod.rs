//! Configuration module

mod site;

pub use site::CmsConfig;
pub use site::PreviewConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
