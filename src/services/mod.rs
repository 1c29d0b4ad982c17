pub mod download;
pub mod fetch_service;
pub mod rotation;

pub use download::FileDownloader;
pub use fetch_service::FetchService;
pub use rotation::rotate;
