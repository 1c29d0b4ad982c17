pub mod traits;
pub mod bing;
pub mod guardian;
pub mod nasa;
pub mod national_geographic;
pub mod random;
pub mod smithsonian;
pub mod thirty_five_photo;
pub mod wikimedia;
pub mod registry;

pub use traits::ImageSource;
pub use registry::SourceRegistry;
