pub mod cache;
pub mod format;
pub mod product;
pub mod record;
pub mod search;

pub use cache::{CacheError, ProductCache};
pub use format::{
    format_main_line, format_pack_size, metal_detector_label, normalize_country_code,
    strip_item_number_prefix,
};
pub use product::{MetalDetector, Product};
pub use record::{ActionFlags, SampleNotes, SampleRecord};
pub use search::{find_product, search, MAX_SEARCH_RESULTS};
