pub mod details;
pub mod exchange_rate;
pub mod export;
pub mod progress;
pub mod search;

pub use details::{DetailBatchFetcher, FetchStrategy};
pub use exchange_rate::DolarApiClient;
pub use export::{CsvExporter, RecordExporter};
pub use progress::{ChannelNotifier, LogNotifier, NullNotifier, Progress};
pub use search::SearchProducts;
