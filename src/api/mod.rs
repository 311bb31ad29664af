pub mod connectivity;
pub mod dates;
pub mod fetch;
pub mod guardian;
pub mod query;

pub use connectivity::{AlwaysReachable, Connectivity, TcpProbe};
pub use dates::TimeWindow;
pub use fetch::{FetchCompletion, FetchJob, HttpTransport, Transport};
pub use guardian::{Article, ParsedArticles, parse_articles};
pub use query::build_url;
