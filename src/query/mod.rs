pub mod executor;
pub mod matcher;
pub mod scorer;

pub use executor::{scan_directory, DirectoryScanner, ScanError, ScanOptions, ScanResult, ScoredScanResult};
pub use matcher::{find_matches, find_scored_matches, match_windows, ScoredWindow};
pub use scorer::{similarity, NeedleScorer};
