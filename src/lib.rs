// Library exports for filelookup
pub mod config;
pub mod fs;
mod lookup;

#[cfg(test)]
mod test_support;

#[cfg(feature = "async")]
pub use lookup::{lookup_async, lookup_async_with};
pub use lookup::{
    LookupError, LookupRequest, LookupResult, find_nearest_file, find_nearest_file_from, lookup,
    lookup_with,
};
