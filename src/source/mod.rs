pub mod provider;
pub mod rest_countries;
pub mod types;

pub use provider::{CountrySource, FetchError};
pub use rest_countries::RestCountriesSource;
pub use types::{Country, Currency, Region};
