pub mod lookup;

pub use lookup::{AddressLookup, LookupError, LookupKind, LookupService, TransactionLookup};
