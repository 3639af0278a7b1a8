use crate::config::Config;
use crate::service::{AddressLookup, LookupService, TransactionLookup};

pub struct AppState {
    pub config: Config,
    pub address_service: LookupService<AddressLookup>,
    pub transaction_service: LookupService<TransactionLookup>,
}
