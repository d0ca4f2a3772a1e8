pub(crate) mod overview;
pub(crate) mod reports;
pub(crate) mod settings;
pub(crate) mod transactions;
