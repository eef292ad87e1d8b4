//! Payment contracts

mod create;

pub use create::CreatePaymentContract;
