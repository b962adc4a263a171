pub mod balance;
pub mod channel;
pub mod obligation;
pub mod transaction;

pub use balance::{BalanceSummary, ContributingObligation, PersonalBalance};
pub use channel::{payment_link, ChannelType, PaymentChannel};
pub use obligation::DebtObligation;
pub use transaction::{minor_unit_exponent, ExpenseTransaction};
