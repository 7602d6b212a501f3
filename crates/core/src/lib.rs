//! licport Core - license portal logic without I/O
//!
//! This crate holds everything about the portal that can be computed from
//! data already in hand:
//! - Proration of license charges against an active order
//! - Purchase selection, validation and invoice drafting
//! - Response-envelope and login-token normalization
//! - History pagination state and client-side routes

pub mod checkout;
pub mod config;
pub mod envelope;
pub mod error;
pub mod invoice;
pub mod model;
pub mod pager;
pub mod proration;
pub mod route;
pub mod selection;
pub mod status;
pub mod token;

pub use checkout::{Checkout, CheckoutError};
pub use config::PortalConfig;
pub use error::{ParseError, ValidationError};
pub use invoice::InvoiceDraft;
pub use model::{
    ActiveOrder, CreateOrderRequest, CreateOrderResponse, License, LicensePage, OrderItem,
    OrderRecord, PurchaseLicenseRequest, PurchaseLicenseResponse, Profile, Session, Transaction,
};
pub use pager::{PageRequest, Pager, ORDERS_PAGE_SIZE};
pub use proration::{LineCharge, ProrationContext};
pub use route::Route;
pub use selection::{LicenseSelectionRow, Quote, Selection};
pub use status::status_message;

/// licport version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
