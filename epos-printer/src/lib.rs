//! # epos-printer
//!
//! Client for Epson ePOS-Print receipt printers.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ePOS-Print XML command building (text, styles, rules, icons, cut)
//! - SOAP envelope wrapping
//! - HTTP delivery with a bounded timeout and cancellation
//! - Device response parsing
//!
//! Receipt content (WHAT to print) stays in application code, either as
//! direct builder calls or as a JSON [`LayoutScript`].
//!
//! ## Example
//!
//! ```ignore
//! use epos_printer::{Align, EposBuilder, EposPrinter, Icon, LineThickness, PrinterConfig};
//!
//! let mut builder = EposBuilder::new();
//! builder.header("Order 42", Some(Icon::Takeout));
//! builder.line(LineThickness::Medium);
//! builder.row("Burger", "9.00", false);
//! builder.foot("Total", "9.00", 8, true);
//! builder.align(Align::Center).text("Thank you");
//! builder.cut();
//!
//! let printer = EposPrinter::new(&PrinterConfig::new("192.168.1.50"))?;
//! let outcome = printer.print(&builder)?.outcome().await;
//! ```

mod config;
mod epos;
mod error;
mod icon;
mod layout;
mod printer;
mod response;
pub mod soap;

// Re-exports
pub use config::{DEFAULT_DEVICE_ID, DEFAULT_TIMEOUT, PrinterConfig};
pub use epos::{
    Align, BadgeColumn, COLUMNS, DEFAULT_FEED_UNITS, DEFAULT_LINE_SPACING, EposBuilder, FontSize,
    LineThickness, SMALL_COLUMNS,
};
pub use error::{PrintError, PrintResult};
pub use icon::Icon;
pub use layout::{LayoutOp, LayoutScript};
pub use printer::{
    EposPrinter, FailureReason, HttpReply, HttpTransport, PrintJob, PrintOutcome, PrintStatus,
    Transport,
};
pub use response::PrintResponse;
