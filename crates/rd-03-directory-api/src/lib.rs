//! # Directory API
//!
//! HTTP front end of the Roster directory. A submission is validated
//! against its authority's signature chain, admitted under last-writer-wins,
//! and answered with the other members enrolled under the same authority.
//!
//! ## Error Mapping
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | Accepted | 200 | JSON array of siblings |
//! | Malformed body, failed validation, conflict | 400 | `{"error": reason}` |
//! | Store failure | 500 | `{"error": "Failed to update database"}` or `"Failed to query database"` |

pub mod domain;
pub mod router;
pub mod service;

pub use domain::error::DirectoryError;
pub use router::{build_router, serve};
pub use service::DirectoryService;
