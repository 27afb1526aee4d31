//! A pricker and prover for touches of Stedman and Erin on odd stages.
//!
//! A [`Touch`] is a [`Start`] followed by a sequence of [`Course`]s, each of which is a sequence
//! of [`Six`]es.  Every level is kept consistent automatically: each block starts from the last
//! row of the block before it, and editing any block re-calculates everything after it.  The
//! rows of a touch are generated by passing a [`Visitor`] through the block tree, which is how
//! [`Proof`] finds repeated rows and records where they came from in a [`BlockDirectory`].
//!
//! ```
//! use pricker::{Method, Proof, ProofResult, Touch};
//!
//! let touch = Touch::parse("2314567890E\n1 s10 s13 22", Method::STEDMAN)?;
//! let mut proof = Proof::new();
//! touch.accept(&mut proof);
//! assert_eq!(proof.result(), ProofResult::True);
//! # Ok::<(), pricker::Error>(())
//! ```

#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links, rustdoc::private_intra_doc_links)]

mod block;
mod call;
mod container;
mod course;
mod directory;
mod error;
mod method;
pub mod parse;
mod proof;
pub mod render;
mod six;
mod start;
mod touch;
pub mod visitor;

pub use block::{Block, BlockRef, ContainerId, Ownership};
pub use call::Call;
pub use container::SerialContainer;
pub use course::Course;
pub use directory::BlockDirectory;
pub use error::{Error, Result};
pub use method::Method;
pub use proof::{Proof, ProofResult};
pub use six::{Six, SixType};
pub use start::Start;
pub use touch::{CourseMut, Touch};
pub use visitor::Visitor;

// Re-export the row primitives, so users don't need to depend on `pricker_rows` directly
pub use pricker_rows::{Bell, Change, InvalidRowError, Row, Stage};
