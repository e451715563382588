//! Replay sampler for the LABS QAOA search
//!
//! Runs the two-stage search against measurement counts recorded on an
//! external execution substrate, instead of a live device or simulator.
//! Counts are stored per `(gamma, beta)` point in a JSON [`ShotArchive`];
//! [`ReplaySampler`] draws shots from them, weighted by count.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use labs_adapter_replay::{ReplaySampler, ShotArchive};
//! use labs_core::{SearchConfig, search_best_sequence};
//!
//! let counts: BTreeMap<String, u64> =
//!     [("0010".to_string(), 3), ("0000".to_string(), 9)].into_iter().collect();
//! let archive = ShotArchive::new(4).with_record(0.2, 0.4, counts);
//! let sampler = ReplaySampler::new(&archive).unwrap();
//!
//! let config = SearchConfig::new(4, 50, 200, 1)
//!     .with_gammas(vec![0.2])
//!     .with_betas(vec![0.4]);
//! let result = search_best_sequence(&config, sampler, None).unwrap();
//! assert_eq!(result.best_energy, Some(2));
//! ```

mod archive;
mod error;
mod sampler;

pub use archive::{Counts, ShotArchive, ShotRecord};
pub use error::{ReplayError, ReplayResult};
pub use sampler::{DEFAULT_TOLERANCE, ReplaySampler};
