//! secret-relay - propagate deployment values into GitHub repository secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── sync          # Full pipeline
//! │   ├── certs         # Certificate pair only
//! │   ├── push_env      # Operator env file
//! │   ├── list, verify  # Store inspection
//! │   ├── param, env    # Local inspection
//! │   └── init          # Starter config
//! └── core/             # Core library components
//!     ├── config        # .secret-relay.toml management
//!     ├── params        # Parameter file parsing
//!     ├── deployment/   # Deployment output extraction
//!     │   ├── az        # az CLI source
//!     │   └── file      # Offline JSON source
//!     ├── certs         # TLS certificate pair
//!     ├── cipher/       # Sealed-box encryption for the store
//!     ├── store/        # Secret store backends
//!     │   ├── github    # GitHub Actions secrets API
//!     │   └── memory    # In-memory store
//!     ├── writer        # Provenance-aware publishing
//!     ├── relay         # Pipeline stages
//!     └── consumer      # Container environment contract
//! ```
//!
//! # Provenance
//!
//! Auto-derived secrets (parameters, outputs, constants, certificates) are
//! overwritten on every run. Manual secrets are created when absent and never
//! overwritten.

pub mod cli;
pub mod core;
pub mod error;
