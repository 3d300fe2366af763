//! Demoforge cloud core
//!
//! Provider-agnostic building blocks for provisioning and tearing down the
//! demo deployment: the resource ledger persisted across invocations, the
//! provision/teardown lifecycle, and the reports both produce.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 demoforge CLI                    │
//! │             (init / setup / reset)               │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               demoforge-cloud                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │          Provider Abstraction             │   │
//! │  │  trait CloudProvider { ... }              │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │  Lifecycle   │  │Resource Ledger│            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────────────────────┬─────────────────────────┘
//!                         │
//!                 ┌───────▼───────┐
//!                 │      gcp      │
//!                 │   provider    │
//!                 └───────────────┘
//! ```

pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod provider;
pub mod report;

// Re-exports
pub use error::{CloudError, Result};
pub use ledger::{FileLedgerStore, LedgerStore, MemoryLedgerStore, ResourceLedger};
pub use lifecycle::{BUCKET_PREFIX, ProvisionOptions, deprovision, generate_bucket_name, provision};
pub use provider::{AuthStatus, CloudProvider, DeployRequest, DeployedService};
pub use report::{
    EXCERPT_CHAR_LIMIT, ProvisionReport, ResourceKind, ResourceOutcome, TeardownReport,
    VerificationReport,
};
