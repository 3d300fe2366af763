//! Google Cloud provider for demoforge
//!
//! This crate implements the CloudProvider trait for Google Cloud,
//! managing the demo storage bucket and the Cloud Run service.
//!
//! # Requirements
//!
//! - The `gcloud` CLI must be installed
//! - A service-account key file; authentication always goes through
//!   `gcloud auth activate-service-account`
//!
//! # Example
//!
//! ```ignore
//! use demoforge_cloud::CloudProvider;
//! use demoforge_cloud_gcp::{Credentials, GcpProvider};
//!
//! let credentials = Credentials::load("service-account.json")?;
//! let provider = GcpProvider::new(credentials, "my-demo-project");
//!
//! let auth = provider.check_auth().await?;
//! if !auth.authenticated {
//!     panic!("Not authenticated: {:?}", auth.error);
//! }
//! ```

pub mod credentials;
pub mod error;
pub mod gcloud;
pub mod probe;
pub mod provider;

pub use credentials::{Credentials, ServiceAccountKey};
pub use error::{GcpError, Result};
pub use gcloud::{BUCKET_LOCATION, DEFAULT_REGION, Gcloud};
pub use provider::GcpProvider;
