pub mod assembler;
pub mod broadcaster;
pub mod confirmation;
pub mod submitter;

pub use assembler::{AssemblyRequest, BundleAssembler};
pub use broadcaster::{BroadcastReport, RelayBroadcaster};
pub use confirmation::{ConfirmationChecker, ConfirmationMode, ConfirmationSettings, ConfirmationStatus};
pub use submitter::{BundleSubmitter, SubmissionRequest, SubmitterSettings};
